// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use argocd_deploy::argocd::{ApiGateway, ReqwestTransport};
use argocd_deploy::config::Config;
use argocd_deploy::constants::OUTPUT_NAME;
use argocd_deploy::output;
use argocd_deploy::reconcilers::ApplicationReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, stdout is reserved for workflow commands
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        output::set_failed(&format!("{:#}", e));
        return Err(e);
    }

    Ok(())
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: action={} application={} endpoint={}",
        config.action, config.desired_state.application_name, config.endpoint
    );

    let transport =
        ReqwestTransport::new().map_err(|e| anyhow!("failed to build HTTP client: {}", e))?;
    let gateway = ApiGateway::new(config.endpoint.clone(), config.token.clone(), transport)?;

    let reconciler = ApplicationReconciler::new(gateway, config);
    let outcome = reconciler.run().await?;

    output::set_output(OUTPUT_NAME, &serde_json::to_string(&outcome.to_output())?)?;
    info!("Done");

    Ok(())
}
