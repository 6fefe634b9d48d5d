// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `reqwest`-backed HTTP service used by the gateway outside of tests

use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response};
use std::task::{Context, Poll};
use tower::{BoxError, Service};

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, BoxError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("argocd-deploy/", env!("CARGO_PKG_VERSION")))
            // 3xx must reach the gateway's status check, not be replayed as a GET
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl Service<Request<Bytes>> for ReqwestTransport {
    type Response = Response<Bytes>;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Bytes>) -> Self::Future {
        let client = self.client.clone();

        Box::pin(async move {
            let request = reqwest::Request::try_from(req)?;
            let response = client.execute(request).await?;

            let mut builder = Response::builder()
                .status(response.status())
                .version(response.version());
            if let Some(headers) = builder.headers_mut() {
                headers.extend(response.headers().clone());
            }

            let body = response.bytes().await?;
            Ok(builder.body(body)?)
        })
    }
}
