//! In-process calls into the router, bypassing the network stack

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use http::{Request, Response};
use tower::Service;

use crate::core::ServerState;

pub type OneshotResult = Result<Response<Body>>;

/// Dispatch a single request through a stateful router
///
/// ```ignore
/// let mut app = build_app(&state);
/// let request = Request::builder().uri("/health").body(Body::empty())?;
/// let response = app.oneshot(&state, request).await?;
/// ```
#[async_trait::async_trait]
pub trait OneshotRouter {
    async fn oneshot(&mut self, state: &ServerState, request: Request<Body>) -> OneshotResult;
}

#[async_trait::async_trait]
impl OneshotRouter for Router<ServerState> {
    async fn oneshot(&mut self, state: &ServerState, request: Request<Body>) -> OneshotResult {
        let mut svc = self.clone().with_state(state.clone());
        let response = svc.call(request).await?;
        Ok(response)
    }
}
