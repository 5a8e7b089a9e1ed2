mod context;

pub use context::{
    RouterContext, RouterContextBuilder, default_context, reset_default_context,
    set_default_context,
};

use serde_json::Value;
use std::sync::Arc;

use crate::group::{OpenRequest, RouteGroup};
use crate::route::{OpenOutcome, RouteResult};

/// Thin façade binding a top-level route group to the location adapter's
/// navigate operations.
#[derive(Debug, Clone)]
pub struct Router {
    routes: RouteGroup,
    context: Arc<RouterContext>,
}

impl Router {
    pub fn new(routes: RouteGroup) -> Self {
        Self::with_context(routes, default_context())
    }

    pub fn with_context(routes: RouteGroup, context: Arc<RouterContext>) -> Self {
        Self { routes, context }
    }

    pub fn routes(&self) -> &RouteGroup {
        &self.routes
    }

    pub fn context(&self) -> &Arc<RouterContext> {
        &self.context
    }

    pub fn navigate(&self, url: &str) {
        self.context.location().push(url, Value::Null);
    }

    pub fn navigate_with_state(&self, url: &str, state: Value) {
        self.context.location().push(url, state);
    }

    pub fn replace(&self, url: &str) {
        self.context.location().replace(url, Value::Null);
    }

    pub fn back(&self) -> bool {
        self.context.location().back()
    }

    pub fn forward(&self) -> bool {
        self.context.location().forward()
    }

    /// Delegates to the top-level group's open resolution.
    pub async fn open(&self, request: OpenRequest) -> RouteResult<OpenOutcome> {
        self.routes.open(request).await
    }
}
