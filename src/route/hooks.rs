use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

use crate::params::ParamsMap;

/// Payload handed to a `before_open` hook before any history write.
#[derive(Debug, Clone)]
pub struct OpenContext {
    pub params: ParamsMap,
    pub query: ParamsMap,
    pub state: Value,
    pub url: String,
}

/// A `before_open` decision. `Abort` and `Redirect` are normal control
/// flow, not errors.
#[derive(Debug, Clone)]
pub enum HookOutcome {
    Proceed,
    Abort,
    Redirect(RedirectTarget),
}

#[derive(Debug, Clone)]
pub struct RedirectTarget {
    pub url: String,
    pub state: Value,
    pub replace: bool,
}

impl RedirectTarget {
    pub fn push(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: Value::Null,
            replace: false,
        }
    }

    pub fn replace(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: Value::Null,
            replace: true,
        }
    }

    pub fn with_state(mut self, state: Value) -> Self {
        self.state = state;
        self
    }
}

pub type BeforeOpenHook = Arc<dyn Fn(OpenContext) -> BoxFuture<'static, HookOutcome> + Send + Sync>;

/// Fired when the route's derived `is_opened` transitions, after the
/// location change that caused it has settled.
pub type TransitionHook = Arc<dyn Fn() + Send + Sync>;

/// Reshapes raw matched params; returning `None` marks the route as not
/// opened despite a structural path match.
pub type ParamsTransform = Arc<dyn Fn(ParamsMap) -> Option<ParamsMap> + Send + Sync>;
