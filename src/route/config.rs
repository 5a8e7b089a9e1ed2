use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

use super::error::{RouteError, RouteResult};
use super::hooks::{BeforeOpenHook, HookOutcome, OpenContext, ParamsTransform, TransitionHook};
use crate::params::ParamsMap;
use crate::pattern::MatchOptions;

/// Per-route configuration. Everything except `index` is inherited by
/// children created through `extend`.
#[derive(Clone, Default)]
pub struct RouteConfig {
    pub index: bool,
    pub base_url: Option<String>,
    pub match_options: Option<MatchOptions>,
    pub params_transform: Option<ParamsTransform>,
    pub before_open: Option<BeforeOpenHook>,
    pub after_open: Option<TransitionHook>,
    pub after_close: Option<TransitionHook>,
}

impl RouteConfig {
    pub fn builder() -> RouteConfigBuilder {
        RouteConfigBuilder::default()
    }

    pub fn validate(&self) -> RouteResult<()> {
        if let Some(base_url) = &self.base_url
            && !base_url.is_empty()
            && (!base_url.starts_with('/') || base_url.ends_with('/'))
        {
            return Err(RouteError::InvalidBaseUrl {
                base_url: base_url.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for RouteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteConfig")
            .field("index", &self.index)
            .field("base_url", &self.base_url)
            .field("match_options", &self.match_options)
            .field("params_transform", &self.params_transform.is_some())
            .field("before_open", &self.before_open.is_some())
            .field("after_open", &self.after_open.is_some())
            .field("after_close", &self.after_close.is_some())
            .finish()
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouteConfigBuilder {
    config: RouteConfig,
}

impl RouteConfigBuilder {
    pub fn index(mut self, value: bool) -> Self {
        self.config.index = value;
        self
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    pub fn match_options(mut self, value: MatchOptions) -> Self {
        self.config.match_options = Some(value);
        self
    }

    pub fn params_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(ParamsMap) -> Option<ParamsMap> + Send + Sync + 'static,
    {
        self.config.params_transform = Some(Arc::new(transform));
        self
    }

    pub fn before_open<F>(mut self, hook: F) -> Self
    where
        F: Fn(OpenContext) -> BoxFuture<'static, HookOutcome> + Send + Sync + 'static,
    {
        self.config.before_open = Some(Arc::new(hook));
        self
    }

    pub fn after_open<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.after_open = Some(Arc::new(hook));
        self
    }

    pub fn after_close<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.after_close = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> RouteResult<RouteConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
