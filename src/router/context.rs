use parking_lot::RwLock;
use std::sync::Arc;

use crate::location::LocationStore;
use crate::pattern::MatchOptions;
use crate::query::QueryStore;
use crate::route::{RouteError, RouteResult};

/// Shared stores and match defaults for a family of routes. Passed
/// explicitly to constructors; the process-wide default below exists only
/// as an application start-up escape hatch.
#[derive(Debug, Clone)]
pub struct RouterContext {
    location: Arc<LocationStore>,
    query: QueryStore,
    base_url: Option<String>,
    match_options: MatchOptions,
}

impl RouterContext {
    pub fn new() -> Arc<Self> {
        let location = Arc::new(LocationStore::new());
        Arc::new(Self {
            query: QueryStore::new(Arc::clone(&location)),
            location,
            base_url: None,
            match_options: MatchOptions::default(),
        })
    }

    pub fn builder() -> RouterContextBuilder {
        RouterContextBuilder::default()
    }

    pub fn location(&self) -> &Arc<LocationStore> {
        &self.location
    }

    pub fn query(&self) -> &QueryStore {
        &self.query
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn match_options(&self) -> MatchOptions {
        self.match_options
    }
}

#[derive(Debug, Clone)]
pub struct RouterContextBuilder {
    initial_url: String,
    base_url: Option<String>,
    match_options: MatchOptions,
}

impl Default for RouterContextBuilder {
    fn default() -> Self {
        Self {
            initial_url: "/".to_string(),
            base_url: None,
            match_options: MatchOptions::default(),
        }
    }
}

impl RouterContextBuilder {
    pub fn initial_url<S: Into<String>>(mut self, url: S) -> Self {
        self.initial_url = url.into();
        self
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn match_options(mut self, value: MatchOptions) -> Self {
        self.match_options = value;
        self
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.match_options.case_sensitive = value;
        self
    }

    pub fn strict_trailing_slash(mut self, value: bool) -> Self {
        self.match_options.strict_trailing_slash = value;
        self
    }

    pub fn build(self) -> RouteResult<Arc<RouterContext>> {
        if let Some(base_url) = &self.base_url
            && !base_url.is_empty()
            && (!base_url.starts_with('/') || base_url.ends_with('/'))
        {
            return Err(RouteError::InvalidBaseUrl {
                base_url: base_url.clone(),
            });
        }
        let location = Arc::new(LocationStore::with_initial(&self.initial_url));
        Ok(Arc::new(RouterContext {
            query: QueryStore::new(Arc::clone(&location)),
            location,
            base_url: self.base_url,
            match_options: self.match_options,
        }))
    }
}

static DEFAULT_CONTEXT: RwLock<Option<Arc<RouterContext>>> = RwLock::new(None);

/// The process-wide default context, lazily constructed on first access.
pub fn default_context() -> Arc<RouterContext> {
    if let Some(context) = DEFAULT_CONTEXT.read().as_ref() {
        return Arc::clone(context);
    }
    let mut guard = DEFAULT_CONTEXT.write();
    if let Some(context) = guard.as_ref() {
        return Arc::clone(context);
    }
    let context = RouterContext::new();
    *guard = Some(Arc::clone(&context));
    context
}

pub fn set_default_context(context: Arc<RouterContext>) {
    *DEFAULT_CONTEXT.write() = Some(context);
}

/// Clears the default so the next access builds a pristine context. Meant
/// for tests.
pub fn reset_default_context() {
    *DEFAULT_CONTEXT.write() = None;
}
