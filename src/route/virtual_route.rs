use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use crate::params::ParamsMap;
use crate::router::{RouterContext, default_context};

pub type QueryPredicate = Arc<dyn Fn(&ParamsMap) -> bool + Send + Sync>;

/// Decides a virtual route's open state: unset (always closed), an
/// explicit flag, or a predicate re-evaluated against current query data.
#[derive(Clone, Default)]
pub enum Resolver {
    #[default]
    Unset,
    Flag(bool),
    Predicate(QueryPredicate),
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolver::Unset => f.write_str("Unset"),
            Resolver::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            Resolver::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

pub type VirtualOpenHook =
    Arc<dyn Fn(ParamsMap, ParamsMap) -> BoxFuture<'static, Resolver> + Send + Sync>;
pub type VirtualCloseHook = Arc<dyn Fn(&ParamsMap) -> Resolver + Send + Sync>;

struct VirtualState {
    params: ParamsMap,
    resolver: Resolver,
    opening: bool,
}

struct VirtualInner {
    context: Arc<RouterContext>,
    state: Mutex<VirtualState>,
    open_hook: Option<VirtualOpenHook>,
    close_hook: Option<VirtualCloseHook>,
}

/// A route with no path pattern; open state is driven by explicit
/// `open`/`close` calls or a query-data resolver, never by the pathname.
#[derive(Clone)]
pub struct VirtualRoute {
    inner: Arc<VirtualInner>,
}

impl VirtualRoute {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> VirtualRouteBuilder {
        VirtualRouteBuilder::default()
    }

    pub fn context(&self) -> &Arc<RouterContext> {
        &self.inner.context
    }

    pub fn is_opened(&self) -> bool {
        let state = self.inner.state.lock();
        match &state.resolver {
            Resolver::Unset => false,
            Resolver::Flag(flag) => *flag,
            Resolver::Predicate(predicate) => {
                let predicate = Arc::clone(predicate);
                drop(state);
                predicate(&self.inner.context.query().data())
            }
        }
    }

    pub fn is_opening(&self) -> bool {
        self.inner.state.lock().opening
    }

    /// Params passed to the last `open` call; empty after `close`.
    pub fn params(&self) -> ParamsMap {
        self.inner.state.lock().params.clone()
    }

    /// Opens the route: stores params, flips the resolver (or awaits the
    /// custom open hook for the next resolver), then merges `query` into
    /// the shared query store.
    pub async fn open(&self, params: ParamsMap, query: ParamsMap) {
        {
            let mut state = self.inner.state.lock();
            state.opening = true;
            state.params = params.clone();
        }
        let resolver = match &self.inner.open_hook {
            Some(hook) => hook(params, query.clone()).await,
            None => Resolver::Flag(true),
        };
        {
            let mut state = self.inner.state.lock();
            state.resolver = resolver;
            state.opening = false;
        }
        if !query.is_empty() {
            self.inner.context.query().update(query);
        }
    }

    pub fn close(&self) {
        let resolver = match &self.inner.close_hook {
            Some(hook) => hook(&self.inner.context.query().data()),
            None => Resolver::Flag(false),
        };
        let mut state = self.inner.state.lock();
        state.resolver = resolver;
        state.params = ParamsMap::new();
    }

    /// Replaces the resolver with a query-data predicate, switching the
    /// route to location-driven open/close semantics.
    pub fn set_resolver<F>(&self, predicate: F)
    where
        F: Fn(&ParamsMap) -> bool + Send + Sync + 'static,
    {
        self.inner.state.lock().resolver = Resolver::Predicate(Arc::new(predicate));
    }
}

impl Default for VirtualRoute {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("VirtualRoute")
            .field("resolver", &state.resolver)
            .field("opening", &state.opening)
            .finish()
    }
}

#[derive(Default)]
pub struct VirtualRouteBuilder {
    context: Option<Arc<RouterContext>>,
    resolver: Resolver,
    open_hook: Option<VirtualOpenHook>,
    close_hook: Option<VirtualCloseHook>,
}

impl VirtualRouteBuilder {
    pub fn context(mut self, context: Arc<RouterContext>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn resolver<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ParamsMap) -> bool + Send + Sync + 'static,
    {
        self.resolver = Resolver::Predicate(Arc::new(predicate));
        self
    }

    pub fn open_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(ParamsMap, ParamsMap) -> BoxFuture<'static, Resolver> + Send + Sync + 'static,
    {
        self.open_hook = Some(Arc::new(hook));
        self
    }

    pub fn close_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ParamsMap) -> Resolver + Send + Sync + 'static,
    {
        self.close_hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> VirtualRoute {
        VirtualRoute {
            inner: Arc::new(VirtualInner {
                context: self.context.unwrap_or_else(default_context),
                state: Mutex::new(VirtualState {
                    params: ParamsMap::new(),
                    resolver: self.resolver,
                    opening: false,
                }),
                open_hook: self.open_hook,
                close_hook: self.close_hook,
            }),
        }
    }
}
