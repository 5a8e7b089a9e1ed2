mod config;
mod error;
mod hooks;
mod virtual_route;

pub use config::{RouteConfig, RouteConfigBuilder};
pub use error::{RouteError, RouteResult};
pub use hooks::{
    BeforeOpenHook, HookOutcome, OpenContext, ParamsTransform, RedirectTarget, TransitionHook,
};
pub use virtual_route::{
    QueryPredicate, Resolver, VirtualCloseHook, VirtualOpenHook, VirtualRoute, VirtualRouteBuilder,
};

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use crate::location::SubscriptionId;
use crate::params::ParamsMap;
use crate::pattern::{
    CompiledPattern, MatchOptions, PatternAst, build_path, compile_pattern, match_path,
    parse_pattern,
};
use crate::query::{append_query, serialize_query};
use crate::router::{RouterContext, default_context};

/// Navigation target for [`Route::open`]: either a literal URL (bypassing
/// pattern-based URL construction) or a params map.
#[derive(Debug, Clone)]
pub enum OpenTarget {
    Url(String),
    Params(ParamsMap),
}

impl Default for OpenTarget {
    fn default() -> Self {
        OpenTarget::Params(ParamsMap::new())
    }
}

impl From<&str> for OpenTarget {
    fn from(url: &str) -> Self {
        OpenTarget::Url(url.to_string())
    }
}

impl From<String> for OpenTarget {
    fn from(url: String) -> Self {
        OpenTarget::Url(url)
    }
}

impl From<ParamsMap> for OpenTarget {
    fn from(params: ParamsMap) -> Self {
        OpenTarget::Params(params)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigateOptions {
    pub replace: bool,
    pub merge_query: bool,
    pub query: ParamsMap,
    pub state: Value,
}

/// How a navigation request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    Committed { url: String },
    Redirected { url: String },
    Aborted,
    Toggled,
    NoTarget,
}

struct CachedMatch {
    epoch: u64,
    state: Option<MatchState>,
}

#[derive(Debug, Clone, PartialEq)]
struct MatchState {
    path: String,
    params: ParamsMap,
}

struct RouteInner {
    template: String,
    ast: PatternAst,
    compiled: OnceLock<Arc<CompiledPattern>>,
    config: RouteConfig,
    context: Arc<RouterContext>,
    parent: Option<Route>,
    children: RwLock<Vec<Weak<RouteInner>>>,
    cache: Mutex<Option<CachedMatch>>,
    last_opened: Mutex<bool>,
    subscription: OnceLock<SubscriptionId>,
}

impl Drop for RouteInner {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.get() {
            self.context.location().unsubscribe(*id);
        }
    }
}

/// A navigable path-bound entity. Cheap to clone; all clones share the
/// same derived state.
#[derive(Clone)]
pub struct Route {
    inner: Arc<RouteInner>,
}

impl Route {
    pub fn new(path: &str) -> RouteResult<Self> {
        Self::with_context(path, RouteConfig::default(), default_context())
    }

    pub fn with_config(path: &str, config: RouteConfig) -> RouteResult<Self> {
        Self::with_context(path, config, default_context())
    }

    pub fn with_context(
        path: &str,
        config: RouteConfig,
        context: Arc<RouterContext>,
    ) -> RouteResult<Self> {
        Self::construct(path.to_string(), config, context, None)
    }

    fn construct(
        template: String,
        config: RouteConfig,
        context: Arc<RouterContext>,
        parent: Option<Route>,
    ) -> RouteResult<Self> {
        config.validate()?;
        let ast = parse_pattern(&template)?;
        let inner = Arc::new(RouteInner {
            template,
            ast,
            compiled: OnceLock::new(),
            config,
            context,
            parent,
            children: RwLock::new(Vec::new()),
            cache: Mutex::new(None),
            last_opened: Mutex::new(false),
            subscription: OnceLock::new(),
        });
        let route = Route { inner };
        if let Some(parent) = &route.inner.parent {
            parent
                .inner
                .children
                .write()
                .push(Arc::downgrade(&route.inner));
        }
        route.install_transition_watcher();
        *route.inner.last_opened.lock() = route.is_opened();
        Ok(route)
    }

    /// Creates a child route whose template is this route's path plus
    /// `suffix`. Configuration is inherited except the `index` flag.
    pub fn extend(&self, suffix: &str) -> RouteResult<Route> {
        let mut config = self.inner.config.clone();
        config.index = false;
        self.extend_with(suffix, config)
    }

    pub fn extend_with(&self, suffix: &str, config: RouteConfig) -> RouteResult<Route> {
        let template = concat_paths(&self.inner.template, suffix);
        Self::construct(
            template,
            config,
            Arc::clone(&self.inner.context),
            Some(self.clone()),
        )
    }

    pub fn path(&self) -> &str {
        &self.inner.template
    }

    pub fn is_index(&self) -> bool {
        self.inner.config.index
    }

    pub fn parent(&self) -> Option<&Route> {
        self.inner.parent.as_ref()
    }

    pub fn context(&self) -> &Arc<RouterContext> {
        &self.inner.context
    }

    /// Live children created through `extend`, in creation order.
    pub fn children(&self) -> Vec<Route> {
        self.inner
            .children
            .read()
            .iter()
            .filter_map(Weak::upgrade)
            .map(|inner| Route { inner })
            .collect()
    }

    /// The compiled matcher/builder, derived on first access and cached
    /// for the lifetime of this instance.
    pub fn compiled_pattern(&self) -> &Arc<CompiledPattern> {
        self.inner
            .compiled
            .get_or_init(|| Arc::new(compile_pattern(&self.inner.ast, &self.inner.template)))
    }

    pub fn is_opened(&self) -> bool {
        self.derived().is_some()
    }

    pub fn params(&self) -> Option<ParamsMap> {
        self.derived().map(|state| state.params)
    }

    pub fn current_path(&self) -> Option<String> {
        self.derived().map(|state| state.path)
    }

    pub fn has_opened_children(&self) -> bool {
        self.children()
            .iter()
            .any(|child| child.is_opened() || child.has_opened_children())
    }

    /// Pure URL construction; equals the path a matching `open` call would
    /// commit for the same inputs.
    pub fn create_url(&self, params: &ParamsMap, query: &ParamsMap) -> RouteResult<String> {
        let path = build_path(self.compiled_pattern(), params)?;
        let base = self.base_url().unwrap_or_default();
        let full = if base.is_empty() {
            path
        } else if path == "/" {
            base.to_string()
        } else {
            format!("{base}{path}")
        };
        Ok(append_query(&full, &serialize_query(query)))
    }

    /// Navigates to this route. Builds the URL (or takes a literal one),
    /// awaits the `before_open` hook, then commits through the shared
    /// location store. Concurrent calls are not coordinated; the last
    /// committed write wins.
    pub async fn open(
        &self,
        target: impl Into<OpenTarget>,
        options: NavigateOptions,
    ) -> RouteResult<OpenOutcome> {
        let target = target.into();
        let query = if options.merge_query {
            let mut merged = self.inner.context.query().data();
            for (key, value) in options.query.clone() {
                merged.insert(key, value);
            }
            merged
        } else {
            options.query.clone()
        };

        let (url, params) = match target {
            OpenTarget::Url(url) => (url, ParamsMap::new()),
            OpenTarget::Params(params) => {
                let url = self.create_url(&params, &query)?;
                (url, params)
            }
        };

        if let Some(hook) = self.inner.config.before_open.clone() {
            let open_context = OpenContext {
                params,
                query,
                state: options.state.clone(),
                url: url.clone(),
            };
            tracing::trace!(url = %url, "before_open");
            match hook(open_context).await {
                HookOutcome::Proceed => {}
                HookOutcome::Abort => {
                    tracing::debug!(url = %url, "navigation aborted");
                    return Ok(OpenOutcome::Aborted);
                }
                HookOutcome::Redirect(redirect) => {
                    tracing::debug!(from = %url, to = %redirect.url, "navigation redirected");
                    self.commit(&redirect.url, redirect.state, redirect.replace);
                    return Ok(OpenOutcome::Redirected { url: redirect.url });
                }
            }
        }

        self.commit(&url, options.state, options.replace);
        Ok(OpenOutcome::Committed { url })
    }

    fn commit(&self, url: &str, state: Value, replace: bool) {
        let location = self.inner.context.location();
        if replace {
            location.replace(url, state);
        } else {
            location.push(url, state);
        }
    }

    fn base_url(&self) -> Option<&str> {
        self.inner
            .config
            .base_url
            .as_deref()
            .or_else(|| self.inner.context.base_url())
    }

    fn match_options(&self) -> MatchOptions {
        self.inner
            .config
            .match_options
            .unwrap_or_else(|| self.inner.context.match_options())
    }

    fn derived(&self) -> Option<MatchState> {
        let epoch = self.inner.context.location().epoch();
        {
            let cache = self.inner.cache.lock();
            if let Some(cached) = cache.as_ref()
                && cached.epoch == epoch
            {
                return cached.state.clone();
            }
        }
        // recompute outside the lock; hooks and transforms may read this
        // route again
        let (epoch, state) = self.compute_state();
        *self.inner.cache.lock() = Some(CachedMatch {
            epoch,
            state: state.clone(),
        });
        state
    }

    fn compute_state(&self) -> (u64, Option<MatchState>) {
        let snapshot = self.inner.context.location().snapshot();
        let state = self.match_snapshot_path(&snapshot.pathname);
        (snapshot.epoch, state)
    }

    fn match_snapshot_path(&self, pathname: &str) -> Option<MatchState> {
        let stripped = strip_base(self.base_url(), pathname)?;
        let result = match_path(self.compiled_pattern(), stripped, self.match_options())?;
        let params = match &self.inner.config.params_transform {
            Some(transform) => transform(result.params)?,
            None => result.params,
        };
        Some(MatchState {
            path: result.path,
            params,
        })
    }

    fn install_transition_watcher(&self) {
        if self.inner.config.after_open.is_none() && self.inner.config.after_close.is_none() {
            return;
        }
        let weak = Arc::downgrade(&self.inner);
        let id = self
            .inner
            .context
            .location()
            .subscribe(Arc::new(move |_snapshot| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let route = Route { inner };
                let opened = route.is_opened();
                {
                    let mut last = route.inner.last_opened.lock();
                    if *last == opened {
                        return;
                    }
                    *last = opened;
                }
                if opened {
                    if let Some(hook) = &route.inner.config.after_open {
                        hook();
                    }
                } else if let Some(hook) = &route.inner.config.after_close {
                    hook();
                }
            }));
        let _ = self.inner.subscription.set(id);
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.inner.template)
            .field("index", &self.inner.config.index)
            .finish()
    }
}

fn concat_paths(base: &str, suffix: &str) -> String {
    let base = base.trim_end_matches('/');
    if suffix.is_empty() {
        return base.to_string();
    }
    if suffix.starts_with('/') || suffix.starts_with('{') {
        format!("{base}{suffix}")
    } else {
        format!("{base}/{suffix}")
    }
}

fn strip_base<'a>(base: Option<&str>, pathname: &'a str) -> Option<&'a str> {
    let Some(base) = base else {
        return Some(pathname);
    };
    if base.is_empty() {
        return Some(pathname);
    }
    let rest = pathname.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
