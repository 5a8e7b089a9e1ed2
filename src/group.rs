use futures::future::BoxFuture;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::params::ParamsMap;
use crate::route::{
    NavigateOptions, OpenOutcome, OpenTarget, Route, RouteResult, VirtualRoute,
};

/// One navigation request, delegated verbatim through group hierarchies.
#[derive(Debug, Clone, Default)]
pub struct OpenRequest {
    pub target: OpenTarget,
    pub options: NavigateOptions,
}

impl OpenRequest {
    pub fn new(target: impl Into<OpenTarget>) -> Self {
        Self {
            target: target.into(),
            options: NavigateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: NavigateOptions) -> Self {
        self.options = options;
        self
    }
}

/// The closed set of route-like entities. Dispatch goes through these
/// methods rather than structural probing.
#[derive(Debug, Clone)]
pub enum RouteEntity {
    Path(Route),
    Virtual(VirtualRoute),
    Group(RouteGroup),
}

impl RouteEntity {
    pub fn is_opened(&self) -> bool {
        match self {
            RouteEntity::Path(route) => route.is_opened(),
            RouteEntity::Virtual(route) => route.is_opened(),
            RouteEntity::Group(group) => group.is_opened(),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, RouteEntity::Path(route) if route.is_index())
    }

    pub fn as_route(&self) -> Option<&Route> {
        match self {
            RouteEntity::Path(route) => Some(route),
            _ => None,
        }
    }

    pub fn as_virtual(&self) -> Option<&VirtualRoute> {
        match self {
            RouteEntity::Virtual(route) => Some(route),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&RouteGroup> {
        match self {
            RouteEntity::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn open(&self, request: OpenRequest) -> BoxFuture<'_, RouteResult<OpenOutcome>> {
        match self {
            RouteEntity::Path(route) => {
                Box::pin(async move { route.open(request.target, request.options).await })
            }
            RouteEntity::Virtual(route) => Box::pin(async move {
                let params = match request.target {
                    OpenTarget::Params(params) => params,
                    OpenTarget::Url(_) => ParamsMap::new(),
                };
                route.open(params, request.options.query).await;
                Ok(OpenOutcome::Toggled)
            }),
            RouteEntity::Group(group) => group.open(request),
        }
    }
}

impl From<Route> for RouteEntity {
    fn from(route: Route) -> Self {
        RouteEntity::Path(route)
    }
}

impl From<VirtualRoute> for RouteEntity {
    fn from(route: VirtualRoute) -> Self {
        RouteEntity::Virtual(route)
    }
}

impl From<RouteGroup> for RouteEntity {
    fn from(group: RouteGroup) -> Self {
        RouteEntity::Group(group)
    }
}

struct GroupInner {
    routes: IndexMap<String, RouteEntity>,
    index_name: Option<String>,
}

/// A named, ordered collection of route-like entities with aggregate
/// state. Membership is fixed at construction.
#[derive(Clone)]
pub struct RouteGroup {
    inner: Arc<GroupInner>,
}

impl RouteGroup {
    pub fn new(routes: IndexMap<String, RouteEntity>) -> Self {
        Self {
            inner: Arc::new(GroupInner {
                routes,
                index_name: None,
            }),
        }
    }

    pub fn with_index(routes: IndexMap<String, RouteEntity>, index_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(GroupInner {
                routes,
                index_name: Some(index_name.into()),
            }),
        }
    }

    pub fn builder() -> RouteGroupBuilder {
        RouteGroupBuilder::default()
    }

    pub fn routes(&self) -> &IndexMap<String, RouteEntity> {
        &self.inner.routes
    }

    pub fn get(&self, name: &str) -> Option<&RouteEntity> {
        self.inner.routes.get(name)
    }

    /// The explicitly named index entity, else the first entity flagged as
    /// an index route.
    pub fn index_route(&self) -> Option<&RouteEntity> {
        if let Some(name) = &self.inner.index_name
            && let Some(entity) = self.inner.routes.get(name)
        {
            return Some(entity);
        }
        self.inner.routes.values().find(|entity| entity.is_index())
    }

    /// True when any contained entity is opened, or a contained path route
    /// has opened children.
    pub fn is_opened(&self) -> bool {
        self.inner.routes.values().any(|entity| {
            entity.is_opened()
                || matches!(entity, RouteEntity::Path(route) if route.has_opened_children())
        })
    }

    /// Delegates navigation: index route first, else the last nested group
    /// in declaration order, else a no-op.
    pub fn open(&self, request: OpenRequest) -> BoxFuture<'_, RouteResult<OpenOutcome>> {
        Box::pin(async move {
            if let Some(entity) = self.index_route() {
                return entity.open(request).await;
            }
            let fallback = self
                .inner
                .routes
                .values()
                .filter_map(RouteEntity::as_group)
                .last();
            if let Some(group) = fallback {
                tracing::trace!("delegating open to last nested group");
                return group.open(request).await;
            }
            #[cfg(debug_assertions)]
            tracing::warn!("route group has no index route and no nested group; open() did nothing");
            Ok(OpenOutcome::NoTarget)
        })
    }
}

impl fmt::Debug for RouteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("routes", &self.inner.routes.keys().collect::<Vec<_>>())
            .field("index_name", &self.inner.index_name)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct RouteGroupBuilder {
    routes: IndexMap<String, RouteEntity>,
    index_name: Option<String>,
}

impl RouteGroupBuilder {
    pub fn route(mut self, name: impl Into<String>, entity: impl Into<RouteEntity>) -> Self {
        self.routes.insert(name.into(), entity.into());
        self
    }

    pub fn index(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    pub fn build(self) -> RouteGroup {
        Self::finish(self.routes, self.index_name)
    }

    fn finish(routes: IndexMap<String, RouteEntity>, index_name: Option<String>) -> RouteGroup {
        RouteGroup {
            inner: Arc::new(GroupInner { routes, index_name }),
        }
    }
}
