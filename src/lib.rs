pub mod group;
pub mod location;
pub mod params;
pub mod pattern;
pub mod query;
pub mod route;
pub mod router;

pub use group::{OpenRequest, RouteEntity, RouteGroup, RouteGroupBuilder};
pub use location::{HistoryEntry, LocationSnapshot, LocationStore, MemoryHistory};
pub use params::{ParamValue, ParamsMap, params_map};
pub use pattern::{BuildError, MatchOptions, MatchResult, PatternError};
pub use query::QueryStore;
pub use route::{
    HookOutcome, NavigateOptions, OpenContext, OpenOutcome, OpenTarget, RedirectTarget, Resolver,
    Route, RouteConfig, RouteConfigBuilder, RouteError, RouteResult, VirtualRoute,
    VirtualRouteBuilder,
};
pub use router::{
    Router, RouterContext, RouterContextBuilder, default_context, reset_default_context,
    set_default_context,
};
