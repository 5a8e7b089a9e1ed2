use thiserror::Error;

use crate::pattern::{BuildError, PatternError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("base url '{base_url}' must start with '/' and must not end with '/'")]
    InvalidBaseUrl { base_url: String },
}

pub type RouteResult<T> = Result<T, RouteError>;
