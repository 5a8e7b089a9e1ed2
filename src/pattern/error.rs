use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unexpected '}}' at byte {index} in template '{template}'")]
    UnexpectedClosingBrace { template: String, index: usize },
    #[error("optional group starting at byte {start} in template '{template}' is never closed")]
    UnterminatedGroup { template: String, start: usize },
    #[error("optional group starting at byte {start} in template '{template}' is empty")]
    EmptyGroup { template: String, start: usize },
    #[error("optional group in template '{template}' must start and end on a '/' boundary")]
    GroupNotSegmentAligned { template: String },
    #[error("parameter in template '{template}' is missing a name")]
    ParameterMissingName { template: String },
    #[error(
        "parameter name '{name}' in template '{template}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    ParameterInvalidStart {
        template: String,
        name: String,
        found: char,
    },
    #[error("wildcard in template '{template}' is missing a name")]
    WildcardMissingName { template: String },
    #[error("wildcard '*{name}' in template '{template}' must be the final token")]
    WildcardNotLast { template: String, name: String },
    #[error("template '{template}' declares more than one wildcard")]
    DuplicateWildcard { template: String },
    #[error("escape character at byte {index} in template '{template}' is not followed by anything")]
    LoneEscapeCharacter { template: String, index: usize },
    #[error(
        "constraint for parameter '{name}' starting at byte {start} in template '{template}' is never closed"
    )]
    UnterminatedConstraint {
        template: String,
        name: String,
        start: usize,
    },
    #[error("constraint for parameter '{name}' in template '{template}' is not a valid regex: {error}")]
    RegexConstraintInvalid {
        template: String,
        name: String,
        error: String,
    },
}

pub type PatternResult<T> = Result<T, PatternError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("missing required parameter '{name}' for template '{template}'")]
    MissingParam { template: String, name: String },
    #[error("parameter '{name}' must be a single value, not a list")]
    UnexpectedListValue { name: String },
    #[error("parameter '{name}' must not be empty")]
    EmptyParam { name: String },
    #[error("wildcard parameter '{name}' requires at least one non-empty segment")]
    EmptyWildcard { name: String },
    #[error("parameter '{name}' value '{value}' does not satisfy constraint '{constraint}'")]
    ConstraintMismatch {
        name: String,
        value: String,
        constraint: String,
    },
}

pub type BuildResult<T> = Result<T, BuildError>;
