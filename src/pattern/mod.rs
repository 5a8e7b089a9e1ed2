mod ast;
mod builder;
mod compiled;
mod error;
mod matcher;
mod parser;

pub use ast::{GroupNode, ParamConstraint, ParameterNode, PatternAst, PatternNode, WildcardNode};
pub use builder::build_path;
pub use compiled::{
    CompiledPattern, GroupElement, ParamAtom, RouteElement, SegmentAtom, SegmentElement,
    WildcardElement, compile_pattern,
};
pub use error::{BuildError, BuildResult, PatternError, PatternResult};
pub use matcher::{MatchOptions, MatchResult, match_path};
pub use parser::parse_pattern;
