use regex::Regex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct PatternAst {
    pub nodes: Vec<PatternNode>,
}

impl PatternAst {
    pub fn new(nodes: Vec<PatternNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternNode {
    Literal(String),
    Parameter(ParameterNode),
    Group(GroupNode),
    Wildcard(WildcardNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    pub name: String,
    pub constraint: Option<ParamConstraint>,
}

impl ParameterNode {
    pub fn new(name: String, constraint: Option<ParamConstraint>) -> Self {
        Self { name, constraint }
    }
}

/// An optional sub-path; the entire bracketed sequence is matched or
/// omitted as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub nodes: Vec<PatternNode>,
}

impl GroupNode {
    pub fn new(nodes: Vec<PatternNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WildcardNode {
    pub name: String,
}

impl WildcardNode {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// A regex constraint on a named parameter, compiled once at parse time
/// in its anchored `^(?:...)$` form.
#[derive(Debug, Clone)]
pub struct ParamConstraint {
    raw: Box<str>,
    compiled: Arc<Regex>,
}

impl ParamConstraint {
    pub fn new(raw: String, compiled: Arc<Regex>) -> Self {
        Self {
            raw: raw.into_boxed_str(),
            compiled,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.compiled.is_match(value)
    }
}

impl PartialEq for ParamConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ParamConstraint {}
