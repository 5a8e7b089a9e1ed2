use super::ast::{GroupNode, ParamConstraint, ParameterNode, PatternAst, PatternNode};

/// The matchable form of a parsed template: a flat sequence of path
/// segments, optional groups, and a trailing wildcard.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPattern {
    pub template: String,
    pub elements: Vec<RouteElement>,
    pub has_wildcard: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteElement {
    Segment(SegmentElement),
    Group(GroupElement),
    Wildcard(WildcardElement),
}

/// One path segment: a run of literal and parameter atoms between slashes.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentElement {
    pub atoms: Vec<SegmentAtom>,
}

impl SegmentElement {
    fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    fn push_literal(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(SegmentAtom::Literal(existing)) = self.atoms.last_mut() {
            existing.push_str(value);
        } else {
            self.atoms.push(SegmentAtom::Literal(value.to_string()));
        }
    }

    fn push_parameter(&mut self, parameter: ParamAtom) {
        self.atoms.push(SegmentAtom::Parameter(parameter));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentAtom {
    Literal(String),
    Parameter(ParamAtom),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamAtom {
    pub name: String,
    pub constraint: Option<ParamConstraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupElement {
    pub elements: Vec<RouteElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WildcardElement {
    pub name: String,
}

/// Lowers a validated AST into segment elements. Infallible: every failure
/// mode is caught by [`parse_pattern`](super::parse_pattern) beforehand.
pub fn compile_pattern(ast: &PatternAst, template: &str) -> CompiledPattern {
    let mut has_wildcard = false;
    let elements = compile_sequence(&ast.nodes, &mut has_wildcard);
    CompiledPattern {
        template: template.to_string(),
        elements,
        has_wildcard,
    }
}

fn compile_sequence(nodes: &[PatternNode], has_wildcard: &mut bool) -> Vec<RouteElement> {
    let mut elements = Vec::new();
    let mut current_segment = SegmentElement { atoms: Vec::new() };

    for node in nodes {
        match node {
            PatternNode::Literal(value) => {
                let mut first = true;
                for piece in value.split('/') {
                    if !first {
                        flush_segment(&mut current_segment, &mut elements);
                    }
                    current_segment.push_literal(piece);
                    first = false;
                }
            }
            PatternNode::Parameter(param) => {
                current_segment.push_parameter(compile_parameter(param));
            }
            PatternNode::Group(group) => {
                flush_segment(&mut current_segment, &mut elements);
                elements.push(RouteElement::Group(compile_group(group, has_wildcard)));
            }
            PatternNode::Wildcard(wild) => {
                flush_segment(&mut current_segment, &mut elements);
                *has_wildcard = true;
                elements.push(RouteElement::Wildcard(WildcardElement {
                    name: wild.name.clone(),
                }));
            }
        }
    }

    flush_segment(&mut current_segment, &mut elements);

    elements
}

fn flush_segment(segment: &mut SegmentElement, elements: &mut Vec<RouteElement>) {
    if segment.is_empty() {
        return;
    }
    let mut new_segment = SegmentElement {
        atoms: Vec::with_capacity(segment.atoms.len()),
    };
    std::mem::swap(&mut new_segment.atoms, &mut segment.atoms);
    elements.push(RouteElement::Segment(new_segment));
}

fn compile_parameter(param: &ParameterNode) -> ParamAtom {
    ParamAtom {
        name: param.name.clone(),
        constraint: param.constraint.clone(),
    }
}

fn compile_group(group: &GroupNode, has_wildcard: &mut bool) -> GroupElement {
    GroupElement {
        elements: compile_sequence(&group.nodes, has_wildcard),
    }
}
