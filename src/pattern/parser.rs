use regex::Regex;
use std::sync::Arc;

use crate::pattern::ast::{
    GroupNode, ParamConstraint, ParameterNode, PatternAst, PatternNode, WildcardNode,
};
use crate::pattern::{PatternError, PatternResult};

/// Parses a path template into its AST, validating the grammar eagerly so
/// that a malformed template never reaches the matcher.
#[tracing::instrument(level = "trace")]
pub fn parse_pattern(template: &str) -> PatternResult<PatternAst> {
    let mut parser = PatternParser::new(template);
    let nodes = parser.parse_sequence(None, None)?;
    if parser.peek().is_some() {
        // Should never happen due to parser exhausting input, but guard just in case.
        return Err(PatternError::UnexpectedClosingBrace {
            template: template.to_string(),
            index: parser.current_byte_index(),
        });
    }

    let ast = PatternAst::new(nodes);
    validate_ast(&ast, template)?;
    Ok(ast)
}

struct PatternParser<'a> {
    template: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
}

impl<'a> PatternParser<'a> {
    fn new(template: &'a str) -> Self {
        let chars: Vec<(usize, char)> = template.char_indices().collect();
        Self {
            template,
            chars,
            index: 0,
        }
    }

    fn parse_sequence(
        &mut self,
        terminator: Option<char>,
        group_start: Option<usize>,
    ) -> PatternResult<Vec<PatternNode>> {
        let mut nodes = Vec::new();
        while let Some(ch) = self.peek() {
            if Some(ch) == terminator {
                self.next();
                return Ok(nodes);
            }
            match ch {
                '}' => {
                    return Err(PatternError::UnexpectedClosingBrace {
                        template: self.template.to_string(),
                        index: self.current_byte_index(),
                    });
                }
                ':' => {
                    nodes.push(self.parse_parameter()?);
                }
                '{' => {
                    nodes.push(self.parse_group()?);
                }
                '*' => {
                    nodes.push(self.parse_wildcard()?);
                }
                _ => {
                    nodes.push(self.parse_literal()?);
                }
            }
        }

        if terminator.is_some() {
            return Err(PatternError::UnterminatedGroup {
                template: self.template.to_string(),
                start: group_start.unwrap_or(self.template.len()),
            });
        }

        Ok(nodes)
    }

    fn parse_literal(&mut self) -> PatternResult<PatternNode> {
        let mut literal = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                ':' | '{' | '}' | '*' => {
                    break;
                }
                _ => {
                    if self.is_escape_char(ch) {
                        literal.push(self.consume_escape_char()?);
                    } else {
                        literal.push(ch);
                        self.next();
                    }
                }
            }
        }
        Ok(PatternNode::Literal(literal))
    }

    fn parse_group(&mut self) -> PatternResult<PatternNode> {
        let start_index = self.current_byte_index();
        self.expect('{');
        let nodes = self.parse_sequence(Some('}'), Some(start_index))?;
        if nodes.is_empty() {
            return Err(PatternError::EmptyGroup {
                template: self.template.to_string(),
                start: start_index,
            });
        }
        Ok(PatternNode::Group(GroupNode::new(nodes)))
    }

    fn parse_wildcard(&mut self) -> PatternResult<PatternNode> {
        self.expect('*');
        let name = self.parse_name();
        if name.is_empty() {
            return Err(PatternError::WildcardMissingName {
                template: self.template.to_string(),
            });
        }
        self.check_name_start(&name)?;
        Ok(PatternNode::Wildcard(WildcardNode::new(name)))
    }

    fn parse_parameter(&mut self) -> PatternResult<PatternNode> {
        let name_start_byte = self.current_byte_index();
        self.expect(':');
        let name = self.parse_name();
        if name.is_empty() {
            return Err(PatternError::ParameterMissingName {
                template: self.template.to_string(),
            });
        }
        self.check_name_start(&name)?;

        let constraint = if self.peek() == Some('(') {
            let raw = self.parse_inline_constraint(name.clone(), name_start_byte)?;
            Some(self.compile_constraint(&name, raw)?)
        } else {
            None
        };

        Ok(PatternNode::Parameter(ParameterNode::new(name, constraint)))
    }

    fn parse_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        name
    }

    fn check_name_start(&self, name: &str) -> PatternResult<()> {
        let bytes = name.as_bytes();
        if !(bytes[0].is_ascii_alphabetic() || bytes[0] == b'_') {
            return Err(PatternError::ParameterInvalidStart {
                template: self.template.to_string(),
                name: name.to_string(),
                found: bytes[0] as char,
            });
        }
        Ok(())
    }

    fn parse_inline_constraint(
        &mut self,
        name: String,
        start_byte: usize,
    ) -> PatternResult<String> {
        self.expect('(');
        let mut depth = 1usize;
        let mut constraint = String::new();
        while let Some(ch) = self.peek() {
            if self.is_escape_char(ch) {
                let escaped = self.consume_escape_char()?;
                constraint.push('\\');
                constraint.push(escaped);
                continue;
            }
            match ch {
                '(' => {
                    depth += 1;
                    constraint.push(ch);
                    self.next();
                }
                ')' => {
                    depth -= 1;
                    self.next();
                    if depth == 0 {
                        return Ok(constraint);
                    }
                    constraint.push(')');
                }
                _ => {
                    constraint.push(ch);
                    self.next();
                }
            }
        }

        Err(PatternError::UnterminatedConstraint {
            template: self.template.to_string(),
            name,
            start: start_byte,
        })
    }

    fn compile_constraint(&self, name: &str, raw: String) -> PatternResult<ParamConstraint> {
        let source = format!("^(?:{})$", raw);
        match Regex::new(&source) {
            Ok(regex) => Ok(ParamConstraint::new(raw, Arc::new(regex))),
            Err(err) => Err(PatternError::RegexConstraintInvalid {
                template: self.template.to_string(),
                name: name.to_string(),
                error: err.to_string(),
            }),
        }
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or_else(|| self.template.len())
    }

    fn is_escape_char(&self, ch: char) -> bool {
        ch == '\\'
    }

    fn consume_escape_char(&mut self) -> PatternResult<char> {
        let escape_index = self.current_byte_index();
        debug_assert!(self.next().is_some());
        match self.next() {
            Some(ch) => Ok(ch),
            None => Err(PatternError::LoneEscapeCharacter {
                template: self.template.to_string(),
                index: escape_index,
            }),
        }
    }
}

fn validate_ast(ast: &PatternAst, template: &str) -> PatternResult<()> {
    if count_wildcards(&ast.nodes) > 1 {
        return Err(PatternError::DuplicateWildcard {
            template: template.to_string(),
        });
    }
    validate_sequence(&ast.nodes, template)?;
    Ok(())
}

fn count_wildcards(nodes: &[PatternNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            PatternNode::Wildcard(_) => 1,
            PatternNode::Group(group) => count_wildcards(&group.nodes),
            _ => 0,
        })
        .sum()
}

fn validate_sequence(nodes: &[PatternNode], template: &str) -> PatternResult<()> {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index + 1 == nodes.len();
        if let Some(name) = first_wildcard_name(node)
            && !is_last
        {
            return Err(PatternError::WildcardNotLast {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
        if let PatternNode::Group(group) = node {
            if !starts_with_slash(group.nodes.first()) {
                return Err(PatternError::GroupNotSegmentAligned {
                    template: template.to_string(),
                });
            }
            if !is_last && !starts_with_slash(nodes.get(index + 1)) {
                return Err(PatternError::GroupNotSegmentAligned {
                    template: template.to_string(),
                });
            }
            validate_sequence(&group.nodes, template)?;
        }
    }
    Ok(())
}

fn first_wildcard_name(node: &PatternNode) -> Option<&str> {
    match node {
        PatternNode::Wildcard(wild) => Some(wild.name.as_str()),
        PatternNode::Group(group) => group.nodes.iter().find_map(first_wildcard_name),
        _ => None,
    }
}

fn starts_with_slash(node: Option<&PatternNode>) -> bool {
    match node {
        Some(PatternNode::Literal(text)) => text.starts_with('/'),
        Some(PatternNode::Group(group)) => starts_with_slash(group.nodes.first()),
        _ => false,
    }
}
