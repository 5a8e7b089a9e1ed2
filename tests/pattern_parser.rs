use waypoint_router::pattern::{PatternError, PatternNode, parse_pattern};

#[test]
fn parses_literal_and_parameter() {
    let ast = parse_pattern("/users/:id").expect("template should parse");
    assert_eq!(ast.nodes.len(), 2);
    match &ast.nodes[0] {
        PatternNode::Literal(text) => assert_eq!(text, "/users/"),
        other => panic!("expected literal node, got {other:?}"),
    }
    match &ast.nodes[1] {
        PatternNode::Parameter(param) => {
            assert_eq!(param.name, "id");
            assert!(param.constraint.is_none());
        }
        other => panic!("expected parameter node, got {other:?}"),
    }
}

#[test]
fn parses_optional_group() {
    let ast = parse_pattern("/users{/:id}/delete").expect("template should parse");
    assert_eq!(ast.nodes.len(), 3);
    match &ast.nodes[1] {
        PatternNode::Group(group) => {
            assert_eq!(group.nodes.len(), 2);
            match &group.nodes[1] {
                PatternNode::Parameter(param) => assert_eq!(param.name, "id"),
                other => panic!("expected parameter node inside group, got {other:?}"),
            }
        }
        other => panic!("expected group node, got {other:?}"),
    }
}

#[test]
fn parses_named_wildcard() {
    let ast = parse_pattern("/files/*rest").expect("template should parse");
    match &ast.nodes[1] {
        PatternNode::Wildcard(wild) => assert_eq!(wild.name, "rest"),
        other => panic!("expected wildcard node, got {other:?}"),
    }
}

#[test]
fn parses_regex_constraint() {
    let ast = parse_pattern("/users/:id(\\d+)").expect("template should parse with constraint");
    match &ast.nodes[1] {
        PatternNode::Parameter(param) => {
            let constraint = param.constraint.as_ref().expect("constraint should be kept");
            assert_eq!(constraint.raw(), "\\d+");
            assert!(constraint.is_match("42"));
            assert!(!constraint.is_match("abc"));
        }
        other => panic!("expected parameter node, got {other:?}"),
    }
}

#[test]
fn validates_constraint_regex_syntax() {
    let err = parse_pattern("/users/:id([)").expect_err("invalid regex should fail");
    match err {
        PatternError::RegexConstraintInvalid { name, .. } => assert_eq!(name, "id"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn respects_escape_characters() {
    let ast = parse_pattern("/files/\\:id").expect("template should parse with escaped colon");
    assert_eq!(ast.nodes.len(), 1);
    match &ast.nodes[0] {
        PatternNode::Literal(text) => assert_eq!(text, "/files/:id"),
        other => panic!("expected literal node, got {other:?}"),
    }
}

#[test]
fn reports_unterminated_group() {
    let err = parse_pattern("/users{/:id").expect_err("unterminated group should fail");
    match err {
        PatternError::UnterminatedGroup { start, .. } => assert_eq!(start, 6),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_unexpected_closing_brace() {
    let err = parse_pattern("/users}/x").expect_err("stray closing brace should fail");
    match err {
        PatternError::UnexpectedClosingBrace { index, .. } => assert_eq!(index, 6),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_empty_group() {
    let err = parse_pattern("/users{}").expect_err("empty group should fail");
    match err {
        PatternError::EmptyGroup { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_parameter_missing_name() {
    let err = parse_pattern("/users/:").expect_err("nameless parameter should fail");
    match err {
        PatternError::ParameterMissingName { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_parameter_invalid_start() {
    let err = parse_pattern("/users/:1id").expect_err("digit-leading name should fail");
    match err {
        PatternError::ParameterInvalidStart { found, .. } => assert_eq!(found, '1'),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_wildcard_missing_name() {
    let err = parse_pattern("/files/*").expect_err("nameless wildcard should fail");
    match err {
        PatternError::WildcardMissingName { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_wildcard_not_last() {
    let err = parse_pattern("/files/*rest/more").expect_err("trailing tokens should fail");
    match err {
        PatternError::WildcardNotLast { name, .. } => assert_eq!(name, "rest"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_duplicate_wildcard() {
    let err = parse_pattern("/a/*x{/*y}").expect_err("two wildcards should fail");
    match err {
        PatternError::DuplicateWildcard { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_group_not_on_segment_boundary() {
    let err = parse_pattern("/file{-:version}").expect_err("mid-segment group should fail");
    match err {
        PatternError::GroupNotSegmentAligned { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_lone_escape_character() {
    let err = parse_pattern("/files/\\").expect_err("trailing escape should fail");
    match err {
        PatternError::LoneEscapeCharacter { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_unterminated_constraint() {
    let err = parse_pattern("/users/:id(\\d+").expect_err("open constraint should fail");
    match err {
        PatternError::UnterminatedConstraint { name, .. } => assert_eq!(name, "id"),
        other => panic!("unexpected error: {other:?}"),
    }
}
