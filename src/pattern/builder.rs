use super::compiled::{CompiledPattern, GroupElement, RouteElement, SegmentAtom, SegmentElement, WildcardElement};
use super::error::{BuildError, BuildResult};
use crate::params::{ParamValue, ParamsMap};

/// Substitutes params into a compiled pattern, producing the literal path.
///
/// Optional groups are emitted only when at least one of their params is
/// supplied; a missing required param is an error rather than a malformed
/// URL, so the built path always re-matches its own pattern.
pub fn build_path(pattern: &CompiledPattern, params: &ParamsMap) -> BuildResult<String> {
    let mut out = String::new();
    build_elements(&pattern.elements, params, &pattern.template, &mut out)?;
    if out.is_empty() {
        out.push('/');
    }
    Ok(out)
}

fn build_elements(
    elements: &[RouteElement],
    params: &ParamsMap,
    template: &str,
    out: &mut String,
) -> BuildResult<()> {
    for element in elements {
        match element {
            RouteElement::Segment(segment) => {
                build_segment(segment, params, template, out)?;
            }
            RouteElement::Group(group) => {
                if group_is_active(group, params) {
                    build_elements(&group.elements, params, template, out)?;
                }
            }
            RouteElement::Wildcard(wild) => {
                build_wildcard(wild, params, template, out)?;
            }
        }
    }
    Ok(())
}

fn group_is_active(group: &GroupElement, params: &ParamsMap) -> bool {
    let mut names = Vec::new();
    collect_param_names(&group.elements, &mut names);
    names.is_empty() || names.iter().any(|name| params.contains_key(name.as_str()))
}

fn collect_param_names(elements: &[RouteElement], names: &mut Vec<String>) {
    for element in elements {
        match element {
            RouteElement::Segment(segment) => {
                for atom in &segment.atoms {
                    if let SegmentAtom::Parameter(param) = atom {
                        names.push(param.name.clone());
                    }
                }
            }
            RouteElement::Group(group) => {
                collect_param_names(&group.elements, names);
            }
            RouteElement::Wildcard(wild) => {
                names.push(wild.name.clone());
            }
        }
    }
}

fn build_segment(
    segment: &SegmentElement,
    params: &ParamsMap,
    template: &str,
    out: &mut String,
) -> BuildResult<()> {
    out.push('/');
    for atom in &segment.atoms {
        match atom {
            SegmentAtom::Literal(lit) => {
                out.push_str(lit);
            }
            SegmentAtom::Parameter(param) => {
                let value = params.get(&param.name).ok_or_else(|| BuildError::MissingParam {
                    template: template.to_string(),
                    name: param.name.clone(),
                })?;
                let single = match value {
                    ParamValue::Single(single) => single,
                    ParamValue::List(_) => {
                        return Err(BuildError::UnexpectedListValue {
                            name: param.name.clone(),
                        });
                    }
                };
                if single.is_empty() {
                    return Err(BuildError::EmptyParam {
                        name: param.name.clone(),
                    });
                }
                if let Some(constraint) = &param.constraint
                    && !constraint.is_match(single)
                {
                    return Err(BuildError::ConstraintMismatch {
                        name: param.name.clone(),
                        value: single.clone(),
                        constraint: constraint.raw().to_string(),
                    });
                }
                out.push_str(single);
            }
        }
    }
    Ok(())
}

fn build_wildcard(
    wild: &WildcardElement,
    params: &ParamsMap,
    template: &str,
    out: &mut String,
) -> BuildResult<()> {
    let value = params.get(&wild.name).ok_or_else(|| BuildError::MissingParam {
        template: template.to_string(),
        name: wild.name.clone(),
    })?;
    match value {
        ParamValue::Single(single) => {
            if single.is_empty() {
                return Err(BuildError::EmptyWildcard {
                    name: wild.name.clone(),
                });
            }
            out.push('/');
            out.push_str(single);
        }
        ParamValue::List(values) => {
            if values.is_empty() {
                return Err(BuildError::EmptyWildcard {
                    name: wild.name.clone(),
                });
            }
            for segment in values {
                if segment.is_empty() {
                    return Err(BuildError::EmptyWildcard {
                        name: wild.name.clone(),
                    });
                }
                out.push('/');
                out.push_str(segment);
            }
        }
    }
    Ok(())
}
