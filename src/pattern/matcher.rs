use memchr::{memchr, memmem};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::compiled::{CompiledPattern, RouteElement, SegmentAtom, SegmentElement};
use crate::params::{ParamValue, ParamsMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    pub strict_trailing_slash: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            strict_trailing_slash: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub path: String,
    pub params: ParamsMap,
}

type CaptureList = SmallVec<[(String, ParamValue); 4]>;

/// Matches a pathname against a compiled pattern. The whole pathname must be
/// consumed; optional groups backtrack as units.
#[tracing::instrument(level = "trace", skip(pattern), fields(template = %pattern.template))]
pub fn match_path(
    pattern: &CompiledPattern,
    pathname: &str,
    options: MatchOptions,
) -> Option<MatchResult> {
    let trimmed = if pathname.len() > 1 && pathname.ends_with('/') {
        if options.strict_trailing_slash {
            return None;
        }
        pathname.trim_end_matches('/')
    } else {
        pathname
    };

    let segments: SmallVec<[&str; 8]> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    let mut captures = CaptureList::new();
    let matched = match_sequence(
        &pattern.elements,
        &segments,
        options.case_sensitive,
        &mut captures,
        &mut |_, remaining| remaining.is_empty(),
    );
    if !matched {
        return None;
    }

    let mut params = ParamsMap::with_capacity(captures.len());
    for (name, value) in captures {
        params.insert(name, value);
    }
    let path = if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    };
    Some(MatchResult { path, params })
}

fn match_sequence(
    elements: &[RouteElement],
    segments: &[&str],
    case_sensitive: bool,
    captures: &mut CaptureList,
    cont: &mut dyn FnMut(&mut CaptureList, &[&str]) -> bool,
) -> bool {
    let Some((first, rest)) = elements.split_first() else {
        return cont(captures, segments);
    };

    match first {
        RouteElement::Segment(segment) => {
            let Some(seg) = segments.first().copied() else {
                return false;
            };
            let mark = captures.len();
            if match_segment(seg, segment, case_sensitive, captures)
                && match_sequence(rest, &segments[1..], case_sensitive, captures, cont)
            {
                return true;
            }
            captures.truncate(mark);
            false
        }
        RouteElement::Group(group) => {
            let mark = captures.len();
            let included = match_sequence(
                &group.elements,
                segments,
                case_sensitive,
                captures,
                &mut |caps, remaining| match_sequence(rest, remaining, case_sensitive, caps, cont),
            );
            if included {
                return true;
            }
            // the group did not fit as a unit; match the rest without it
            captures.truncate(mark);
            match_sequence(rest, segments, case_sensitive, captures, cont)
        }
        RouteElement::Wildcard(wild) => {
            if segments.is_empty() {
                return false;
            }
            let mark = captures.len();
            let values = segments.iter().map(|seg| seg.to_string()).collect();
            captures.push((wild.name.clone(), ParamValue::List(values)));
            if cont(captures, &[]) {
                return true;
            }
            captures.truncate(mark);
            false
        }
    }
}

fn match_segment(
    seg: &str,
    pattern: &SegmentElement,
    case_sensitive: bool,
    captures: &mut CaptureList,
) -> bool {
    let lowered;
    let scan_bytes: &[u8] = if case_sensitive {
        seg.as_bytes()
    } else {
        lowered = seg.to_ascii_lowercase();
        lowered.as_bytes()
    };
    let bytes = seg.as_bytes();
    let mut i = 0usize;
    let mut idx = 0usize;

    while idx < pattern.atoms.len() {
        match &pattern.atoms[idx] {
            SegmentAtom::Literal(lit) => {
                let end = i + lit.len();
                if end > bytes.len() {
                    return false;
                }
                let slice = &bytes[i..end];
                let matches = if case_sensitive {
                    slice == lit.as_bytes()
                } else {
                    slice.eq_ignore_ascii_case(lit.as_bytes())
                };
                if !matches {
                    return false;
                }
                i = end;
            }
            SegmentAtom::Parameter(param) => {
                let mut end = bytes.len();

                if idx + 1 < pattern.atoms.len()
                    && let SegmentAtom::Literal(next_lit) = &pattern.atoms[idx + 1]
                {
                    let needle_owned;
                    let needle: &[u8] = if case_sensitive {
                        next_lit.as_bytes()
                    } else {
                        needle_owned = next_lit.to_ascii_lowercase();
                        needle_owned.as_bytes()
                    };
                    let scan = &scan_bytes[i..];
                    let pos = if needle.len() == 1 {
                        memchr(needle[0], scan)
                    } else {
                        memmem::find(scan, needle)
                    };
                    match pos {
                        Some(rel) => end = i + rel,
                        None => return false,
                    }
                }

                if end <= i {
                    return false;
                }
                let Some(value) = seg.get(i..end) else {
                    return false;
                };
                if let Some(constraint) = &param.constraint
                    && !constraint.is_match(value)
                {
                    return false;
                }
                captures.push((param.name.clone(), ParamValue::Single(value.to_string())));
                i = end;
            }
        }

        idx += 1;
    }

    i == bytes.len()
}
