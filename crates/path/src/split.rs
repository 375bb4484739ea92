use crate::ATTRIBUTE_MARKER;
use crate::predicate::parse_predicate;

/// Splits a path on `.` while keeping bracketed predicates intact.
///
/// Empty segments (leading, trailing or doubled dots) are dropped.
pub fn split_path(path: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in path.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                if i > start {
                    parts.push(&path[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < path.len() {
        parts.push(&path[start..]);
    }
    parts
}

/// Returns the element name of a raw segment, dropping any `[...]` suffix.
pub fn strip_predicate(segment: &str) -> &str {
    match segment.find('[') {
        Some(open) => &segment[..open],
        None => segment,
    }
}

/// Appends `[predicate]` to the last segment of `path`. When the last
/// segment is an attribute the predicate goes on its owning element instead.
///
/// A blank predicate, one that does not match `@name='value'`, or a target
/// segment that already carries a predicate leaves the path unchanged.
pub fn splice_predicate(path: &str, predicate: &str) -> String {
    if predicate.trim().is_empty() {
        return path.to_string();
    }
    let parsed = match parse_predicate(predicate) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Ignoring predicate for '{}': {}", path, e);
            return path.to_string();
        }
    };

    let segments = split_path(path);
    let target = match segments.last() {
        Some(last) if last.starts_with(ATTRIBUTE_MARKER) => segments.len().checked_sub(2),
        Some(_) => Some(segments.len() - 1),
        None => None,
    };
    let Some(target) = target else {
        return path.to_string();
    };
    if segments[target].contains('[') {
        log::warn!(
            "Segment '{}' already has a predicate; ignoring '{}'",
            segments[target],
            parsed
        );
        return path.to_string();
    }

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i == target {
                format!("{}[{}]", segment, parsed)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}
