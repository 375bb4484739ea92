//! Typed view over a split path.
use crate::ATTRIBUTE_MARKER;
use crate::error::PathError;
use crate::predicate::{Predicate, parse_predicate};
use crate::split::split_path;
use std::fmt;
use std::str::FromStr;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A child element or object key, optionally filtered (`name[...]`).
    /// The predicate is kept verbatim so it can be re-emitted as-is.
    Element {
        name: String,
        predicate: Option<String>,
    },
    /// An attribute of the current element (`@_name`), stored without the marker.
    Attribute(String),
    /// A purely numeric array position.
    Index(usize),
}

impl Segment {
    pub fn element(name: &str) -> Self {
        Segment::Element {
            name: name.to_string(),
            predicate: None,
        }
    }

    /// Classifies a raw segment. Never fails: anything that is neither an
    /// attribute nor an index is treated as an element name.
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(ATTRIBUTE_MARKER) {
            return Segment::Attribute(name.to_string());
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = raw.parse() {
                return Segment::Index(index);
            }
        }
        match raw.find('[') {
            Some(open) if raw.ends_with(']') => Segment::Element {
                name: raw[..open].to_string(),
                predicate: Some(raw[open + 1..raw.len() - 1].to_string()),
            },
            _ => Segment::element(raw),
        }
    }

    /// The element or attribute name; `None` for indices.
    pub fn name(&self) -> Option<&str> {
        match self {
            Segment::Element { name, .. } | Segment::Attribute(name) => Some(name),
            Segment::Index(_) => None,
        }
    }

    /// The verbatim predicate body, if any.
    pub fn raw_predicate(&self) -> Option<&str> {
        match self {
            Segment::Element { predicate, .. } => predicate.as_deref(),
            _ => None,
        }
    }

    /// The predicate, if present and well-formed.
    pub fn predicate(&self) -> Option<Predicate> {
        self.raw_predicate().and_then(|p| parse_predicate(p).ok())
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, Segment::Attribute(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Element {
                name,
                predicate: Some(p),
            } => write!(f, "{}[{}]", name, p),
            Segment::Element { name, .. } => f.write_str(name),
            Segment::Attribute(name) => write!(f, "{}{}", ATTRIBUTE_MARKER, name),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// A parsed, validated path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text.trim().is_empty() {
            return Err(PathError::Empty);
        }
        if !brackets_balanced(text) {
            return Err(PathError::UnbalancedBrackets(text.to_string()));
        }
        let segments: Vec<Segment> = split_path(text).into_iter().map(Segment::parse).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

fn brackets_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
