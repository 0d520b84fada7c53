// ********* Data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The number shown in a citation marker.
///
/// Indices start at 1 and follow the order of registration within one page render.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CitationIndex(pub u32);

impl CitationIndex {
    pub const FIRST: CitationIndex = CitationIndex(1);

    pub fn next(self) -> CitationIndex {
        CitationIndex(self.0 + 1)
    }
}

impl Display for CitationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered footnote. Entries are never modified after registration.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct FootnoteEntry {
    pub index: CitationIndex,
    pub description: String,
    pub link: String,
}

// ******** Errors *********

/// The part of a footnote request that was rejected.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FootnoteField {
    Description,
    Link,
}

impl Display for FootnoteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FootnoteField::Description => write!(f, "description"),
            FootnoteField::Link => write!(f, "link"),
        }
    }
}

/// Errors that prevent a footnote from being registered.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum FootnoteError {
    /// The field was missing or only contained whitespace.
    InvalidArgument { field: FootnoteField },
}

impl Error for FootnoteError {}

impl Display for FootnoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FootnoteError::InvalidArgument { field } => {
                write!(f, "invalid footnote: the {} may not be empty", field)
            }
        }
    }
}
