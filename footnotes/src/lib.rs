/*!

Footnote bookkeeping for statically rendered pages.

A page registers its citations while it is being rendered. Each
registration returns the number to show in the inline marker, and the
collected list is rendered afterwards, usually at the bottom of the page.

```
use footnotes::{render_footnotes, FootnoteRegistry};
# use footnotes::FootnoteError;

let mut registry = FootnoteRegistry::new();
let idx = registry.register(
    "Copeland's method info",
    "https://en.wikipedia.org/wiki/Copeland%27s_method",
)?;
assert_eq!(idx.0, 1);

for entry in render_footnotes(&registry) {
    println!("[{}] {} {}", entry.index, entry.description, entry.link);
}
# Ok::<(), FootnoteError>(())
```

A registry belongs to a single page render. Start a new render with a new
registry (or [FootnoteRegistry::reset]) so that the numbering starts again at 1.
*/

mod config;
pub mod builder;

use log::debug;

pub use crate::config::*;

/// The footnotes registered during one page render, in registration order.
///
/// Invariant: the entry at position `i` has the index `i + 1`.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FootnoteRegistry {
    entries: Vec<FootnoteEntry>,
}

impl FootnoteRegistry {
    pub fn new() -> FootnoteRegistry {
        FootnoteRegistry {
            entries: Vec::new(),
        }
    }

    /// Registers a footnote and returns its citation index.
    ///
    /// Both the description and the link must contain some non-whitespace text.
    /// The link is stored as given and is not checked any further.
    /// A rejected footnote leaves the registry unchanged.
    pub fn register(&mut self, description: &str, link: &str) -> Result<CitationIndex, FootnoteError> {
        check_field(description, FootnoteField::Description)?;
        check_field(link, FootnoteField::Link)?;

        let index = self.next_index();
        debug!("register: footnote {} -> {:?}", index, link);
        self.entries.push(FootnoteEntry {
            index,
            description: description.to_string(),
            link: link.to_string(),
        });
        Ok(index)
    }

    /// The index that the next registration will receive.
    pub fn next_index(&self) -> CitationIndex {
        self.entries
            .last()
            .map(|e| e.index.next())
            .unwrap_or(CitationIndex::FIRST)
    }

    pub fn get(&self, index: CitationIndex) -> Option<&FootnoteEntry> {
        let pos = (index.0 as usize).checked_sub(1)?;
        self.entries.get(pos)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets all the footnotes, for a new render from scratch.
    pub fn reset(&mut self) {
        debug!("reset: dropping {} footnotes", self.entries.len());
        self.entries.clear();
    }
}

fn check_field(value: &str, field: FootnoteField) -> Result<(), FootnoteError> {
    if value.trim().is_empty() {
        debug!("register: rejecting footnote with empty {}", field);
        return Err(FootnoteError::InvalidArgument { field });
    }
    Ok(())
}

/// The footnotes of a registry, ready to be displayed.
///
/// The iterator is cheap to clone: a clone restarts from the position it was
/// cloned at and yields the same entries.
#[derive(Debug, Clone)]
pub struct RenderedFootnotes<'a> {
    inner: std::slice::Iter<'a, FootnoteEntry>,
}

impl<'a> Iterator for RenderedFootnotes<'a> {
    type Item = &'a FootnoteEntry;

    fn next(&mut self) -> Option<&'a FootnoteEntry> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for RenderedFootnotes<'a> {}

/// Lists the footnotes of the registry in registration order.
pub fn render_footnotes(registry: &FootnoteRegistry) -> RenderedFootnotes<'_> {
    RenderedFootnotes {
        inner: registry.entries.iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COPELAND: &str = "https://en.wikipedia.org/wiki/Copeland%27s_method";
    const KEMENY: &str = "https://en.wikipedia.org/wiki/Kemeny%E2%80%93Young_method";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn indices_follow_registration_order() {
        init();
        let mut registry = FootnoteRegistry::new();
        let indices: Vec<u32> = (0..7)
            .map(|i| {
                registry
                    .register(&format!("note {}", i), "https://example.org")
                    .unwrap()
                    .0
            })
            .collect();
        assert_eq!(indices, (1..=7).collect::<Vec<u32>>());
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.next_index(), CitationIndex(8));
    }

    #[test]
    fn copeland_then_kemeny() {
        init();
        let mut registry = FootnoteRegistry::new();
        registry.register("Copeland's method info", COPELAND).unwrap();
        registry.register("Kemeny-Young info", KEMENY).unwrap();

        let listed: Vec<FootnoteEntry> = render_footnotes(&registry).cloned().collect();
        assert_eq!(
            listed,
            vec![
                FootnoteEntry {
                    index: CitationIndex(1),
                    description: "Copeland's method info".to_string(),
                    link: COPELAND.to_string(),
                },
                FootnoteEntry {
                    index: CitationIndex(2),
                    description: "Kemeny-Young info".to_string(),
                    link: KEMENY.to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_registry_renders_nothing() {
        let registry = FootnoteRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(render_footnotes(&registry).count(), 0);
        assert_eq!(registry.next_index(), CitationIndex::FIRST);
    }

    #[test]
    fn empty_description_is_rejected() {
        init();
        let mut registry = FootnoteRegistry::new();
        registry.register("Copeland's method info", COPELAND).unwrap();

        let res = registry.register("", COPELAND);
        assert_eq!(
            res,
            Err(FootnoteError::InvalidArgument {
                field: FootnoteField::Description
            })
        );
        assert_eq!(registry.len(), 1);

        // The failed call does not consume an index.
        assert_eq!(registry.register("Kemeny-Young info", KEMENY), Ok(CitationIndex(2)));
    }

    #[test]
    fn blank_link_is_rejected() {
        let mut registry = FootnoteRegistry::new();
        let res = registry.register("Kemeny-Young info", "   ");
        assert_eq!(
            res,
            Err(FootnoteError::InvalidArgument {
                field: FootnoteField::Link
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn same_link_twice_gets_two_indices() {
        let mut registry = FootnoteRegistry::new();
        let a = registry.register("More on IRV/RCV", "https://www.fairvote.org/rcv").unwrap();
        let b = registry.register("Burlington 2009", "https://www.fairvote.org/rcv").unwrap();
        assert_eq!((a, b), (CitationIndex(1), CitationIndex(2)));
    }

    #[test]
    fn rendering_can_be_restarted() {
        let mut registry = FootnoteRegistry::new();
        registry.register("Copeland's method info", COPELAND).unwrap();
        registry.register("Kemeny-Young info", KEMENY).unwrap();

        let rendered = render_footnotes(&registry);
        assert_eq!(rendered.len(), 2);
        let first: Vec<&FootnoteEntry> = rendered.clone().collect();
        let second: Vec<&FootnoteEntry> = rendered.collect();
        assert_eq!(first, second);
        assert_eq!(first, render_footnotes(&registry).collect::<Vec<_>>());
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut registry = FootnoteRegistry::new();
        registry.register("Copeland's method info", COPELAND).unwrap();
        registry.reset();
        assert!(registry.is_empty());
        assert_eq!(registry.register("Kemeny-Young info", KEMENY), Ok(CitationIndex(1)));
    }

    #[test]
    fn lookup_by_index() {
        let mut registry = FootnoteRegistry::new();
        registry.register("Copeland's method info", COPELAND).unwrap();
        assert_eq!(
            registry.get(CitationIndex(1)).map(|e| e.link.as_str()),
            Some(COPELAND)
        );
        assert_eq!(registry.get(CitationIndex(0)), None);
        assert_eq!(registry.get(CitationIndex(2)), None);
    }
}
