pub use crate::config::*;
use crate::FootnoteRegistry;

use log::debug;

/// The handle a page uses to cite its sources while it renders.
///
/// The generator writes into a registry owned by the caller. A parent that
/// wants to be told about each new footnote (for example to place the list
/// itself) can inject a callback with [FootnoteGenerator::set_footnote].
///
/// ```
/// use footnotes::builder::FootnoteGenerator;
/// use footnotes::{FootnoteEntry, FootnoteRegistry};
/// # use footnotes::FootnoteError;
///
/// let mut registry = FootnoteRegistry::new();
/// let mut seen: Vec<FootnoteEntry> = Vec::new();
/// {
///     let mut gen = FootnoteGenerator::new(&mut registry)
///         .set_footnote(|e: &FootnoteEntry| seen.push(e.clone()));
///     gen.cite("More on IRV/RCV can be found below", "https://www.fairvote.org/rcv")?;
/// }
/// assert_eq!(registry.len(), 1);
/// assert_eq!(seen.len(), 1);
/// # Ok::<(), FootnoteError>(())
/// ```
pub struct FootnoteGenerator<'a> {
    registry: &'a mut FootnoteRegistry,
    set_footnote: Option<Box<dyn FnMut(&FootnoteEntry) + 'a>>,
}

impl<'a> FootnoteGenerator<'a> {
    pub fn new(registry: &'a mut FootnoteRegistry) -> FootnoteGenerator<'a> {
        FootnoteGenerator {
            registry,
            set_footnote: None,
        }
    }

    /// Sets the callback that receives every footnote accepted by the registry.
    pub fn set_footnote<F>(self, callback: F) -> FootnoteGenerator<'a>
    where
        F: FnMut(&FootnoteEntry) + 'a,
    {
        FootnoteGenerator {
            registry: self.registry,
            set_footnote: Some(Box::new(callback)),
        }
    }

    /// Registers a citation and returns the index to display inline.
    ///
    /// The callback is only called when the registration succeeded.
    pub fn cite(&mut self, description: &str, link: &str) -> Result<CitationIndex, FootnoteError> {
        let index = self.registry.register(description, link)?;
        if let Some(callback) = self.set_footnote.as_mut() {
            if let Some(entry) = self.registry.get(index) {
                debug!("cite: forwarding footnote {} to the parent", index);
                callback(entry);
            }
        }
        Ok(index)
    }

    pub fn registry(&self) -> &FootnoteRegistry {
        &*self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_footnotes;

    #[test]
    fn callback_sees_each_accepted_footnote() {
        let mut registry = FootnoteRegistry::new();
        let mut seen: Vec<u32> = Vec::new();
        {
            let mut gen =
                FootnoteGenerator::new(&mut registry).set_footnote(|e: &FootnoteEntry| seen.push(e.index.0));
            gen.cite("a", "https://example.org/a").unwrap();
            assert!(gen.cite("", "https://example.org/b").is_err());
            gen.cite("c", "https://example.org/c").unwrap();
            assert_eq!(gen.registry().len(), 2);
        }
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(render_footnotes(&registry).count(), 2);
    }

    #[test]
    fn generator_without_callback() {
        let mut registry = FootnoteRegistry::new();
        let mut gen = FootnoteGenerator::new(&mut registry);
        assert_eq!(gen.cite("a", "https://example.org/a"), Ok(CitationIndex(1)));
        assert_eq!(gen.cite("b", "https://example.org/b"), Ok(CitationIndex(2)));
    }
}
