//! Indexed colour palette.

use crate::error::Result;

use super::Colour;

/// An ordered list of colours addressed by index.
///
/// Used to resolve pixels of indexed images. Index 0 is the transparent
/// index: it always resolves to a transparent colour, whatever the entry
/// stored there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Colour>,
}

impl Palette {
    /// Create a palette from a list of colours.
    pub fn new(entries: Vec<Colour>) -> Self {
        Self { entries }
    }

    /// Parse a palette from hex colour strings (see [`Colour::from_hex`]).
    pub fn from_hex<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let entries = values
            .iter()
            .map(|v| Colour::from_hex(v.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    /// Resolve an index to a colour.
    ///
    /// Returns `None` for indices past the end of the palette.
    pub fn resolve(&self, index: u32) -> Option<Colour> {
        if index == 0 {
            return Some(Colour::TRANSPARENT);
        }
        self.entries.get(index as usize).copied()
    }
}
