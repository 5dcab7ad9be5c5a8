//! CSS class names for colours, and identifier sanitizing.
//!
//! A [`ClassTable`] binds colour keys to class names for the duration of one
//! export. Once a name is bound to a colour it never changes, and no two
//! colours share a name.

use std::collections::{HashMap, HashSet};

use crate::types::Colour;

/// Fallback used when a layer name sanitizes to nothing.
pub const DEFAULT_LAYER_ID: &str = "layer";

/// Fallback used when a configured colour name sanitizes to nothing.
pub const DEFAULT_CLASS_NAME: &str = "color";

/// Well-known colours with a fixed class name, keyed by colour key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColours {
    names: HashMap<String, String>,
}

impl NamedColours {
    /// An empty table with no recognized colours.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Recognize a colour under a class name (sanitized).
    pub fn insert(&mut self, colour: Colour, name: &str) {
        self.names
            .insert(colour.key(), sanitize_identifier(name, DEFAULT_CLASS_NAME));
    }

    /// Look up the class name for a colour key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

}

impl Default for NamedColours {
    fn default() -> Self {
        let mut named = Self::empty();
        named.insert(Colour::WHITE, "white");
        named.insert(Colour::BLACK, "black");
        named
    }
}

/// A class name bound to a colour key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssClass {
    pub name: String,
    pub colour_key: String,
}

/// Per-export mapping from colour keys to unique class names.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    named: NamedColours,
    classes: Vec<CssClass>,
    by_key: HashMap<String, usize>,
    used: HashSet<String>,
    counter: u32,
}

impl ClassTable {
    pub fn new(named: NamedColours) -> Self {
        Self {
            named,
            ..Self::default()
        }
    }

    /// Get the class name for a colour key, binding a new one if needed.
    ///
    /// Recognized colours use their table name; others get `colorN` from a
    /// counter scoped to this table. A name already bound to a different colour
    /// gets a `-2`, `-3`, ... suffix until unique.
    pub fn class_for(&mut self, colour_key: &str) -> String {
        if let Some(&idx) = self.by_key.get(colour_key) {
            return self.classes[idx].name.clone();
        }

        let base = match self.named.get(colour_key) {
            Some(name) => name.to_string(),
            None => {
                self.counter += 1;
                format!("color{}", self.counter)
            }
        };
        let name = unique_name(&base, &self.used);

        self.used.insert(name.clone());
        self.by_key.insert(colour_key.to_string(), self.classes.len());
        self.classes.push(CssClass {
            name: name.clone(),
            colour_key: colour_key.to_string(),
        });

        name
    }

    /// Bound classes in binding order.
    pub fn classes(&self) -> &[CssClass] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// One `.name{fill:key}` rule per bound class, in binding order.
    pub fn style_rules(&self) -> impl Iterator<Item = String> + '_ {
        self.classes
            .iter()
            .map(|c| format!(".{}{{fill:{}}}", c.name, c.colour_key))
    }
}

/// Hands out unique element ids within one document.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize a layer name and make it unique among ids handed out so far.
    pub fn allocate(&mut self, layer_name: &str) -> String {
        let base = sanitize_identifier(layer_name, DEFAULT_LAYER_ID);
        let id = unique_name(&base, &self.used);
        self.used.insert(id.clone());
        id
    }
}

/// Turn arbitrary text into a class/id-safe identifier.
///
/// Runs of whitespace become a single `_`, characters outside
/// `[A-Za-z0-9_-]` are dropped, and anything not starting with a letter or
/// `_` gets a `_` prefix. Returns `fallback` if no letter or digit is left.
pub fn sanitize_identifier(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;

    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        }
    }

    if !out.chars().any(|c| c.is_ascii_alphanumeric()) {
        return fallback.to_string();
    }
    if !out.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        out.insert(0, '_');
    }
    out
}

fn unique_name(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    // `used` cannot hold all `used.len() + 1` candidates, so one is free.
    (2..=used.len() + 2)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_default()
}
