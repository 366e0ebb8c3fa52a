//! Terrain and climate multipliers.
//!
//! Each modifier is resolved through an ordered [`ModifierChain`]: every
//! [`ModifierSource`] is asked in turn and the first hit wins. When no source
//! knows the category the chain returns its documented fallback constant.

use std::fmt;

use tracing::debug;

/// Fallback terrain multiplier for unknown categories.
pub const TERRAIN_FALLBACK: f64 = 0.9;

/// Fallback climate multiplier for unknown categories.
pub const CLIMATE_FALLBACK: f64 = 0.95;

/// Built-in terrain multipliers.
pub const DEFAULT_TERRAIN_MODIFIERS: &[(&str, f64)] = &[
    ("plain", 1.0),
    ("mountain", 0.8),
    ("desert", 0.85),
    ("urban", 0.95),
    ("forest", 0.75),
    ("swamp", 0.8),
    ("mud", 0.7),
];

/// Built-in climate multipliers.
pub const DEFAULT_CLIMATE_MODIFIERS: &[(&str, f64)] = &[
    ("clear", 1.0),
    ("rainy", 0.9),
    ("hot", 0.92),
    ("cold", 0.88),
    ("snowy", 0.75),
    ("sandstorm", 0.5),
];

/// A capability that may know the multiplier for a category name.
pub trait ModifierSource {
    /// Exact-match lookup; `None` when the source has no value for `name`.
    fn lookup(&self, name: &str) -> Option<f64>;
}

/// Fixed in-memory table.
#[derive(Debug, Clone, Copy)]
pub struct StaticTable {
    entries: &'static [(&'static str, f64)],
}

impl StaticTable {
    pub const fn new(entries: &'static [(&'static str, f64)]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [(&'static str, f64)] {
        self.entries
    }
}

impl ModifierSource for StaticTable {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// Ordered list of sources with a final fallback constant.
pub struct ModifierChain<'a> {
    sources: Vec<Box<dyn ModifierSource + 'a>>,
    fallback: f64,
}

impl<'a> ModifierChain<'a> {
    pub fn new(fallback: f64) -> Self {
        Self {
            sources: Vec::new(),
            fallback,
        }
    }

    /// Append a source; sources are consulted in insertion order.
    pub fn then(mut self, source: impl ModifierSource + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Resolve the multiplier for `category`.
    pub fn modifier(&self, category: &str) -> f64 {
        match self.sources.iter().find_map(|source| source.lookup(category)) {
            Some(value) => value,
            None => {
                debug!(category, fallback = self.fallback, "modifier fallback used");
                self.fallback
            }
        }
    }
}

impl fmt::Debug for ModifierChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierChain")
            .field("sources", &self.sources.len())
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Terrain multiplier lookup: optional persisted override, then the built-in
/// table, then [`TERRAIN_FALLBACK`].
#[derive(Debug)]
pub struct TerrainModifier<'a> {
    chain: ModifierChain<'a>,
}

impl Default for TerrainModifier<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TerrainModifier<'a> {
    pub fn new() -> Self {
        Self {
            chain: ModifierChain::new(TERRAIN_FALLBACK)
                .then(StaticTable::new(DEFAULT_TERRAIN_MODIFIERS)),
        }
    }

    /// Consult `overrides` before the built-in table.
    pub fn with_override(overrides: impl ModifierSource + 'a) -> Self {
        Self {
            chain: ModifierChain::new(TERRAIN_FALLBACK)
                .then(overrides)
                .then(StaticTable::new(DEFAULT_TERRAIN_MODIFIERS)),
        }
    }

    pub fn modifier(&self, terrain: &str) -> f64 {
        self.chain.modifier(terrain)
    }
}

/// Climate multiplier lookup: built-in table, then [`CLIMATE_FALLBACK`].
#[derive(Debug)]
pub struct ClimateModifier<'a> {
    chain: ModifierChain<'a>,
}

impl Default for ClimateModifier<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimateModifier<'_> {
    pub fn new() -> Self {
        Self {
            chain: ModifierChain::new(CLIMATE_FALLBACK)
                .then(StaticTable::new(DEFAULT_CLIMATE_MODIFIERS)),
        }
    }

    pub fn modifier(&self, climate: &str) -> f64 {
        self.chain.modifier(climate)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    impl ModifierSource for HashMap<&'static str, f64> {
        fn lookup(&self, name: &str) -> Option<f64> {
            self.get(name).copied()
        }
    }

    #[test]
    fn known_categories_use_default_tables() {
        assert_eq!(TerrainModifier::new().modifier("mountain"), 0.8);
        assert_eq!(TerrainModifier::new().modifier("mud"), 0.7);
        assert_eq!(ClimateModifier::new().modifier("sandstorm"), 0.5);
        assert_eq!(ClimateModifier::new().modifier("clear"), 1.0);
    }

    #[test]
    fn unknown_categories_fall_back() {
        assert_eq!(TerrainModifier::new().modifier("glacier"), 0.9);
        assert_eq!(ClimateModifier::new().modifier("monsoon"), 0.95);
    }

    #[test]
    fn lookup_is_exact_match() {
        assert_eq!(TerrainModifier::new().modifier("Mountain"), TERRAIN_FALLBACK);
    }

    #[test]
    fn override_takes_precedence() {
        let overrides = HashMap::from([("mountain", 0.6), ("glacier", 0.4)]);
        let terrain = TerrainModifier::with_override(overrides);

        assert_eq!(terrain.modifier("mountain"), 0.6);
        assert_eq!(terrain.modifier("glacier"), 0.4);
        assert_eq!(terrain.modifier("plain"), 1.0);
        assert_eq!(terrain.modifier("tundra"), 0.9);
    }

    #[test]
    fn empty_chain_returns_fallback() {
        let chain = ModifierChain::new(0.5);
        assert_eq!(chain.modifier("anything"), 0.5);
    }
}
