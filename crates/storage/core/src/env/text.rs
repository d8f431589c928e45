/// Localization surface.
pub trait TextOracle {
    /// Resolves tokens in a raw data template (e.g. `[LocalizedText Strings\\Objects:Chest]`)
    /// into display text. Text without tokens is returned as-is.
    fn parse_tokens(&self, raw: &str) -> String;

    /// Looks up one of the fixed translation keys owned by this crate.
    fn translate(&self, key: &str) -> Option<String>;

    /// Like [`TextOracle::translate`] but falls back to the key itself, the
    /// usual rendering of a missing translation.
    fn translate_or_key(&self, key: &str) -> String {
        self.translate(key).unwrap_or_else(|| key.to_owned())
    }
}

/// Fixed translation keys.
pub mod keys {
    pub const DEFAULT_STORAGE_NAME: &str = "storage.default.name";
    pub const DEFAULT_STORAGE_DESCRIPTION: &str = "storage.default.description";
    pub const FRIDGE_NAME: &str = "storage.fridge.name";
    pub const FRIDGE_DESCRIPTION: &str = "storage.fridge.description";
    pub const FARMER_DESCRIPTION: &str = "storage.farmer.description";
}
