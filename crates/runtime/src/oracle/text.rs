//! [`storage_core::TextOracle`] backed by a translation table.
use storage_content::Translations;
use storage_core::TextOracle;

/// Token naming a translation key: `[LocalizedText Strings\\Objects:Chest]`.
const LOCALIZED_TEXT: &str = "LocalizedText";

/// TextOracle implementation over loaded translations
pub struct TextOracleImpl {
    translations: Translations,
}

impl TextOracleImpl {
    pub fn new(translations: Translations) -> Self {
        Self { translations }
    }

    /// Text for one bracketed token body, or `None` when the token is not
    /// understood and must be kept verbatim.
    fn expand(&self, token: &str) -> Option<String> {
        let mut parts = token.split_whitespace();
        if parts.next()? != LOCALIZED_TEXT {
            return None;
        }
        let key = parts.next()?;
        Some(self.translate_or_key(key))
    }
}

impl Default for TextOracleImpl {
    fn default() -> Self {
        Self::new(Translations::default())
    }
}

impl TextOracle for TextOracleImpl {
    fn parse_tokens(&self, raw: &str) -> String {
        let mut output = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(open) = rest.find('[') {
            output.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find(']') else {
                output.push_str(&rest[open..]);
                return output;
            };
            match self.expand(&after[..close]) {
                Some(text) => output.push_str(&text),
                None => output.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }
        output.push_str(rest);
        output
    }

    fn translate(&self, key: &str) -> Option<String> {
        self.translations.get(key).map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> TextOracleImpl {
        TextOracleImpl::new(Translations::from_iter([
            ("Strings\\BigCraftables:Chest_Name", "Chest"),
            ("storage.fridge.name", "Fridge"),
        ]))
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(oracle().parse_tokens("Stone Chest"), "Stone Chest");
    }

    #[test]
    fn localized_text_tokens_expand() {
        let text = oracle();
        assert_eq!(
            text.parse_tokens("[LocalizedText Strings\\BigCraftables:Chest_Name]"),
            "Chest"
        );
        assert_eq!(
            text.parse_tokens("Big [LocalizedText Strings\\BigCraftables:Chest_Name]!"),
            "Big Chest!"
        );
    }

    #[test]
    fn unknown_tokens_and_keys_degrade_gracefully() {
        let text = oracle();
        assert_eq!(text.parse_tokens("[ItemName (O)388]"), "[ItemName (O)388]");
        assert_eq!(
            text.parse_tokens("[LocalizedText Strings\\Missing:Key]"),
            "Strings\\Missing:Key"
        );
        assert_eq!(text.parse_tokens("unterminated [token"), "unterminated [token");
    }

    #[test]
    fn translate_reads_fixed_keys() {
        let text = oracle();
        assert_eq!(text.translate("storage.fridge.name").as_deref(), Some("Fridge"));
        assert_eq!(text.translate_or_key("storage.default.name"), "storage.default.name");
    }
}
