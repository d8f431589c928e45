//! Search-term matching against item stacks.
//!
//! A filter is a whitespace separated list of terms, all of which must hold:
//! - `wood` matches items whose name contains "wood" (case-insensitive)
//! - `#wood_item` matches items carrying that context tag
//! - `!term` inverts any term
use storage_core::ItemStack;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Term {
    Name(String),
    Tag(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Clause {
    negated: bool,
    term: Term,
}

impl Clause {
    fn matches(&self, item: &ItemStack) -> bool {
        let hit = match &self.term {
            Term::Name(needle) => item.name.to_lowercase().contains(needle),
            Term::Tag(tag) => item.has_context_tag(tag),
        };
        hit != self.negated
    }
}

/// Parsed search filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemMatcher {
    clauses: Vec<Clause>,
}

impl ItemMatcher {
    pub fn parse(filter: &str, tag_symbol: char) -> Self {
        let clauses = filter
            .split_whitespace()
            .filter_map(|raw| {
                let (negated, body) = match raw.strip_prefix('!') {
                    Some(body) => (true, body),
                    None => (false, raw),
                };
                let term = match body.strip_prefix(tag_symbol) {
                    Some(tag) if !tag.is_empty() => Term::Tag(tag.to_owned()),
                    Some(_) => return None,
                    None if body.is_empty() => return None,
                    None => Term::Name(body.to_lowercase()),
                };
                Some(Clause { negated, term })
            })
            .collect();
        Self { clauses }
    }

    /// A matcher without terms; it matches nothing.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, item: &ItemStack) -> bool {
        !self.is_empty() && self.clauses.iter().all(|clause| clause.matches(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wood() -> ItemStack {
        ItemStack::new("(O)388", "Wood", 10).with_tags(["wood_item", "category_basic"])
    }

    fn hardwood() -> ItemStack {
        ItemStack::new("(O)709", "Hardwood", 10).with_tags(["wood_item"])
    }

    #[test]
    fn name_terms_are_case_insensitive_substrings() {
        let matcher = ItemMatcher::parse("WOOD", '#');
        assert!(matcher.matches(&wood()));
        assert!(matcher.matches(&hardwood()));
        assert!(!matcher.matches(&ItemStack::new("(O)390", "Stone", 1)));
    }

    #[test]
    fn tag_and_negated_terms_combine() {
        let matcher = ItemMatcher::parse("#wood_item !hard", '#');
        assert!(matcher.matches(&wood()));
        assert!(!matcher.matches(&hardwood()));
    }

    #[test]
    fn custom_tag_symbol() {
        let matcher = ItemMatcher::parse("@category_basic", '@');
        assert!(matcher.matches(&wood()));
        assert!(!matcher.matches(&hardwood()));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let matcher = ItemMatcher::parse("   # !", '#');
        assert!(matcher.is_empty());
        assert!(!matcher.matches(&wood()));
    }
}
