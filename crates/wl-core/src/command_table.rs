use std::collections::BTreeMap;

use crate::error::{WlError, WlResult};

/// Text handed back for input that matches no alias.
pub const INVALID_COMMAND: &str = "Invalid command. Try again.";

/// Maps the short aliases a player types to canonical action strings.
///
/// `"n"` might map to `"go north"`. Lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    actions: BTreeMap<String, String>,
}

impl CommandTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an alias. Returns the action it previously mapped to.
    pub fn insert(&mut self, alias: impl Into<String>, action: impl Into<String>) -> Option<String> {
        self.actions.insert(alias.into(), action.into())
    }

    /// Insert an alias, failing if it is already defined.
    pub fn insert_unique(
        &mut self,
        alias: impl Into<String>,
        action: impl Into<String>,
    ) -> WlResult<()> {
        let alias = alias.into();
        if self.actions.contains_key(&alias) {
            return Err(WlError::DuplicateAlias(alias));
        }
        self.actions.insert(alias, action.into());
        Ok(())
    }

    /// Resolve an alias to its canonical action, or [`INVALID_COMMAND`].
    pub fn resolve(&self, alias: &str) -> &str {
        self.actions
            .get(alias)
            .map(String::as_str)
            .unwrap_or(INVALID_COMMAND)
    }

    /// Whether the alias is defined.
    pub fn is_known(&self, alias: &str) -> bool {
        self.actions.contains_key(alias)
    }

    /// Iterate over `(alias, action)` pairs in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.actions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<A: Into<String>, B: Into<String>> FromIterator<(A, B)> for CommandTable {
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (alias, action) in iter {
            table.insert(alias, action);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> CommandTable {
        [
            ("n", "go north"),
            ("take mallet", "take flamingo mallet"),
            ("i", "view inventory"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolves_known_alias() {
        let t = table();
        assert_eq!(t.resolve("n"), "go north");
        assert_eq!(t.resolve("i"), "view inventory");
        assert!(t.is_known("take mallet"));
    }

    #[test]
    fn unknown_alias_is_invalid_command() {
        let t = table();
        assert_eq!(t.resolve("north"), INVALID_COMMAND);
        assert_eq!(t.resolve("N"), INVALID_COMMAND);
        assert_eq!(t.resolve(""), INVALID_COMMAND);
        assert!(!t.is_known("north"));
    }

    #[test]
    fn empty_table_rejects_everything() {
        let t = CommandTable::new();
        assert!(t.is_empty());
        assert_eq!(t.resolve("n"), INVALID_COMMAND);
    }

    #[test]
    fn insert_replaces() {
        let mut t = table();
        assert_eq!(t.insert("n", "go up"), Some("go north".to_string()));
        assert_eq!(t.resolve("n"), "go up");
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn insert_unique_rejects_duplicate() {
        let mut t = table();
        let err = t.insert_unique("n", "go up").unwrap_err();
        assert!(matches!(err, WlError::DuplicateAlias(ref a) if a == "n"));
        assert_eq!(t.resolve("n"), "go north");
    }

    #[test]
    fn iterates_in_alias_order() {
        let table = table();
        let aliases: Vec<_> = table.iter().map(|(a, _)| a).collect();
        assert_eq!(aliases, vec!["i", "n", "take mallet"]);
    }

    proptest! {
        #[test]
        fn every_loaded_alias_resolves_to_its_action(
            entries in proptest::collection::btree_map("[a-z ]{1,12}", "[a-z ]{1,20}", 0..16),
            probe in "[A-Z0-9]{1,8}",
        ) {
            let t: CommandTable = entries.clone().into_iter().collect();
            for (alias, action) in &entries {
                prop_assert_eq!(t.resolve(alias), action.as_str());
            }
            // probes never collide with lowercase aliases
            prop_assert_eq!(t.resolve(&probe), INVALID_COMMAND);
        }
    }
}
