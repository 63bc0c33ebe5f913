use std::fmt;

/// Shown when the player refers to an item they do not hold.
pub const MISSING_ITEM: &str = "You don't have that item.";

/// What happened to the inventory, rendered as player-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryReport {
    /// An item was added.
    Taken(String),
    /// One copy of an item was removed.
    Dropped(String),
    /// A held item was used.
    Used(String),
    /// The named item is not held.
    Missing,
    /// Everything currently held, in pickup order.
    Carrying(Vec<String>),
    /// Nothing is held.
    Empty,
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Taken(item) => write!(f, "You have taken the {item}."),
            Self::Dropped(item) => write!(f, "You have dropped the {item}."),
            Self::Used(item) => write!(f, "You used the {item}. Something happens..."),
            Self::Missing => f.write_str(MISSING_ITEM),
            Self::Carrying(items) => write!(f, "You are carrying: {}.", items.join(", ")),
            Self::Empty => f.write_str("Your inventory is empty."),
        }
    }
}

/// Items the player holds.
///
/// Duplicates are kept as separate units and order is pickup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Always succeeds.
    pub fn add_item(&mut self, item: impl Into<String>) -> InventoryReport {
        let item = item.into();
        self.items.push(item.clone());
        InventoryReport::Taken(item)
    }

    /// Remove the first copy of an item, keeping the order of the rest.
    pub fn remove_item(&mut self, item: &str) -> InventoryReport {
        match self.items.iter().position(|held| held == item) {
            Some(pos) => InventoryReport::Dropped(self.items.remove(pos)),
            None => InventoryReport::Missing,
        }
    }

    /// Whether at least one copy of the item is held.
    pub fn has_item(&self, item: &str) -> bool {
        self.items.iter().any(|held| held == item)
    }

    /// Use a held item. Items are never consumed.
    pub fn use_item(&self, item: &str) -> InventoryReport {
        if self.has_item(item) {
            InventoryReport::Used(item.to_string())
        } else {
            InventoryReport::Missing
        }
    }

    /// Everything held, ready for display.
    pub fn list_items(&self) -> InventoryReport {
        if self.items.is_empty() {
            InventoryReport::Empty
        } else {
            InventoryReport::Carrying(self.items.clone())
        }
    }

    /// Held items in pickup order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of held units.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_then_has() {
        let mut inv = Inventory::new();
        assert!(!inv.has_item("key"));
        assert_eq!(inv.add_item("key"), InventoryReport::Taken("key".into()));
        assert!(inv.has_item("key"));
    }

    #[test]
    fn remove_clears_single_copy() {
        let mut inv = Inventory::new();
        inv.add_item("key");
        assert_eq!(inv.remove_item("key"), InventoryReport::Dropped("key".into()));
        assert!(!inv.has_item("key"));
        assert_eq!(inv.remove_item("key"), InventoryReport::Missing);
    }

    fn copies(inv: &Inventory, item: &str) -> usize {
        inv.items().iter().filter(|held| *held == item).count()
    }

    #[test]
    fn duplicates_are_removed_one_at_a_time() {
        let mut inv = Inventory::new();
        inv.add_item("key");
        inv.add_item("key");
        inv.remove_item("key");
        assert_eq!(copies(&inv, "key"), 1);
        assert!(inv.has_item("key"));
    }

    #[test]
    fn removal_keeps_order_of_survivors() {
        let mut inv = Inventory::new();
        for item in ["key", "cake", "key", "fan"] {
            inv.add_item(item);
        }
        inv.remove_item("key");
        assert_eq!(inv.items(), ["cake", "key", "fan"]);
    }

    #[test]
    fn use_does_not_consume() {
        let mut inv = Inventory::new();
        inv.add_item("potion");
        assert_eq!(inv.use_item("potion"), InventoryReport::Used("potion".into()));
        assert!(inv.has_item("potion"));
        assert_eq!(inv.use_item("cake"), InventoryReport::Missing);
    }

    #[test]
    fn narration() {
        let mut inv = Inventory::new();
        insta::assert_snapshot!(inv.list_items(), @"Your inventory is empty.");
        insta::assert_snapshot!(inv.add_item("flamingo mallet"), @"You have taken the flamingo mallet.");
        inv.add_item("key");
        insta::assert_snapshot!(inv.list_items(), @"You are carrying: flamingo mallet, key.");
        insta::assert_snapshot!(inv.use_item("key"), @"You used the key. Something happens...");
        insta::assert_snapshot!(inv.remove_item("key"), @"You have dropped the key.");
        insta::assert_snapshot!(inv.remove_item("key"), @"You don't have that item.");
    }

    proptest! {
        #[test]
        fn one_remove_drops_exactly_one_copy(
            items in proptest::collection::vec("(key|cake|fan|watch)", 1..12),
        ) {
            let mut inv = Inventory::new();
            for item in &items {
                inv.add_item(item.clone());
            }
            let target = items[0].clone();
            let before = copies(&inv, &target);
            inv.remove_item(&target);
            prop_assert_eq!(copies(&inv, &target), before - 1);
            prop_assert_eq!(inv.len(), items.len() - 1);
        }
    }
}
