//! Model types shared across storage backends

use serde::{Deserialize, Serialize};

/// A deck of flashcards.
///
/// Decks form an arbitrarily deep category hierarchy; the hierarchy itself
/// is materialized as [`ClosureEdge`] rows rather than a parent pointer on
/// the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Storage-assigned identifier
    pub id: i64,
    /// Display name; must be non-empty
    pub name: String,
}

/// One row of the materialized transitive closure over the deck hierarchy.
///
/// Every deck carries the self-edge `(id, id, 0)` from the moment it is
/// created. A direct parent/child link appears at depth 1, a grandparent
/// link at depth 2, and so on: whenever `(a, b, n)` and `(b, c, m)` exist,
/// so does `(a, c, n + m)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureEdge {
    pub ancestor: i64,
    pub descendant: i64,
    pub depth: i64,
}

impl ClosureEdge {
    /// The edge every deck holds to itself
    pub fn self_edge(deck_id: i64) -> Self {
        Self {
            ancestor: deck_id,
            descendant: deck_id,
            depth: 0,
        }
    }

    /// Direct parent/child edges sit at depth 1
    pub fn is_direct_child(&self) -> bool {
        self.depth == 1
    }
}

/// A single application setting.
///
/// Settings are replaced as whole rows on write; there is no partial
/// update of a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Setting key; must be non-empty
    pub setting: String,
    /// Setting value; NULL is a legal stored value
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_edge() {
        let edge = ClosureEdge::self_edge(7);
        assert_eq!(edge.ancestor, 7);
        assert_eq!(edge.descendant, 7);
        assert_eq!(edge.depth, 0);
        assert!(!edge.is_direct_child());
    }

    #[test]
    fn test_deck_serde_round_trip() {
        let deck = Deck {
            id: 1,
            name: "Animals".to_string(),
        };

        let json = serde_json::to_string(&deck).unwrap();
        let back: Deck = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deck);
    }

    #[test]
    fn test_config_entry_null_value() {
        let entry: ConfigEntry =
            serde_json::from_str(r#"{"setting": "theme", "value": null}"#).unwrap();
        assert_eq!(entry.setting, "theme");
        assert!(entry.value.is_none());
    }
}
