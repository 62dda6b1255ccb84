//! Fixed statement catalog
//!
//! Every statement the backend issues is declared here: a SQL template
//! and the stage chain that validates caller input for it. Entries are
//! composed once, at first use; applying an entry is cheap and carries no
//! shared mutable state.
//!
//! Row-identifying keys go through required-column validation and are
//! never part of a patch whitelist, so a patch can never rewrite the row
//! it targets.

use crate::pipeline::QueryPipeline;
use once_cell::sync::Lazy;

const FETCH_CONFIG_SETTING_SQL: &str = "\
SELECT setting, value FROM Config WHERE setting = :setting;";

const SET_CONFIG_SETTING_SQL: &str = "\
INSERT OR REPLACE INTO Config(setting, value) VALUES (:setting, :value);";

const CREATE_DECK_SQL: &str = "\
INSERT INTO Decks(name) VALUES (:name);";

const FETCH_DECK_SQL: &str = "\
SELECT deck_id, name FROM Decks WHERE deck_id = :deck_id;";

const UPDATE_DECK_SQL: &str = "\
UPDATE Decks
SET
{patch}
WHERE deck_id = :deck_id;";

const DELETE_DECK_SQL: &str = "\
DELETE FROM Decks WHERE deck_id = :deck_id;";

const ASSOCIATE_DECK_AS_CHILD_SQL: &str = "\
INSERT OR IGNORE INTO DecksClosure(ancestor, descendant, depth)

/* every ancestor of the parent becomes an ancestor of the child */
SELECT t.ancestor, :child, t.depth + 1
FROM DecksClosure AS t
WHERE t.descendant = :parent

UNION ALL

/* the child is an ancestor of itself at depth 0 */
SELECT :child, :child, 0;";

const FETCH_DECK_CHILDREN_SQL: &str = "\
SELECT ancestor, descendant, depth
FROM DecksClosure
WHERE
ancestor = :parent
AND depth = 1;";

/// Fetch one config setting by key
pub static FETCH_CONFIG_SETTING: Lazy<QueryPipeline> =
    Lazy::new(|| QueryPipeline::new(FETCH_CONFIG_SETTING_SQL).require_columns(&["setting"]));

/// Insert or replace a config setting as a whole row
pub static SET_CONFIG_SETTING: Lazy<QueryPipeline> = Lazy::new(|| {
    QueryPipeline::new(SET_CONFIG_SETTING_SQL).require_columns(&["setting", "value"])
});

/// Create a deck; the closure self-edge is written by a schema trigger
pub static CREATE_DECK: Lazy<QueryPipeline> =
    Lazy::new(|| QueryPipeline::new(CREATE_DECK_SQL).require_columns(&["name"]));

/// Fetch one deck by id
pub static FETCH_DECK: Lazy<QueryPipeline> =
    Lazy::new(|| QueryPipeline::new(FETCH_DECK_SQL).require_columns(&["deck_id"]));

/// Partially update a deck; only whitelisted columns are patchable
pub static UPDATE_DECK: Lazy<QueryPipeline> = Lazy::new(|| {
    QueryPipeline::new(UPDATE_DECK_SQL)
        .require_columns(&["deck_id"])
        .patch_filter(&["name"])
});

/// Delete a deck; closure rows follow via cascading foreign keys
pub static DELETE_DECK: Lazy<QueryPipeline> =
    Lazy::new(|| QueryPipeline::new(DELETE_DECK_SQL).require_columns(&["deck_id"]));

/// Extend the closure: every ancestor of `parent` becomes an ancestor of
/// `child` one level deeper, and the child's self-edge is (re)inserted
/// defensively. `INSERT OR IGNORE` makes re-association a no-op.
pub static ASSOCIATE_DECK_AS_CHILD: Lazy<QueryPipeline> = Lazy::new(|| {
    QueryPipeline::new(ASSOCIATE_DECK_AS_CHILD_SQL).require_columns(&["parent", "child"])
});

/// Direct children of a deck: closure rows at depth 1
pub static FETCH_DECK_CHILDREN: Lazy<QueryPipeline> =
    Lazy::new(|| QueryPipeline::new(FETCH_DECK_CHILDREN_SQL).require_columns(&["parent"]));
