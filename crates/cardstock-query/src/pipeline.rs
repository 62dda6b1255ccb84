//! Pipeline engine
//!
//! A [`QueryPipeline`] is a SQL template bound to a statically composed
//! chain of [`BuildStage`]s. Chains are assembled once (the catalog holds
//! them in lazy statics) and applied many times; every application gets
//! its own fresh [`QueryContext`], so concurrent callers never share
//! mutable state.

use crate::context::{QueryContext, ValueMap};
use crate::error::BuildResult;
use crate::render::{self, RenderedStatement};
use crate::stage::{BuildStage, PatchFilter, RequireColumns};

/// A statement template plus its stage chain
pub struct QueryPipeline {
    template: &'static str,
    stages: Vec<Box<dyn BuildStage>>,
    has_patch: bool,
}

impl QueryPipeline {
    /// Start a pipeline from a SQL template
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            stages: Vec::new(),
            has_patch: false,
        }
    }

    /// Append a required-columns validation stage
    pub fn require_columns(mut self, columns: &'static [&'static str]) -> Self {
        self.stages.push(Box::new(RequireColumns::new(columns)));
        self
    }

    /// Append a patch-filter stage.
    ///
    /// At most one per pipeline: the template carries a single patch slot,
    /// and substituting it twice is meaningless. Violations are a
    /// construction-time programming error.
    pub fn patch_filter(mut self, whitelist: &'static [&'static str]) -> Self {
        assert!(
            !self.has_patch,
            "pipeline already has a patch-filter stage"
        );
        self.has_patch = true;
        self.stages.push(Box::new(PatchFilter::new(whitelist)));
        self
    }

    /// The template this pipeline was built from
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Build the statement.
    ///
    /// Seeds a fresh context, feeds the i-th input map to the i-th stage
    /// (stages beyond the supplied maps see an empty map, so a
    /// required-columns stage starved of input fails as missing), stops on
    /// the first error, then renders named parameters to positional form.
    pub fn apply(&self, inputs: &[ValueMap]) -> BuildResult<RenderedStatement> {
        let empty = ValueMap::new();
        let mut ctx = QueryContext::new(self.template);

        for (idx, stage) in self.stages.iter().enumerate() {
            let input = inputs.get(idx).unwrap_or(&empty);
            stage.apply(&mut ctx, input)?;
        }

        render::render(&ctx)
    }
}

/// Apply a pipeline to a sequence of value maps.
///
/// Free-function entry point for callers that hold a pipeline reference
/// rather than calling the method directly.
pub fn apply(pipeline: &QueryPipeline, inputs: &[ValueMap]) -> BuildResult<RenderedStatement> {
    pipeline.apply(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryBuildError;
    use serde_json::json;

    fn input(pairs: &[(&str, serde_json::Value)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_single_stage_pipeline() {
        let pipeline = QueryPipeline::new("SELECT name FROM Decks WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"]);

        let stmt = pipeline.apply(&[input(&[("deck_id", json!(3))])]).unwrap();
        assert_eq!(stmt.sql, "SELECT name FROM Decks WHERE deck_id = ?1;");
        assert_eq!(stmt.args, vec![json!(3)]);
    }

    #[test]
    fn test_each_stage_consumes_its_own_map() {
        let pipeline = QueryPipeline::new("UPDATE Decks SET {patch} WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"])
            .patch_filter(&["name"]);

        let key = input(&[("deck_id", json!(1))]);
        let patch = input(&[("name", json!("Mammals"))]);

        let stmt = pipeline.apply(&[key, patch]).unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE Decks SET name = ?1 WHERE deck_id = ?2;"
        );
        assert_eq!(stmt.args, vec![json!("Mammals"), json!(1)]);
    }

    #[test]
    fn test_starved_stage_sees_an_empty_map() {
        let pipeline = QueryPipeline::new("UPDATE Decks SET {patch} WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"])
            .patch_filter(&["name"]);

        // only the first map supplied; the patch stage gets an empty map
        let err = pipeline
            .apply(&[input(&[("deck_id", json!(1))])])
            .unwrap_err();
        assert_eq!(err, QueryBuildError::EmptyPatch);
    }

    #[test]
    fn test_no_maps_at_all_fails_as_missing() {
        let pipeline = QueryPipeline::new("SELECT name FROM Decks WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"]);

        let err = pipeline.apply(&[]).unwrap_err();
        assert!(matches!(
            err,
            QueryBuildError::MissingColumn { ref column, .. } if column == "deck_id"
        ));
    }

    #[test]
    fn test_first_error_short_circuits() {
        let pipeline = QueryPipeline::new("UPDATE Decks SET {patch} WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"])
            .patch_filter(&["name"]);

        // first stage fails; the patch stage (which would also fail, with
        // a different error) is never reached
        let err = pipeline
            .apply(&[input(&[("wrong_key", json!(1))])])
            .unwrap_err();
        assert!(matches!(err, QueryBuildError::MissingColumn { .. }));
    }

    #[test]
    fn test_extra_maps_are_ignored() {
        let pipeline = QueryPipeline::new("SELECT name FROM Decks WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"]);

        let stmt = pipeline
            .apply(&[
                input(&[("deck_id", json!(3))]),
                input(&[("leftover", json!(true))]),
            ])
            .unwrap();
        assert_eq!(stmt.args, vec![json!(3)]);
    }

    #[test]
    fn test_applications_do_not_leak_state() {
        let pipeline = QueryPipeline::new("UPDATE Decks SET {patch} WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"])
            .patch_filter(&["name"]);

        let first = pipeline
            .apply(&[
                input(&[("deck_id", json!(1))]),
                input(&[("name", json!("A"))]),
            ])
            .unwrap();

        let second = pipeline
            .apply(&[
                input(&[("deck_id", json!(2))]),
                input(&[("name", json!("B"))]),
            ])
            .unwrap();

        assert_eq!(first.args, vec![json!("A"), json!(1)]);
        assert_eq!(second.args, vec![json!("B"), json!(2)]);
    }

    #[test]
    #[should_panic(expected = "already has a patch-filter stage")]
    fn test_second_patch_stage_is_rejected_at_construction() {
        let _ = QueryPipeline::new("UPDATE Decks SET {patch};")
            .patch_filter(&["name"])
            .patch_filter(&["name"]);
    }

    #[test]
    fn test_free_function_entry_point() {
        let pipeline = QueryPipeline::new("SELECT name FROM Decks WHERE deck_id = :deck_id;")
            .require_columns(&["deck_id"]);

        let stmt = apply(&pipeline, &[input(&[("deck_id", json!(3))])]).unwrap();
        assert_eq!(stmt.args, vec![json!(3)]);
    }
}
