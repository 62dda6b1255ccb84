//! Build stages
//!
//! A stage is one composable validation/transformation step over the
//! build context. Pipelines apply their stages in declaration order and
//! abort on the first error; no stage retries or partially recovers.

use crate::context::{QueryContext, ValueMap};
use crate::error::QueryBuildError;

/// Slot in a template that receives the comma-joined patch fragments
pub(crate) const PATCH_SLOT: &str = "{patch}";

/// One step of a statement-construction chain
pub trait BuildStage: Send + Sync {
    /// Unique name for this stage
    fn name(&self) -> &'static str;

    /// Apply this stage to the context, consuming one caller value map
    fn apply(&self, ctx: &mut QueryContext, input: &ValueMap) -> Result<(), QueryBuildError>;
}

/// Validates that every required column is a key of the input map, then
/// copies each required entry into the context's named parameters.
///
/// The whole column set is checked before anything is copied, so a failed
/// stage leaves the context untouched.
pub struct RequireColumns {
    columns: &'static [&'static str],
}

impl RequireColumns {
    pub fn new(columns: &'static [&'static str]) -> Self {
        Self { columns }
    }
}

impl BuildStage for RequireColumns {
    fn name(&self) -> &'static str {
        "require-columns"
    }

    fn apply(&self, ctx: &mut QueryContext, input: &ValueMap) -> Result<(), QueryBuildError> {
        for col in self.columns {
            if !input.contains_key(*col) {
                return Err(QueryBuildError::MissingColumn {
                    column: (*col).to_string(),
                    template: ctx.template.clone(),
                });
            }
        }

        for col in self.columns {
            if let Some(value) = input.get(*col) {
                ctx.named_params.insert((*col).to_string(), value.clone());
            }
        }

        Ok(())
    }
}

/// Accepts only whitelisted columns from a patch map, binding each match
/// and substituting the accumulated `col = :col` fragments into the
/// template's single [`PATCH_SLOT`].
///
/// A patch that matches nothing is a caller error, not a no-op. Fragments
/// are emitted in whitelist order, so the rendered SQL is deterministic
/// regardless of input key order.
pub struct PatchFilter {
    whitelist: &'static [&'static str],
}

impl PatchFilter {
    pub fn new(whitelist: &'static [&'static str]) -> Self {
        Self { whitelist }
    }
}

impl BuildStage for PatchFilter {
    fn name(&self) -> &'static str {
        "patch-filter"
    }

    fn apply(&self, ctx: &mut QueryContext, input: &ValueMap) -> Result<(), QueryBuildError> {
        let mut fragments = Vec::with_capacity(self.whitelist.len());

        for col in self.whitelist {
            if let Some(value) = input.get(*col) {
                ctx.named_params.insert((*col).to_string(), value.clone());
                fragments.push(format!("{col} = :{col}"));
            }
        }

        if fragments.is_empty() {
            return Err(QueryBuildError::EmptyPatch);
        }

        ctx.template = ctx.template.replacen(PATCH_SLOT, &fragments.join(", "), 1);
        Ok(())
    }
}
