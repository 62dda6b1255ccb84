//! Value maps and the per-application build context

use serde_json::{Map, Value};

/// Loosely-typed column -> value input.
///
/// One map feeds one pipeline stage. The engine treats maps as read-only;
/// key order carries no meaning.
pub type ValueMap = Map<String, Value>;

/// Decode a JSON object into a value map.
///
/// Decode failures (including non-object input) surface as
/// [`serde_json::Error`] untouched — the decoding layer's errors are not
/// wrapped by the pipeline.
pub fn value_map_from_json(raw: &[u8]) -> Result<ValueMap, serde_json::Error> {
    serde_json::from_slice(raw)
}

/// Mutable accumulator for one statement build.
///
/// Owned by exactly one pipeline application and mutated sequentially by
/// its stage chain: the template may have its patch slot substituted once,
/// and the named-parameter map only ever grows. Positional arguments do
/// not exist until rendering.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub(crate) template: String,
    pub(crate) named_params: ValueMap,
}

impl QueryContext {
    /// Seed a fresh context from a statement template
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            named_params: ValueMap::new(),
        }
    }

    /// The in-progress SQL text
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parameters bound so far, by name
    pub fn named_params(&self) -> &ValueMap {
        &self.named_params
    }
}
