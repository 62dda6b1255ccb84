//! Named-parameter rendering
//!
//! The terminal step of every pipeline: rewrite `:name` placeholders into
//! SQLite's numbered positional placeholders (`?1`, `?2`, ...) in template
//! order, resolving each occurrence against the context's named-parameter
//! map. Repeated names get one slot — and one emitted value — per
//! occurrence, so the argument list always lines up with the placeholders
//! left to right.
//!
//! The scanner walks the template byte-wise and leaves string literals
//! (`'...'`, with `''` escapes) and `--` / `/* */` comments untouched, so
//! placeholder-like text inside them is never bound.

use crate::context::QueryContext;
use crate::error::QueryBuildError;
use serde_json::Value;

/// A finished statement: positional SQL plus bound arguments in
/// placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    /// SQL text with `?N` placeholders
    pub sql: String,
    /// Values for `?1..?N`, in that order
    pub args: Vec<Value>,
}

/// Render the context's template to positional form.
///
/// Fails with [`QueryBuildError::ParameterBinding`] if the template
/// references a name no stage has bound — a catalog authoring bug.
pub(crate) fn render(ctx: &QueryContext) -> Result<RenderedStatement, QueryBuildError> {
    let template = ctx.template.as_str();
    let bytes = template.as_bytes();
    let mut sql = String::with_capacity(template.len());
    let mut args = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            // string literal, '' stays inside it
            b'\'' => {
                let start = i;
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == b'\'' {
                        if bytes.get(i + 1) == Some(&b'\'') {
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                sql.push_str(&template[start..i]);
            }
            // line comment
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                let start = i;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                sql.push_str(&template[start..i]);
            }
            // block comment
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let start = i;
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
                sql.push_str(&template[start..i]);
            }
            // named placeholder
            b':' if bytes
                .get(i + 1)
                .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_') =>
            {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len()
                    && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }

                let name = &template[start..end];
                let value = ctx.named_params.get(name).ok_or_else(|| {
                    QueryBuildError::ParameterBinding {
                        placeholder: name.to_string(),
                        template: ctx.template.clone(),
                    }
                })?;

                args.push(value.clone());
                sql.push('?');
                sql.push_str(&args.len().to_string());
                i = end;
            }
            _ => {
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b'\'' | b'-' | b'/' | b':') {
                    i += 1;
                }
                if i == start {
                    // a delimiter byte that opened nothing; emit it as-is
                    i += 1;
                }
                sql.push_str(&template[start..i]);
            }
        }
    }

    Ok(RenderedStatement { sql, args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx_with(template: &str, params: &[(&str, Value)]) -> QueryContext {
        let mut ctx = QueryContext::new(template);
        for (k, v) in params {
            ctx.named_params.insert(k.to_string(), v.clone());
        }
        ctx
    }

    #[test]
    fn test_renders_in_template_order() {
        let ctx = ctx_with(
            "INSERT INTO Config(setting, value) VALUES (:setting, :value);",
            &[("value", json!("dark")), ("setting", json!("theme"))],
        );

        let stmt = render(&ctx).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO Config(setting, value) VALUES (?1, ?2);"
        );
        // argument order follows the template, not the binding order
        assert_eq!(stmt.args, vec![json!("theme"), json!("dark")]);
    }

    #[test]
    fn test_repeated_name_gets_a_slot_per_occurrence() {
        let ctx = ctx_with(
            "SELECT :child, :child, 0 FROM DecksClosure WHERE descendant = :parent;",
            &[("child", json!(2)), ("parent", json!(1))],
        );

        let stmt = render(&ctx).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT ?1, ?2, 0 FROM DecksClosure WHERE descendant = ?3;"
        );
        assert_eq!(stmt.args, vec![json!(2), json!(2), json!(1)]);
    }

    #[test]
    fn test_unbound_placeholder_is_an_error() {
        let ctx = ctx_with("SELECT * FROM Decks WHERE deck_id = :deck_id;", &[]);

        let err = render(&ctx).unwrap_err();
        assert!(matches!(
            err,
            QueryBuildError::ParameterBinding { ref placeholder, .. } if placeholder == "deck_id"
        ));
    }

    #[test]
    fn test_string_literals_are_left_alone() {
        let ctx = ctx_with(
            "SELECT ':not_a_param', :real FROM Config;",
            &[("real", json!(1))],
        );

        let stmt = render(&ctx).unwrap();
        assert_eq!(stmt.sql, "SELECT ':not_a_param', ?1 FROM Config;");
        assert_eq!(stmt.args, vec![json!(1)]);
    }

    #[test]
    fn test_escaped_quote_stays_inside_literal() {
        let ctx = ctx_with("SELECT 'it''s :fine', :x;", &[("x", json!(9))]);

        let stmt = render(&ctx).unwrap();
        assert_eq!(stmt.sql, "SELECT 'it''s :fine', ?1;");
    }

    #[test]
    fn test_comments_are_left_alone() {
        let ctx = ctx_with(
            "SELECT :a -- trailing :ghost\nFROM t /* block :ghost */ WHERE b = :a;",
            &[("a", json!(5))],
        );

        let stmt = render(&ctx).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT ?1 -- trailing :ghost\nFROM t /* block :ghost */ WHERE b = ?2;"
        );
        assert_eq!(stmt.args, vec![json!(5), json!(5)]);
    }

    #[test]
    fn test_template_without_placeholders() {
        let ctx = ctx_with("SELECT 1;", &[]);

        let stmt = render(&ctx).unwrap();
        assert_eq!(stmt.sql, "SELECT 1;");
        assert!(stmt.args.is_empty());
    }
}
