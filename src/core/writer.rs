//! Surgical in-place rewriting of binding values
//!
//! The writer never re-serializes a file. It locates the one quoted value
//! that needs to change and splices the replacement into the original text,
//! so every other byte (other tables, comments, whitespace, odd formatting
//! the game shipped with) survives exactly as it was.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::core::parser::TABLE_RE;

/// Matches a top-level display-label assignment.
static LOCSTRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(^|\s)bindings_locstring\s*=\s*"[^"]*""#)
        .expect("locstring regex is valid")
});

/// A write target could not be found. The input text is never modified
/// when this is returned.
#[derive(Debug, Error, PartialEq)]
pub enum WriteError {
    /// No table with the given name exists in the file.
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// The table exists but has no entry for the action key.
    #[error("Action '{action}' not found in table '{table}'")]
    ActionNotFound { table: String, action: String },
}

/// Escapes a value for embedding in a Lua double-quoted string.
pub fn escape_lua_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Replaces one binding value inside one table, in place.
///
/// The target is the *first* table whose name matches `table_name`
/// case-insensitively, and within its body the *first*
/// `action_key = "..."` occurrence; both tie-breaks are stated contracts.
/// The action key match is case-sensitive: callers pass the casing the
/// parser preserved. On success the returned text differs from the input
/// only inside the matched quoted value.
pub fn update_binding(
    text: &str,
    table_name: &str,
    action_key: &str,
    new_value: &str,
) -> Result<String, WriteError> {
    for caps in TABLE_RE.captures_iter(text) {
        if !caps["name"].eq_ignore_ascii_case(table_name) {
            continue;
        }
        let Some(body) = caps.name("body") else {
            continue;
        };

        let key_re = Regex::new(&format!(
            r#"(?P<prefix>\b{}\s*=\s*)"(?:[^"\\]|\\.)*""#,
            regex::escape(action_key)
        ))
        .expect("escaped action key forms a valid pattern");

        if !key_re.is_match(body.as_str()) {
            return Err(WriteError::ActionNotFound {
                table: table_name.to_string(),
                action: action_key.to_string(),
            });
        }

        // Replace exactly one occurrence, then splice the new body over
        // the old body span. Everything outside the span is untouched.
        let new_body = key_re.replace(body.as_str(), |c: &regex::Captures| {
            format!("{}\"{}\"", &c["prefix"], escape_lua_string(new_value))
        });

        let mut out = String::with_capacity(text.len() + new_value.len());
        out.push_str(&text[..body.start()]);
        out.push_str(&new_body);
        out.push_str(&text[body.end()..]);
        return Ok(out);
    }

    Err(WriteError::TableNotFound(table_name.to_string()))
}

/// Sets the top-level `bindings_locstring` display label.
///
/// Replaces the first existing assignment, or prepends a new one when the
/// file has none. Like `update_binding` this is a text splice, not a
/// re-serialization.
pub fn set_display_label(text: &str, value: &str) -> String {
    let escaped = escape_lua_string(value);

    if LOCSTRING_RE.is_match(text) {
        LOCSTRING_RE
            .replace(text, |c: &regex::Captures| {
                let lead = c.get(1).map_or("", |m| m.as_str());
                format!("{lead}bindings_locstring = \"{escaped}\"")
            })
            .into_owned()
    } else {
        format!("bindings_locstring = \"{escaped}\"\n{text}")
    }
}
