//! Statement admission and the select-star rewrite.
//!
//! Everything here is first-token and fixed-pattern text processing; there
//! is no SQL grammar. The known limitation: a `;` inside a string literal or
//! a non-leading comment reads as a statement separator, so `SELECT 'a;b'`
//! is rejected as multiple statements.

use crate::db::driver::Driver;
use crate::db::schema::{select_list, SchemaReader};
use crate::error::{DriverError, ValidationError};

const READ_KEYWORDS: [&str; 6] = ["SELECT", "SHOW", "DESCRIBE", "DESC", "EXPLAIN", "WITH"];

/// Checks that `sql` is a single read-only statement.
///
/// Leading `--` and `/* */` comments and whitespace are ignored, one
/// trailing `;` is tolerated, and the first token must be one of SELECT,
/// SHOW, DESCRIBE, DESC, EXPLAIN or WITH in any case.
pub fn validate(sql: &str) -> Result<(), ValidationError> {
    let mut body = strip_leading_comments(sql).trim();
    if body.is_empty() {
        return Err(ValidationError::Empty);
    }
    if let Some(rest) = body.strip_suffix(';') {
        body = rest.trim_end();
    }
    if body.contains(';') {
        return Err(ValidationError::MultipleStatements);
    }
    let first = first_token(body);
    if READ_KEYWORDS.iter().any(|k| first.eq_ignore_ascii_case(k)) {
        Ok(())
    } else {
        Err(ValidationError::NotReadOnly)
    }
}

/// Suggests a display name for a query: the text on one line, at most 40
/// characters, under a fixed label.
pub fn suggest_name(sql: &str) -> String {
    let flat = sql.replace(['\r', '\n'], " ");
    let flat = flat.trim();
    if flat.is_empty() {
        return "Consulta".to_string();
    }
    let mut label: String = flat.chars().take(40).collect();
    if flat.chars().count() > 40 {
        label.push('…');
    }
    format!("Consulta: {}", label)
}

/// Rewrites a bare `SELECT * FROM table` into an explicit column list with
/// TIME columns read as CHAR(10) text. Anything else comes back unchanged;
/// only the column lookup can fail.
pub fn rewrite_select_all<D: Driver>(
    schema: &mut SchemaReader<D>,
    sql: &str,
) -> Result<String, DriverError> {
    let stripped = sql.trim().trim_end_matches(';');
    let table = match match_select_star(stripped) {
        Some(table) => table,
        None => return Ok(sql.to_string()),
    };

    let columns = schema.list_columns(table)?;
    if columns.is_empty() {
        return Ok(format!("SELECT * FROM `{}`;", table));
    }
    log::debug!("expanding select-star on {} to {} columns", table, columns.len());
    Ok(format!("SELECT {} FROM `{}`;", select_list(&columns), table))
}

/// Skips leading whitespace, `--` line comments and `/* */` block comments.
/// An unterminated comment consumes the rest of the input.
fn strip_leading_comments(sql: &str) -> &str {
    let mut rest = sql;
    loop {
        rest = rest.trim_start();
        if let Some(tail) = rest.strip_prefix("--") {
            match tail.find('\n') {
                Some(pos) => rest = &tail[pos + 1..],
                None => return "",
            }
        } else if let Some(tail) = rest.strip_prefix("/*") {
            match tail.find("*/") {
                Some(pos) => rest = &tail[pos + 2..],
                None => return "",
            }
        } else {
            return rest;
        }
    }
}

/// The run of characters up to the first whitespace, `(` or `/`.
fn first_token(s: &str) -> &str {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|&(_, c)| c.is_whitespace() || c == '(' || c == '/')
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}

/// Matches the whole input against `SELECT * FROM table` (any case, optional
/// backticks around the table, identifier charset `[A-Za-z0-9_]`). Any extra
/// clause disqualifies the match.
fn match_select_star(s: &str) -> Option<&str> {
    let rest = eat_keyword(s.trim_start(), "select")?;
    let rest = eat_whitespace(rest)?;
    let rest = rest.strip_prefix('*')?;
    let rest = eat_whitespace(rest)?;
    let rest = eat_keyword(rest, "from")?;
    let rest = eat_whitespace(rest)?;

    let rest = rest.strip_prefix('`').unwrap_or(rest);
    let end = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let (table, tail) = rest.split_at(end);
    let tail = tail.strip_prefix('`').unwrap_or(tail);
    if tail.trim().is_empty() {
        Some(table)
    } else {
        None
    }
}

fn eat_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let head = s.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(&s[keyword.len()..])
    } else {
        None
    }
}

/// Requires at least one whitespace character and skips the run.
fn eat_whitespace(s: &str) -> Option<&str> {
    let trimmed = s.trim_start();
    if trimmed.len() == s.len() {
        None
    } else {
        Some(trimmed)
    }
}
