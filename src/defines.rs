//! Define-table extraction from assembly source.
//!
//! A "define" is a named textual constant paired with an expression to be
//! evaluated later; this module performs pure text extraction and never
//! evaluates anything. Two declaration forms are recognized:
//!
//! ```text
//! .define ENEMYID_OCTOROK $05
//! ROOM_WIDTH equ 10
//! ```
//!
//! Malformed lines are omitted without failing the parse; when a
//! [`NotificationCollection`] is supplied they are recorded there.

use indexmap::IndexMap;

use crate::notification::{NotificationCollection, NotificationType};

/// An ordered table of key → raw expression text.
///
/// Entries are immutable once parsed; re-parsing a source replaces the
/// affected keys wholesale. Insertion order is preserved, and a later
/// declaration of an existing key replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct DefineTable {
    entries: IndexMap<String, String>,
}

impl DefineTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Parse a source text into a table.
    pub fn parse(source: &str) -> Self {
        let mut table = Self::new();
        table.parse_into(source, None);
        table
    }

    /// Parse a source text, recording skipped lines as notifications.
    pub fn parse_with_notifications(
        source: &str,
        notifications: &mut NotificationCollection,
    ) -> Self {
        let mut table = Self::new();
        table.parse_into(source, Some(notifications));
        table
    }

    /// Parse additional source into this table.
    ///
    /// Existing keys declared again are replaced.
    pub fn extend_from_source(
        &mut self,
        source: &str,
        notifications: Option<&mut NotificationCollection>,
    ) {
        self.parse_into(source, notifications);
    }

    fn parse_into(&mut self, source: &str, mut notifications: Option<&mut NotificationCollection>) {
        for line in source.lines() {
            // Strip comments before looking at the declaration.
            let line = match line.find(';') {
                Some(pos) => &line[..pos],
                None => line,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_line(line) {
                Some((key, expr)) => {
                    self.entries.insert(key.to_string(), expr.to_string());
                }
                None => {
                    // Only declaration-shaped lines count as skips; plain
                    // instructions and directives are expected noise.
                    if looks_like_declaration(line) {
                        if let Some(n) = notifications.as_deref_mut() {
                            n.notify(
                                NotificationType::SkippedLine,
                                format!("malformed define: {line}"),
                            );
                        }
                    }
                }
            }
        }
    }

    /// Get the raw expression for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, expression)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Try to split one declaration line into `(key, expression)`.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    if let Some(rest) = line.strip_prefix(".define") {
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let rest = rest.trim_start();
        let (key, expr) = rest.split_once(char::is_whitespace)?;
        return valid_declaration(key, expr.trim());
    }

    // `NAME equ EXPR` form.
    let mut words = line.splitn(3, char::is_whitespace);
    let key = words.next()?;
    let keyword = words.next()?;
    if !keyword.eq_ignore_ascii_case("equ") {
        return None;
    }
    valid_declaration(key, words.next()?.trim())
}

fn valid_declaration<'a>(key: &'a str, expr: &'a str) -> Option<(&'a str, &'a str)> {
    if expr.is_empty() || !is_identifier(key) {
        return None;
    }
    Some((key, expr))
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn looks_like_declaration(line: &str) -> bool {
    line.starts_with(".define") || line.to_ascii_lowercase().contains(" equ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_define_form() {
        let t = DefineTable::parse(".define ENEMYID_OCTOROK $05");
        assert_eq!(t.get("ENEMYID_OCTOROK"), Some("$05"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_parse_equ_form() {
        let t = DefineTable::parse("ROOM_WIDTH equ 10\nROOM_HEIGHT EQU 8");
        assert_eq!(t.get("ROOM_WIDTH"), Some("10"));
        assert_eq!(t.get("ROOM_HEIGHT"), Some("8"));
    }

    #[test]
    fn test_comments_stripped() {
        let t = DefineTable::parse(".define ENEMYID_ROPE $06 ; the snake");
        assert_eq!(t.get("ENEMYID_ROPE"), Some("$06"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let source = "\
.define MISSING_VALUE
.define GOOD $01
ld a,(hl)
.define 9BAD $02
";
        let mut notifications = NotificationCollection::new();
        let t = DefineTable::parse_with_notifications(source, &mut notifications);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("GOOD"), Some("$01"));
        // Both declaration-shaped failures are recorded; the instruction
        // line is not.
        assert_eq!(notifications.of_type(NotificationType::SkippedLine).len(), 2);
    }

    #[test]
    fn test_duplicate_key_last_wins_in_place() {
        let t = DefineTable::parse(
            ".define A 1\n\
             .define B 2\n\
             .define A 3\n",
        );
        assert_eq!(t.get("A"), Some("3"));
        let keys: Vec<&str> = t.keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_expression_keeps_internal_spacing() {
        let t = DefineTable::parse(".define COMBINED ENEMYID_BASE | $80");
        assert_eq!(t.get("COMBINED"), Some("ENEMYID_BASE | $80"));
    }

    #[test]
    fn test_extend_replaces() {
        let mut t = DefineTable::parse(".define A 1");
        t.extend_from_source(".define A 2\n.define B 3", None);
        assert_eq!(t.get("A"), Some("2"));
        assert_eq!(t.get("B"), Some("3"));
    }
}
