//! Bidirectional symbolic-name ↔ byte-code mapping.
//!
//! A `ConstantsMapping` is built once from a [`DefineTable`] and a name
//! prefix, and is the primitive every editor surface uses to show or accept
//! human-readable names for raw byte codes.

use indexmap::IndexMap;

use crate::defines::DefineTable;
use crate::error::{Result, RomError};
use crate::eval::ExpressionEvaluator;
use crate::notification::{NotificationCollection, NotificationType};

/// Configuration for constants-mapping construction.
#[derive(Debug, Clone, Copy)]
pub struct MappingConfiguration {
    /// When `true`, an evaluated value outside `0..=255` aborts construction
    /// with [`RomError::ValueOutOfRange`].
    ///
    /// Default: `false` — out-of-range keys are skipped (and recorded as
    /// notifications when a collection is supplied), the same way keys with
    /// unevaluable expressions are.
    pub strict_range: bool,
}

impl Default for MappingConfiguration {
    fn default() -> Self {
        Self {
            strict_range: false,
        }
    }
}

/// A bidirectional mapping between constant names and byte codes.
///
/// Immutable after construction. The retained pairs always form a
/// bijection: on a byte-value collision the later declaration wins and the
/// displaced name is dropped from both directions.
#[derive(Debug, Clone, Default)]
pub struct ConstantsMapping {
    prefix: String,
    name_to_code: IndexMap<String, u8>,
    code_to_name: IndexMap<u8, String>,
}

impl ConstantsMapping {
    /// Build a mapping from every define whose key starts with `prefix`.
    ///
    /// Keys whose expression fails to evaluate, or evaluates outside one
    /// byte, are skipped.
    pub fn build(
        defines: &DefineTable,
        evaluator: &dyn ExpressionEvaluator,
        prefix: &str,
    ) -> Self {
        // The default configuration never aborts construction.
        Self::build_with_configuration(
            defines,
            evaluator,
            prefix,
            MappingConfiguration::default(),
            None,
        )
        .unwrap_or_default()
    }

    /// Build a mapping with explicit configuration, optionally recording
    /// skipped keys as notifications.
    pub fn build_with_configuration(
        defines: &DefineTable,
        evaluator: &dyn ExpressionEvaluator,
        prefix: &str,
        config: MappingConfiguration,
        mut notifications: Option<&mut NotificationCollection>,
    ) -> Result<Self> {
        let mut mapping = Self {
            prefix: prefix.to_string(),
            name_to_code: IndexMap::new(),
            code_to_name: IndexMap::new(),
        };

        for (key, expr) in defines.iter() {
            if !key.starts_with(prefix) {
                continue;
            }
            let value = match evaluator.eval(expr) {
                Ok(v) => v,
                Err(_) => {
                    if let Some(n) = notifications.as_deref_mut() {
                        n.notify(
                            NotificationType::SkippedDefine,
                            format!("{key}: cannot evaluate `{expr}`"),
                        );
                    }
                    continue;
                }
            };
            if !(0..=255).contains(&value) {
                if config.strict_range {
                    return Err(RomError::ValueOutOfRange {
                        name: key.to_string(),
                        value,
                    });
                }
                if let Some(n) = notifications.as_deref_mut() {
                    n.notify(
                        NotificationType::ValueOutOfRange,
                        format!("{key}: value {value} does not fit a byte"),
                    );
                }
                continue;
            }
            mapping.insert(key, value as u8, notifications.as_deref_mut());
        }
        Ok(mapping)
    }

    fn insert(&mut self, name: &str, code: u8, notifications: Option<&mut NotificationCollection>) {
        // Last declaration wins on a byte collision; the displaced name is
        // removed so both directions stay a strict bijection.
        if let Some(previous) = self.code_to_name.insert(code, name.to_string()) {
            self.name_to_code.shift_remove(&previous);
            if let Some(n) = notifications {
                n.notify(
                    NotificationType::Warning,
                    format!("{name} replaces {previous} for code {code:#04X}"),
                );
            }
        }
        self.name_to_code.insert(name.to_string(), code);
    }

    /// The prefix this mapping was built with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve a symbolic name to its byte code.
    pub fn name_to_code(&self, name: &str) -> Result<u8> {
        self.name_to_code
            .get(name)
            .copied()
            .ok_or_else(|| RomError::UnknownName(name.to_string()))
    }

    /// Resolve a byte code to its symbolic name.
    pub fn code_to_name(&self, code: u8) -> Result<&str> {
        self.code_to_name
            .get(&code)
            .map(String::as_str)
            .ok_or(RomError::UnknownCode(code))
    }

    /// All retained names, in source declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name_to_code.keys().map(String::as_str)
    }

    /// All retained `(name, code)` pairs, in source declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.name_to_code.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of retained pairs.
    pub fn len(&self) -> usize {
        self.name_to_code.len()
    }

    /// Check if no pairs were retained.
    pub fn is_empty(&self) -> bool {
        self.name_to_code.is_empty()
    }
}
