//! Expression evaluation.
//!
//! Constants in the assembly sources are declared as textual expressions
//! (`$3f`, `%0110`, `ENEMYID_OCTOROK|$80`, ...). The model only ever
//! consumes evaluated integers; the [`ExpressionEvaluator`] trait is the
//! boundary behind which a host can plug its own evaluator.
//!
//! [`AsmEvaluator`] is the default implementation, covering the literal and
//! operator forms used by the target disassemblies.

use crate::defines::DefineTable;
use crate::error::{Result, RomError};

/// Maximum depth when resolving defines that reference other defines.
const MAX_RESOLVE_DEPTH: u32 = 8;

/// Evaluates a textual expression to an integer.
///
/// Fails with [`RomError::BadExpression`] on unparseable input.
pub trait ExpressionEvaluator {
    /// Evaluate `expr` to an integer.
    fn eval(&self, expr: &str) -> Result<i64>;
}

/// Default evaluator for assembly-style expressions.
///
/// Supported literal forms: `$2a` / `0x2a` hex, `%101` / `0b101` binary,
/// decimal. Supported operators, loosest-binding first: `|`, `<<`, `+`.
/// When constructed [with a define table](AsmEvaluator::with_defines),
/// bare identifiers resolve through it (bounded recursion, so definition
/// cycles fail instead of looping).
#[derive(Debug, Clone, Copy, Default)]
pub struct AsmEvaluator<'a> {
    defines: Option<&'a DefineTable>,
}

impl<'a> AsmEvaluator<'a> {
    /// Create an evaluator that handles literals and operators only.
    pub fn new() -> Self {
        Self { defines: None }
    }

    /// Create an evaluator that additionally resolves identifiers through
    /// the given define table.
    pub fn with_defines(defines: &'a DefineTable) -> Self {
        Self {
            defines: Some(defines),
        }
    }

    fn eval_or(&self, expr: &str, depth: u32) -> Result<i64> {
        let mut value = 0i64;
        for term in expr.split('|') {
            value |= self.eval_shift(term, depth)?;
        }
        Ok(value)
    }

    fn eval_shift(&self, expr: &str, depth: u32) -> Result<i64> {
        let mut parts = expr.split("<<");
        let mut value = match parts.next() {
            Some(first) => self.eval_sum(first, depth)?,
            None => return Err(RomError::BadExpression(expr.to_string())),
        };
        for part in parts {
            value <<= self.eval_sum(part, depth)?;
        }
        Ok(value)
    }

    fn eval_sum(&self, expr: &str, depth: u32) -> Result<i64> {
        let mut value = 0i64;
        for term in expr.split('+') {
            value += self.eval_atom(term.trim(), depth)?;
        }
        Ok(value)
    }

    fn eval_atom(&self, atom: &str, depth: u32) -> Result<i64> {
        if atom.is_empty() {
            return Err(RomError::BadExpression(atom.to_string()));
        }
        if let Some(hex) = atom.strip_prefix('$').or_else(|| atom.strip_prefix("0x")) {
            return i64::from_str_radix(hex, 16)
                .map_err(|_| RomError::BadExpression(atom.to_string()));
        }
        if let Some(bin) = atom.strip_prefix('%').or_else(|| atom.strip_prefix("0b")) {
            return i64::from_str_radix(bin, 2)
                .map_err(|_| RomError::BadExpression(atom.to_string()));
        }
        if atom.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '-') {
            return atom
                .parse::<i64>()
                .map_err(|_| RomError::BadExpression(atom.to_string()));
        }

        // Bare identifier: resolve through the define table, if any.
        if let Some(defines) = self.defines {
            if depth == 0 {
                return Err(RomError::BadExpression(format!(
                    "{atom}: definition too deep or cyclic"
                )));
            }
            if let Some(expr) = defines.get(atom) {
                return self.eval_or(expr, depth - 1);
            }
        }
        Err(RomError::BadExpression(atom.to_string()))
    }
}

impl ExpressionEvaluator for AsmEvaluator<'_> {
    fn eval(&self, expr: &str) -> Result<i64> {
        self.eval_or(expr.trim(), MAX_RESOLVE_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_forms() {
        let e = AsmEvaluator::new();
        assert_eq!(e.eval("$2a").unwrap(), 0x2a);
        assert_eq!(e.eval("0x2a").unwrap(), 0x2a);
        assert_eq!(e.eval("%0110").unwrap(), 6);
        assert_eq!(e.eval("0b0110").unwrap(), 6);
        assert_eq!(e.eval("42").unwrap(), 42);
        assert_eq!(e.eval(" 42 ").unwrap(), 42);
    }

    #[test]
    fn test_operators() {
        let e = AsmEvaluator::new();
        assert_eq!(e.eval("$40|$03").unwrap(), 0x43);
        assert_eq!(e.eval("1<<4").unwrap(), 0x10);
        assert_eq!(e.eval("$10+2").unwrap(), 0x12);
        assert_eq!(e.eval("1<<4|1").unwrap(), 0x11);
    }

    #[test]
    fn test_bad_expressions() {
        let e = AsmEvaluator::new();
        assert!(matches!(e.eval("bogus"), Err(RomError::BadExpression(_))));
        assert!(matches!(e.eval("$zz"), Err(RomError::BadExpression(_))));
        assert!(matches!(e.eval(""), Err(RomError::BadExpression(_))));
    }

    #[test]
    fn test_define_resolution() {
        let defines = DefineTable::parse(
            ".define ENEMYID_OCTOROK $05\n\
             .define ENEMYID_FIRST ENEMYID_OCTOROK\n",
        );
        let e = AsmEvaluator::with_defines(&defines);
        assert_eq!(e.eval("ENEMYID_FIRST").unwrap(), 5);
        assert_eq!(e.eval("ENEMYID_OCTOROK|$80").unwrap(), 0x85);
    }

    #[test]
    fn test_cyclic_defines_fail() {
        let defines = DefineTable::parse(
            ".define A B\n\
             .define B A\n",
        );
        let e = AsmEvaluator::with_defines(&defines);
        assert!(matches!(e.eval("A"), Err(RomError::BadExpression(_))));
    }
}
