//! Diagnostic codes for categorizing lexer/parser errors.
//!
//! Homescript itself never surfaces these (there is no `--explain`-style CLI
//! in scope here), but attaching a stable code to each diagnostic is cheap
//! and lets downstream tooling (an LSP server, a future CLI) key off a code
//! rather than matching on message text.
//!
//! # Examples
//!
//! ```
//! use homescript_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEXER_UNTERMINATED_STRING;
//! assert_eq!(code.as_str(), "E1002");
//! ```

/// A `{prefix}{4-digit number}` diagnostic identifier, e.g. `E1002`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    prefix: &'static str,
    number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // Lexer errors (always hard, per the crate's error-handling design).
    pub const E_LEXER_UNEXPECTED_CHAR: Self = Self::new("E", 1001);
    pub const E_LEXER_UNTERMINATED_STRING: Self = Self::new("E", 1002);
    pub const E_LEXER_UNKNOWN_TOKEN: Self = Self::new("E", 1004);

    // Parser errors: hard.
    pub const E_PARSER_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    pub const E_PARSER_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    pub const E_PARSER_UNEXPECTED_EOF: Self = Self::new("E", 2003);
    pub const E_PARSER_CHAINED_RANGE: Self = Self::new("E", 2004);

    // Parser errors: soft.
    pub const E_PARSER_MISSING_TERMINATOR: Self = Self::new("E", 2010);
    pub const E_PARSER_INVALID_ASSIGN_TARGET: Self = Self::new("E", 2011);
    pub const E_PARSER_REDECLARED_BUILTIN: Self = Self::new("E", 2012);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_pads_to_four_digits() {
        assert_eq!(DiagnosticCode::new("E", 1).as_str(), "E0001");
        assert_eq!(DiagnosticCode::E_LEXER_UNTERMINATED_STRING.as_str(), "E1002");
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(DiagnosticCode::new("E", 2001), DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN);
    }
}
