//! Regression tests mirroring the concrete scenarios and testable
//! properties called out directly in the parser's design (precedence laws,
//! the with-block classification rule, range boundaries, and the named
//! error scenarios).
