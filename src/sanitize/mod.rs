//! # Statement Sanitizer
//!
//! Derives the two telemetry strings from a raw SQL statement in one pass:
//!
//! - **sanitized SQL**: every literal value (string, hexadecimal, numeric)
//!   replaced by `?`, comments elided, everything else preserved character
//!   for character;
//! - **summary**: the operation keyword plus its primary target
//!   identifier(s), e.g. `SELECT Customers` or `CREATE TABLE foo`, suitable
//!   as a low-cardinality span name.
//!
//! ## Module Structure
//!
//! - `keyword`: the phf keyword table and case-insensitive lookup
//! - `scanner`: the character-level state machine
//!
//! ## Example
//!
//! ```ignore
//! use sqlscrub::sanitize;
//!
//! let info = sanitize("SELECT name FROM Customers WHERE id = 42");
//! assert_eq!(info.sanitized_sql(), "SELECT name FROM Customers WHERE id = ?");
//! assert_eq!(info.summary(), "SELECT Customers");
//! ```
//!
//! The engine is total: any input, including empty or malformed SQL,
//! produces some output without signaling. It is also pure (output depends
//! only on the input), which is what makes the result safe to memoize in
//! [`crate::cache`].

mod keyword;
mod scanner;

use scanner::Scanner;

/// Sanitized statement and summary derived from one SQL text.
///
/// Both fields may be empty. Immutable once constructed; the memoizing
/// cache hands out shared references to a single instance per input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementInfo {
    sanitized_sql: String,
    summary: String,
}

impl StatementInfo {
    pub(crate) fn new(sanitized_sql: String, summary: String) -> Self {
        Self {
            sanitized_sql,
            summary,
        }
    }

    /// The statement with literals replaced by `?` and comments removed.
    pub fn sanitized_sql(&self) -> &str {
        &self.sanitized_sql
    }

    /// Low-cardinality operation/target label, e.g. `INSERT INTO Logs`.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// Sanitizes `sql` in a single left-to-right pass, uncached.
///
/// Exposed primarily for testing and one-off use; production callers want
/// the memoized [`crate::get`]. Output buffers come from the process-wide
/// scratch pool when available, so a warm uncontended call allocates only
/// the returned strings.
pub fn sanitize(sql: &str) -> StatementInfo {
    Scanner::new(sql).run()
}
