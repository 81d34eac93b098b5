//! # sqlscrub - SQL Statement Sanitizer for Trace Telemetry
//!
//! sqlscrub turns raw SQL into span-safe strings: a **sanitized statement**
//! with every literal replaced by `?` and comments removed, and a
//! **summary** naming the operation and its target, low-cardinality enough
//! to use as a span name. This implementation prioritizes:
//!
//! - **One pass, no parse**: a character-level state machine, never an AST
//! - **Total over any input**: malformed SQL degrades output, never errors
//! - **Amortized-zero allocation**: shared scratch buffers and a frozen
//!   result cache bound per-call work
//!
//! ## Quick Start
//!
//! ```ignore
//! use sqlscrub::get;
//!
//! let info = get(Some("SELECT name FROM Customers WHERE id = 42"));
//! assert_eq!(info.sanitized_sql(), "SELECT name FROM Customers WHERE id = ?");
//! assert_eq!(info.summary(), "SELECT Customers");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │      Public API (get / sanitize)     │
//! ├──────────────────────────────────────┤
//! │   Statement Cache (frozen at 1000)   │
//! ├──────────────────────────────────────┤
//! │  Scanner (keywords/literals/targets) │
//! ├──────────────────────────────────────┤
//! │      Reusable Scratch Buffers        │
//! └──────────────────────────────────────┘
//! ```
//!
//! A call to [`get`] checks the cache first; on a miss the scanner runs and
//! the result is memoized unless the cache has reached capacity, in which
//! case it is returned uncached. [`sanitize`] bypasses the cache entirely.
//!
//! ## What Gets Replaced
//!
//! - String literals: `'it''s'` → `?` (doubled quotes stay inside the span)
//! - Hex literals: `0xDEADBEEF` → `?`
//! - Numerics: `42`, `-.25`, `1.5e-3` → `?`
//! - Comments: `/* ... */` and `-- ...` disappear (line breaks survive)
//!
//! Identifiers, keywords, operators, and whitespace pass through untouched,
//! so the sanitized text still reads as the original statement's shape.
//!
//! ## Concurrency
//!
//! Everything is synchronous and thread-safe: cache reads share a lock,
//! insertion is single-writer, and the two scratch buffers are claimed with
//! a compare-and-set, falling back to private allocation under contention.
//!
//! ## Module Overview
//!
//! - [`sanitize`](mod@sanitize): the single-pass scanner and [`StatementInfo`]
//! - [`cache`]: bounded insertion-frozen memoization
//! - [`config`]: capacity constants

pub mod cache;
pub mod config;
pub mod sanitize;

mod scratch;

pub use cache::{cache_capacity, get, set_cache_capacity, StatementCache};
pub use sanitize::{sanitize, StatementInfo};
