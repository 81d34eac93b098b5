//! # Configuration Constants
//!
//! Centralizes the crate's tunable values. The two constants below bound the
//! memory the process dedicates to statement processing; they are independent
//! of each other but both feed the same contract: a telemetry pipeline must
//! not grow without bound on hostile or high-cardinality query traffic.
//!
//! ```text
//! DEFAULT_CACHE_CAPACITY (1000 entries)
//!       │
//!       └─> StatementCache freezes (stops inserting) at this size.
//!           Raising it trades memory for hit rate on workloads with more
//!           distinct statements; the cache never evicts, so the bound is
//!           exact.
//!
//! SCRATCH_INITIAL_CAPACITY (1000 bytes)
//!       │
//!       └─> Working capacity each shared scratch buffer is topped up to
//!           when claimed. Statements longer than this grow the buffer
//!           once; the grown allocation is retained for later claims.
//! ```

/// Entries the process-wide statement cache holds before it freezes.
///
/// Sized for the common case of a small recurring set of normalized queries
/// dominating traffic. Once the working set saturates, memoization stops
/// rather than thrashes.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Minimum working capacity of each shared scratch buffer, in bytes.
pub const SCRATCH_INITIAL_CAPACITY: usize = 1000;
