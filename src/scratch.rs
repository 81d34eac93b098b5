//! # Reusable Scratch Buffers
//!
//! Pre-grown text buffers shared across sanitizer invocations so the hot
//! path allocates nothing once the process is warm.
//!
//! ## Design
//!
//! There are exactly two process-wide slots, one per output stream
//! (sanitized statement, summary). Each slot is a `Mutex<String>` and a
//! claim is `try_lock`: a single compare-and-set on the lock word, never a
//! wait. The winner clears the buffer and writes into the retained
//! allocation; a loser falls back to a private `String` sized from the
//! input. Either way the caller gets a [`ScratchBuffer`] that dereferences
//! to `String`.
//!
//! Releasing is the guard's `Drop`, so a claim is returned exactly once on
//! every exit path.
//!
//! ## Usage
//!
//! ```ignore
//! let mut out = ScratchBuffer::sanitized(input.len());
//! out.push_str("SELECT ");
//! out.push('?');
//! let owned: String = out.into_string(); // slot released here (or on drop)
//! ```

use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard};

use crate::config::SCRATCH_INITIAL_CAPACITY;

static SANITIZED_SCRATCH: Mutex<String> = Mutex::new(String::new());
static SUMMARY_SCRATCH: Mutex<String> = Mutex::new(String::new());

/// A claimed output buffer: the shared slot when the claim won, a private
/// allocation otherwise.
pub(crate) enum ScratchBuffer {
    Shared(MutexGuard<'static, String>),
    Owned(String),
}

impl ScratchBuffer {
    /// Claims the sanitized-statement slot.
    pub(crate) fn sanitized(input_len: usize) -> Self {
        Self::claim(&SANITIZED_SCRATCH, input_len)
    }

    /// Claims the summary slot. The two slots are claimed independently, so
    /// one contended stream does not force the other to allocate.
    pub(crate) fn summary(input_len: usize) -> Self {
        Self::claim(&SUMMARY_SCRATCH, input_len)
    }

    fn claim(slot: &'static Mutex<String>, input_len: usize) -> Self {
        match slot.try_lock() {
            Some(mut buf) => {
                buf.clear();
                if buf.capacity() < SCRATCH_INITIAL_CAPACITY {
                    buf.reserve(SCRATCH_INITIAL_CAPACITY);
                }
                ScratchBuffer::Shared(buf)
            }
            None => ScratchBuffer::Owned(String::with_capacity(input_len)),
        }
    }

    /// The accumulated text as an owned `String`.
    ///
    /// A shared buffer is copied out so its allocation stays pooled for the
    /// next claim; an owned buffer moves without copying.
    pub(crate) fn into_string(self) -> String {
        match self {
            ScratchBuffer::Shared(buf) => buf.as_str().to_owned(),
            ScratchBuffer::Owned(buf) => buf,
        }
    }
}

impl Deref for ScratchBuffer {
    type Target = String;

    fn deref(&self) -> &String {
        match self {
            ScratchBuffer::Shared(buf) => buf,
            ScratchBuffer::Owned(buf) => buf,
        }
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut String {
        match self {
            ScratchBuffer::Shared(buf) => buf,
            ScratchBuffer::Owned(buf) => buf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test claims its own function-local slot rather than the
    // process-wide ones, so parallel tests (and the sanitizer tests that
    // exercise the real slots) cannot interfere.

    #[test]
    fn claim_wins_then_falls_back_under_contention() {
        static SLOT: Mutex<String> = Mutex::new(String::new());

        let first = ScratchBuffer::claim(&SLOT, 16);
        assert!(matches!(first, ScratchBuffer::Shared(_)));

        let second = ScratchBuffer::claim(&SLOT, 16);
        assert!(matches!(second, ScratchBuffer::Owned(_)));

        drop(first);
        let third = ScratchBuffer::claim(&SLOT, 16);
        assert!(matches!(third, ScratchBuffer::Shared(_)));
    }

    #[test]
    fn shared_claim_is_cleared_and_pre_grown() {
        static SLOT: Mutex<String> = Mutex::new(String::new());

        {
            let mut buf = ScratchBuffer::claim(&SLOT, 0);
            buf.push_str("stale contents");
        }

        let buf = ScratchBuffer::claim(&SLOT, 0);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= SCRATCH_INITIAL_CAPACITY);
    }

    #[test]
    fn into_string_returns_written_text_and_releases_slot() {
        static SLOT: Mutex<String> = Mutex::new(String::new());

        let mut buf = ScratchBuffer::claim(&SLOT, 8);
        buf.push_str("SELECT ?");
        assert_eq!(buf.into_string(), "SELECT ?");

        let again = ScratchBuffer::claim(&SLOT, 8);
        assert!(matches!(again, ScratchBuffer::Shared(_)));
    }

    #[test]
    fn owned_fallback_reserves_for_the_input() {
        static SLOT: Mutex<String> = Mutex::new(String::new());

        let held = ScratchBuffer::claim(&SLOT, 0);
        let fallback = ScratchBuffer::claim(&SLOT, 4096);
        assert!(fallback.capacity() >= 4096);
        drop(held);
    }

    #[test]
    fn grown_capacity_is_retained_across_claims() {
        static SLOT: Mutex<String> = Mutex::new(String::new());

        {
            let mut buf = ScratchBuffer::claim(&SLOT, 0);
            buf.reserve(8192);
        }
        let buf = ScratchBuffer::claim(&SLOT, 0);
        assert!(buf.capacity() >= 8192);
    }
}
