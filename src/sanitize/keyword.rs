//! # Keyword Table
//!
//! The scanner reacts to fifteen keywords; everything else in a statement is
//! an identifier to it. Lookup goes through a compile-time perfect hash map
//! (phf) keyed on the upper-case spelling, folded into a fixed stack buffer
//! so classifying a token allocates nothing.
//!
//! Word-bounding is the caller's job: [`lookup`] is handed a maximal
//! `[A-Za-z0-9_]` run, which is what makes `SELECTED` or `FROMAGE` miss.

use phf::phf_map;

/// Keywords with scanner semantics, grouped by how the scanner reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    // Operations: name the statement in the summary.
    Select,
    Update,
    Insert,
    Delete,
    // DDL verbs: open the normalized-summary path.
    Create,
    Alter,
    Drop,
    // Clauses: arm capture of the identifier that follows them.
    Into,
    From,
    Join,
    // DDL objects: recognized only directly after a DDL verb.
    Table,
    Index,
    Procedure,
    View,
    Database,
}

impl Keyword {
    pub(crate) fn is_operation(self) -> bool {
        matches!(
            self,
            Keyword::Select | Keyword::Update | Keyword::Insert | Keyword::Delete
        )
    }

    pub(crate) fn is_ddl_verb(self) -> bool {
        matches!(self, Keyword::Create | Keyword::Alter | Keyword::Drop)
    }

    pub(crate) fn is_ddl_object(self) -> bool {
        matches!(
            self,
            Keyword::Table | Keyword::Index | Keyword::Procedure | Keyword::View | Keyword::Database
        )
    }
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "SELECT" => Keyword::Select,
    "UPDATE" => Keyword::Update,
    "INSERT" => Keyword::Insert,
    "DELETE" => Keyword::Delete,
    "CREATE" => Keyword::Create,
    "ALTER" => Keyword::Alter,
    "DROP" => Keyword::Drop,
    "INTO" => Keyword::Into,
    "FROM" => Keyword::From,
    "JOIN" => Keyword::Join,
    "TABLE" => Keyword::Table,
    "INDEX" => Keyword::Index,
    "PROCEDURE" => Keyword::Procedure,
    "VIEW" => Keyword::View,
    "DATABASE" => Keyword::Database,
};

/// Longest key in [`KEYWORDS`] (`PROCEDURE`).
const MAX_KEYWORD_LEN: usize = 9;

/// Case-insensitive keyword lookup without allocating.
pub(crate) fn lookup(token: &str) -> Option<Keyword> {
    if token.len() > MAX_KEYWORD_LEN {
        return None;
    }
    let mut upper = [0u8; MAX_KEYWORD_LEN];
    for (dst, src) in upper.iter_mut().zip(token.bytes()) {
        *dst = src.to_ascii_uppercase();
    }
    // Tokens are maximal ASCII word runs, so the fold stays valid UTF-8.
    let key = std::str::from_utf8(&upper[..token.len()]).ok()?;
    KEYWORDS.get(key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("select"), Some(Keyword::Select));
        assert_eq!(lookup("SELECT"), Some(Keyword::Select));
        assert_eq!(lookup("SeLeCt"), Some(Keyword::Select));
        assert_eq!(lookup("procedure"), Some(Keyword::Procedure));
    }

    #[test]
    fn lookup_misses_supersets_and_strangers() {
        assert_eq!(lookup("SELECTED"), None);
        assert_eq!(lookup("FROMAGE"), None);
        assert_eq!(lookup("SELE"), None);
        assert_eq!(lookup("WHERE"), None);
        assert_eq!(lookup("TRUNCATE"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn classes_partition_the_table() {
        for (_, &kw) in KEYWORDS.entries() {
            let classes = [kw.is_operation(), kw.is_ddl_verb(), kw.is_ddl_object()];
            let in_some = classes.iter().filter(|c| **c).count();
            let is_clause = matches!(kw, Keyword::Into | Keyword::From | Keyword::Join);
            assert_eq!(in_some + usize::from(is_clause), 1, "{kw:?}");
        }
    }

    #[test]
    fn longest_key_fits_the_stack_buffer() {
        for (key, _) in KEYWORDS.entries() {
            assert!(key.len() <= MAX_KEYWORD_LEN);
        }
    }
}
