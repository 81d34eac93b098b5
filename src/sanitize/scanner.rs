//! # Statement Scanner
//!
//! Single-pass state machine behind [`sanitize`](super::sanitize). The
//! cursor walks the input bytes left to right and at every position fires
//! the first matching rule, in fixed precedence:
//!
//! 1. Comment (`/* */`, `--`): consumed, written nowhere.
//! 2. Literal (string, hex, numeric): the whole span becomes one `?`.
//! 3. Keyword: copied in its original case; operations and DDL verbs also
//!    land in the summary and steer target capture.
//! 4. Identifier: copied; captured into the summary when a preceding
//!    keyword armed capture.
//! 5. Anything else: copied verbatim.
//!
//! The scan is byte-oriented: every token the machine matches is ASCII, and
//! multi-byte sequences can only reach the verbatim rule, which copies whole
//! characters. Malformed input (unterminated strings, bare `0x`, stray
//! signs) degrades the output, never the scan.
//!
//! ## Target capture
//!
//! `capture_target` routes the next identifier into the summary. UPDATE and
//! the clause keywords INTO/FROM/JOIN arm it; a DDL object keyword (TABLE,
//! INDEX, ...) arms it for the object's name. While `in_from_clause` holds,
//! an identifier that stops on `,` re-arms capture, so comma-separated FROM
//! targets all reach the summary:
//!
//! ```text
//! SELECT * FROM Orders o, OrderDetails od
//!               ^^^^^^ captured   ^^^^^^^^^^^^ captured (re-armed by `o,`)
//! ```

use super::keyword::{self, Keyword};
use super::StatementInfo;
use crate::scratch::ScratchBuffer;

pub(crate) struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    sanitized: ScratchBuffer,
    summary: ScratchBuffer,
    capture_target: bool,
    in_from_clause: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            sanitized: ScratchBuffer::sanitized(input.len()),
            summary: ScratchBuffer::summary(input.len()),
            capture_target: false,
            in_from_clause: false,
        }
    }

    pub(crate) fn run(mut self) -> StatementInfo {
        while !self.is_eof() {
            if self.skip_comment() {
                continue;
            }
            if self.scan_string_literal() || self.scan_hex_literal() || self.scan_numeric_literal()
            {
                self.sanitized.push('?');
                continue;
            }
            self.write_token();
        }
        StatementInfo::new(self.sanitized.into_string(), self.summary.into_string())
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn current(&self) -> u8 {
        self.bytes[self.pos]
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    /// Consumes `/* ... */` (closing delimiter included, or to EOF) or
    /// `-- ...` up to but not including the next line break, so the newline
    /// survives into the sanitized text.
    fn skip_comment(&mut self) -> bool {
        match self.current() {
            b'/' if self.peek_byte() == Some(b'*') => {
                self.pos += 2;
                while !self.is_eof() {
                    if self.current() == b'*' && self.peek_byte() == Some(b'/') {
                        self.pos += 2;
                        return true;
                    }
                    self.pos += 1;
                }
                true
            }
            b'-' if self.peek_byte() == Some(b'-') => {
                self.pos += 2;
                while !self.is_eof() && !matches!(self.current(), b'\r' | b'\n') {
                    self.pos += 1;
                }
                true
            }
            _ => false,
        }
    }

    /// `'...'` with `''` doubling inside; an unterminated literal runs to
    /// EOF. Consumes the span without writing; the caller emits the `?`.
    fn scan_string_literal(&mut self) -> bool {
        if self.current() != b'\'' {
            return false;
        }
        self.pos += 1;
        while !self.is_eof() {
            if self.current() == b'\'' {
                if self.peek_byte() == Some(b'\'') {
                    self.pos += 2;
                } else {
                    self.pos += 1;
                    break;
                }
            } else {
                self.pos += 1;
            }
        }
        true
    }

    /// `0x`/`0X` plus a maximal hex run. A bare `0x` still matches.
    fn scan_hex_literal(&mut self) -> bool {
        if self.current() != b'0' || !matches!(self.peek_byte(), Some(b'x' | b'X')) {
            return false;
        }
        self.pos += 2;
        while !self.is_eof() && self.current().is_ascii_hexdigit() {
            self.pos += 1;
        }
        true
    }

    /// Sign and leading decimal point participate only when the look-ahead
    /// holds, so a bare `-` or `.` falls through to the verbatim rule.
    fn scan_numeric_literal(&mut self) -> bool {
        let mut probe = self.pos;
        let mut seen_dot = false;

        if matches!(self.bytes[probe], b'+' | b'-') {
            match self.bytes.get(probe + 1) {
                Some(b) if b.is_ascii_digit() || *b == b'.' => probe += 1,
                _ => return false,
            }
        }
        if self.bytes[probe] == b'.' {
            match self.bytes.get(probe + 1) {
                Some(b) if b.is_ascii_digit() => {
                    seen_dot = true;
                    probe += 1;
                }
                _ => return false,
            }
        }
        if !self.bytes[probe].is_ascii_digit() {
            return false;
        }

        self.pos = probe + 1;
        let mut seen_exponent = false;
        while !self.is_eof() {
            match self.current() {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.pos += 1;
                }
                b'e' | b'E' if !seen_exponent => {
                    seen_exponent = true;
                    self.pos += 1;
                    if !self.is_eof() && matches!(self.current(), b'+' | b'-') {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        true
    }

    /// Keyword, identifier, or verbatim copy.
    fn write_token(&mut self) {
        let b = self.current();
        if b.is_ascii_alphabetic() || b == b'_' {
            self.write_word();
        } else {
            self.write_verbatim_char();
        }
    }

    fn write_verbatim_char(&mut self) {
        // pos is always a character boundary here: the scan rules only stop
        // on ASCII bytes, and this rule advances by whole characters.
        match self.input[self.pos..].chars().next() {
            Some(ch) => {
                self.sanitized.push(ch);
                self.pos += ch.len_utf8();
            }
            None => self.pos = self.bytes.len(),
        }
    }

    /// A maximal `[A-Za-z0-9_]` word run: keyword on a table hit, identifier
    /// otherwise. The word boundary is what keeps `SELECTED` from firing
    /// `SELECT`.
    fn write_word(&mut self) {
        let start = self.pos;
        while !self.is_eof() && is_word_byte(self.current()) {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];

        match keyword::lookup(word) {
            Some(kw) if kw.is_operation() => {
                self.sanitized.push_str(word);
                self.push_summary_separated(word);
                // UPDATE's target follows the verb directly; the other
                // operations hand capture to FROM/INTO/JOIN.
                self.capture_target = kw == Keyword::Update;
                self.in_from_clause = false;
            }
            Some(kw) if kw.is_ddl_verb() => {
                self.sanitized.push_str(word);
                self.write_ddl_tail(word);
            }
            Some(Keyword::Into) => {
                self.sanitized.push_str(word);
                self.push_summary_separated(word);
                self.capture_target = true;
            }
            Some(Keyword::From) => {
                self.sanitized.push_str(word);
                self.capture_target = true;
                self.in_from_clause = true;
            }
            Some(Keyword::Join) => {
                self.sanitized.push_str(word);
                self.capture_target = true;
            }
            // DDL object keywords outside their DDL slot, and everything
            // unknown, read as identifiers. Identifiers keep consuming
            // across `.` so qualified names stay one token.
            _ => {
                while !self.is_eof() && is_ident_byte(self.current()) {
                    self.pos += 1;
                }
                self.write_identifier(start);
            }
        }
    }

    fn write_identifier(&mut self, start: usize) {
        let ident = &self.input[start..self.pos];
        self.sanitized.push_str(ident);
        if self.capture_target {
            self.capture_target = false;
            self.push_summary_separated(ident);
        }
        if self.in_from_clause && !self.is_eof() && self.current() == b',' {
            self.capture_target = true;
        }
    }

    /// The verb itself was copied to `sanitized` by the caller. Normalize it
    /// into the summary, carry the following whitespace, then look for the
    /// object keyword that owns the target identifier.
    fn write_ddl_tail(&mut self, verb: &str) {
        self.push_summary_normalized(verb);

        let ws_start = self.pos;
        while !self.is_eof() && self.current().is_ascii_whitespace() {
            self.pos += 1;
        }
        let ws = &self.input[ws_start..self.pos];
        self.sanitized.push_str(ws);
        self.push_summary_normalized(ws);

        if let Some(object) = self.scan_ddl_object() {
            self.sanitized.push_str(object);
            self.push_summary_normalized(object);
            self.capture_target = true;
        }
    }

    /// Matches TABLE/INDEX/PROCEDURE/VIEW/DATABASE at the cursor,
    /// word-bounded and case-insensitive. Consumes and returns the
    /// original-case text on a hit; leaves the cursor alone on a miss so
    /// the main loop rescans the word.
    fn scan_ddl_object(&mut self) -> Option<&'a str> {
        if self.is_eof() {
            return None;
        }
        let b = self.current();
        if !(b.is_ascii_alphabetic() || b == b'_') {
            return None;
        }
        let mut end = self.pos;
        while end < self.bytes.len() && is_word_byte(self.bytes[end]) {
            end += 1;
        }
        let word = &self.input[self.pos..end];
        match keyword::lookup(word) {
            Some(kw) if kw.is_ddl_object() => {
                self.pos = end;
                Some(word)
            }
            _ => None,
        }
    }

    /// Space-separated summary append (the DML rule): one `' '` before
    /// `text` when the summary already has content.
    fn push_summary_separated(&mut self, text: &str) {
        if !self.summary.is_empty() {
            self.summary.push(' ');
        }
        self.summary.push_str(text);
    }

    /// Whitespace-normalized summary append (the DDL rule): a whitespace
    /// character is dropped while the summary is empty or already ends in
    /// whitespace; everything else appends as-is.
    fn push_summary_normalized(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace()
                && (self.summary.is_empty() || self.summary.ends_with(char::is_whitespace))
            {
                continue;
            }
            self.summary.push(ch);
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_ident_byte(b: u8) -> bool {
    is_word_byte(b) || b == b'.'
}
