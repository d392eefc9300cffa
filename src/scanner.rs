// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! Single-pass scanner for the version grammar:
//!
//! ```text
//! version  := number '.' number '.' number [ '-' part ] [ '+' part ]
//! part     := label [ '.' number ]
//! label    := [0-9A-Za-z-]+
//! number   := [0-9]+
//! ```
//!
//! The whole input must match; nothing is skipped or trimmed.

use crate::error::ParseErrorKind;

/// A label with its explicit counter, if the input had one
pub type Part<'a> = (&'a str, Option<u64>);

/// Borrowed pieces of a version string, before defaults are applied
#[derive(Debug, PartialEq, Eq)]
pub struct Parts<'a> {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<Part<'a>>,
    pub metadata: Option<Part<'a>>,
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn unexpected(&self) -> ParseErrorKind {
        match self.input[self.pos..].chars().next() {
            Some(c) => ParseErrorKind::UnexpectedChar(c, self.pos),
            None => ParseErrorKind::Incomplete(self.pos),
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseErrorKind> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn number(&mut self) -> Result<u64, ParseErrorKind> {
        let start = self.pos;
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(self.unexpected());
        }
        // Only overflow can fail here
        digits
            .parse::<u64>()
            .map_err(|_| ParseErrorKind::Overflow(start))
    }

    fn label(&mut self) -> Result<&'a str, ParseErrorKind> {
        let label = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'-');
        if label.is_empty() {
            return Err(self.unexpected());
        }
        Ok(label)
    }

    fn part(&mut self) -> Result<Part<'a>, ParseErrorKind> {
        let label = self.label()?;
        let counter = if self.eat(b'.') {
            Some(self.number()?)
        } else {
            None
        };
        Ok((label, counter))
    }
}

pub fn scan(input: &str) -> Result<Parts<'_>, ParseErrorKind> {
    if input.is_empty() {
        return Err(ParseErrorKind::Empty);
    }
    let mut s = Scanner { input, pos: 0 };
    let major = s.number()?;
    s.expect(b'.')?;
    let minor = s.number()?;
    s.expect(b'.')?;
    let patch = s.number()?;
    let prerelease = if s.eat(b'-') { Some(s.part()?) } else { None };
    let metadata = if s.eat(b'+') { Some(s.part()?) } else { None };
    if s.pos != input.len() {
        return Err(s.unexpected());
    }
    Ok(Parts {
        major,
        minor,
        patch,
        prerelease,
        metadata,
    })
}

#[test]
fn test_scan_full() {
    assert_eq!(
        scan("10.20.30-rc-x.4+build.7"),
        Ok(Parts {
            major: 10,
            minor: 20,
            patch: 30,
            prerelease: Some(("rc-x", Some(4))),
            metadata: Some(("build", Some(7))),
        })
    );
    assert_eq!(
        scan("1.2.3+exp"),
        Ok(Parts {
            major: 1,
            minor: 2,
            patch: 3,
            prerelease: None,
            metadata: Some(("exp", None)),
        })
    );
}

#[test]
fn test_scan_errors() {
    use ParseErrorKind::*;
    assert_eq!(scan(""), Err(Empty));
    assert_eq!(scan("zxv8d"), Err(UnexpectedChar('z', 0)));
    assert_eq!(scan("1.0"), Err(Incomplete(3)));
    assert_eq!(scan("1.0."), Err(Incomplete(4)));
    assert_eq!(scan("1..0"), Err(UnexpectedChar('.', 2)));
    assert_eq!(scan(" 1.0.0"), Err(UnexpectedChar(' ', 0)));
    assert_eq!(scan("1.0.0 "), Err(UnexpectedChar(' ', 5)));
    assert_eq!(scan("1.0.0-"), Err(Incomplete(6)));
    assert_eq!(scan("1.0.0-alpha."), Err(Incomplete(12)));
    assert_eq!(scan("1.0.0-alpha.x"), Err(UnexpectedChar('x', 12)));
    assert_eq!(scan("1.0.0-alpha.1.2"), Err(UnexpectedChar('.', 13)));
    assert_eq!(scan("1.0.0+build-ü"), Err(UnexpectedChar('ü', 12)));
    assert_eq!(scan("1.0.0+a+b"), Err(UnexpectedChar('+', 7)));
    assert_eq!(scan("18446744073709551616.0.0"), Err(Overflow(0)));
}
