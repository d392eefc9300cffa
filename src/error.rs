// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! [`Error`] and [`Result`] types.

use std::fmt;

use thiserror;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unable to parse version {input:?}: {reason}")]
    VersionParsing {
        input: String,
        reason: ParseErrorKind,
    },
    #[error("unknown bump kind {0:?}")]
    BumpKindParsing(String),
    #[error("no version found in tag {0:?}")]
    TagParsing(String),
    #[error("unable to convert {version} between version types: {reason}")]
    Semver { version: String, reason: String },
}

impl Error {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::VersionParsing { .. })
    }
}

/// What the scanner tripped on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Empty,
    /// Input ended at the byte offset while more was expected
    Incomplete(usize),
    UnexpectedChar(char, usize),
    Overflow(usize),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "empty input"),
            ParseErrorKind::Incomplete(pos) => write!(f, "input ends early at {}", pos),
            ParseErrorKind::UnexpectedChar(c, pos) => {
                write!(f, "unexpected character {:?} at {}", c, pos)
            }
            ParseErrorKind::Overflow(pos) => write!(f, "number too large at {}", pos),
        }
    }
}

#[test]
fn test_error_message() {
    let e = Error::VersionParsing {
        input: "1.x.0".into(),
        reason: ParseErrorKind::UnexpectedChar('x', 2),
    };
    assert!(e.is_parse_error());
    assert_eq!(
        e.to_string(),
        "unable to parse version \"1.x.0\": unexpected character 'x' at 2"
    );
    assert!(!Error::TagParsing("latest".into()).is_parse_error());
}
