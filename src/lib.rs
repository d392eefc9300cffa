// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! Parse, bump, format and compare versions of the form
//! `major.minor.patch[-label.counter][+label.counter]`.
//!
//! ```
//! use bumpver::Version;
//!
//! let mut v = Version::parse("1.0.0")?;
//! v.bump_prerelease();
//! assert_eq!(v.to_string(), "1.0.0-alpha.2");
//! assert!(v < Version::parse("1.0.0")?);
//! # Ok::<(), bumpver::Error>(())
//! ```

pub mod error;

mod scanner;

pub mod version;

pub mod bump;

pub mod compare;

pub mod tag;

pub mod prettyvers;

pub use bump::BumpKind;
pub use compare::{Comparator, Precedence};
pub use error::{Error, Result};
pub use version::Version;
