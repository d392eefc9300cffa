// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! The [`Version`] type: `major.minor.patch[-label.counter][+label.counter]`

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use tracing::event;
use tracing::instrument;
use tracing::Level;

use crate::bump::BumpKind;
use crate::compare;
use crate::error::Error;
use crate::error::Result;
use crate::scanner;

pub const DEFAULT_PRERELEASE: &str = "alpha";
pub const DEFAULT_METADATA: &str = "build";

/// A parsed version.
///
/// Equality, hashing and ordering ignore the metadata; use
/// [`compare::Precedence::Metadata`] to take it into account.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    prerelease: Option<String>,
    prerelease_counter: u64,
    metadata: Option<String>,
    metadata_counter: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Version {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            prerelease_counter: 0,
            metadata: None,
            metadata_counter: 0,
        }
    }

    #[instrument(level = "debug")]
    pub fn parse(input: &str) -> Result<Version> {
        let parts = scanner::scan(input).map_err(|reason| {
            event!(Level::DEBUG, input = input, reason = %reason, "invalid version");
            Error::VersionParsing {
                input: input.into(),
                reason,
            }
        })?;
        let mut version = Version::new(parts.major, parts.minor, parts.patch);
        if let Some((label, counter)) = parts.prerelease {
            version.set_prerelease(label);
            if let Some(counter) = counter {
                version.prerelease_counter = counter;
            }
        }
        if let Some((label, counter)) = parts.metadata {
            version.set_metadata(label);
            if let Some(counter) = counter {
                version.metadata_counter = counter;
            }
        }
        Ok(version)
    }

    /// Go back to 0.0.1, dropping prerelease and metadata
    pub fn reset(&mut self) {
        *self = Version::default();
    }

    /// Numbers saturate: a component already at `u64::MAX` stays there,
    /// and the lower components it would reset are left alone too.
    pub fn bump(&mut self, kind: BumpKind) {
        match kind {
            BumpKind::Major => {
                if let Some(major) = self.major.checked_add(1) {
                    self.major = major;
                    self.minor = 0;
                    self.patch = 0;
                }
            }
            BumpKind::Minor => {
                if let Some(minor) = self.minor.checked_add(1) {
                    self.minor = minor;
                    self.patch = 0;
                }
            }
            BumpKind::Patch => {
                self.patch = self.patch.saturating_add(1);
            }
            BumpKind::Prerelease => {
                if self.prerelease.is_none() {
                    self.set_prerelease(DEFAULT_PRERELEASE);
                }
                self.prerelease_counter = self.prerelease_counter.saturating_add(1);
            }
            BumpKind::Build => {
                self.set_metadata(DEFAULT_METADATA);
                self.metadata_counter = self.metadata_counter.saturating_add(1);
            }
        }
    }

    pub fn bump_major(&mut self) {
        self.bump(BumpKind::Major)
    }

    pub fn bump_minor(&mut self) {
        self.bump(BumpKind::Minor)
    }

    pub fn bump_patch(&mut self) {
        self.bump(BumpKind::Patch)
    }

    /// A version without a prerelease goes to `-alpha.2`: labelling seeds
    /// the counter with 1, and the bump itself adds one more.
    pub fn bump_prerelease(&mut self) {
        self.bump(BumpKind::Prerelease)
    }

    /// Always relabels the metadata as "build"; counts like
    /// [`Version::bump_prerelease`].
    pub fn bump_build(&mut self) {
        self.bump(BumpKind::Build)
    }

    /// Set the prerelease label, "alpha" if empty. The counter is only
    /// touched if it was never set.
    pub fn set_prerelease(&mut self, label: &str) {
        self.prerelease = Some(label_or(label, DEFAULT_PRERELEASE));
        if self.prerelease_counter == 0 {
            self.prerelease_counter = 1;
        }
    }

    /// Set the metadata label, "build" if empty. See [`Version::set_prerelease`].
    pub fn set_metadata(&mut self, label: &str) {
        self.metadata = Some(label_or(label, DEFAULT_METADATA));
        if self.metadata_counter == 0 {
            self.metadata_counter = 1;
        }
    }

    /// Turn a prerelease into its release
    pub fn clear_prerelease(&mut self) {
        self.prerelease = None;
        self.prerelease_counter = 0;
    }

    pub fn clear_metadata(&mut self) {
        self.metadata = None;
        self.metadata_counter = 0;
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn prerelease_counter(&self) -> u64 {
        self.prerelease_counter
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    pub fn metadata_counter(&self) -> u64 {
        self.metadata_counter
    }

    /// Prerelease label and counter, when present
    pub(crate) fn prerelease_part(&self) -> Option<(&str, u64)> {
        self.prerelease
            .as_deref()
            .map(|label| (label, self.prerelease_counter))
    }

    pub(crate) fn metadata_part(&self) -> Option<(&str, u64)> {
        self.metadata
            .as_deref()
            .map(|label| (label, self.metadata_counter))
    }

    /// Canonical rendering; same as `to_string()`
    pub fn format(&self) -> String {
        self.to_string()
    }

    pub fn less_than(&self, other: &Version) -> bool {
        compare::less_than(self, other)
    }

    pub fn greater_than(&self, other: &Version) -> bool {
        compare::greater_than(self, other)
    }

    pub fn equals(&self, other: &Version) -> bool {
        compare::equals(self, other)
    }
}

fn label_or(label: &str, default: &str) -> String {
    if label.is_empty() {
        default.into()
    } else {
        label.into()
    }
}

impl Default for Version {
    /// 0.0.1, not 0.0.0
    fn default() -> Self {
        Version::new(0, 0, 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some((label, counter)) = self.prerelease_part() {
            write!(f, "-{}.{}", label, counter)?;
        }
        if let Some((label, counter)) = self.metadata_part() {
            write!(f, "+{}.{}", label, counter)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Version::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease_part().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare::compare(self, other)
    }
}

impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The two types don't order prereleases the same way: here labels compare
/// bytewise, so `1.0.0-2.1 > 1.0.0-10.1`, while `semver` compares numeric
/// identifiers as numbers and puts `1.0.0-2.1` first.
impl TryFrom<&Version> for semver::Version {
    type Error = Error;

    fn try_from(version: &Version) -> Result<Self, Self::Error> {
        let s = version.to_string();
        semver::Version::parse(&s).map_err(|e| Error::Semver {
            version: s,
            reason: e.to_string(),
        })
    }
}

impl TryFrom<&semver::Version> for Version {
    type Error = Error;

    /// Only works for single-label prerelease and metadata, each with an
    /// optional numeric counter.
    fn try_from(version: &semver::Version) -> Result<Self, Self::Error> {
        let s = version.to_string();
        Version::parse(&s).map_err(|e| Error::Semver {
            reason: e.to_string(),
            version: s,
        })
    }
}

#[cfg(test)]
const BASE_VERSION: &str = "1.0.0";

#[test]
fn test_parse_invalid() {
    for input in ["", "zxv8d", "1.0", "v1.0.0", "1.0.0-alpha.beta.1", "1.0.0-a_b"] {
        let err = Version::parse(input).unwrap_err();
        assert!(err.is_parse_error(), "{}: {}", input, err);
    }
}

#[test]
fn test_format_roundtrip() -> anyhow::Result<()> {
    for s in [
        BASE_VERSION,
        "2.0.0",
        "1.1.0",
        "1.0.1",
        "1.0.0-alpha.2",
        "1.0.0+build.2",
        "1.0.0-alpha.1+build.1",
        "0.0.0-rc-1.0+sha-4f2a.17",
    ] {
        assert_eq!(Version::parse(s)?.format(), s);
    }
    Ok(())
}

#[test]
fn test_parse_all_fields() -> anyhow::Result<()> {
    let v = Version::parse("1.0.0-alpha.1+build.1")?;
    assert_eq!((v.major, v.minor, v.patch), (1, 0, 0));
    assert_eq!(v.prerelease(), Some("alpha"));
    assert_eq!(v.prerelease_counter(), 1);
    assert_eq!(v.metadata(), Some("build"));
    assert_eq!(v.metadata_counter(), 1);
    Ok(())
}

#[test]
fn test_parse_default_counters() -> anyhow::Result<()> {
    let v = Version::parse("3.2.1-beta+exp")?;
    assert_eq!(v.prerelease_counter(), 1);
    assert_eq!(v.metadata_counter(), 1);
    assert_eq!(v.to_string(), "3.2.1-beta.1+exp.1");
    let v = Version::parse("3.2.1-beta.0")?;
    assert_eq!(v.prerelease_counter(), 0);
    assert_eq!(v.to_string(), "3.2.1-beta.0");
    Ok(())
}

#[test]
fn test_default_and_reset() -> anyhow::Result<()> {
    assert_eq!(Version::default().to_string(), "0.0.1");
    let mut v = Version::parse("4.5.6-rc.3+build.9")?;
    v.reset();
    assert_eq!(v.to_string(), "0.0.1");
    assert!(!v.is_prerelease());
    assert!(!v.has_metadata());
    assert_eq!(v.prerelease_counter(), 0);
    assert_eq!(v.metadata_counter(), 0);
    Ok(())
}

#[test]
fn test_bump() -> anyhow::Result<()> {
    let cases = [
        (BumpKind::Major, "2.0.0"),
        (BumpKind::Minor, "1.1.0"),
        (BumpKind::Patch, "1.0.1"),
        (BumpKind::Prerelease, "1.0.0-alpha.2"),
        (BumpKind::Build, "1.0.0+build.2"),
    ];
    for (kind, expected) in cases {
        let mut v = Version::parse(BASE_VERSION)?;
        v.bump(kind);
        assert_eq!(v.to_string(), expected, "bump {}", kind);
    }
    let mut v = Version::parse("1.2.3")?;
    v.bump_minor();
    assert_eq!(v.to_string(), "1.3.0");
    v.bump_major();
    assert_eq!(v.to_string(), "2.0.0");
    v.bump_patch();
    v.bump_patch();
    assert_eq!(v.to_string(), "2.0.2");
    Ok(())
}

#[test]
fn test_bump_keeps_labels() -> anyhow::Result<()> {
    let mut v = Version::parse("1.0.0-beta.4+ci.7")?;
    v.bump_prerelease();
    assert_eq!(v.to_string(), "1.0.0-beta.5+ci.7");
    v.bump_build();
    assert_eq!(v.to_string(), "1.0.0-beta.5+build.8");
    v.bump_major();
    assert_eq!(v.to_string(), "2.0.0-beta.5+build.8");
    Ok(())
}

#[test]
fn test_explicit_prerelease_bump() -> anyhow::Result<()> {
    let mut v = Version::parse(BASE_VERSION)?;
    v.set_prerelease("alpha");
    v.bump_prerelease();
    assert_eq!(v.to_string(), "1.0.0-alpha.2");
    Ok(())
}

#[test]
fn test_set_labels() -> anyhow::Result<()> {
    let mut v = Version::parse(BASE_VERSION)?;
    v.set_metadata("dangerzone");
    assert_eq!(v.metadata(), Some("dangerzone"));
    v.set_metadata("");
    assert_eq!(v.metadata(), Some("build"));
    v.set_prerelease("beta");
    assert_eq!(v.prerelease(), Some("beta"));
    v.set_prerelease("");
    assert_eq!(v.prerelease(), Some("alpha"));
    assert_eq!(v.to_string(), "1.0.0-alpha.1+build.1");
    Ok(())
}

#[test]
fn test_relabel_keeps_counter() -> anyhow::Result<()> {
    let mut v = Version::parse("1.0.0-alpha.5+build.3")?;
    v.set_prerelease("rc");
    v.set_metadata("nightly");
    assert_eq!(v.to_string(), "1.0.0-rc.5+nightly.3");
    Ok(())
}

#[test]
fn test_clear() -> anyhow::Result<()> {
    let mut v = Version::parse("1.0.0-rc.2+build.3")?;
    v.clear_metadata();
    assert_eq!(v.to_string(), "1.0.0-rc.2");
    v.clear_prerelease();
    assert_eq!(v.to_string(), "1.0.0");
    v.bump_prerelease();
    assert_eq!(v.to_string(), "1.0.0-alpha.2");
    Ok(())
}

#[test]
fn test_eq_and_hash_ignore_metadata() -> anyhow::Result<()> {
    use std::collections::HashSet;
    let a = Version::parse(BASE_VERSION)?;
    let b = Version::parse("1.0.0+build.1")?;
    assert_eq!(a, b);
    assert!(a.equals(&b));
    let set = [a, b].into_iter().collect::<HashSet<_>>();
    assert_eq!(set.len(), 1);
    Ok(())
}

#[test]
fn test_from_str() -> anyhow::Result<()> {
    let v: Version = "1.2.3-rc.1".parse()?;
    assert_eq!(v, Version::try_from("1.2.3-rc.1")?);
    assert!("1.2".parse::<Version>().is_err());
    Ok(())
}

#[test]
fn test_serde() -> anyhow::Result<()> {
    let v = Version::parse("1.0.0-alpha.1+build.1")?;
    let json = serde_json::to_string(&v)?;
    assert_eq!(json, "\"1.0.0-alpha.1+build.1\"");
    let back: Version = serde_json::from_str(&json)?;
    assert_eq!(back.to_string(), v.to_string());
    assert!(serde_json::from_str::<Version>("\"1.x\"").is_err());
    Ok(())
}

#[test]
fn test_semver_interop() -> anyhow::Result<()> {
    let v = Version::parse("1.0.0-rc.2+build.5")?;
    let sv = semver::Version::try_from(&v)?;
    assert_eq!(sv.pre.as_str(), "rc.2");
    assert_eq!(sv.build.as_str(), "build.5");
    assert_eq!(Version::try_from(&sv)?.to_string(), "1.0.0-rc.2+build.5");
    let chained = semver::Version::parse("1.0.0-alpha.beta.1")?;
    match Version::try_from(&chained) {
        Err(Error::Semver { version, reason }) => {
            assert_eq!(version, "1.0.0-alpha.beta.1");
            assert!(reason.contains("unexpected character 'b'"), "{}", reason);
        }
        other => panic!("unexpected result {:?}", other),
    }
    Ok(())
}

#[test]
fn test_semver_rejects_leading_zero_label() -> anyhow::Result<()> {
    let v = Version::parse("1.0.0-01.1")?;
    let e = semver::Version::try_from(&v).unwrap_err();
    assert!(matches!(e, Error::Semver { ref version, .. } if version == "1.0.0-01.1"));
    assert!(!e.to_string().contains("single label"), "{}", e);
    Ok(())
}

#[test]
fn test_prerelease_order_differs_from_semver() -> anyhow::Result<()> {
    let two = Version::parse("1.0.0-2.1")?;
    let ten = Version::parse("1.0.0-10.1")?;
    assert!(two > ten);
    assert!(semver::Version::try_from(&two)? < semver::Version::try_from(&ten)?);
    Ok(())
}

#[test]
fn test_bump_saturates() -> anyhow::Result<()> {
    let mut v = Version::parse("18446744073709551615.4.5")?;
    v.bump_major();
    assert_eq!(v.to_string(), "18446744073709551615.4.5");
    let mut v = Version::parse("1.18446744073709551615.5")?;
    v.bump_minor();
    assert_eq!(v.to_string(), "1.18446744073709551615.5");
    let mut v = Version::parse("1.2.18446744073709551615")?;
    v.bump_patch();
    assert_eq!(v.to_string(), "1.2.18446744073709551615");
    let mut v = Version::parse("1.0.0-rc.18446744073709551615")?;
    v.bump_prerelease();
    assert_eq!(v.to_string(), "1.0.0-rc.18446744073709551615");
    let mut v = Version::parse("1.0.0+ci.18446744073709551615")?;
    v.bump_build();
    assert_eq!(v.to_string(), "1.0.0+build.18446744073709551615");
    Ok(())
}

#[test]
fn test_parse_leading_zeros() -> anyhow::Result<()> {
    assert_eq!(Version::parse("01.02.003")?.to_string(), "1.2.3");
    assert_eq!(Version::parse("1.0.0-rc.007")?.to_string(), "1.0.0-rc.7");
    assert_eq!(Version::parse("01.0.0")?, Version::parse("1.0.0")?);
    Ok(())
}
