// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! Version ordering.
//!
//! Fields are compared in order, stopping at the first difference:
//! major, minor, patch, then the prerelease. A release sorts above any
//! prerelease of the same triple; two prereleases compare their labels
//! bytewise and then their counters.
//!
//! Metadata only takes part under [`Precedence::Metadata`], as a final
//! tie-break where a version without metadata sorts first.

use std::cmp::Ordering;

use tracing::event;
use tracing::instrument;
use tracing::Level;

use crate::prettyvers;
use crate::version::Version;

/// Which fields decide ordering and equality
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub enum Precedence {
    /// Triple and prerelease; metadata is ignored
    #[default]
    Release,
    /// Like [`Precedence::Release`], with metadata as the last tie-break
    Metadata,
}

/// Ordering of optional label+counter parts where absence wins
fn cmp_prerelease(a: Option<(&str, u64)>, b: Option<(&str, u64)>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

/// Ordering of optional label+counter parts where absence loses
fn cmp_metadata(a: Option<(&str, u64)>, b: Option<(&str, u64)>) -> Ordering {
    // Option's own ordering already puts None first
    a.cmp(&b)
}

pub fn compare_with(a: &Version, b: &Version, precedence: Precedence) -> Ordering {
    let release = a
        .major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| cmp_prerelease(a.prerelease_part(), b.prerelease_part()));
    match precedence {
        Precedence::Release => release,
        Precedence::Metadata => {
            release.then_with(|| cmp_metadata(a.metadata_part(), b.metadata_part()))
        }
    }
}

/// [`compare_with`] under [`Precedence::Release`]
pub fn compare(a: &Version, b: &Version) -> Ordering {
    compare_with(a, b, Precedence::Release)
}

pub fn less_than(a: &Version, b: &Version) -> bool {
    Comparator::default().less_than(a, b)
}

pub fn greater_than(a: &Version, b: &Version) -> bool {
    Comparator::default().greater_than(a, b)
}

pub fn equals(a: &Version, b: &Version) -> bool {
    Comparator::default().equals(a, b)
}

/// Comparison predicates bound to a [`Precedence`]
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Comparator {
    pub precedence: Precedence,
}

impl Comparator {
    pub fn new(precedence: Precedence) -> Comparator {
        Comparator { precedence }
    }

    pub fn compare(&self, a: &Version, b: &Version) -> Ordering {
        compare_with(a, b, self.precedence)
    }

    pub fn less_than(&self, a: &Version, b: &Version) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    pub fn greater_than(&self, a: &Version, b: &Version) -> bool {
        !self.less_than(a, b) && !self.equals(a, b)
    }

    pub fn equals(&self, a: &Version, b: &Version) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Stable ascending sort
    pub fn sort(&self, versions: &mut [Version]) {
        versions.sort_by(|a, b| self.compare(a, b));
    }

    /// The greatest version; the last one wins among equals
    #[instrument(level = "debug", skip(versions))]
    pub fn latest<'a>(
        &self,
        versions: impl IntoIterator<Item = &'a Version>,
    ) -> Option<&'a Version> {
        let versions = versions.into_iter().collect::<Vec<_>>();
        let latest = versions.iter().copied().max_by(|a, b| self.compare(a, b));
        match latest {
            Some(latest) => event!(
                Level::DEBUG,
                versions = ?prettyvers::Versions::new(&versions),
                latest = %latest,
                "selected latest",
            ),
            None => event!(Level::DEBUG, "no versions to select from"),
        }
        latest
    }
}

#[cfg(test)]
fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn test_release_outranks_prerelease() {
    assert!(less_than(&v("1.0.0-alpha.1"), &v("1.0.0")));
    assert!(greater_than(&v("1.0.0"), &v("1.0.0-zzz.99")));
    assert!(less_than(&v("0.9.9"), &v("1.0.0-alpha.1")));
}

#[test]
fn test_prerelease_label_then_counter() {
    assert!(less_than(&v("1.0.0-alpha.9"), &v("1.0.0-beta.1")));
    assert!(less_than(&v("1.0.0-rc.2"), &v("1.0.0-rc.10")));
    // Labels compare bytewise
    assert!(less_than(&v("1.0.0-RC.1"), &v("1.0.0-alpha.1")));
    assert!(less_than(&v("1.0.0-rc.1"), &v("1.0.0-rc-1.1")));
}

#[test]
fn test_irreflexive() {
    for s in ["1.0.0", "1.0.0-alpha.1", "1.0.0+build.1", "0.0.1-rc.1+x.2"] {
        let a = v(s);
        assert!(!less_than(&a, &a));
        assert!(!greater_than(&a, &a));
        assert!(equals(&a, &a));
    }
}

#[test]
fn test_release_ignores_metadata() {
    let plain = v("1.0.0");
    let built = v("1.0.0+build.1");
    assert!(equals(&plain, &built));
    assert!(!less_than(&plain, &built));
    assert!(!greater_than(&built, &plain));
}

#[test]
fn test_metadata_precedence() {
    let cmp = Comparator::new(Precedence::Metadata);
    let plain = v("1.0.0");
    let built = v("1.0.0+build.1");
    assert!(!cmp.equals(&plain, &built));
    assert!(cmp.less_than(&plain, &built));
    assert!(cmp.less_than(&built, &v("1.0.0+build.2")));
    assert!(cmp.less_than(&v("1.0.0+build.9"), &v("1.0.0+ci.1")));
    assert!(cmp.equals(&v("1.0.0+ci.3"), &v("1.0.0+ci.3")));
    // Metadata never overrides the prerelease
    assert!(cmp.less_than(&v("1.0.0-rc.1+zz.9"), &v("1.0.0+build.1")));
}

#[test]
fn test_sort_and_latest() {
    let mut versions = [
        "1.0.0",
        "1.0.0-rc.1",
        "0.9.0",
        "1.0.0-beta.2",
        "1.0.0+build.3",
    ]
    .into_iter()
    .map(v)
    .collect::<Vec<_>>();
    let cmp = Comparator::default();
    assert_eq!(
        cmp.latest(&versions).map(|l| l.to_string()),
        Some("1.0.0+build.3".into())
    );
    cmp.sort(&mut versions);
    let sorted = versions.iter().map(|l| l.to_string()).collect::<Vec<_>>();
    assert_eq!(
        sorted,
        ["0.9.0", "1.0.0-beta.2", "1.0.0-rc.1", "1.0.0", "1.0.0+build.3"]
    );
    let cmp = Comparator::new(Precedence::Metadata);
    versions.reverse();
    assert_eq!(
        cmp.latest(&versions).map(|l| l.to_string()),
        Some("1.0.0+build.3".into())
    );
    assert_eq!(cmp.latest(&Vec::new()), None);
}
