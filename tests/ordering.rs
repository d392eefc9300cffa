// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use anyhow::Result;

use bumpver::compare;
use bumpver::Comparator;
use bumpver::Precedence;
use bumpver::Version;

const ORDERED: [&str; 10] = [
    "0.0.9",
    "0.1.0",
    "1.0.0-alpha.1",
    "1.0.0-beta.1",
    "1.0.0",
    "1.0.1-rc.1",
    "1.0.1-rc.2",
    "1.0.1",
    "1.1.0",
    "2.0.0",
];

const DISTINCT: [&str; 5] = [
    "1.0.1",
    "1.1.0",
    "2.0.0",
    "1.0.0-alpha.1",
    "1.0.0-beta.1+build.3",
];

fn parse_all(list: &[&str]) -> Result<Vec<Version>> {
    list.iter()
        .map(|s| Ok(Version::parse(s)?))
        .collect::<Result<Vec<_>>>()
}

#[test]
fn test_total_order() -> Result<()> {
    let versions = parse_all(&ORDERED)?;
    for precedence in [Precedence::Release, Precedence::Metadata] {
        let cmp = Comparator::new(precedence);
        for (i, a) in versions.iter().enumerate() {
            for (j, b) in versions.iter().enumerate() {
                assert_eq!(cmp.less_than(a, b), i < j, "{} < {}", a, b);
                assert_eq!(cmp.greater_than(a, b), i > j, "{} > {}", a, b);
                assert_eq!(cmp.equals(a, b), i == j, "{} == {}", a, b);
            }
        }
    }
    Ok(())
}

#[test]
fn test_ord_matches_predicates() -> Result<()> {
    let versions = parse_all(&ORDERED)?;
    for a in &versions {
        for b in &versions {
            assert_eq!(a < b, compare::less_than(a, b));
            assert_eq!(a > b, compare::greater_than(a, b));
            assert_eq!(a == b, compare::equals(a, b));
        }
    }
    let mut shuffled = versions.clone();
    shuffled.reverse();
    shuffled.sort();
    assert_eq!(shuffled, versions);
    Ok(())
}

#[test]
fn test_equals() -> Result<()> {
    let versions = parse_all(&DISTINCT)?;
    let again = parse_all(&DISTINCT)?;
    let base = Version::parse("1.0.0")?;
    for (i, a) in versions.iter().enumerate() {
        assert!(a.equals(&again[i]));
        assert!(!a.equals(&base), "{} != {}", a, base);
        for (j, b) in again.iter().enumerate() {
            if i != j {
                assert!(!a.equals(b), "{} != {}", a, b);
            }
        }
    }
    Ok(())
}

#[test]
fn test_metadata_equality_by_policy() -> Result<()> {
    let plain = Version::parse("1.0.0")?;
    let built = Version::parse("1.0.0+build.1")?;
    assert!(plain.equals(&built));
    assert_eq!(plain, built);
    let strict = Comparator::new(Precedence::Metadata);
    assert!(!strict.equals(&plain, &built));
    assert!(strict.equals(&built, &Version::parse("1.0.0+build.1")?));
    Ok(())
}

#[test]
fn test_predicates_are_consistent() -> Result<()> {
    let mut all = ORDERED.to_vec();
    all.extend(["1.0.0+build.1", "1.0.0-alpha.1+build.2", "1.0.0+ci.1"]);
    let versions = parse_all(&all)?;
    for precedence in [Precedence::Release, Precedence::Metadata] {
        let cmp = Comparator::new(precedence);
        for a in &versions {
            assert!(!cmp.less_than(a, a));
            assert!(!cmp.greater_than(a, a));
            for b in &versions {
                let outcomes = [cmp.less_than(a, b), cmp.equals(a, b), cmp.greater_than(a, b)];
                assert_eq!(outcomes.iter().filter(|o| **o).count(), 1, "{} vs {}", a, b);
                assert_eq!(cmp.less_than(a, b), cmp.greater_than(b, a));
            }
        }
    }
    Ok(())
}

#[test]
fn test_bump_sequence() -> Result<()> {
    let mut v = Version::default();
    assert_eq!(v.to_string(), "0.0.1");
    let mut previous = v.clone();
    for kind in ["patch", "minor", "prerelease", "prerelease", "major"] {
        v.bump(kind.parse()?);
        assert!(previous < v || kind == "prerelease", "{} after {}", v, previous);
        previous = v.clone();
    }
    assert_eq!(v.to_string(), "1.0.0-alpha.3");
    Ok(())
}
