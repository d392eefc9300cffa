// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! The [`BumpKind`] selector for [`Version::bump`](crate::Version::bump).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum BumpKind {
    /// Increment major, reset minor and patch
    Major,
    /// Increment minor, reset patch
    Minor,
    Patch,
    /// Increment the prerelease counter, labelling it "alpha" if unset
    Prerelease,
    /// Label the metadata "build" and increment its counter
    Build,
}

impl BumpKind {
    pub const ALL: [BumpKind; 5] = [
        BumpKind::Major,
        BumpKind::Minor,
        BumpKind::Patch,
        BumpKind::Prerelease,
        BumpKind::Build,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Prerelease => "prerelease",
            BumpKind::Build => "build",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BumpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::BumpKindParsing(s.into()))
    }
}

impl serde::Serialize for BumpKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for BumpKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[test]
fn test_bumpkind_from_str() -> anyhow::Result<()> {
    assert_eq!("major".parse::<BumpKind>()?, BumpKind::Major);
    assert_eq!("Prerelease".parse::<BumpKind>()?, BumpKind::Prerelease);
    assert_eq!(
        "feature".parse::<BumpKind>(),
        Err(Error::BumpKindParsing("feature".into()))
    );
    for kind in BumpKind::ALL {
        assert_eq!(kind.to_string().parse::<BumpKind>()?, kind);
    }
    Ok(())
}

#[test]
fn test_bumpkind_serde() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_string(&BumpKind::Build)?, "\"build\"");
    let kinds: Vec<BumpKind> = serde_json::from_str(r#"["minor", "patch"]"#)?;
    assert_eq!(kinds, [BumpKind::Minor, BumpKind::Patch]);
    assert!(serde_json::from_str::<BumpKind>("\"huge\"").is_err());
    Ok(())
}
