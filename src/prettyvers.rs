// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use crate::version::Version;

/// Wrapper that prints a list of versions in canonical form, for logging
pub struct Versions<'a> {
    versions: &'a [&'a Version],
}

impl<'a> Versions<'a> {
    pub fn new(versions: &'a [&'a Version]) -> Versions<'a> {
        Versions { versions }
    }
}

impl std::fmt::Debug for Versions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let v = self
            .versions
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        write!(f, "{:?}", v)
    }
}

#[test]
fn test_versions_debug() -> anyhow::Result<()> {
    let a = Version::parse("1.0.0-rc.1")?;
    let b = Version::parse("1.0.0+build.2")?;
    let list = [&a, &b];
    assert_eq!(
        format!("{:?}", Versions::new(&list)),
        r#"["1.0.0-rc.1", "1.0.0+build.2"]"#
    );
    Ok(())
}
