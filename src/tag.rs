// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! Versions out of git tags and refs, such as `v1.2.3` or
//! `refs/tags/v1.0.0-rc.1`.

use tracing::event;
use tracing::instrument;
use tracing::Level;

use crate::error::Error;
use crate::error::Result;
use crate::version::Version;

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Parse the version in a tag, accepting an optional `refs/tags/`
/// prefix and an optional `v`.
#[instrument(level = "debug")]
pub fn from_tag(tag: &str) -> Result<Version> {
    let re_tag = regex!(r"^(?:refs/tags/)?[vV]?(?P<version>[0-9].*)$");
    let m = re_tag
        .captures(tag)
        .ok_or_else(|| Error::TagParsing(tag.into()))?;
    Version::parse(&m["version"])
}

/// Parse all tags that carry a version, skipping the others
#[instrument(level = "debug", skip(tags))]
pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<Version> {
    tags.into_iter()
        .filter_map(|tag| match from_tag(tag) {
            Ok(version) => Some(version),
            Err(e) => {
                event!(Level::WARN, tag = tag, error = %e, "skipping tag");
                None
            }
        })
        .collect()
}

#[test]
fn test_from_tag() -> anyhow::Result<()> {
    assert_eq!(from_tag("v1.2.3")?.to_string(), "1.2.3");
    assert_eq!(from_tag("1.2.3")?.to_string(), "1.2.3");
    assert_eq!(from_tag("refs/tags/V1.0.0-rc.1")?.to_string(), "1.0.0-rc.1");
    assert_eq!(from_tag("latest"), Err(Error::TagParsing("latest".into())));
    assert!(from_tag("v1.2").unwrap_err().is_parse_error());
    Ok(())
}

#[test]
fn test_from_tags() {
    let tags = ["refs/tags/v0.1.0", "refs/tags/latest", "v0.2.0-beta", "v0.3"];
    let versions = from_tags(tags)
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>();
    assert_eq!(versions, ["0.1.0", "0.2.0-beta.1"]);
}
