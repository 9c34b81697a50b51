//! `owner/repo` references parsed from GitHub URLs

use super::GITHUB_URL_PREFIX;
use crate::{CoreError, Result};
use std::fmt;

/// A repository on github.com
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `https://github.com/owner/repo`, tolerating a `.git` suffix,
    /// a trailing slash, and deeper paths such as `/tree/main`.
    pub fn parse(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix(GITHUB_URL_PREFIX)
            .ok_or_else(|| CoreError::invalid_input(format!("Not a GitHub URL: {}", url)))?;

        let rest = rest.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let mut segments = rest.split('/').filter(|s| !s.is_empty());

        let owner = segments.next();
        let name = segments.next().map(|n| n.strip_suffix(".git").unwrap_or(n));

        match (owner, name) {
            (Some(owner), Some(name)) if !name.is_empty() => Ok(Self::new(owner, name)),
            _ => Err(CoreError::invalid_input(format!(
                "GitHub URL must include owner and repository: {}",
                url
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let repo = RepoRef::parse("https://github.com/acme/widgets").unwrap();
        assert_eq!(repo, RepoRef::new("acme", "widgets"));
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_parse_variants() {
        for url in [
            "https://github.com/acme/widgets.git",
            "https://github.com/acme/widgets/",
            "https://github.com/acme/widgets/tree/main/src",
            "https://github.com/acme/widgets?tab=readme",
        ] {
            assert_eq!(
                RepoRef::parse(url).unwrap(),
                RepoRef::new("acme", "widgets"),
                "{}",
                url
            );
        }
    }

    #[test]
    fn test_parse_rejects_incomplete() {
        assert!(RepoRef::parse("https://github.com/acme").is_err());
        assert!(RepoRef::parse("https://github.com/").is_err());
        assert!(RepoRef::parse("https://gitlab.com/acme/widgets").is_err());
    }
}
