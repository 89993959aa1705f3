use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Serialize, Serializer};
use url::Url;

use crate::error::ReassignError;

/// A repository identified as `owner/name`.
///
/// Ordered so that collections of repositories iterate in a stable, sorted
/// order. Parses either from CLI input (validated) or from the API's
/// `repository_url` field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoName {
    pub owner: String,
    pub name: String,
}

impl RepoName {
    /// Extract `owner/name` from a `repository_url` such as
    /// `https://api.github.com/repos/octocat/hello-world`.
    ///
    /// Returns `None` when the URL does not carry at least two path segments;
    /// a shorter URL cannot name a repository.
    pub fn from_api_url(url: &str) -> Option<Self> {
        let url = Url::parse(url).ok()?;
        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
        match segments[..] {
            [.., owner, name] => Some(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = ReassignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(r"^([A-Za-z0-9][A-Za-z0-9-]*)/([A-Za-z0-9._-]+)$").unwrap();
        let caps = re
            .captures(s)
            .ok_or_else(|| ReassignError::InvalidRepo(s.to_string()))?;
        Ok(Self {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }
}

impl Serialize for RepoName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_repo() {
        let repo: RepoName = "octocat/hello-world".parse().unwrap();
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.to_string(), "octocat/hello-world");
    }

    #[test]
    fn test_parse_repo_with_dots() {
        let repo: RepoName = "rust-lang/rust.vim".parse().unwrap();
        assert_eq!(repo.name, "rust.vim");
    }

    #[test]
    fn test_parse_rejects_missing_slash() {
        assert!("hello-world".parse::<RepoName>().is_err());
    }

    #[test]
    fn test_parse_rejects_extra_segments() {
        assert!("a/b/c".parse::<RepoName>().is_err());
        assert!("".parse::<RepoName>().is_err());
    }

    #[test]
    fn test_from_api_url() {
        let repo = RepoName::from_api_url("https://api.github.com/repos/octocat/hello-world")
            .unwrap();
        assert_eq!(repo.to_string(), "octocat/hello-world");
    }

    #[test]
    fn test_from_api_url_trailing_slash() {
        let repo = RepoName::from_api_url("https://api.github.com/repos/a/b/").unwrap();
        assert_eq!(repo.to_string(), "a/b");
    }

    #[test]
    fn test_from_api_url_too_short() {
        assert!(RepoName::from_api_url("https://api.github.com/octocat").is_none());
        assert!(RepoName::from_api_url("not a url").is_none());
    }

    #[test]
    fn test_ordering_is_stable() {
        let mut repos: Vec<RepoName> = ["b/a", "a/z", "a/b"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        repos.sort();
        let names: Vec<String> = repos.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["a/b", "a/z", "b/a"]);
    }
}
