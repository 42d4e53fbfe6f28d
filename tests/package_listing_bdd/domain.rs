//! Domain wrapper types for the package listing BDD tests.

use std::fmt;
use std::str::FromStr;

/// Count of packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PackageCount(usize);

impl PackageCount {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for PackageCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(Self)
    }
}

impl fmt::Display for PackageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of packages served per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageSize(usize);

impl PageSize {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<usize>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("PageSize must be >= 1".to_owned());
        }

        Ok(Self(value))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page number (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageNumber(u32);

impl PageNumber {
    pub(crate) const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for PageNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u32>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("PageNumber must be >= 1".to_owned());
        }

        Ok(Self(value))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Count of HTTP requests received by the mock server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestCount(usize);

impl RequestCount {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for RequestCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(Self)
    }
}

impl fmt::Display for RequestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `user/repo` pair named by a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RepositorySlug {
    user: String,
    repo: String,
}

impl RepositorySlug {
    pub(crate) fn user(&self) -> &str {
        &self.user
    }

    pub(crate) fn repo(&self) -> &str {
        &self.repo
    }

    /// Server path of the repository's package listing.
    pub(crate) fn packages_path(&self) -> String {
        format!("/api/v1/repos/{}/{}/packages.json", self.user, self.repo)
    }
}

impl FromStr for RepositorySlug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (user, repo) = s
            .trim_matches('"')
            .split_once('/')
            .ok_or_else(|| format!("expected user/repo, got {s}"))?;
        if user.is_empty() || repo.is_empty() {
            return Err(format!("expected user/repo, got {s}"));
        }

        Ok(Self {
            user: user.to_owned(),
            repo: repo.to_owned(),
        })
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.repo)
    }
}
