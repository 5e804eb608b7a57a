use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::domain::AppError;

const GIT_SUFFIX: &str = ".git";

/// A validated `owner/name` pair identifying one hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Build a reference from already-split parts.
    pub fn new(owner: &str, name: &str) -> Result<Self, AppError> {
        if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
            return Err(AppError::InvalidRepository(format!("{}/{}", owner, name)));
        }
        Ok(Self { owner: owner.to_string(), name: name.to_string() })
    }

    /// Parse an `owner/name` string or a repository URL.
    ///
    /// URLs of the form `scheme://host/<owner>/<name>[.git][/...][?...][#...]` yield the
    /// first two path segments, with a trailing `.git` stripped from the name. Any other
    /// input must split on `/` into exactly two non-empty segments.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(AppError::InvalidRepository(raw.to_string()));
        }

        if input.contains("://") {
            return parse_url(input).ok_or_else(|| AppError::InvalidRepository(raw.to_string()));
        }

        match input.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self { owner: owner.to_string(), name: name.to_string() })
            }
            _ => Err(AppError::InvalidRepository(raw.to_string())),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

fn parse_url(input: &str) -> Option<RepositoryRef> {
    let url = Url::parse(input).ok()?;
    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
    let owner = segments.next()?;
    let name = segments.next()?;
    let name = name.strip_suffix(GIT_SUFFIX).unwrap_or(name);

    if name.is_empty() {
        return None;
    }

    Some(RepositoryRef { owner: owner.to_string(), name: name.to_string() })
}

impl FromStr for RepositoryRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
