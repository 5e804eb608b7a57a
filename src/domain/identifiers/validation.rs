use super::RepositoryRef;

/// Prefixes of classic GitHub tokens (personal, OAuth, user-to-server, server-to-server, refresh).
const CLASSIC_TOKEN_PREFIXES: [&str; 5] = ["ghp_", "gho_", "ghu_", "ghs_", "ghr_"];
const CLASSIC_TOKEN_MIN_LEN: usize = 40;
const FINE_GRAINED_TOKEN_PREFIX: &str = "github_pat_";

/// Result of validating a configured repository list.
///
/// Both lists preserve input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryValidation {
    pub valid: Vec<RepositoryRef>,
    pub invalid: Vec<String>,
}

/// Validate each raw entry, keeping the parsable ones in their original order.
pub fn validate_repositories<S: AsRef<str>>(raw: &[S]) -> RepositoryValidation {
    let mut validation = RepositoryValidation::default();

    for entry in raw {
        let entry = entry.as_ref();
        match RepositoryRef::parse(entry) {
            Ok(repo) => validation.valid.push(repo),
            Err(_) => validation.invalid.push(entry.to_string()),
        }
    }

    validation
}

/// Split a comma-separated repository list, trimming each entry.
///
/// Blank input yields an empty list; blank entries inside a non-blank list are kept
/// so validation can report them.
pub fn split_repository_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|entry| entry.trim().to_string()).collect()
}

/// Heuristic check for a well-formed GitHub token.
///
/// Only used for warnings; the host is the authority on whether a token works.
pub fn looks_like_github_token(token: &str) -> bool {
    if token.starts_with(FINE_GRAINED_TOKEN_PREFIX) {
        return token.len() > FINE_GRAINED_TOKEN_PREFIX.len();
    }
    CLASSIC_TOKEN_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
        && token.len() >= CLASSIC_TOKEN_MIN_LEN
}
