use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;

/// Action applied to every configured repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunMode {
    /// Add a star unless already starred.
    #[default]
    Star,
    /// Remove a star unless not starred.
    Unstar,
    /// Report starred state without mutating anything.
    Check,
}

impl RunMode {
    pub fn label(self) -> &'static str {
        match self {
            RunMode::Star => "star",
            RunMode::Unstar => "unstar",
            RunMode::Check => "check",
        }
    }
}

impl FromStr for RunMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "star" => Ok(RunMode::Star),
            "unstar" => Ok(RunMode::Unstar),
            "check" => Ok(RunMode::Check),
            _ => Err(AppError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
