//! Read-only commands: check, info, limits, diagnose.

use crate::app::api::{self, ConfigCheckReport, RepositoryInfo, TokenDiagnosis};
use crate::domain::{AppError, LoadedConfig, RateLimitStatus, RunConfig};

pub fn run_check(loaded: &LoadedConfig) -> Result<(), AppError> {
    let report = api::check_config(loaded)?;
    print!("{}", render_check(&loaded.config, &report));
    Ok(())
}

pub fn run_info(config: &RunConfig, repository: &str) -> Result<(), AppError> {
    let info = api::repository_info(config, repository)?;
    print!("{}", render_info(&info));
    Ok(())
}

pub fn run_limits(config: &RunConfig) -> Result<(), AppError> {
    let status = api::rate_limit(config)?;
    println!("{}", render_rate_limit(&status));
    Ok(())
}

pub fn run_diagnose(config: &RunConfig) -> Result<(), AppError> {
    let diagnosis = api::diagnose(config)?;
    print!("{}", render_diagnosis(&diagnosis));
    Ok(())
}

fn render_rate_limit(status: &RateLimitStatus) -> String {
    format!("Rate limit: {}/{} (resets {})", status.remaining, status.limit, status.reset_display())
}

fn render_check(config: &RunConfig, report: &ConfigCheckReport) -> String {
    let mut out = String::new();
    let token = if report.token_format_ok { "present" } else { "present (unusual format)" };
    out.push_str(&format!("Token:         {}\n", token));
    out.push_str(&format!("Authenticated: {}\n", report.login));
    out.push_str(&format!(
        "Repositories:  {} valid, {} invalid\n",
        report.valid_repositories.len(),
        report.invalid_repositories.len()
    ));
    for raw in &report.invalid_repositories {
        out.push_str(&format!("  invalid: '{}'\n", raw));
    }
    out.push_str(&format!("Interval:      {}s\n", config.interval.as_secs()));
    out.push_str(&format!("Mode:          {}\n", config.mode));
    match &config.batching {
        Some(policy) => out.push_str(&format!(
            "Batching:      {} per batch, {}s pause\n",
            policy.batch_size,
            policy.batch_pause.as_secs()
        )),
        None => out.push_str("Batching:      off\n"),
    }
    if let Some(status) = &report.rate_limit {
        out.push_str(&format!("{}\n", render_rate_limit(status)));
    }
    for warning in &report.warnings {
        out.push_str(&format!("⚠️  {}\n", warning));
    }
    out.push_str("✅ Configuration is valid\n");
    out
}

fn render_info(info: &RepositoryInfo) -> String {
    let mut out = format!("{}\n", info.full_name);
    if let Some(description) = &info.description {
        out.push_str(&format!("  {}\n", description));
    }
    out.push_str(&format!("  Stars:    {}\n", info.star_count));
    out.push_str(&format!(
        "  Language: {}\n",
        info.primary_language.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&format!("  URL:      {}\n", info.url));
    out
}

fn render_diagnosis(diagnosis: &TokenDiagnosis) -> String {
    let mut out = format!("Authenticated as {}\n", diagnosis.login);
    if !diagnosis.token_format_ok {
        out.push_str("⚠️  Token does not look like a GitHub token\n");
    }
    match &diagnosis.scopes {
        Some(scopes) if scopes.is_empty() => out.push_str("Scopes: (none)\n"),
        Some(scopes) => out.push_str(&format!("Scopes: {}\n", scopes.join(", "))),
        None => out.push_str("Scopes: not reported (fine-grained token)\n"),
    }
    match diagnosis.can_star() {
        Some(true) => out.push_str("✅ Token can star repositories\n"),
        Some(false) => {
            out.push_str("❌ Token lacks the public_repo or repo scope needed to star\n")
        }
        None => out.push_str("⚠️  Starring permission could not be determined from scopes\n"),
    }
    if let Some(status) = &diagnosis.rate_limit {
        out.push_str(&format!("{}\n", render_rate_limit(status)));
    }
    out
}
