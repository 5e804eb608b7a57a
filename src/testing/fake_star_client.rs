use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{AppError, RateLimitStatus, RepositoryRef};
use crate::ports::{AuthenticatedUser, RepositoryInfo, Sleeper, StarClient};

/// One recorded interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Authenticate,
    IsStarred(String),
    Star(String),
    Unstar(String),
    RateLimit,
    Repository(String),
    Sleep(Duration),
}

#[derive(Debug, Clone)]
struct ScriptedError {
    message: String,
    status: Option<u16>,
}

impl ScriptedError {
    fn to_error(&self) -> AppError {
        AppError::api(self.message.clone(), self.status)
    }
}

struct FakeState {
    login: String,
    scopes: Option<Vec<String>>,
    auth_error: Option<ScriptedError>,
    starred: HashSet<String>,
    lookup_failures: HashMap<String, ScriptedError>,
    mutation_failures: HashMap<String, ScriptedError>,
    rate_limits: VecDeque<Result<RateLimitStatus, ScriptedError>>,
    default_rate_limit: RateLimitStatus,
    calls: Vec<Call>,
}

/// In-memory star host. Also implements [`Sleeper`] so pauses land in the same call log.
#[derive(Clone)]
pub struct FakeStarClient {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeStarClient {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl FakeStarClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                login: "octocat".to_string(),
                scopes: Some(vec!["public_repo".to_string()]),
                auth_error: None,
                starred: HashSet::new(),
                lookup_failures: HashMap::new(),
                mutation_failures: HashMap::new(),
                rate_limits: VecDeque::new(),
                default_rate_limit: RateLimitStatus {
                    remaining: 5000,
                    limit: 5000,
                    reset_epoch_seconds: 1_700_000_000,
                },
                calls: Vec::new(),
            })),
        }
    }

    pub fn with_login(self, login: &str) -> Self {
        self.state.lock().unwrap().login = login.to_string();
        self
    }

    pub fn with_scopes(self, scopes: &[&str]) -> Self {
        self.state.lock().unwrap().scopes = Some(scopes.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Authentication succeeds without reporting OAuth scopes.
    pub fn without_scopes(self) -> Self {
        self.state.lock().unwrap().scopes = None;
        self
    }

    pub fn rejecting_auth(self, message: &str, status: Option<u16>) -> Self {
        self.state.lock().unwrap().auth_error =
            Some(ScriptedError { message: message.to_string(), status });
        self
    }

    pub fn with_starred(self, repos: &[&str]) -> Self {
        self.state.lock().unwrap().starred.extend(repos.iter().map(|r| r.to_string()));
        self
    }

    /// State lookups (and repository metadata) for `repo` fail.
    pub fn failing_lookup(self, repo: &str, status: Option<u16>, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .lookup_failures
            .insert(repo.to_string(), ScriptedError { message: message.to_string(), status });
        self
    }

    /// Star and unstar calls for `repo` fail; lookups succeed.
    pub fn failing_mutation(self, repo: &str, status: Option<u16>, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .mutation_failures
            .insert(repo.to_string(), ScriptedError { message: message.to_string(), status });
        self
    }

    /// Quota answers consumed in order; afterwards the default status is returned.
    pub fn with_rate_limits(self, remaining: &[u64]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let reset = state.default_rate_limit.reset_epoch_seconds;
            for value in remaining {
                state.rate_limits.push_back(Ok(RateLimitStatus {
                    remaining: *value,
                    limit: 5000,
                    reset_epoch_seconds: reset,
                }));
            }
        }
        self
    }

    pub fn with_failing_rate_limit(self, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .rate_limits
            .push_back(Err(ScriptedError { message: message.to_string(), status: Some(500) }));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Sleep(duration) => Some(duration),
                _ => None,
            })
            .collect()
    }

    /// Repositories touched by star or unstar, in order.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Star(_) | Call::Unstar(_)))
            .collect()
    }

    pub fn is_starred_now(&self, repo: &str) -> bool {
        self.state.lock().unwrap().starred.contains(repo)
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl StarClient for FakeStarClient {
    fn authenticate(&self) -> Result<AuthenticatedUser, AppError> {
        self.record(Call::Authenticate);
        let state = self.state.lock().unwrap();
        if let Some(error) = &state.auth_error {
            return Err(error.to_error());
        }
        Ok(AuthenticatedUser { login: state.login.clone(), scopes: state.scopes.clone() })
    }

    fn is_starred(&self, repo: &RepositoryRef) -> Result<bool, AppError> {
        let key = repo.full_name();
        self.record(Call::IsStarred(key.clone()));
        let state = self.state.lock().unwrap();
        if let Some(error) = state.lookup_failures.get(&key) {
            return Err(error.to_error());
        }
        Ok(state.starred.contains(&key))
    }

    fn star(&self, repo: &RepositoryRef) -> Result<(), AppError> {
        let key = repo.full_name();
        self.record(Call::Star(key.clone()));
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.mutation_failures.get(&key) {
            return Err(error.to_error());
        }
        state.starred.insert(key);
        Ok(())
    }

    fn unstar(&self, repo: &RepositoryRef) -> Result<(), AppError> {
        let key = repo.full_name();
        self.record(Call::Unstar(key.clone()));
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.mutation_failures.get(&key) {
            return Err(error.to_error());
        }
        state.starred.remove(&key);
        Ok(())
    }

    fn rate_limit(&self) -> Result<RateLimitStatus, AppError> {
        self.record(Call::RateLimit);
        let mut state = self.state.lock().unwrap();
        match state.rate_limits.pop_front() {
            Some(Ok(status)) => Ok(status),
            Some(Err(error)) => Err(error.to_error()),
            None => Ok(state.default_rate_limit),
        }
    }

    fn repository(&self, repo: &RepositoryRef) -> Result<RepositoryInfo, AppError> {
        let key = repo.full_name();
        self.record(Call::Repository(key.clone()));
        let state = self.state.lock().unwrap();
        if let Some(error) = state.lookup_failures.get(&key) {
            return Err(error.to_error());
        }
        Ok(RepositoryInfo {
            full_name: key.clone(),
            description: Some(format!("Fake repository {}", key)),
            star_count: 7,
            primary_language: Some("Rust".to_string()),
            url: format!("https://github.com/{}", key),
        })
    }
}

impl Sleeper for FakeStarClient {
    fn sleep(&self, duration: Duration) {
        self.record(Call::Sleep(duration));
    }
}
