//! Common test utilities shared across integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use researchhub_core::logger::{LogLevel, Logger};
use researchhub_core::models::UserProfile;
use researchhub_core::{Credential, ProfileResolver, ResearchHubError, Role};
use tokio::sync::oneshot;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn credential(token: &str) -> Credential {
    Credential::new(token).expect("non-blank token")
}

/// Answers profile lookups from a script instead of the network.
///
/// Tokens starting with `bad` are rejected as unauthorized; any other token
/// resolves to a profile named after it. Lookups can be held back until a
/// gate is released, or delayed.
#[derive(Default)]
pub struct ScriptedResolver {
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    delays: Mutex<HashMap<String, Duration>>,
    roles: Mutex<HashMap<String, Role>>,
}

impl ScriptedResolver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Holds lookups of `token` until the returned sender fires (or drops).
    pub fn hold(&self, token: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.lock().unwrap().insert(token.to_string(), gate);
        release
    }

    pub fn delay(&self, token: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(token.to_string(), delay);
    }

    pub fn assign_role(&self, token: &str, role: Role) {
        self.roles.lock().unwrap().insert(token.to_string(), role);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn profile_for(&self, token: &str) -> UserProfile {
        let role = self
            .roles
            .lock()
            .unwrap()
            .get(token)
            .copied()
            .unwrap_or(Role::Researcher);
        UserProfile {
            id: 1,
            name: token.to_string(),
            email: format!("{token}@lab.rs"),
            role,
        }
    }
}

impl ProfileResolver for ScriptedResolver {
    async fn resolve_profile(&self, credential: Credential) -> Result<UserProfile, ResearchHubError> {
        let token = credential.expose().to_string();
        self.calls.lock().unwrap().push(token.clone());

        let gate = self.gates.lock().unwrap().remove(&token);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let delay = self.delays.lock().unwrap().get(&token).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if token.starts_with("bad") {
            return Err(ResearchHubError::Unauthorized {
                message: "Unauthenticated.".to_string(),
            });
        }
        Ok(self.profile_for(&token))
    }
}

/// Keeps every logged message.
#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: String) {
        self.entries.lock().unwrap().push((level, message));
    }
}
