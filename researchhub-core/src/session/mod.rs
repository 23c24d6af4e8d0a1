//! The session store: single source of truth for authentication state.
//!
//! A [`SessionStore`] owns the credential and the resolved profile of the
//! signed-in account. It is an explicit value handed to whoever needs it,
//! never an ambient global, so screens and the route guard can be tested
//! without a running UI.
//!
//! # Profile resolution
//!
//! Whenever a credential is set, the store asks its [`ProfileResolver`] for
//! the matching profile (`GET /me`) on a spawned task. Every credential
//! change bumps the session generation, and a resolution only applies its
//! result if the generation it captured at dispatch is still current, so a
//! slow answer for a superseded credential can neither overwrite the new
//! profile nor log the new credential out.
//!
//! State lives in a `tokio::sync::watch` channel. Each mutation is one
//! `send_modify`, which serializes mutations, and durable storage is written
//! inside that same critical section so the file on disk always matches the
//! in-memory order of changes.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ApiClient, CredentialSource};
use crate::credential::Credential;
use crate::error::ResearchHubError;
use crate::logger::{LogLevel, Logger};
use crate::models::UserProfile;
use crate::storage::{CredentialStorage, CREDENTIAL_KEY};
use crate::Role;

mod auth;

pub use auth::{failure_message, LOGIN_FAILED, REGISTRATION_FAILED};

/// Resolves the profile belonging to a credential.
pub trait ProfileResolver: Send + Sync + 'static {
    /// Fetches the profile of the account `credential` authenticates.
    ///
    /// # Errors
    /// Any error makes the session store drop the credential.
    fn resolve_profile(
        &self,
        credential: Credential,
    ) -> impl Future<Output = Result<UserProfile, ResearchHubError>> + Send;
}

impl ProfileResolver for ApiClient {
    async fn resolve_profile(
        &self,
        credential: Credential,
    ) -> Result<UserProfile, ResearchHubError> {
        self.me_with(&credential).await
    }
}

impl<T: ProfileResolver> ProfileResolver for Arc<T> {
    fn resolve_profile(
        &self,
        credential: Credential,
    ) -> impl Future<Output = Result<UserProfile, ResearchHubError>> + Send {
        (**self).resolve_profile(credential)
    }
}

/// Snapshot of the authentication state.
///
/// Invariants: no profile without a credential; `loading` only while a
/// profile resolution is outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credential: Option<Credential>,
    profile: Option<UserProfile>,
    loading: bool,
    generation: u64,
}

impl Session {
    /// No credential, nothing pending.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A credential whose profile is still being resolved.
    #[must_use]
    pub const fn resolving(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
            profile: None,
            loading: true,
            generation: 0,
        }
    }

    /// A credential with its resolved profile.
    #[must_use]
    pub const fn signed_in(credential: Credential, profile: UserProfile) -> Self {
        Self {
            credential: Some(credential),
            profile: Some(profile),
            loading: false,
            generation: 0,
        }
    }

    /// The current credential.
    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// The resolved profile.
    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// The signed-in account's role.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|profile| profile.role)
    }

    /// `true` while a profile resolution is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Both a credential and its profile are present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.credential.is_some() && self.profile.is_some()
    }

    /// Number of credential changes so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle on a dispatched profile resolution.
///
/// Dropping it does not cancel the resolution.
#[derive(Debug)]
pub struct ProfileResolution {
    handle: Option<JoinHandle<()>>,
}

impl ProfileResolution {
    const fn none() -> Self {
        Self { handle: None }
    }

    /// `true` if a resolution was dispatched.
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        self.handle.is_some()
    }

    /// Waits until the resolution has been applied or discarded.
    pub async fn wait(self) {
        if let Some(handle) = self.handle {
            if let Err(err) = handle.await {
                tracing::error!("profile resolution task failed: {err}");
            }
        }
    }
}

/// Read-only view of a session, for components that must not mutate it.
#[derive(Debug, Clone)]
pub struct SessionReader {
    state: watch::Receiver<Session>,
}

impl SessionReader {
    /// Current snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }
}

impl CredentialSource for SessionReader {
    fn credential(&self) -> Option<Credential> {
        self.state.borrow().credential.clone()
    }
}

/// Owns the authentication state of one client.
pub struct SessionStore<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for SessionStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<R> {
    state: watch::Sender<Session>,
    storage: Arc<dyn CredentialStorage>,
    resolver: R,
    logger: Arc<dyn Logger>,
}

impl<R: ProfileResolver> SessionStore<R> {
    /// Opens the store, seeding the credential from `storage`.
    ///
    /// If a credential was stored, the session starts in the loading state
    /// and its profile resolution is dispatched right away; otherwise the
    /// session starts signed out and not loading. A storage read failure is
    /// reported through `logger` and treated as "no credential".
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        storage: Arc<dyn CredentialStorage>,
        resolver: R,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let stored = match storage.read(CREDENTIAL_KEY) {
            Ok(token) => token.and_then(Credential::new),
            Err(err) => {
                logger.log(
                    LogLevel::Warn,
                    format!("could not read stored credential: {err}"),
                );
                None
            }
        };

        let initial = Session {
            loading: stored.is_some(),
            credential: stored.clone(),
            profile: None,
            generation: 0,
        };
        let (state, _) = watch::channel(initial);
        let store = Self {
            inner: Arc::new(Inner {
                state,
                storage,
                resolver,
                logger,
            }),
        };

        if let Some(credential) = stored {
            tracing::debug!("restoring stored session");
            drop(store.dispatch(credential, 0));
        }
        store
    }

    /// Current snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// The current credential.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.inner.state.borrow().credential.clone()
    }

    /// Change feed; yields a new snapshot after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Read-only view, usable as the API client's credential source.
    #[must_use]
    pub fn reader(&self) -> SessionReader {
        SessionReader {
            state: self.inner.state.subscribe(),
        }
    }

    /// Waits until no profile resolution is outstanding and returns that
    /// snapshot.
    pub async fn settled(&self) -> Session {
        let mut changes = self.inner.state.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let settled = changes.wait_for(|session| !session.loading).await;
        settled.map_or_else(|_| self.session(), |session| session.clone())
    }

    /// Sets or clears the credential.
    ///
    /// A credential is persisted under [`CREDENTIAL_KEY`] and its profile
    /// resolution dispatched; `None` removes the stored entry and clears the
    /// profile. Storage failures never fail the call: they are reported
    /// through the logger and the in-memory state is updated regardless.
    ///
    /// Setting a credential different from the current one drops the old
    /// profile. Must be called from within a tokio runtime when `credential`
    /// is `Some`.
    pub fn set_credential(&self, credential: Option<Credential>) -> ProfileResolution {
        let mut warning = None;
        let mut dispatch = None;

        self.inner.state.send_modify(|session| {
            session.generation += 1;
            let stored = match &credential {
                Some(credential) => self.inner.storage.write(CREDENTIAL_KEY, credential.expose()),
                None => self.inner.storage.remove(CREDENTIAL_KEY),
            };
            if let Err(err) = stored {
                warning = Some(format!("could not persist credential change: {err}"));
            }

            match credential {
                Some(credential) => {
                    if session.credential.as_ref() != Some(&credential) {
                        session.profile = None;
                    }
                    session.credential = Some(credential.clone());
                    session.loading = true;
                    dispatch = Some((credential, session.generation));
                }
                None => {
                    session.credential = None;
                    session.profile = None;
                    session.loading = false;
                }
            }
        });

        if let Some(message) = warning {
            self.inner.logger.log(LogLevel::Warn, message);
        }
        match dispatch {
            Some((credential, generation)) => self.dispatch(credential, generation),
            None => ProfileResolution::none(),
        }
    }

    /// Sets the profile directly, for flows that already received it.
    ///
    /// A profile without a credential would break the session invariant;
    /// such a call is ignored and reported through the logger.
    pub fn set_profile(&self, profile: Option<UserProfile>) {
        let accepted = self.inner.state.send_if_modified(move |session| {
            if profile.is_some() && session.credential.is_none() {
                return false;
            }
            session.profile = profile;
            true
        });
        if !accepted {
            self.inner.logger.log(
                LogLevel::Warn,
                "ignoring profile update without a credential".to_string(),
            );
        }
    }

    /// Clears credential and profile.
    pub fn logout(&self) {
        tracing::debug!("logging out");
        drop(self.set_credential(None));
    }

    fn dispatch(&self, credential: Credential, generation: u64) -> ProfileResolution {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move { inner.resolve(credential, generation).await });
        ProfileResolution {
            handle: Some(handle),
        }
    }
}

impl<R: ProfileResolver> Inner<R> {
    async fn resolve(&self, credential: Credential, generation: u64) {
        let result = self.resolver.resolve_profile(credential).await;

        let mut warning = None;
        let applied = self.state.send_if_modified(|session| {
            if session.generation != generation {
                return false;
            }
            match result {
                Ok(profile) => {
                    session.profile = Some(profile);
                    session.loading = false;
                }
                Err(err) => {
                    tracing::info!("profile resolution failed, signing out: {err}");
                    session.generation += 1;
                    session.credential = None;
                    session.profile = None;
                    session.loading = false;
                    if let Err(err) = self.storage.remove(CREDENTIAL_KEY) {
                        warning = Some(format!("could not remove rejected credential: {err}"));
                    }
                }
            }
            true
        });

        if !applied {
            tracing::debug!(generation, "discarding stale profile resolution");
        }
        if let Some(message) = warning {
            self.logger.log(LogLevel::Warn, message);
        }
    }
}
