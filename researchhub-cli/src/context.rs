//! Session and API client shared by every command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eyre::{bail, eyre, WrapErr};
use researchhub_core::api::ApiClient;
use researchhub_core::logger::default_logger;
use researchhub_core::models::UserProfile;
use researchhub_core::routes::{navigate, Navigation, Route, Section};
use researchhub_core::storage::{FileCredentialStorage, StoragePaths};
use researchhub_core::{ClientConfig, Session, SessionStore};

pub struct Context {
    pub store: SessionStore<ApiClient>,
    /// Sends the session's current credential with every request.
    pub api: ApiClient,
}

impl Context {
    /// Opens the stored session. A stored credential starts resolving
    /// right away; commands wait for it with [`Context::session`].
    pub fn open(base_url: &str, data_dir: Option<PathBuf>, timeout_secs: u64) -> eyre::Result<Self> {
        let config = ClientConfig::new(base_url)?.with_timeout(Duration::from_secs(timeout_secs));
        let root = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir().ok_or_else(|| {
                eyre!("could not determine a data directory, pass --data-dir")
            })?,
        };
        let storage = FileCredentialStorage::new(StoragePaths::new(&root))
            .wrap_err_with(|| format!("opening credential storage in {}", root.display()))?;
        tracing::debug!(base_url = config.base_url(), root = %root.display(), "opening session");

        let resolver = ApiClient::new(config);
        let store = SessionStore::open(Arc::new(storage), resolver.clone(), default_logger());
        let api = resolver.with_credential_source(Arc::new(store.reader()));
        Ok(Self { store, api })
    }

    /// The session once no profile resolution is outstanding.
    pub async fn session(&self) -> Session {
        self.store.settled().await
    }

    /// Runs the route guard for `section` of the signed-in account's
    /// subtree and returns the account if the screen may render.
    pub async fn enter(&self, section: Section) -> eyre::Result<UserProfile> {
        let session = self.session().await;
        let Some(role) = session.role() else {
            bail!("not signed in, run `researchhub login` first");
        };
        let path = Route::Protected { role, section }.path();
        match navigate(&session, &path) {
            Navigation::Render(_) => session
                .profile()
                .cloned()
                .ok_or_else(|| eyre!("not signed in, run `researchhub login` first")),
            Navigation::Redirect(target) => {
                bail!("{} is not available to {role} accounts (redirected to {target})", section.label())
            }
            Navigation::NotFound => {
                bail!("{} is not available to {role} accounts", section.label())
            }
            Navigation::Pending => bail!("session is still loading"),
        }
    }
}
