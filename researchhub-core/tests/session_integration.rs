mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{credential, init_tracing, RecordingLogger, ScriptedResolver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use researchhub_core::routes::{guard, navigate, Access, Navigation};
use researchhub_core::storage::{CredentialStorage, MemoryCredentialStorage, CREDENTIAL_KEY};
use researchhub_core::{Role, SessionStore};

type Store = SessionStore<Arc<ScriptedResolver>>;

fn open(
    storage: &Arc<MemoryCredentialStorage>,
    resolver: &Arc<ScriptedResolver>,
    logger: &Arc<RecordingLogger>,
) -> Store {
    SessionStore::open(storage.clone(), Arc::clone(resolver), logger.clone())
}

fn stored(storage: &MemoryCredentialStorage) -> Option<String> {
    storage.read(CREDENTIAL_KEY).unwrap()
}

#[tokio::test]
async fn test_restored_session_is_loading_until_resolved() {
    init_tracing();
    let storage = Arc::new(MemoryCredentialStorage::with_entry(CREDENTIAL_KEY, "ana"));
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let release = resolver.hold("ana");

    let store = open(&storage, &resolver, &logger);
    let session = store.session();
    assert!(session.is_loading());
    assert_eq!(session.credential(), Some(&credential("ana")));
    assert!(session.profile().is_none());
    assert_eq!(guard(&session, Some(&[Role::Researcher])), Access::Pending);

    release.send(()).unwrap();
    let session = store.settled().await;
    assert!(!session.is_loading());
    assert_eq!(session.profile().map(|p| p.name.as_str()), Some("ana"));
    assert_eq!(guard(&session, Some(&[Role::Researcher])), Access::Allow);
    assert_eq!(resolver.calls(), vec!["ana"]);
}

#[tokio::test]
async fn test_empty_storage_starts_signed_out() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();

    let store = open(&storage, &resolver, &logger);
    let session = store.session();
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert_eq!(
        navigate(&session, "/autenticate/researcher"),
        Navigation::Redirect("/login".to_string())
    );
    assert!(resolver.calls().is_empty());
}

#[tokio::test]
async fn test_clearing_credential_removes_stored_entry() {
    let storage = Arc::new(MemoryCredentialStorage::with_entry(CREDENTIAL_KEY, "ana"));
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);
    assert!(store.settled().await.is_authenticated());

    let resolution = store.set_credential(None);
    assert!(!resolution.is_dispatched());

    let session = store.session();
    assert!(session.credential().is_none());
    assert!(session.profile().is_none());
    assert!(!session.is_loading());
    assert_eq!(stored(&storage), None);
}

#[tokio::test]
async fn test_setting_credential_persists_and_resolves() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    resolver.assign_role("root", Role::Admin);
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);

    store.set_credential(Some(credential("root"))).wait().await;

    assert_eq!(stored(&storage).as_deref(), Some("root"));
    let session = store.session();
    assert_eq!(session.role(), Some(Role::Admin));
    assert_eq!(
        navigate(&session, "/autenticate/researcher/projects"),
        Navigation::Redirect("/autenticate/admin".to_string())
    );
    assert!(logger.warnings().is_empty());
}

#[tokio::test]
async fn test_rejected_credential_signs_out() {
    let storage = Arc::new(MemoryCredentialStorage::with_entry(CREDENTIAL_KEY, "bad-expired"));
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();

    let store = open(&storage, &resolver, &logger);
    let session = store.settled().await;

    assert!(session.credential().is_none());
    assert!(session.profile().is_none());
    assert_eq!(stored(&storage), None);
    assert_eq!(guard(&session, None), Access::Redirect("/login".to_string()));
}

#[tokio::test]
async fn test_stale_resolution_is_discarded() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);

    let release_first = resolver.hold("first");
    let first = store.set_credential(Some(credential("first")));
    store.set_credential(Some(credential("second"))).wait().await;
    assert_eq!(
        store.session().profile().map(|p| p.name.clone()),
        Some("second".to_string())
    );

    release_first.send(()).unwrap();
    first.wait().await;

    let session = store.session();
    assert_eq!(session.credential(), Some(&credential("second")));
    assert_eq!(session.profile().map(|p| p.name.as_str()), Some("second"));
    assert_eq!(resolver.calls(), vec!["first", "second"]);
}

#[tokio::test]
async fn test_stale_rejection_does_not_sign_out() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);

    let release_old = resolver.hold("bad-old");
    let old = store.set_credential(Some(credential("bad-old")));
    store.set_credential(Some(credential("fresh"))).wait().await;

    release_old.send(()).unwrap();
    old.wait().await;

    let session = store.session();
    assert!(session.is_authenticated());
    assert_eq!(session.credential(), Some(&credential("fresh")));
    assert_eq!(stored(&storage).as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_logout_during_resolution_wins() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);

    let release = resolver.hold("ana");
    let pending = store.set_credential(Some(credential("ana")));
    store.logout();
    release.send(()).unwrap();
    pending.wait().await;

    let session = store.session();
    assert!(session.credential().is_none());
    assert!(session.profile().is_none());
    assert!(!session.is_loading());
    assert_eq!(stored(&storage), None);
}

#[tokio::test]
async fn test_storage_failure_is_reported_not_raised() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);

    storage.set_failing(true);
    store.set_credential(Some(credential("ana"))).wait().await;

    let session = store.session();
    assert_eq!(session.credential(), Some(&credential("ana")));
    assert!(session.is_authenticated());
    assert_eq!(logger.warnings().len(), 1);

    store.logout();
    assert!(store.session().credential().is_none());
    assert_eq!(logger.warnings().len(), 2);
}

#[tokio::test]
async fn test_profile_without_credential_is_ignored() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);

    store.set_profile(Some(resolver.profile_for("ghost")));

    assert!(store.session().profile().is_none());
    assert_eq!(logger.warnings().len(), 1);
}

#[tokio::test]
async fn test_subscribers_see_resolution() {
    let storage = Arc::new(MemoryCredentialStorage::new());
    let resolver = ScriptedResolver::new();
    let logger = RecordingLogger::new();
    let store = open(&storage, &resolver, &logger);
    let mut changes = store.subscribe();

    drop(store.set_credential(Some(credential("ana"))));
    let session = changes
        .wait_for(|session| session.profile().is_some())
        .await
        .unwrap()
        .clone();
    assert_eq!(session.profile().map(|p| p.email.as_str()), Some("ana@lab.rs"));
}

#[tokio::test]
async fn test_random_call_orders_settle_on_last_credential() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(0x5e55_1017);

    for round in 0..20 {
        let storage = Arc::new(MemoryCredentialStorage::new());
        let resolver = ScriptedResolver::new();
        let logger = RecordingLogger::new();
        let store = open(&storage, &resolver, &logger);

        let mut pending = Vec::new();
        let steps = rng.gen_range(1..8);
        for step in 0..steps {
            if rng.gen_bool(0.2) {
                store.set_credential(None);
            } else {
                let prefix = if rng.gen_bool(0.25) { "bad" } else { "tok" };
                let token = format!("{prefix}-{round}-{step}");
                resolver.delay(&token, Duration::from_millis(rng.gen_range(0..15)));
                pending.push(store.set_credential(Some(credential(&token))));
            }
            let session = store.session();
            assert!(session.profile().is_none() || session.credential().is_some());
        }

        let last = format!("tok-{round}-final");
        resolver.delay(&last, Duration::from_millis(rng.gen_range(0..15)));
        pending.push(store.set_credential(Some(credential(&last))));

        for resolution in pending {
            resolution.wait().await;
        }

        let session = store.session();
        assert!(!session.is_loading(), "round {round}");
        assert_eq!(session.credential(), Some(&credential(&last)), "round {round}");
        assert_eq!(
            session.profile().map(|p| p.name.as_str()),
            Some(last.as_str()),
            "round {round}"
        );
        assert_eq!(stored(&storage).as_deref(), Some(last.as_str()), "round {round}");
    }
}
