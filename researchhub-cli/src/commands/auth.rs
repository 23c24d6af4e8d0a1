//! Sign-in, registration and sign-out.

use eyre::eyre;
use researchhub_core::models::RegisterRequest;
use researchhub_core::session::{failure_message, LOGIN_FAILED, REGISTRATION_FAILED};
use researchhub_core::{ResearchHubError, Role};

use crate::context::Context;
use crate::output;

/// Keeps field-level validation errors intact, flattens anything else to
/// the message the login screen would show.
fn flow_error(err: ResearchHubError, fallback: &str) -> eyre::Report {
    if matches!(err, ResearchHubError::Validation { .. }) {
        return err.into();
    }
    eyre!(failure_message(&err, fallback))
}

async fn report_signed_in(ctx: &Context) -> eyre::Result<()> {
    // The background /me refresh may still reject the new credential.
    let session = ctx.session().await;
    let profile = session
        .profile()
        .ok_or_else(|| eyre!("the backend rejected the new session"))?;
    println!("Signed in as {}", output::profile(profile));
    println!("Home: {}", profile.role.home_path());
    Ok(())
}

pub async fn login(ctx: &Context, email: &str, password: &str) -> eyre::Result<()> {
    ctx.store
        .login(&ctx.api, email, password)
        .await
        .map_err(|err| flow_error(err, LOGIN_FAILED))?;
    report_signed_in(ctx).await
}

pub async fn register(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
    role: Role,
) -> eyre::Result<()> {
    let request = RegisterRequest {
        name,
        email,
        password,
        role,
    };
    ctx.store
        .register(&ctx.api, &request)
        .await
        .map_err(|err| flow_error(err, REGISTRATION_FAILED))?;
    report_signed_in(ctx).await
}

pub fn logout(ctx: &Context) {
    ctx.store.logout();
    println!("Signed out");
}

pub async fn whoami(ctx: &Context) {
    let session = ctx.session().await;
    match session.profile() {
        Some(profile) => println!("{}", output::profile(profile)),
        None => println!("Not signed in"),
    }
}
