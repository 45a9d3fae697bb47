use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};
use vc_auth::{
    AuthOutcome, Credentials, FileSessionStore, KnownAuthError, RiotAuthClient, RiotAuthConfig,
    RiotAuthError, Session, SessionStore, complete_multifactor_and_store, login_and_store,
    restore_session,
};
use vc_config::UserConfig;

use crate::output::print_success;
use crate::prompt;

/// Reuse the stored session when allowed, otherwise log in and persist the result
pub async fn establish_session(
    config: RiotAuthConfig,
    user: &UserConfig,
    store: &FileSessionStore,
    relogin: bool,
) -> Result<Session> {
    let mut client = RiotAuthClient::new(config).context("Failed to build the HTTP client")?;

    if relogin {
        debug!("Relogin requested, dropping stored session");
        store.clear().await?;
    } else if let Some(session) = restore_session(&client, store, Utc::now()).await {
        return Ok(session);
    }

    let credentials = Credentials::new(user.username.clone(), user.password.clone());
    println!("Logging in as {}...", user.username);

    let outcome = match login_and_store(&mut client, store, &credentials).await? {
        AuthOutcome::MultifactorRequired { email } => {
            let code = prompt::ask_multifactor_code(email.as_deref())?;
            complete_multifactor_and_store(&mut client, store, &code).await?
        }
        authenticated => authenticated,
    };

    let AuthOutcome::Authenticated(session) = outcome else {
        anyhow::bail!("Verification code was not accepted");
    };

    info!(path = %store.path().display(), "Session saved");
    print_success("Logged in");
    Ok(session)
}

/// Whether the saved username or password was refused, so asking again can help
pub fn credentials_rejected(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<RiotAuthError>(),
        Some(RiotAuthError::Auth(
            KnownAuthError::AuthFailure | KnownAuthError::InvalidCredentials
        ))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_password_asks_again() {
        let error = anyhow::Error::from(RiotAuthError::Auth(KnownAuthError::InvalidCredentials));
        assert!(credentials_rejected(&error));

        let error = anyhow::Error::from(RiotAuthError::Auth(KnownAuthError::AuthFailure));
        assert!(credentials_rejected(&error));
    }

    #[test]
    fn test_other_failures_do_not_ask_again() {
        let error = anyhow::Error::from(RiotAuthError::Auth(KnownAuthError::RateLimited));
        assert!(!credentials_rejected(&error));

        let error = anyhow::Error::from(RiotAuthError::SessionRejected);
        assert!(!credentials_rejected(&error));

        assert!(!credentials_rejected(&anyhow::anyhow!("network down")));
    }
}
