//! Riot identity login and session lifecycle for VALORANT clients
//!
//! This crate drives the login flow the Riot client uses and turns its
//! result into a session that account endpoints accept.
//!
//! # Authentication Flow
//!
//! 1. Pre-auth: seed anti-automation cookies and bind a fresh nonce
//! 2. Credential submission (may branch into a multifactor challenge)
//! 3. Token extraction from the redirect URI fragment
//! 4. User id and entitlement token derivation
//! 5. Session persistence with a one hour freshness window
//!
//! # Example
//!
//! ```no_run
//! use vc_auth::{AuthOutcome, Credentials, RiotAuthClient, RiotAuthConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut client = RiotAuthClient::new(RiotAuthConfig::riot_client())?;
//!     let credentials = Credentials::new("player", "password");
//!
//!     let session = match client.authorize(&credentials).await? {
//!         AuthOutcome::Authenticated(session) => session,
//!         AuthOutcome::MultifactorRequired { .. } => {
//!             let code = "123456"; // From the user
//!             match client.complete_multifactor(code).await? {
//!                 AuthOutcome::Authenticated(session) => session,
//!                 AuthOutcome::MultifactorRequired { .. } => anyhow::bail!("code rejected"),
//!             }
//!         }
//!     };
//!
//!     println!("Logged in as: {}", session.user_id());
//!     Ok(())
//! }
//! ```
//!
//! # Session Storage
//!
//! ```no_run
//! use vc_auth::{FileSessionStore, RiotAuthClient, RiotAuthConfig, SessionStore, restore_session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RiotAuthClient::new(RiotAuthConfig::riot_client())?;
//! let store = FileSessionStore::new("/home/player/.config/valocli").await?;
//!
//! match restore_session(&client, &store, chrono::Utc::now()).await {
//!     Some(session) => println!("Reusing session for {}", session.user_id()),
//!     None => println!("Need to log in again"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Important Notes
//!
//! - Tokens and passwords are never logged
//! - The session file is plain JSON protected only by file permissions

pub mod client;
pub mod config;
pub mod errors;
pub mod file_store;
pub mod models;
pub mod session;
pub mod store;
pub mod token;

// Re-export main types
pub use client::{AuthOutcome, AuthState, LoginOutcome, PreAuthContext, RiotAuthClient};
pub use config::{Endpoints, FRESHNESS_WINDOW, HttpTimeouts, RetryPolicy, RiotAuthConfig, TlsProfile};
pub use errors::{KnownAuthError, Result, RiotAuthError};
pub use file_store::FileSessionStore;
pub use session::{Credentials, Session, SessionTokens};
pub use store::{
    MemorySessionStore, SessionStore, complete_multifactor_and_store, login_and_store,
    restore_session,
};
pub use token::parse_redirect_uri;
