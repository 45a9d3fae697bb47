use chrono::{Duration, Utc};
use serde_json::json;
use tempfile::TempDir;
use url::Url;
use vc_auth::{
    AuthOutcome, AuthState, Credentials, Endpoints, FileSessionStore, KnownAuthError,
    MemorySessionStore, RetryPolicy, RiotAuthClient, RiotAuthConfig, RiotAuthError, Session,
    SessionStore, complete_multifactor_and_store, login_and_store, restore_session,
};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTHORIZATION: &str = "/api/v1/authorization";
const REDIRECT: &str = "http://localhost/redirect#access_token=ACCESS&scope=openid&iss=https%3A%2F%2Fauth.riotgames.com&id_token=ID&token_type=Bearer&session_state=s&expires_in=3600";

fn client_for(server: &MockServer) -> RiotAuthClient {
    let base = Url::parse(&server.uri()).unwrap();
    let config = RiotAuthConfig::riot_client().with_endpoints(Endpoints::with_base(&base).unwrap());
    RiotAuthClient::new(config).unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("player", "hunter2")
}

fn success_envelope() -> serde_json::Value {
    json!({
        "type": "response",
        "response": {"mode": "fragment", "parameters": {"uri": REDIRECT}},
        "country": "usa"
    })
}

async fn mount_pre_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(AUTHORIZATION))
        .and(body_partial_json(json!({
            "client_id": "riot-client",
            "scope": "openid link ban lol_region account",
            "response_type": "token id_token"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "asid=preauth; Path=/")
                .set_body_json(json!({"type": "auth", "country": "usa"})),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_credentials(server: &MockServer, reply: serde_json::Value) {
    Mock::given(method("PUT"))
        .and(path(AUTHORIZATION))
        .and(header("cookie", "asid=preauth"))
        .and(body_json(json!({"type": "auth", "username": "player", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_derivation(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", "Bearer ACCESS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sub": "puuid-1", "country": "usa"})))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/v1"))
        .and(header("authorization", "Bearer ACCESS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entitlements_token": "ENTITLEMENT"})))
        .mount(server)
        .await;
}

fn stored_session(saved_at: chrono::DateTime<Utc>) -> Session {
    serde_json::from_value(json!({
        "authTokens": {"accessToken": "STORED", "idToken": "ID", "expiresIn": 3600},
        "entitlementToken": "STORED_ENTITLEMENT",
        "userId": "puuid-1",
        "savedAt": saved_at
    }))
    .unwrap()
}

fn assert_full_session(session: &Session) {
    assert_eq!(session.access_token(), "ACCESS");
    assert_eq!(session.tokens().id_token, "ID");
    assert_eq!(session.tokens().expires_in, 3600);
    assert_eq!(session.entitlement_token(), "ENTITLEMENT");
    assert_eq!(session.user_id(), "puuid-1");
    assert!(session.is_complete());
}

#[tokio::test]
async fn test_credential_login_builds_session() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(&server, success_envelope()).await;
    mount_derivation(&server).await;

    let mut client = client_for(&server);
    let outcome = client.authorize(&credentials()).await.unwrap();

    let AuthOutcome::Authenticated(session) = outcome else {
        panic!("expected an authenticated session, got {:?}", outcome);
    };
    assert_full_session(&session);
    assert!(session.is_fresh(Utc::now()));
    assert!(matches!(client.state(), AuthState::Success));
    assert!(client.has_identity_cookies());
}

#[tokio::test]
async fn test_multifactor_login_builds_same_session() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(
        &server,
        json!({"type": "multifactor", "multifactor": {"email": "p***@mail.com", "method": "email"}}),
    )
    .await;
    mount_derivation(&server).await;

    Mock::given(method("PUT"))
        .and(path(AUTHORIZATION))
        .and(body_json(json!({"type": "multifactor", "code": "123456", "rememberDevice": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let outcome = client.authorize(&credentials()).await.unwrap();
    match outcome {
        AuthOutcome::MultifactorRequired { email } => {
            assert_eq!(email.as_deref(), Some("p***@mail.com"));
        }
        other => panic!("expected a multifactor challenge, got {:?}", other),
    }
    assert!(matches!(client.state(), AuthState::NeedsMultifactor));

    let AuthOutcome::Authenticated(session) = client.complete_multifactor("123456").await.unwrap()
    else {
        panic!("expected an authenticated session");
    };
    assert_full_session(&session);
}

#[tokio::test]
async fn test_rejected_credentials_create_no_session() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(
        &server,
        json!({"type": "auth", "error": "invalid_credentials", "country": "usa"}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let store = FileSessionStore::new(temp.path()).await.unwrap();

    let mut client = client_for(&server);
    let result = login_and_store(&mut client, &store, &credentials()).await;

    match result {
        Err(RiotAuthError::Auth(code)) => assert_eq!(code, KnownAuthError::InvalidCredentials),
        other => panic!("expected invalid_credentials, got {:?}", other),
    }
    assert!(matches!(client.state(), AuthState::Failed));
    assert!(store.load().await.is_none());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_successful_login_writes_session_file() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(&server, success_envelope()).await;
    mount_derivation(&server).await;

    let temp = TempDir::new().unwrap();
    let store = FileSessionStore::new(temp.path()).await.unwrap();

    let mut client = client_for(&server);
    let outcome = login_and_store(&mut client, &store, &credentials()).await.unwrap();

    let AuthOutcome::Authenticated(session) = outcome else {
        panic!("expected an authenticated session, got {:?}", outcome);
    };
    assert!(store.path().exists());
    assert_eq!(store.load().await, Some(session));
}

#[tokio::test]
async fn test_multifactor_session_is_written_only_once_completed() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(&server, json!({"type": "multifactor", "multifactor": {"email": null}})).await;
    mount_derivation(&server).await;

    Mock::given(method("PUT"))
        .and(path(AUTHORIZATION))
        .and(body_partial_json(json!({"type": "multifactor", "code": "654321"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let store = FileSessionStore::new(temp.path()).await.unwrap();
    let mut client = client_for(&server);

    let outcome = login_and_store(&mut client, &store, &credentials()).await.unwrap();
    assert!(matches!(outcome, AuthOutcome::MultifactorRequired { email: None }));
    assert!(!store.path().exists());

    let outcome = complete_multifactor_and_store(&mut client, &store, "654321")
        .await
        .unwrap();
    let AuthOutcome::Authenticated(session) = outcome else {
        panic!("expected an authenticated session, got {:?}", outcome);
    };
    assert_full_session(&session);
    assert_eq!(store.load().await, Some(session));
}

#[tokio::test]
async fn test_unknown_error_code_is_reported_distinctly() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(&server, json!({"type": "auth", "error": "captcha_not_allowed"})).await;

    let mut client = client_for(&server);
    let result = client.authorize(&credentials()).await;

    assert!(matches!(result, Err(RiotAuthError::UnknownAuthError(code)) if code == "captcha_not_allowed"));
}

#[tokio::test]
async fn test_entitlement_failure_leaves_no_session() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(&server, success_envelope()).await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sub": "puuid-1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/v1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let result = client.authorize(&credentials()).await;

    assert!(matches!(result, Err(RiotAuthError::Http { status, .. }) if status == 500));
    assert!(matches!(client.state(), AuthState::Failed));
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;

    Mock::given(method("PUT"))
        .and(path(AUTHORIZATION))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let result = client.authorize(&credentials()).await;

    assert!(matches!(result, Err(RiotAuthError::Decode(_))));
}

#[tokio::test]
async fn test_pre_auth_does_not_retry_forbidden_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTHORIZATION))
        .respond_with(ResponseTemplate::new(403).insert_header("set-cookie", "__cf_bm=x; Path=/"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);

    // A 403 is not fatal at this step
    client.run_pre_auth().await.unwrap();
    assert!(matches!(client.state(), AuthState::PreAuthorized(_)));
}

#[tokio::test]
async fn test_pre_auth_retry_carries_cookie_from_forbidden_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTHORIZATION))
        .and(header("cookie", "__cf_bm=x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "auth"})))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(AUTHORIZATION))
        .respond_with(ResponseTemplate::new(403).insert_header("set-cookie", "__cf_bm=x; Path=/"))
        .expect(1)
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).unwrap();
    let mut config =
        RiotAuthConfig::riot_client().with_endpoints(Endpoints::with_base(&base).unwrap());
    config.retry = RetryPolicy {
        retry_pre_auth_on_forbidden: true,
    };
    let mut client = RiotAuthClient::new(config).unwrap();

    client.run_pre_auth().await.unwrap();
    assert!(matches!(client.state(), AuthState::PreAuthorized(_)));
}

#[tokio::test]
async fn test_each_pre_auth_uses_a_fresh_nonce() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTHORIZATION))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.run_pre_auth().await.unwrap();
    let AuthState::PreAuthorized(first) = client.state() else {
        panic!("expected PreAuthorized");
    };
    let first = first.nonce().to_string();

    client.run_pre_auth().await.unwrap();
    let AuthState::PreAuthorized(second) = client.state() else {
        panic!("expected PreAuthorized");
    };
    assert_ne!(first, second.nonce());

    let requests = server.received_requests().await.unwrap();
    let nonces: Vec<String> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["nonce"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(nonces.len(), 2);
    assert_ne!(nonces[0], nonces[1]);
}

#[tokio::test]
async fn test_stale_persisted_session_forces_login() {
    let server = MockServer::start().await;
    mount_pre_auth(&server).await;
    mount_credentials(&server, success_envelope()).await;
    mount_derivation(&server).await;

    // The stored token must never reach the provider
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", "Bearer STORED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sub": "puuid-1"})))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let store = FileSessionStore::new(temp.path()).await.unwrap();
    let now = Utc::now();
    store.save(&stored_session(now - Duration::hours(2))).await.unwrap();

    let mut client = client_for(&server);
    assert!(restore_session(&client, &store, now).await.is_none());
    assert!(!store.path().exists());

    let AuthOutcome::Authenticated(session) = client.authorize(&credentials()).await.unwrap()
    else {
        panic!("expected an authenticated session");
    };
    store.save(&session).await.unwrap();

    let reloaded = store.load().await.unwrap();
    assert_full_session(&reloaded);
}

#[tokio::test]
async fn test_fresh_persisted_session_is_revalidated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", "Bearer STORED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sub": "puuid-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc::now();
    let store = MemorySessionStore::with_session(stored_session(now - Duration::minutes(10)));
    let client = client_for(&server);

    let session = restore_session(&client, &store, now).await.unwrap();
    assert_eq!(session.access_token(), "STORED");
    assert!(store.load().await.is_some());
}

#[tokio::test]
async fn test_rejected_persisted_session_is_cleared() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc::now();
    let store = MemorySessionStore::with_session(stored_session(now - Duration::minutes(10)));
    let client = client_for(&server);

    assert!(restore_session(&client, &store, now).await.is_none());
    assert!(store.load().await.is_none());
}
