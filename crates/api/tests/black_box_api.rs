//! Black-box tests over the real router: login, the request gate, scope
//! narrowing, and the CRUD surfaces, all through an ephemeral-port server.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;

use librarium_auth::{AuthConfig, Claims, Role};
use librarium_infra::{InMemoryBookStore, InMemoryPrincipalStore, seed_demo_data};

const PRIVATE_PEM: &str = include_str!("../../../keys/private.pem");
const PUBLIC_PEM: &str = include_str!("../../../keys/public.pem");
const ROGUE_PRIVATE_PEM: &str = include_str!("testdata/rogue_private.pem");

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let users = Arc::new(InMemoryPrincipalStore::new());
        let books = Arc::new(InMemoryBookStore::new());
        seed_demo_data(users.as_ref(), books.as_ref())
            .await
            .expect("failed to seed stores");

        let config = AuthConfig::new(PRIVATE_PEM, PUBLIC_PEM);
        let app = librarium_api::app::build_app(config, users, books)
            .expect("failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(client: &reqwest::Client, base_url: &str, username: &str, password: &str) -> String {
    let res = client
        .post(format!("{}/api/authorize", base_url))
        .json(&serde_json::json!({"username": username, "password": password}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login failed for {username}");

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["token_type"], "Bearer");
    body["access_token"].as_str().unwrap().to_string()
}

async fn user_id_by_username(
    client: &reqwest::Client,
    base_url: &str,
    admin_token: &str,
    username: &str,
) -> String {
    let res = client
        .get(format!("{}/api/users", base_url))
        .bearer_auth(admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    body.as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == username)
        .unwrap_or_else(|| panic!("no user named {username}"))["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn mint_token(private_pem: &str, sub: &str, role: Role, iat: i64, exp: i64) -> String {
    let config = AuthConfig::new(private_pem, PUBLIC_PEM);
    let claims = Claims {
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        sub: sub.to_string(),
        scope: role,
        iat,
        nbf: iat,
        exp,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::RS512),
        &claims,
        &EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap(),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_issues_a_usable_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = login(&client, &srv.base_url, "admin", "admin").await;

    let res = client
        .get(format!("{}/api/books", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_user_and_wrong_password_fail_identically() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut bodies = Vec::new();
    for (username, password) in [("ghost", "ghost"), ("admin", "wrong")] {
        let res = client
            .post(format!("{}/api/authorize", srv.base_url))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        bodies.push(res.json::<serde_json::Value>().await.unwrap());
    }

    // Same outward signal for both: no username enumeration.
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .bearer_auth("garbage.token.value")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_and_expired_tokens_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &srv.base_url, "admin", "admin").await;
    let admin_id = user_id_by_username(&client, &srv.base_url, &admin_token, "admin").await;

    let now = Utc::now().timestamp();

    // Signed with a key the server does not trust.
    let forged = mint_token(ROGUE_PRIVATE_PEM, &admin_id, Role::Admin, now, now + 3600);
    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .bearer_auth(&forged)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Correctly signed but past expiry.
    let expired = mint_token(PRIVATE_PEM, &admin_id, Role::Admin, now - 7200, now - 3600);
    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .bearer_auth(&expired)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reader_is_limited_to_self_scope_on_users() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &srv.base_url, "admin", "admin").await;
    let reader_id = user_id_by_username(&client, &srv.base_url, &admin_token, "reader").await;
    let admin_id = user_id_by_username(&client, &srv.base_url, &admin_token, "admin").await;

    let reader_token = login(&client, &srv.base_url, "reader", "reader").await;

    // Own record: allowed.
    let res = client
        .get(format!("{}/api/users/{}", srv.base_url, reader_id))
        .bearer_auth(&reader_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["username"], "reader");

    // Someone else's record: denied.
    let res = client
        .get(format!("{}/api/users/{}", srv.base_url, admin_id))
        .bearer_auth(&reader_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The collection itself carries no target identifier: denied.
    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .bearer_auth(&reader_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn role_method_matrix_is_enforced_on_books() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &srv.base_url, "admin", "admin").await;
    let reader_token = login(&client, &srv.base_url, "reader", "reader").await;

    let res = client
        .get(format!("{}/api/books", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    let books: serde_json::Value = res.json().await.unwrap();
    let book_id = books[0]["id"].as_str().unwrap().to_string();

    // Reader may read but not delete.
    let res = client
        .get(format!("{}/api/books/{}", srv.base_url, book_id))
        .bearer_auth(&reader_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/api/books/{}", srv.base_url, book_id))
        .bearer_auth(&reader_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Admin delete goes through (scope ALL, method granted).
    let res = client
        .delete(format!("{}/api/books/{}", srv.base_url, book_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/books/{}", srv.base_url, book_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_crud_with_conflict_handling() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &srv.base_url, "admin", "admin").await;

    let payload = serde_json::json!({
        "username": "reader2",
        "firstName": "Chicken",
        "lastName": "Wing",
        "password": "reader2",
        "role": "READER",
    });

    let res = client
        .post(format!("{}/api/users", srv.base_url))
        .bearer_auth(&admin_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let new_id = created["id"].as_str().unwrap().to_string();

    // Duplicate username conflicts.
    let res = client
        .post(format!("{}/api/users", srv.base_url))
        .bearer_auth(&admin_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The new account can log in and touch its own record.
    let token = login(&client, &srv.base_url, "reader2", "reader2").await;
    let res = client
        .patch(format!("{}/api/users/{}", srv.base_url, new_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({"lastName": "Finger"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let patched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(patched["lastName"], "Finger");

    let res = client
        .delete(format!("{}/api/users/{}", srv.base_url, new_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/users/{}", srv.base_url, new_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn book_crud_with_isbn_conflicts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let librarian_token = login(&client, &srv.base_url, "librarian", "librarian").await;

    let payload = serde_json::json!({
        "isbn": "9798985349900",
        "title": "Engineers Survival Guide",
        "author": "Merih Taze",
        "excerpt": "Advice, tactics, and tricks.",
    });

    let res = client
        .post(format!("{}/api/books", srv.base_url))
        .bearer_auth(&librarian_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let book_id = created["id"].as_str().unwrap().to_string();

    // Same ISBN again conflicts.
    let res = client
        .post(format!("{}/api/books", srv.base_url))
        .bearer_auth(&librarian_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // An ISBN already used by a *different* book conflicts on update.
    let res = client
        .put(format!("{}/api/books/{}", srv.base_url, book_id))
        .bearer_auth(&librarian_token)
        .json(&serde_json::json!({
            "isbn": "9789384323097",
            "title": "Engineers Survival Guide",
            "author": "Merih Taze",
            "excerpt": "Advice, tactics, and tricks.",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Updating in place with its own ISBN is fine.
    let res = client
        .put(format!("{}/api/books/{}", srv.base_url, book_id))
        .bearer_auth(&librarian_token)
        .json(&serde_json::json!({
            "isbn": "9798985349900",
            "title": "Engineers Survival Guide, 2nd Edition",
            "author": "Merih Taze",
            "excerpt": "Advice, tactics, and tricks.",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["title"], "Engineers Survival Guide, 2nd Edition");
}

#[tokio::test]
async fn token_of_a_deleted_user_stops_working() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &srv.base_url, "admin", "admin").await;
    let reader_id = user_id_by_username(&client, &srv.base_url, &admin_token, "reader").await;
    let reader_token = login(&client, &srv.base_url, "reader", "reader").await;

    // Token works before the deletion…
    let res = client
        .get(format!("{}/api/books", srv.base_url))
        .bearer_auth(&reader_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/api/users/{}", srv.base_url, reader_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // …and is rejected afterwards, despite the signature still being valid.
    let res = client
        .get(format!("{}/api/books", srv.base_url))
        .bearer_auth(&reader_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
