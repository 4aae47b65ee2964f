use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use hubdash_api::state::Adapters;
use hubdash_api::{build_router, AppState};
use hubdash_core::domain::{Document, HostSnapshot, MemoryUsage, SystemInfo, TestKind};
use hubdash_core::error::DomainError;
use hubdash_core::probes::{NetworkProbe, SystemProbe};
use hubdash_core::repositories::DocumentRepository;
use hubdash_infrastructure::{FsDocumentRepository, FsSettingsRepository, InMemoryMenuItemRepository};
use hubdash_security::{PasswordService, Role, UserDirectory};
use hubdash_shared::AppConfig;

struct FakeSystemProbe {
    fail: bool,
}

#[async_trait]
impl SystemProbe for FakeSystemProbe {
    async fn collect(&self) -> Result<HostSnapshot, DomainError> {
        if self.fail {
            return Err(DomainError::SystemInfoUnavailable("probe offline".to_string()));
        }
        Ok(HostSnapshot {
            system: SystemInfo {
                platform: "linux".to_string(),
                release: "6.1.0".to_string(),
                hostname: "dash-01".to_string(),
                uptime: 1234,
                total_mem: 8_000,
                free_mem: 4_000,
                cpus: 4,
                loadavg: [0.5, 0.4, 0.3],
            },
            process_memory: MemoryUsage {
                rss: 100,
                virtual_memory: 200,
            },
        })
    }
}

enum ProbeOutcome {
    Output(&'static str),
    Timeout,
    Failure,
}

struct FakeNetworkProbe {
    outcome: ProbeOutcome,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl NetworkProbe for FakeNetworkProbe {
    async fn run(&self, kind: TestKind, domain: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            ProbeOutcome::Output(text) => Ok(format!("{kind} {domain}\n{text}")),
            ProbeOutcome::Timeout => Err(DomainError::ProbeTimeout),
            ProbeOutcome::Failure => Err(DomainError::ProbeFailed("unknown host".to_string())),
        }
    }
}

struct TestApp {
    router: Router,
    network_calls: Arc<AtomicUsize>,
    _docs: TempDir,
}

async fn test_app_with(system_fail: bool, outcome: ProbeOutcome) -> TestApp {
    let config = AppConfig::resolve(|key| (key == "NODE_ENV").then(|| "test".to_string())).unwrap();

    let docs = TempDir::new().unwrap();
    let document_repo = Arc::new(FsDocumentRepository::new(docs.path()));
    let now = Utc::now();
    for (id, published) in [("published-guide", true), ("draft-notes", false)] {
        document_repo
            .save(&Document {
                id: id.to_string(),
                title: id.to_string(),
                content: format!("# {id}\ncontent"),
                created_at: now,
                updated_at: now,
                published,
            })
            .await
            .unwrap();
    }

    let mut users = UserDirectory::new();
    users.insert_hashed(
        "admin",
        &PasswordService::hash_with_cost("admin-pass", 4).unwrap(),
        Role::Admin,
    );
    users.insert_hashed(
        "viewer",
        &PasswordService::hash_with_cost("viewer-pass", 4).unwrap(),
        Role::User,
    );

    let network_calls = Arc::new(AtomicUsize::new(0));
    let adapters = Adapters {
        menu_repo: Arc::new(InMemoryMenuItemRepository::new()),
        document_repo,
        settings_repo: Arc::new(FsSettingsRepository::new(docs.path().join("site/config.json"))),
        system_probe: Arc::new(FakeSystemProbe { fail: system_fail }),
        network_probe: Arc::new(FakeNetworkProbe {
            outcome,
            calls: network_calls.clone(),
        }),
    };

    let state = AppState::new(config, adapters, users);
    state.menu.seed_defaults().await.unwrap();

    TestApp {
        router: build_router(state),
        network_calls,
        _docs: docs,
    }
}

async fn test_app() -> TestApp {
    test_app_with(false, ProbeOutcome::Output("4 packets transmitted")).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

async fn login(router: &Router, username: &str, password: &str) -> String {
    let (status, headers, _) = send(
        router,
        post_json(
            "POST",
            "/api/login",
            None,
            json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok_with_security_headers() {
    let app = test_app().await;
    let (status, headers, body) = send(&app.router, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["status"], "ok");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    assert!(body["timestamp"].as_i64().unwrap() > 0);
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn system_health_reports_host_and_process() {
    let app = test_app().await;
    let (status, _, body) = send(&app.router, get("/health/system", None)).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["system"]["hostname"], "dash-01");
    assert_eq!(body["system"]["totalMem"], 8_000);
    assert_eq!(body["system"]["loadavg"].as_array().unwrap().len(), 3);
    assert_eq!(body["process"]["memoryUsage"]["virtual"], 200);
    assert_eq!(body["process"]["env"], "test");
}

#[tokio::test]
async fn system_health_failure_is_500_with_details() {
    let app = test_app_with(true, ProbeOutcome::Output("")).await;
    let (status, _, body) = send(&app.router, get("/health/system", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(&body);
    assert_eq!(body["error"], "failed to collect system information");
    assert!(body["details"].as_str().unwrap().contains("probe offline"));
}

#[tokio::test]
async fn config_serves_seeded_menu() {
    let app = test_app().await;
    let (status, _, body) = send(&app.router, get("/api/config", None)).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    let items = body["menuItems"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["text"], "Home");
    assert_eq!(items[0]["link"], "/");
    assert_eq!(items[1]["link"], "/docs");
    assert_eq!(body["proxyDomain"], "registry-1.docker.io");
    assert_eq!(body["theme"], "light");
    assert_eq!(body["logo"], "");
}

#[tokio::test]
async fn site_settings_saved_by_admin_only() {
    let app = test_app().await;
    let update = json!({ "theme": "dark", "logo": "/img/logo.png" });

    let (status, _, _) =
        send(&app.router, post_json("POST", "/api/config", None, update.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let viewer = login(&app.router, "viewer", "viewer-pass").await;
    let (status, _, _) =
        send(&app.router, post_json("POST", "/api/config", Some(&viewer), update.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = login(&app.router, "admin", "admin-pass").await;
    let (status, _, body) =
        send(&app.router, post_json("POST", "/api/config", Some(&admin), update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["success"], true);

    let (_, _, body) = send(&app.router, get("/api/config", None)).await;
    let body = json_body(&body);
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["logo"], "/img/logo.png");
    assert_eq!(body["proxyDomain"], "registry-1.docker.io");
    assert_eq!(body["menuItems"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn site_settings_reject_empty_theme() {
    let app = test_app().await;
    let admin = login(&app.router, "admin", "admin-pass").await;
    let (status, _, _) = send(
        &app.router,
        post_json("POST", "/api/config", Some(&admin), json!({ "theme": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_info_counts_logins() {
    let app = test_app().await;
    let (status, _, _) = send(&app.router, get("/api/user-info", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login(&app.router, "viewer", "viewer-pass").await;
    let cookie = login(&app.router, "viewer", "viewer-pass").await;
    let (status, _, body) = send(&app.router, get("/api/user-info", Some(&cookie))).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["username"], "viewer");
    assert_eq!(body["role"], "user");
    assert_eq!(body["loginCount"], 2);
    assert!(body["lastLogin"].is_string());
}

#[tokio::test]
async fn development_cors_allows_only_local_origins() {
    let app = test_app().await;

    let request = |origin: &'static str| {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    };

    let (_, headers, _) = send(&app.router, request("http://localhost:3000")).await;
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let (_, headers, _) = send(&app.router, request("https://evil.example")).await;
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn documentation_list_requires_login() {
    let app = test_app().await;
    let (status, _, body) = send(&app.router, get("/api/documentation", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body)["error"], "SESSION_EXPIRED");
}

#[tokio::test]
async fn documentation_list_filters_by_role() {
    let app = test_app().await;

    let viewer = login(&app.router, "viewer", "viewer-pass").await;
    let (_, _, body) = send(&app.router, get("/api/documentation", Some(&viewer))).await;
    let ids: Vec<String> = json_body(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["published-guide"]);

    let admin = login(&app.router, "admin", "admin-pass").await;
    let (_, _, body) = send(&app.router, get("/api/documentation", Some(&admin))).await;
    assert_eq!(json_body(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unpublished_document_forbidden_for_non_admin() {
    let app = test_app().await;

    let (status, _, _) = send(&app.router, get("/api/documentation/draft-notes", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let viewer = login(&app.router, "viewer", "viewer-pass").await;
    let (status, _, _) =
        send(&app.router, get("/api/documentation/draft-notes", Some(&viewer))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = login(&app.router, "admin", "admin-pass").await;
    let (status, _, body) =
        send(&app.router, get("/api/documentation/draft-notes", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["title"], "draft-notes");
}

#[tokio::test]
async fn unknown_document_is_404() {
    let app = test_app().await;
    let (status, _, body) = send(&app.router, get("/api/documentation/missing", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let body = json_body(&body);
    assert!(body["error"].is_string());
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn published_document_is_public() {
    let app = test_app().await;
    let (status, _, body) = send(&app.router, get("/api/documentation/published-guide", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json_body(&body)["content"].as_str().unwrap().contains("content"));
}

#[tokio::test]
async fn client_error_is_acknowledged() {
    let app = test_app().await;
    let report = json!({
        "message": "boom",
        "source": "app.js",
        "lineno": 10,
        "colno": 5,
        "type": "uncaught",
        "userAgent": "test-agent",
        "page": "http://localhost/"
    });
    let (status, _, body) =
        send(&app.router, post_json("POST", "/api/client-error", None, report)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "success": true }));
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = test_app().await;
    let (status, headers, _) = send(
        &app.router,
        post_json(
            "POST",
            "/api/login",
            None,
            json!({ "username": "admin", "password": "wrong" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn session_lifecycle() {
    let app = test_app().await;

    let (_, _, body) = send(&app.router, get("/api/check-session", None)).await;
    assert_eq!(json_body(&body)["authenticated"], false);

    let cookie = login(&app.router, "admin", "admin-pass").await;
    assert!(cookie.starts_with("hubdash.sid="));
    let (_, _, body) = send(&app.router, get("/api/check-session", Some(&cookie))).await;
    let body = json_body(&body);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["role"], "admin");

    let (status, headers, _) =
        send(&app.router, post_json("POST", "/api/logout", Some(&cookie), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let (_, _, body) = send(&app.router, get("/api/check-session", Some(&cookie))).await;
    assert_eq!(json_body(&body)["authenticated"], false);
}

#[tokio::test]
async fn tampered_session_cookie_is_rejected() {
    let app = test_app().await;
    let cookie = login(&app.router, "admin", "admin-pass").await;
    let forged = format!("{}00", cookie.trim_end_matches(|c: char| c.is_ascii_hexdigit()));

    let (status, _, _) = send(&app.router, get("/api/documentation", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn network_test_requires_login() {
    let app = test_app().await;
    let body = json!({ "domain": "ghcr.io", "type": "ping" });
    let (status, _, _) =
        send(&app.router, post_json("POST", "/api/network-test", None, body)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.network_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn network_test_returns_plain_text() {
    let app = test_app().await;
    let cookie = login(&app.router, "viewer", "viewer-pass").await;
    let body = json!({ "domain": "ghcr.io", "type": "ping" });
    let (status, headers, body) =
        send(&app.router, post_json("POST", "/api/network-test", Some(&cookie), body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(String::from_utf8(body).unwrap(), "ping ghcr.io\n4 packets transmitted");
    assert_eq!(app.network_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn network_test_rejects_invalid_input() {
    let app = test_app().await;
    let cookie = login(&app.router, "viewer", "viewer-pass").await;

    for body in [
        json!({ "domain": "ghcr.io; reboot", "type": "ping" }),
        json!({ "domain": "ghcr.io", "type": "nmap" }),
    ] {
        let (status, _, _) =
            send(&app.router, post_json("POST", "/api/network-test", Some(&cookie), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.network_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn network_test_timeout_and_failure() {
    let app = test_app_with(false, ProbeOutcome::Timeout).await;
    let cookie = login(&app.router, "viewer", "viewer-pass").await;
    let body = json!({ "domain": "quay.io", "type": "traceroute" });
    let (status, _, text) =
        send(&app.router, post_json("POST", "/api/network-test", Some(&cookie), body)).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(String::from_utf8(text).unwrap(), "test timed out");

    let app = test_app_with(false, ProbeOutcome::Failure).await;
    let cookie = login(&app.router, "viewer", "viewer-pass").await;
    let body = json!({ "domain": "quay.io", "type": "ping" });
    let (status, _, text) =
        send(&app.router, post_json("POST", "/api/network-test", Some(&cookie), body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(text).unwrap().contains("unknown host"));
}

#[tokio::test]
async fn document_management_requires_admin() {
    let app = test_app().await;
    let draft = json!({ "title": "Runbook", "content": "Restart the registry" });

    let viewer = login(&app.router, "viewer", "viewer-pass").await;
    let (status, _, _) =
        send(&app.router, post_json("POST", "/api/documents", Some(&viewer), draft.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = login(&app.router, "admin", "admin-pass").await;
    let (status, _, body) =
        send(&app.router, post_json("POST", "/api/documents", Some(&admin), draft)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json_body(&body);
    assert_eq!(created["published"], false);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _, body) = send(
        &app.router,
        post_json(
            "PATCH",
            &format!("/api/documents/{id}/publish"),
            Some(&admin),
            json!({ "published": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["published"], true);

    let (status, _, _) = send(&app.router, get(&format!("/api/documentation/{id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn document_create_requires_title_and_content() {
    let app = test_app().await;
    let admin = login(&app.router, "admin", "admin-pass").await;
    let (status, _, _) = send(
        &app.router,
        post_json("POST", "/api/documents", Some(&admin), json!({ "title": "Only title" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn menu_item_admin_crud() {
    let app = test_app().await;
    let admin = login(&app.router, "admin", "admin-pass").await;

    let (status, _, body) = send(
        &app.router,
        post_json(
            "POST",
            "/api/menu-items",
            Some(&admin),
            json!({ "text": "Registry", "link": "https://ghcr.io", "newTab": true, "order": 3 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = json_body(&body)["id"].as_str().unwrap().to_string();

    let (status, _, _) = send(
        &app.router,
        post_json(
            "PUT",
            &format!("/api/menu-items/{id}"),
            Some(&admin),
            json!({ "enabled": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app.router, get("/api/config", None)).await;
    assert_eq!(json_body(&body)["menuItems"].as_array().unwrap().len(), 2);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/menu-items/{id}"))
        .header(header::COOKIE, &admin)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
