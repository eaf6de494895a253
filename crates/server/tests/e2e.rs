use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup;

const ADMIN: &str = "admin@example.com";

struct TestApp {
    base_url: String,
    data_dir: String,
}

async fn start_server(backend: StorageBackend) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = backend;
    // isolated data dir per test run
    cfg.storage.data_dir = format!("target/test-data/{}", Uuid::new_v4());
    cfg.web.static_dir = "/nonexistent-web-dir".into();
    cfg.normalize_and_validate()?;

    let state = startup::build_state(&cfg).await?;
    let app = startup::build_app(&cfg, state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir: cfg.storage.data_dir })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

impl TestApp {
    async fn create_service(&self, c: &reqwest::Client, name: &str) -> anyhow::Result<Value> {
        let res = c
            .post(format!("{}/admin/services", self.base_url))
            .header("X-User-Email", ADMIN)
            .json(&json!({"name": name, "duration": 30}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        Ok(res.json().await?)
    }

    async fn add_slot(&self, c: &reqwest::Client, service_id: &str, datetime: &str, capacity: i64) -> anyhow::Result<Value> {
        let res = c
            .post(format!("{}/admin/services/{}/slots", self.base_url, service_id))
            .header("X-User-Email", ADMIN)
            .json(&json!({"datetime": datetime, "capacity": capacity}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        Ok(res.json().await?)
    }

    async fn book(&self, c: &reqwest::Client, slot_id: &str, email: &str) -> anyhow::Result<reqwest::Response> {
        Ok(c.post(format!("{}/reservations", self.base_url))
            .header("X-User-Email", email)
            .json(&json!({"slotId": slot_id}))
            .send()
            .await?)
    }

    async fn cancel(&self, c: &reqwest::Client, reservation_id: &str, email: &str) -> anyhow::Result<reqwest::Response> {
        Ok(c.delete(format!("{}/reservations/{}", self.base_url, reservation_id))
            .header("X-User-Email", email)
            .send()
            .await?)
    }

    async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.data_dir).await;
    }
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::Memory).await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_haircut_scenario_over_http() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::Json).await?;
    let c = client();

    let svc = app.create_service(&c, "Haircut").await?;
    let svc_id = svc["id"].as_str().expect("service id").to_string();
    assert!(svc_id.starts_with("svc_"));

    let listed: Value = c.get(format!("{}/services", app.base_url)).send().await?.json().await?;
    assert!(listed.as_array().expect("array").iter().any(|s| s["id"] == svc_id.as_str()));

    let slot = app.add_slot(&c, &svc_id, "2030-01-01T10:00:00Z", 1).await?;
    let slot_id = slot["id"].as_str().expect("slot id").to_string();
    assert_eq!(slot["serviceId"], svc_id.as_str());
    assert_eq!(slot["capacity"], 1);

    let slots: Value = c
        .get(format!("{}/services/{}/slots", app.base_url, svc_id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(slots.as_array().map(|a| a.len()), Some(1));

    let res = app.book(&c, &slot_id, "a@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let reservation: Value = res.json().await?;
    let reservation_id = reservation["id"].as_str().expect("reservation id").to_string();
    assert_eq!(reservation["userEmail"], "a@x.com");

    let res = app.book(&c, &slot_id, "b@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "slot is full");

    // someone else cannot cancel it
    let res = app.cancel(&c, &reservation_id, "b@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);

    let res = app.cancel(&c, &reservation_id, "a@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "deleted");

    let res = app.book(&c, &slot_id, "b@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let mine: Value = c
        .get(format!("{}/reservations/me", app.base_url))
        .header("X-User-Email", "b@x.com")
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(mine.as_array().map(|a| a.len()), Some(1));

    // everything landed on disk
    let raw = tokio::fs::read(format!("{}/reservations.json", app.data_dir)).await?;
    let on_disk: Value = serde_json::from_slice(&raw)?;
    assert_eq!(on_disk.as_array().map(|a| a.len()), Some(1));
    assert_eq!(on_disk[0]["userEmail"], "b@x.com");

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_admin_routes_require_privilege() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::Memory).await?;
    let c = client();

    let res = c
        .post(format!("{}/admin/services", app.base_url))
        .header("X-User-Email", "a@x.com")
        .json(&json!({"name": "Haircut"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);

    let res = c
        .post(format!("{}/admin/services", app.base_url))
        .json(&json!({"name": "Haircut"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);

    let res = c
        .post(format!("{}/admin/services", app.base_url))
        .header("X-User-Email", ADMIN)
        .json(&json!({"name": ""}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "name required");
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_bodies_keep_json_errors() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::Memory).await?;
    let c = client();

    // the admin gate runs before the body is looked at
    let res = c
        .post(format!("{}/admin/services", app.base_url))
        .header("X-User-Email", "a@x.com")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "admin only");

    let res = c
        .post(format!("{}/admin/services", app.base_url))
        .header("X-User-Email", ADMIN)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["kind"], "Invalid Body");
    assert!(body["error"].is_string());

    let res = c
        .post(format!("{}/reservations", app.base_url))
        .header("X-User-Email", "a@x.com")
        .header("content-type", "application/json")
        .body(r#"{"slotId": 42}"#)
        .send()
        .await?;
    assert!(res.status().is_client_error());
    let body: Value = res.json().await?;
    assert_eq!(body["kind"], "Invalid Body");
    Ok(())
}

#[tokio::test]
async fn e2e_input_errors_map_to_status_codes() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::Memory).await?;
    let c = client();

    let svc = app.create_service(&c, "Massage").await?;
    let svc_id = svc["id"].as_str().expect("service id").to_string();

    let res = c
        .post(format!("{}/admin/services/{}/slots", app.base_url, svc_id))
        .header("X-User-Email", ADMIN)
        .json(&json!({"datetime": "next tuesday", "capacity": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = app.book(&c, "slt_unknown", "a@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "slot not found");

    let slot = app.add_slot(&c, &svc_id, "2030-01-01T10:00:00Z", 2).await?;
    let slot_id = slot["id"].as_str().expect("slot id").to_string();

    let res = app.book(&c, &slot_id, "").await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    assert_eq!(app.book(&c, &slot_id, "a@x.com").await?.status(), HttpStatusCode::OK);
    let res = app.book(&c, &slot_id, "a@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "already booked this slot");

    let res = app.cancel(&c, "res_unknown", "a@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_past_reservation_cannot_be_cancelled() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::Memory).await?;
    let c = client();

    let svc = app.create_service(&c, "Yoga").await?;
    let svc_id = svc["id"].as_str().expect("service id").to_string();
    let past = (chrono::Utc::now() - chrono::Duration::hours(1)).to_rfc3339();
    let slot = app.add_slot(&c, &svc_id, &past, 1).await?;
    let slot_id = slot["id"].as_str().expect("slot id").to_string();

    let res = app.book(&c, &slot_id, "a@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let reservation: Value = res.json().await?;
    let reservation_id = reservation["id"].as_str().expect("reservation id").to_string();

    let res = app.cancel(&c, &reservation_id, "a@x.com").await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "cannot cancel past reservations");
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposed() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::Memory).await?;
    let res = client().get(format!("{}/metrics", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("booking_reservations_created_total"));
    Ok(())
}
