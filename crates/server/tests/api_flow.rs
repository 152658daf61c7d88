use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use configs::{AppConfig, BootstrapAdmin};
use server::{build_router, ServerState};
use service::auth::repository::AuthRepository;
use service::mailer::RecordingMailer;
use service::repo::InMemoryRepository;

const ADMIN_PASSWORD: &str = "Adm1nPassw0rd";
const STAFF_PASSWORD: &str = "Staff-Pass-123";

struct TestApp {
    router: Router,
    mailer: Arc<RecordingMailer>,
}

impl TestApp {
    async fn new() -> anyhow::Result<Self> {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = "router-test-secret-0123456789".into();
        cfg.auth.bootstrap_admin = Some(BootstrapAdmin {
            username: "admin".into(),
            email: "admin@noise.example.com".into(),
            password: ADMIN_PASSWORD.into(),
        });
        let repo = Arc::new(InMemoryRepository::default());
        let mailer = Arc::new(RecordingMailer::default());
        let accounts: Arc<dyn AuthRepository> = repo.clone();
        let state = ServerState::new(repo, accounts, mailer.clone(), &cfg);
        state.auth.bootstrap(cfg.auth.bootstrap_admin.as_ref()).await?;
        Ok(Self { router: build_router(state, CorsLayer::very_permissive()), mailer })
    }

    async fn call(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(b) => req.header(header::CONTENT_TYPE, "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
            None => req.body(Body::empty())?,
        };
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    async fn login(&self, login: &str, password: &str) -> anyhow::Result<String> {
        let (status, body) = self.call(Method::POST, "/Auth/login", None, Some(json!({"login": login, "password": password}))).await?;
        assert_eq!(status, StatusCode::OK, "login {login}: {body}");
        Ok(body["data"]["token"].as_str().unwrap_or_default().to_string())
    }

    async fn create(&self, uri: &str, token: &str, body: Value) -> anyhow::Result<Value> {
        let (status, resp) = self.call(Method::POST, uri, Some(token), Some(body)).await?;
        assert_eq!(status, StatusCode::CREATED, "{uri}: {resp}");
        Ok(resp["data"].clone())
    }
}

fn id(v: &Value) -> String {
    v["id"].as_str().unwrap_or_default().to_string()
}

fn otp_code(body: &str) -> String {
    body.split_whitespace()
        .map(|w| w.trim_end_matches('.'))
        .find(|w| w.len() >= 4 && w.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn health_is_open() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.call(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app.call(Method::GET, "/Challan", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["data"].is_null());
    assert!(body["message"].is_string());

    let (status, _) = app.call(Method::GET, "/Challan", Some("not-a-jwt"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .call(Method::POST, "/Auth/login", None, Some(json!({"login": "admin", "password": "wrong-password"})))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_sets_cookie_accepted_by_protected_routes() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/Auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"login": "admin@noise.example.com", "password": ADMIN_PASSWORD}))?))?;
    let resp = app.router.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("auth_token="));

    let req = Request::builder().uri("/Auth/me").header(header::COOKIE, cookie).body(Body::empty())?;
    let resp = app.router.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "Admin");
    Ok(())
}

#[tokio::test]
async fn validation_failures_carry_field_errors() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.login("admin", ADMIN_PASSWORD).await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/Policestation/create",
            Some(&admin),
            Some(json!({"name": "", "station_code": "LHR-01", "district": "Lahore", "province": "Punjab"})),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"][0]["field"], "name");

    let (status, _) = app.call(Method::POST, "/Violation/create", Some(&admin), Some(json!({"violation_type": 5}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_path_and_query_use_the_envelope() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.login("admin", ADMIN_PASSWORD).await?;

    let (status, body) = app.call(Method::GET, "/Challan/not-a-uuid", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("UUID"));
    assert!(body["data"].is_null());

    let (status, body) = app.call(Method::GET, "/Challan?page=first", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, _) = app.call(Method::DELETE, "/Court/123", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn directory_is_admin_only_and_reports_missing_rows() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.login("admin", ADMIN_PASSWORD).await?;
    let station = app
        .create(
            "/Policestation/create",
            &admin,
            json!({"name": "Gulberg", "station_code": "LHR-01", "district": "Lahore", "province": "Punjab"}),
        )
        .await?;
    app.create(
        "/Policeofficer/create",
        &admin,
        json!({
            "station_id": id(&station), "badge_number": "B-100", "full_name": "Asif Khan",
            "cnic": "35202-1111111-1", "rank": "SI", "username": "asif.khan",
            "email": "asif@police.example.com", "password": STAFF_PASSWORD
        }),
    )
    .await?;
    let officer = app.login("asif.khan", STAFF_PASSWORD).await?;

    let (status, _) = app
        .call(Method::POST, "/Court/create", Some(&officer), Some(json!({"name": "X", "court_type": "Civil", "district": "Lahore"})))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.call(Method::GET, "/Policestation", Some(&officer), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let (status, _) = app
        .call(Method::GET, &format!("/Court/{}", uuid::Uuid::new_v4()), Some(&admin), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(
            Method::POST,
            "/Policestation/create",
            Some(&admin),
            Some(json!({"name": "Again", "station_code": "LHR-01", "district": "Lahore", "province": "Punjab"})),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.call(Method::DELETE, &format!("/Policestation/{}", id(&station)), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn evidence_chain_from_reading_to_verdict() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.login("admin", ADMIN_PASSWORD).await?;

    let station = app
        .create(
            "/Policestation/create",
            &admin,
            json!({"name": "Gulberg", "station_code": "LHR-01", "district": "Lahore", "province": "Punjab"}),
        )
        .await?;
    app.create(
        "/Policeofficer/create",
        &admin,
        json!({
            "station_id": id(&station), "badge_number": "B-200", "full_name": "Sana Malik",
            "cnic": "35202-2222222-2", "rank": "Inspector", "username": "sana.chief",
            "email": "sana@police.example.com", "password": STAFF_PASSWORD, "role": "StationChief",
            "is_investigation_officer": true
        }),
    )
    .await?;
    let device = app
        .create(
            "/Iotdevice/create",
            &admin,
            json!({"station_id": id(&station), "device_name": "Meter 7", "serial_number": "SN-7", "device_type": "sound-meter"}),
        )
        .await?;
    let violation = app
        .create(
            "/Violation/create",
            &admin,
            json!({
                "violation_type": "Modified silencer", "description": "Exhaust above limit",
                "penalty_amount": 5000, "section_of_law": "MVO s.115", "is_cognizable": true
            }),
        )
        .await?;
    let court = app
        .create("/Court/create", &admin, json!({"name": "Civil Court Lahore", "court_type": "Civil", "district": "Lahore"}))
        .await?;
    let judge = app
        .create(
            "/Judge/create",
            &admin,
            json!({
                "court_id": id(&court), "full_name": "Justice Rana", "cnic": "35201-3333333-3",
                "designation": "Civil Judge", "username": "judge.rana",
                "email": "rana@courts.example.com", "password": STAFF_PASSWORD
            }),
        )
        .await?;

    let chief = app.login("sana.chief", STAFF_PASSWORD).await?;
    let judge_token = app.login("judge.rana", STAFF_PASSWORD).await?;

    let report = app
        .create("/EmissionReport/create", &chief, json!({"device_id": id(&device), "vehicle_plate": "lea 1234", "sound_level_db": 96.5}))
        .await?;
    assert_eq!(report["classification"], "Violation");
    assert_eq!(report["vehicle_plate"], "LEA-1234");

    let (status, _) = app
        .call(
            Method::POST,
            "/Challan/create",
            Some(&judge_token),
            Some(json!({"violation_id": id(&violation)})),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let challan = app
        .create(
            "/Challan/create",
            &chief,
            json!({
                "violation_id": id(&violation),
                "emission_report_id": id(&report),
                "vehicle_input": {"plate_number": "LEA-1234", "make": "Honda"},
                "accused_input": {"full_name": "Bilal Ahmed", "cnic": "3520244444444", "email": "bilal@example.com"},
                "location": "Canal Road"
            }),
        )
        .await?;
    assert_eq!(challan["penalty_amount"], 5000);
    assert_eq!(challan["status"], "Unpaid");
    assert_eq!(challan["is_overdue"], false);

    let (status, body) = app.call(Method::GET, &format!("/Challan/{}/verify", id(&challan)), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_valid"], true);
    assert_eq!(body["data"]["emission_report"]["is_valid"], true);

    let (status, body) = app.call(Method::GET, "/Challan?vehicle_plate=lea-1234", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let fir = app
        .create("/Fir/create", &chief, json!({"challan_id": id(&challan), "description": "Repeat offender"}))
        .await?;
    let year = Utc::now().format("%Y").to_string();
    assert_eq!(fir["fir_number"], format!("FIR-LHR-01-{year}-0001"));
    assert_eq!(fir["status"], "Filed");

    let (status, _) = app
        .call(Method::POST, "/Fir/create", Some(&chief), Some(json!({"challan_id": id(&challan), "description": "again"})))
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let case = app
        .create(
            "/Case/create",
            &chief,
            json!({"fir_id": id(&fir), "court_id": id(&court), "judge_id": id(&judge), "case_type": "Criminal"}),
        )
        .await?;
    assert_eq!(case["status"], "Pending");
    let (_, body) = app.call(Method::GET, &format!("/Fir/{}", id(&fir)), Some(&chief), None).await?;
    assert_eq!(body["data"]["status"], "ForwardedToCourt");

    let case_uri = format!("/Case/{}", id(&case));
    let hearing = (Utc::now() + Duration::days(7)).to_rfc3339();
    let (status, body) = app
        .call(Method::PUT, &format!("{case_uri}/hearing"), Some(&judge_token), Some(json!({"hearing_date": hearing})))
        .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "Hearing");

    app.create(
        &format!("{case_uri}/statements"),
        &judge_token,
        json!({"statement_by": "Bilal Ahmed", "statement_text": "The silencer was factory fitted."}),
    )
    .await?;

    let (status, _) = app
        .call(Method::PUT, &format!("{case_uri}/verdict"), Some(&chief), Some(json!({"verdict": "Guilty"})))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::PUT, &format!("{case_uri}/verdict"), Some(&judge_token), Some(json!({"verdict": "Guilty; fine upheld"})))
        .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "Decided");

    let (_, body) = app.call(Method::GET, &case_uri, Some(&admin), None).await?;
    assert_eq!(body["data"]["statements"].as_array().map(Vec::len), Some(1));

    // citizen lookup
    let (status, _) = app
        .call(Method::POST, "/Public/request-otp", None, Some(json!({"cnic": "35202-4444444-4", "email": "bilal@example.com"})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    let code = otp_code(&app.mailer.last_body_for("bilal@example.com").unwrap_or_default());
    let (status, body) = app
        .call(
            Method::POST,
            "/Public/status",
            None,
            Some(json!({"cnic": "3520244444444", "email": "bilal@example.com", "otp": code})),
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["accused_name"], "Bilal Ahmed");
    assert_eq!(body["data"]["challans"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["firs"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["cases"][0]["status"], "Decided");
    Ok(())
}

#[tokio::test]
async fn password_reset_through_mailed_code() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, _) = app
        .call(Method::POST, "/Auth/forgot-password", None, Some(json!({"email": "nobody@example.com"})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(app.mailer.sent().is_empty());

    let (status, _) = app
        .call(Method::POST, "/Auth/forgot-password", None, Some(json!({"email": "Admin@Noise.example.com"})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    let code = otp_code(&app.mailer.last_body_for("admin@noise.example.com").unwrap_or_default());

    let (status, _) = app
        .call(
            Method::POST,
            "/Auth/reset-password",
            None,
            Some(json!({"email": "admin@noise.example.com", "otp": "000000x", "new_password": "Brand-new-pass1"})),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .call(
            Method::POST,
            "/Auth/reset-password",
            None,
            Some(json!({"email": "admin@noise.example.com", "otp": code, "new_password": "Brand-new-pass1"})),
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    app.login("admin", "Brand-new-pass1").await?;
    Ok(())
}

#[tokio::test]
async fn swagger_document_is_served() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.call(Method::GET, "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/Challan/create"].is_object());
    Ok(())
}
