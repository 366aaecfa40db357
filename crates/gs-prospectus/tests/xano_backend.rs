//! Fetch pipeline against an in-process fake Xano backend.

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{Value, json};
use std::collections::HashMap;

use gs_prospectus::constants::{COST_ERROR_MESSAGE, REVENUE_FALLBACK_MESSAGE};
use gs_prospectus::demo::build_demo_data;
use gs_prospectus::scenario::scale_series;
use gs_prospectus::{CostMode, EndpointConfig, FetchError, Scenario, XanoClient, load_dashboard};

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client_for(base: &str) -> XanoClient {
    let endpoints = EndpointConfig {
        base: Some(base.to_string()),
        ..Default::default()
    }
    .resolve();
    XanoClient::new(endpoints).unwrap()
}

fn healthy_backend() -> Router {
    Router::new()
        .route(
            "/api/revenue/streams",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let bump = if params.get("scenario").map(String::as_str) == Some("optimistic") { 100 } else { 0 };
                axum::Json(json!([
                    {"Mese": "2", "Rev_Estetiste_PRO": "50", "Rev_Influencer_PRO": 0, "Rev_Cabina": "12.4", "Rev_Saloni_PRO": bump},
                    {"Mese": 1, "Rev_Estetiste_PRO": 0, "Rev_Influencer_PRO": 0, "Rev_Cabina": 0, "Rev_Saloni_PRO": 0},
                    {"Mese": "abc", "Rev_Estetiste_PRO": 999},
                ]))
            }),
        )
        .route(
            "/api/kpi/summary",
            get(|| async { axum::Json(json!({"stylists": 1200, "salons": 45, "note": "text"})) }),
        )
        .route(
            "/api/gskiiicost",
            get(|| async {
                axum::Json(json!([
                    {"id": 1, "key": "infra", "label": "Infra & AI", "amount": 200, "frequency": 1,
                     "start_month": 1, "end_month": 24, "color": "#6366F1"},
                    {"id": 2, "key": "legal", "label": "Legale", "amount": "1500", "frequency": 0,
                     "start_month": 1, "end_month": 1, "color": "#EF4444"},
                ]))
            }),
        )
}

#[tokio::test]
async fn remote_rows_are_mapped_and_sorted() {
    let base = serve(healthy_backend()).await;
    let client = client_for(&base);

    let result = client.fetch_revenue(Scenario::Realistic).await;
    assert!(!result.used_fallback);
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.data[0].month, 1);
    assert_eq!(result.data[1].month, 2);
    assert_eq!(result.data[1].est_pro, 50.0);
    assert_eq!(result.data[1].cabina, 12.0);
}

#[tokio::test]
async fn scenario_is_sent_and_remote_rows_are_not_rescaled() {
    let base = serve(healthy_backend()).await;
    let client = client_for(&base);

    let result = client.fetch_revenue(Scenario::Optimistic).await;
    assert!(!result.used_fallback);
    assert_eq!(result.data[1].saloni_pro, 100.0);
    assert_eq!(result.data[1].est_pro, 50.0);
}

#[tokio::test]
async fn full_dashboard_from_healthy_backend() {
    let base = serve(healthy_backend()).await;
    let client = client_for(&base);

    let snapshot = load_dashboard(&client, Scenario::Realistic).await;
    assert!(snapshot.advisory.is_none());
    assert_eq!(snapshot.headline_kpis.len(), 2);
    assert_eq!(snapshot.headline_kpis[0].value, "1,200");

    let costs = snapshot.costs.expect("costs should load");
    let sum = costs.rows(CostMode::Sum);
    assert_eq!(sum.len(), 6);
    assert_eq!(sum[0].get("infra"), Some(800.0));
    assert_eq!(sum[0].get("legal"), Some(1500.0));
    assert_eq!(sum[1].get("legal"), Some(0.0));
    assert_eq!(costs.rows(CostMode::Average)[0].get("legal"), Some(375.0));
}

#[tokio::test]
async fn server_error_falls_back_to_scaled_demo_data() {
    let router = Router::new().route(
        "/api/revenue/streams",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(router).await;
    let client = client_for(&base);

    let result = client.fetch_revenue(Scenario::Conservative).await;
    assert!(result.used_fallback);
    assert_eq!(result.data, scale_series(&build_demo_data(), Scenario::Conservative));

    assert!(matches!(
        client.try_fetch_revenue(Scenario::Conservative).await,
        Err(FetchError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn empty_or_non_array_payload_falls_back() {
    let router = Router::new()
        .route("/empty/revenue/streams", get(|| async { axum::Json(json!([])) }))
        .route("/object/revenue/streams", get(|| async { axum::Json(json!({"rows": []})) }))
        .route("/text/revenue/streams", get(|| async { "not json" }));
    let base = serve(router).await;
    let root = base.trim_end_matches("/api");

    for (prefix, expect_empty) in [("empty", true), ("object", false), ("text", false)] {
        let client = client_for(&format!("{}/{}", root, prefix));
        let err = client.try_fetch_revenue(Scenario::Realistic).await.unwrap_err();
        if expect_empty {
            assert!(matches!(err, FetchError::Empty), "{}: {:?}", prefix, err);
        } else {
            assert!(matches!(err, FetchError::Malformed(_) | FetchError::Decode { .. }), "{}: {:?}", prefix, err);
        }
        let result = client.fetch_revenue(Scenario::Realistic).await;
        assert!(result.used_fallback, "{} should fall back", prefix);
        assert_eq!(result.data, build_demo_data());
    }
}

#[tokio::test]
async fn unreachable_backend_degrades_everywhere() {
    let client = client_for("http://127.0.0.1:1/api");

    let snapshot = load_dashboard(&client, Scenario::Optimistic).await;
    assert!(snapshot.used_fallback);
    assert_eq!(snapshot.advisory.as_deref(), Some(REVENUE_FALLBACK_MESSAGE));
    assert!(snapshot.headline_kpis.is_empty());
    assert!(snapshot.costs.is_none());
    assert_eq!(snapshot.cost_error.as_deref(), Some(COST_ERROR_MESSAGE));
    assert_eq!(snapshot.revenue, scale_series(&build_demo_data(), Scenario::Optimistic));
}

#[tokio::test]
async fn kpi_summary_must_be_an_object() {
    let router = Router::new().route("/api/kpi/summary", get(|| async { axum::Json(json!([1, 2, 3])) }));
    let base = serve(router).await;
    assert!(client_for(&base).fetch_kpis().await.is_none());
}

#[tokio::test]
async fn cost_payload_shape_errors_are_returned() {
    let router = Router::new().route(
        "/api/gskiiicost",
        get(|| async { axum::Json(Value::String("maintenance".into())) }),
    );
    let base = serve(router).await;
    assert!(matches!(
        client_for(&base).fetch_cost_config().await,
        Err(FetchError::Malformed(_))
    ));
}
