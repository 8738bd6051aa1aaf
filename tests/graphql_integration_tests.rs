mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

use exchange_volume_backend::{AppState, app_router};

use crate::common::{seed_exchange, seed_log, setup_test_db, utc_day};

async fn build_test_router() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    let app = app_router(AppState::new(db.clone()));
    (app, db)
}

async fn graphql(app: Router, query: &str) -> Value {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "query": query }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_exchange_by_ticker() {
    let (app, db) = build_test_router().await;
    seed_exchange(&db, "LooksRare", "LOOKS").await.unwrap();
    seed_exchange(&db, "OpenSea", "OS").await.unwrap();

    let json = graphql(
        app,
        r#"{ exchange(ticker: "LOOKS") { id name ticker tokenAddress tokenCap tokenSupply } }"#,
    )
    .await;

    assert!(json.get("errors").is_none(), "unexpected errors: {json}");
    let exchange = &json["data"]["exchange"];
    assert_eq!(exchange["ticker"], "LOOKS");
    assert_eq!(exchange["name"], "LooksRare");
    assert_eq!(exchange["tokenCap"].as_f64(), Some(1_000_000_000.0));
}

#[tokio::test]
async fn test_unknown_ticker_is_null() {
    let (app, db) = build_test_router().await;
    seed_exchange(&db, "LooksRare", "LOOKS").await.unwrap();

    let json = graphql(app, r#"{ exchange(ticker: "NOPE") { id name } }"#).await;

    assert!(json.get("errors").is_none(), "unexpected errors: {json}");
    assert!(json["data"]["exchange"].is_null());
}

#[tokio::test]
async fn test_exchange_daily_logs_in_insertion_order() {
    let (app, db) = build_test_router().await;
    let looks = seed_exchange(&db, "LooksRare", "LOOKS").await.unwrap();
    let other = seed_exchange(&db, "OpenSea", "OS").await.unwrap();

    // inserted out of date order on purpose
    seed_log(&db, looks.id, utc_day(2022, 1, 20), dec!(50.7), None).await.unwrap();
    seed_log(&db, looks.id, utc_day(2022, 1, 5), dec!(100), Some(dec!(40))).await.unwrap();
    seed_log(&db, other.id, utc_day(2022, 1, 6), dec!(9), None).await.unwrap();

    let json = graphql(
        app,
        r#"{ exchange(ticker: "LOOKS") {
            dailyLogs { id date dailyVolume dailyVolumeExcludingZeroFee exchangeId priceHigh priceLow }
        } }"#,
    )
    .await;

    assert!(json.get("errors").is_none(), "unexpected errors: {json}");
    let logs = json["data"]["exchange"]["dailyLogs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);

    assert_eq!(logs[0]["dailyVolume"].as_f64(), Some(50.7));
    assert!(logs[0]["dailyVolumeExcludingZeroFee"].is_null());
    assert!(logs[0]["priceHigh"].is_null());
    assert_eq!(logs[1]["dailyVolume"].as_f64(), Some(100.0));
    assert_eq!(logs[1]["dailyVolumeExcludingZeroFee"].as_f64(), Some(40.0));
    assert!(logs.iter().all(|log| log["exchangeId"] == looks.id));
}

#[tokio::test]
async fn test_exchange_without_logs_has_empty_list() {
    let (app, db) = build_test_router().await;
    seed_exchange(&db, "LooksRare", "LOOKS").await.unwrap();

    let json = graphql(app, r#"{ exchange(ticker: "LOOKS") { dailyLogs { id } } }"#).await;

    assert_eq!(json["data"]["exchange"]["dailyLogs"], json!([]));
}

#[tokio::test]
async fn test_monthly_volume_floors_total() {
    let (app, db) = build_test_router().await;
    let looks = seed_exchange(&db, "LooksRare", "LOOKS").await.unwrap();

    seed_log(&db, looks.id, utc_day(2022, 1, 5), dec!(100), None).await.unwrap();
    seed_log(&db, looks.id, utc_day(2022, 1, 20), dec!(50.7), None).await.unwrap();
    // outside the window on both sides
    seed_log(&db, looks.id, utc_day(2021, 12, 31), dec!(1000), Some(dec!(1000))).await.unwrap();
    seed_log(&db, looks.id, utc_day(2022, 2, 1), dec!(1000), Some(dec!(1000))).await.unwrap();

    let json = graphql(
        app,
        r#"{ volume(month: 0, year: 2022) { currency allVolume volumeExcludingZeroFee } }"#,
    )
    .await;

    assert!(json.get("errors").is_none(), "unexpected errors: {json}");
    let volume = &json["data"]["volume"];
    assert_eq!(volume["currency"], "ETH");
    assert_eq!(volume["allVolume"].as_f64(), Some(150.0));
    assert_eq!(volume["volumeExcludingZeroFee"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_empty_month_volume_is_zero() {
    let (app, _db) = build_test_router().await;

    let json = graphql(
        app,
        r#"{ volume(month: 5, year: 2019) { currency allVolume volumeExcludingZeroFee } }"#,
    )
    .await;

    assert_eq!(
        json["data"]["volume"],
        json!({ "currency": "ETH", "allVolume": 0.0, "volumeExcludingZeroFee": 0.0 })
    );
}

#[tokio::test]
async fn test_month_twelve_is_january_of_next_year() {
    let (app, db) = build_test_router().await;
    let looks = seed_exchange(&db, "LooksRare", "LOOKS").await.unwrap();

    seed_log(&db, looks.id, utc_day(2022, 12, 31), dec!(7), None).await.unwrap();
    seed_log(&db, looks.id, utc_day(2023, 1, 1), dec!(11), Some(dec!(3.5))).await.unwrap();

    let rolled = graphql(
        app.clone(),
        r#"{ volume(month: 12, year: 2022) { allVolume volumeExcludingZeroFee } }"#,
    )
    .await;
    let january = graphql(
        app.clone(),
        r#"{ volume(month: 0, year: 2023) { allVolume volumeExcludingZeroFee } }"#,
    )
    .await;
    let december = graphql(app, r#"{ volume(month: 11, year: 2022) { allVolume } }"#).await;

    assert_eq!(rolled["data"], january["data"]);
    assert_eq!(january["data"]["volume"]["allVolume"].as_f64(), Some(11.0));
    assert_eq!(january["data"]["volume"]["volumeExcludingZeroFee"].as_f64(), Some(3.0));
    assert_eq!(december["data"]["volume"]["allVolume"].as_f64(), Some(7.0));
}

#[tokio::test]
async fn test_volume_defaults_to_current_month() {
    let (app, _db) = build_test_router().await;

    let json = graphql(app, r#"{ volume { currency allVolume } }"#).await;

    assert!(json.get("errors").is_none(), "unexpected errors: {json}");
    assert_eq!(json["data"]["volume"]["allVolume"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_health() {
    let (app, _db) = build_test_router().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["database"], "up");
}

#[tokio::test]
async fn test_unrepresentable_month_is_graphql_error() {
    let (app, _db) = build_test_router().await;

    let json = graphql(
        app,
        r#"{ volume(year: 2147483647, month: 12) { currency allVolume volumeExcludingZeroFee } }"#,
    )
    .await;

    let errors = json["errors"].as_array().expect("expected a GraphQL error");
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0]["message"].as_str().unwrap().contains("out of range"),
        "unexpected error: {json}"
    );
    assert_eq!(errors[0]["path"], json!(["volume"]));
    assert!(json["data"].is_null());
}
