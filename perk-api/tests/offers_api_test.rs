use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use perk_api::{app, middleware::auth::MerchantClaims, AppState, AuthConfig};
use perk_core::Merchant;
use perk_offer::{OfferTierScaler, OfferValidator};
use perk_store::{InMemoryMerchantStore, InMemoryOfferStore};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test-secret";

struct Harness {
    router: Router,
    offers: Arc<InMemoryOfferStore>,
    merchant: Uuid,
}

fn harness() -> Harness {
    let merchant = Uuid::new_v4();
    let offers = Arc::new(InMemoryOfferStore::new());
    let merchants = Arc::new(InMemoryMerchantStore::with_merchants([Merchant {
        id: merchant,
        display_name: "Corner Bakery".to_string(),
    }]));

    let state = AppState {
        offers: offers.clone(),
        merchants,
        validator: OfferValidator::default(),
        scaler: OfferTierScaler::default(),
        auth: AuthConfig { secret: SECRET.to_string() },
    };

    Harness { router: app(state), offers, merchant }
}

fn token(sub: Uuid, role: &str) -> String {
    let claims = MerchantClaims {
        sub: sub.to_string(),
        email: Some("owner@example.com".to_string()),
        role: role.to_string(),
        exp: (jsonwebtoken::get_current_timestamp() + 3600) as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn percent_offer(value: i64, min_followers: i64) -> Value {
    json!({
        "discount_type": "percent",
        "discount_value": value,
        "min_followers": min_followers,
        "start_at": "2026-11-01",
        "end_at": "2026-12-31",
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let h = harness();
    let (status, body) = send(&h.router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_requires_authenticated_merchant() {
    let h = harness();

    let (status, _) = send(&h.router, "GET", "/v1/offers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&h.router, "GET", "/v1/offers", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let anon = token(h.merchant, "anon");
    let (status, _) = send(&h.router, "GET", "/v1/offers", Some(&anon), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_lists_follower_tiers() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let (status, body) = send(&h.router, "GET", "/v1/offers/tiers", Some(&t), None).await;
    assert_eq!(status, StatusCode::OK);

    let tiers = body.as_array().unwrap();
    assert_eq!(tiers.len(), 8);
    assert_eq!(tiers[0], json!({ "label": "500+", "min_followers": 500 }));
    assert_eq!(tiers[7]["label"], "100K+");
    assert_eq!(tiers[7]["min_followers"], 100_000);
}

#[tokio::test]
async fn test_validate_reports_field_errors() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let (status, body) = send(&h.router, "POST", "/v1/offers/validate", Some(&t), Some(percent_offer(7, 1000))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"]["discount_value"], "invalid percentage");

    let (_, body) = send(&h.router, "POST", "/v1/offers/validate", Some(&t), Some(percent_offer(15, 1000))).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["errors"], json!({}));
}

#[tokio::test]
async fn test_scaling_preview() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let (status, body) = send(&h.router, "POST", "/v1/offers/scaling", Some(&t), Some(percent_offer(10, 1000))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "-10% at Corner Bakery");

    let ladder = body["ladder"].as_array().unwrap();
    let values: Vec<i64> = ladder.iter().map(|r| r["discount_value"].as_i64().unwrap()).collect();
    assert_eq!(values, vec![20, 30, 40, 50, 60, 70]);
    assert_eq!(ladder[5]["title"], "-70% at Corner Bakery");
    assert!(ladder.iter().all(|r| r["selected"] == true));
}

#[tokio::test]
async fn test_scaling_preview_caps_huge_coupon() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let offer = json!({
        "discount_type": "coupon",
        "discount_value": i64::MAX / 2,
        "min_followers": 500,
        "start_at": "2026-11-01",
    });
    let (status, body) = send(&h.router, "POST", "/v1/offers/scaling", Some(&t), Some(offer)).await;
    assert_eq!(status, StatusCode::OK);

    let ladder = body["ladder"].as_array().unwrap();
    assert_eq!(ladder.len(), 7);
    assert!(ladder.iter().all(|r| r["discount_value"] == 150));
    assert!(ladder.iter().all(|r| r["title"] == "Free at Corner Bakery"));
}

#[tokio::test]
async fn test_scaling_preview_rejects_invalid_base() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let offer = json!({
        "discount_type": "coupon",
        "discount_value": 0,
        "min_followers": 1000,
        "start_at": "2026-11-01",
    });
    let (status, body) = send(&h.router, "POST", "/v1/offers/scaling", Some(&t), Some(offer)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["discount_value"], "invalid fixed amount");
}

#[tokio::test]
async fn test_create_keeps_only_selected_rungs() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let (_, preview) = send(&h.router, "POST", "/v1/offers/scaling", Some(&t), Some(percent_offer(10, 5000))).await;
    let mut scaling = preview["ladder"].as_array().unwrap().clone();
    assert_eq!(scaling.len(), 4);
    scaling[1]["selected"] = json!(false);
    // client-side edits to values are ignored
    scaling[0]["discount_value"] = json!(95);

    let mut request = percent_offer(10, 5000);
    request["scaling"] = Value::Array(scaling);

    let (status, body) = send(&h.router, "POST", "/v1/offers", Some(&t), Some(request)).await;
    assert_eq!(status, StatusCode::CREATED);

    let created = body.as_array().unwrap();
    let tiers: Vec<i64> = created.iter().map(|o| o["min_followers"].as_i64().unwrap()).collect();
    let values: Vec<i64> = created.iter().map(|o| o["discount_value"].as_i64().unwrap()).collect();
    assert_eq!(tiers, vec![5000, 10000, 50000, 100000]);
    assert_eq!(values, vec![10, 20, 40, 50]);
    assert_eq!(created[0]["title"], "-10% at Corner Bakery");
    assert!(created.iter().all(|o| o["start_at"] == "2026-11-01" && o["is_active"] == true));
    assert_eq!(h.offers.len().await, 4);
}

#[tokio::test]
async fn test_create_without_profile_is_not_found() {
    let h = harness();
    let stranger = token(Uuid::new_v4(), "authenticated");

    let (status, _) = send(&h.router, "POST", "/v1/offers", Some(&stranger), Some(percent_offer(10, 500))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(h.offers.len().await, 0);
}

#[tokio::test]
async fn test_update_revalidates_merged_offer() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let mut request = percent_offer(10, 500);
    request["title"] = json!("Weekend special");
    let (_, created) = send(&h.router, "POST", "/v1/offers", Some(&t), Some(request)).await;
    let id = created[0]["id"].as_str().unwrap().to_string();
    assert_eq!(created[0]["title"], "Weekend special");

    let uri = format!("/v1/offers/{}", id);
    let (status, body) = send(&h.router, "PATCH", &uri, Some(&t), Some(json!({ "discount_value": 25, "is_active": false }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount_value"], 25);
    assert_eq!(body["is_active"], false);
    assert_eq!(body["title"], "Weekend special");

    let (status, body) = send(&h.router, "PATCH", &uri, Some(&t), Some(json!({ "end_at": "2026-10-01" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["end_at"], "end date before start date");

    let other = token(Uuid::new_v4(), "authenticated");
    let (status, _) = send(&h.router, "PATCH", &uri, Some(&other), Some(json!({ "discount_value": 50 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_own_offers() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    send(&h.router, "POST", "/v1/offers", Some(&t), Some(percent_offer(20, 2000))).await;

    let (status, body) = send(&h.router, "GET", "/v1/offers", Some(&t), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let other = token(Uuid::new_v4(), "authenticated");
    let (_, body) = send(&h.router, "GET", "/v1/offers", Some(&other), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_profile_update() {
    let h = harness();
    let t = token(h.merchant, "authenticated");

    let (status, body) = send(&h.router, "PUT", "/v1/merchant/profile", Some(&t), Some(json!({ "display_name": "  Sunrise Café " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Sunrise Café");

    let (_, body) = send(&h.router, "GET", "/v1/merchant/profile", Some(&t), None).await;
    assert_eq!(body["display_name"], "Sunrise Café");

    let (status, body) = send(&h.router, "PUT", "/v1/merchant/profile", Some(&t), Some(json!({ "display_name": "   " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["display_name"], "display name required");
}
