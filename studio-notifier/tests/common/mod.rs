use jwt_auth::test::create_jwt;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Once;
use uuid::Uuid;

pub const PRODUCE_NOTIFICATIONS_ROLE: &str = "studio_notifier_produce_notifications";

static INIT_ENV_ONCE: Once = Once::new();

pub fn init_env() {
    INIT_ENV_ONCE.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

pub fn address() -> String {
    std::env::var("STUDIO_NOTIFIER_BIND_ADDRESS").unwrap()
}

pub fn url(path: &str) -> String {
    format!("http://{}{}", address(), path)
}

pub fn encode_jwt(user_id: Uuid, roles: &[&str]) -> String {
    let jwt_algorithms = std::env::var("STUDIO_NOTIFIER_JWT_ALGORITHMS").unwrap();
    let jwt_key = std::env::var("STUDIO_NOTIFIER_JWT_KEY").unwrap();

    create_jwt(user_id, roles, jwt_algorithms, jwt_key)
}

///
/// Exchanges user's token for a realtime ticket
///
pub async fn fetch_ticket(client: &Client, user_id: Uuid) -> anyhow::Result<String> {
    let response = client
        .post(url("/api/v1/realtime/ticket"))
        .bearer_auth(encode_jwt(user_id, &[]))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.json::<Value>().await?;
    let ticket = body["ticket"].as_str().unwrap().to_string();

    Ok(ticket)
}

pub fn ws_url(ticket: &str) -> String {
    format!("ws://{}/ws/v1?ticket={ticket}", address())
}

///
/// Reports domain event as a portal backend would
///
pub async fn post_event(client: &Client, event: Value) -> anyhow::Result<u64> {
    let response = client
        .post(url("/api/v1/events"))
        .bearer_auth(encode_jwt(Uuid::new_v4(), &[PRODUCE_NOTIFICATIONS_ROLE]))
        .json(&event)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = response.json::<Value>().await?;
    let inserted = body["inserted"].as_u64().unwrap();

    Ok(inserted)
}

pub async fn fetch_count(client: &Client, user_id: Uuid) -> anyhow::Result<u64> {
    let response = client
        .get(url("/api/v1/notifications/unread-count"))
        .bearer_auth(encode_jwt(user_id, &[]))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.json::<Value>().await?;
    let count = body["count"].as_u64().unwrap();

    Ok(count)
}

pub async fn fetch_notifications(
    client: &Client,
    user_id: Uuid,
    query: &str,
) -> anyhow::Result<Vec<Value>> {
    let response = client
        .get(url(&format!("/api/v1/notifications{query}")))
        .bearer_auth(encode_jwt(user_id, &[]))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let notifications = response.json::<Vec<Value>>().await?;

    Ok(notifications)
}

///
/// Removes everything produced for the user during the test
///
pub async fn delete_user(client: &Client, user_id: Uuid) -> anyhow::Result<()> {
    post_event(
        client,
        serde_json::json!({ "type": "user_deleted", "user_id": user_id }),
    )
    .await?;

    Ok(())
}
