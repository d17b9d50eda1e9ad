use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::Role,
    dto::{input, output},
    error::Error,
};
use axum::{
    extract::{ConnectInfo, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::Response,
    routing::{delete, get, post, put},
    Json, Router,
};
use bson::oid::ObjectId;
use jwt_auth::{require_all_roles, User};
use std::net::SocketAddr;
use time::OffsetDateTime;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/notifications", get(get_notifications))
        .route(
            "/api/v1/notifications/unread-count",
            get(get_unread_count),
        )
        .route(
            "/api/v1/notifications/read",
            put(put_all_read).delete(delete_all_read),
        )
        .route("/api/v1/notifications/:id/read", put(put_read))
        .route("/api/v1/notifications/:id", delete(delete_notification))
        .route("/api/v1/events", post(post_event))
        .route("/api/v1/realtime", delete(delete_realtime))
        .route("/api/v1/realtime/ticket", post(post_realtime_ticket))
        .route_layer(application_middleware.auth.clone())
        // Authenticated with a ticket, browsers can't send the bearer header here
        .route("/ws/v1", get(websocket_upgrade))
}

async fn get_notifications(
    user: User,
    State(state): State<ApplicationState>,
    Query(pagination): Query<input::Pagination>,
    Query(filters): Query<input::NotificationFilters>,
) -> Result<Json<Vec<output::Notification>>, Error> {
    let notifications = state
        .notifications_service
        .find_notifications(user.id, pagination, filters)
        .await?;

    let now = OffsetDateTime::now_utc();
    let notifications = notifications
        .into_iter()
        .map(|notification| output::Notification::new(notification, now))
        .collect();

    Ok(Json(notifications))
}

async fn get_unread_count(
    user: User,
    State(state): State<ApplicationState>,
) -> Result<Json<output::Count>, Error> {
    let count = state.notifications_service.unread_count(user.id).await?;

    Ok(Json(output::Count { count }))
}

async fn put_all_read(
    user: User,
    State(state): State<ApplicationState>,
) -> Result<Json<output::Count>, Error> {
    let count = state.notifications_service.mark_all_read(user.id).await?;

    Ok(Json(output::Count { count }))
}

async fn put_read(
    user: User,
    State(state): State<ApplicationState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = parse_notification_id(&id)?;
    state.notifications_service.mark_read(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_all_read(
    user: User,
    State(state): State<ApplicationState>,
) -> Result<Json<output::Count>, Error> {
    let count = state.notifications_service.delete_all_read(user.id).await?;

    Ok(Json(output::Count { count }))
}

async fn delete_notification(
    user: User,
    State(state): State<ApplicationState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = parse_notification_id(&id)?;
    state.notifications_service.delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn post_event(
    user: User,
    State(state): State<ApplicationState>,
    Json(event): Json<input::DomainEvent>,
) -> Result<(StatusCode, Json<output::Inserted>), Error> {
    require_all_roles(&user, &[Role::ProduceNotifications.as_ref()])?;

    let inserted = state.notifications_producer_service.produce(event).await;

    Ok((StatusCode::ACCEPTED, Json(output::Inserted { inserted })))
}

async fn delete_realtime(
    user: User,
    State(state): State<ApplicationState>,
) -> StatusCode {
    state.websockets_service.close_connections(user.id).await;

    StatusCode::NO_CONTENT
}

async fn post_realtime_ticket(
    user: User,
    State(state): State<ApplicationState>,
) -> Result<(StatusCode, Json<output::RealtimeTicket>), Error> {
    let ticket = state.tickets_service.issue(user.id).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn websocket_upgrade(
    State(state): State<ApplicationState>,
    ConnectInfo(address): ConnectInfo<SocketAddr>,
    ticket: Option<Query<input::RealtimeTicket>>,
    ws: WebSocketUpgrade,
) -> Result<Response, Error> {
    let Some(Query(ticket)) = ticket else {
        return Err(Error::TicketInvalid("ticket missing"));
    };
    let user_id = state.tickets_service.consume(ticket).await?;

    Ok(ws.on_upgrade(move |websocket| async move {
        state
            .websockets_service
            .handle_client(user_id, address, websocket)
            .await
    }))
}

fn parse_notification_id(id: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|_| Error::Validation("invalid notification id"))
}
