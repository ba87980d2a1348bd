use crate::{auth::auth::AuthUser, error::AppError, model::notification::Notification, store::Store};
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Notifications of one user, newest first
#[utoipa::path(
    get,
    path = "/api/notifications/{user_id}",
    params(
        ("user_id" = u64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Notifications", body = [Notification]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notification"
)]
pub async fn list_notifications(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    auth.require_self_or_staff(user_id)?;

    let mut items: Vec<Notification> = store.read(|d| {
        d.notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    });
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

    Ok(HttpResponse::Ok().json(items))
}

/// Mark a notification as read
///
/// Unknown ids and notifications of other users are ignored; the response is
/// always `{"success": true}`.
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = u64, Path, description = "Notification id")
    ),
    responses(
        (status = 200, description = "Acknowledged", body = Object, example = json!({
            "success": true
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notification"
)]
pub async fn mark_read(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let unread = store.read(|d| {
        d.notifications
            .iter()
            .any(|n| n.id == id && !n.read && auth.require_self_or_staff(n.user_id).is_ok())
    });

    if unread {
        store
            .into_inner()
            .update_blocking(move |d| -> Result<(), AppError> {
                if let Some(n) = d.notifications.iter_mut().find(|n| n.id == id) {
                    n.read = true;
                }
                Ok(())
            })
            .await?;
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
