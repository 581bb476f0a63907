//! Mock user handlers.
//!
//! The listing is a fixed pair of records and creation echoes the submitted
//! document without storing it.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{ErrorResponse, User, UserCreated, UserList};
use crate::service::ServiceState;

/// Tracing target for user operations.
const TRACING_TARGET: &str = "devops_server::handler::users";

fn fixed_users() -> Vec<User> {
    vec![
        User::new(1, "John Doe", "john@example.com"),
        User::new(2, "Jane Smith", "jane@example.com"),
    ]
}

/// Lists all users.
#[tracing::instrument(skip_all)]
async fn list_users() -> Result<(StatusCode, Json<UserList>)> {
    let users = fixed_users();

    tracing::debug!(target: TRACING_TARGET, count = users.len(), "Listing users");
    Ok((StatusCode::OK, Json(UserList { users })))
}

fn list_users_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List users")
        .description("Returns the fixed set of demo users.")
        .response::<200, Json<UserList>>()
}

/// Accepts a user document and echoes it back.
#[tracing::instrument(skip_all)]
async fn create_user(
    Json(user): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<UserCreated>)> {
    tracing::info!(target: TRACING_TARGET, "User creation requested");
    Ok((StatusCode::CREATED, Json(UserCreated::new(user))))
}

fn create_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create user")
        .description("Echoes any JSON document back. Nothing is validated or stored.")
        .response::<201, Json<UserCreated>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the user routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/users",
            get_with(list_users, list_users_docs).post_with(create_user, create_user_docs),
        )
        .with_path_items(|item| item.tag("Users"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn list_users_is_fixed() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        for _ in 0..2 {
            let response = server.get("/api/users").await;
            response.assert_status_ok();

            let list = response.json::<UserList>();
            assert_eq!(list.users, fixed_users());
            assert_eq!(list.users[0].name, "John Doe");
            assert_eq!(list.users[1].email, "jane@example.com");
        }

        Ok(())
    }

    #[tokio::test]
    async fn create_user_echoes_body() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;
        let user = json!({ "name": "Test User", "email": "test@example.com" });

        let response = server.post("/api/users").json(&user).await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "message": "User created successfully",
            "user": user,
        }));
        Ok(())
    }

    #[tokio::test]
    async fn create_user_accepts_any_json() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.post("/api/users").json(&json!([1, 2, 3])).await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<UserCreated>().user, json!([1, 2, 3]));
        Ok(())
    }

    #[tokio::test]
    async fn create_user_rejects_malformed_json() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/api/users")
            .bytes("{\"name\": ".into())
            .content_type("application/json")
            .await;
        response.assert_status_bad_request();

        let body = response.json::<serde_json::Value>();
        assert!(body["error"].is_string());
        Ok(())
    }
}
