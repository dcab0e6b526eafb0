use axum::{
    extract::{Request, State},
    http::{header::WWW_AUTHENTICATE, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{authorization::Basic, Authorization};
use axum_extra::TypedHeader;

use crate::models::{AppState, CurrentUser};

const CHALLENGE: &str = "Basic realm=\"Authentication Required\"";

/// Require valid Basic credentials; the operator is stored as a request extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(TypedHeader(Authorization(basic))) = credentials else {
        return challenge();
    };

    let store = state.credentials.clone();
    let username = basic.username().to_string();
    let password = basic.password().to_string();
    // PBKDF2 is deliberately slow; keep it off the async workers.
    let verified = tokio::task::spawn_blocking(move || store.verify(&username, &password))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(%e, "Credential check panicked");
            None
        });

    match verified {
        Some(username) => {
            request.extensions_mut().insert(CurrentUser { username });
            next.run(request).await
        }
        None => {
            tracing::warn!(user = basic.username(), "Rejected Basic credentials");
            challenge()
        }
    }
}

fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, CHALLENGE)],
        "Unauthorized Access",
    )
        .into_response()
}
