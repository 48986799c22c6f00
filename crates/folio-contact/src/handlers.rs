//! HTTP handlers for `/api/contact`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::ContactError;
use crate::model::{preview, ContactRequest, CreatedResponse, ErrorResponse, FieldError};
use crate::validation::validate;
use crate::AppState;

/// Characters of the message body included in the receipt log line.
const LOG_PREVIEW_CHARS: usize = 50;

fn validation_failed(details: Vec<FieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Validation failed").with_details(details)),
    )
        .into_response()
}

/// `POST /api/contact`
pub async fn create_message(
    State(state): State<AppState>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return validation_failed(vec![FieldError::new("body", rejection.body_text())]);
        }
    };

    if let Err(details) = validate(&request) {
        tracing::debug!(fields = details.len(), "contact message rejected");
        return validation_failed(details);
    }

    match state.store.create(request).await {
        Ok(message) => {
            tracing::info!(
                name = %message.name,
                email = %message.email,
                message = %preview(&message.message, LOG_PREVIEW_CHARS),
                "New contact message received"
            );
            (
                StatusCode::CREATED,
                Json(CreatedResponse {
                    success: true,
                    message: "Message received successfully".into(),
                    id: message.id,
                }),
            )
                .into_response()
        }
        Err(ContactError::Validation(details)) => validation_failed(details),
        Err(e) => {
            tracing::error!("Error processing contact message: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to process message")),
            )
                .into_response()
        }
    }
}

/// `GET /api/contact`
pub async fn list_messages(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list().await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => {
            tracing::error!("Error fetching contact messages: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch messages")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests;
