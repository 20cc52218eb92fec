//! Ticket CRUD endpoints.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::read_json_body;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use ticketd_core::{Ticket, TicketPayload};
use ticketd_store::{TicketPage, TicketQuery, TicketRepo};

/// GET /api/tickets - List tickets with filtering, search and pagination.
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
) -> ApiResult<Json<TicketPage>> {
    let page = state.repo.list(&query).await?;
    Ok(Json(page))
}

/// GET /api/tickets/{id} - Get a ticket by id.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state
        .repo
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("ticket not found".to_string()))?;
    Ok(Json(ticket))
}

/// POST /api/tickets - Create a ticket.
pub async fn create_ticket(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let payload: TicketPayload = read_json_body(req).await?;
    let ticket = state.repo.create(payload).await?;

    tracing::info!(ticket_id = %ticket.id, "ticket created");
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// PUT /api/tickets/{id} - Replace a ticket.
pub async fn replace_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    req: Request,
) -> ApiResult<Json<Ticket>> {
    let payload: TicketPayload = read_json_body(req).await?;
    let ticket = state.repo.replace(&id, payload).await?;
    Ok(Json(ticket))
}

/// PATCH /api/tickets/{id} - Partially update a ticket.
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    req: Request,
) -> ApiResult<Json<Ticket>> {
    let patch: TicketPayload = read_json_body(req).await?;
    let ticket = state.repo.update(&id, patch).await?;
    Ok(Json(ticket))
}

/// DELETE /api/tickets/{id} - Delete a ticket.
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.repo.delete(&id).await?;

    tracing::info!(ticket_id = %id, "ticket deleted");
    Ok(StatusCode::NO_CONTENT)
}
