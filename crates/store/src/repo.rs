//! The ticket repository: query and mutation operations over the store.

use crate::error::{StoreError, StoreResult};
use crate::json::JsonStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ticketd_core::{Priority, Status, Ticket, TicketPayload};
use time::OffsetDateTime;

/// Page size used when the query does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on the requested page size.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Listing query parameters.
///
/// `status` and `priority` stay raw strings here: a value that is not one of
/// the accepted enum values is a no-op filter, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketQuery {
    /// Free-text search over title and description, case-insensitive.
    pub q: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One page of listing results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    /// Count of tickets matching the filters, before pagination.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub data: Vec<Ticket>,
}

/// Repository of ticket operations.
///
/// Every operation reads the canonical collection owned by the store;
/// mutations validate and look up before touching it, and persist durably
/// before reporting success.
#[async_trait]
pub trait TicketRepo: Send + Sync {
    /// List tickets matching a query: filter, search, sort, paginate.
    async fn list(&self, query: &TicketQuery) -> StoreResult<TicketPage>;

    /// Get a ticket by exact id.
    async fn get(&self, id: &str) -> StoreResult<Option<Ticket>>;

    /// Validate a full payload and create a new ticket.
    async fn create(&self, payload: TicketPayload) -> StoreResult<Ticket>;

    /// Overwrite every user-settable field of an existing ticket.
    async fn replace(&self, id: &str, payload: TicketPayload) -> StoreResult<Ticket>;

    /// Merge supplied fields onto an existing ticket.
    async fn update(&self, id: &str, patch: TicketPayload) -> StoreResult<Ticket>;

    /// Remove a ticket by id.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("ticket {id} not found"))
}

#[async_trait]
impl TicketRepo for JsonStore {
    async fn list(&self, query: &TicketQuery) -> StoreResult<TicketPage> {
        let q = query
            .q
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_lowercase();
        let status = query.status.as_deref().and_then(|s| Status::parse(s).ok());
        let priority = query
            .priority
            .as_deref()
            .and_then(|p| Priority::parse(p).ok());
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let tickets = self.tickets.lock().await;
        let mut matches: Vec<&Ticket> = tickets
            .iter()
            .filter(|t| {
                q.is_empty()
                    || t.title.to_lowercase().contains(&q)
                    || t.description.to_lowercase().contains(&q)
            })
            .filter(|t| status.is_none_or(|s| t.status == s))
            .filter(|t| priority.is_none_or(|p| t.priority == p))
            .collect();

        // Stable sort: tickets updated at the same instant keep collection order.
        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let total = matches.len();
        let offset = (page as usize - 1) * page_size as usize;
        let data = matches
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(TicketPage {
            total,
            page,
            page_size,
            data,
        })
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Ticket>> {
        let tickets = self.tickets.lock().await;
        Ok(tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, payload: TicketPayload) -> StoreResult<Ticket> {
        let draft = payload.into_draft().map_err(StoreError::Validation)?;
        let ticket = Ticket::new(draft, OffsetDateTime::now_utc());

        let mut tickets = self.tickets.lock().await;
        // Persist the successor collection before committing it to memory, so
        // a failed write leaves nothing behind for later reads.
        let mut next = tickets.clone();
        next.insert(0, ticket.clone());
        self.persist(&next).await?;
        *tickets = next;
        Ok(ticket)
    }

    async fn replace(&self, id: &str, payload: TicketPayload) -> StoreResult<Ticket> {
        let mut tickets = self.tickets.lock().await;
        let index = tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        let draft = payload.into_draft().map_err(StoreError::Validation)?;

        let mut next = tickets.clone();
        next[index].replace_with(draft, OffsetDateTime::now_utc());
        let updated = next[index].clone();
        self.persist(&next).await?;
        *tickets = next;
        Ok(updated)
    }

    async fn update(&self, id: &str, patch: TicketPayload) -> StoreResult<Ticket> {
        let mut tickets = self.tickets.lock().await;
        let index = tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;

        let errors = patch.validate(true);
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let mut next = tickets.clone();
        next[index].apply(&patch, OffsetDateTime::now_utc());
        let updated = next[index].clone();
        self.persist(&next).await?;
        *tickets = next;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut tickets = self.tickets.lock().await;
        let index = tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;

        let mut next = tickets.clone();
        next.remove(index);
        self.persist(&next).await?;
        *tickets = next;
        Ok(())
    }
}
