//! Event repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use lumen_core::error::{AppError, ErrorKind};
use lumen_core::error::AppResult;
use lumen_entity::event::filter::NormalizedFilter;
use lumen_entity::event::model::{CreateEvent, UpdateEvent};
use lumen_entity::event::Event;

/// Repository for event catalog CRUD and filtered listing.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find event by id", e)
            })
    }

    /// List events matching the filter, ordered by date ascending.
    ///
    /// No pagination: the catalog is small by design and the ordering
    /// contract is part of the API surface.
    pub async fn list(&self, filter: &NormalizedFilter) -> AppResult<Vec<Event>> {
        let search_pattern = filter.search.as_ref().map(|s| format!("%{s}%"));

        sqlx::query_as::<_, Event>(
            "SELECT * FROM events \
             WHERE ($1::event_category IS NULL OR category = $1) \
               AND ($2::text IS NULL OR title ILIKE $2) \
             ORDER BY date ASC, time ASC",
        )
        .bind(filter.category)
        .bind(search_pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    /// Create a new event.
    pub async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (title, description, date, time, location, category, \
                                 capacity, price, currency, registration_deadline, \
                                 meeting_url, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.date)
        .bind(data.time)
        .bind(&data.location)
        .bind(data.category)
        .bind(data.capacity)
        .bind(data.price)
        .bind(&data.currency)
        .bind(data.registration_deadline)
        .bind(&data.meeting_url)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    /// Apply a partial update to an event.
    pub async fn update(&self, id: Uuid, data: &UpdateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                date = COALESCE($4, date), \
                time = COALESCE($5, time), \
                location = COALESCE($6, location), \
                category = COALESCE($7, category), \
                capacity = COALESCE($8, capacity), \
                price = COALESCE($9, price), \
                registration_deadline = COALESCE($10, registration_deadline), \
                meeting_url = COALESCE($11, meeting_url), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.date)
        .bind(data.time)
        .bind(&data.location)
        .bind(data.category)
        .bind(data.capacity)
        .bind(data.price)
        .bind(data.registration_deadline)
        .bind(&data.meeting_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))?
        .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))
    }

    /// Set or replace the event's default payment QR-code URL.
    pub async fn set_payment_qr(&self, id: Uuid, qr_url: &str) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET payment_qr_url = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(qr_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set payment QR", e))?
        .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))
    }

    /// Delete an event. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }
}
