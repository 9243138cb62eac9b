//! Event catalog operations.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_database::repositories::event::EventRepository;
use lumen_database::repositories::registration::RegistrationRepository;
use lumen_entity::event::model::{CreateEvent, UpdateEvent};
use lumen_entity::event::{Event, EventFilter};

use crate::context::RequestContext;

use super::view::EventView;

/// Catalog listing, gated detail, and admin CRUD.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Event repository.
    event_repo: EventRepository,
    /// Registration repository (for own-registration status in views).
    registration_repo: RegistrationRepository,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        event_repo: EventRepository,
        registration_repo: RegistrationRepository,
    ) -> Self {
        Self {
            event_repo,
            registration_repo,
        }
    }

    /// List events matching the filter, date ascending.
    ///
    /// Listing is open to every access level; only details are gated.
    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let normalized = filter.normalized()?;
        self.event_repo.list(&normalized).await
    }

    /// Gated detail view of a single event for the current caller.
    ///
    /// Pending and rejected accounts are confined to catalog summaries;
    /// the detail route refuses them outright rather than serving a
    /// redacted view.
    pub async fn get_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<EventView, AppError> {
        ctx.require_member()?;

        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {event_id} not found")))?;

        let my_status = self
            .registration_repo
            .find_live(ctx.user_id, event_id)
            .await?
            .map(|r| r.payment_status);

        Ok(EventView::compose(event, ctx.access, my_status))
    }

    /// Create a new event (admin only).
    pub async fn create_event(
        &self,
        ctx: &RequestContext,
        mut data: CreateEvent,
    ) -> Result<Event, AppError> {
        ctx.require_admin()?;
        validate_event_fields(data.capacity, data.price)?;
        data.created_by = Some(ctx.user_id);

        let event = self.event_repo.create(&data).await?;
        info!(event_id = %event.id, admin_id = %ctx.user_id, "Event created");
        Ok(event)
    }

    /// Apply a partial update to an event (admin only).
    pub async fn update_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        data: UpdateEvent,
    ) -> Result<Event, AppError> {
        ctx.require_admin()?;
        validate_event_fields(data.capacity.unwrap_or(0), data.price.unwrap_or(Decimal::ZERO))?;

        let event = self.event_repo.update(event_id, &data).await?;
        info!(event_id = %event.id, admin_id = %ctx.user_id, "Event updated");
        Ok(event)
    }

    /// Delete an event (admin only).
    pub async fn delete_event(&self, ctx: &RequestContext, event_id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let deleted = self.event_repo.delete(event_id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Event {event_id} not found")));
        }
        info!(%event_id, admin_id = %ctx.user_id, "Event deleted");
        Ok(())
    }
}

fn validate_event_fields(capacity: i32, price: Decimal) -> Result<(), AppError> {
    if capacity < 0 {
        return Err(AppError::validation("Capacity must not be negative"));
    }
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_capacity_and_price_are_rejected() {
        assert!(validate_event_fields(-1, Decimal::ZERO).is_err());
        assert!(validate_event_fields(10, Decimal::new(-100, 2)).is_err());
        assert!(validate_event_fields(0, Decimal::ZERO).is_ok());
    }
}
