use std::collections::HashMap;

use sqlx::PgPool;

use crate::dto::organization::{
    CreateOrganizationRequest, OrganizationApplication, OrganizationEventDetail,
    UpdateOrganizationEventRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{
    Organization, OrganizationEvent, OrganizationFeatureSettings, UserOrganization, UserRole,
};

pub struct OrganizationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Creates the organization together with its default feature settings
    pub async fn create(&self, req: &CreateOrganizationRequest) -> Result<Organization> {
        let mut tx = self.pool.begin().await?;

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, team_number)
            VALUES ($1, $2)
            RETURNING id, name, team_number
            "#,
        )
        .bind(&req.name)
        .bind(req.team_number)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO organization_feature_settings (organization_id) VALUES ($1)")
            .bind(organization.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(organization)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Organization> {
        sqlx::query_as::<_, Organization>(
            "SELECT id, name, team_number FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn feature_settings(&self, organization_id: i32) -> Result<OrganizationFeatureSettings> {
        sqlx::query_as::<_, OrganizationFeatureSettings>(
            r#"
            SELECT id, organization_id, data_validation, match_video,
                   robot_pictures, scout_schedule, picklist
            FROM organization_feature_settings
            WHERE organization_id = $1
            "#,
        )
        .bind(organization_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Adds an event to the organization. The first event added becomes the
    /// active one; later ones start inactive.
    pub async fn create_event(&self, organization_id: i32, event_key: &str) -> Result<OrganizationEvent> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM frc_events WHERE event_key = $1)",
        )
        .bind(event_key)
        .fetch_one(self.pool)
        .await?;
        if !exists {
            return Err(StorageError::NotFound);
        }

        let event = sqlx::query_as::<_, OrganizationEvent>(
            r#"
            INSERT INTO organization_events (organization_id, event_key, public_data, active)
            VALUES (
                $1, $2, FALSE,
                NOT EXISTS (
                    SELECT 1 FROM organization_events
                    WHERE organization_id = $1 AND active
                )
            )
            RETURNING id, organization_id, event_key, public_data, active
            "#,
        )
        .bind(organization_id)
        .bind(event_key)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Organization event"))?;

        Ok(event)
    }

    pub async fn list_events(&self, organization_id: i32) -> Result<Vec<OrganizationEvent>> {
        let events = sqlx::query_as::<_, OrganizationEvent>(
            r#"
            SELECT id, organization_id, event_key, public_data, active
            FROM organization_events
            WHERE organization_id = $1
            "#,
        )
        .bind(organization_id)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn event_details(&self, organization_id: i32) -> Result<Vec<OrganizationEventDetail>> {
        let events = sqlx::query_as::<_, OrganizationEventDetail>(
            r#"
            SELECT e.event_key, e.short_name, e.event_name, e.week,
                   oe.public_data AS is_public, oe.active AS is_active
            FROM organization_events oe
            INNER JOIN frc_events e ON e.event_key = oe.event_key
            WHERE oe.organization_id = $1
            ORDER BY e.year, e.week, e.event_key
            "#,
        )
        .bind(organization_id)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Applies a complete set of event settings for the organization
    pub async fn update_events(
        &self,
        organization_id: i32,
        updates: &[UpdateOrganizationEventRequest],
    ) -> Result<()> {
        let existing = self.list_events(organization_id).await?;
        if existing.is_empty() {
            return Err(StorageError::NotFound);
        }
        validate_event_updates(&existing, updates)?;

        let mut tx = self.pool.begin().await?;
        for update in updates {
            sqlx::query(
                r#"
                UPDATE organization_events
                SET public_data = $3, active = $4
                WHERE organization_id = $1 AND event_key = $2
                "#,
            )
            .bind(organization_id)
            .bind(&update.event_key)
            .bind(update.is_public)
            .bind(update.is_active)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    pub async fn active_event(&self, organization_id: i32) -> Result<Option<OrganizationEvent>> {
        let event = sqlx::query_as::<_, OrganizationEvent>(
            r#"
            SELECT id, organization_id, event_key, public_data, active
            FROM organization_events
            WHERE organization_id = $1 AND active
            LIMIT 1
            "#,
        )
        .bind(organization_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }

    /// The event a member currently scouts: the organization's active event,
    /// or for guests without one, the event their membership is scoped to.
    pub async fn resolve_active_event(&self, membership: &UserOrganization) -> Result<String> {
        if let Some(event) = self.active_event(membership.organization_id).await? {
            return Ok(event.event_key);
        }

        match (membership.role, &membership.event_key) {
            (UserRole::Guest, Some(event_key)) => Ok(event_key.clone()),
            _ => Err(StorageError::NotFound),
        }
    }

    pub async fn pending_applications(&self, organization_id: i32) -> Result<Vec<OrganizationApplication>> {
        let applications = sqlx::query_as::<_, OrganizationApplication>(
            r#"
            SELECT u.display_name, u.email, uo.role, uo.joined
            FROM user_organizations uo
            INNER JOIN users u ON u.id = uo.user_id
            WHERE uo.organization_id = $1 AND uo.role = 'PENDING'
            ORDER BY uo.joined
            "#,
        )
        .bind(organization_id)
        .fetch_all(self.pool)
        .await?;

        Ok(applications)
    }
}

/// Checks that `updates` covers every existing event exactly once and leaves
/// exactly one event active.
pub fn validate_event_updates(
    existing: &[OrganizationEvent],
    updates: &[UpdateOrganizationEventRequest],
) -> Result<()> {
    if updates.is_empty() {
        return Err(StorageError::InvalidData("No event updates provided".to_string()));
    }

    if updates.iter().filter(|u| u.is_active).count() != 1 {
        return Err(StorageError::InvalidData(
            "Exactly one event must be active".to_string(),
        ));
    }

    let mut by_key = HashMap::new();
    for update in updates {
        if by_key.insert(update.event_key.as_str(), update).is_some() {
            return Err(StorageError::InvalidData(
                "Duplicate event keys provided".to_string(),
            ));
        }
    }

    if by_key.len() != existing.len() {
        return Err(StorageError::InvalidData(
            "Updates must be provided for every organization event".to_string(),
        ));
    }

    if existing
        .iter()
        .any(|event| !by_key.contains_key(event.event_key.as_str()))
    {
        return Err(StorageError::InvalidData("Unknown event key provided".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn existing(keys: &[&str]) -> Vec<OrganizationEvent> {
        keys.iter()
            .map(|key| OrganizationEvent {
                id: Uuid::new_v4(),
                organization_id: 1,
                event_key: key.to_string(),
                public_data: false,
                active: false,
            })
            .collect()
    }

    fn update(key: &str, active: bool) -> UpdateOrganizationEventRequest {
        UpdateOrganizationEventRequest {
            event_key: key.to_string(),
            is_public: true,
            is_active: active,
        }
    }

    fn message(result: Result<()>) -> String {
        match result {
            Err(StorageError::InvalidData(message)) => message,
            other => panic!("expected invalid data, got {:?}", other),
        }
    }

    #[test]
    fn test_complete_update_with_one_active_is_accepted() {
        let events = existing(&["2025a", "2025b"]);
        let updates = [update("2025a", false), update("2025b", true)];
        assert!(validate_event_updates(&events, &updates).is_ok());
    }

    #[test]
    fn test_exactly_one_active_required() {
        let events = existing(&["2025a", "2025b"]);
        let none = [update("2025a", false), update("2025b", false)];
        let both = [update("2025a", true), update("2025b", true)];
        assert_eq!(message(validate_event_updates(&events, &none)), "Exactly one event must be active");
        assert_eq!(message(validate_event_updates(&events, &both)), "Exactly one event must be active");
    }

    #[test]
    fn test_duplicates_rejected() {
        let events = existing(&["2025a", "2025b"]);
        let updates = [update("2025a", true), update("2025a", false)];
        assert_eq!(message(validate_event_updates(&events, &updates)), "Duplicate event keys provided");
    }

    #[test]
    fn test_every_event_must_be_covered() {
        let events = existing(&["2025a", "2025b"]);
        let missing = [update("2025a", true)];
        let unknown = [update("2025a", true), update("2025z", false)];
        assert_eq!(
            message(validate_event_updates(&events, &missing)),
            "Updates must be provided for every organization event"
        );
        assert_eq!(message(validate_event_updates(&events, &unknown)), "Unknown event key provided");
    }

    #[test]
    fn test_empty_update_rejected() {
        assert_eq!(
            message(validate_event_updates(&existing(&["2025a"]), &[])),
            "No event updates provided"
        );
    }
}
