use importer::{TbaClient, TbaSettings, TbaSync};
use sqlx::PgPool;
use storage::{
    dto::{
        import::ScheduleSyncSummary,
        organization::{
            CreateOrganizationEventRequest, OrganizationApplication, OrganizationEventDetail,
            UpdateOrganizationEventRequest,
        },
        scout::ScoutedMatchFilter,
    },
    models::{MatchData2025, OrganizationEvent, UserOrganization},
    repository::{match_data::MatchDataRepository, organization::OrganizationRepository},
};

use crate::error::{WebError, WebResult};
use crate::features::active_event;

fn ensure_same_organization(membership: &UserOrganization, organization_id: i32) -> WebResult<()> {
    if membership.organization_id == organization_id {
        Ok(())
    } else {
        Err(WebError::Forbidden(format!(
            "Not a member of organization {}",
            organization_id
        )))
    }
}

pub async fn applications(
    pool: &PgPool,
    membership: &UserOrganization,
) -> WebResult<Vec<OrganizationApplication>> {
    Ok(OrganizationRepository::new(pool)
        .pending_applications(membership.organization_id)
        .await?)
}

pub async fn create_event(
    pool: &PgPool,
    membership: &UserOrganization,
    request: &CreateOrganizationEventRequest,
) -> WebResult<OrganizationEvent> {
    ensure_same_organization(membership, request.organization_id)?;

    OrganizationRepository::new(pool)
        .create_event(request.organization_id, &request.event_key)
        .await
        .map_err(|e| match e {
            storage::error::StorageError::NotFound => {
                WebError::NotFound(format!("Event {} does not exist", request.event_key))
            }
            other => other.into(),
        })
}

/// Replaces the schedule of one of the organization's events with TBA's
pub async fn sync_matches(
    pool: &PgPool,
    settings: &TbaSettings,
    membership: &UserOrganization,
    event_key: &str,
) -> WebResult<ScheduleSyncSummary> {
    let events = OrganizationRepository::new(pool)
        .list_events(membership.organization_id)
        .await?;
    if !events.iter().any(|event| event.event_key == event_key) {
        return Err(WebError::NotFound(format!(
            "Organization is not attending {}",
            event_key
        )));
    }

    let client = TbaClient::new(settings)?;
    Ok(TbaSync::new(pool, &client).sync_schedule(event_key).await?)
}

pub async fn events(
    pool: &PgPool,
    membership: &UserOrganization,
    organization_id: i32,
) -> WebResult<Vec<OrganizationEventDetail>> {
    ensure_same_organization(membership, organization_id)?;

    Ok(OrganizationRepository::new(pool)
        .event_details(organization_id)
        .await?)
}

pub async fn update_events(
    pool: &PgPool,
    membership: &UserOrganization,
    updates: &[UpdateOrganizationEventRequest],
) -> WebResult<Vec<OrganizationEventDetail>> {
    let repo = OrganizationRepository::new(pool);
    repo.update_events(membership.organization_id, updates)
        .await?;

    Ok(repo.event_details(membership.organization_id).await?)
}

/// Submissions exported by the download, with the event they belong to
pub async fn export_rows(
    pool: &PgPool,
    membership: &UserOrganization,
) -> WebResult<(String, Vec<MatchData2025>)> {
    let event_key = active_event(pool, membership).await?;
    let rows = MatchDataRepository::new(pool)
        .list_2025(
            &event_key,
            membership.organization_id,
            &ScoutedMatchFilter::default(),
        )
        .await?;

    Ok((event_key, rows))
}
