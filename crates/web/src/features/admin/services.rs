use importer::{TbaClient, TbaSettings, TbaSync};
use sqlx::PgPool;
use storage::{
    dto::{
        import::{EventImportSummary, TeamImportSummary},
        organization::CreateOrganizationRequest,
    },
    models::Organization,
    repository::organization::OrganizationRepository,
};

use crate::error::WebResult;

pub async fn create_organization(
    pool: &PgPool,
    request: &CreateOrganizationRequest,
) -> WebResult<Organization> {
    Ok(OrganizationRepository::new(pool).create(request).await?)
}

pub async fn update_teams(pool: &PgPool, settings: &TbaSettings) -> WebResult<TeamImportSummary> {
    let client = TbaClient::new(settings)?;
    Ok(TbaSync::new(pool, &client).update_teams().await?)
}

pub async fn import_events(
    pool: &PgPool,
    settings: &TbaSettings,
    year: i32,
) -> WebResult<EventImportSummary> {
    let client = TbaClient::new(settings)?;
    Ok(TbaSync::new(pool, &client).import_events(year).await?)
}
