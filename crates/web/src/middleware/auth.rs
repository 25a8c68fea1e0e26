use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use storage::{
    Database,
    error::StorageError,
    models::{User, UserOrganization},
    repository::user::{UserIdentity, UserRepository},
};
use uuid::Uuid;

use crate::error::WebError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ORG_HEADER: &str = "x-user-org";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_NAME_HEADER: &str = "x-user-name";

const GATEWAY_PROVIDER: &str = "gateway";

pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if api_keys.is_valid(token) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key attempt");
            Err(WebError::Unauthorized)
        }
        None => Err(WebError::Unauthorized),
    }
}

#[derive(Clone)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Caller identity asserted by the gateway headers.
///
/// The `users` row is created the first time an id is seen. `membership` is
/// the organization membership selected with `X-User-Org`, if any.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub membership: Option<UserOrganization>,
}

impl CurrentUser {
    /// The selected membership, required by organization-scoped routes
    pub fn membership(&self) -> Result<&UserOrganization, WebError> {
        self.membership.as_ref().ok_or_else(|| {
            WebError::NotFound("User is not logged into an organization".to_string())
        })
    }

    /// The selected membership, which must carry a manager role
    pub fn manager_membership(&self) -> Result<&UserOrganization, WebError> {
        let membership = self.membership()?;
        if membership.role.is_manager() {
            Ok(membership)
        } else {
            Err(WebError::Forbidden(
                "Only organization admins and leads can do this".to_string(),
            ))
        }
    }

    /// The selected membership, which must be allowed to scout
    pub fn scout_membership(&self) -> Result<&UserOrganization, WebError> {
        let membership = self.membership()?;
        if membership.role.can_scout() {
            Ok(membership)
        } else {
            Err(WebError::Forbidden(
                "Membership is still pending approval".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (identity, membership_id) = parse_identity(&parts.headers)?;
        let db = Database::from_ref(state);
        let users = UserRepository::new(db.pool());

        let user = users.ensure(&identity).await?;

        let membership = match membership_id {
            Some(id) => {
                let membership = users.membership(id).await.map_err(membership_error)?;
                if membership.user_id != user.id {
                    return Err(WebError::Forbidden(
                        "Membership belongs to another user".to_string(),
                    ));
                }
                Some(membership)
            }
            None => None,
        };

        Ok(Self { user, membership })
    }
}

/// An unknown membership id means no organization is selected; any other
/// storage failure is passed on unchanged
fn membership_error(error: StorageError) -> WebError {
    match error {
        StorageError::NotFound => {
            WebError::NotFound("User is not logged into an organization".to_string())
        }
        other => other.into(),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Reads the identity headers; a missing or malformed user id is unauthorized
pub fn parse_identity(headers: &HeaderMap) -> Result<(UserIdentity, Option<i32>), WebError> {
    let id = header_str(headers, USER_ID_HEADER)
        .and_then(|value| Uuid::parse_str(value).ok())
        .ok_or(WebError::Unauthorized)?;

    let membership_id = match header_str(headers, USER_ORG_HEADER) {
        Some(value) => Some(
            value
                .parse::<i32>()
                .map_err(|_| WebError::BadRequest("X-User-Org must be a number".to_string()))?,
        ),
        None => None,
    };

    let email = header_str(headers, USER_EMAIL_HEADER).unwrap_or_default().to_string();
    let display_name = header_str(headers, USER_NAME_HEADER)
        .map(String::from)
        .unwrap_or_else(|| email.clone());

    Ok((
        UserIdentity {
            id,
            email,
            display_name,
            auth_provider: GATEWAY_PROVIDER.to_string(),
        },
        membership_id,
    ))
}
