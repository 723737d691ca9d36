//! User domain types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::infra::repositories::entities::UserModel;

/// The caller resolved from the `Api-Key` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
}

impl From<UserModel> for CurrentUser {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// `{id, name}` reference to a user inside another payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "David")]
    pub name: String,
}

impl From<&UserModel> for UserSummary {
    fn from(model: &UserModel) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
        }
    }
}

/// Public profile of a user.
///
/// Empty follow lists are left out of the payload instead of being sent as `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<UserSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub following: Vec<UserSummary>,
}
