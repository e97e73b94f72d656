use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

pub const INVITATION_TTL_DAYS: i64 = 7;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub workspace_id: i32,
    pub email: String,
    pub role: String,
    pub status: String, // "pending", "accepted", "revoked", "expired"
    #[sea_orm(unique)]
    pub token: String,
    pub invited_by: Option<i32>,
    pub created_at: ChronoDateTimeUtc,
    pub expires_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workspaces::Entity",
        from = "Column::WorkspaceId",
        to = "super::workspaces::Column::Id"
    )]
    Workspaces,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InvitedBy",
        to = "super::users::Column::Id"
    )]
    InvitedByUser,
}

impl Related<super::workspaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workspaces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// A pending invitation with a fresh token, valid for [`INVITATION_TTL_DAYS`].
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ActiveValue::NotSet,
            workspace_id: ActiveValue::NotSet,
            email: ActiveValue::NotSet,
            role: Set("member".to_string()),
            status: Set(InvitationStatus::Pending.as_str().to_string()),
            token: Set(uuid::Uuid::new_v4().to_string()),
            invited_by: Set(None),
            created_at: Set(now),
            expires_at: Set(now + Duration::days(INVITATION_TTL_DAYS)),
        }
    }
}

impl Model {
    /// Pending invitations past their expiry date.
    pub fn is_overdue(&self, now: chrono::DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Pending.as_str() && self.expires_at < now
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Revoked,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Revoked => "revoked",
            InvitationStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "revoked" => Ok(InvitationStatus::Revoked),
            "expired" => Ok(InvitationStatus::Expired),
            _ => Err(format!("Invalid invitation status: {}", s)),
        }
    }
}
