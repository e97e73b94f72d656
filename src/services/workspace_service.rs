use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::database::entities::invitations::InvitationStatus;
use crate::database::entities::workspace_members::MemberRole;
use crate::database::entities::{invitations, users, workspace_members, workspaces};
use crate::services::ValidationService;

/// Tenancy bookkeeping: workspaces, users, memberships and invitations.
#[derive(Clone)]
pub struct WorkspaceService {
    db: DatabaseConnection,
}

impl WorkspaceService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a workspace and make `owner_id` (when given) its owner.
    pub async fn create_workspace(
        &self,
        name: &str,
        slug: &str,
        owner_id: Option<i32>,
    ) -> Result<workspaces::Model> {
        let name = ValidationService::validate_workspace_name(name)?;
        let slug = ValidationService::validate_workspace_slug(slug)?;

        let taken = workspaces::Entity::find()
            .filter(workspaces::Column::Slug.eq(slug.as_str()))
            .one(&self.db)
            .await?;
        if taken.is_some() {
            return Err(anyhow!("Workspace slug '{}' is already taken", slug));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();
        let workspace = workspaces::ActiveModel {
            name: Set(name),
            slug: Set(slug),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to create workspace")?;

        if let Some(owner_id) = owner_id {
            users::Entity::find_by_id(owner_id)
                .one(&txn)
                .await?
                .ok_or_else(|| anyhow!("User {} not found", owner_id))?;
            workspace_members::ActiveModel {
                workspace_id: Set(workspace.id),
                user_id: Set(owner_id),
                role: Set(MemberRole::Owner.as_str().to_string()),
                joined_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created workspace {} '{}'", workspace.id, workspace.slug);
        Ok(workspace)
    }

    pub async fn find_workspace_by_slug(&self, slug: &str) -> Result<workspaces::Model> {
        workspaces::Entity::find()
            .filter(workspaces::Column::Slug.eq(slug.trim()))
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Workspace '{}' not found", slug))
    }

    pub async fn create_user(&self, email: &str, name: &str) -> Result<users::Model> {
        let email = ValidationService::validate_email(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("User name cannot be empty"));
        }

        let taken = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await?;
        if taken.is_some() {
            return Err(anyhow!("A user with email {} already exists", email));
        }

        let mut user = users::ActiveModel::new();
        user.email = Set(email);
        user.name = Set(name.to_string());
        let user = user.insert(&self.db)
            .await
            .context("Failed to create user")?;

        info!("Created user {} <{}>", user.id, user.email);
        Ok(user)
    }

    pub async fn add_workspace_member(
        &self,
        workspace_id: i32,
        user_id: i32,
        role: MemberRole,
    ) -> Result<workspace_members::Model> {
        workspaces::Entity::find_by_id(workspace_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Workspace {} not found", workspace_id))?;
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("User {} not found", user_id))?;

        let existing = workspace_members::Entity::find()
            .filter(workspace_members::Column::WorkspaceId.eq(workspace_id))
            .filter(workspace_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(anyhow!(
                "User {} is already a member of workspace {}",
                user_id,
                workspace_id
            ));
        }

        let member = workspace_members::ActiveModel {
            workspace_id: Set(workspace_id),
            user_id: Set(user_id),
            role: Set(role.as_str().to_string()),
            joined_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Added user {} to workspace {} as {}",
            user_id, workspace_id, role
        );
        Ok(member)
    }

    /// Record a pending invitation.
    ///
    /// A second pending invitation for the same address is refused. Pending
    /// invitations past their expiry are marked expired first, so an address
    /// can be invited again once its last invitation has lapsed.
    pub async fn invite(
        &self,
        workspace_id: i32,
        email: &str,
        role: MemberRole,
        invited_by: Option<i32>,
    ) -> Result<invitations::Model> {
        let email = ValidationService::validate_email(email)?;
        workspaces::Entity::find_by_id(workspace_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Workspace {} not found", workspace_id))?;

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let pending = invitations::Entity::find()
            .filter(invitations::Column::WorkspaceId.eq(workspace_id))
            .filter(invitations::Column::Email.eq(email.as_str()))
            .filter(invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .all(&txn)
            .await?;

        let mut still_pending = false;
        for invitation in pending {
            if invitation.is_overdue(now) {
                let id = invitation.id;
                let mut expired: invitations::ActiveModel = invitation.into();
                expired.status = Set(InvitationStatus::Expired.as_str().to_string());
                expired.update(&txn).await?;
                debug!("Marked invitation {} as expired", id);
            } else {
                still_pending = true;
            }
        }
        if still_pending {
            return Err(anyhow!(
                "{} already has a pending invitation to workspace {}",
                email,
                workspace_id
            ));
        }

        let mut invitation = invitations::ActiveModel::new();
        invitation.workspace_id = Set(workspace_id);
        invitation.email = Set(email);
        invitation.role = Set(role.as_str().to_string());
        invitation.invited_by = Set(invited_by);
        let invitation = invitation
            .insert(&txn)
            .await
            .context("Failed to create invitation")?;

        txn.commit().await?;

        info!(
            "Invited {} to workspace {} as {}",
            invitation.email, workspace_id, invitation.role
        );
        Ok(invitation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[tokio::test]
    async fn owner_joins_new_workspace() {
        let db = setup_test_db().await;
        let service = WorkspaceService::new(db.clone());

        let owner = service
            .create_user("owner@acme.test", "Owner")
            .await
            .unwrap();
        let workspace = service
            .create_workspace("Acme", "acme", Some(owner.id))
            .await
            .unwrap();

        let members = workspace_members::Entity::find()
            .filter(workspace_members::Column::WorkspaceId.eq(workspace.id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].role, "owner");

        assert!(service
            .create_workspace("Other", "acme", None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn duplicate_pending_invitation_is_refused() {
        let db = setup_test_db().await;
        let service = WorkspaceService::new(db);
        let workspace = service
            .create_workspace("Acme", "acme", None)
            .await
            .unwrap();

        let invitation = service
            .invite(workspace.id, "New@Acme.test", MemberRole::Member, None)
            .await
            .unwrap();
        assert_eq!(invitation.email, "new@acme.test");
        assert_eq!(invitation.status, "pending");

        assert!(service
            .invite(workspace.id, "new@acme.test", MemberRole::Admin, None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn lapsed_invitation_can_be_sent_again() {
        let db = setup_test_db().await;
        let service = WorkspaceService::new(db.clone());
        let workspace = service
            .create_workspace("Acme", "acme", None)
            .await
            .unwrap();

        let first = service
            .invite(workspace.id, "x@acme.test", MemberRole::Member, None)
            .await
            .unwrap();
        let mut lapsed: invitations::ActiveModel = first.clone().into();
        lapsed.expires_at = Set(Utc::now() - chrono::Duration::days(30));
        lapsed.update(&db).await.unwrap();

        let second = service
            .invite(workspace.id, "x@acme.test", MemberRole::Member, None)
            .await
            .unwrap();
        assert_ne!(second.id, first.id);
        assert_eq!(second.status, "pending");

        let first = invitations::Entity::find_by_id(first.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.status, "expired");
    }
}
