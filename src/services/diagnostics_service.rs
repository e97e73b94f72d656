//! Read-only reports over users, invitations and project membership.

use std::collections::{HashMap, HashSet};
use std::fmt;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::database::entities::invitations::InvitationStatus;
use crate::database::entities::{
    invitations, project_members, projects, users, workspace_members, workspaces,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserReportRow {
    pub user_id: i32,
    pub email: String,
    pub name: String,
    pub workspace_count: usize,
    pub project_count: usize,
    pub onboarded_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct UsersReport {
    pub rows: Vec<UserReportRow>,
}

impl UsersReport {
    pub fn onboarded_count(&self) -> usize {
        self.rows.iter().filter(|row| row.onboarded_at.is_some()).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvitationReportRow {
    pub invitation_id: i32,
    pub workspace: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub overdue: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct InvitationsReport {
    pub status: Option<InvitationStatus>,
    pub rows: Vec<InvitationReportRow>,
}

impl InvitationsReport {
    pub fn overdue_count(&self) -> usize {
        self.rows.iter().filter(|row| row.overdue).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberRow {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct MembershipReport {
    pub project_id: i32,
    pub project: String,
    pub workspace: String,
    pub members: Vec<MemberRow>,
    /// Workspace members without access to the project.
    pub missing: Vec<MemberRow>,
}

#[derive(Clone)]
pub struct DiagnosticsService {
    db: DatabaseConnection,
}

impl DiagnosticsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn users_report(&self) -> Result<UsersReport> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await?;

        let mut workspace_counts: HashMap<i32, usize> = HashMap::new();
        for member in workspace_members::Entity::find().all(&self.db).await? {
            *workspace_counts.entry(member.user_id).or_default() += 1;
        }

        let mut project_counts: HashMap<i32, usize> = HashMap::new();
        for member in project_members::Entity::find().all(&self.db).await? {
            *project_counts.entry(member.user_id).or_default() += 1;
        }

        let rows = users
            .into_iter()
            .map(|user| UserReportRow {
                workspace_count: workspace_counts.get(&user.id).copied().unwrap_or(0),
                project_count: project_counts.get(&user.id).copied().unwrap_or(0),
                user_id: user.id,
                email: user.email,
                name: user.name,
                onboarded_at: user.onboarded_at,
            })
            .collect();

        Ok(UsersReport { rows })
    }

    pub async fn invitations_report(
        &self,
        status: Option<InvitationStatus>,
    ) -> Result<InvitationsReport> {
        self.invitations_report_at(status, Utc::now()).await
    }

    /// Same as [`Self::invitations_report`], judging expiry against `now`.
    pub async fn invitations_report_at(
        &self,
        status: Option<InvitationStatus>,
        now: DateTime<Utc>,
    ) -> Result<InvitationsReport> {
        let mut query = invitations::Entity::find()
            .order_by_asc(invitations::Column::CreatedAt)
            .order_by_asc(invitations::Column::Id);
        if let Some(status) = status {
            query = query.filter(invitations::Column::Status.eq(status.as_str()));
        }

        let rows = query
            .find_also_related(workspaces::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(invitation, workspace)| InvitationReportRow {
                invitation_id: invitation.id,
                workspace: workspace
                    .map(|w| w.name)
                    .unwrap_or_else(|| format!("#{}", invitation.workspace_id)),
                overdue: invitation.is_overdue(now),
                email: invitation.email,
                role: invitation.role,
                status: invitation.status,
                expires_at: invitation.expires_at,
            })
            .collect();

        Ok(InvitationsReport { status, rows })
    }

    pub async fn membership_report(&self, project_id: i32) -> Result<MembershipReport> {
        let (project, workspace) = projects::Entity::find_by_id(project_id)
            .find_also_related(workspaces::Entity)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Project {} not found", project_id))?;

        let members: Vec<MemberRow> = project_members::Entity::find()
            .filter(project_members::Column::ProjectId.eq(project_id))
            .order_by_asc(project_members::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|(member, user)| Some(member_row(user?, member.role)))
            .collect();

        let member_ids: HashSet<i32> = members.iter().map(|m| m.user_id).collect();

        // Keyed by user so a user listed twice is reported once
        let mut missing: IndexMap<i32, MemberRow> = IndexMap::new();
        let workspace_rows = workspace_members::Entity::find()
            .filter(workspace_members::Column::WorkspaceId.eq(project.workspace_id))
            .order_by_asc(workspace_members::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;
        for (member, user) in workspace_rows {
            if let Some(user) = user {
                if !member_ids.contains(&user.id) {
                    missing
                        .entry(user.id)
                        .or_insert_with(|| member_row(user, member.role));
                }
            }
        }

        Ok(MembershipReport {
            project_id: project.id,
            project: project.name,
            workspace: workspace
                .map(|w| w.name)
                .unwrap_or_else(|| format!("#{}", project.workspace_id)),
            members,
            missing: missing.into_values().collect(),
        })
    }
}

fn member_row(user: users::Model, role: String) -> MemberRow {
    MemberRow {
        user_id: user.id,
        name: user.name,
        email: user.email,
        role,
    }
}

/// Write `rows` as left-aligned, space-separated columns under `headers`.
fn write_table(f: &mut fmt::Formatter<'_>, headers: &[&str], rows: &[Vec<String>]) -> fmt::Result {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(f, "{}", line(headers.to_vec()))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(f, "{}", line(rule.iter().map(String::as_str).collect()))?;
    for row in rows {
        writeln!(f, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

impl fmt::Display for UsersReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.user_id.to_string(),
                    row.email.clone(),
                    row.name.clone(),
                    row.workspace_count.to_string(),
                    row.project_count.to_string(),
                    row.onboarded_at
                        .map(|at| at.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "no".to_string()),
                ]
            })
            .collect();
        write_table(
            f,
            &["ID", "EMAIL", "NAME", "WORKSPACES", "PROJECTS", "ONBOARDED"],
            &rows,
        )?;
        write!(
            f,
            "{} users, {} onboarded",
            self.rows.len(),
            self.onboarded_count()
        )
    }
}

impl fmt::Display for InvitationsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.invitation_id.to_string(),
                    row.workspace.clone(),
                    row.email.clone(),
                    row.role.clone(),
                    row.status.clone(),
                    row.expires_at.format("%Y-%m-%d").to_string(),
                    if row.overdue { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        write_table(
            f,
            &["ID", "WORKSPACE", "EMAIL", "ROLE", "STATUS", "EXPIRES", "OVERDUE"],
            &rows,
        )?;
        write!(
            f,
            "{} invitations, {} overdue",
            self.rows.len(),
            self.overdue_count()
        )
    }
}

impl fmt::Display for MembershipReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_rows = |members: &[MemberRow]| -> Vec<Vec<String>> {
            members
                .iter()
                .map(|m| {
                    vec![
                        m.user_id.to_string(),
                        m.name.clone(),
                        m.email.clone(),
                        m.role.clone(),
                    ]
                })
                .collect()
        };

        writeln!(
            f,
            "Project {} '{}' in workspace '{}'",
            self.project_id, self.project, self.workspace
        )?;
        writeln!(f)?;
        writeln!(f, "Members ({})", self.members.len())?;
        write_table(f, &["ID", "NAME", "EMAIL", "ROLE"], &to_rows(&self.members))?;
        writeln!(f)?;
        writeln!(
            f,
            "Workspace members without access ({})",
            self.missing.len()
        )?;
        write_table(
            f,
            &["ID", "NAME", "EMAIL", "WORKSPACE ROLE"],
            &to_rows(&self.missing),
        )
    }
}
