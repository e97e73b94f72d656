use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::catalog::{default_column_specs, default_section_specs, TemplateSectionSpec};
use crate::columns::{ColumnDraft, ColumnRecord};
use crate::database::entities::projects::ProjectView;
use crate::database::entities::workspace_members::MemberRole;
use crate::database::entities::{
    project_members, projects, sections, users, workspace_members, workspaces,
};
use crate::errors::ColumnResult;
use crate::services::column_service::insert_column;
use crate::services::{TemplateBlueprint, TemplateService, ValidationService};

/// A freshly created project with everything installed into it.
#[derive(Clone, Debug)]
pub struct CreatedProject {
    pub project: projects::Model,
    pub sections: Vec<sections::Model>,
    pub columns: Vec<ColumnRecord>,
}

#[derive(Clone)]
pub struct ProjectService {
    db: DatabaseConnection,
    template_service: TemplateService,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection) -> Self {
        let template_service = TemplateService::new(db.clone());
        Self {
            db,
            template_service,
        }
    }

    /// Create a project with the default columns, plus the sections and
    /// columns of `template_id` when given.
    ///
    /// Without a template the project gets the To Do / In Progress / Done
    /// sections. Everything is written in one transaction.
    pub async fn create_project(
        &self,
        workspace_id: i32,
        name: &str,
        description: Option<&str>,
        view: ProjectView,
        template_id: Option<i32>,
    ) -> Result<CreatedProject> {
        let name = ValidationService::validate_project_name(name)
            .map_err(|e| anyhow!("Invalid project name: {}", e))?;
        let description = match description {
            Some(description) => ValidationService::validate_project_description(description)
                .map_err(|e| anyhow!("Invalid project description: {}", e))?,
            None => None,
        };

        workspaces::Entity::find_by_id(workspace_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Workspace {} not found", workspace_id))?;

        let blueprint = match template_id {
            Some(template_id) => {
                let template = self
                    .template_service
                    .template_for_workspace(template_id, workspace_id)
                    .await?;
                Some(TemplateBlueprint::from_model(&template)?)
            }
            None => None,
        };

        let section_specs: Vec<TemplateSectionSpec> = match &blueprint {
            Some(blueprint) => blueprint.sections.clone(),
            None => default_section_specs(),
        };

        let mut drafts: Vec<ColumnDraft> = default_column_specs()
            .iter()
            .map(|spec| spec.to_draft(true))
            .collect::<ColumnResult<Vec<_>>>()
            .context("Default columns are invalid")?;
        if let Some(blueprint) = &blueprint {
            for draft in blueprint.column_drafts()? {
                let clashes = drafts
                    .iter()
                    .any(|existing| existing.name().eq_ignore_ascii_case(draft.name()));
                if clashes {
                    debug!(
                        "Skipping template column '{}': name already used",
                        draft.name()
                    );
                    continue;
                }
                drafts.push(draft);
            }
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let project = projects::ActiveModel {
            workspace_id: Set(workspace_id),
            name: Set(name),
            description: Set(description),
            default_view: Set(view.as_str().to_string()),
            template_id: Set(template_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to create project")?;

        let mut created_sections = Vec::with_capacity(section_specs.len());
        for (position, spec) in section_specs.iter().enumerate() {
            let section = sections::ActiveModel {
                project_id: Set(project.id),
                name: Set(spec.name.clone()),
                position: Set(position as i32),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            created_sections.push(section);
        }

        let mut columns = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            let record = insert_column(&txn, project.id, draft)
                .await
                .with_context(|| format!("Failed to add column '{}'", draft.name()))?;
            columns.push(record);
        }

        txn.commit().await?;

        info!(
            "Created project {} '{}' in workspace {} ({} sections, {} columns)",
            project.id,
            project.name,
            workspace_id,
            created_sections.len(),
            columns.len()
        );

        Ok(CreatedProject {
            project,
            sections: created_sections,
            columns,
        })
    }

    /// Add a workspace member to one of the workspace's projects.
    pub async fn add_project_member(
        &self,
        project_id: i32,
        user_id: i32,
        role: MemberRole,
    ) -> Result<project_members::Model> {
        let project = projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Project {} not found", project_id))?;

        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("User {} not found", user_id))?;

        workspace_members::Entity::find()
            .filter(workspace_members::Column::WorkspaceId.eq(project.workspace_id))
            .filter(workspace_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "User {} is not a member of workspace {}",
                    user_id,
                    project.workspace_id
                )
            })?;

        let existing = project_members::Entity::find()
            .filter(project_members::Column::ProjectId.eq(project_id))
            .filter(project_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(anyhow!(
                "User {} is already a member of project {}",
                user_id,
                project_id
            ));
        }

        let member = project_members::ActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
            role: Set(role.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("Failed to add project member")?;

        info!(
            "Added user {} to project {} as {}",
            user_id, project_id, role
        );
        Ok(member)
    }

    pub async fn get_project(&self, project_id: i32) -> Result<projects::Model> {
        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Project {} not found", project_id))
    }

    pub async fn list_sections(&self, project_id: i32) -> Result<Vec<sections::Model>> {
        let found = sections::Entity::find()
            .filter(sections::Column::ProjectId.eq(project_id))
            .order_by_asc(sections::Column::Position)
            .all(&self.db)
            .await?;
        Ok(found)
    }
}
