use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::catalog::{TemplateColumnSpec, TemplateSectionSpec};
use crate::columns::ColumnDraft;
use crate::database::entities::{projects, sections, templates};
use crate::database::seed_data;
use crate::errors::{TemplateError, TemplateResult};
use crate::services::{ColumnService, ValidationService};

/// The decoded sections and columns of a stored template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateBlueprint {
    pub sections: Vec<TemplateSectionSpec>,
    pub columns: Vec<TemplateColumnSpec>,
}

impl TemplateBlueprint {
    pub fn from_model(template: &templates::Model) -> TemplateResult<Self> {
        Ok(Self {
            sections: serde_json::from_str(&template.sections)?,
            columns: serde_json::from_str(&template.columns)?,
        })
    }

    /// Column drafts for every template column, rejecting the first invalid one.
    pub fn column_drafts(&self) -> TemplateResult<Vec<ColumnDraft>> {
        self.columns
            .iter()
            .map(|spec| {
                spec.to_draft(false)
                    .map_err(|source| TemplateError::InvalidColumn {
                        name: spec.name.clone(),
                        source,
                    })
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct TemplateService {
    db: DatabaseConnection,
}

impl TemplateService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Delete every global template and insert the static catalog.
    pub async fn reseed_global_templates(&self) -> TemplateResult<usize> {
        seed_data::reseed_global_templates(&self.db).await
    }

    /// Global templates, followed by the workspace's own when one is given.
    pub async fn list_templates(
        &self,
        workspace_id: Option<i32>,
    ) -> TemplateResult<Vec<templates::Model>> {
        let mut scope = Condition::any().add(templates::Column::WorkspaceId.is_null());
        if let Some(workspace_id) = workspace_id {
            scope = scope.add(templates::Column::WorkspaceId.eq(workspace_id));
        }

        let mut found = templates::Entity::find()
            .filter(scope)
            .order_by_asc(templates::Column::Id)
            .all(&self.db)
            .await?;
        found.sort_by_key(|template| template.workspace_id.is_some());
        Ok(found)
    }

    pub async fn get_template(&self, template_id: i32) -> TemplateResult<templates::Model> {
        templates::Entity::find_by_id(template_id)
            .one(&self.db)
            .await?
            .ok_or(TemplateError::NotFound(template_id))
    }

    /// Look up a template a project in `workspace_id` may be created from.
    pub async fn template_for_workspace(
        &self,
        template_id: i32,
        workspace_id: i32,
    ) -> TemplateResult<templates::Model> {
        let template = self.get_template(template_id).await?;
        match template.workspace_id {
            Some(owner) if owner != workspace_id => Err(TemplateError::NotInWorkspace {
                template_id,
                workspace_id,
            }),
            _ => Ok(template),
        }
    }

    /// Snapshot a project's sections and user-defined columns into a workspace template.
    ///
    /// Default columns are left out; every project gets those anyway.
    pub async fn create_workspace_template(
        &self,
        workspace_id: i32,
        name: &str,
        description: Option<&str>,
        project_id: i32,
    ) -> TemplateResult<templates::Model> {
        let name = ValidationService::validate_template_name(name)
            .map_err(|e| TemplateError::Validation(e.to_string()))?;
        let description = match description {
            Some(description) => ValidationService::validate_template_description(description)
                .map_err(|e| TemplateError::Validation(e.to_string()))?,
            None => None,
        };

        projects::Entity::find_by_id(project_id)
            .filter(projects::Column::WorkspaceId.eq(workspace_id))
            .one(&self.db)
            .await?
            .ok_or(TemplateError::ProjectNotInWorkspace {
                project_id,
                workspace_id,
            })?;

        let section_specs: Vec<TemplateSectionSpec> = sections::Entity::find()
            .filter(sections::Column::ProjectId.eq(project_id))
            .order_by_asc(sections::Column::Position)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|section| TemplateSectionSpec { name: section.name })
            .collect();

        let column_specs: Vec<TemplateColumnSpec> = ColumnService::new(self.db.clone())
            .list_columns(project_id)
            .await?
            .iter()
            .filter(|column| !column.is_default)
            .map(TemplateColumnSpec::from_record)
            .collect();

        let now = Utc::now();
        let template = templates::ActiveModel {
            workspace_id: Set(Some(workspace_id)),
            name: Set(name),
            description: Set(description),
            category: Set("custom".to_string()),
            sections: Set(serde_json::to_string(&section_specs)?),
            columns: Set(serde_json::to_string(&column_specs)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Created template '{}' in workspace {} from project {} ({} sections, {} columns)",
            template.name,
            workspace_id,
            project_id,
            section_specs.len(),
            column_specs.len()
        );
        Ok(template)
    }
}
