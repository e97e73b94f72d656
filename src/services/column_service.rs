use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::columns::{
    duplicate_values, ColumnDraft, ColumnOption, ColumnRecord, ColumnStore, ColumnType,
    OptionColor, OptionDraft,
};
use crate::database::entities::{column_options, project_columns, projects};
use crate::errors::{ColumnError, ColumnResult};

/// Column persistence over the database.
#[derive(Clone)]
pub struct ColumnService {
    db: DatabaseConnection,
}

impl ColumnService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Columns of a project ordered by position, each with its ordered options.
    pub async fn list_columns(&self, project_id: i32) -> ColumnResult<Vec<ColumnRecord>> {
        ensure_project(&self.db, project_id).await?;

        let rows = project_columns::Entity::find()
            .filter(project_columns::Column::ProjectId.eq(project_id))
            .order_by_asc(project_columns::Column::Position)
            .order_by_asc(project_columns::Column::Id)
            .find_with_related(column_options::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(column, options)| to_record(column, options))
            .collect()
    }

    pub async fn get_column(&self, project_id: i32, column_id: i32) -> ColumnResult<ColumnRecord> {
        let column = find_column(&self.db, project_id, column_id).await?;
        load_record(&self.db, column).await
    }

    /// Delete a user-defined column and its options.
    pub async fn delete_column(&self, project_id: i32, column_id: i32) -> ColumnResult<()> {
        let txn = self.db.begin().await?;

        let column = find_column(&txn, project_id, column_id).await?;
        if column.is_default {
            return Err(ColumnError::DefaultColumnLocked);
        }

        column_options::Entity::delete_many()
            .filter(column_options::Column::ColumnId.eq(column.id))
            .exec(&txn)
            .await?;
        project_columns::Entity::delete_by_id(column.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        debug!("Deleted column {} from project {}", column_id, project_id);
        Ok(())
    }
}

#[async_trait]
impl ColumnStore for ColumnService {
    async fn create_column(
        &self,
        project_id: i32,
        draft: &ColumnDraft,
    ) -> ColumnResult<ColumnRecord> {
        let txn = self.db.begin().await?;
        let record = insert_column(&txn, project_id, draft).await?;
        txn.commit().await?;
        Ok(record)
    }

    async fn update_column(
        &self,
        project_id: i32,
        column_id: i32,
        draft: &ColumnDraft,
    ) -> ColumnResult<ColumnRecord> {
        draft.validate()?;
        ensure_unique_values(draft)?;

        let txn = self.db.begin().await?;
        let stored = find_column(&txn, project_id, column_id).await?;

        // The stored flag wins over whatever the draft claims
        let stored_type = parse_column_type(&stored)?;
        if stored.is_default && stored_type != draft.column_type() {
            return Err(ColumnError::DefaultTypeLocked);
        }

        let mut column: project_columns::ActiveModel = stored.into();
        column.name = Set(draft.name().trim().to_string());
        column.column_type = Set(draft.column_type().as_str().to_string());
        column.width = Set(draft.width());
        column.visible = Set(draft.visible());
        column.updated_at = Set(Utc::now());
        let column = column.update(&txn).await?;

        column_options::Entity::delete_many()
            .filter(column_options::Column::ColumnId.eq(column.id))
            .exec(&txn)
            .await?;
        insert_options(&txn, column.id, draft.options()).await?;

        let record = load_record(&txn, column).await?;
        txn.commit().await?;

        debug!(
            "Updated column {} in project {} ({} options)",
            record.id,
            project_id,
            record.options.len()
        );
        Ok(record)
    }
}

/// Validate and append a column to a project on an open connection or transaction.
pub(crate) async fn insert_column<C>(
    conn: &C,
    project_id: i32,
    draft: &ColumnDraft,
) -> ColumnResult<ColumnRecord>
where
    C: ConnectionTrait,
{
    draft.validate()?;
    ensure_unique_values(draft)?;
    ensure_project(conn, project_id).await?;

    let position = project_columns::Entity::find()
        .filter(project_columns::Column::ProjectId.eq(project_id))
        .order_by_desc(project_columns::Column::Position)
        .one(conn)
        .await?
        .map(|last| last.position + 1)
        .unwrap_or(0);

    let now = Utc::now();
    let column = project_columns::ActiveModel {
        project_id: Set(project_id),
        name: Set(draft.name().trim().to_string()),
        column_type: Set(draft.column_type().as_str().to_string()),
        width: Set(draft.width()),
        visible: Set(draft.visible()),
        is_default: Set(draft.is_default()),
        position: Set(position),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    insert_options(conn, column.id, draft.options()).await?;

    debug!(
        "Created column {} '{}' in project {} at position {}",
        column.id, column.name, project_id, position
    );
    load_record(conn, column).await
}

/// Option values identify choices within a column and must not repeat.
fn ensure_unique_values(draft: &ColumnDraft) -> ColumnResult<()> {
    let duplicates = duplicate_values(draft.options());
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ColumnError::DuplicateOptionValues(duplicates.join(", ")))
    }
}

async fn insert_options<C>(conn: &C, column_id: i32, options: &[OptionDraft]) -> ColumnResult<()>
where
    C: ConnectionTrait,
{
    for (position, option) in options.iter().enumerate() {
        column_options::ActiveModel {
            column_id: Set(column_id),
            label: Set(option.label.clone()),
            value: Set(option.value.clone()),
            color: Set(option.color.hex().to_string()),
            position: Set(position as i32),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn ensure_project<C>(conn: &C, project_id: i32) -> ColumnResult<()>
where
    C: ConnectionTrait,
{
    projects::Entity::find_by_id(project_id)
        .one(conn)
        .await?
        .ok_or(ColumnError::ProjectNotFound(project_id))?;
    Ok(())
}

async fn find_column<C>(
    conn: &C,
    project_id: i32,
    column_id: i32,
) -> ColumnResult<project_columns::Model>
where
    C: ConnectionTrait,
{
    project_columns::Entity::find_by_id(column_id)
        .filter(project_columns::Column::ProjectId.eq(project_id))
        .one(conn)
        .await?
        .ok_or(ColumnError::NotFound {
            project_id,
            column_id,
        })
}

async fn load_record<C>(conn: &C, column: project_columns::Model) -> ColumnResult<ColumnRecord>
where
    C: ConnectionTrait,
{
    let options = column_options::Entity::find()
        .filter(column_options::Column::ColumnId.eq(column.id))
        .all(conn)
        .await?;
    to_record(column, options)
}

fn parse_column_type(column: &project_columns::Model) -> ColumnResult<ColumnType> {
    column.column_type.parse().map_err(|_| {
        ColumnError::CorruptRecord(format!(
            "column {} has unknown type '{}'",
            column.id, column.column_type
        ))
    })
}

fn to_record(
    column: project_columns::Model,
    mut options: Vec<column_options::Model>,
) -> ColumnResult<ColumnRecord> {
    let column_type = parse_column_type(&column)?;
    options.sort_by_key(|option| (option.position, option.id));

    let options = options
        .into_iter()
        .map(|option| {
            let color: OptionColor = option.color.parse().map_err(|_| {
                ColumnError::CorruptRecord(format!(
                    "option {} has unknown color '{}'",
                    option.id, option.color
                ))
            })?;
            Ok(ColumnOption {
                id: option.id,
                label: option.label,
                value: option.value,
                color,
                position: option.position,
            })
        })
        .collect::<ColumnResult<Vec<_>>>()?;

    Ok(ColumnRecord {
        id: column.id,
        project_id: column.project_id,
        name: column.name,
        column_type,
        width: column.width,
        visible: column.visible,
        is_default: column.is_default,
        position: column.position,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::workspaces;
    use crate::database::test_utils::setup_test_db;

    async fn seed_project(db: &DatabaseConnection) -> i32 {
        let now = Utc::now();
        let workspace = workspaces::ActiveModel {
            name: Set("Acme".to_string()),
            slug: Set("acme".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let mut project = projects::ActiveModel::new();
        project.workspace_id = Set(workspace.id);
        project.name = Set("Launch".to_string());
        project.insert(db).await.unwrap().id
    }

    #[tokio::test]
    async fn positions_follow_insertion_order() {
        let db = setup_test_db().await;
        let project_id = seed_project(&db).await;
        let service = ColumnService::new(db);

        for name in ["Estimate", "Notes", "Reviewed"] {
            service
                .create_column(project_id, &ColumnDraft::new(name, ColumnType::Text))
                .await
                .unwrap();
        }

        let positions: Vec<_> = service
            .list_columns(project_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.name, c.position))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("Estimate".to_string(), 0),
                ("Notes".to_string(), 1),
                ("Reviewed".to_string(), 2)
            ]
        );
    }

    #[tokio::test]
    async fn missing_project_is_reported() {
        let db = setup_test_db().await;
        let service = ColumnService::new(db);

        let err = service
            .create_column(99, &ColumnDraft::new("Notes", ColumnType::Text))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project 99 not found");
    }
}
