use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::info;

use crate::catalog::{OnboardingCategory, TEMPLATE_CATALOG};
use crate::database::entities::{onboarding_options, templates};
use crate::errors::TemplateResult;

/// Replace every global template with the static catalog.
///
/// Runs in one transaction: the delete and the inserts land together or not at
/// all. Workspace templates are left alone. Returns the number inserted.
pub async fn reseed_global_templates(db: &DatabaseConnection) -> TemplateResult<usize> {
    let txn = db.begin().await?;

    let removed = templates::Entity::delete_many()
        .filter(templates::Column::WorkspaceId.is_null())
        .exec(&txn)
        .await?;
    info!("Removed {} global templates", removed.rows_affected);

    let now = Utc::now();
    let mut inserted = 0;
    for definition in TEMPLATE_CATALOG {
        let template = templates::ActiveModel {
            workspace_id: Set(None),
            name: Set(definition.name.to_string()),
            description: Set(Some(definition.description.to_string())),
            category: Set(definition.category.to_string()),
            sections: Set(serde_json::to_string(&definition.section_specs())?),
            columns: Set(serde_json::to_string(&definition.column_specs())?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        template.insert(&txn).await?;
        inserted += 1;
    }

    txn.commit().await?;
    info!("Seeded {} global templates", inserted);
    Ok(inserted)
}

/// Replace the onboarding dropdown rows of every category with the catalog.
pub async fn seed_onboarding_options(db: &DatabaseConnection) -> Result<usize> {
    let txn = db.begin().await?;
    let mut inserted = 0;

    for category in OnboardingCategory::ALL {
        onboarding_options::Entity::delete_many()
            .filter(onboarding_options::Column::Category.eq(category.as_str()))
            .exec(&txn)
            .await?;

        let rows: Vec<onboarding_options::ActiveModel> = category
            .options()
            .iter()
            .enumerate()
            .map(|(position, (value, label))| onboarding_options::ActiveModel {
                category: Set(category.as_str().to_string()),
                value: Set(value.to_string()),
                label: Set(label.to_string()),
                position: Set(position as i32),
                ..Default::default()
            })
            .collect();

        let count = rows.len();
        onboarding_options::Entity::insert_many(rows)
            .exec(&txn)
            .await?;
        info!("Seeded {} {} options", count, category);
        inserted += count;
    }

    txn.commit().await?;
    Ok(inserted)
}

/// Seed both catalogs. Each seed replaces the rows it owns.
pub async fn seed_all(db: &DatabaseConnection) -> Result<(usize, usize)> {
    let templates = reseed_global_templates(db).await?;
    let options = seed_onboarding_options(db).await?;
    Ok((templates, options))
}

pub async fn count_global_templates(db: &DatabaseConnection) -> Result<u64> {
    let count = templates::Entity::find()
        .filter(templates::Column::WorkspaceId.is_null())
        .count(db)
        .await?;
    Ok(count)
}
