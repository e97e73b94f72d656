use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub workspace_id: Option<i32>, // None for global templates
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub sections: String, // JSON array of TemplateSectionSpec
    #[sea_orm(column_type = "Text")]
    pub columns: String, // JSON array of TemplateColumnSpec
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workspaces::Entity",
        from = "Column::WorkspaceId",
        to = "super::workspaces::Column::Id"
    )]
    Workspaces,
}

impl Related<super::workspaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workspaces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_global(&self) -> bool {
        self.workspace_id.is_none()
    }
}
