use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "column_options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub column_id: i32,
    pub label: String,
    pub value: String,
    pub color: String, // palette hex, e.g. "#3B82F6"
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_columns::Entity",
        from = "Column::ColumnId",
        to = "super::project_columns::Column::Id"
    )]
    ProjectColumns,
}

impl Related<super::project_columns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectColumns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
