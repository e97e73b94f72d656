use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::WorkspaceId).integer().not_null())
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(
                        ColumnDef::new(Projects::DefaultView)
                            .string_len(32)
                            .not_null()
                            .default("board"),
                    )
                    // Templates may be deleted by a reseed; the project keeps its copy.
                    .col(ColumnDef::new(Projects::TemplateId).integer())
                    .col(ColumnDef::new(Projects::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_workspace_id")
                            .from(Projects::Table, Projects::WorkspaceId)
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectMembers::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectMembers::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(ProjectMembers::Role)
                            .string()
                            .not_null()
                            .default("member"),
                    )
                    .col(
                        ColumnDef::new(ProjectMembers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_members_project_id")
                            .from(ProjectMembers::Table, ProjectMembers::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_members_user_id")
                            .from(ProjectMembers::Table, ProjectMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_members_unique")
                    .table(ProjectMembers::Table)
                    .col(ProjectMembers::ProjectId)
                    .col(ProjectMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::ProjectId).integer().not_null())
                    .col(ColumnDef::new(Sections::Name).string().not_null())
                    .col(
                        ColumnDef::new(Sections::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Sections::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_project_id")
                            .from(Sections::Table, Sections::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectColumns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectColumns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectColumns::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectColumns::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ProjectColumns::ColumnType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectColumns::Width)
                            .integer()
                            .not_null()
                            .default(150),
                    )
                    .col(
                        ColumnDef::new(ProjectColumns::Visible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ProjectColumns::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ProjectColumns::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ProjectColumns::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectColumns::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_columns_project_id")
                            .from(ProjectColumns::Table, ProjectColumns::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_columns_project")
                    .table(ProjectColumns::Table)
                    .col(ProjectColumns::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ColumnOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ColumnOptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ColumnOptions::ColumnId).integer().not_null())
                    .col(ColumnDef::new(ColumnOptions::Label).string().not_null())
                    .col(ColumnDef::new(ColumnOptions::Value).string().not_null())
                    .col(ColumnDef::new(ColumnOptions::Color).string_len(7).not_null())
                    .col(
                        ColumnDef::new(ColumnOptions::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_column_options_column_id")
                            .from(ColumnOptions::Table, ColumnOptions::ColumnId)
                            .to(ProjectColumns::Table, ProjectColumns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_column_options_value_unique")
                    .table(ColumnOptions::Table)
                    .col(ColumnOptions::ColumnId)
                    .col(ColumnOptions::Value)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ColumnOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectColumns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    WorkspaceId,
    Name,
    Description,
    DefaultView,
    TemplateId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ProjectMembers {
    Table,
    Id,
    ProjectId,
    UserId,
    Role,
    CreatedAt,
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
    ProjectId,
    Name,
    Position,
    CreatedAt,
}

#[derive(Iden)]
enum ProjectColumns {
    Table,
    Id,
    ProjectId,
    Name,
    ColumnType,
    Width,
    Visible,
    IsDefault,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ColumnOptions {
    Table,
    Id,
    ColumnId,
    Label,
    Value,
    Color,
    Position,
}

#[derive(Iden)]
enum Workspaces {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
