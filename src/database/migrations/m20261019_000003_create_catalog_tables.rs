use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Templates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Templates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // NULL marks a global template.
                    .col(ColumnDef::new(Templates::WorkspaceId).integer())
                    .col(ColumnDef::new(Templates::Name).string().not_null())
                    .col(ColumnDef::new(Templates::Description).text())
                    .col(
                        ColumnDef::new(Templates::Category)
                            .string_len(64)
                            .not_null()
                            .default("general"),
                    )
                    .col(
                        ColumnDef::new(Templates::Sections)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Templates::Columns)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Templates::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Templates::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_templates_workspace_id")
                            .from(Templates::Table, Templates::WorkspaceId)
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OnboardingOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OnboardingOptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OnboardingOptions::Category)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OnboardingOptions::Value).string().not_null())
                    .col(ColumnDef::new(OnboardingOptions::Label).string().not_null())
                    .col(
                        ColumnDef::new(OnboardingOptions::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_onboarding_options_category_value")
                    .table(OnboardingOptions::Table)
                    .col(OnboardingOptions::Category)
                    .col(OnboardingOptions::Value)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OnboardingOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Templates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Templates {
    Table,
    Id,
    WorkspaceId,
    Name,
    Description,
    Category,
    Sections,
    Columns,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum OnboardingOptions {
    Table,
    Id,
    Category,
    Value,
    Label,
    Position,
}

#[derive(Iden)]
enum Workspaces {
    Table,
    Id,
}
