use chrono::Utc;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;
use taskboard::catalog::TEMPLATE_CATALOG;
use taskboard::columns::{ColumnDraft, ColumnStore, ColumnType};
use taskboard::database::entities::projects::ProjectView;
use taskboard::database::entities::templates;
use taskboard::database::migrations::Migrator;
use taskboard::database::seed_data::{count_global_templates, reseed_global_templates};
use taskboard::errors::TemplateError;
use taskboard::services::{
    ColumnService, ProjectService, TemplateBlueprint, TemplateService, WorkspaceService,
};

async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

async fn insert_global(db: &DatabaseConnection, name: &str) -> templates::Model {
    templates::ActiveModel {
        workspace_id: Set(None),
        name: Set(name.to_string()),
        description: Set(None),
        category: Set("legacy".to_string()),
        sections: Set("[]".to_string()),
        columns: Set("[]".to_string()),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_reseed_removes_every_prior_global_template() {
    let db = setup_test_db().await.unwrap();
    let stale = insert_global(&db, "Retired Template").await;
    insert_global(&db, "Software Development").await;

    let inserted = reseed_global_templates(&db).await.unwrap();
    assert_eq!(inserted, TEMPLATE_CATALOG.len());
    assert_eq!(
        count_global_templates(&db).await.unwrap(),
        TEMPLATE_CATALOG.len() as u64
    );
    assert!(templates::Entity::find_by_id(stale.id)
        .one(&db)
        .await
        .unwrap()
        .is_none());

    let names: Vec<_> = TemplateService::new(db.clone())
        .list_templates(None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    let expected: Vec<_> = TEMPLATE_CATALOG
        .iter()
        .map(|t| t.name.to_string())
        .collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_reseed_keeps_workspace_templates() {
    let db = setup_test_db().await.unwrap();
    let workspace = WorkspaceService::new(db.clone())
        .create_workspace("Acme", "acme", None)
        .await
        .unwrap();
    let project = ProjectService::new(db.clone())
        .create_project(workspace.id, "Roadmap", None, ProjectView::List, None)
        .await
        .unwrap()
        .project;

    let mut draft = ColumnDraft::new("Quarter", ColumnType::Select);
    draft.add_option("Q1", None, None).unwrap();
    draft.add_option("Q2", None, None).unwrap();
    ColumnService::new(db.clone())
        .create_column(project.id, &draft)
        .await
        .unwrap();

    let service = TemplateService::new(db.clone());
    let custom = service
        .create_workspace_template(workspace.id, "Roadmap board", Some("Quarterly"), project.id)
        .await
        .unwrap();

    service.reseed_global_templates().await.unwrap();
    service.reseed_global_templates().await.unwrap();

    let listed = service.list_templates(Some(workspace.id)).await.unwrap();
    assert_eq!(listed.len(), TEMPLATE_CATALOG.len() + 1);
    let last = listed.last().unwrap();
    assert_eq!(last.id, custom.id);
    assert_eq!(last.workspace_id, Some(workspace.id));

    // The snapshot holds the project's sections and only its own columns
    let blueprint = TemplateBlueprint::from_model(last).unwrap();
    let sections: Vec<_> = blueprint.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sections, vec!["To Do", "In Progress", "Done"]);
    assert_eq!(blueprint.columns.len(), 1);
    assert_eq!(blueprint.columns[0].name, "Quarter");
    assert_eq!(blueprint.columns[0].options.len(), 2);

    // Other workspaces only see the globals
    assert_eq!(
        service.list_templates(Some(workspace.id + 1)).await.unwrap().len(),
        TEMPLATE_CATALOG.len()
    );
}

#[tokio::test]
async fn test_snapshot_requires_project_in_workspace() {
    let db = setup_test_db().await.unwrap();
    let workspaces = WorkspaceService::new(db.clone());
    let acme = workspaces
        .create_workspace("Acme", "acme", None)
        .await
        .unwrap();
    let other = workspaces
        .create_workspace("Other", "other", None)
        .await
        .unwrap();
    let project = ProjectService::new(db.clone())
        .create_project(acme.id, "Roadmap", None, ProjectView::Board, None)
        .await
        .unwrap()
        .project;

    let err = TemplateService::new(db.clone())
        .create_workspace_template(other.id, "Copy", None, project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, TemplateError::ProjectNotInWorkspace { .. }));

    let err = TemplateService::new(db.clone())
        .create_workspace_template(acme.id, "   ", None, project.id)
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_reseed_leaves_projects_with_their_own_copy() {
    let db = setup_test_db().await.unwrap();
    reseed_global_templates(&db).await.unwrap();
    let workspace = WorkspaceService::new(db.clone())
        .create_workspace("Acme", "acme", None)
        .await
        .unwrap();

    let service = TemplateService::new(db.clone());
    let template = service.list_templates(None).await.unwrap().remove(0);
    let projects = ProjectService::new(db.clone());
    let created = projects
        .create_project(
            workspace.id,
            "App",
            None,
            ProjectView::Board,
            Some(template.id),
        )
        .await
        .unwrap();

    service.reseed_global_templates().await.unwrap();

    // The id records where the project came from; the row itself is gone
    let project = projects.get_project(created.project.id).await.unwrap();
    assert_eq!(project.template_id, Some(template.id));
    assert!(matches!(
        service.get_template(template.id).await,
        Err(TemplateError::NotFound(_))
    ));

    let columns = ColumnService::new(db.clone())
        .list_columns(project.id)
        .await
        .unwrap();
    assert_eq!(columns.len(), created.columns.len());
    let sections = projects.list_sections(project.id).await.unwrap();
    assert_eq!(sections.len(), created.sections.len());
}
