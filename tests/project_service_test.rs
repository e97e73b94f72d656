use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use taskboard::catalog::TEMPLATE_CATALOG;
use taskboard::columns::ColumnType;
use taskboard::database::entities::projects::ProjectView;
use taskboard::database::entities::workspace_members::MemberRole;
use taskboard::database::migrations::Migrator;
use taskboard::database::seed_data::reseed_global_templates;
use taskboard::services::{ColumnService, ProjectService, TemplateService, WorkspaceService};

async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_blank_project_gets_default_sections_and_columns() {
    let db = setup_test_db().await.unwrap();
    let workspace = WorkspaceService::new(db.clone())
        .create_workspace("Acme", "acme", None)
        .await
        .unwrap();

    let created = ProjectService::new(db.clone())
        .create_project(
            workspace.id,
            "  Website  ",
            Some("Public site"),
            ProjectView::Calendar,
            None,
        )
        .await
        .unwrap();

    assert_eq!(created.project.name, "Website");
    assert_eq!(created.project.default_view, "calendar");
    assert_eq!(created.project.template_id, None);

    let sections: Vec<_> = created.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sections, vec!["To Do", "In Progress", "Done"]);

    let columns = ColumnService::new(db.clone())
        .list_columns(created.project.id)
        .await
        .unwrap();
    let summary: Vec<_> = columns
        .iter()
        .map(|c| (c.name.as_str(), c.column_type, c.is_default))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Assignee", ColumnType::User, true),
            ("Due date", ColumnType::Date, true),
            ("Priority", ColumnType::Select, true),
        ]
    );
    let priorities: Vec<_> = columns[2]
        .options
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(priorities, vec!["low", "medium", "high"]);
}

#[tokio::test]
async fn test_template_project_installs_template_columns() {
    let db = setup_test_db().await.unwrap();
    reseed_global_templates(&db).await.unwrap();
    let workspace = WorkspaceService::new(db.clone())
        .create_workspace("Acme", "acme", None)
        .await
        .unwrap();

    let bug_tracking = TemplateService::new(db.clone())
        .list_templates(Some(workspace.id))
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.name == "Bug Tracking")
        .unwrap();
    let definition = TEMPLATE_CATALOG
        .iter()
        .find(|t| t.name == "Bug Tracking")
        .unwrap();

    let created = ProjectService::new(db.clone())
        .create_project(
            workspace.id,
            "Triage",
            None,
            ProjectView::Board,
            Some(bug_tracking.id),
        )
        .await
        .unwrap();

    assert_eq!(created.project.template_id, Some(bug_tracking.id));
    let sections: Vec<_> = created.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sections, definition.sections.to_vec());

    assert_eq!(created.columns.len(), 3 + definition.columns.len());
    let template_columns: Vec<_> = created.columns[3..]
        .iter()
        .map(|c| (c.name.as_str(), c.is_default))
        .collect();
    let expected: Vec<_> = definition.columns.iter().map(|c| (c.name, false)).collect();
    assert_eq!(template_columns, expected);

    let positions: Vec<_> = created.columns.iter().map(|c| c.position).collect();
    assert_eq!(
        positions,
        (0..created.columns.len() as i32).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_invalid_project_requests_write_nothing() {
    let db = setup_test_db().await.unwrap();
    let workspaces = WorkspaceService::new(db.clone());
    let acme = workspaces
        .create_workspace("Acme", "acme", None)
        .await
        .unwrap();
    let projects = ProjectService::new(db.clone());

    assert!(projects
        .create_project(acme.id, "   ", None, ProjectView::Board, None)
        .await
        .is_err());
    assert!(projects
        .create_project(acme.id + 10, "Orphan", None, ProjectView::Board, None)
        .await
        .is_err());
    assert!(projects
        .create_project(acme.id, "Templated", None, ProjectView::Board, Some(999))
        .await
        .is_err());

    // A workspace template is invisible to other workspaces
    let source = projects
        .create_project(acme.id, "Source", None, ProjectView::Board, None)
        .await
        .unwrap();
    let template = TemplateService::new(db.clone())
        .create_workspace_template(acme.id, "Acme flow", None, source.project.id)
        .await
        .unwrap();
    let other = workspaces
        .create_workspace("Other", "other", None)
        .await
        .unwrap();
    let err = projects
        .create_project(
            other.id,
            "Borrowed",
            None,
            ProjectView::Board,
            Some(template.id),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not available to workspace"));
}

#[tokio::test]
async fn test_project_members_come_from_the_workspace() {
    let db = setup_test_db().await.unwrap();
    let workspaces = WorkspaceService::new(db.clone());
    let owner = workspaces
        .create_user("owner@acme.test", "Owner")
        .await
        .unwrap();
    let outsider = workspaces
        .create_user("out@else.test", "Outsider")
        .await
        .unwrap();
    let acme = workspaces
        .create_workspace("Acme", "acme", Some(owner.id))
        .await
        .unwrap();

    let projects = ProjectService::new(db.clone());
    let project = projects
        .create_project(acme.id, "Website", None, ProjectView::Board, None)
        .await
        .unwrap()
        .project;

    let member = projects
        .add_project_member(project.id, owner.id, MemberRole::Admin)
        .await
        .unwrap();
    assert_eq!(member.role, "admin");

    assert!(projects
        .add_project_member(project.id, owner.id, MemberRole::Member)
        .await
        .is_err());
    assert!(projects
        .add_project_member(project.id, outsider.id, MemberRole::Member)
        .await
        .is_err());
}
