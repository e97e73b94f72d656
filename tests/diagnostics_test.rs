use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};
use sea_orm_migration::MigratorTrait;
use taskboard::database::entities::invitations;
use taskboard::database::entities::invitations::InvitationStatus;
use taskboard::database::entities::projects::ProjectView;
use taskboard::database::entities::workspace_members::MemberRole;
use taskboard::database::migrations::Migrator;
use taskboard::services::{
    DiagnosticsService, OnboardingAnswers, OnboardingService, ProjectService, WorkspaceService,
};

async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_users_report_counts_memberships() {
    let db = setup_test_db().await.unwrap();
    let workspaces = WorkspaceService::new(db.clone());
    let ada = workspaces
        .create_user("ada@acme.test", "Ada")
        .await
        .unwrap();
    let bob = workspaces
        .create_user("bob@acme.test", "Bob")
        .await
        .unwrap();

    let acme = workspaces
        .create_workspace("Acme", "acme", Some(ada.id))
        .await
        .unwrap();
    workspaces
        .create_workspace("Side", "side", Some(ada.id))
        .await
        .unwrap();
    workspaces
        .add_workspace_member(acme.id, bob.id, MemberRole::Member)
        .await
        .unwrap();

    let project = ProjectService::new(db.clone())
        .create_project(acme.id, "Website", None, ProjectView::Board, None)
        .await
        .unwrap()
        .project;
    ProjectService::new(db.clone())
        .add_project_member(project.id, ada.id, MemberRole::Owner)
        .await
        .unwrap();

    OnboardingService::new(db.clone())
        .record_onboarding_answers(
            ada.id,
            &OnboardingAnswers {
                industry: Some("technology".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let report = DiagnosticsService::new(db.clone())
        .users_report()
        .await
        .unwrap();
    assert_eq!(report.rows.len(), 2);

    let ada_row = &report.rows[0];
    assert_eq!(ada_row.email, "ada@acme.test");
    assert_eq!(ada_row.workspace_count, 2);
    assert_eq!(ada_row.project_count, 1);
    assert!(ada_row.onboarded_at.is_some());

    let bob_row = &report.rows[1];
    assert_eq!(bob_row.workspace_count, 1);
    assert_eq!(bob_row.project_count, 0);
    assert!(bob_row.onboarded_at.is_none());

    assert_eq!(report.onboarded_count(), 1);
    assert!(report.to_string().ends_with("2 users, 1 onboarded"));
}

#[tokio::test]
async fn test_invitations_report_flags_overdue_pending() {
    let db = setup_test_db().await.unwrap();
    let workspaces = WorkspaceService::new(db.clone());
    let acme = workspaces
        .create_workspace("Acme", "acme", None)
        .await
        .unwrap();

    workspaces
        .invite(acme.id, "fresh@acme.test", MemberRole::Member, None)
        .await
        .unwrap();

    let mut stale = invitations::ActiveModel::new();
    stale.workspace_id = Set(acme.id);
    stale.email = Set("stale@acme.test".to_string());
    stale.expires_at = Set(Utc::now() - Duration::days(2));
    stale.insert(&db).await.unwrap();

    let mut accepted = invitations::ActiveModel::new();
    accepted.workspace_id = Set(acme.id);
    accepted.email = Set("done@acme.test".to_string());
    accepted.status = Set(InvitationStatus::Accepted.as_str().to_string());
    accepted.expires_at = Set(Utc::now() - Duration::days(2));
    accepted.insert(&db).await.unwrap();

    let service = DiagnosticsService::new(db.clone());

    let all = service.invitations_report(None).await.unwrap();
    assert_eq!(all.rows.len(), 3);
    assert_eq!(all.overdue_count(), 1);
    let overdue: Vec<_> = all
        .rows
        .iter()
        .filter(|r| r.overdue)
        .map(|r| r.email.as_str())
        .collect();
    assert_eq!(overdue, vec!["stale@acme.test"]);
    assert!(all.rows.iter().all(|r| r.workspace == "Acme"));

    let pending = service
        .invitations_report(Some(InvitationStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.rows.len(), 2);
    assert!(pending.rows.iter().all(|r| r.status == "pending"));
}

#[tokio::test]
async fn test_membership_report_lists_missing_workspace_members() {
    let db = setup_test_db().await.unwrap();
    let workspaces = WorkspaceService::new(db.clone());
    let ada = workspaces
        .create_user("ada@acme.test", "Ada")
        .await
        .unwrap();
    let bob = workspaces
        .create_user("bob@acme.test", "Bob")
        .await
        .unwrap();
    let acme = workspaces
        .create_workspace("Acme", "acme", Some(ada.id))
        .await
        .unwrap();
    workspaces
        .add_workspace_member(acme.id, bob.id, MemberRole::Guest)
        .await
        .unwrap();

    let projects = ProjectService::new(db.clone());
    let project = projects
        .create_project(acme.id, "Website", None, ProjectView::Board, None)
        .await
        .unwrap()
        .project;
    projects
        .add_project_member(project.id, ada.id, MemberRole::Owner)
        .await
        .unwrap();

    let report = DiagnosticsService::new(db.clone())
        .membership_report(project.id)
        .await
        .unwrap();
    assert_eq!(report.project, "Website");
    assert_eq!(report.workspace, "Acme");
    assert_eq!(report.members.len(), 1);
    assert_eq!(report.members[0].user_id, ada.id);
    assert_eq!(report.members[0].role, "owner");
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].user_id, bob.id);
    assert_eq!(report.missing[0].role, "guest");

    let text = report.to_string();
    assert!(text.contains("Workspace members without access (1)"));

    assert!(DiagnosticsService::new(db.clone())
        .membership_report(project.id + 1)
        .await
        .is_err());
}
