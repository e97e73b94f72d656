pub mod column_options;
pub mod invitations;
pub mod onboarding_options;
pub mod project_columns;
pub mod project_members;
pub mod projects;
pub mod sections;
pub mod templates;
pub mod users;
pub mod workspace_members;
pub mod workspaces;
