pub mod column_service;
pub mod diagnostics_service;
pub mod onboarding_service;
pub mod project_service;
pub mod template_service;
pub mod validation;
pub mod workspace_service;

pub use column_service::ColumnService;
pub use diagnostics_service::{
    DiagnosticsService, InvitationsReport, MembershipReport, UsersReport,
};
pub use onboarding_service::{OnboardingAnswers, OnboardingService};
pub use project_service::{CreatedProject, ProjectService};
pub use template_service::{TemplateBlueprint, TemplateService};
pub use validation::ValidationService;
pub use workspace_service::WorkspaceService;
