//! Static reference data: global project templates and onboarding dropdowns.

pub mod onboarding;
pub mod templates;

pub use onboarding::OnboardingCategory;
pub use templates::{
    default_column_specs, default_section_specs, TemplateColumnSpec, TemplateDefinition,
    TemplateOptionSpec, TemplateSectionSpec, DEFAULT_COLUMNS, TEMPLATE_CATALOG,
};
