use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is a valid regex"));

/// Service for data validation and sanitization
pub struct ValidationService;

impl ValidationService {
    /// Sanitize and validate project name
    pub fn validate_project_name(name: &str) -> Result<String> {
        Self::validate_display_name("Project", name, 100)
    }

    /// Validate project description; blank descriptions become `None`
    pub fn validate_project_description(description: &str) -> Result<Option<String>> {
        Self::validate_description("Project", description)
    }

    pub fn validate_template_name(name: &str) -> Result<String> {
        Self::validate_display_name("Template", name, 100)
    }

    pub fn validate_template_description(description: &str) -> Result<Option<String>> {
        Self::validate_description("Template", description)
    }

    pub fn validate_workspace_name(name: &str) -> Result<String> {
        Self::validate_display_name("Workspace", name, 100)
    }

    pub fn validate_workspace_slug(slug: &str) -> Result<String> {
        let trimmed = slug.trim();

        if trimmed.is_empty() {
            return Err(anyhow!("Workspace slug cannot be empty"));
        }

        if trimmed.len() > 64 {
            return Err(anyhow!("Workspace slug is too long (max 64 characters)"));
        }

        if !SLUG_PATTERN.is_match(trimmed) {
            return Err(anyhow!(
                "Workspace slug can only contain lowercase letters, numbers and single hyphens"
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Validate and normalise an email address to lower case
    pub fn validate_email(email: &str) -> Result<String> {
        let trimmed = email.trim();

        if trimmed.is_empty() {
            return Err(anyhow!("Email cannot be empty"));
        }

        if trimmed.len() > 254 {
            return Err(anyhow!("Email is too long (max 254 characters)"));
        }

        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(anyhow!("Invalid email address: {}", trimmed));
        }

        Ok(trimmed.to_lowercase())
    }

    fn validate_display_name(kind: &str, name: &str, max: usize) -> Result<String> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(anyhow!("{} name cannot be empty", kind));
        }

        if trimmed.chars().count() > max {
            return Err(anyhow!(
                "{} name is too long (max {} characters)",
                kind,
                max
            ));
        }

        // Control characters never belong in a display name
        let sanitized: String = trimmed.chars().filter(|c| !c.is_control()).collect();

        if sanitized.is_empty() {
            return Err(anyhow!("{} name contains only invalid characters", kind));
        }

        Ok(sanitized)
    }

    fn validate_description(kind: &str, description: &str) -> Result<Option<String>> {
        let trimmed = description.trim();

        if trimmed.chars().count() > 1000 {
            return Err(anyhow!(
                "{} description is too long (max 1000 characters)",
                kind
            ));
        }

        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_project_name() {
        assert_eq!(
            ValidationService::validate_project_name("  Q4 Launch  ").unwrap(),
            "Q4 Launch"
        );
        assert!(ValidationService::validate_project_name("   ").is_err());
        assert!(ValidationService::validate_project_name(&"x".repeat(101)).is_err());
        assert_eq!(
            ValidationService::validate_project_name("Road\tmap").unwrap(),
            "Roadmap"
        );
    }

    #[test]
    fn test_validate_description() {
        assert_eq!(
            ValidationService::validate_project_description("  ").unwrap(),
            None
        );
        assert_eq!(
            ValidationService::validate_template_description(" Sprint board ").unwrap(),
            Some("Sprint board".to_string())
        );
        assert!(ValidationService::validate_project_description(&"d".repeat(1001)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            ValidationService::validate_email(" Ada@Example.com ").unwrap(),
            "ada@example.com"
        );
        assert!(ValidationService::validate_email("ada.example.com").is_err());
        assert!(ValidationService::validate_email("ada@example").is_err());
    }

    #[test]
    fn test_validate_workspace_slug() {
        assert!(ValidationService::validate_workspace_slug("acme-design").is_ok());
        assert!(ValidationService::validate_workspace_slug("Acme Design").is_err());
        assert!(ValidationService::validate_workspace_slug("acme--design").is_err());
    }
}
