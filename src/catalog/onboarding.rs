use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingCategory {
    Industry,
    TeamSize,
    Role,
    AppUsage,
}

impl OnboardingCategory {
    pub const ALL: [OnboardingCategory; 4] = [
        OnboardingCategory::Industry,
        OnboardingCategory::TeamSize,
        OnboardingCategory::Role,
        OnboardingCategory::AppUsage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingCategory::Industry => "industry",
            OnboardingCategory::TeamSize => "team_size",
            OnboardingCategory::Role => "role",
            OnboardingCategory::AppUsage => "app_usage",
        }
    }

    /// Catalog entries as `(value, label)` pairs in display order.
    pub fn options(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            OnboardingCategory::Industry => INDUSTRY_OPTIONS,
            OnboardingCategory::TeamSize => TEAM_SIZE_OPTIONS,
            OnboardingCategory::Role => ROLE_OPTIONS,
            OnboardingCategory::AppUsage => APP_USAGE_OPTIONS,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options().iter().any(|(v, _)| *v == value)
    }
}

impl fmt::Display for OnboardingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        OnboardingCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| anyhow!("Unknown onboarding category: {}", s))
    }
}

static INDUSTRY_OPTIONS: &[(&str, &str)] = &[
    ("technology", "Technology"),
    ("marketing", "Marketing & Advertising"),
    ("education", "Education"),
    ("healthcare", "Healthcare"),
    ("finance", "Finance"),
    ("retail", "Retail & E-commerce"),
    ("manufacturing", "Manufacturing"),
    ("nonprofit", "Nonprofit"),
    ("consulting", "Consulting"),
    ("other", "Other"),
];

static TEAM_SIZE_OPTIONS: &[(&str, &str)] = &[
    ("just-me", "Just me"),
    ("2-5", "2-5"),
    ("6-10", "6-10"),
    ("11-25", "11-25"),
    ("26-50", "26-50"),
    ("51-200", "51-200"),
    ("200-plus", "200+"),
];

static ROLE_OPTIONS: &[(&str, &str)] = &[
    ("founder", "Founder / Executive"),
    ("manager", "Team Lead / Manager"),
    ("project-manager", "Project Manager"),
    ("engineer", "Engineer"),
    ("designer", "Designer"),
    ("marketer", "Marketer"),
    ("operations", "Operations"),
    ("student", "Student"),
    ("other", "Other"),
];

static APP_USAGE_OPTIONS: &[(&str, &str)] = &[
    ("project-management", "Project management"),
    ("task-tracking", "Personal task tracking"),
    ("product-roadmap", "Product roadmap"),
    ("content-planning", "Content planning"),
    ("crm", "Client & sales tracking"),
    ("other", "Something else"),
];

/// Total number of catalog entries across all categories.
pub fn catalog_size() -> usize {
    OnboardingCategory::ALL
        .iter()
        .map(|category| category.options().len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn values_are_unique_per_category() {
        for category in OnboardingCategory::ALL {
            let values: HashSet<_> = category.options().iter().map(|(v, _)| *v).collect();
            assert_eq!(values.len(), category.options().len(), "{}", category);
        }
    }

    #[test]
    fn parses_category_names() {
        assert_eq!(
            "team-size".parse::<OnboardingCategory>().unwrap(),
            OnboardingCategory::TeamSize
        );
        assert_eq!(
            "APP_USAGE".parse::<OnboardingCategory>().unwrap(),
            OnboardingCategory::AppUsage
        );
        assert!("favourite_colour".parse::<OnboardingCategory>().is_err());
    }

    #[test]
    fn catalog_size_counts_every_entry() {
        assert_eq!(catalog_size(), 10 + 7 + 9 + 6);
        assert!(OnboardingCategory::Role.contains("engineer"));
        assert!(!OnboardingCategory::Role.contains("astronaut"));
    }
}
