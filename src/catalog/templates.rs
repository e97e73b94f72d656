//! Global project templates and the default columns of every project.
//!
//! The catalog is static data. Seeding copies it into the `templates` table as
//! global rows (no workspace); stored templates keep their sections and columns
//! as JSON-encoded [`TemplateSectionSpec`]/[`TemplateColumnSpec`] lists.

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnDraft, ColumnRecord, ColumnType, OptionColor, DEFAULT_WIDTH};
use crate::errors::ColumnResult;

pub struct TemplateOptionDef {
    pub label: &'static str,
    pub color: OptionColor,
}

pub struct TemplateColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub width: i32,
    pub options: &'static [TemplateOptionDef],
}

pub struct TemplateDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub sections: &'static [&'static str],
    pub columns: &'static [TemplateColumnDef],
}

/// Sections of a project created without a template.
pub static DEFAULT_SECTIONS: &[&str] = &["To Do", "In Progress", "Done"];

/// Columns installed on every new project, marked as default columns.
pub static DEFAULT_COLUMNS: &[TemplateColumnDef] = &[
    TemplateColumnDef {
        name: "Assignee",
        column_type: ColumnType::User,
        width: 160,
        options: &[],
    },
    TemplateColumnDef {
        name: "Due date",
        column_type: ColumnType::Date,
        width: 140,
        options: &[],
    },
    TemplateColumnDef {
        name: "Priority",
        column_type: ColumnType::Select,
        width: 130,
        options: &[
            TemplateOptionDef {
                label: "Low",
                color: OptionColor::Sky,
            },
            TemplateOptionDef {
                label: "Medium",
                color: OptionColor::Amber,
            },
            TemplateOptionDef {
                label: "High",
                color: OptionColor::Red,
            },
        ],
    },
];

pub static TEMPLATE_CATALOG: &[TemplateDefinition] = &[
    TemplateDefinition {
        name: "Software Development",
        description: "Plan sprints, track features and ship releases.",
        category: "Engineering",
        sections: &["Backlog", "Sprint", "In Review", "Done"],
        columns: &[
            TemplateColumnDef {
                name: "Story Points",
                column_type: ColumnType::Number,
                width: 120,
                options: &[],
            },
            TemplateColumnDef {
                name: "Type",
                column_type: ColumnType::Select,
                width: 130,
                options: &[
                    TemplateOptionDef {
                        label: "Feature",
                        color: OptionColor::Blue,
                    },
                    TemplateOptionDef {
                        label: "Bug",
                        color: OptionColor::Red,
                    },
                    TemplateOptionDef {
                        label: "Chore",
                        color: OptionColor::Gray,
                    },
                ],
            },
            TemplateColumnDef {
                name: "Components",
                column_type: ColumnType::Multiselect,
                width: 180,
                options: &[
                    TemplateOptionDef {
                        label: "Frontend",
                        color: OptionColor::Violet,
                    },
                    TemplateOptionDef {
                        label: "Backend",
                        color: OptionColor::Teal,
                    },
                    TemplateOptionDef {
                        label: "Infrastructure",
                        color: OptionColor::Orange,
                    },
                ],
            },
        ],
    },
    TemplateDefinition {
        name: "Bug Tracking",
        description: "Triage, reproduce and resolve reported issues.",
        category: "Engineering",
        sections: &["Reported", "Triaged", "Fixing", "Verified"],
        columns: &[
            TemplateColumnDef {
                name: "Severity",
                column_type: ColumnType::Select,
                width: 130,
                options: &[
                    TemplateOptionDef {
                        label: "Critical",
                        color: OptionColor::Red,
                    },
                    TemplateOptionDef {
                        label: "Major",
                        color: OptionColor::Orange,
                    },
                    TemplateOptionDef {
                        label: "Minor",
                        color: OptionColor::Yellow,
                    },
                    TemplateOptionDef {
                        label: "Trivial",
                        color: OptionColor::Gray,
                    },
                ],
            },
            TemplateColumnDef {
                name: "Reproducible",
                column_type: ColumnType::Checkbox,
                width: 120,
                options: &[],
            },
            TemplateColumnDef {
                name: "Environment",
                column_type: ColumnType::Text,
                width: 180,
                options: &[],
            },
        ],
    },
    TemplateDefinition {
        name: "Marketing Campaign",
        description: "Coordinate channels, assets and launch dates for a campaign.",
        category: "Marketing",
        sections: &["Ideas", "Planning", "In Production", "Live"],
        columns: &[
            TemplateColumnDef {
                name: "Channel",
                column_type: ColumnType::Multiselect,
                width: 180,
                options: &[
                    TemplateOptionDef {
                        label: "Email",
                        color: OptionColor::Blue,
                    },
                    TemplateOptionDef {
                        label: "Social",
                        color: OptionColor::Pink,
                    },
                    TemplateOptionDef {
                        label: "Paid Ads",
                        color: OptionColor::Amber,
                    },
                    TemplateOptionDef {
                        label: "Blog",
                        color: OptionColor::Green,
                    },
                ],
            },
            TemplateColumnDef {
                name: "Budget",
                column_type: ColumnType::Number,
                width: 120,
                options: &[],
            },
            TemplateColumnDef {
                name: "Launch Date",
                column_type: ColumnType::Date,
                width: 140,
                options: &[],
            },
        ],
    },
    TemplateDefinition {
        name: "Content Calendar",
        description: "Schedule and publish articles, videos and posts.",
        category: "Marketing",
        sections: &["Drafting", "Editing", "Scheduled", "Published"],
        columns: &[
            TemplateColumnDef {
                name: "Format",
                column_type: ColumnType::Select,
                width: 130,
                options: &[
                    TemplateOptionDef {
                        label: "Article",
                        color: OptionColor::Indigo,
                    },
                    TemplateOptionDef {
                        label: "Video",
                        color: OptionColor::Red,
                    },
                    TemplateOptionDef {
                        label: "Podcast",
                        color: OptionColor::Purple,
                    },
                ],
            },
            TemplateColumnDef {
                name: "Publish Date",
                column_type: ColumnType::Date,
                width: 140,
                options: &[],
            },
            TemplateColumnDef {
                name: "Editor",
                column_type: ColumnType::User,
                width: 160,
                options: &[],
            },
        ],
    },
    TemplateDefinition {
        name: "Product Launch",
        description: "Bring a product to market across teams.",
        category: "Product",
        sections: &["Research", "Build", "Go-to-Market", "Launched"],
        columns: &[
            TemplateColumnDef {
                name: "Team",
                column_type: ColumnType::Select,
                width: 140,
                options: &[
                    TemplateOptionDef {
                        label: "Product",
                        color: OptionColor::Violet,
                    },
                    TemplateOptionDef {
                        label: "Engineering",
                        color: OptionColor::Blue,
                    },
                    TemplateOptionDef {
                        label: "Marketing",
                        color: OptionColor::Pink,
                    },
                    TemplateOptionDef {
                        label: "Sales",
                        color: OptionColor::Emerald,
                    },
                ],
            },
            TemplateColumnDef {
                name: "Launch Ready",
                column_type: ColumnType::Checkbox,
                width: 120,
                options: &[],
            },
        ],
    },
    TemplateDefinition {
        name: "Event Planning",
        description: "Organise venues, vendors and attendees for an event.",
        category: "Operations",
        sections: &["To Book", "Confirmed", "On the Day", "Wrap-up"],
        columns: &[
            TemplateColumnDef {
                name: "Vendor",
                column_type: ColumnType::Text,
                width: 180,
                options: &[],
            },
            TemplateColumnDef {
                name: "Cost",
                column_type: ColumnType::Number,
                width: 120,
                options: &[],
            },
            TemplateColumnDef {
                name: "Status",
                column_type: ColumnType::Select,
                width: 130,
                options: &[
                    TemplateOptionDef {
                        label: "Pending",
                        color: OptionColor::Yellow,
                    },
                    TemplateOptionDef {
                        label: "Booked",
                        color: OptionColor::Green,
                    },
                    TemplateOptionDef {
                        label: "Cancelled",
                        color: OptionColor::Gray,
                    },
                ],
            },
        ],
    },
    TemplateDefinition {
        name: "Sales Pipeline",
        description: "Track leads from first contact to closed deal.",
        category: "Sales",
        sections: &["Lead", "Qualified", "Proposal", "Negotiation", "Closed"],
        columns: &[
            TemplateColumnDef {
                name: "Deal Value",
                column_type: ColumnType::Number,
                width: 130,
                options: &[],
            },
            TemplateColumnDef {
                name: "Outcome",
                column_type: ColumnType::Select,
                width: 130,
                options: &[
                    TemplateOptionDef {
                        label: "Open",
                        color: OptionColor::Sky,
                    },
                    TemplateOptionDef {
                        label: "Won",
                        color: OptionColor::Green,
                    },
                    TemplateOptionDef {
                        label: "Lost",
                        color: OptionColor::Red,
                    },
                ],
            },
            TemplateColumnDef {
                name: "Account Owner",
                column_type: ColumnType::User,
                width: 160,
                options: &[],
            },
        ],
    },
    TemplateDefinition {
        name: "Hiring Pipeline",
        description: "Move candidates through screening, interviews and offers.",
        category: "People",
        sections: &["Applied", "Screening", "Interviewing", "Offer", "Hired"],
        columns: &[
            TemplateColumnDef {
                name: "Role",
                column_type: ColumnType::Text,
                width: 160,
                options: &[],
            },
            TemplateColumnDef {
                name: "Source",
                column_type: ColumnType::Select,
                width: 140,
                options: &[
                    TemplateOptionDef {
                        label: "Referral",
                        color: OptionColor::Emerald,
                    },
                    TemplateOptionDef {
                        label: "Job Board",
                        color: OptionColor::Blue,
                    },
                    TemplateOptionDef {
                        label: "Agency",
                        color: OptionColor::Orange,
                    },
                ],
            },
            TemplateColumnDef {
                name: "Interviewer",
                column_type: ColumnType::User,
                width: 160,
                options: &[],
            },
        ],
    },
];

fn default_width() -> i32 {
    DEFAULT_WIDTH
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSectionSpec {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateOptionSpec {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub color: OptionColor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default)]
    pub options: Vec<TemplateOptionSpec>,
}

impl TemplateColumnSpec {
    /// Build and validate the column draft this template column describes.
    pub fn to_draft(&self, is_default: bool) -> ColumnResult<ColumnDraft> {
        let mut draft = if is_default {
            ColumnDraft::new_default(self.name.clone(), self.column_type)
        } else {
            ColumnDraft::new(self.name.clone(), self.column_type)
        };
        draft.set_width(self.width);
        for option in &self.options {
            draft.add_option(&option.label, option.value.as_deref(), Some(option.color))?;
        }
        draft.validate()?;
        Ok(draft)
    }

    pub fn from_record(record: &ColumnRecord) -> Self {
        Self {
            name: record.name.clone(),
            column_type: record.column_type,
            width: record.width,
            options: record
                .options
                .iter()
                .map(|option| TemplateOptionSpec {
                    label: option.label.clone(),
                    value: Some(option.value.clone()),
                    color: option.color,
                })
                .collect(),
        }
    }
}

impl From<&TemplateColumnDef> for TemplateColumnSpec {
    fn from(def: &TemplateColumnDef) -> Self {
        Self {
            name: def.name.to_string(),
            column_type: def.column_type,
            width: def.width,
            options: def
                .options
                .iter()
                .map(|option| TemplateOptionSpec {
                    label: option.label.to_string(),
                    value: None,
                    color: option.color,
                })
                .collect(),
        }
    }
}

impl TemplateDefinition {
    pub fn section_specs(&self) -> Vec<TemplateSectionSpec> {
        self.sections
            .iter()
            .map(|name| TemplateSectionSpec {
                name: name.to_string(),
            })
            .collect()
    }

    pub fn column_specs(&self) -> Vec<TemplateColumnSpec> {
        self.columns.iter().map(TemplateColumnSpec::from).collect()
    }
}

pub fn default_column_specs() -> Vec<TemplateColumnSpec> {
    DEFAULT_COLUMNS.iter().map(TemplateColumnSpec::from).collect()
}

pub fn default_section_specs() -> Vec<TemplateSectionSpec> {
    DEFAULT_SECTIONS
        .iter()
        .map(|name| TemplateSectionSpec {
            name: name.to_string(),
        })
        .collect()
}
