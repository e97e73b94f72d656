use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use sea_orm::DatabaseConnection;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use taskboard::catalog::OnboardingCategory;
use taskboard::columns::{ColumnEditor, ColumnRecord, ColumnType, OptionColor};
use taskboard::config::AppConfig;
use taskboard::database::entities::invitations::InvitationStatus;
use taskboard::database::entities::projects::ProjectView;
use taskboard::database::entities::workspace_members::MemberRole;
use taskboard::database::{
    establish_connection, get_database_url, migrate_database, seed_data, setup_database,
    MigrateDirection,
};
use taskboard::services::{
    ColumnService, DiagnosticsService, OnboardingAnswers, OnboardingService, ProjectService,
    TemplateBlueprint, TemplateService, WorkspaceService,
};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Config file (defaults to ./taskboard.yaml when present)
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database path, or :memory:
    #[clap(short, long, global = true)]
    database: Option<String>,
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// Workspace slug used by commands that need one
    #[clap(short, long, global = true)]
    workspace: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    Seed {
        #[clap(subcommand)]
        target: SeedTarget,
    },
    Workspace {
        #[clap(subcommand)]
        command: WorkspaceCommands,
    },
    User {
        #[clap(subcommand)]
        command: UserCommands,
    },
    Onboarding {
        #[clap(subcommand)]
        command: OnboardingCommands,
    },
    Templates {
        #[clap(subcommand)]
        command: TemplateCommands,
    },
    Project {
        #[clap(subcommand)]
        command: ProjectCommands,
    },
    Column {
        #[clap(subcommand)]
        command: ColumnCommands,
    },
    Report {
        #[clap(subcommand)]
        report: ReportCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init,
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(Subcommand, Debug)]
enum SeedTarget {
    /// Replace every global template with the built-in catalog
    Templates,
    /// Replace the onboarding dropdown options
    Onboarding,
    All,
}

#[derive(Subcommand, Debug)]
enum WorkspaceCommands {
    Create {
        #[clap(long)]
        name: String,
        #[clap(long)]
        slug: String,
        /// User id of the owner
        #[clap(long)]
        owner: Option<i32>,
    },
    AddMember {
        #[clap(long)]
        user: i32,
        #[clap(long, default_value = "member")]
        role: MemberRole,
    },
    Invite {
        #[clap(long)]
        email: String,
        #[clap(long, default_value = "member")]
        role: MemberRole,
        #[clap(long)]
        invited_by: Option<i32>,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    Create {
        #[clap(long)]
        email: String,
        #[clap(long)]
        name: String,
    },
    Onboard {
        user: i32,
        #[clap(long)]
        industry: Option<String>,
        #[clap(long)]
        team_size: Option<String>,
        #[clap(long)]
        role: Option<String>,
        #[clap(long)]
        app_usage: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum OnboardingCommands {
    List { category: OnboardingCategory },
}

#[derive(Subcommand, Debug)]
enum TemplateCommands {
    /// Global templates plus the workspace's own (with --workspace)
    List,
    /// Save a project's sections and columns as a workspace template
    Snapshot {
        #[clap(long)]
        project: i32,
        #[clap(long)]
        name: String,
        #[clap(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectCommands {
    Create {
        #[clap(long)]
        name: String,
        #[clap(long)]
        description: Option<String>,
        #[clap(long, default_value = "board")]
        view: ProjectView,
        #[clap(long)]
        template: Option<i32>,
    },
    AddMember {
        #[clap(long)]
        project: i32,
        #[clap(long)]
        user: i32,
        #[clap(long, default_value = "member")]
        role: MemberRole,
    },
}

#[derive(Subcommand, Debug)]
enum ColumnCommands {
    Create {
        #[clap(long)]
        project: i32,
        #[clap(long)]
        name: String,
        #[clap(long = "type", default_value = "text")]
        column_type: ColumnType,
        #[clap(long)]
        width: Option<i32>,
        #[clap(long)]
        hidden: bool,
        /// Option as LABEL or LABEL:COLOR, repeatable
        #[clap(long = "option")]
        options: Vec<String>,
    },
    Edit {
        #[clap(long)]
        project: i32,
        #[clap(long)]
        column: i32,
        #[clap(long)]
        name: Option<String>,
        #[clap(long = "type")]
        column_type: Option<ColumnType>,
        #[clap(long)]
        width: Option<i32>,
        #[clap(long)]
        visible: Option<bool>,
        /// Drop the existing options before adding new ones
        #[clap(long)]
        clear_options: bool,
        #[clap(long = "option")]
        options: Vec<String>,
    },
    List {
        #[clap(long)]
        project: i32,
    },
    Delete {
        #[clap(long)]
        project: i32,
        #[clap(long)]
        column: i32,
    },
}

#[derive(Subcommand, Debug)]
enum ReportCommands {
    Users,
    Invitations {
        #[clap(long)]
        status: Option<InvitationStatus>,
    },
    Members {
        #[clap(long)]
        project: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::load(args.config.as_deref())?.with_overrides(
        args.database.clone(),
        args.log_level.clone(),
        args.workspace.clone(),
    );
    setup_logging(&config.log_level);

    let database_url = get_database_url(Some(&config.database));
    let db = establish_connection(&database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database))?;

    // An in-memory database starts empty on every run
    if config.database == ":memory:" {
        setup_database(&db).await?;
    }

    match args.command {
        Commands::Db { command } => match command {
            DbCommands::Init => {
                info!("Initializing database: {}", config.database);
                setup_database(&db).await?;
            }
            DbCommands::Migrate { direction } => {
                info!("Running database migration: {:?}", direction);
                migrate_database(&db, direction).await?;
            }
        },
        Commands::Seed { target } => run_seed(&db, target).await?,
        Commands::Workspace { command } => run_workspace(&db, &config, command).await?,
        Commands::User { command } => run_user(&db, command).await?,
        Commands::Onboarding { command } => match command {
            OnboardingCommands::List { category } => {
                let options = OnboardingService::new(db.clone())
                    .list_onboarding_options(category)
                    .await?;
                println!("{}", format!("Onboarding options: {}", category).bold());
                for option in options {
                    println!("  {:<20} {}", option.value, option.label);
                }
            }
        },
        Commands::Templates { command } => run_templates(&db, &config, command).await?,
        Commands::Project { command } => run_project(&db, &config, command).await?,
        Commands::Column { command } => run_column(&db, command).await?,
        Commands::Report { report } => run_report(&db, report).await?,
    }

    Ok(())
}

async fn run_seed(db: &DatabaseConnection, target: SeedTarget) -> Result<()> {
    match target {
        SeedTarget::Templates => {
            let count = seed_data::reseed_global_templates(db).await?;
            println!("Seeded {} global templates", count);
        }
        SeedTarget::Onboarding => {
            let count = seed_data::seed_onboarding_options(db).await?;
            println!("Seeded {} onboarding options", count);
        }
        SeedTarget::All => {
            let (templates, options) = seed_data::seed_all(db).await?;
            println!(
                "Seeded {} global templates and {} onboarding options",
                templates, options
            );
        }
    }
    Ok(())
}

async fn resolve_workspace(db: &DatabaseConnection, config: &AppConfig) -> Result<i32> {
    let slug = config
        .default_workspace
        .as_deref()
        .ok_or_else(|| anyhow!("No workspace given; pass --workspace or set default_workspace"))?;
    let workspace = WorkspaceService::new(db.clone())
        .find_workspace_by_slug(slug)
        .await?;
    Ok(workspace.id)
}

async fn run_workspace(
    db: &DatabaseConnection,
    config: &AppConfig,
    command: WorkspaceCommands,
) -> Result<()> {
    let service = WorkspaceService::new(db.clone());
    match command {
        WorkspaceCommands::Create { name, slug, owner } => {
            let workspace = service.create_workspace(&name, &slug, owner).await?;
            println!("Created workspace {} '{}'", workspace.id, workspace.slug);
        }
        WorkspaceCommands::AddMember { user, role } => {
            let workspace_id = resolve_workspace(db, config).await?;
            service
                .add_workspace_member(workspace_id, user, role)
                .await?;
            println!("Added user {} as {}", user, role);
        }
        WorkspaceCommands::Invite {
            email,
            role,
            invited_by,
        } => {
            let workspace_id = resolve_workspace(db, config).await?;
            let invitation = service
                .invite(workspace_id, &email, role, invited_by)
                .await?;
            println!(
                "Invited {} (token {}, expires {})",
                invitation.email,
                invitation.token,
                invitation.expires_at.format("%Y-%m-%d")
            );
        }
    }
    Ok(())
}

async fn run_user(db: &DatabaseConnection, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::Create { email, name } => {
            let user = WorkspaceService::new(db.clone())
                .create_user(&email, &name)
                .await?;
            println!("Created user {} <{}>", user.id, user.email);
        }
        UserCommands::Onboard {
            user,
            industry,
            team_size,
            role,
            app_usage,
        } => {
            let answers = OnboardingAnswers {
                industry,
                team_size,
                role,
                app_usage,
            };
            OnboardingService::new(db.clone())
                .record_onboarding_answers(user, &answers)
                .await?;
            println!("Recorded onboarding answers for user {}", user);
        }
    }
    Ok(())
}

async fn run_templates(
    db: &DatabaseConnection,
    config: &AppConfig,
    command: TemplateCommands,
) -> Result<()> {
    let service = TemplateService::new(db.clone());
    match command {
        TemplateCommands::List => {
            let workspace_id = match config.default_workspace {
                Some(_) => Some(resolve_workspace(db, config).await?),
                None => None,
            };
            println!("{}", "Templates".bold());
            for template in service.list_templates(workspace_id).await? {
                let blueprint = TemplateBlueprint::from_model(&template)?;
                let scope = if template.is_global() {
                    "global".dimmed()
                } else {
                    "workspace".cyan()
                };
                println!(
                    "  {:>3}  {:<22} {:<12} {} ({} sections, {} columns)",
                    template.id,
                    template.name,
                    template.category,
                    scope,
                    blueprint.sections.len(),
                    blueprint.columns.len()
                );
            }
        }
        TemplateCommands::Snapshot {
            project,
            name,
            description,
        } => {
            let workspace_id = resolve_workspace(db, config).await?;
            let template = service
                .create_workspace_template(workspace_id, &name, description.as_deref(), project)
                .await?;
            println!("Created template {} '{}'", template.id, template.name);
        }
    }
    Ok(())
}

async fn run_project(
    db: &DatabaseConnection,
    config: &AppConfig,
    command: ProjectCommands,
) -> Result<()> {
    let service = ProjectService::new(db.clone());
    match command {
        ProjectCommands::Create {
            name,
            description,
            view,
            template,
        } => {
            let workspace_id = resolve_workspace(db, config).await?;
            let created = service
                .create_project(workspace_id, &name, description.as_deref(), view, template)
                .await?;
            println!(
                "{}",
                format!("Project {} '{}'", created.project.id, created.project.name).bold()
            );
            let sections: Vec<_> = created.sections.iter().map(|s| s.name.as_str()).collect();
            println!("  sections: {}", sections.join(", "));
            for column in &created.columns {
                print_column(column);
            }
        }
        ProjectCommands::AddMember {
            project,
            user,
            role,
        } => {
            service.add_project_member(project, user, role).await?;
            println!("Added user {} to project {} as {}", user, project, role);
        }
    }
    Ok(())
}

async fn run_column(db: &DatabaseConnection, command: ColumnCommands) -> Result<()> {
    let service = ColumnService::new(db.clone());
    match command {
        ColumnCommands::Create {
            project,
            name,
            column_type,
            width,
            hidden,
            options,
        } => {
            let mut editor = ColumnEditor::for_new_column(project);
            editor.set_name(name);
            editor.set_type(column_type)?;
            if let Some(width) = width {
                editor.set_width(width);
            }
            editor.set_visible(!hidden);
            for option in &options {
                let (label, color) = parse_option_arg(option)?;
                editor.add_option(label, None, color)?;
            }
            let record = editor.submit(&service).await?;
            print_column(&record);
        }
        ColumnCommands::Edit {
            project,
            column,
            name,
            column_type,
            width,
            visible,
            clear_options,
            options,
        } => {
            let existing = service.get_column(project, column).await?;
            let mut editor = ColumnEditor::for_existing_column(&existing);
            if let Some(name) = name {
                editor.set_name(name);
            }
            if let Some(column_type) = column_type {
                editor.set_type(column_type)?;
            }
            if let Some(width) = width {
                editor.set_width(width);
            }
            if let Some(visible) = visible {
                editor.set_visible(visible);
            }
            if clear_options {
                while !editor.draft().options().is_empty() {
                    editor.remove_option(0)?;
                }
            }
            for option in &options {
                let (label, color) = parse_option_arg(option)?;
                editor.add_option(label, None, color)?;
            }
            let record = editor.submit(&service).await?;
            print_column(&record);
        }
        ColumnCommands::List { project } => {
            println!("{}", format!("Columns of project {}", project).bold());
            for column in service.list_columns(project).await? {
                print_column(&column);
            }
        }
        ColumnCommands::Delete { project, column } => {
            service.delete_column(project, column).await?;
            println!("Deleted column {}", column);
        }
    }
    Ok(())
}

async fn run_report(db: &DatabaseConnection, report: ReportCommands) -> Result<()> {
    let service = DiagnosticsService::new(db.clone());
    match report {
        ReportCommands::Users => {
            println!("{}", "Users".bold());
            println!("{}", service.users_report().await?);
        }
        ReportCommands::Invitations { status } => {
            let heading = match status {
                Some(status) => format!("Invitations ({})", status),
                None => "Invitations".to_string(),
            };
            println!("{}", heading.bold());
            println!("{}", service.invitations_report(status).await?);
        }
        ReportCommands::Members { project } => {
            println!("{}", "Project membership".bold());
            println!("{}", service.membership_report(project).await?);
        }
    }
    Ok(())
}

/// Split `LABEL:COLOR`; a suffix that is not a palette colour stays part of the label.
fn parse_option_arg(arg: &str) -> Result<(&str, Option<OptionColor>)> {
    if let Some((label, color)) = arg.rsplit_once(':') {
        if let Ok(color) = color.parse::<OptionColor>() {
            return Ok((label, Some(color)));
        }
    }
    if arg.trim().is_empty() {
        return Err(anyhow!("Option label is required"));
    }
    Ok((arg, None))
}

fn print_column(column: &ColumnRecord) {
    let flags = match (column.is_default, column.visible) {
        (true, true) => " default".yellow().to_string(),
        (true, false) => " default hidden".yellow().to_string(),
        (false, false) => " hidden".dimmed().to_string(),
        (false, true) => String::new(),
    };
    println!(
        "  {:>3}  {:<24} {:<12} {:>4}px{}",
        column.id,
        column.name,
        column.column_type.as_str(),
        column.width,
        flags
    );
    for option in &column.options {
        println!(
            "         - {} ({}) {}",
            option.label,
            option.value,
            option.color.hex().dimmed()
        );
    }
}

fn setup_logging(log_level: &str) {
    let log_level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sqlx=warn,{}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();
}
