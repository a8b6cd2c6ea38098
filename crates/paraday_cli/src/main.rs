//! `paraday` command line entry point.
//!
//! # Responsibility
//! - Resolve configuration from file, environment and flags.
//! - Load the workspace from disk and print read-only views.
//!
//! # Invariants
//! - Nothing is written back to the document directories.

mod cli;
mod render;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Command};
use log::{error, info};
use paraday_core::service::daily_service::latest_note;
use paraday_core::service::overview::{status_board, tasks_in_context, DashboardSummary};
use paraday_core::service::planning::{apply_plan, evaluate_plan};
use paraday_core::service::project_service::{
    create_project, ProjectDraft, ProjectFilter, ProjectServiceError,
};
use paraday_core::source::source_for;
use paraday_core::{
    core_version, init_logging, ConfigError, MorningPlan, PlanningError, SourceError, SourceMode,
    Task, TaskStatus, Workspace, WorkspaceConfig,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_LOG_DIR_NAME: &str = "paraday-logs";

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Source(SourceError),
    Planning(PlanningError),
    Project(ProjectServiceError),
    Json(serde_json::Error),
    MissingDirectory(&'static str),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Planning(err) => write!(f, "{err}"),
            Self::Project(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to encode output: {err}"),
            Self::MissingDirectory(label) => write!(
                f,
                "no {label} directory configured; pass --{label}-dir or set it in the config"
            ),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Planning(err) => Some(err),
            Self::Project(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::MissingDirectory(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}

impl From<PlanningError> for CliError {
    fn from(err: PlanningError) -> Self {
        Self::Planning(err)
    }
}

impl From<ProjectServiceError> for CliError {
    fn from(err: ProjectServiceError) -> Self {
        Self::Project(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("paraday: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    start_logging(&config);
    info!(
        "event=cli_start module=cli status=ok source_mode={}",
        config.source_mode.as_str()
    );

    match cli.command {
        Command::Version => {
            println!("paraday {}", core_version());
        }
        Command::Paths => {
            let hints = config.path_hints();
            if cli.json {
                let map: serde_json::Map<String, serde_json::Value> = hints
                    .iter()
                    .map(|(label, path)| (label.to_string(), path.display().to_string().into()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                print!("{}", render::paths(&hints));
            }
        }
        Command::Summary => {
            let workspace = load_projects(&config)?;
            let summary = DashboardSummary::build(workspace.projects(), workspace.board());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::summary(&summary));
            }
        }
        Command::Projects {
            status,
            priority,
            area,
        } => {
            let workspace = load_projects(&config)?;
            let filter = ProjectFilter {
                status,
                priority,
                area,
            };
            let matched = filter.apply(workspace.projects());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&matched)?);
            } else {
                print!("{}", render::projects(&matched));
            }
        }
        Command::Tasks { status, context } => {
            let workspace = load_projects(&config)?;
            let board = workspace.board();
            match (status, context.as_deref()) {
                (None, None) => {
                    let columns = status_board(board);
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&columns)?);
                    } else {
                        print!("{}", render::status_board(&columns));
                    }
                }
                (status, context) => {
                    let status = status.unwrap_or(TaskStatus::Inbox);
                    output_tasks(cli.json, &tasks_in_context(board, status, context))?;
                }
            }
        }
        Command::Daily => {
            let workspace = load_daily(&config)?;
            let Some(note) = latest_note(workspace.daily_notes()) else {
                println!("no daily notes found");
                return Ok(());
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(note)?);
            } else {
                print!("{}", render::daily(note));
            }
        }
        Command::Plan {
            priority,
            support,
            apply,
        } => {
            let workspace = load_projects(&config)?;
            let plan = MorningPlan {
                daily_priority: Some(priority),
                support,
            };
            let budget = evaluate_plan(workspace.board(), &plan);
            if apply {
                let planned = apply_plan(workspace.board(), &plan, Utc::now())?;
                if cli.json {
                    let out = serde_json::json!({
                        "budget": budget,
                        "tasks": planned.views(),
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                } else {
                    print!("{}", render::budget(&budget));
                    print!("{}", render::today(&planned));
                }
            } else if cli.json {
                println!("{}", serde_json::to_string_pretty(&budget)?);
            } else {
                print!("{}", render::budget(&budget));
            }
        }
        Command::NewProject {
            title,
            id,
            status,
            priority,
            area,
            deadline,
            progress,
            description,
        } => {
            let existing = match config.projects_dir {
                Some(_) => load_projects(&config)?.projects().to_vec(),
                None => Vec::new(),
            };
            let draft = ProjectDraft {
                id,
                title,
                status,
                priority,
                area,
                deadline,
                progress,
                description,
            };
            let created = create_project(&existing, draft)?;
            if cli.json {
                let out = serde_json::json!({
                    "project": created.project,
                    "document": created.document,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", created.document);
            }
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<WorkspaceConfig, CliError> {
    let base = match cli.config.as_deref() {
        Some(path) => WorkspaceConfig::from_json_file(path)?,
        None => WorkspaceConfig::default(),
    };
    let mut config = base.with_env_overrides()?;

    if let Some(dir) = cli.projects_dir.clone() {
        config.projects_dir = Some(dir);
    }
    if let Some(dir) = cli.daily_dir.clone() {
        config.daily_dir = Some(dir);
    }
    if cli.indexed {
        config.source_mode = SourceMode::Indexed;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = Some(level);
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.log_dir = Some(dir);
    }
    Ok(config)
}

/// Logging failures are reported and otherwise ignored.
fn start_logging(config: &WorkspaceConfig) {
    let log_dir = config
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
    let log_dir = absolute(&log_dir);
    if let Err(err) = init_logging(config.effective_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("paraday: logging disabled: {err}");
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn load_projects(config: &WorkspaceConfig) -> Result<Workspace, CliError> {
    let dir = config
        .projects_dir
        .as_deref()
        .ok_or(CliError::MissingDirectory("projects"))?;
    let mut workspace = Workspace::new();
    let source = source_for(config.source_mode, dir);
    workspace.reload_projects(source.as_ref(), Utc::now())?;
    Ok(workspace)
}

fn load_daily(config: &WorkspaceConfig) -> Result<Workspace, CliError> {
    let dir = config
        .daily_dir
        .as_deref()
        .ok_or(CliError::MissingDirectory("daily"))?;
    let mut workspace = Workspace::new();
    let source = source_for(config.source_mode, dir);
    workspace.reload_daily(source.as_ref())?;
    Ok(workspace)
}

fn output_tasks(json: bool, tasks: &[&Task]) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else {
        print!("{}", render::tasks(tasks));
    }
    Ok(())
}
