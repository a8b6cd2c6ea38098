//! Command line definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use paraday_core::{Priority, ProjectStatus, TaskStatus};
use std::path::PathBuf;

/// Paraday - markdown PARA projects and GTD planning
#[derive(Parser)]
#[command(
    name = "paraday",
    about = "Plan the day from markdown projects and daily notes",
    version
)]
pub struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding project documents
    #[arg(long, global = true)]
    pub projects_dir: Option<PathBuf>,

    /// Directory holding daily notes
    #[arg(long, global = true)]
    pub daily_dir: Option<PathBuf>,

    /// Discover documents through index.json instead of listing directories
    #[arg(long, global = true)]
    pub indexed: bool,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dashboard: active projects, today, next actions, inbox
    Summary,

    /// List projects
    Projects {
        #[arg(long, value_parser = parse_project_status)]
        status: Option<ProjectStatus>,

        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,

        #[arg(long)]
        area: Option<String>,
    },

    /// Show the status board, or one status column
    Tasks {
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,

        /// Execution context filter; lists the inbox when no status is given
        #[arg(long)]
        context: Option<String>,
    },

    /// Habits of the most recent daily note
    Daily,

    /// Budget a morning plan and optionally apply it
    Plan {
        /// Daily priority task id
        #[arg(long)]
        priority: String,

        /// Support task ids
        #[arg(long = "support", value_name = "ID")]
        support: Vec<String>,

        /// Show the board after applying the plan
        #[arg(long)]
        apply: bool,
    },

    /// Print the document for a new project
    NewProject {
        #[arg(long)]
        title: String,

        #[arg(long)]
        id: Option<String>,

        #[arg(long, value_parser = parse_project_status, default_value = "active")]
        status: ProjectStatus,

        #[arg(long, value_parser = parse_priority, default_value = "medium")]
        priority: Priority,

        #[arg(long)]
        area: Option<String>,

        /// YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        deadline: Option<NaiveDate>,

        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: u8,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Show configured directories
    Paths,

    /// Show the core version
    Version,
}

fn parse_project_status(value: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::parse(value).ok_or_else(|| {
        let known: Vec<&str> = ProjectStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown project status `{value}`; expected {}", known.join("|"))
    })
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).ok_or_else(|| format!("unknown priority `{value}`; expected low|medium|high"))
}

fn parse_task_status(value: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(value).ok_or_else(|| {
        let known: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown task status `{value}`; expected {}", known.join("|"))
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}`: {err}"))
}
