use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List projects.
    Projects,
    /// List tasks, optionally of one project.
    Tasks(TasksArgs),
    /// Report projects with too many or no next actions.
    Report(ReportArgs),
    /// Move stale low-priority tasks to the archive project.
    Archive(ArchiveArgs),
    /// Make sure a time entry is running, asking over chat if not.
    AssureEntry(AssureEntryArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TasksArgs {
    /// Project name (exact match).
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Most marked tasks a project may carry.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Marker label.
    #[arg(long)]
    pub label: Option<String>,

    /// Project never reported as empty (repeatable, adds to config).
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Classify and print without sending the digest.
    #[arg(long)]
    pub no_send: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ArchiveArgs {
    /// Source project name.
    #[arg(long)]
    pub from: Option<String>,

    /// Destination project name.
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub older_than_hours: Option<i64>,

    #[arg(long)]
    pub priority_below: Option<i32>,

    /// Select and report without moving anything.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AssureEntryArgs {
    /// Only send a notice; do not wait for a reply.
    #[arg(long)]
    pub notify_only: bool,

    /// Override the reply wait window.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
