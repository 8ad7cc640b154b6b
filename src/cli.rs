// Command-line surface for `cl`: the clap derive tree that `main` parses
// and `commands::App` dispatches on.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cl")]
#[command(version, about = "CLI tool for managing ClickUp tasks")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage CLI configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Manage named aliases for ClickUp resource IDs
    #[command(subcommand)]
    Alias(AliasCommand),

    /// Manage ClickUp spaces
    #[command(subcommand)]
    Space(SpaceCommand),

    /// Manage ClickUp folders
    #[command(subcommand)]
    Folder(FolderCommand),

    /// Manage ClickUp lists
    #[command(subcommand)]
    List(ListCommand),

    /// Manage ClickUp tasks
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Set up ClickUp CLI configuration
    Init {
        /// API token (prompted for when omitted)
        #[arg(long, env = "CLICKUP_API_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Display current configuration
    Show,
}

#[derive(Debug, Subcommand)]
pub enum AliasCommand {
    /// Set an alias for a resource ID
    Set {
        name: String,
        /// Space ID to alias
        #[arg(short = 's', long)]
        space_id: Option<String>,
        /// Folder ID to alias
        #[arg(short = 'f', long)]
        folder_id: Option<String>,
        /// List ID to alias
        #[arg(short = 'l', long)]
        list_id: Option<String>,
    },
    /// List all aliases
    List,
    /// Remove an alias
    Remove { name: String },
}

#[derive(Debug, Subcommand)]
pub enum SpaceCommand {
    /// List all spaces in the workspace
    List,
}

#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders in a space
    List {
        /// Space ID or @alias (prompted for when omitted)
        #[arg(short = 's', long)]
        space_id: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// List lists in a folder or space
    List {
        /// Folder ID or @alias to list from
        #[arg(short = 'f', long, conflicts_with = "space_id")]
        folder_id: Option<String>,
        /// Space ID or @alias for folderless lists
        #[arg(short = 's', long)]
        space_id: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List tasks in a ClickUp list
    List {
        /// List ID or @alias to show tasks from
        #[arg(short = 'l', long)]
        list_id: String,
        /// Filter by status
        #[arg(short = 's', long)]
        status: Option<String>,
        /// Filter by assignee
        #[arg(short = 'a', long)]
        assignee: Option<String>,
    },
    /// View a task by ID, or list open tasks assigned to a user
    View {
        task_id: Option<String>,
        /// User ID to filter by (default: current user)
        #[arg(short = 'u', long = "user")]
        user_id: Option<String>,
    },
    /// Create a new task
    Create {
        /// List ID or @alias to create the task in
        #[arg(short = 'l', long)]
        list_id: String,
        /// Task name
        #[arg(short = 'n', long)]
        name: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Update an existing task
    Update {
        task_id: String,
        /// New task name
        #[arg(short = 'n', long)]
        name: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task
    Delete {
        task_id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Options shared by `task create` and `task update`.
#[derive(Debug, Clone, Default, Args)]
pub struct TaskFields {
    /// Task description
    #[arg(short = 'd', long)]
    pub description: Option<String>,
    /// Task status
    #[arg(short = 's', long)]
    pub status: Option<String>,
    /// Priority: 1=urgent, 2=high, 3=normal, 4=low
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub priority: Option<u8>,
    /// Assignee user ID (added to existing assignees on update)
    #[arg(short = 'a', long)]
    pub assignee: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(short = 'D', long)]
    pub due_date: Option<String>,
    /// Tag(s) to set
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,
    /// Time estimate (e.g. 2h, 30m, 1h30m)
    #[arg(short = 'T', long)]
    pub time_estimate: Option<String>,
}
