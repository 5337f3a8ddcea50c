use crate::config::{API_URL_ENV, DEFAULT_API_URL, TOKEN_ENV};
use crate::dashboard::{Dashboard, View};
use crate::output::formatter::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opendrive")]
#[command(about = "A command-line client for OpenDrive cloud storage", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// OpenDrive API base URL
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// API token (defaults to the session saved by `auth login`)
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Disable colorized output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Print long listings directly instead of through a pager
    #[arg(long, global = true)]
    pub no_pager: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show folders and files of a view (My Drive, Recent, Trash)
    Browse {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// File commands (list, upload, download, rename, trash, restore, delete)
    Files {
        #[command(subcommand)]
        command: FilesCommands,
    },
    /// Folder commands (list, create, delete)
    Folders {
        #[command(subcommand)]
        command: FoldersCommands,
    },
    /// Show storage usage and quota
    Storage,
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

/// Where a command operates, and which listing is shown after it succeeds.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct LocationArgs {
    /// View to show
    #[arg(long, value_enum)]
    pub view: Option<View>,

    /// Folder ID (omit for the top level; ignored in the trash view)
    #[arg(long)]
    pub folder: Option<u64>,

    /// Only show files whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

impl LocationArgs {
    /// Navigate a fresh dashboard to this location
    pub fn dashboard(&self, default_view: View) -> Dashboard {
        let mut dashboard = Dashboard::default();
        dashboard.change_view(self.view.unwrap_or(default_view));

        match self.folder {
            Some(folder_id) => dashboard.open_folder(folder_id),
            None => dashboard.back(),
        }

        dashboard.search = self.search.clone().filter(|s| !s.is_empty());
        dashboard
    }
}

#[derive(Subcommand)]
pub enum FilesCommands {
    /// List files (without folders)
    List {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Upload a local file
    Upload {
        /// Path of the file to upload
        path: PathBuf,

        #[command(flatten)]
        location: LocationArgs,
    },
    /// Download a file
    Download {
        /// File ID
        file_id: u64,

        /// Where to write the file (defaults to its name in the current directory,
        /// which is only replaced with --yes)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rename a file
    Rename {
        /// File ID
        file_id: u64,

        /// New file name
        name: String,

        #[command(flatten)]
        location: LocationArgs,
    },
    /// Move a file to the trash
    Trash {
        /// File ID
        file_id: u64,

        #[command(flatten)]
        location: LocationArgs,
    },
    /// Restore a file from the trash
    Restore {
        /// File ID
        file_id: u64,

        #[command(flatten)]
        location: LocationArgs,
    },
    /// Permanently delete a file
    Delete {
        /// File ID
        file_id: u64,

        #[command(flatten)]
        location: LocationArgs,
    },
}

#[derive(Subcommand)]
pub enum FoldersCommands {
    /// List folders
    List {
        /// Parent folder ID (omit for the top level)
        #[arg(long)]
        parent: Option<u64>,
    },
    /// Create a folder
    Create {
        /// Folder name
        name: String,

        /// Parent folder ID (omit for the top level)
        #[arg(long)]
        parent: Option<u64>,
    },
    /// Delete a folder and everything inside it
    Delete {
        /// Folder ID
        folder_id: u64,

        /// Parent folder to list afterwards
        #[arg(long)]
        parent: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in and save the session token
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password (prompted for when omitted)
        #[arg(long, env = "OPENDRIVE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and save the session token
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Account password (prompted for when omitted)
        #[arg(long, env = "OPENDRIVE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Log out and forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
}
