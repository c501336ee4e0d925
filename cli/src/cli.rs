use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "userdir")]
#[command(about = "Browse and manage the user directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Origin of the users API (the `/api` suffix is added)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users as cards with search, sort and paging
    List {
        /// Case-insensitive filter on name or email
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// name, name-desc, email, email-desc, created (newest first), created-desc (oldest first)
        #[arg(long, default_value = "name")]
        sort: String,

        /// Page to show, starting at 1
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,

        /// Users per page (defaults to the configured value)
        #[arg(long)]
        per_page: Option<usize>,

        /// Interactive mode (page through, search and sort from a menu)
        #[arg(long, short = 'I')]
        interactive: bool,
    },
    /// Show a single user
    Show {
        /// User ID
        id: String,
    },
    /// Create a user
    Add {
        #[arg(long, short = 'n')]
        name: String,

        #[arg(long, short = 'e')]
        email: String,
    },
    /// Change a user's name and/or email
    Edit {
        /// User ID
        id: String,

        #[arg(long, short = 'n')]
        name: Option<String>,

        #[arg(long, short = 'e')]
        email: Option<String>,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
