use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "turkgate")]
#[command(about = "Manage participant groups for TurkGate", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Credentials file with mysql and aws sections
    #[arg(long, env = "TURKGATE_CREDENTIALS", default_value = "credentials.yaml")]
    pub credentials: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the SurveyRequest table if it does not exist
    Init,

    /// List distinct group names
    Groups,

    /// List worker IDs, across all groups or for one group
    Workers {
        /// Restrict to one group
        #[arg(long)]
        group: Option<String>,
    },

    /// Show all requests of a group
    Requests {
        /// Group name
        #[arg(long)]
        group: String,
    },

    /// Delete all requests of a group
    Remove {
        /// Group name
        #[arg(long)]
        group: String,
    },

    /// Copy a group's requests under a new group name
    Copy {
        /// Existing group name
        #[arg(long)]
        from: String,

        /// New group name
        #[arg(long)]
        to: String,
    },

    /// Rename a group (copy, then delete the original)
    Rename {
        /// Existing group name
        #[arg(long)]
        from: String,

        /// New group name
        #[arg(long)]
        to: String,
    },

    /// List titles of recent HITs
    Titles {
        /// HITs per listing page
        #[arg(long, default_value = "10")]
        recent: u32,

        /// Number of listing pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Fetch assignments for a HIT title and store them as requests
    Sync {
        /// HIT title to match exactly
        #[arg(long)]
        title: String,

        /// Group name for the new requests
        #[arg(long)]
        group: String,

        /// Survey URL for the new requests
        #[arg(long)]
        url: Option<String>,

        /// Discard submission timestamps
        #[arg(long)]
        no_time: bool,
    },

    /// Import requests from a HIT results CSV file
    Import {
        /// Results file path
        #[arg(long)]
        file: PathBuf,

        /// Group name for the new requests
        #[arg(long)]
        group: String,

        /// Survey URL for the new requests
        #[arg(long)]
        url: Option<String>,

        /// Worker-id column name
        #[arg(long, default_value = "WorkerId")]
        id_col: String,

        /// Submit-time column name
        #[arg(long, default_value = "SubmitTime")]
        time_col: String,
    },
}
