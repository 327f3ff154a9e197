//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use retro_shelf_catalog::Category;

pub(crate) fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_str_loose(s)
        .ok_or_else(|| format!("unknown category '{s}' (expected games or consoles)"))
}

#[derive(Parser)]
#[command(name = "retro-shelf")]
#[command(about = "Track a retro game and console collection", long_about = None)]
pub(crate) struct Cli {
    /// Path to the collection database (defaults to the user data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show collection statistics and sync status
    Stats,

    /// List items in the collection
    List {
        /// Category to list: games or consoles (default: both)
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Filter by platform name (case-insensitive exact match)
        #[arg(short, long)]
        platform: Option<String>,

        /// Only show wishlist entries
        #[arg(short, long)]
        wishlist: bool,

        /// Filter by title substring (case-insensitive)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Add an item to the collection
    Add {
        /// Category to add to: games or consoles
        #[arg(value_parser = parse_category)]
        category: Category,

        /// Item title
        title: String,

        /// Platform name (created in the registry if missing)
        platform: String,

        /// Price paid
        #[arg(long, default_value_t = 0.0)]
        price: f64,

        /// Acquisition date as DD/MM/YYYY
        #[arg(long)]
        acquired: Option<String>,

        /// Release year
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        developer: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Mark as a wishlist entry rather than owned
        #[arg(long)]
        wishlist: bool,
    },

    /// Edit an existing item by id
    Edit {
        /// Item id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        platform: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        /// Acquisition date as DD/MM/YYYY
        #[arg(long)]
        acquired: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        developer: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Set or clear the wishlist flag
        #[arg(long)]
        wishlist: Option<bool>,

        /// Move the item to the other item category
        #[arg(long, value_parser = parse_category)]
        move_to: Option<Category>,
    },

    /// Remove an item by id
    Rm {
        /// Item id
        id: String,
    },

    /// Mark an item as physically verified
    Check {
        /// Item id
        id: String,
    },

    /// Manage the platform registry
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },

    /// Fetch cover art and metadata for an item (best effort)
    Enrich {
        /// Item id
        id: String,

        /// Source URL for the cover image
        #[arg(long)]
        cover_url: Option<String>,

        /// List candidate cover URLs for the item's title and exit
        #[arg(long, conflicts_with = "cover_url")]
        find_covers: bool,

        /// Skip the metadata lookup
        #[arg(long)]
        no_metadata: bool,
    },

    /// Import items from bulk text or a snapshot file
    Import {
        #[command(subcommand)]
        action: ImportAction,
    },

    /// Export the collection to a snapshot file
    Export {
        /// Destination JSON file
        file: PathBuf,
    },

    /// Sync the collection with a cloud snapshot
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },

    /// Delete every record in the database
    Nuke {
        /// Confirm deletion (required; without this, shows a preview only)
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum PlatformAction {
    /// List registered platforms
    List,

    /// Add a platform
    Add {
        /// Platform name (unique, case-insensitive)
        name: String,

        /// Logo URL or data URI
        #[arg(long)]
        logo: Option<String>,
    },

    /// Rename a platform (items referencing it follow)
    Rename {
        /// Platform id
        id: String,

        /// New name
        name: String,
    },

    /// Remove a platform (fails while items reference it)
    Rm {
        /// Platform id
        id: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ImportAction {
    /// Import "Platform;Title" lines from a file or stdin
    Bulk {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Category to import into
        #[arg(short, long, value_parser = parse_category, default_value = "games")]
        category: Category,
    },

    /// Replace the local collection with a snapshot file
    File {
        /// Snapshot JSON file
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum SyncAction {
    /// Download the cloud snapshot and replace the local collection
    Pull {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Upload the local collection to the configured gist
    Push,

    /// Show the configured link, token state, and last sync outcome
    Status,

    /// Set the sync link and GitHub token
    Config {
        /// Share link to pull from (gist, Drive, or raw JSON URL)
        #[arg(long)]
        url: Option<String>,

        /// GitHub personal access token with the gist scope
        #[arg(long)]
        token: Option<String>,
    },
}
