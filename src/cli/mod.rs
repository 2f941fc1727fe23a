//! CLI module - Command-line interface for animerec
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

/// animerec - REST front for AniList discovery queries and a local anime catalog
#[derive(Parser)]
#[command(name = "animerec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (overrides the default search paths)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Apply database migrations and exit
    Migrate,

    /// Run a discovery query against AniList and print the titles
    #[command(alias = "d")]
    Discover {
        #[command(subcommand)]
        query: DiscoverCommands,
    },
}

#[derive(Subcommand)]
pub enum DiscoverCommands {
    /// Highest scored anime
    Top {
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Currently airing, most popular
    Popular,
    /// One season of one year
    Seasonal { season: String, year: String },
    /// By a single genre
    Genre { genre: String },
    /// By a single tag
    Tag { tag: String },
    /// By several comma separated genres
    MultiGenre { genres: String },
    /// By several comma separated tags
    MultiTag { tags: String },
    /// Everything from one year
    Yearly { year: String },
}
