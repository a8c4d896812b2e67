// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "mirrorlink",
    version = "0.1.0",
    about = "Rewrite GitHub links to go through an accelerating mirror",
    long_about = "mirrorlink rewrites GitHub repository, raw-file, and gist URLs so they are \
                  fetched through a GitHub-accelerating mirror, and can report the mirror's \
                  operational status (size limit, allow/deny lists, version)."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (rewrite, status, ping)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite a GitHub link to go through the mirror
    ///
    /// Example: mirrorlink rewrite https://github.com/golang/go --origin https://mirror.example
    Rewrite {
        /// The GitHub-family URL to rewrite
        ///
        /// Accepted forms: github.com, raw.githubusercontent.com, and gist
        /// URLs, with or without a scheme or a leading www.
        url: String,

        /// Mirror origin to route the link through (e.g. https://mirror.example)
        ///
        /// Only the scheme and host are used; any path is ignored
        #[arg(long)]
        origin: String,

        /// Output the result in JSON format instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show the mirror's operational status
    ///
    /// Example: mirrorlink status https://mirror.example
    Status {
        /// Mirror base URL to query (e.g. https://mirror.example)
        base_url: String,

        /// Output the status in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check whether the mirror is reachable and healthy
    ///
    /// Example: mirrorlink ping https://mirror.example
    Ping {
        /// Mirror base URL to check (e.g. https://mirror.example)
        base_url: String,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why use structs and enums?
//    - Structs group related data (like the CLI arguments)
//    - Enums represent choices (like "rewrite OR status OR ping")
//    - Both are core Rust types for organizing data
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. What does 'pub' mean?
//    - pub = public, meaning other modules can use this
//    - Without pub, items are private to this module
//
// 4. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - &str is borrowed (references data owned elsewhere)
//    - We use String here because we need to own the CLI arguments
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rewrite_command() {
        let cli = Cli::try_parse_from([
            "mirrorlink",
            "rewrite",
            "https://github.com/golang/go",
            "--origin",
            "https://mirror.example",
        ])
        .unwrap();

        match cli.command {
            Commands::Rewrite { url, origin, json } => {
                assert_eq!(url, "https://github.com/golang/go");
                assert_eq!(origin, "https://mirror.example");
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rewrite_requires_origin() {
        let result = Cli::try_parse_from(["mirrorlink", "rewrite", "github.com/golang/go"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_status_command_with_json() {
        let cli = Cli::try_parse_from(["mirrorlink", "status", "https://mirror.example", "--json"])
            .unwrap();

        match cli.command {
            Commands::Status { base_url, json } => {
                assert_eq!(base_url, "https://mirror.example");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
