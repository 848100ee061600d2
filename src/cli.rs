// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use linkup::checker::DEFAULT_CONCURRENCY;

#[derive(Parser, Debug)]
#[command(
    name = "linkup",
    version,
    about = "Catch broken links in a static website",
    long_about = "linkup treats a directory as the root of a website and verifies that every \
                  link, image, script and anchor on every page points at something that exists. \
                  External links are pinged."
)]
pub struct Cli {
    /// Show debug output (overridden by LINKUP_LOG)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors (overridden by LINKUP_LOG)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every link in a website directory
    ///
    /// Example: linkup check ./public --timeout 5
    Check {
        /// Directory to treat as the root of the website
        root: PathBuf,

        /// Output results in JSON format instead of plain lines
        #[arg(long)]
        json: bool,

        /// Do not ping external URLs
        #[arg(long)]
        skip_external: bool,

        /// Seconds to wait for each external URL
        #[arg(long, default_value_t = 2)]
        timeout: u64,

        /// How many external URLs to ping at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },

    /// Print the files linkup found, as a tree
    ///
    /// Example: linkup tree ./public
    Tree {
        /// Directory to treat as the root of the website
        root: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::parse_from(["linkup", "check", "public"]);
        match cli.command {
            Commands::Check {
                root,
                json,
                skip_external,
                timeout,
                concurrency,
            } => {
                assert_eq!(root, PathBuf::from("public"));
                assert!(!json);
                assert!(!skip_external);
                assert_eq!(timeout, 2);
                assert_eq!(concurrency, DEFAULT_CONCURRENCY);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["linkup", "tree", "site", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tree { .. }));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["linkup", "-v", "-q", "tree", "site"]).is_err());
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
