// src/main.rs
// =============================================================================
// This is the entry point of the linkup CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Install the tracing subscriber (stderr, filtered by LINKUP_LOG)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = broken links, 2 = error)
// =============================================================================

mod cli;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use linkup::site::EntityKind;
use linkup::{HttpPinger, LinkError, ValidateOptions, Website};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("Error: {e:#}");
        std::process::exit(2);
    }

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("LINKUP_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = could not load or check the site
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            root,
            json,
            skip_external,
            timeout,
            concurrency,
        } => {
            let options = ValidateOptions {
                check_external: !skip_external,
                concurrency,
            };
            handle_check(&root, json, Duration::from_secs(timeout), &options).await
        }
        Commands::Tree { root } => {
            let site = linkup::scan::load_website(&root)?;
            print_tree(&site);
            Ok(0)
        }
    }
}

async fn handle_check(
    root: &Path,
    json: bool,
    timeout: Duration,
    options: &ValidateOptions,
) -> Result<i32> {
    let site = linkup::scan::load_website(root)?;
    let pinger = HttpPinger::new(timeout).context("failed to create HTTP client")?;

    let mut errors = site.validate(&pinger, options).await;
    // Probes finish in any order; keep the report stable.
    errors.sort_by_cached_key(ToString::to_string);

    info!(
        pages = site.pages().count(),
        errors = errors.len(),
        "validation finished"
    );
    print_results(&errors, json)?;

    Ok(if errors.is_empty() { 0 } else { 1 })
}

fn print_results(errors: &[LinkError], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }

    for error in errors {
        println!("{error}");
    }

    let external = errors.iter().filter(|e| e.is_external()).count();
    println!();
    println!("Summary:");
    println!("   Internal: {}", errors.len() - external);
    println!("   External: {external}");
    println!("   Total: {}", errors.len());
    Ok(())
}

fn print_tree(site: &Website) {
    print!("{}", render_tree(site));
}

// One entity per line, indented four spaces per level: directories get a
// leading `/`, and every entity is followed by its full path.
fn render_tree(site: &Website) -> String {
    let mut out = String::new();
    for (depth, id) in site.walk() {
        let entity = site.entity(id);
        let marker = match entity.kind() {
            EntityKind::Directory { .. } if depth > 0 => "/",
            _ => "",
        };
        out.push_str(&format!(
            "{:indent$}{marker}{} {}\n",
            "",
            entity.name(),
            entity.full_path(),
            indent = depth * 4
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_tree_shows_full_paths() {
        let mut site = Website::new();
        site.register_html("index.html", "").unwrap();
        site.register_file("blog/img/cover.png").unwrap();

        let expected = [
            "/ ",
            "    /blog blog",
            "        /img blog/img",
            "            cover.png blog/img/cover.png",
            "    index.html index.html",
            "",
        ]
        .join("\n");
        assert_eq!(render_tree(&site), expected);
    }
}
