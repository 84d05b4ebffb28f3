//! Extension packager CLI

use clap::Parser;
use colored::*;
use extpack::{build_package, BuildConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "extpack")]
#[command(about = "Package a browser-extension source tree into a signed archive", long_about = None)]
#[command(version)]
struct Cli {
    /// Signing key handed to the packager
    #[arg(long)]
    key: Option<PathBuf>,

    /// Staging directory name
    #[arg(long)]
    build_dir: Option<String>,

    /// Packager executable, bypassing the platform lookup
    #[arg(long)]
    packager: Option<PathBuf>,

    /// Do not wait for Enter before exiting on failure
    #[arg(long)]
    no_pause: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut config = BuildConfig::default();
    if let Some(key) = cli.key {
        config.private_key = key;
    }
    if let Some(build_dir) = cli.build_dir {
        config.build_dir = build_dir;
    }
    config.packager_override = cli.packager;

    println!("{}", "Extension Packager".bold().blue());
    println!("{}", "=".repeat(50).blue());
    println!();

    match build_package(&config, &PathBuf::from(".")) {
        Ok(summary) => {
            println!("{}", "✅ Package built successfully!".green().bold());
            println!();
            println!("📊 Summary:");
            println!("  - Files staged: {}", summary.files_staged);
            println!("  - Name: {}", summary.name);
            println!("  - Output: {}", summary.archive.display());
        }
        Err(e) => {
            eprintln!("{}", "❌ Packaging failed!".red().bold());
            eprintln!("{}", format!("Error: {e:?}").red());
            if !cli.no_pause {
                pause();
            }
            std::process::exit(1);
        }
    }
}

/// Keep the console window open when the run came from a double-click,
/// so the error output stays readable.
fn pause() {
    eprint!("Press Enter...");
    let _ = io::stderr().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
