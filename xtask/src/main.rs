use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xshell::{cmd, Shell};

#[derive(Parser)]
#[command(name = "cargo-xtask", version, about = "Launcher automation tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format Rust sources
    Fmt,
    /// Run formatting, lint and test checks
    Check,
    /// Build the desktop bundle
    Package,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let shell = Shell::new()?;
    shell.change_dir(project_root()?);

    match cli.command {
        Command::Fmt => run_fmt(&shell),
        Command::Check => run_check(&shell),
        Command::Package => run_package(&shell),
    }
}

fn run_fmt(shell: &Shell) -> Result<()> {
    cmd!(shell, "cargo fmt --all")
        .run()
        .context("failed to run cargo fmt")?;
    Ok(())
}

fn run_check(shell: &Shell) -> Result<()> {
    cmd!(shell, "cargo fmt --all -- --check")
        .run()
        .context("cargo fmt --check failed")?;
    cmd!(
        shell,
        "cargo clippy --workspace --all-targets --all-features -- -D warnings"
    )
    .run()
    .context("cargo clippy failed")?;
    cmd!(shell, "cargo test --workspace")
        .run()
        .context("cargo test failed")?;
    Ok(())
}

fn run_package(shell: &Shell) -> Result<()> {
    let _dir = shell.push_dir("src-tauri");
    cmd!(shell, "cargo tauri build")
        .run()
        .context("tauri build failed (is tauri-cli installed?)")?;
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(PathBuf::from)
        .context("xtask is expected to live one level below the workspace root")
}
