use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for ringrun")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full gate: fmt, clippy, tests, doc
    Ci,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy with warnings denied
    Clippy,
    /// Run all workspace tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => {
            cargo(&["fmt", "--all", "--", "--check"])?;
            cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
            cargo(&["test", "--workspace"])?;
            cargo(&["doc", "--workspace", "--no-deps"])?;
        }
        Commands::Fmt => cargo(&["fmt", "--all", "--", "--check"])?,
        Commands::Clippy => cargo(&[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ])?,
        Commands::Test => cargo(&["test", "--workspace"])?,
        Commands::Doc => cargo(&["doc", "--workspace", "--no-deps"])?,
        Commands::Build => cargo(&["build", "--workspace"])?,
    }

    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}
