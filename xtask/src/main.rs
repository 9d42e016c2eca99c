use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "queue_forward_lambda";
const LAMBDA_BIN: &str = "forward_lambda";

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the queue forwarding workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy and the workspace tests
    Ci,
    /// Build forward_lambda in release mode and zip it as a Lambda `bootstrap`
    Package {
        /// Target triple passed to `cargo build --target`
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Directory receiving forward_lambda.zip
        #[arg(long, env = "FORWARD_DIST_DIR", default_value = "dist")]
        dist_dir: PathBuf,
    },
}

fn cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .unwrap_or_else(|error| fail(&format!("could not start cargo: {error}")));
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    exit(1);
}

fn ci() {
    cargo(&["fmt", "--all", "--", "--check"]);
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    cargo(&["test", "--workspace"]);
    eprintln!("\nCI checks passed.");
}

fn package(target: &str, dist_dir: &Path) {
    cargo(&[
        "build",
        "--release",
        "-p",
        LAMBDA_PACKAGE,
        "--bin",
        LAMBDA_BIN,
        "--target",
        target,
    ]);

    let binary_path = Path::new("target")
        .join(target)
        .join("release")
        .join(LAMBDA_BIN);
    let binary = fs::read(&binary_path).unwrap_or_else(|error| {
        fail(&format!("cannot read {}: {error}", binary_path.display()))
    });

    fs::create_dir_all(dist_dir)
        .unwrap_or_else(|error| fail(&format!("cannot create {}: {error}", dist_dir.display())));
    let zip_path = dist_dir.join(format!("{LAMBDA_BIN}.zip"));
    if let Err(error) = write_bootstrap_zip(&binary, &zip_path) {
        fail(&format!("cannot write {}: {error}", zip_path.display()));
    }

    eprintln!("\nPackaged {}", zip_path.display());
}

// The provided.al2023 runtime executes an entry named `bootstrap`.
fn write_bootstrap_zip(binary: &[u8], zip_path: &Path) -> zip::result::ZipResult<()> {
    let mut zip = ZipWriter::new(File::create(zip_path)?);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(binary)?;
    zip.finish()?;
    Ok(())
}

fn main() {
    match Cli::parse().command {
        Commands::Ci => ci(),
        Commands::Package { target, dist_dir } => package(&target, &dist_dir),
    }
}
