use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hass_harness_gen::config::GeneratorConfig;
use hass_harness_gen::generate::{self, Outcome};

#[derive(Parser)]
#[command(name = "hass-harness-gen")]
#[command(version, about = "Repackages Home Assistant core's test helpers as a standalone harness")]
struct Cli {
    /// JSON configuration file (defaults apply for missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the local upstream clone is kept in
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Directory the package, manifests, and marker are written into
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Pin the checkout to this release tag instead of the newest one
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the newest upstream release tag and exit
    Latest,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(work_dir) = cli.work_dir {
        config.clone_dir = work_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    match cli.command {
        Some(Command::Latest) => {
            println!("{}", generate::resolve_latest(&config)?);
        }
        None => match generate::run(&config, cli.tag.as_deref())? {
            Outcome::UpToDate(_) => println!("Already up to date"),
            Outcome::Generated(version) => println!("{version}"),
        },
    }

    Ok(())
}
