//! smiload: load MIB modules and print or persist their OID directories.
//!
//! Usage:
//!   smiload [--path DIR]... [-v]... load <FILE>
//!   smiload [--path DIR]... [-v]... import <FILE>... --out <DIR>
//!   smiload show <CACHE>

use clap::{Parser, Subcommand};
use smiload::{cache, CacheError, Config, Environment, OidDirectory};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smiload", version, about = "Load SMI/MIB modules into OID directories")]
struct Cli {
    /// Extra directory searched for imported modules (repeatable).
    #[arg(long = "path", value_name = "DIR", global = true)]
    paths: Vec<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a MIB file and print its OID directory.
    Load {
        /// MIB source file.
        file: PathBuf,
    },
    /// Load MIB files and write one `.smid` directory file per module.
    Import {
        /// MIB source files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output directory.
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a previously imported `.smid` file.
    Show {
        /// Cache file.
        cache: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn environment(paths: Vec<PathBuf>) -> Result<Environment, smiload::Error> {
    let mut config = Config::from_env()?;
    for path in paths {
        config.push_path(path);
    }
    Environment::init(config)
}

fn run(cli: Cli) -> Result<(), CacheError> {
    match cli.command {
        Command::Load { file } => {
            let mut env = environment(cli.paths)?;
            let (name, directory) = env.load(&file)?;
            print_directory(&name, &directory);
        }
        Command::Import { files, out } => {
            let mut env = environment(cli.paths)?;
            std::fs::create_dir_all(&out)?;
            for file in &files {
                let written = cache::import_module(&mut env, file, &out)?;
                println!("{}\t{}", file.display(), written.display());
            }
        }
        Command::Show { cache: path } => {
            let imported = cache::load_cache(&path)?;
            print_directory(&imported.name, &imported.directory);
        }
    }
    Ok(())
}

fn print_directory(name: &str, directory: &OidDirectory) {
    println!("module: {name}");
    for (object, oid) in directory.sorted_by_oid() {
        println!("{object}\t{oid}");
    }
}
