//! # propconf demo application
//!
//! A sample CLI tool that shows how to wire [propconf](https://docs.rs/propconf)
//! into an application. It exists purely to demonstrate and manually verify
//! the loader.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example propconf_demo -- --path demo-conf show
//! cargo run --example propconf_demo -- --path defaults --path overrides config list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                     |
//! |-------------------------|------------------------------------------------------------------------|
//! | Canonical locations     | `cargo run --example propconf_demo -- show` (no `--path`)              |
//! | Relocated operator dir  | `RHN_CONFIG_DIR=./conf cargo run --example propconf_demo -- show`      |
//! | Layered search paths    | `--path low --path high`: files under `high` win                       |
//! | Prefix fallback         | `config get port` finds `web.port` or `server.port`                    |
//! | Namespace listing       | `config list --namespace taskomatic --rename-to tasko`                 |
//! | Merge order             | `config files`                                                         |
//! | JSON output             | `config --json files`                                                  |
//! | In-memory override      | `--set server.port=9999 show`                                          |
//! | Logging                 | `RUST_LOG=propconf=debug` or `--verbose`                               |

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use propconf::{ConfigArgs, ConfigStore, PropconfError};

/// propconf demo: inspect layered property-file configuration.
#[derive(Parser, Debug)]
#[command(name = "propconf-demo")]
struct Cli {
    /// Log loader activity at debug level.
    #[arg(long, global = true)]
    verbose: bool,

    /// Search path (file or directory). Repeat for more; later paths win.
    /// Without any, the canonical locations are used.
    #[arg(long = "path", global = true)]
    paths: Vec<PathBuf>,

    /// In-memory override as KEY=VALUE. Repeatable.
    #[arg(long = "set", global = true, value_parser = parse_assignment)]
    sets: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a few typed settings a server would read at startup.
    Show,
    /// Inspect the configuration (get, list, files).
    Config(ConfigArgs),
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn open_store(paths: &[PathBuf]) -> Result<Arc<ConfigStore>, PropconfError> {
    if paths.is_empty() {
        propconf::global()
    } else {
        ConfigStore::from_paths(paths.iter().cloned()).map(Arc::new)
    }
}

fn show(store: &ConfigStore) -> Result<(), PropconfError> {
    println!("hostname       = {}", store.get_string_or("hostname", "localhost"));
    println!("server.port    = {}", store.get_int_or("server.port", 80)?);
    println!("debug          = {}", store.get_boolean("debug"));
    println!("timeout (secs) = {}", store.get_double_or("web.timeout", 30.0)?);
    println!("allowed hosts  = {:?}", store.get_list("web.allowed_hosts"));
    Ok(())
}

fn run(cli: Cli) -> Result<(), PropconfError> {
    let store = open_store(&cli.paths)?;
    for (key, value) in &cli.sets {
        store.set_string(key, value);
    }

    match cli.command {
        Commands::Show => show(&store)?,
        Commands::Config(args) => {
            let format = args.output_format();
            store.handle_and_print(&args.into_action(), format);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
