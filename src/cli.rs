//! Clap adapter for propconf.
//!
//! This module is the **optional integration layer** between the
//! framework-agnostic store and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`ConfigArgs`] and [`ConfigSubcommand`] can be embedded directly into a
//! clap `#[derive(Parser)]` struct to get read-only
//! `config get|list|files` subcommands with no boilerplate.
//!
//! The bridge to the core is [`ConfigArgs::into_action()`], which converts
//! clap-parsed arguments into a [`ConfigAction`](crate::ConfigAction), and
//! [`ConfigArgs::output_format()`]. From there, everything flows through
//! [`ConfigStore::handle()`](crate::ConfigStore::handle).

use clap::{Args, Subcommand};

use crate::types::{ConfigAction, OutputFormat};

/// Clap-derived args for the `config` subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show stored key-value pairs.
    List {
        /// Only keys starting with this namespace.
        #[arg(long)]
        namespace: Option<String>,
        /// Rewrite the namespace prefix of listed keys.
        #[arg(long, requires = "namespace")]
        rename_to: Option<String>,
    },
    /// Show the resolved value for a key, with namespace fallback.
    Get {
        /// Dotted key (e.g. "server.port", or "port" to try the default prefixes).
        key: String,
    },
    /// Show the discovered config files in merge order.
    Files,
}

impl ConfigArgs {
    /// The requested output format.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) maps to listing everything.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None => ConfigAction::List {
                namespace: None,
                rename_to: None,
            },
            Some(ConfigSubcommand::List {
                namespace,
                rename_to,
            }) => ConfigAction::List {
                namespace,
                rename_to,
            },
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Files) => ConfigAction::Files,
        }
    }
}
