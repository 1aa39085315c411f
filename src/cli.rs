//! Command-line argument parsing and command definitions.
//!
//! Uses clap with derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// request-intl - check locale resolution and translations
#[derive(Parser, Debug)]
#[command(name = "request-intl")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long, global = true, env = "REQUEST_INTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Locale signals of a simulated request.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct SignalArgs {
    /// Query parameter `lang`
    #[arg(long)]
    pub lang: Option<String>,

    /// Query parameter `language`
    #[arg(long)]
    pub language: Option<String>,

    /// Cookie as NAME=VALUE (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE")]
    pub cookies: Vec<String>,

    /// Header as NAME=VALUE (repeatable)
    #[arg(long = "header", value_name = "NAME=VALUE")]
    pub headers: Vec<String>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the locale a request with these signals resolves to
    Resolve {
        /// Request signals.
        #[command(flatten)]
        signals: SignalArgs,
    },

    /// Translate a message
    Translate {
        /// Message identifier
        id: String,

        /// Locale to translate into (defaults to the resolved request locale)
        #[arg(long)]
        locale: Option<String>,

        /// Module the message belongs to
        #[arg(short, long)]
        module: Option<String>,

        /// Interpolation value as NAME=VALUE (repeatable)
        #[arg(long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,

        /// Request signals used when --locale is not given.
        #[command(flatten)]
        signals: SignalArgs,
    },

    /// List the locales that have messages configured
    Locales,
}
