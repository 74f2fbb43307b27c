//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the hoopla binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Hoopla API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "hoopla", about = "Hoopla API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log HTTP traffic to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: Command,
}

/// OAuth2 client credentials and API location.
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    /// OAuth2 client id.
    #[arg(long, global = true, env = "HOOPLA_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret.
    #[arg(long, global = true, env = "HOOPLA_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// API root URL.
    #[arg(
        long,
        global = true,
        env = "HOOPLA_API_URL",
        default_value = "https://api.hoopla.net/"
    )]
    pub api_url: String,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a top-level collection, optionally filtered.
    List {
        /// The collection to list.
        collection: Collection,

        /// Filter users by email address.
        #[arg(long)]
        email: Option<String>,

        /// Filter teams, metrics or newsflashes by name.
        #[arg(long)]
        name: Option<String>,
    },

    /// List the values recorded for a metric.
    Values {
        /// Metric name.
        metric: String,

        /// Only show values for this owner.
        #[arg(long)]
        owner: Option<String>,

        /// How to interpret the owner.
        #[arg(long, value_enum)]
        owner_kind: Option<OwnerKind>,
    },

    /// Set an owner's value for a metric, creating it if needed.
    SetValue {
        /// Metric name.
        metric: String,

        /// User email, team name, or external identifier.
        owner: String,

        /// The new value.
        value: f64,

        /// How to interpret the owner.
        #[arg(long, value_enum)]
        owner_kind: Option<OwnerKind>,
    },

    /// Delete an owner's value for a metric.
    DeleteValue {
        /// Metric name.
        metric: String,

        /// User email, team name, or external identifier.
        owner: String,

        /// How to interpret the owner.
        #[arg(long, value_enum)]
        owner_kind: Option<OwnerKind>,
    },

    /// Post an event to a newsflash.
    Newsflash {
        /// Newsflash name.
        newsflash: String,

        /// Event title.
        #[arg(long)]
        title: String,

        /// Event message.
        #[arg(long)]
        message: Option<String>,

        /// Email of a user to address the event to (repeatable).
        #[arg(long = "recipient")]
        recipients: Vec<String>,

        /// User email, team name, or external identifier the event is about.
        #[arg(long)]
        owner: Option<String>,

        /// How to interpret the owner.
        #[arg(long, value_enum)]
        owner_kind: Option<OwnerKind>,
    },
}

/// Top-level collections that can be listed.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Collection {
    /// Users.
    #[value(alias = "user")]
    Users,
    /// Teams.
    #[value(alias = "team")]
    Teams,
    /// Metrics.
    #[value(alias = "metric")]
    Metrics,
    /// Newsflashes.
    #[value(alias = "newsflash")]
    Newsflashes,
}

/// How an owner argument is interpreted.
///
/// Without an explicit kind the owner is looked up as a user email, then a
/// team name, and finally treated as a generic identifier.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnerKind {
    /// A user email address.
    User,
    /// A team name.
    Team,
    /// An external identifier.
    Generic,
}
