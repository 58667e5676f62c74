use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "web-box")]
#[command(about = "Request/response helper toolbox")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sanitize a value with one of the sanitize modes
    Sanitize {
        #[arg(short, long, default_value = "safeString")]
        mode: String,
        /// Parsed as JSON when possible, otherwise taken as a string
        value: String,
    },

    /// Rewrite the query string of a URL
    Query {
        /// Defaults to the request URI from the configuration
        #[arg(long)]
        url: Option<String>,

        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        #[arg(long = "unset", value_name = "NAME")]
        unset: Vec<String>,
    },

    /// Print the Set-Cookie header for a cookie (omit the value to delete it)
    Cookie {
        name: String,
        value: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        lifetime: Option<i64>,

        #[arg(long)]
        domain: Option<String>,

        #[arg(long)]
        http_only: bool,
    },

    /// Median of a list of numbers
    Median {
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },

    /// Serialize arguments into a cache key
    CacheKey {
        /// Each argument is parsed as JSON when possible
        #[arg(required = true)]
        args: Vec<String>,
    },

    /// Render a <select> control
    Select {
        name: String,

        #[arg(long = "option", value_name = "VALUE=LABEL")]
        options: Vec<String>,

        #[arg(long)]
        current: Option<String>,

        #[arg(long)]
        default: Option<String>,

        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        class: Option<String>,
    },

    /// Index a JSON array of records by one of their fields
    Index {
        /// JSON file holding an array of objects
        file: String,

        #[arg(long)]
        key: String,

        /// Fail on records without a key value instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Sort a JSON array of records by one of their fields
    Sort {
        file: String,

        #[arg(long)]
        key: String,

        #[arg(long, default_value = "asc")]
        order: String,

        /// Keep only the last record per key value
        #[arg(long)]
        unique: bool,
    },
}
