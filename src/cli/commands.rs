use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "discussit")]
#[command(about = "Find Reddit, Hacker News and Slashdot discussions about a URL")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up discussions about a URL and print the report as JSON
    Lookup {
        /// URL to look up
        url: String,

        /// Source to query: reddit, hackernews (or hn), slashdot, all
        #[arg(short, long, default_value = "all")]
        source: String,

        /// API version, e.g. 0.3. Versions below 0.3 leave Slashdot out
        #[arg(long)]
        api_version: Option<String>,

        /// Keep the query string instead of stripping it before lookup
        #[arg(long)]
        keep_query: bool,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// List the sources enabled for an API version
    Sources {
        /// API version, e.g. 0.2 (defaults to the configured version)
        #[arg(long)]
        api_version: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_defaults() {
        let cli = Cli::try_parse_from(["discussit", "lookup", "https://example.com"]).unwrap();
        match cli.command {
            Commands::Lookup {
                url,
                source,
                api_version,
                keep_query,
                pretty,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(source, "all");
                assert!(api_version.is_none());
                assert!(!keep_query);
                assert!(!pretty);
            }
            Commands::Sources { .. } => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_lookup_requires_url() {
        assert!(Cli::try_parse_from(["discussit", "lookup"]).is_err());
    }
}
