use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::query::{SortKey, SortOptions, DEFAULT_API_ROOT};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Root URL of the launch API.
    #[arg(long, default_value = DEFAULT_API_ROOT)]
    api_root: String,

    /// Sort key as `field[:ascending|descending]`; may be repeated.
    #[arg(short, long = "sort", value_name = "FIELD[:DIRECTION]", default_value = "flight_number:ascending")]
    sort: Vec<SortKey>,

    /// Request timeout in seconds.
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Write logs to this file (the terminal is taken by the UI).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_root: String,
    pub sort_options: SortOptions,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn parse() -> Self {
        Self::from_args(ClapArgs::parse())
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Self::from_args)
    }

    fn from_args(args: ClapArgs) -> Self {
        Self {
            api_root: args.api_root,
            sort_options: args.sort.into_iter().collect(),
            timeout: Duration::from_secs(args.timeout),
            log_file: args.log_file,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::query::SortDirection;

    #[test]
    fn test_default_values() {
        let config = Config::try_parse_from(["program"]).unwrap();
        assert_eq!(config.api_root, DEFAULT_API_ROOT);
        assert_eq!(
            config.sort_options,
            SortOptions::new().by("flight_number", SortDirection::Ascending)
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_repeated_sort_flags() {
        let config = Config::try_parse_from([
            "program",
            "--sort",
            "date_utc:descending",
            "-s",
            "flight_number",
        ])
        .unwrap();
        assert_eq!(
            config.sort_options,
            SortOptions::new()
                .by("date_utc", SortDirection::Descending)
                .by("flight_number", SortDirection::Ascending)
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "program",
            "--api-root",
            "http://localhost:3000/v5",
            "-t",
            "5",
            "--log-file",
            "/tmp/falcon.log",
        ])
        .unwrap();
        assert_eq!(config.api_root, "http://localhost:3000/v5");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/falcon.log")));
    }

    #[test]
    fn test_rejects_bad_direction() {
        assert!(Config::try_parse_from(["program", "--sort", "name:up"]).is_err());
    }
}
