//! Query model: what to fetch, and how to turn that into a wire request.
//!
//! A [`LaunchesQuery`] is a category filter plus an optional page cursor.
//! [`build_request`] combines it with the [`SortOptions`] configured on the
//! data source and produces a transport-agnostic [`RequestDescriptor`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Default API root for the public launch API.
pub const DEFAULT_API_ROOT: &str = "https://api.spacexdata.com/v5";

/// Endpoint that accepts launch queries.
const LAUNCHES_QUERY_PATH: &str = "launches/query";

/// Launch vehicle categories the client can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RocketType {
    Falcon9,
}

impl RocketType {
    /// Opaque identifier the API uses for this vehicle.
    pub fn id(&self) -> &'static str {
        match self {
            RocketType::Falcon9 => "5e9d0d95eda69973a809d1ec",
        }
    }

    /// Human-readable vehicle name.
    pub fn name(&self) -> &'static str {
        match self {
            RocketType::Falcon9 => "Falcon 9",
        }
    }
}

/// An immutable description of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchesQuery {
    rocket: RocketType,
    page: Option<u32>,
}

impl LaunchesQuery {
    /// Query for `rocket` launches; `page == None` means the first page.
    pub fn rocket(rocket: RocketType, page: Option<u32>) -> Self {
        Self { rocket, page }
    }

    /// Same category, different cursor.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            rocket: self.rocket,
            page: Some(page),
        }
    }

    pub fn category(&self) -> RocketType {
        self.rocket
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    pub fn method(&self) -> Method {
        Method::POST
    }

    pub fn path(&self) -> &'static str {
        LAUNCHES_QUERY_PATH
    }
}

/// Sort direction as the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Field name to direction.  Ordered so the encoded body is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortOptions(BTreeMap<String, SortDirection>);

impl SortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.0.insert(field.into(), direction);
        self
    }
}

/// One `field[:direction]` entry as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, dir)) => (field, dir.parse()?),
            None => (s, SortDirection::Ascending),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err("sort field must not be empty".into());
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl FromIterator<SortKey> for SortOptions {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SortOptions::new(), |opts, key| opts.by(key.field, key.direction))
    }
}

/// Everything a transport needs to perform one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: &'static str,
    pub body: Value,
}

impl RequestDescriptor {
    pub const CONTENT_TYPE: &'static str = "application/json";

    /// Join `api_root` and the request path with exactly one `/`.
    pub fn url(&self, api_root: &str) -> String {
        format!(
            "{}/{}",
            api_root.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Build the wire request for `query`.
///
/// The `page` option is only present for non-first pages; `sort` is always
/// present, even when empty.
pub fn build_request(query: &LaunchesQuery, sort: &SortOptions) -> RequestDescriptor {
    let mut options = Map::new();
    if let Some(page) = query.page() {
        options.insert("page".into(), json!(page));
    }
    options.insert("sort".into(), json!(sort));

    let body = json!({
        "query": {
            "rocket": query.category().id(),
            "upcoming": false,
        },
        "options": options,
    });

    RequestDescriptor {
        method: query.method(),
        path: query.path(),
        body,
    }
}
