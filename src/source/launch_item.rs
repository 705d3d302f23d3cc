//! The launch record decoded from each entry of a response page.
//!
//! Only `id`, `name` and `date_utc` are mandatory.  `flight_number` and
//! `success` fall back to `0` and unknown when missing, null or mistyped.
//! The image links live in nested objects that the API leaves out or nulls
//! freely, so each nested level is decoded on its own and replaced with its
//! default on any error.
//!
//! ## Dates
//!
//! The API's timestamps look like `2020-06-13T09:21:00.000Z`.  They are
//! accepted with exactly three fractional digits followed by `Z` or a numeric
//! offset.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Url;
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const DATE_FORMAT_WITH_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// A single launch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawLaunch")]
pub struct LaunchItem {
    /// Stable identifier.
    pub id: String,

    /// Sequential flight number; `0` if the record has none.
    pub flight_number: u32,

    /// Mission name.
    pub name: String,

    /// Launch time.
    pub date: DateTime<Utc>,

    /// `None` while the outcome is unknown, which is not the same as `false`.
    pub success: Option<bool>,

    /// Photo URLs, primary first.
    pub image_urls: Vec<Url>,

    /// Mission patch.
    pub patch_image_url: Option<Url>,
}

impl LaunchItem {
    /// First image, if any.
    pub fn primary_image(&self) -> Option<&Url> {
        self.image_urls.first()
    }
}

#[derive(Deserialize)]
struct RawLaunch {
    id: String,
    #[serde(default, deserialize_with = "lenient")]
    flight_number: u32,
    name: String,
    #[serde(rename = "date_utc", deserialize_with = "deserialize_launch_date")]
    date: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient")]
    success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    links: RawLinks,
}

#[derive(Default, Deserialize)]
struct RawLinks {
    #[serde(default, deserialize_with = "lenient")]
    patch: RawPatch,
    #[serde(default, deserialize_with = "lenient")]
    flickr: RawFlickr,
}

#[derive(Default, Deserialize)]
struct RawPatch {
    #[serde(default, deserialize_with = "lenient")]
    large: Option<String>,
}

#[derive(Default, Deserialize)]
struct RawFlickr {
    #[serde(default, deserialize_with = "lenient")]
    original: Vec<String>,
}

impl From<RawLaunch> for LaunchItem {
    fn from(raw: RawLaunch) -> Self {
        // All-or-nothing, like the list itself.
        let image_urls = raw
            .links
            .flickr
            .original
            .iter()
            .map(|s| Url::parse(s))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_default();

        let patch_image_url = raw
            .links
            .patch
            .large
            .as_deref()
            .and_then(|s| Url::parse(s).ok());

        LaunchItem {
            id: raw.id,
            flight_number: raw.flight_number,
            name: raw.name,
            date: raw.date,
            success: raw.success,
            image_urls,
            patch_image_url,
        }
    }
}

/// Decode `T` from whatever JSON sits at this field, or fall back to
/// `T::default()` if it has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn deserialize_launch_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_launch_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid launch date '{raw}'")))
}

/// Parse a timestamp in the API's fixed format.
pub fn parse_launch_date(s: &str) -> Option<DateTime<Utc>> {
    if let Some(naive) = s.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(naive, DATE_FORMAT)
            .ok()
            .map(|dt| dt.and_utc());
    }
    DateTime::parse_from_str(s, DATE_FORMAT_WITH_OFFSET)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
