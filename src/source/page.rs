//! Paged response envelope shared by the API's query endpoints.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// One page of results.
///
/// The server only sends `nextPage` when `hasNextPage` is true; that is not
/// re-checked here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "Item: DeserializeOwned"))]
pub struct ResponsePage<Item> {
    #[serde(rename = "docs")]
    pub items: Vec<Item>,

    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,

    #[serde(rename = "nextPage", default)]
    pub next_page: Option<u32>,
}

impl<Item> ResponsePage<Item> {
    /// Cursor for the following page, or `None` once the series is done.
    pub fn next_cursor(&self) -> Option<u32> {
        if self.has_next_page {
            self.next_page
        } else {
            None
        }
    }
}

/// Decode raw response bytes into a page.  Any malformed item fails the
/// whole page.
pub fn decode_page<Item: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<ResponsePage<Item>> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LaunchItem;

    const PAGE: &str = r#"{
        "docs": [
            { "id": "a", "flight_number": 1, "name": "One",
              "date_utc": "2006-03-24T22:30:00.000Z", "success": false,
              "links": { "patch": { "large": null }, "flickr": { "original": [] } } },
            { "id": "b", "flight_number": 2, "name": "Two",
              "date_utc": "2007-03-21T01:10:00.000Z", "success": null,
              "links": {} }
        ],
        "totalDocs": 150,
        "limit": 2,
        "page": 1,
        "hasNextPage": true,
        "nextPage": 2
    }"#;

    #[test]
    fn decodes_page_of_launches() {
        let page: ResponsePage<LaunchItem> = decode_page(PAGE.as_bytes()).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "a");
        assert_eq!(page.items[1].id, "b");
        assert!(page.has_next_page);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.next_cursor(), Some(2));
    }

    #[test]
    fn next_page_is_optional() {
        let page: ResponsePage<LaunchItem> =
            decode_page(br#"{ "docs": [], "hasNextPage": false }"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page, None);

        let page: ResponsePage<LaunchItem> =
            decode_page(br#"{ "docs": [], "hasNextPage": false, "nextPage": null }"#).unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn has_next_page_false_wins_over_stray_cursor() {
        let page: ResponsePage<LaunchItem> =
            decode_page(br#"{ "docs": [], "hasNextPage": false, "nextPage": 9 }"#).unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn envelope_fields_are_mandatory() {
        assert!(decode_page::<LaunchItem>(br#"{ "hasNextPage": false }"#).is_err());
        assert!(decode_page::<LaunchItem>(br#"{ "docs": [] }"#).is_err());
        assert!(decode_page::<LaunchItem>(br#"{ "docs": {}, "hasNextPage": false }"#).is_err());
        assert!(decode_page::<LaunchItem>(br#"{ "docs": [], "hasNextPage": "yes" }"#).is_err());
        assert!(decode_page::<LaunchItem>(b"<html>502</html>").is_err());
    }

    #[test]
    fn one_bad_item_fails_the_page() {
        let body = br#"{
            "docs": [
                { "id": "a", "name": "One", "date_utc": "2006-03-24T22:30:00.000Z" },
                { "id": "b", "date_utc": "2007-03-21T01:10:00.000Z" }
            ],
            "hasNextPage": false
        }"#;
        assert!(decode_page::<LaunchItem>(body).is_err());
    }
}
