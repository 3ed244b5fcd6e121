//! Dog records and the response shapes of the remote dog service.
//!
//! All types here mirror the service's JSON bodies field for field. Records are
//! never mutated locally; a changed dog is simply fetched again.

use serde::{Deserialize, Serialize};

/// An adoptable dog as returned by the bulk lookup.
///
/// `zip_code` stays a string: postal codes such as `"02134"` carry leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

/// One page of search hits. Only ids are returned; records come from a bulk lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Ordered ids; the order is the render order.
    pub result_ids: Vec<String>,
    /// Total number of dogs matching the query across all pages.
    pub total: u64,
    /// Opaque query string for the next page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// Opaque query string for the previous page, absent on the first page.
    #[serde(default)]
    pub prev: Option<String>,
}

/// The service's pick from a submitted candidate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "match")]
    pub dog_id: String,
}

/// Reorder bulk-lookup records into the order of `ids`.
///
/// Ids with no matching record are dropped.
pub fn order_by_ids(ids: &[String], mut dogs: Vec<Dog>) -> Vec<Dog> {
    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(pos) = dogs.iter().position(|dog| &dog.id == id) {
            ordered.push(dogs.swap_remove(pos));
        }
    }
    ordered
}
