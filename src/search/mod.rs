//! Search - query state, pagination and the two-step page fetch.
//!
//! A page is fetched in two dependent calls: the search endpoint returns ids and a
//! total, then the bulk lookup turns those ids into records.
//!
//! ## Example
//!
//! ```ignore
//! use dogmatch::search::{self, SearchQuery, SortOrder};
//!
//! let mut query = SearchQuery::new();
//! query.set_breeds(["Boxer"]);
//! query.set_sort(SortOrder::Descending);
//!
//! let page = search::fetch_page(&gateway, &query).await?;
//! println!("{} dogs on {} pages", page.total, page.total_pages());
//! ```

pub mod page;
mod params;
mod query;

use std::fmt;
use std::str::FromStr;

use crate::dog::{self, Dog};
use crate::gateway::{DogService, GatewayError};

pub use page::PAGE_SIZE;
pub use params::{ParamError, SearchParams};
pub use query::SearchQuery;

/// Sort direction over breed name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// The `sort` query value, e.g. `breed:asc`.
    pub fn sort_param(&self) -> String {
        format!("breed:{}", self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

/// One resolved page of dogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    /// Records in the order the search returned their ids.
    pub dogs: Vec<Dog>,
    /// Total hits across all pages.
    pub total: u64,
}

impl ResultPage {
    pub fn total_pages(&self) -> u32 {
        page::total_pages(self.total)
    }
}

/// Fetch the page `query` points at and resolve its ids into records.
///
/// The bulk lookup only runs once the id page is in hand; either failure aborts.
pub async fn fetch_page<A: DogService>(
    api: &A,
    query: &SearchQuery,
) -> Result<ResultPage, GatewayError> {
    let results = api.search(&query.to_params()).await?;
    let dogs = if results.result_ids.is_empty() {
        Vec::new()
    } else {
        api.dogs(&results.result_ids).await?
    };
    Ok(ResultPage {
        dogs: dog::order_by_ids(&results.result_ids, dogs),
        total: results.total,
    })
}
