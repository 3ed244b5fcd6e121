//! SearchQuery - the browse screen's filter, sort and page selection.

use std::collections::BTreeSet;

use super::page::{self, PAGE_SIZE};
use super::{SearchParams, SortOrder};

/// Filter, sort order and current page of the browse screen.
///
/// Every filter or sort change puts the query back on page 1, so a page number chosen
/// against an old result set is never sent with a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    breeds: BTreeSet<String>,
    zip_codes: Vec<String>,
    age_min: Option<u32>,
    age_max: Option<u32>,
    sort: SortOrder,
    page: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchQuery {
    /// No filter, ascending by breed, page 1.
    pub fn new() -> Self {
        Self {
            breeds: BTreeSet::new(),
            zip_codes: Vec::new(),
            age_min: None,
            age_max: None,
            sort: SortOrder::Ascending,
            page: 1,
        }
    }

    pub fn breeds(&self) -> &BTreeSet<String> {
        &self.breeds
    }

    pub fn zip_codes(&self) -> &[String] {
        &self.zip_codes
    }

    pub fn age_range(&self) -> (Option<u32>, Option<u32>) {
        (self.age_min, self.age_max)
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Current 1-indexed page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Replace the breed filter. An empty set means no filter.
    pub fn set_breeds<I, B>(&mut self, breeds: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        self.breeds = breeds.into_iter().map(Into::into).collect();
        self.page = 1;
    }

    pub fn set_zip_codes<I, Z>(&mut self, zip_codes: I)
    where
        I: IntoIterator<Item = Z>,
        Z: Into<String>,
    {
        self.zip_codes = zip_codes.into_iter().map(Into::into).collect();
        self.page = 1;
    }

    pub fn set_age_range(&mut self, min: Option<u32>, max: Option<u32>) {
        self.age_min = min;
        self.age_max = max;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to `page`, clamped to the pages the last result reported.
    pub fn set_page(&mut self, page: u32, total_pages: u32) {
        self.page = page::clamp_page(page, total_pages);
    }

    /// Pull the page back inside `1..=max(1, total_pages)` after a result arrives.
    pub(crate) fn clamp_to(&mut self, total_pages: u32) {
        self.page = page::clamp_page(self.page, total_pages);
    }

    /// Offset of the first hit on the current page.
    pub fn offset(&self) -> u64 {
        page::offset(self.page)
    }

    /// Wire parameters for the current page.
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            breeds: self.breeds.iter().cloned().collect(),
            zip_codes: self.zip_codes.clone(),
            age_min: self.age_min,
            age_max: self.age_max,
            size: Some(PAGE_SIZE),
            from: Some(self.offset().to_string()),
            sort: Some(self.sort.sort_param()),
        }
    }
}
