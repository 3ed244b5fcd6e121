//! InMemoryDogService - catalog-backed dog service for testing and development.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use super::{DogService, GatewayError, BULK_LIMIT};
use crate::dog::{Dog, MatchResult, SearchResults};
use crate::search::SearchParams;

/// Page size the service uses when the request does not name one.
const DEFAULT_SIZE: usize = 25;

/// Dog service answering from a fixed catalog.
///
/// Search follows the remote service: breed, zip and age filters, `field:dir` sort over
/// `breed`, `name` or `age`, `size`/`from` paging and next/prev cursors. Clone-friendly
/// via Arc.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDogService {
    catalog: Arc<Vec<Dog>>,
}

#[derive(Debug, Clone, Copy)]
enum SortField {
    Breed,
    Name,
    Age,
}

impl InMemoryDogService {
    pub fn new(dogs: Vec<Dog>) -> Self {
        Self {
            catalog: Arc::new(dogs),
        }
    }

    fn bad_request(path: &str) -> GatewayError {
        GatewayError::Status {
            status: 400,
            path: path.to_string(),
        }
    }

    fn parse_sort(sort: Option<&str>) -> Option<(SortField, bool)> {
        let sort = sort.unwrap_or("breed:asc");
        let (field, dir) = sort.split_once(':')?;
        let field = match field {
            "breed" => SortField::Breed,
            "name" => SortField::Name,
            "age" => SortField::Age,
            _ => return None,
        };
        let descending = match dir {
            "asc" => false,
            "desc" => true,
            _ => return None,
        };
        Some((field, descending))
    }

    fn matches(dog: &Dog, params: &SearchParams) -> bool {
        if !params.breeds.is_empty() && !params.breeds.iter().any(|b| b == &dog.breed) {
            return false;
        }
        if !params.zip_codes.is_empty() && !params.zip_codes.iter().any(|z| z == &dog.zip_code) {
            return false;
        }
        if params.age_min.is_some_and(|min| dog.age < min) {
            return false;
        }
        if params.age_max.is_some_and(|max| dog.age > max) {
            return false;
        }
        true
    }

    fn compare(field: SortField, a: &Dog, b: &Dog) -> Ordering {
        let primary = match field {
            SortField::Breed => a.breed.cmp(&b.breed),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Age => a.age.cmp(&b.age),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    /// Query string pointing at the page starting at `from`.
    fn cursor(params: &SearchParams, from: usize) -> Option<String> {
        let mut moved = params.clone();
        moved.from = Some(from.to_string());
        let url = Url::parse_with_params("http://localhost/dogs/search", moved.to_query()).ok()?;
        Some(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
    }

    /// Run a search synchronously. Shared by the trait impl and the HTTP stub.
    pub fn search_now(&self, params: &SearchParams) -> Result<SearchResults, GatewayError> {
        let path = "/dogs/search";
        let (field, descending) =
            Self::parse_sort(params.sort.as_deref()).ok_or_else(|| Self::bad_request(path))?;
        let size = params.size.map(|s| s as usize).unwrap_or(DEFAULT_SIZE);
        let from = match params.from.as_deref() {
            Some(raw) => raw.parse::<usize>().map_err(|_| Self::bad_request(path))?,
            None => 0,
        };

        let mut hits: Vec<&Dog> = self
            .catalog
            .iter()
            .filter(|dog| Self::matches(dog, params))
            .collect();
        hits.sort_by(|a, b| {
            let ord = Self::compare(field, a, b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });

        let total = hits.len();
        let result_ids = hits
            .iter()
            .skip(from)
            .take(size)
            .map(|dog| dog.id.clone())
            .collect();
        let next = if from.saturating_add(size) < total {
            Self::cursor(params, from + size)
        } else {
            None
        };
        let prev = if from > 0 {
            Self::cursor(params, from.saturating_sub(size))
        } else {
            None
        };

        Ok(SearchResults {
            result_ids,
            total: total as u64,
            next,
            prev,
        })
    }

    /// Resolve ids synchronously. Unknown ids are skipped.
    pub fn dogs_now(&self, ids: &[String]) -> Result<Vec<Dog>, GatewayError> {
        if ids.len() > BULK_LIMIT {
            return Err(Self::bad_request("/dogs"));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.catalog.iter().find(|dog| &dog.id == id).cloned())
            .collect())
    }

    /// Pick one id out of `ids`. The pick depends only on the submitted ids.
    pub fn match_now(&self, ids: &[String]) -> Result<MatchResult, GatewayError> {
        if ids.is_empty() {
            return Err(Self::bad_request("/dogs/match"));
        }
        let seed: usize = ids
            .iter()
            .flat_map(|id| id.bytes())
            .map(usize::from)
            .sum();
        Ok(MatchResult {
            dog_id: ids[seed % ids.len()].clone(),
        })
    }

    /// Sorted, de-duplicated breed names.
    pub fn breeds_now(&self) -> Vec<String> {
        self.catalog
            .iter()
            .map(|dog| dog.breed.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl DogService for InMemoryDogService {
    async fn login(&self, name: &str, _email: &str) -> Result<(), GatewayError> {
        debug!(name, "in-memory login");
        Ok(())
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn breeds(&self) -> Result<Vec<String>, GatewayError> {
        Ok(self.breeds_now())
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResults, GatewayError> {
        self.search_now(params)
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, GatewayError> {
        self.dogs_now(ids)
    }

    async fn match_dog(&self, ids: &[String]) -> Result<MatchResult, GatewayError> {
        self.match_now(ids)
    }
}
