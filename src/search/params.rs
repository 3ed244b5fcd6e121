//! Wire form of a `/dogs/search` request.

use std::fmt;

/// Query parameters accepted by the search endpoint.
///
/// Every field is optional on the wire; empty lists and `None` are simply not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub breeds: Vec<String>,
    pub zip_codes: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub size: Option<u32>,
    pub from: Option<String>,
    pub sort: Option<String>,
}

/// A query pair the service could not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamError {
    pub key: String,
    pub value: String,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid search parameter {}={}", self.key, self.value)
    }
}

impl std::error::Error for ParamError {}

impl SearchParams {
    /// Encode as query pairs. List parameters use the bracketed `key[]` form.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for breed in &self.breeds {
            pairs.push(("breeds[]", breed.clone()));
        }
        for zip in &self.zip_codes {
            pairs.push(("zipCodes[]", zip.clone()));
        }
        if let Some(age) = self.age_min {
            pairs.push(("ageMin", age.to_string()));
        }
        if let Some(age) = self.age_max {
            pairs.push(("ageMax", age.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(from) = &self.from {
            pairs.push(("from", from.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }

    /// Decode query pairs. Accepts both `breeds[]` and bare `breeds` keys; unknown keys
    /// are ignored.
    pub fn from_query<I>(pairs: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "breeds[]" | "breeds" => params.breeds.push(value),
                "zipCodes[]" | "zipCodes" => params.zip_codes.push(value),
                "ageMin" => params.age_min = Some(parse_number(&key, &value)?),
                "ageMax" => params.age_max = Some(parse_number(&key, &value)?),
                "size" => params.size = Some(parse_number(&key, &value)?),
                "from" => params.from = Some(value),
                "sort" => params.sort = Some(value),
                _ => {}
            }
        }
        Ok(params)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, ParamError> {
    value.parse().map_err(|_| ParamError {
        key: key.to_string(),
        value: value.to_string(),
    })
}
