//! Test doubles: a sample kennel and service wrappers that record, delay or fail.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dogmatch::gateway::{DogService, GatewayError, InMemoryDogService};
use dogmatch::{Dog, MatchResult, SearchParams, SearchResults};

pub fn dog(id: &str, name: &str, breed: &str, age: u32) -> Dog {
    Dog {
        id: id.to_string(),
        img: format!("https://img.example/{id}.jpg"),
        name: name.to_string(),
        age,
        zip_code: format!("0{:04}", age * 100),
        breed: breed.to_string(),
    }
}

/// 45 dogs: 25 Boxers, 10 Pugs, 10 Akitas.
pub fn kennel() -> InMemoryDogService {
    let mut dogs = Vec::new();
    for i in 0..25 {
        dogs.push(dog(&format!("boxer-{i:02}"), &format!("Boxer {i}"), "Boxer", i % 12));
    }
    for i in 0..10 {
        dogs.push(dog(&format!("pug-{i:02}"), &format!("Pug {i}"), "Pug", i % 8));
    }
    for i in 0..10 {
        dogs.push(dog(&format!("akita-{i:02}"), &format!("Akita {i}"), "Akita", i % 10));
    }
    InMemoryDogService::new(dogs)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Breeds,
    Search(SearchParams),
    Dogs(Vec<String>),
    Match(Vec<String>),
}

/// Wraps a service and records every call in order.
#[derive(Clone)]
pub struct RecordingService<A> {
    inner: A,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl<A> RecordingService<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<SearchParams> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search(params) => Some(params),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl<A: DogService> DogService for RecordingService<A> {
    async fn login(&self, name: &str, email: &str) -> Result<(), GatewayError> {
        self.inner.login(name, email).await
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.inner.logout().await
    }

    async fn breeds(&self) -> Result<Vec<String>, GatewayError> {
        self.record(Call::Breeds);
        self.inner.breeds().await
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResults, GatewayError> {
        self.record(Call::Search(params.clone()));
        self.inner.search(params).await
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, GatewayError> {
        self.record(Call::Dogs(ids.to_vec()));
        self.inner.dogs(ids).await
    }

    async fn match_dog(&self, ids: &[String]) -> Result<MatchResult, GatewayError> {
        self.record(Call::Match(ids.to_vec()));
        self.inner.match_dog(ids).await
    }
}

/// Delays searches filtered on given breeds.
#[derive(Clone)]
pub struct SlowBreedService<A> {
    inner: A,
    delays: Arc<HashMap<String, Duration>>,
}

impl<A> SlowBreedService<A> {
    pub fn new(inner: A, delays: &[(&str, Duration)]) -> Self {
        Self {
            inner,
            delays: Arc::new(
                delays
                    .iter()
                    .map(|(breed, delay)| (breed.to_string(), *delay))
                    .collect(),
            ),
        }
    }
}

impl<A: DogService> DogService for SlowBreedService<A> {
    async fn login(&self, name: &str, email: &str) -> Result<(), GatewayError> {
        self.inner.login(name, email).await
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.inner.logout().await
    }

    async fn breeds(&self) -> Result<Vec<String>, GatewayError> {
        self.inner.breeds().await
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResults, GatewayError> {
        let delay = params
            .breeds
            .iter()
            .filter_map(|breed| self.delays.get(breed))
            .max()
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.search(params).await
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, GatewayError> {
        self.inner.dogs(ids).await
    }

    async fn match_dog(&self, ids: &[String]) -> Result<MatchResult, GatewayError> {
        self.inner.match_dog(ids).await
    }
}

/// Which operations of a `FlakyService` fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct Failures {
    pub breeds: bool,
    pub search: bool,
    pub dogs: bool,
    pub matching: bool,
}

/// Wraps a service and fails the selected operations with a 500. Switchable at runtime.
#[derive(Clone)]
pub struct FlakyService<A> {
    inner: A,
    failures: Arc<Mutex<Failures>>,
}

impl<A> FlakyService<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            failures: Arc::new(Mutex::new(Failures::default())),
        }
    }

    pub fn fail(&self, failures: Failures) {
        *self.failures.lock().unwrap() = failures;
    }

    fn failing(&self, pick: impl Fn(&Failures) -> bool, path: &str) -> Result<(), GatewayError> {
        let failures = *self.failures.lock().unwrap();
        if pick(&failures) {
            Err(GatewayError::Status {
                status: 500,
                path: path.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl<A: DogService> DogService for FlakyService<A> {
    async fn login(&self, name: &str, email: &str) -> Result<(), GatewayError> {
        self.inner.login(name, email).await
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.inner.logout().await
    }

    async fn breeds(&self) -> Result<Vec<String>, GatewayError> {
        self.failing(|f| f.breeds, "/dogs/breeds")?;
        self.inner.breeds().await
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResults, GatewayError> {
        self.failing(|f| f.search, "/dogs/search")?;
        self.inner.search(params).await
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, GatewayError> {
        self.failing(|f| f.dogs, "/dogs")?;
        self.inner.dogs(ids).await
    }

    async fn match_dog(&self, ids: &[String]) -> Result<MatchResult, GatewayError> {
        self.failing(|f| f.matching, "/dogs/match")?;
        self.inner.match_dog(ids).await
    }
}

/// Service whose match always names a dog outside the loaded favorites.
#[derive(Clone)]
pub struct StrangerMatchService<A> {
    pub inner: A,
    pub stranger: String,
}

impl<A: DogService> DogService for StrangerMatchService<A> {
    async fn login(&self, name: &str, email: &str) -> Result<(), GatewayError> {
        self.inner.login(name, email).await
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.inner.logout().await
    }

    async fn breeds(&self) -> Result<Vec<String>, GatewayError> {
        self.inner.breeds().await
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResults, GatewayError> {
        self.inner.search(params).await
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, GatewayError> {
        self.inner.dogs(ids).await
    }

    async fn match_dog(&self, _ids: &[String]) -> Result<MatchResult, GatewayError> {
        Ok(MatchResult {
            dog_id: self.stranger.clone(),
        })
    }
}
