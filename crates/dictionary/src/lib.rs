use std::time::Duration;

use async_trait::async_trait;
use dictionary_api::{get_definitions, DICTIONARY_API_URL};
use reqwest::Url;

pub mod catalog;
mod dictionary;
mod dictionary_api;
pub mod search;

pub use dictionary::{License, PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};
pub use search::{to_search_results, SearchFilters, SearchResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("network error - please check your connection")]
    Fetch(#[source] reqwest::Error),
    #[error("unexpected response from the dictionary")]
    Deserialize(#[source] reqwest::Error),
    #[error("word not found: {message}")]
    NotFound { message: String },
    #[error("dictionary request failed with status {0}")]
    Status(u16),
    #[error("cannot look up an empty word")]
    EmptyWord,
    #[error("invalid dictionary base url: {0}")]
    InvalidBaseUrl(String),
}

/// Anything that can resolve a word into its dictionary entries.
#[async_trait]
pub trait WordLookup: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<Vec<Word>, DictionaryError>;
}

pub struct Dictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl Dictionary {
    pub fn new() -> Result<Self, DictionaryError> {
        Self::with_base_url(DICTIONARY_API_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, DictionaryError> {
        let base_url =
            Url::parse(base_url).map_err(|_| DictionaryError::InvalidBaseUrl(base_url.to_owned()))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DictionaryError::Fetch)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Every entry the API has for `word`. Lookup is case-insensitive.
    pub async fn get_definitions(&self, word: &str) -> Result<Vec<Word>, DictionaryError> {
        get_definitions(&self.client, &self.base_url, word).await
    }

    /// Looks `word` up and flattens the entries into ranked, filtered results.
    pub async fn search(
        &self,
        word: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, DictionaryError> {
        let words = self.get_definitions(word).await?;
        Ok(filters.apply(to_search_results(&words)))
    }

    pub async fn word_exists(&self, word: &str) -> bool {
        self.get_definitions(word).await.is_ok()
    }
}

#[async_trait]
impl WordLookup for Dictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<Word>, DictionaryError> {
        self.get_definitions(word).await
    }
}
