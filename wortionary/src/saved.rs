use dictionary::{to_search_results, WordLookup};

use crate::search_store::SearchState;
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
    NotFound,
}

/// Saves `word` with its top definition. The definition comes from the
/// current results when they contain the word, otherwise from a fresh lookup.
pub async fn save_word(
    state: &SearchState,
    lookup: &dyn WordLookup,
    storage: &Storage,
    word: &str,
) -> sqlx::Result<SaveOutcome> {
    let word = word.trim().to_lowercase();
    if storage.get_word(&word).await?.is_some() {
        return Ok(SaveOutcome::AlreadySaved);
    }
    let known = state
        .results
        .iter()
        .find(|result| result.word.to_lowercase() == word)
        .map(|result| result.definition.clone());
    let definition = match known {
        Some(definition) => definition,
        None => match lookup.lookup(&word).await {
            Ok(words) => match to_search_results(&words).into_iter().next() {
                Some(result) => result.definition,
                None => return Ok(SaveOutcome::NotFound),
            },
            Err(error) => {
                tracing::debug!(word = %word, %error, "no definition to save");
                return Ok(SaveOutcome::NotFound);
            }
        },
    };
    if storage.save_word(&word, &definition, None).await? {
        Ok(SaveOutcome::Saved)
    } else {
        Ok(SaveOutcome::AlreadySaved)
    }
}
