use crate::{PartOfSpeech, Word};

const MEANING_PENALTY: f64 = 0.1;
const DEFINITION_PENALTY: f64 = 0.05;

/// One flattened definition of a looked-up word.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub word: String,
    pub definition: String,
    pub part_of_speech: PartOfSpeech,
    pub example: Option<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub phonetic: Option<String>,
    pub audio: Option<String>,
    pub relevance_score: f64,
}

impl SearchResult {
    pub fn has_audio(&self) -> bool {
        self.audio.as_deref().is_some_and(|audio| !audio.is_empty())
    }

    pub fn has_example(&self) -> bool {
        self.example.as_deref().is_some_and(|example| !example.is_empty())
    }
}

/// Position-derived score: earlier meanings and earlier definitions rank higher.
pub fn relevance_score(meaning_index: usize, definition_index: usize) -> f64 {
    1.0 - meaning_index as f64 * MEANING_PENALTY - definition_index as f64 * DEFINITION_PENALTY
}

/// Flattens every (meaning, definition) pair of every word into a result,
/// ordered by descending relevance. Ties keep their original order.
pub fn to_search_results(words: &[Word]) -> Vec<SearchResult> {
    let capacity = words.iter().map(Word::definition_count).sum();
    let mut results = Vec::with_capacity(capacity);
    for word in words {
        let phonetic = word.phonetic_text().map(str::to_owned);
        let audio = word.audio_url().map(str::to_owned);
        for (meaning_index, meaning) in word.meanings.iter().enumerate() {
            for (definition_index, definition) in meaning.definitions.iter().enumerate() {
                let synonyms = if definition.synonyms.is_empty() {
                    &meaning.synonyms
                } else {
                    &definition.synonyms
                };
                let antonyms = if definition.antonyms.is_empty() {
                    &meaning.antonyms
                } else {
                    &definition.antonyms
                };
                results.push(SearchResult {
                    id: format!("{}-{meaning_index}-{definition_index}", word.word),
                    word: word.word.clone(),
                    definition: definition.definition.clone(),
                    part_of_speech: meaning.part_of_speech.clone(),
                    example: definition.example.clone(),
                    synonyms: synonyms.clone(),
                    antonyms: antonyms.clone(),
                    phonetic: phonetic.clone(),
                    audio: audio.clone(),
                    relevance_score: relevance_score(meaning_index, definition_index),
                });
            }
        }
    }
    results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    results
}

/// Predicates narrowing a result list. Every active predicate must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Allowed parts of speech; empty allows all.
    pub part_of_speech: Vec<PartOfSpeech>,
    pub has_audio: bool,
    pub has_example: bool,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.part_of_speech.is_empty() && !self.has_audio && !self.has_example
    }

    pub fn matches(&self, result: &SearchResult) -> bool {
        (self.part_of_speech.is_empty() || self.part_of_speech.contains(&result.part_of_speech))
            && (!self.has_audio || result.has_audio())
            && (!self.has_example || result.has_example())
    }

    pub fn apply(&self, mut results: Vec<SearchResult>) -> Vec<SearchResult> {
        if !self.is_empty() {
            results.retain(|result| self.matches(result));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Phonetic, WordDefinition, WordMeaning};

    fn definition(text: &str, example: Option<&str>, synonyms: &[&str]) -> WordDefinition {
        WordDefinition {
            definition: text.to_owned(),
            example: example.map(str::to_owned),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            antonyms: vec![],
        }
    }

    fn meaning(pos: PartOfSpeech, definitions: Vec<WordDefinition>, synonyms: &[&str]) -> WordMeaning {
        WordMeaning {
            part_of_speech: pos,
            definitions,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            antonyms: vec!["goodbye".to_owned()],
        }
    }

    fn hello() -> Word {
        Word {
            word: "hello".to_owned(),
            phonetic: Some("/həˈləʊ/".to_owned()),
            phonetics: vec![Phonetic {
                text: None,
                audio: Some("https://audio/hello.mp3".to_owned()),
                source_url: None,
            }],
            origin: None,
            meanings: vec![
                meaning(
                    PartOfSpeech::Exclamation,
                    vec![
                        definition("used as a greeting", Some("hello there, Katie!"), &[]),
                        definition("used to express surprise", None, &["wow"]),
                    ],
                    &["hi"],
                ),
                meaning(
                    PartOfSpeech::Noun,
                    vec![definition("an utterance of 'hello'", None, &[])],
                    &[],
                ),
            ],
            source_urls: vec![],
            license: None,
        }
    }

    fn silent() -> Word {
        Word {
            word: "hush".to_owned(),
            phonetic: None,
            phonetics: vec![],
            origin: None,
            meanings: vec![meaning(
                PartOfSpeech::Verb,
                vec![definition("make quiet", Some("hush the baby"), &[])],
                &[],
            )],
            source_urls: vec![],
            license: None,
        }
    }

    #[test]
    fn one_result_per_definition() {
        let results = to_search_results(&[hello(), silent()]);
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn results_are_sorted_by_descending_score() {
        let results = to_search_results(&[hello(), silent()]);
        assert!(results
            .windows(2)
            .all(|pair| pair[0].relevance_score >= pair[1].relevance_score));
        assert_eq!(results[0].id, "hello-0-0");
        assert_eq!(results[1].id, "hush-0-0");
    }

    #[test]
    fn score_penalises_position() {
        let results = to_search_results(&[hello()]);
        let score = |id: &str| {
            results
                .iter()
                .find(|result| result.id == id)
                .map(|result| result.relevance_score)
                .unwrap()
        };
        assert!((score("hello-0-0") - 1.0).abs() < 1e-9);
        assert!((score("hello-0-1") - 0.95).abs() < 1e-9);
        assert!((score("hello-1-0") - 0.9).abs() < 1e-9);
    }

    #[test]
    fn synonyms_fall_back_to_meaning() {
        let results = to_search_results(&[hello()]);
        let greeting = results.iter().find(|r| r.id == "hello-0-0").unwrap();
        assert_eq!(greeting.synonyms, vec!["hi".to_owned()]);
        assert_eq!(greeting.antonyms, vec!["goodbye".to_owned()]);
        let surprise = results.iter().find(|r| r.id == "hello-0-1").unwrap();
        assert_eq!(surprise.synonyms, vec!["wow".to_owned()]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(to_search_results(&[]).is_empty());
    }

    #[test]
    fn empty_filters_are_identity() {
        let results = to_search_results(&[hello(), silent()]);
        assert_eq!(SearchFilters::default().apply(results.clone()), results);
    }

    #[test]
    fn audio_filter_drops_silent_results() {
        let filters = SearchFilters {
            has_audio: true,
            ..Default::default()
        };
        let filtered = filters.apply(to_search_results(&[hello(), silent()]));
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(SearchResult::has_audio));
    }

    #[test]
    fn filters_combine_with_and() {
        let filters = SearchFilters {
            part_of_speech: vec![PartOfSpeech::Exclamation, PartOfSpeech::Verb],
            has_audio: false,
            has_example: true,
        };
        let filtered = filters.apply(to_search_results(&[hello(), silent()]));
        let ids: Vec<&str> = filtered.iter().map(|r| &r.id[..]).collect();
        assert_eq!(ids, vec!["hello-0-0", "hush-0-0"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let filters = SearchFilters {
            part_of_speech: vec![PartOfSpeech::Noun],
            has_audio: true,
            has_example: false,
        };
        let once = filters.apply(to_search_results(&[hello(), silent()]));
        let twice = filters.apply(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn empty_example_does_not_count() {
        let mut result = to_search_results(&[silent()]).remove(0);
        result.example = Some(String::new());
        assert!(!result.has_example());
    }
}
