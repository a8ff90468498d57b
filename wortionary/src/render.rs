use dictionary::catalog::{FeaturedWord, Tag};
use dictionary::{SearchFilters, SearchResult};

use crate::auth::User;
use crate::search_store::{SearchState, SearchStatus};
use crate::storage::{HistoryEntry, SavedWord};

pub fn print_search(state: &SearchState) {
    match &state.status {
        SearchStatus::Idle => println!("Nothing searched yet."),
        SearchStatus::Loading => println!("Searching for '{}'...", state.query),
        SearchStatus::Error(message) => println!("Couldn't find '{}': {message}", state.query),
        SearchStatus::Success if state.results.is_empty() => {
            println!("No results for '{}'.", state.query);
            if !state.filters.is_empty() {
                println!("  (active filters: {})", describe_filters(&state.filters));
            }
        }
        SearchStatus::Success => print_results(&state.query, &state.results, &state.filters),
    }
}

fn print_results(query: &str, results: &[SearchResult], filters: &SearchFilters) {
    println!("Showing {} results for '{query}':", results.len());
    if !filters.is_empty() {
        println!("  (active filters: {})", describe_filters(filters));
    }
    let mut last_word: Option<&str> = None;
    for result in results {
        if last_word != Some(&result.word[..]) {
            match &result.phonetic {
                Some(phonetic) => println!("  {} {phonetic}", result.word),
                None => println!("  {}", result.word),
            }
            if let Some(audio) = &result.audio {
                println!("    audio: {audio}");
            }
            last_word = Some(&result.word[..]);
        }
        println!("    [{}] {}", result.part_of_speech, result.definition);
        if let Some(example) = &result.example {
            println!("          example: {example}");
        }
        if !result.synonyms.is_empty() {
            println!("          synonyms: {}", result.synonyms.join(", "));
        }
        if !result.antonyms.is_empty() {
            println!("          antonyms: {}", result.antonyms.join(", "));
        }
    }
}

pub fn describe_filters(filters: &SearchFilters) -> String {
    if filters.is_empty() {
        return "none".to_owned();
    }
    let mut parts = vec![];
    if !filters.part_of_speech.is_empty() {
        let pos = filters
            .part_of_speech
            .iter()
            .map(|pos| pos.as_str())
            .collect::<Vec<&str>>();
        parts.push(format!("pos={}", pos.join(",")));
    }
    if filters.has_audio {
        parts.push("audio".to_owned());
    }
    if filters.has_example {
        parts.push("example".to_owned());
    }
    parts.join(" ")
}

pub fn print_tags(title: &str, tags: &[Tag]) {
    println!("{title}:");
    let labels = tags
        .iter()
        .map(|tag| match tag.count {
            Some(count) => format!("{} ({count})", tag.label),
            None => tag.label.clone(),
        })
        .collect::<Vec<String>>();
    println!("  {}", labels.join(" · "));
}

pub fn print_word_of_the_day(featured: &FeaturedWord) {
    println!("Word of the day: {}", featured.word);
    println!("  {}", featured.definition);
    if let Some(example) = featured.example {
        println!("  example: {example}");
    }
}

pub fn print_user(user: &User) {
    println!("{} <{}> @{}", user.display_name(), user.email, user.username);
    println!(
        "  member since {}, theme {:?}, language {}",
        user.created_at.format("%Y-%m-%d"),
        user.preferences.theme,
        user.preferences.language
    );
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No searches yet.");
        return;
    }
    for entry in entries {
        println!(
            "  #{:<4} {}  {} ({} results)",
            entry.uid,
            entry.searched_at.format("%Y-%m-%d %H:%M"),
            entry.query,
            entry.results_count
        );
    }
}

pub fn print_saved(words: &[SavedWord]) {
    if words.is_empty() {
        println!("No saved words.");
        return;
    }
    for word in words {
        println!(
            "  #{:<4} {}: {} (saved {})",
            word.uid,
            word.word,
            word.definition,
            word.saved_at.format("%Y-%m-%d")
        );
        if let Some(notes) = &word.notes {
            println!("      notes: {notes}");
        }
    }
}

#[cfg(test)]
mod tests {
    use dictionary::PartOfSpeech;

    use super::*;

    #[test]
    fn filter_description_lists_active_predicates() {
        assert_eq!(describe_filters(&SearchFilters::default()), "none");
        let filters = SearchFilters {
            part_of_speech: vec![PartOfSpeech::Noun, PartOfSpeech::Verb],
            has_audio: true,
            has_example: false,
        };
        assert_eq!(describe_filters(&filters), "pos=noun,verb audio");
    }
}
