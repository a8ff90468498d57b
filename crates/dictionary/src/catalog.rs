//! Built-in word lists: autocomplete candidates, trending words, personal
//! tags and the word of the day.

use chrono::{Datelike, NaiveDate};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

const TRENDING_TAG_COUNT: usize = 12;

const COMMON_WORDS: &[&str] = &[
    "hello", "world", "computer", "internet", "technology", "science",
    "nature", "environment", "sustainable", "innovation", "creativity",
    "communication", "education", "knowledge", "wisdom", "understanding",
    "friendship", "relationship", "community", "society", "culture",
    "art", "music", "literature", "philosophy", "psychology",
    "happiness", "success", "achievement", "motivation", "inspiration",
    "challenge", "opportunity", "growth", "development", "progress",
    "future", "past", "present", "time", "space", "universe",
    "beautiful", "amazing", "wonderful", "incredible", "fantastic",
    "important", "significant", "valuable", "useful", "helpful",
];

const TRENDING_WORDS: [&str; 30] = [
    "sustainable", "metaverse", "NFT", "cryptocurrency", "blockchain",
    "artificial intelligence", "machine learning", "quantum computing",
    "climate change", "renewable energy", "biodiversity", "ecosystem",
    "mindfulness", "wellness", "productivity", "innovation", "disruption",
    "digital transformation", "remote work", "hybrid", "collaboration",
    "authenticity", "transparency", "accountability", "inclusivity",
    "diversity", "equity", "empowerment", "resilience", "adaptability",
];

const PERSONAL_TAGS: [(&str, &str, u32); 8] = [
    ("p1", "Technology", 45),
    ("p2", "Science", 32),
    ("p3", "Art", 28),
    ("p4", "Philosophy", 21),
    ("p5", "Psychology", 19),
    ("p6", "Literature", 15),
    ("p7", "Music", 12),
    ("p8", "Nature", 10),
];

const WORDS_OF_THE_DAY: [FeaturedWord; 5] = [
    FeaturedWord {
        word: "Sonder",
        definition: "The realization that each random passerby is living a life as vivid and complex as your own.",
        example: Some("Walking through the busy street, she experienced a moment of sonder."),
    },
    FeaturedWord {
        word: "Petrichor",
        definition: "The pleasant earthy smell after rain.",
        example: Some("The petrichor filled the air after the summer storm."),
    },
    FeaturedWord {
        word: "Serendipity",
        definition: "The occurrence of events by chance in a happy or beneficial way.",
        example: Some("Meeting her future business partner at the coffee shop was pure serendipity."),
    },
    FeaturedWord {
        word: "Ephemeral",
        definition: "Lasting for a very short time.",
        example: Some("The beauty of cherry blossoms is ephemeral but unforgettable."),
    },
    FeaturedWord {
        word: "Wanderlust",
        definition: "A strong desire to travel and explore the world.",
        example: Some("Her wanderlust led her to visit over thirty countries."),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedWord {
    pub word: &'static str,
    pub definition: &'static str,
    pub example: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Trending,
    Personal,
    Popular,
    Recent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub label: String,
    pub category: TagCategory,
    pub count: Option<u32>,
}

/// Common words containing `query`, case-insensitively, in list order.
pub fn suggestions(query: &str, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    COMMON_WORDS
        .iter()
        .filter(|word| word.contains(&query[..]))
        .take(limit)
        .map(|word| word.to_string())
        .collect()
}

/// Common words ranked by Jaro similarity to `word`, most similar first.
///
/// Used to offer alternatives after a lookup misses.
pub fn closest_words(word: &str, limit: usize, min_similarity: f64) -> Vec<&'static str> {
    let word = word.trim().to_lowercase();
    let mut scored = COMMON_WORDS
        .iter()
        .map(|candidate| (*candidate, strsim::jaro(candidate, &word)))
        .filter(|(_, similarity)| *similarity >= min_similarity)
        .collect::<Vec<(&str, f64)>>();
    // most similar at the start
    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    scored.into_iter().take(limit).map(|(word, _)| word).collect()
}

pub fn trending_words() -> &'static [&'static str] {
    &TRENDING_WORDS
}

pub fn trending_tags() -> Vec<Tag> {
    TRENDING_WORDS
        .iter()
        .take(TRENDING_TAG_COUNT)
        .enumerate()
        .map(|(index, word)| Tag {
            id: format!("trending-{index}"),
            label: word.to_string(),
            category: TagCategory::Trending,
            count: None,
        })
        .collect()
}

pub fn personal_tags() -> Vec<Tag> {
    PERSONAL_TAGS
        .iter()
        .map(|(id, label, count)| Tag {
            id: id.to_string(),
            label: label.to_string(),
            category: TagCategory::Personal,
            count: Some(*count),
        })
        .collect()
}

/// Rotates through the featured words by day of week, Sunday first.
pub fn word_of_the_day(date: NaiveDate) -> FeaturedWord {
    let day = date.weekday().num_days_from_sunday() as usize;
    WORDS_OF_THE_DAY[day % WORDS_OF_THE_DAY.len()]
}
