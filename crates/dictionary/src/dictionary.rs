use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub word: String,
    pub phonetic: Option<String>,
    pub phonetics: Vec<Phonetic>,
    pub origin: Option<String>,
    pub meanings: Vec<WordMeaning>,
    pub source_urls: Vec<String>,
    pub license: Option<License>,
}

impl Word {
    /// The word's own phonetic spelling, falling back to the first variant's.
    pub fn phonetic_text(&self) -> Option<&str> {
        self.phonetic
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| self.phonetics.first().and_then(|p| p.text.as_deref()))
    }

    /// The first pronunciation recording, if any variant has one.
    pub fn audio_url(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .filter_map(|p| p.audio.as_deref())
            .find(|audio| !audio.is_empty())
    }

    pub fn definition_count(&self) -> usize {
        self.meanings.iter().map(|m| m.definitions.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Phonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct License {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordMeaning {
    pub part_of_speech: PartOfSpeech,
    pub definitions: Vec<WordDefinition>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

/// Part-of-speech tag as reported by the API.
///
/// Tags outside the known set are kept verbatim in `Other` so a lookup never
/// fails on vocabulary the API adds later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
    Exclamation,
    Determiner,
    Article,
    Numeral,
    Other(String),
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Exclamation => "exclamation",
            PartOfSpeech::Determiner => "determiner",
            PartOfSpeech::Article => "article",
            PartOfSpeech::Numeral => "numeral",
            PartOfSpeech::Other(other) => other,
        }
    }
}

impl From<&str> for PartOfSpeech {
    fn from(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        match &value[..] {
            "noun" => PartOfSpeech::Noun,
            "pronoun" => PartOfSpeech::Pronoun,
            "verb" => PartOfSpeech::Verb,
            "adjective" => PartOfSpeech::Adjective,
            "adverb" => PartOfSpeech::Adverb,
            "preposition" => PartOfSpeech::Preposition,
            "conjunction" => PartOfSpeech::Conjunction,
            "interjection" => PartOfSpeech::Interjection,
            "exclamation" => PartOfSpeech::Exclamation,
            "determiner" => PartOfSpeech::Determiner,
            "article" => PartOfSpeech::Article,
            "numeral" => PartOfSpeech::Numeral,
            _ => PartOfSpeech::Other(value),
        }
    }
}

impl From<String> for PartOfSpeech {
    fn from(value: String) -> Self {
        PartOfSpeech::from(&value[..])
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordDefinition {
    pub definition: String,
    pub example: Option<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}
