// https://dictionaryapi.dev/ - free, no key, one entry per etymology

use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::{DictionaryError, License, Phonetic, Word, WordDefinition, WordMeaning};

pub(crate) const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2";

const LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiWord {
    word: String,
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    origin: Option<String>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
    #[serde(default)]
    source_urls: Vec<String>,
    license: Option<ApiLicense>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPhonetic {
    text: Option<String>,
    audio: Option<String>,
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
    example: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiLicense {
    name: String,
    url: String,
}

/// Body the API sends alongside a 404.
#[derive(Debug, Deserialize)]
struct ApiNotFound {
    message: Option<String>,
}

impl From<ApiWord> for Word {
    fn from(word: ApiWord) -> Self {
        Word {
            word: word.word,
            phonetic: word.phonetic,
            phonetics: word.phonetics.into_iter().map(Phonetic::from).collect(),
            origin: word.origin,
            meanings: word.meanings.into_iter().map(WordMeaning::from).collect(),
            source_urls: word.source_urls,
            license: word.license.map(|license| License {
                name: license.name,
                url: license.url,
            }),
        }
    }
}

impl From<ApiPhonetic> for Phonetic {
    fn from(phonetic: ApiPhonetic) -> Self {
        Phonetic {
            text: phonetic.text,
            audio: phonetic.audio,
            source_url: phonetic.source_url,
        }
    }
}

impl From<ApiMeaning> for WordMeaning {
    fn from(meaning: ApiMeaning) -> Self {
        WordMeaning {
            part_of_speech: meaning.part_of_speech.into(),
            definitions: meaning
                .definitions
                .into_iter()
                .map(|definition| WordDefinition {
                    definition: definition.definition,
                    example: definition.example,
                    synonyms: definition.synonyms,
                    antonyms: definition.antonyms,
                })
                .collect(),
            synonyms: meaning.synonyms,
            antonyms: meaning.antonyms,
        }
    }
}

pub(crate) fn entries_url(base_url: &Url, word: &str) -> Result<Url, DictionaryError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| DictionaryError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(["entries", LANGUAGE, word]);
    Ok(url)
}

pub(crate) async fn get_definitions(
    client: &reqwest::Client,
    base_url: &Url,
    word: &str,
) -> Result<Vec<Word>, DictionaryError> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(DictionaryError::EmptyWord);
    }
    let url = entries_url(base_url, &word)?;
    tracing::debug!(%url, "looking up definitions");

    let res: reqwest::Response = client.get(url).send().await.map_err(DictionaryError::Fetch)?;
    match res.status() {
        status if status.is_success() => {
            let words = res
                .json::<Vec<ApiWord>>()
                .await
                .map_err(DictionaryError::Deserialize)?;
            Ok(words.into_iter().map(Word::from).collect())
        }
        StatusCode::NOT_FOUND => {
            let message = res
                .json::<ApiNotFound>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("No definitions found for '{word}'"));
            Err(DictionaryError::NotFound { message })
        }
        status => Err(DictionaryError::Status(status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse(DICTIONARY_API_URL).unwrap()
    }

    #[test]
    fn entries_url_appends_language_and_word() {
        let url = entries_url(&base(), "hello").unwrap();
        assert_eq!(url.as_str(), "https://api.dictionaryapi.dev/api/v2/entries/en/hello");
    }

    #[test]
    fn entries_url_encodes_the_word() {
        let url = entries_url(&base(), "ice cream/cone").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream%2Fcone"
        );
    }

    #[test]
    fn entries_url_tolerates_trailing_slash() {
        let base = Url::parse("http://localhost:8080/api/v2/").unwrap();
        let url = entries_url(&base, "word").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v2/entries/en/word");
    }

    #[test]
    fn api_payload_converts_into_word() {
        let payload = r#"[{
            "word": "hello",
            "phonetics": [{"audio": ""}, {"text": "/həˈləʊ/", "audio": "https://a/hello.mp3"}],
            "meanings": [{
                "partOfSpeech": "exclamation",
                "definitions": [{"definition": "used as a greeting", "example": "hello there!", "synonyms": [], "antonyms": []}],
                "synonyms": ["greeting"],
                "antonyms": []
            }],
            "sourceUrls": ["https://en.wiktionary.org/wiki/hello"],
            "license": {"name": "CC BY-SA 3.0", "url": "https://creativecommons.org/licenses/by-sa/3.0"}
        }]"#;
        let words: Vec<ApiWord> = serde_json::from_str(payload).unwrap();
        let word = Word::from(words.into_iter().next().unwrap());

        assert_eq!(word.word, "hello");
        assert_eq!(word.phonetic, None);
        assert_eq!(word.audio_url(), Some("https://a/hello.mp3"));
        assert_eq!(word.meanings[0].part_of_speech, crate::PartOfSpeech::Exclamation);
        assert_eq!(word.meanings[0].synonyms, vec!["greeting".to_owned()]);
        assert_eq!(
            word.meanings[0].definitions[0].example.as_deref(),
            Some("hello there!")
        );
        assert_eq!(word.license.unwrap().name, "CC BY-SA 3.0");
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let payload = r#"[{"word": "x", "meanings": [{"partOfSpeech": "noun", "definitions": [{"definition": "a letter"}]}]}]"#;
        let words: Vec<ApiWord> = serde_json::from_str(payload).unwrap();
        let word = Word::from(words.into_iter().next().unwrap());
        assert!(word.phonetics.is_empty());
        assert!(word.meanings[0].definitions[0].synonyms.is_empty());
    }
}
