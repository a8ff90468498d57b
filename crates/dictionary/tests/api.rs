use std::time::Duration;

use dictionary::{Dictionary, DictionaryError, PartOfSpeech, SearchFilters, DEFAULT_TIMEOUT};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hello_payload() -> serde_json::Value {
    json!([{
        "word": "hello",
        "phonetics": [
            {"audio": "https://api.dictionaryapi.dev/media/pronunciations/en/hello-au.mp3"},
            {"text": "/həˈləʊ/", "audio": "https://api.dictionaryapi.dev/media/pronunciations/en/hello-uk.mp3"}
        ],
        "meanings": [
            {
                "partOfSpeech": "noun",
                "definitions": [
                    {"definition": "\"Hello!\" or an equivalent greeting.", "synonyms": [], "antonyms": []}
                ],
                "synonyms": ["greeting"],
                "antonyms": []
            },
            {
                "partOfSpeech": "verb",
                "definitions": [
                    {"definition": "To greet with \"hello\".", "synonyms": [], "antonyms": []}
                ],
                "synonyms": [],
                "antonyms": []
            },
            {
                "partOfSpeech": "interjection",
                "definitions": [
                    {"definition": "A greeting (salutation) said when meeting someone.", "synonyms": [], "antonyms": ["bye", "goodbye"]},
                    {"definition": "A greeting used when answering the telephone.", "synonyms": [], "antonyms": []}
                ],
                "synonyms": [],
                "antonyms": ["bye"]
            }
        ],
        "license": {"name": "CC BY-SA 3.0", "url": "https://creativecommons.org/licenses/by-sa/3.0"},
        "sourceUrls": ["https://en.wiktionary.org/wiki/hello"]
    }])
}

async fn dictionary_for(server: &MockServer) -> Dictionary {
    Dictionary::with_base_url(&format!("{}/api/v2", server.uri()), DEFAULT_TIMEOUT).unwrap()
}

#[tokio::test]
async fn lookup_lowercases_and_parses_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/entries/en/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hello_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let dict = dictionary_for(&server).await;
    let words = dict.get_definitions("  HeLLo ").await.unwrap();

    assert_eq!(words.len(), 1);
    assert_eq!(words[0].meanings.len(), 3);
    assert_eq!(words[0].meanings[0].part_of_speech, PartOfSpeech::Noun);
}

#[tokio::test]
async fn search_flattens_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/entries/en/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hello_payload()))
        .mount(&server)
        .await;
    let dict = dictionary_for(&server).await;

    let all = dict.search("hello", &SearchFilters::default()).await.unwrap();
    assert_eq!(all.len(), 4);
    assert!(all
        .iter()
        .any(|r| r.part_of_speech == PartOfSpeech::Noun && !r.definition.is_empty()));
    assert!(all.iter().all(|r| r.audio.is_some()));

    let filters = SearchFilters {
        part_of_speech: vec![PartOfSpeech::Interjection],
        ..Default::default()
    };
    let interjections = dict.search("hello", &filters).await.unwrap();
    assert_eq!(interjections.len(), 2);
    assert_eq!(interjections[0].antonyms, vec!["bye", "goodbye"]);
    assert_eq!(interjections[1].antonyms, vec!["bye"]);
}

#[tokio::test]
async fn missing_word_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/entries/en/qwertyuiop"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "No Definitions Found",
            "message": "Sorry pal, we couldn't find definitions for the word you were looking for.",
            "resolution": "You can try the search again at later time or head to the web instead."
        })))
        .mount(&server)
        .await;
    let dict = dictionary_for(&server).await;

    match dict.get_definitions("qwertyuiop").await {
        Err(DictionaryError::NotFound { message }) => assert!(message.starts_with("Sorry pal")),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(!dict.word_exists("qwertyuiop").await);
}

#[tokio::test]
async fn server_errors_map_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let dict = dictionary_for(&server).await;

    assert!(matches!(
        dict.get_definitions("hello").await,
        Err(DictionaryError::Status(503))
    ));
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let dict = dictionary_for(&server).await;

    assert!(matches!(
        dict.get_definitions("hello").await,
        Err(DictionaryError::Deserialize(_))
    ));
}

#[tokio::test]
async fn empty_word_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hello_payload()))
        .expect(0)
        .mount(&server)
        .await;
    let dict = dictionary_for(&server).await;

    assert!(matches!(
        dict.get_definitions("   ").await,
        Err(DictionaryError::EmptyWord)
    ));
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hello_payload())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    let dict = Dictionary::with_base_url(&server.uri(), Duration::from_millis(50)).unwrap();

    assert!(matches!(
        dict.get_definitions("hello").await,
        Err(DictionaryError::Fetch(_))
    ));
}
