use std::sync::Arc;

use auth::{
    AuthState, AuthStore, DemoSessionProvider, LoginCredentials, ProfileUpdate, RegisterCredentials, Theme,
    DEMO_EMAIL, DEMO_PASSWORD,
};
use clap::Parser;
use commands::{Command, ProfileField, HELP};
use config::{Args, Config};
use dictionary::{catalog, Dictionary};
use saved::SaveOutcome;
use search_store::{SearchState, SearchStore};
use storage::Storage;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use utilities::{input, str_to_bool};

mod auth;
mod commands;
mod config;
mod render;
mod saved;
mod search_store;
mod storage;
mod utilities;

const HISTORY_LIMIT: u32 = 20;
const SIMILAR_WORDS: usize = 3;
const SIMILARITY_THRESHOLD: f64 = 0.8;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = Config::new().with_args(&args);
    init_tracing(config.log_json);

    let dict = Arc::new(Dictionary::with_base_url(
        &config.dictionary_base_url,
        config.request_timeout,
    )?);
    let storage = Storage::connect(&config.database_url).await?;
    let search = SearchStore::new(dict.clone())
        .with_history(storage.clone())
        .with_suggestion_limit(config.suggestion_limit);

    if !args.word.is_empty() {
        search_word(&search, &args.word.join(" ")).await;
        return Ok(());
    }

    let provider = DemoSessionProvider::new(storage.clone()).with_latency(config.auth_latency);
    let auth = AuthStore::new(Arc::new(provider));
    if let Err(error) = auth.check_auth().await {
        tracing::warn!(%error, "could not restore the previous session");
    }

    tokio::spawn(log_transitions(search.subscribe(), auth.subscribe()));

    let app = App {
        dict,
        search,
        auth,
        storage,
    };
    app.welcome();
    loop {
        let Some(line) = input(">> ")? else {
            break;
        };
        match commands::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Exit)) => break,
            Ok(Some(command)) => app.run(command).await?,
            Err(error) => println!("{error}"),
        }
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wortionary=warn,dictionary=warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Follows both stores and traces every published state change.
async fn log_transitions(
    mut search: watch::Receiver<SearchState>,
    mut auth: watch::Receiver<AuthState>,
) {
    loop {
        tokio::select! {
            changed = search.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = search.borrow_and_update();
                tracing::debug!(
                    query = %state.query,
                    status = ?state.status,
                    loading = state.is_loading(),
                    results = state.total_results,
                    page = state.current_page,
                    suggestions = state.suggestions.len(),
                    "search state changed"
                );
            }
            changed = auth.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = auth.borrow_and_update();
                tracing::debug!(
                    user = state.user.as_ref().map(|user| &user.username[..]),
                    authenticated = state.is_authenticated,
                    loading = state.is_loading,
                    error = state.error.as_deref(),
                    "auth state changed"
                );
            }
        }
    }
}

/// Runs one search, prints it, and offers close matches when the lookup fails.
async fn search_word(search: &SearchStore, word: &str) {
    search.clear_suggestions();
    search.set_query(word);
    search.search(word, None).await;
    let state = search.snapshot();
    render::print_search(&state);
    let similar = did_you_mean(&state, word);
    if !similar.is_empty() {
        println!("Did you mean: {}?", similar.join(", "));
    }
}

/// Close common words, offered only after a failed lookup.
fn did_you_mean(state: &SearchState, word: &str) -> Vec<&'static str> {
    if state.error().is_none() {
        return vec![];
    }
    catalog::closest_words(word, SIMILAR_WORDS, SIMILARITY_THRESHOLD)
}

struct App {
    dict: Arc<Dictionary>,
    search: SearchStore,
    auth: AuthStore,
    storage: Storage,
}

impl App {
    fn welcome(&self) {
        match &self.auth.snapshot().user {
            Some(user) => println!("Welcome back, {}!", user.first_name),
            None => println!("Not signed in. Try: login {DEMO_EMAIL} {DEMO_PASSWORD}"),
        }
        println!("Type 'help' for a list of commands.");
    }

    async fn run(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Exit => {}
            Command::Help => println!("{HELP}"),
            Command::Search(word) => search_word(&self.search, &word).await,
            Command::Filter(change) => {
                let filters = change.apply_to(&self.search.snapshot().filters);
                println!("Filters: {}", render::describe_filters(&filters));
                self.search.set_filters(filters).await;
                let state = self.search.snapshot();
                if state.has_searched {
                    render::print_search(&state);
                }
            }
            Command::Suggest(prefix) => {
                self.search.get_suggestions(&prefix);
                let suggestions = self.search.snapshot().suggestions;
                if suggestions.is_empty() {
                    println!("No suggestions.");
                } else {
                    println!("{}", suggestions.join(", "));
                }
            }
            Command::Trending => {
                println!("{}", catalog::trending_words().join(", "));
            }
            Command::Tags => {
                render::print_tags("Trending", &catalog::trending_tags());
                render::print_tags("Your interests", &catalog::personal_tags());
            }
            Command::WordOfTheDay => {
                let today = chrono::Local::now().date_naive();
                render::print_word_of_the_day(&catalog::word_of_the_day(today));
            }
            Command::Login {
                email,
                password,
                remember,
            } => {
                let credentials = LoginCredentials {
                    email,
                    password,
                    remember_me: remember,
                };
                match self.auth.login(&credentials).await {
                    Ok(user) => println!("Welcome back, {}!", user.first_name),
                    Err(error) => {
                        println!("{error}. Use {DEMO_EMAIL} / {DEMO_PASSWORD}");
                        self.auth.clear_error();
                    }
                }
            }
            Command::Register {
                email,
                password,
                confirm_password,
                first_name,
                last_name,
                username,
            } => {
                let answer = input("Do you accept the terms and conditions? (y/N): ")?;
                let accept_terms = answer.as_deref().and_then(str_to_bool).unwrap_or(false);
                let credentials = RegisterCredentials {
                    email,
                    password,
                    confirm_password,
                    first_name,
                    last_name,
                    username,
                    accept_terms,
                };
                match self.auth.register(&credentials).await {
                    Ok(user) => println!("Welcome to Wortionary, {}!", user.first_name),
                    Err(error) => {
                        println!("{error}");
                        self.auth.clear_error();
                    }
                }
            }
            Command::Logout => {
                self.auth.logout().await;
                println!("Logged out successfully");
            }
            Command::WhoAmI => match &self.auth.snapshot().user {
                Some(user) => render::print_user(user),
                None => println!("Not signed in."),
            },
            Command::Refresh => match self.auth.refresh_auth().await {
                Ok(()) => println!("Session refreshed."),
                Err(_) => println!("Session expired, please log in again."),
            },
            Command::Profile { field, value } => self.update_profile(field, value).await,
            Command::ChangePassword { current, new } => {
                match self.auth.change_password(&current, &new).await {
                    Ok(()) => println!("Password changed."),
                    Err(error) => println!("{error}"),
                }
            }
            Command::ResetPassword(email) => match self.auth.request_password_reset(&email).await {
                Ok(()) => println!("If {email} has an account, a reset link is on its way."),
                Err(error) => println!("{error}"),
            },
            Command::History => {
                render::print_history(&self.search.history(HISTORY_LIMIT).await?);
            }
            Command::ClearHistory => {
                let removed = self.search.clear_history().await?;
                println!("Search history cleared ({removed} entries).");
            }
            Command::Save(word) => self.save_word(&word).await?,
            Command::Unsave(word) => {
                if self.storage.remove_word(&word).await? {
                    println!("Deleted the word successfully.");
                } else {
                    println!("This word is not saved.");
                }
            }
            Command::Saved => render::print_saved(&self.storage.saved_words().await?),
            Command::Clear => {
                self.search.clear_search();
                println!("Search cleared.");
            }
        }
        Ok(())
    }

    async fn update_profile(&self, field: ProfileField, value: String) {
        let Some(user) = self.auth.snapshot().user else {
            println!("Not signed in.");
            return;
        };
        let mut update = ProfileUpdate::default();
        match field {
            ProfileField::FirstName => update.first_name = Some(value),
            ProfileField::LastName => update.last_name = Some(value),
            ProfileField::Username => update.username = Some(value),
            ProfileField::Email => update.email = Some(value),
            ProfileField::Theme => {
                let Some(theme) = Theme::parse(&value) else {
                    println!("Theme must be light, dark or system.");
                    return;
                };
                let mut preferences = user.preferences.clone();
                preferences.theme = theme;
                update.preferences = Some(preferences);
            }
        }
        match self.auth.update_profile(update).await {
            Ok(Some(user)) => {
                println!("Profile updated successfully");
                render::print_user(&user);
            }
            Ok(None) => println!("Not signed in."),
            Err(error) => println!("Update failed: {error}"),
        }
    }

    async fn save_word(&self, word: &str) -> anyhow::Result<()> {
        let state = self.search.snapshot();
        let word = word.trim().to_lowercase();
        match saved::save_word(&state, &*self.dict, &self.storage, &word).await? {
            SaveOutcome::Saved => println!("Saved the word successfully"),
            SaveOutcome::AlreadySaved => println!("'{word}' is already saved."),
            SaveOutcome::NotFound => println!("Couldn't find the word you were looking for."),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use dictionary::{DictionaryError, Word, WordLookup};

    use super::*;

    struct NothingFound;

    #[async_trait]
    impl WordLookup for NothingFound {
        async fn lookup(&self, _word: &str) -> Result<Vec<Word>, DictionaryError> {
            Err(DictionaryError::NotFound {
                message: "No Definitions Found".to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn failed_search_offers_close_words() {
        let search = SearchStore::new(Arc::new(NothingFound));
        search_word(&search, "helo").await;

        let state = search.snapshot();
        assert!(state.error().is_some());
        assert_eq!(did_you_mean(&state, "helo").first(), Some(&"hello"));
    }

    #[test]
    fn no_hints_without_an_error() {
        assert!(did_you_mean(&SearchState::default(), "helo").is_empty());
    }
}
