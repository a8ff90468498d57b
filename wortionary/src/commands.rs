use dictionary::{PartOfSpeech, SearchFilters};

use crate::utilities::str_to_bool;

pub const HELP: &str = "\
Commands:
  search <word>                 look a word up (also: define, find)
  filter pos=<a,b> audio=<on|off> example=<on|off>
  filter clear                  drop all filters
  suggest <prefix>              autocomplete from common words
  trending | tags | wotd        browse trending words, tags, word of the day
  login <email> <password> [remember]
  register <email> <password> <confirm> <first> <last> <username>
  logout | whoami | refresh
  profile <first|last|username|email|theme> <value>
  password <current> <new> | reset <email>
  history [clear]               recent searches
  save <word> | unsave <word> | saved
  clear                         reset the current search
  help | exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Help,
    Search(String),
    Filter(FilterChange),
    Suggest(String),
    Trending,
    Tags,
    WordOfTheDay,
    Login {
        email: String,
        password: String,
        remember: bool,
    },
    Register {
        email: String,
        password: String,
        confirm_password: String,
        first_name: String,
        last_name: String,
        username: String,
    },
    Logout,
    WhoAmI,
    Refresh,
    Profile {
        field: ProfileField,
        value: String,
    },
    ChangePassword {
        current: String,
        new: String,
    },
    ResetPassword(String),
    History,
    ClearHistory,
    Save(String),
    Unsave(String),
    Saved,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Username,
    Email,
    Theme,
}

/// Changes to the active filters; `None` keeps the current setting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChange {
    pub reset: bool,
    pub part_of_speech: Option<Vec<PartOfSpeech>>,
    pub has_audio: Option<bool>,
    pub has_example: Option<bool>,
}

impl FilterChange {
    pub fn apply_to(self, current: &SearchFilters) -> SearchFilters {
        let base = if self.reset {
            SearchFilters::default()
        } else {
            current.clone()
        };
        SearchFilters {
            part_of_speech: self.part_of_speech.unwrap_or(base.part_of_speech),
            has_audio: self.has_audio.unwrap_or(base.has_audio),
            has_example: self.has_example.unwrap_or(base.has_example),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command {0}.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid argument '{0}'.")]
    InvalidArgument(String),
}

/// Parses one prompt line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut parts = line.split_ascii_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    let args = parts.collect::<Vec<&str>>();
    let rest = args.join(" ");

    let command = match &command.to_ascii_lowercase()[..] {
        "exit" | "leave" | "quit" | "e" | "q" | "l" => Command::Exit,
        "help" | "?" => Command::Help,
        "search" | "define" | "find" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("search <word>"));
            }
            Command::Search(rest)
        }
        "filter" => Command::Filter(parse_filter(&args)?),
        "suggest" => Command::Suggest(rest),
        "trending" => Command::Trending,
        "tags" => Command::Tags,
        "wotd" => Command::WordOfTheDay,
        "login" => match args[..] {
            [email, password] | [email, password, _] => Command::Login {
                email: email.to_owned(),
                password: password.to_owned(),
                remember: args.get(2).is_some_and(|flag| {
                    flag.eq_ignore_ascii_case("remember") || str_to_bool(flag) == Some(true)
                }),
            },
            _ => return Err(CommandError::Usage("login <email> <password> [remember]")),
        },
        "register" => match args[..] {
            [email, password, confirm, first, last, username] => Command::Register {
                email: email.to_owned(),
                password: password.to_owned(),
                confirm_password: confirm.to_owned(),
                first_name: first.to_owned(),
                last_name: last.to_owned(),
                username: username.to_owned(),
            },
            _ => {
                return Err(CommandError::Usage(
                    "register <email> <password> <confirm> <first> <last> <username>",
                ))
            }
        },
        "logout" => Command::Logout,
        "whoami" => Command::WhoAmI,
        "refresh" => Command::Refresh,
        "profile" => {
            const USAGE: &str = "profile <first|last|username|email|theme> <value>";
            let (Some(field), Some(_)) = (args.first(), args.get(1)) else {
                return Err(CommandError::Usage(USAGE));
            };
            let field = match &field.to_ascii_lowercase()[..] {
                "first" | "firstname" => ProfileField::FirstName,
                "last" | "lastname" => ProfileField::LastName,
                "username" => ProfileField::Username,
                "email" => ProfileField::Email,
                "theme" => ProfileField::Theme,
                _ => return Err(CommandError::Usage(USAGE)),
            };
            Command::Profile {
                field,
                value: args[1..].join(" "),
            }
        }
        "password" => match args[..] {
            [current, new] => Command::ChangePassword {
                current: current.to_owned(),
                new: new.to_owned(),
            },
            _ => return Err(CommandError::Usage("password <current> <new>")),
        },
        "reset" => match args[..] {
            [email] => Command::ResetPassword(email.to_owned()),
            _ => return Err(CommandError::Usage("reset <email>")),
        },
        "history" => match args[..] {
            [] => Command::History,
            ["clear"] => Command::ClearHistory,
            _ => return Err(CommandError::Usage("history [clear]")),
        },
        "save" | "unsave" | "remove" if rest.is_empty() => {
            return Err(CommandError::Usage("save <word> | unsave <word>"))
        }
        "save" => Command::Save(rest),
        "unsave" | "remove" => Command::Unsave(rest),
        "saved" => Command::Saved,
        "clear" => Command::Clear,
        other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}

fn parse_filter(args: &[&str]) -> Result<FilterChange, CommandError> {
    const USAGE: &str = "filter [pos=<a,b>] [audio=<on|off>] [example=<on|off>] | filter clear";
    if args.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    let mut change = FilterChange::default();
    for arg in args {
        if arg.eq_ignore_ascii_case("clear") {
            change.reset = true;
            continue;
        }
        let Some((key, value)) = arg.split_once('=') else {
            return Err(CommandError::Usage(USAGE));
        };
        let flag =
            || str_to_bool(value).ok_or_else(|| CommandError::InvalidArgument(arg.to_string()));
        match &key.to_ascii_lowercase()[..] {
            "pos" | "part" => {
                change.part_of_speech = Some(
                    value
                        .split(',')
                        .filter(|pos| !pos.trim().is_empty())
                        .map(PartOfSpeech::from)
                        .collect(),
                )
            }
            "audio" => change.has_audio = Some(flag()?),
            "example" => change.has_example = Some(flag()?),
            _ => return Err(CommandError::InvalidArgument(arg.to_string())),
        }
    }
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   \n"), Ok(None));
    }

    #[test]
    fn search_keeps_multi_word_queries() {
        assert_eq!(
            parse("define  ice   cream"),
            Ok(Some(Command::Search("ice cream".to_owned())))
        );
        assert_eq!(parse("find"), Err(CommandError::Usage("search <word>")));
    }

    #[test]
    fn exit_aliases() {
        for alias in ["exit", "quit", "q", "Q"] {
            assert_eq!(parse(alias), Ok(Some(Command::Exit)));
        }
    }

    #[test]
    fn login_accepts_remember_flag() {
        assert_eq!(
            parse("login demo@example.com password123 remember"),
            Ok(Some(Command::Login {
                email: "demo@example.com".to_owned(),
                password: "password123".to_owned(),
                remember: true,
            }))
        );
        assert!(matches!(parse("login demo@example.com"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn filters_parse_and_merge() {
        let Ok(Some(Command::Filter(change))) = parse("filter pos=noun,Verb audio=on") else {
            panic!("expected a filter command");
        };
        let current = SearchFilters {
            has_example: true,
            ..Default::default()
        };
        let merged = change.apply_to(&current);
        assert_eq!(merged.part_of_speech, vec![PartOfSpeech::Noun, PartOfSpeech::Verb]);
        assert!(merged.has_audio);
        assert!(merged.has_example);
    }

    #[test]
    fn filter_clear_resets() {
        let Ok(Some(Command::Filter(change))) = parse("filter clear") else {
            panic!("expected a filter command");
        };
        let current = SearchFilters {
            has_audio: true,
            ..Default::default()
        };
        assert_eq!(change.apply_to(&current), SearchFilters::default());
    }

    #[test]
    fn bad_filter_values_are_reported() {
        assert_eq!(
            parse("filter audio=loud"),
            Err(CommandError::InvalidArgument("audio=loud".to_owned()))
        );
        assert!(matches!(parse("filter"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn profile_and_history() {
        assert_eq!(
            parse("profile theme light"),
            Ok(Some(Command::Profile {
                field: ProfileField::Theme,
                value: "light".to_owned(),
            }))
        );
        assert_eq!(parse("history clear"), Ok(Some(Command::ClearHistory)));
        assert_eq!(
            parse("reset demo@example.com"),
            Ok(Some(Command::ResetPassword("demo@example.com".to_owned())))
        );
        assert!(matches!(parse("password only-one"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("profile nickname x"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn unknown_commands_are_named() {
        assert_eq!(
            parse("practice"),
            Err(CommandError::Unknown("practice".to_owned()))
        );
    }
}
