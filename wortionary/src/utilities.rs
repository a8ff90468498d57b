use std::io::{self, Write};

/// Prompts and reads one line; `None` once stdin is closed.
pub fn input(prompt: &str) -> io::Result<Option<String>> {
    let mut line = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn str_to_bool(str: &str) -> Option<bool> {
    match &str.trim().to_ascii_lowercase()[..] {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" => Some(true),
        "n" | "no" | "nope" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_to_bool_understands_common_answers() {
        assert_eq!(str_to_bool(" Yes\n"), Some(true));
        assert_eq!(str_to_bool("ON"), Some(true));
        assert_eq!(str_to_bool("nope"), Some(false));
        assert_eq!(str_to_bool("maybe"), None);
    }
}
