//! Extracts user mentions from the text following the slash command.

use once_cell::sync::Lazy;
use regex::Regex;

/// Most users a single invocation accepts.
pub const MAX_USERS: usize = 2;

/// What the handler should do with the parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedArgs {
    /// Zero or more than [`MAX_USERS`] mentions.
    Usage { found: usize },
    Single(String),
    Pair(String, String),
}

/// Returns the user ID carried by a mention token, if the token is one.
///
/// Accepts `<@U123ABC>` and the escaped form `<@U123ABC|alice>` that Slack
/// sends when the command has user escaping enabled.
#[must_use]
pub fn mention_user_id(token: &str) -> Option<&str> {
    static MENTION_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^<@([A-Z0-9]+)(?:\|[^>]*)?>$").expect("static regex compile"));

    MENTION_RE
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// User IDs mentioned in `text`, in order of appearance.
///
/// Tokens are split on whitespace. Tokens that are not mentions are dropped.
/// Repeated mentions are kept.
#[must_use]
pub fn extract_user_ids(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(mention_user_id)
        .map(str::to_string)
        .collect()
}

/// Classifies the command text into one of the three branches.
#[must_use]
pub fn parse_args(text: &str) -> ParsedArgs {
    let mut ids = extract_user_ids(text);
    match ids.len() {
        1 => ParsedArgs::Single(ids.remove(0)),
        2 => {
            let second = ids.remove(1);
            let first = ids.remove(0);
            ParsedArgs::Pair(first, second)
        }
        found => ParsedArgs::Usage { found },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_forms() {
        assert_eq!(mention_user_id("<@U111>"), Some("U111"));
        assert_eq!(mention_user_id("<@W0AB12|alice>"), Some("W0AB12"));
        assert_eq!(mention_user_id("<@u111>"), None);
        assert_eq!(mention_user_id("@alice"), None);
        assert_eq!(mention_user_id("<#C111|general>"), None);
        assert_eq!(mention_user_id("x<@U111>"), None);
    }

    #[test]
    fn non_mentions_are_skipped() {
        assert_eq!(
            extract_user_ids("compare <@U111>  and\t<@U222> please"),
            vec!["U111".to_string(), "U222".to_string()]
        );
    }
}
