use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fields Slack sends when a user invokes a slash command.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SlashCommand {
    pub team_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

/// Decodes one `application/x-www-form-urlencoded` component.
///
/// # Examples
///
/// ```
/// use chanlist::slack::command_parser::decode_url_component;
///
/// assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("a%2Bb").unwrap(), "a+b");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {}", e))
}

/// Parses the raw body of a slash command request.
///
/// Missing fields default to empty strings.
///
/// # Examples
///
/// ```
/// use chanlist::slack::command_parser::parse_form_data;
///
/// let form_data = "team_id=T123&channel_id=C123&user_id=U123&user_name=alice&\
///                  command=%2Fchannels&text=%3C%40U111%3E&\
///                  response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2F1&\
///                  trigger_id=123.456";
///
/// let cmd = parse_form_data(form_data).unwrap();
/// assert_eq!(cmd.command, "/channels");
/// assert_eq!(cmd.text, "<@U111>");
/// ```
pub fn parse_form_data(form_data: &str) -> Result<SlashCommand, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| format!("Failed to decode key: {}", e))?;

            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| format!("Failed to decode value: {}", e))?;

            map.insert(key, value);
        }
    }

    let mut take = |key: &str| map.remove(key).unwrap_or_default();

    Ok(SlashCommand {
        team_id: take("team_id"),
        channel_id: take("channel_id"),
        user_id: take("user_id"),
        user_name: take("user_name"),
        command: take("command"),
        text: take("text"),
        response_url: take("response_url"),
        trigger_id: take("trigger_id"),
    })
}
