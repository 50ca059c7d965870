use chanlist::command::parser::{ParsedArgs, extract_user_ids, parse_args};
use chanlist::slack::command_parser::{decode_url_component, parse_form_data};

#[test]
fn test_decode_url_component() {
    assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
    assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
    assert_eq!(
        decode_url_component("test%40example.com%26param%3Dvalue").unwrap(),
        "test@example.com&param=value"
    );
    assert!(decode_url_component("%FF%FE").is_err());
}

#[test]
fn test_parse_form_data_with_mentions() {
    let form_data = "token=abc123&team_id=T123&team_domain=example&\
                    channel_id=C123&channel_name=general&user_id=U123&\
                    user_name=username&command=%2Fchannels&\
                    text=%3C%40U111%7Calice%3E+%3C%40U222%7Cbob%3E&\
                    response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2F1&\
                    trigger_id=123.456&command_ts=1609753200";

    let cmd = parse_form_data(form_data).unwrap();

    assert_eq!(cmd.team_id, "T123");
    assert_eq!(cmd.channel_id, "C123");
    assert_eq!(cmd.user_id, "U123");
    assert_eq!(cmd.command, "/channels");
    assert_eq!(cmd.text, "<@U111|alice> <@U222|bob>");
    assert_eq!(cmd.response_url, "https://hooks.slack.com/commands/1");
    assert_eq!(extract_user_ids(&cmd.text), vec!["U111", "U222"]);
}

#[test]
fn test_parse_form_data_missing_fields() {
    let cmd = parse_form_data("team_id=T123").unwrap();

    assert_eq!(cmd.team_id, "T123");
    assert_eq!(cmd.command, "");
    assert_eq!(cmd.text, "");
    assert_eq!(cmd.response_url, "");
}

#[test]
fn test_parse_args_branches() {
    assert_eq!(parse_args(""), ParsedArgs::Usage { found: 0 });
    assert_eq!(parse_args("   \t "), ParsedArgs::Usage { found: 0 });
    assert_eq!(parse_args("<@U111>"), ParsedArgs::Single("U111".to_string()));
    assert_eq!(
        parse_args("<@U111> <@U222>"),
        ParsedArgs::Pair("U111".to_string(), "U222".to_string())
    );
    assert_eq!(
        parse_args("<@U111> <@U222> <@U333>"),
        ParsedArgs::Usage { found: 3 }
    );
}

#[test]
fn test_invalid_tokens_do_not_count() {
    assert_eq!(
        parse_args("<@U111> @bob <@lower> <#C1|general>"),
        ParsedArgs::Single("U111".to_string())
    );
}

#[test]
fn test_repeated_mentions_are_kept() {
    assert_eq!(
        parse_args("<@U111> <@U111>"),
        ParsedArgs::Pair("U111".to_string(), "U111".to_string())
    );
}
