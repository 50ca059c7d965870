use chanlist::core::config::ResponseVisibility;
use chanlist::slack::RenderedMessage;
use chanlist::slack::response_builder::{create_ephemeral_payload, create_report_payload};
use serde_json::json;

#[test]
fn test_ephemeral_payload() {
    let payload = create_ephemeral_payload("Test ephemeral message");

    assert_eq!(payload["response_type"], "ephemeral");
    assert_eq!(payload["text"], "Test ephemeral message");
}

#[test]
fn test_report_payload_with_blocks() {
    let message = RenderedMessage {
        text: "*Channels for Alice*".to_string(),
        blocks: Some(json!([{ "type": "divider" }])),
    };

    let payload = create_report_payload(&message, ResponseVisibility::InChannel);

    assert_eq!(payload["response_type"], "in_channel");
    assert_eq!(payload["replace_original"], false);
    assert_eq!(payload["text"], "*Channels for Alice*");
    assert_eq!(payload["blocks"][0]["type"], "divider");
}

#[test]
fn test_report_payload_without_blocks() {
    let message = RenderedMessage {
        text: "Usage: `/channels @user`".to_string(),
        blocks: None,
    };

    let payload = create_report_payload(&message, ResponseVisibility::Ephemeral);

    assert_eq!(payload["response_type"], "ephemeral");
    assert!(payload.get("blocks").is_none());
}
