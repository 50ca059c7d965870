//! Converts a [`FormattedReport`] into Slack presentation formats.
//!
//! Two renderers are provided: [`MrkdwnRenderer`] for a single text body and
//! [`BlockKitRenderer`] for Block Kit sections. Both use the same wording.

use serde_json::{Value, json};

use crate::command::report::{ComparisonReport, FormattedReport, SingleUserReport};
use crate::core::models::Channel;

/// Slack's limit on the text of a single section block.
pub const SECTION_TEXT_LIMIT: usize = 3000;

/// Slack's limit on blocks in one message.
pub const MAX_BLOCKS: usize = 50;

/// A message ready to post: mrkdwn text plus optional blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub text: String,
    pub blocks: Option<Value>,
}

pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &FormattedReport) -> RenderedMessage;
}

/// `<#C123|general>`
#[must_use]
pub fn channel_link(channel: &Channel) -> String {
    format!("<#{}|{}>", channel.id, channel.name)
}

#[must_use]
pub fn usage_text(command: &str) -> String {
    format!(
        "Usage: `{command} @user` to list a user's channels, or `{command} @user1 @user2` to compare two users' channels."
    )
}

/// One titled, itemized list in a report.
struct Section {
    title: String,
    lines: Vec<String>,
    placeholder: String,
}

impl Section {
    fn new(title: String, channels: &[Channel], placeholder: String) -> Self {
        Self {
            title,
            lines: channels.iter().map(|c| format!("• {}", channel_link(c))).collect(),
            placeholder,
        }
    }

    fn body_lines(&self) -> Vec<String> {
        if self.lines.is_empty() {
            vec![format!("_{}_", self.placeholder)]
        } else {
            self.lines.clone()
        }
    }
}

/// Layout shared by both renderers: a header, summary lines, then sections.
struct Layout {
    header: String,
    summary: Vec<String>,
    sections: Vec<Section>,
}

fn single_user_layout(report: &SingleUserReport) -> Layout {
    let name = &report.user.display_name;
    Layout {
        header: format!("Channels for {name}"),
        summary: vec![format!("Total Channels: {}", report.total())],
        sections: vec![Section::new(
            "Channels".to_string(),
            &report.channels,
            format!("{name} is not a member of any channels."),
        )],
    }
}

fn comparison_layout(report: &ComparisonReport) -> Layout {
    let first = &report.first.display_name;
    let second = &report.second.display_name;
    let cmp = &report.comparison;
    Layout {
        header: format!("Channel comparison: {first} and {second}"),
        summary: vec![
            format!("*{first}:* {} channels", report.first_total),
            format!("*{second}:* {} channels", report.second_total),
            format!("*Shared:* {}", cmp.shared.len()),
            format!("*Only {first}:* {}", cmp.unique_to_first.len()),
            format!("*Only {second}:* {}", cmp.unique_to_second.len()),
        ],
        sections: vec![
            Section::new(
                format!("Shared channels ({})", cmp.shared.len()),
                &cmp.shared,
                format!("{first} and {second} share no channels."),
            ),
            Section::new(
                format!("Only {first} ({})", cmp.unique_to_first.len()),
                &cmp.unique_to_first,
                format!("No channels unique to {first}."),
            ),
            Section::new(
                format!("Only {second} ({})", cmp.unique_to_second.len()),
                &cmp.unique_to_second,
                format!("No channels unique to {second}."),
            ),
        ],
    }
}

fn layout(report: &FormattedReport) -> Option<Layout> {
    match report {
        FormattedReport::SingleUser(r) => Some(single_user_layout(r)),
        FormattedReport::Comparison(r) => Some(comparison_layout(r)),
        FormattedReport::Usage { .. } | FormattedReport::Failure { .. } => None,
    }
}

fn plain_text(report: &FormattedReport) -> String {
    match report {
        FormattedReport::Usage { command } => usage_text(command),
        FormattedReport::Failure { message } => message.clone(),
        _ => String::new(),
    }
}

/// Renders the whole report as one mrkdwn body.
#[derive(Debug, Clone, Copy, Default)]
pub struct MrkdwnRenderer;

impl ReportRenderer for MrkdwnRenderer {
    fn render(&self, report: &FormattedReport) -> RenderedMessage {
        let Some(layout) = layout(report) else {
            return RenderedMessage {
                text: plain_text(report),
                blocks: None,
            };
        };

        let mut out: Vec<String> = vec![format!("*{}*", layout.header)];
        out.extend(layout.summary);
        for section in &layout.sections {
            out.push(String::new());
            out.push(format!("*{}*", section.title));
            out.extend(section.body_lines());
        }

        RenderedMessage {
            text: out.join("\n"),
            blocks: None,
        }
    }
}

/// Renders Block Kit blocks with the mrkdwn body as notification fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockKitRenderer;

impl BlockKitRenderer {
    fn section(text: &str) -> Value {
        json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": text }
        })
    }

    /// Packs lines into chunks that each fit one section block.
    fn chunk_lines(lines: &[String]) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();
        for line in lines {
            if !current.is_empty() && current.len() + 1 + line.len() > SECTION_TEXT_LIMIT {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }

    fn blocks(layout: &Layout) -> Value {
        let mut blocks: Vec<Value> = vec![
            json!({
                "type": "header",
                "text": { "type": "plain_text", "text": layout.header, "emoji": true }
            }),
            Self::section(&layout.summary.join("\n")),
        ];

        // Every later section needs a divider, a title and at least one body
        // block, so that much room is held back while filling this one.
        let later_sections = |idx: usize| layout.sections.len() - idx - 1;
        for (idx, section) in layout.sections.iter().enumerate() {
            blocks.push(json!({ "type": "divider" }));
            blocks.push(Self::section(&format!("*{}*", section.title)));

            let body = section.body_lines();
            let chunks = Self::chunk_lines(&body);
            let budget = MAX_BLOCKS
                .saturating_sub(blocks.len())
                .saturating_sub(3 * later_sections(idx))
                .saturating_sub(1);

            if chunks.len() <= budget + 1 {
                blocks.extend(chunks.iter().map(|c| Self::section(c)));
                continue;
            }

            let kept = &chunks[..budget];
            let shown_lines: usize = kept.iter().map(|c| c.lines().count()).sum();
            blocks.extend(kept.iter().map(|c| Self::section(c)));
            blocks.push(json!({
                "type": "context",
                "elements": [{
                    "type": "mrkdwn",
                    "text": format!("…and {} more", body.len() - shown_lines)
                }]
            }));
        }

        Value::Array(blocks)
    }
}

impl ReportRenderer for BlockKitRenderer {
    fn render(&self, report: &FormattedReport) -> RenderedMessage {
        let text = MrkdwnRenderer.render(report).text;
        let blocks = layout(report).map(|l| Self::blocks(&l));
        RenderedMessage { text, blocks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::UserProfile;

    fn user(name: &str) -> UserProfile {
        UserProfile {
            id: format!("U{name}"),
            display_name: name.to_string(),
        }
    }

    fn many_channels(n: usize) -> Vec<Channel> {
        (0..n)
            .map(|i| Channel::new(format!("C{i:06}"), format!("channel-with-a-long-name-{i}")))
            .collect()
    }

    #[test]
    fn chunks_respect_section_limit() {
        let lines: Vec<String> = (0..500).map(|i| format!("• line number {i}")).collect();
        let chunks = BlockKitRenderer::chunk_lines(&lines);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= SECTION_TEXT_LIMIT));
        let total: usize = chunks.iter().map(|c| c.lines().count()).sum();
        assert_eq!(total, 500);
    }

    #[test]
    fn huge_report_stays_under_block_limit() {
        let report = FormattedReport::SingleUser(SingleUserReport {
            user: user("Alice"),
            channels: many_channels(5000),
        });
        let rendered = BlockKitRenderer.render(&report);
        let blocks = rendered.blocks.unwrap();
        let blocks = blocks.as_array().unwrap();

        assert!(blocks.len() <= MAX_BLOCKS);
        let last = blocks.last().unwrap();
        assert_eq!(last["type"], "context");
        assert!(last["elements"][0]["text"].as_str().unwrap().contains("more"));
    }

    #[test]
    fn usage_and_failure_have_no_blocks() {
        let usage = BlockKitRenderer.render(&FormattedReport::Usage {
            command: "/channels".into(),
        });
        assert!(usage.blocks.is_none());
        assert!(usage.text.contains("/channels @user1 @user2"));
    }
}
