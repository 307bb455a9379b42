//! Chat digest of a project classification.

use std::fmt::Write;

use gtd_clients::telegram::{escape_link_url, escape_markdown};
use gtd_clients::{Messenger, ParseMode, SendError};
use gtd_core::entities::{Empty, OverLimit};

/// Render the classification as a MarkdownV2 digest.
///
/// Each section is left out when it has no entries, so an empty result means
/// there is nothing to report. Literal text and project names are escaped;
/// the only live markup is one inline link per project.
#[must_use]
pub fn format_digest(marker_label: &str, too_many: &[OverLimit], zero: &[Empty]) -> String {
    let label = escape_markdown(marker_label);
    let mut out = String::new();

    if !too_many.is_empty() {
        let _ = writeln!(out, "projects with too many @{label} tasks:");
        for entry in too_many {
            let _ = writeln!(
                out,
                "{} \\- {}",
                entry.task_count,
                link(&entry.project_name, &entry.search_url)
            );
        }
    }

    if !zero.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "projects without @{label} tasks:");
        for entry in zero {
            let _ = writeln!(out, "{}", link(&entry.project_name, &entry.search_url));
        }
    }

    out
}

fn link(text: &str, url: &str) -> String {
    format!("[{}]({})", escape_markdown(text), escape_link_url(url))
}

/// Send a digest as MarkdownV2.
///
/// Returns `false` without sending when the digest is blank.
///
/// # Errors
///
/// Returns [`SendError`] when the message is not delivered.
pub async fn send_digest(
    messenger: &dyn Messenger,
    chat_id: i64,
    digest: &str,
) -> Result<bool, SendError> {
    if digest.trim().is_empty() {
        tracing::info!("nothing to report, digest not sent");
        return Ok(false);
    }
    messenger
        .send(chat_id, digest, Some(ParseMode::MarkdownV2))
        .await?;
    tracing::info!(chat_id, "digest sent");
    Ok(true)
}
