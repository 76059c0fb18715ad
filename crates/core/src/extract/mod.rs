//! KQL extraction from agent responses.
//!
//! Models wrap queries in markdown fences, prefix them with chatter, or return
//! escaped newlines. Extraction is best effort and never fails: whatever text
//! survives the cleanup is returned.

use regex::Regex;
use std::sync::LazyLock;

use crate::AgentOutput;

/// First fenced block, optionally tagged `kql`. Lazy body so the first closing
/// fence terminates the match.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static FENCED_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:kql)?\s*(.*?)\s*```").unwrap());

/// Opening fence marker at the start of any line.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static LEADING_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^(?:```kql|```)").unwrap());

/// Run of closing fence markers at the end of any line.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static TRAILING_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:```)+$").unwrap());

/// Literal backslash-n as emitted by models that double-escape their output.
const ESCAPED_NEWLINE: &str = "\\n";

/// Extracts a clean KQL query from any agent output shape.
#[must_use]
pub fn extract_kql(response: &AgentOutput) -> String {
    extract_kql_text(&response.text())
}

/// Extracts a clean KQL query from raw response text.
///
/// 1. The first fenced block wins, returned trimmed.
/// 2. Otherwise stray fence markers are stripped and the rest trimmed.
/// 3. Literal `\n` sequences in the fallback text become real newlines.
#[must_use]
pub fn extract_kql_text(text: &str) -> String {
    if let Some(body) = FENCED_BLOCK_REGEX.captures(text).and_then(|caps| caps.get(1)) {
        return body.as_str().trim().to_owned();
    }

    let without_leading = LEADING_FENCE_REGEX.replace_all(text, "");
    let without_trailing = TRAILING_FENCE_REGEX.replace_all(&without_leading, "");
    let cleaned = without_trailing.trim();

    if cleaned.contains(ESCAPED_NEWLINE) {
        tracing::debug!("unescaping literal newlines in agent output");
        return cleaned.replace(ESCAPED_NEWLINE, "\n").trim().to_owned();
    }
    cleaned.to_owned()
}
