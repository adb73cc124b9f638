use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::BuildingRecord,
};

const FENCE: &str = "```";

/// Removes a surrounding Markdown code fence (and its language tag) from a model reply.
/// Replies without a leading fence are only trimmed.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = match after_open.find(FENCE) {
        Some(end) => &after_open[..end],
        None => after_open,
    };

    strip_language_tag(body).trim()
}

fn strip_language_tag(body: &str) -> &str {
    let (first_line, rest) = body.split_once('\n').unwrap_or((body, ""));
    let tag = first_line.trim();
    let is_tag = !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'));

    if is_tag {
        rest
    } else {
        // "```json{...}" on one line
        body.strip_prefix("json").unwrap_or(body)
    }
}

/// Parses a model reply into exactly one building record.
/// Any JSON object with string `id` and `name` keys is accepted; field content is
/// checked later as warnings only.
pub fn parse_building_reply(reply: &str) -> AppResult<BuildingRecord> {
    let body = strip_code_fence(reply);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("Reply is not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(AppError::MalformedResponse(
            "Reply is not a single JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        AppError::MalformedResponse(format!("Reply is not a building record: {}", e))
    })
}
