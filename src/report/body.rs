use crate::http::SingleResponse;

/// Pretty-prints JSON bodies and breaks XML between adjacent tags. Anything
/// else, or any body when `pretty` is off, is returned unchanged.
#[must_use]
pub fn format_body(body: &str, pretty: bool) -> String {
    if !pretty {
        return body.to_owned();
    }
    let trimmed = body.trim();
    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed)
        && let Ok(rendered) = serde_json::to_string_pretty(&value)
    {
        return rendered;
    }
    if trimmed.starts_with('<') {
        return trimmed.replace("><", ">\n<");
    }
    body.to_owned()
}

/// Console rendering of a single request and its response.
#[must_use]
pub fn single_response_lines(response: &SingleResponse, pretty: bool) -> Vec<String> {
    let details = &response.details;
    let mut lines = vec![
        format!("{} {}", details.method, details.url),
        format!(
            "Status: {} in {:.2}ms",
            status_label(response.result.status),
            response.result.duration_ms
        ),
        format!("Sent at: {}", details.timestamp),
        format!("Auth: {}", details.auth),
        "--- Request headers ---".to_owned(),
    ];
    lines.extend(details.headers.lines().map(str::to_owned));
    if !details.body.is_empty() {
        lines.push("--- Request body ---".to_owned());
        lines.push(details.body.clone());
    }
    lines.push("--- Response body ---".to_owned());
    lines.push(format_body(&response.body, pretty));
    lines
}

fn status_label(status: u16) -> String {
    if status == 0 {
        "no response".to_owned()
    } else {
        status.to_string()
    }
}
