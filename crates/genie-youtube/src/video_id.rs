use reqwest::Url;

/// Path prefixes that carry the id as the following segment.
const ID_PATH_PREFIXES: &[&str] = &["shorts", "embed", "live", "v"];

/// Resolve a video id from a bare id or any common `YouTube` URL form.
///
/// Accepts `watch?v=<id>` (extra query params ignored), `youtu.be/<id>`,
/// `/shorts/<id>`, `/embed/<id>` and `/live/<id>`. Returns `None` when no
/// plausible id is present.
#[must_use]
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if is_plausible_id(input) {
        return Some(input.to_string());
    }

    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };
    let url = Url::parse(&with_scheme).ok()?;

    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        return Some(v.into_owned()).filter(|v| is_plausible_id(v));
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let host = url.host_str().unwrap_or_default();
    let candidate = if host.ends_with("youtu.be") {
        segments.next()
    } else {
        let first = segments.next()?;
        if ID_PATH_PREFIXES.contains(&first) {
            segments.next()
        } else {
            None
        }
    };

    candidate
        .filter(|c| is_plausible_id(c))
        .map(str::to_string)
}

fn is_plausible_id(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 64
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
