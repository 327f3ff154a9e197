//! HTTP pull/push against the cloud snapshot host.

use std::time::Duration;

use retro_shelf_catalog::Snapshot;

use crate::error::SyncError;
use crate::link::{is_github_host, to_direct_link};

const READ_PROXY: &str = "https://api.allorigins.win/raw";
const GIST_API: &str = "https://api.github.com/gists";
const USER_AGENT: &str = concat!("retro-shelf/", env!("CARGO_PKG_VERSION"));

/// Maximum characters of response body quoted in JSON error diagnostics.
const PREVIEW_LEN: usize = 50;

/// HTTP client for cloud snapshot pull/push.
pub struct SyncClient {
    http: reqwest::Client,
}

impl SyncClient {
    pub fn new() -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch and parse the remote snapshot.
    ///
    /// The share link is normalized first. GitHub hosts are fetched
    /// directly with a cache-busting query parameter (raw URLs are served
    /// behind a CDN that caches aggressively); other hosts go through the
    /// read proxy to sidestep cross-origin and redirect quirks.
    pub async fn pull(&self, url: &str) -> Result<Snapshot, SyncError> {
        let direct = to_direct_link(url);

        let fetch_url = if is_github_host(&direct) {
            cache_busted(&direct)
        } else {
            let proxied = reqwest::Url::parse_with_params(READ_PROXY, &[("url", direct.as_str())])
                .map_err(|e| SyncError::Config(format!("bad proxy URL: {e}")))?;
            proxied.to_string()
        };

        log::debug!("pulling snapshot: {url} -> {fetch_url}");

        let resp = self.http.get(&fetch_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                message: "failed to reach the cloud host".to_string(),
            });
        }

        let body = resp.text().await?;
        parse_snapshot_body(&body, &direct)
    }

    /// Replace the named file of a gist with the serialized snapshot.
    pub async fn push(
        &self,
        token: &str,
        gist_id: &str,
        filename: &str,
        snapshot: &Snapshot,
    ) -> Result<(), SyncError> {
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SyncError::Config(format!("failed to serialize snapshot: {e}")))?;

        let body = serde_json::json!({
            "files": { filename: { "content": content } }
        });

        log::debug!(
            "pushing snapshot ({} records) to gist {gist_id}",
            snapshot.record_count()
        );

        let resp = self
            .http
            .patch(format!("{GIST_API}/{gist_id}"))
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or(text);
            return Err(SyncError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Sanitize and parse a pulled body into a snapshot.
///
/// Copy-pasted gist content occasionally carries stray control characters
/// that break `serde_json`; those are stripped before parsing. HTML bodies
/// mean the host served an error page, which gets its own error so the
/// user isn't shown a JSON syntax error for a provider outage.
pub fn parse_snapshot_body(body: &str, url: &str) -> Result<Snapshot, SyncError> {
    if body.is_empty() {
        return Err(SyncError::EmptyBody {
            url: url.to_string(),
        });
    }

    let cleaned = strip_control_chars(body);
    let trimmed = cleaned.trim();

    if trimmed.is_empty() {
        return Err(SyncError::EmptyBody {
            url: url.to_string(),
        });
    }

    let lowered = trimmed.chars().take(15).collect::<String>().to_lowercase();
    if lowered.starts_with("<!doctype") || lowered.starts_with("<html") {
        return Err(SyncError::HtmlBody {
            url: url.to_string(),
        });
    }

    serde_json::from_str(trimmed).map_err(|e| SyncError::Json {
        message: e.to_string(),
        preview: preview(trimmed),
    })
}

/// Remove ASCII control characters except the JSON-legal whitespace set.
fn strip_control_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\r' || c == '\t')
        .collect()
}

fn preview(s: &str) -> String {
    s.chars()
        .take(PREVIEW_LEN)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn cache_busted(url: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}t={}", chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_clean_snapshot_body() {
        let body = r#"{"version":"1","timestamp":"2024-01-01T00:00:00Z","games":[{"title":"Rez"}],"consoles":[],"platforms":[]}"#;
        let snap = parse_snapshot_body(body, "u").unwrap();
        assert_eq!(snap.games.len(), 1);
        assert_eq!(snap.games[0].title, "Rez");
    }

    #[test]
    fn strips_control_characters_before_parsing() {
        let body = "\u{0}{\"games\":[{\"title\":\"Rez\"}]}\u{1f}";
        let snap = parse_snapshot_body(body, "u").unwrap();
        assert_eq!(snap.games.len(), 1);
    }

    #[test]
    fn empty_body_is_classified() {
        assert!(matches!(
            parse_snapshot_body("", "u"),
            Err(SyncError::EmptyBody { .. })
        ));
        assert!(matches!(
            parse_snapshot_body("   \n", "u"),
            Err(SyncError::EmptyBody { .. })
        ));
    }

    #[test]
    fn html_body_is_classified() {
        assert!(matches!(
            parse_snapshot_body("<!DOCTYPE html><html>503</html>", "u"),
            Err(SyncError::HtmlBody { .. })
        ));
        assert!(matches!(
            parse_snapshot_body("<HTML><body>oops</body>", "u"),
            Err(SyncError::HtmlBody { .. })
        ));
    }

    #[test]
    fn json_errors_carry_a_preview() {
        let err = parse_snapshot_body("{\"games\": [truncated", "u").unwrap_err();
        match err {
            SyncError::Json { preview, .. } => assert!(preview.starts_with("{\"games\"")),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn cache_buster_respects_existing_query() {
        assert!(cache_busted("https://x/y").contains("?t="));
        assert!(cache_busted("https://x/y?a=1").contains("&t="));
    }
}
