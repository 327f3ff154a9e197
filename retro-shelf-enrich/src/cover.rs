//! Cover art fetching.
//!
//! Cover hosts rarely cooperate: some block hotlinking, some lack CORS
//! headers, some sit behind flaky CDNs. The fetch is an ordered list of
//! strategies, direct first and then each public relay proxy, tried in
//! sequence until one yields bytes. The winning payload is embedded as a
//! `data:` URI so the stored record has no external dependency.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;

/// Cap on cover candidates returned by a title search.
pub const MAX_COVER_RESULTS: usize = 12;

/// A way of reaching the cover URL. Strategies share one signature so the
/// caller can walk the chain uniformly.
pub struct FetchStrategy {
    pub name: &'static str,
    build: fn(&str) -> String,
}

impl FetchStrategy {
    pub fn request_url(&self, target: &str) -> String {
        (self.build)(target)
    }
}

/// The fallback chain, in trial order.
pub const STRATEGIES: &[FetchStrategy] = &[
    FetchStrategy {
        name: "direct",
        build: |u| u.to_string(),
    },
    FetchStrategy {
        name: "corsproxy.io",
        build: |u| format!("https://corsproxy.io/?{}", percent_encode(u)),
    },
    FetchStrategy {
        name: "allorigins",
        build: |u| format!("https://api.allorigins.win/raw?url={}", percent_encode(u)),
    },
    FetchStrategy {
        name: "deno image proxy",
        build: |u| format!("https://image-proxy.deno.dev/fetch/{u}"),
    },
];

/// Embed raw image bytes as a `data:<mime>;base64,...` string.
///
/// `declared_mime` comes from the Content-Type header when the host sent a
/// usable one; otherwise the magic bytes decide, defaulting to JPEG.
pub fn to_data_uri(bytes: &[u8], declared_mime: Option<&str>) -> String {
    let mime = declared_mime
        .filter(|m| m.starts_with("image/"))
        .map(str::to_string)
        .unwrap_or_else(|| sniff_mime(bytes).to_string());
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

/// Extract cover candidate URLs from a Bing image search result page.
///
/// The result markup links every thumbnail to its source image through a
/// `mediaurl=` query parameter; those are the only stable handle the page
/// offers. Hits are percent-decoded, deduplicated, filtered to http(s)
/// URLs, and capped at [`MAX_COVER_RESULTS`].
pub fn parse_cover_results(html: &str) -> Vec<String> {
    let re = Regex::new(r"mediaurl=([^&]+)").expect("static pattern");

    let mut results: Vec<String> = Vec::new();
    for caps in re.captures_iter(html) {
        let decoded = percent_decode(&caps[1]);
        if !decoded.starts_with("http") || results.contains(&decoded) {
            continue;
        }
        results.push(decoded);
        if results.len() >= MAX_COVER_RESULTS {
            break;
        }
    }
    results
}

/// Minimal `encodeURIComponent`-style escaping for URLs passed as proxy
/// query values.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Inverse of [`percent_encode`], tolerant of malformed escapes. Invalid
/// `%` sequences pass through verbatim.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_starts_direct_and_ends_with_proxies() {
        assert_eq!(STRATEGIES[0].name, "direct");
        assert_eq!(
            STRATEGIES[0].request_url("https://x.net/a.png"),
            "https://x.net/a.png"
        );
        assert_eq!(
            STRATEGIES[1].request_url("https://x.net/a b.png"),
            "https://corsproxy.io/?https%3A%2F%2Fx.net%2Fa%20b.png"
        );
        assert!(STRATEGIES[2].request_url("https://x.net/a.png").contains("allorigins"));
    }

    #[test]
    fn data_uri_uses_declared_mime_when_sane() {
        let uri = to_data_uri(&[1, 2, 3], Some("image/png"));
        assert!(uri.starts_with("data:image/png;base64,"));
        // text/html from a proxy error page is not a cover
        let uri = to_data_uri(&[0xFF, 0xD8, 0xFF], Some("text/html"));
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn cover_results_are_decoded_deduped_and_filtered() {
        let html = concat!(
            "<a href=\"/images/search?view=detailV2&mediaurl=https%3A%2F%2Fcdn.example%2Fsonic%20box.jpg&id=1\">",
            "<a href=\"/images/search?view=detailV2&mediaurl=https%3A%2F%2Fcdn.example%2Fsonic%20box.jpg&id=2\">",
            "<a href=\"/images/search?view=detailV2&mediaurl=javascript%3Avoid(0)&id=3\">",
            "<a href=\"/images/search?view=detailV2&mediaurl=http%3A%2F%2Fother.example%2Fcover.png&id=4\">",
        );
        let results = parse_cover_results(html);
        assert_eq!(
            results,
            vec![
                "https://cdn.example/sonic box.jpg".to_string(),
                "http://other.example/cover.png".to_string(),
            ]
        );
    }

    #[test]
    fn cover_results_are_capped() {
        let html: String = (0..20)
            .map(|n| format!("mediaurl=https%3A%2F%2Fcdn.example%2F{n}.jpg&"))
            .collect();
        assert_eq!(parse_cover_results(&html).len(), MAX_COVER_RESULTS);
    }

    #[test]
    fn no_hits_yield_an_empty_list() {
        assert!(parse_cover_results("<html><body>no results</body></html>").is_empty());
    }

    #[test]
    fn data_uri_sniffs_magic_bytes() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A];
        assert!(to_data_uri(&png, None).starts_with("data:image/png;"));
        let gif = *b"GIF89a";
        assert!(to_data_uri(&gif, None).starts_with("data:image/gif;"));
    }
}
