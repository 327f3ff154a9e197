//! Share-link normalization.
//!
//! Users paste whatever URL their cloud provider hands them; these helpers
//! rewrite the known shapes into directly fetchable raw URLs. Unrecognized
//! URLs pass through unchanged.

/// Rewrite a share link to a direct-download URL.
///
/// Recognized shapes:
/// - Google Drive `/file/d/<id>/view` or `?id=<id>` → `uc?export=download`
/// - GitHub Gist `gist.github.com/user/<id>` → `gist.githubusercontent.com/user/<id>/raw`
/// - GitHub repo `/blob/` links → `raw.githubusercontent.com`
pub fn to_direct_link(url: &str) -> String {
    let url = url.trim();

    if url.contains("google.com") {
        if let Some(id) = drive_file_id(url) {
            return format!("https://drive.google.com/uc?export=download&id={id}");
        }
    }

    if url.contains("gist.github.com") {
        // Strip an existing /raw path segment (and any revision/filename
        // after it) so it isn't duplicated. Only whole segments count; a
        // user login starting with "raw" must survive intact.
        let trimmed = url.trim_end_matches('/');
        let base = match trimmed.find("/raw/") {
            Some(pos) => &trimmed[..pos],
            None => trimmed.strip_suffix("/raw").unwrap_or(trimmed),
        };
        return format!(
            "{}/raw",
            base.replace("gist.github.com", "gist.githubusercontent.com")
        );
    }

    if url.contains("github.com") && url.contains("/blob/") {
        return url
            .replace("github.com", "raw.githubusercontent.com")
            .replace("/blob/", "/");
    }

    url.to_string()
}

/// Whether a (normalized) URL points at a GitHub-hosted file.
///
/// GitHub raw hosts serve proper CORS headers and large files, so they are
/// fetched directly; everything else goes through the read proxy.
pub fn is_github_host(url: &str) -> bool {
    url.contains("githubusercontent.com") || url.contains("github.com")
}

/// Extract the gist id from a gist share link, for the update endpoint.
pub fn gist_id_from_url(url: &str) -> Option<String> {
    if !url.contains("gist.github") {
        return None;
    }
    let path = url.split("://").last()?;
    path.split('/')
        .map(str::trim)
        .filter(|seg| !seg.is_empty() && *seg != "raw")
        .filter(|seg| !seg.contains('.'))
        .next_back()
        .filter(|seg| seg.len() >= 20 && seg.chars().all(|c| c.is_ascii_hexdigit()))
        .map(str::to_string)
}

fn drive_file_id(url: &str) -> Option<&str> {
    if let Some(pos) = url.find("/d/") {
        let rest = &url[pos + 3..];
        let end = rest.find(['/', '?', '&']).unwrap_or(rest.len());
        if end > 0 {
            return Some(&rest[..end]);
        }
    }
    if let Some(pos) = url.find("id=") {
        let rest = &url[pos + 3..];
        let end = rest.find(['&', '?', '/']).unwrap_or(rest.len());
        if end > 0 {
            return Some(&rest[..end]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_view_link_becomes_direct_download() {
        assert_eq!(
            to_direct_link("https://drive.google.com/file/d/1AbC_dEf/view?usp=sharing"),
            "https://drive.google.com/uc?export=download&id=1AbC_dEf"
        );
    }

    #[test]
    fn drive_open_id_link_becomes_direct_download() {
        assert_eq!(
            to_direct_link("https://drive.google.com/open?id=1AbC_dEf"),
            "https://drive.google.com/uc?export=download&id=1AbC_dEf"
        );
    }

    #[test]
    fn gist_link_becomes_raw() {
        assert_eq!(
            to_direct_link("https://gist.github.com/user/0123456789abcdef0123456789abcdef"),
            "https://gist.githubusercontent.com/user/0123456789abcdef0123456789abcdef/raw"
        );
    }

    #[test]
    fn gist_raw_suffix_is_not_duplicated() {
        assert_eq!(
            to_direct_link("https://gist.github.com/user/0123456789abcdef0123456789abcdef/raw"),
            "https://gist.githubusercontent.com/user/0123456789abcdef0123456789abcdef/raw"
        );
        assert_eq!(
            to_direct_link(
                "https://gist.github.com/user/0123456789abcdef0123456789abcdef/raw/ab12cd/shelf.json"
            ),
            "https://gist.githubusercontent.com/user/0123456789abcdef0123456789abcdef/raw"
        );
    }

    #[test]
    fn gist_user_named_like_raw_is_not_truncated() {
        assert_eq!(
            to_direct_link("https://gist.github.com/rawuser/0123456789abcdef0123456789abcdef"),
            "https://gist.githubusercontent.com/rawuser/0123456789abcdef0123456789abcdef/raw"
        );
    }

    #[test]
    fn repo_blob_link_becomes_raw() {
        assert_eq!(
            to_direct_link("https://github.com/user/repo/blob/main/shelf.json"),
            "https://raw.githubusercontent.com/user/repo/main/shelf.json"
        );
    }

    #[test]
    fn unrecognized_links_pass_through() {
        assert_eq!(
            to_direct_link("https://example.net/shelf.json"),
            "https://example.net/shelf.json"
        );
        assert_eq!(
            to_direct_link("https://raw.githubusercontent.com/user/repo/main/shelf.json"),
            "https://raw.githubusercontent.com/user/repo/main/shelf.json"
        );
    }

    #[test]
    fn gist_id_extraction() {
        assert_eq!(
            gist_id_from_url("https://gist.github.com/user/0123456789abcdef0123456789abcdef"),
            Some("0123456789abcdef0123456789abcdef".to_string())
        );
        assert_eq!(
            gist_id_from_url("https://gist.githubusercontent.com/user/0123456789abcdef0123456789abcdef/raw"),
            Some("0123456789abcdef0123456789abcdef".to_string())
        );
        assert_eq!(gist_id_from_url("https://example.net/shelf.json"), None);
    }
}
