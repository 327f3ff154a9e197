//! HTTP client for the enrichment lookups.

use std::time::Duration;

use crate::cover::{STRATEGIES, parse_cover_results, to_data_uri};
use crate::error::EnrichError;
use crate::metadata::{
    ContentResponse, GameMetadata, SearchResponse, parse_article, pick_best,
};

const WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";
const COVER_SEARCH_URL: &str = "https://www.bing.com/images/search";
const USER_AGENT: &str = concat!("retro-shelf/", env!("CARGO_PKG_VERSION"));

/// Client for cover and metadata enrichment.
pub struct EnrichClient {
    http: reqwest::Client,
}

impl EnrichClient {
    pub fn new() -> Result<Self, EnrichError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch a cover image and embed it as a `data:` URI.
    ///
    /// Walks the strategy chain in order and returns the first success.
    /// When every strategy fails the error names the URL; the caller is
    /// expected to continue the save without a cover.
    pub async fn fetch_cover(&self, url: &str) -> Result<String, EnrichError> {
        for strategy in STRATEGIES {
            let request_url = strategy.request_url(url);
            log::debug!("cover fetch via {}: {request_url}", strategy.name);

            let resp = match self.http.get(&request_url).send().await {
                Ok(resp) if resp.status().is_success() => resp,
                Ok(resp) => {
                    log::debug!("{} answered HTTP {}", strategy.name, resp.status());
                    continue;
                }
                Err(e) => {
                    log::debug!("{} failed: {e}", strategy.name);
                    continue;
                }
            };

            let mime = resp
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());

            match resp.bytes().await {
                Ok(bytes) if !bytes.is_empty() => {
                    return Ok(to_data_uri(&bytes, mime.as_deref()));
                }
                Ok(_) => continue,
                Err(e) => {
                    log::debug!("{} body read failed: {e}", strategy.name);
                    continue;
                }
            }
        }

        Err(EnrichError::CoverUnavailable {
            url: url.to_string(),
        })
    }

    /// Search for cover art candidates by title.
    ///
    /// Runs an image search for `"<title> box art cover"` and scrapes the
    /// source-image URLs out of the result page. Returns up to
    /// [`crate::cover::MAX_COVER_RESULTS`] candidate URLs; pick one and
    /// hand it to [`EnrichClient::fetch_cover`]. An empty list means the
    /// search found nothing usable.
    pub async fn search_covers(&self, title: &str) -> Result<Vec<String>, EnrichError> {
        let query = format!("{title} box art cover");
        log::debug!("cover search: {query}");

        let resp = self
            .http
            .get(COVER_SEARCH_URL)
            .query(&[("q", query.as_str()), ("form", "HDRSC2")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EnrichError::Api(format!(
                "cover search answered HTTP {status}"
            )));
        }

        let html = resp.text().await?;
        Ok(parse_cover_results(&html))
    }

    /// Look up game metadata by title.
    ///
    /// `Ok(None)` means the search found nothing; approximate results are
    /// `Ok(Some(..))` and the caller decides what to keep.
    pub async fn fetch_metadata(&self, title: &str) -> Result<Option<GameMetadata>, EnrichError> {
        let query = format!("{title} video game");
        log::debug!("metadata search: {query}");

        let search: SearchResponse = self
            .http
            .get(WIKIPEDIA_API)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?
            .json()
            .await?;

        let hits = search.query.map(|q| q.search).unwrap_or_default();
        let Some(best) = pick_best(title, &hits) else {
            return Ok(None);
        };
        log::debug!("best candidate: {} (page {})", best.title, best.pageid);

        let pageid = best.pageid.to_string();
        let content: ContentResponse = self
            .http
            .get(WIKIPEDIA_API)
            .query(&[
                ("action", "query"),
                ("prop", "extracts|revisions"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("rvprop", "content"),
                ("rvsection", "0"),
                ("pageids", pageid.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?
            .json()
            .await?;

        let page = content
            .query
            .and_then(|mut q| q.pages.remove(&pageid))
            .ok_or_else(|| EnrichError::Api(format!("page {pageid} missing from response")))?;

        let extract = page.extract.unwrap_or_default();
        let wikitext = page
            .revisions
            .into_iter()
            .next()
            .and_then(|r| r.content)
            .unwrap_or_default();

        Ok(Some(parse_article(&extract, &wikitext)))
    }
}
