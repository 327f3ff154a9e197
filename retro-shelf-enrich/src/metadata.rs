//! Wikipedia metadata lookup.
//!
//! Searches the MediaWiki API for `"<title> video game"`, scores the top
//! candidates to pick the page most likely to be the right game, then
//! extracts year / developer / genre / description from the page extract
//! and lead-section wikitext. This is a heuristic guesser: results are
//! approximate and callers must treat them as suggestions, not truth.

use regex::Regex;
use serde::Deserialize;

/// Cap on how many search hits are scored.
pub const MAX_CANDIDATES: usize = 10;

/// Best score below this falls back to the search engine's own first hit.
pub const FALLBACK_THRESHOLD: i32 = -50;

const GAMING_KEYWORDS: &[&str] = &[
    "video game",
    "game",
    "series",
    "console",
    "developed",
    "software",
];

const KNOWN_GENRES: &[&str] = &[
    "platform",
    "role-playing",
    "action",
    "adventure",
    "racing",
    "sports",
    "fighting",
    "shooter",
    "strategy",
    "puzzle",
    "rpg",
    "fps",
];

/// Extracted metadata, any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameMetadata {
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub developer: Option<String>,
    pub description: Option<String>,
}

impl GameMetadata {
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.genre.is_none()
            && self.developer.is_none()
            && self.description.is_none()
    }
}

// ---------------------------------------------------------------------------
// MediaWiki response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub pageid: u64,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    pub query: Option<ContentQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentQuery {
    #[serde(default)]
    pub pages: std::collections::HashMap<String, ContentPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentPage {
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Revision {
    #[serde(rename = "*", default)]
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Candidate scoring
// ---------------------------------------------------------------------------

/// Score one search hit against the queried title.
///
/// The weights favor exact titles and `(video game)` disambiguation pages,
/// punish hits missing most of the query words, and punish numeric-token
/// disagreement hard so "Game 3" never picks the "Game 2" article.
pub fn score_candidate(query_title: &str, candidate_title: &str, snippet: &str) -> i32 {
    let query_lower = query_title.to_lowercase();
    let title_lower = candidate_title.to_lowercase();
    let snippet_lower = strip_markup(snippet).to_lowercase();
    let mut score = 0;

    // Exact or partial title match
    if title_lower == query_lower {
        score += 100;
    } else if title_lower.contains(&query_lower) {
        score += 40;
    }

    // Significant word overlap
    let query_words: Vec<&str> = query_lower
        .split_whitespace()
        .filter(|w| w.len() > 1)
        .collect();
    if !query_words.is_empty() {
        let matched = query_words
            .iter()
            .filter(|w| title_lower.contains(*w) || snippet_lower.contains(*w))
            .count();
        let ratio = matched as f64 / query_words.len() as f64;
        if ratio >= 1.0 {
            score += 50;
        } else if ratio < 0.5 {
            score -= 100;
        }
    }

    // Gaming context
    if GAMING_KEYWORDS
        .iter()
        .any(|k| snippet_lower.contains(k) || title_lower.contains(k))
    {
        score += 20;
    }
    if title_lower.contains("(video game)") {
        score += 50;
    }

    // Numeric-token agreement, the sequel disambiguator
    let query_numbers = number_tokens(&query_lower);
    if !query_numbers.is_empty() {
        let candidate_text = format!("{title_lower} {snippet_lower}");
        let candidate_numbers = number_tokens(&candidate_text);

        let all_match = query_numbers
            .iter()
            .all(|n| candidate_numbers.contains(n));
        let any_mismatch = candidate_numbers.iter().any(|n| {
            !query_numbers.contains(n)
                && n.len() > 1
                && !query_numbers.iter().any(|qn| n.contains(qn.as_str()))
        });

        if all_match {
            score += 60;
        }
        if any_mismatch && !all_match {
            score -= 120;
        }
    }

    score
}

/// Pick the best-scoring hit from the first [`MAX_CANDIDATES`] results.
///
/// Falls back to the first result when every score is below
/// [`FALLBACK_THRESHOLD`]; the caller shows the result for the user to
/// judge.
pub fn pick_best<'a>(query_title: &str, hits: &'a [SearchHit]) -> Option<&'a SearchHit> {
    let first = hits.first()?;

    let mut best: Option<&SearchHit> = None;
    let mut best_score = i32::MIN;
    for hit in hits.iter().take(MAX_CANDIDATES) {
        let score = score_candidate(query_title, &hit.title, &hit.snippet);
        log::debug!("scored candidate '{}': {}", hit.title, score);
        if score > best_score {
            best_score = score;
            best = Some(hit);
        }
    }

    if best_score < FALLBACK_THRESHOLD {
        Some(first)
    } else {
        best
    }
}

// ---------------------------------------------------------------------------
// Article parsing
// ---------------------------------------------------------------------------

/// Pull year / developer / genre / description out of a page extract and
/// its lead wikitext. Infobox fields refine what the prose suggested.
pub fn parse_article(extract: &str, wikitext: &str) -> GameMetadata {
    let mut data = GameMetadata::default();

    if !extract.is_empty() {
        data.description = Some(truncate_chars(extract, 300));
    }

    let year_re = Regex::new(r"\b(19|20)\d{2}\b").expect("static pattern");
    if let Some(m) = year_re.find(extract) {
        data.year = m.as_str().parse().ok();
    }

    let dev_re = Regex::new(r"(?i)developed by ([^,.]+)").expect("static pattern");
    let dev_alt_re = Regex::new(r"(?i)developer ([^,.]+)").expect("static pattern");
    if let Some(caps) = dev_re.captures(extract).or_else(|| dev_alt_re.captures(extract)) {
        data.developer = Some(caps[1].trim().to_string());
    }

    let extract_lower = extract.to_lowercase();
    for genre in KNOWN_GENRES {
        if extract_lower.contains(genre) {
            data.genre = Some(capitalize(genre));
            break;
        }
    }

    if !wikitext.is_empty() {
        let released_re = Regex::new(r"(?i)released\s*=\s*[^\n]*?((?:19|20)\d{2})").expect("static pattern");
        if let Some(caps) = released_re.captures(wikitext) {
            data.year = caps[1].parse().ok();
        }

        let infobox_dev_re = Regex::new(r"(?i)developer\s*=\s*\[?\[?([^|\]\n]+)").expect("static pattern");
        if data.developer.is_none() {
            if let Some(caps) = infobox_dev_re.captures(wikitext) {
                data.developer = Some(caps[1].trim().to_string());
            }
        }

        let infobox_genre_re = Regex::new(r"(?i)genre\s*=\s*\[?\[?([^|\]\n]+)").expect("static pattern");
        if let Some(caps) = infobox_genre_re.captures(wikitext) {
            // The prose-derived "Action" guess is weak; the infobox wins
            if data.genre.is_none() || data.genre.as_deref() == Some("Action") {
                data.genre = Some(caps[1].trim().to_string());
            }
        }
    }

    data.developer = data.developer.map(|d| clean_wiki_value(&d));
    data.genre = data.genre.map(|g| clean_wiki_value(&g));
    data
}

/// Drop wiki link brackets and piped display text.
fn clean_wiki_value(value: &str) -> String {
    value
        .replace("[[", "")
        .replace("]]", "")
        .split('|')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn number_tokens(text: &str) -> Vec<String> {
    let re = Regex::new(r"\b\d+\b").expect("static pattern");
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Remove the search-match highlighting tags the API embeds in snippets.
fn strip_markup(snippet: &str) -> String {
    let re = Regex::new(r"<[^>]+>").expect("static pattern");
    re.replace_all(snippet, "").into_owned()
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
