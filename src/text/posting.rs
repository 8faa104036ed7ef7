use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::config::{POSTING_TIMEOUT, USER_AGENT};
use crate::text::description::collapse_whitespace;

/// Blocks with less paragraph text than this are navigation, footers, etc.
const MIN_BLOCK_CHARS: usize = 400;
/// Upper bound on what we keep from a posting page.
const MAX_POSTING_CHARS: usize = 20_000;
/// API descriptions shorter than this are worth replacing with the page text.
pub const SHORT_DESCRIPTION_CHARS: usize = 500;

/// Best-effort fetcher for the full text of a job posting page
pub struct PostingFetcher {
    client: Client,
}

impl PostingFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(POSTING_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Page text of `url`, or an empty string on any failure.
    pub async fn fetch_posting_text(&self, url: &str) -> String {
        if url.trim().is_empty() || url == "#" {
            return String::new();
        }
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not fetch posting text from {}: {:#}", url, e);
                String::new()
            }
        }
    }

    /// The longer of `description` and the posting page text. Only goes to
    /// the network when the description is short.
    pub async fn best_description(&self, description: &str, url: &str) -> String {
        if description.chars().count() >= SHORT_DESCRIPTION_CHARS {
            return description.to_string();
        }
        let fetched = self.fetch_posting_text(url).await;
        if fetched.chars().count() > description.chars().count() {
            fetched
        } else {
            description.to_string()
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching posting page: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch posting page")?;

        if response.status() != StatusCode::OK {
            anyhow::bail!("Posting page returned status: {}", response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of HTML", html.len());

        let text = extract_posting_text(&html);
        info!("Extracted {} chars of posting text", text.chars().count());
        Ok(text)
    }
}

/// Pull the main body text out of a posting page.
///
/// Every `article`, `section` and `div` is scored by the paragraph text it
/// contains. The longest block over the minimum size wins. Without one, all
/// paragraph text on the page is used.
pub fn extract_posting_text(html: &str) -> String {
    let (Ok(blocks), Ok(paragraphs)) = (
        Selector::parse("article, section, div"),
        Selector::parse("p"),
    ) else {
        return String::new();
    };

    let document = Html::parse_document(html);

    let mut best: Option<String> = None;
    for block in document.select(&blocks) {
        let text = collapse_whitespace(
            &block
                .select(&paragraphs)
                .map(element_text)
                .collect::<Vec<_>>()
                .join(" "),
        );
        let len = text.chars().count();
        if len <= MIN_BLOCK_CHARS {
            continue;
        }
        // Strictly longer only, so the first of equal blocks is kept.
        if best.as_ref().map_or(true, |b| len > b.chars().count()) {
            best = Some(text);
        }
    }

    match best {
        Some(text) => text.chars().take(MAX_POSTING_CHARS).collect(),
        None => collapse_whitespace(
            &document
                .select(&paragraphs)
                .map(element_text)
                .collect::<Vec<_>>()
                .join(" "),
        ),
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(word: &str, n: usize) -> String {
        format!("<p>{}</p>", vec![word; n].join(" "))
    }

    #[test]
    fn test_longest_block_wins() {
        let html = format!(
            "<html><body><nav><p>Home Jobs About</p></nav>\
             <section>{}</section>\
             <article>{}{}</article></body></html>",
            paragraph("short", 90),
            paragraph("duty", 100),
            paragraph("benefit", 80),
        );
        let text = extract_posting_text(&html);
        assert!(text.starts_with("duty duty"));
        assert!(text.ends_with("benefit"));
        assert!(!text.contains("Home"));
    }

    #[test]
    fn test_falls_back_to_all_paragraphs() {
        let html = "<html><body><p>  Apply   now </p><span>ignored</span><p>Great team</p></body></html>";
        assert_eq!(extract_posting_text(html), "Apply now Great team");
    }

    #[test]
    fn test_caps_very_long_postings() {
        let html = format!("<article>{}</article>", paragraph("lorem", 5_000));
        let text = extract_posting_text(&html);
        assert_eq!(text.chars().count(), MAX_POSTING_CHARS);
    }

    #[test]
    fn test_no_paragraphs() {
        assert_eq!(extract_posting_text("<div>no paragraphs here</div>"), "");
    }

    #[tokio::test]
    async fn test_placeholder_url_is_not_fetched() {
        let fetcher = PostingFetcher::new().unwrap();
        assert_eq!(fetcher.fetch_posting_text("#").await, "");
        assert_eq!(fetcher.best_description("short", "").await, "short");
    }
}
