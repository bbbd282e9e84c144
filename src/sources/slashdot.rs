use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{ErrorKind, FetchError, Listing, Source};
use crate::errors::DiscussItResult;
use crate::sources::http::{endpoint, HttpSettings, UpstreamClient};
use crate::sources::traits::{FetchOutcome, Fetcher};

pub const DEFAULT_BASE_URL: &str = "https://slashdot.org";

/// Firehose markup, as served by `index2.pl`.
struct Markup {
    firehose: Selector,
    story: Selector,
    title_link: Selector,
    source_link: Selector,
    comment_bubble: Selector,
}

static MARKUP: LazyLock<Markup> = LazyLock::new(|| {
    let parse = |css: &str| Selector::parse(css).expect("valid selector");
    Markup {
        firehose: parse("#firehoselist"),
        story: parse(r#"article[data-fhtype="story"]"#),
        title_link: parse(".story-title > a"),
        source_link: parse("a.story-sourcelnk"),
        comment_bubble: parse(".comment-bubble a"),
    }
});

static COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("valid regex"));

/// Scrapes the Slashdot firehose filtered by the queried URL. Slashdot has no
/// API and no vote score, so listings carry only comment counts.
pub struct SlashdotFetcher {
    client: UpstreamClient,
    base_url: String,
}

impl SlashdotFetcher {
    pub fn new(base_url: impl Into<String>, settings: &HttpSettings) -> DiscussItResult<Self> {
        Ok(Self {
            client: UpstreamClient::new(Source::Slashdot, settings)?,
            base_url: base_url.into(),
        })
    }

    fn parse_listings(html: &str, query_url: &str) -> Result<Vec<Listing>, FetchError> {
        let markup = &*MARKUP;
        let document = Html::parse_document(html);

        if document.select(&markup.firehose).next().is_none() {
            return Err(FetchError::source(
                Source::Slashdot,
                ErrorKind::Parse,
                "Page has no story list",
            ));
        }

        Ok(document
            .select(&markup.story)
            .filter_map(|story| Self::story_to_listing(markup, story, query_url))
            .collect())
    }

    fn story_to_listing(
        markup: &Markup,
        story: ElementRef<'_>,
        query_url: &str,
    ) -> Option<Listing> {
        let title_link = story.select(&markup.title_link).next()?;
        let title = Self::collapse_whitespace(&title_link.text().collect::<String>());
        let discussion = Self::absolute_link(title_link.value().attr("href")?);

        let url = story
            .select(&markup.source_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(Self::absolute_link)
            .unwrap_or_else(|| query_url.to_string());

        let comment_count = story
            .select(&markup.comment_bubble)
            .next()
            .map(|a| Self::parse_count(&a.text().collect::<String>()))
            .unwrap_or(0);

        Some(
            Listing::new(Source::Slashdot, title, url, discussion)
                .with_comment_count(comment_count),
        )
    }

    /// Slashdot links are protocol-relative (`//yro.slashdot.org/...`).
    fn absolute_link(href: &str) -> String {
        match href.strip_prefix("//") {
            Some(rest) => format!("https://{}", rest),
            None => href.to_string(),
        }
    }

    fn parse_count(text: &str) -> u64 {
        COUNT
            .find(text)
            .and_then(|m| m.as_str().replace(',', "").parse().ok())
            .unwrap_or(0)
    }

    fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Fetcher for SlashdotFetcher {
    fn source(&self) -> Source {
        Source::Slashdot
    }

    fn fetch(&self, url: &str) -> FetchOutcome {
        if let Err(e) = self.client.validate_target(url) {
            return FetchOutcome::failed(e);
        }

        let result = endpoint(
            Source::Slashdot,
            &self.base_url,
            "/index2.pl",
            &[("fhfilter", url)],
        )
        .and_then(|page| self.client.get_text(page))
        .and_then(|html| Self::parse_listings(&html, url));

        match result {
            Ok(listings) => FetchOutcome::listings(listings),
            Err(e) => {
                tracing::warn!(source = "slashdot", error = %e, "fetch failed");
                FetchOutcome::failed(e)
            }
        }
    }
}
