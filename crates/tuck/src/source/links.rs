//! Download-link resolution against the data library page.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::dataset::FactorSet;
use crate::error::{DataError, Result};
use crate::frequency::Frequency;

/// The data library page listing every downloadable dataset.
const DATA_LIBRARY_URL: &str =
    "https://mba.tuck.dartmouth.edu/pages/faculty/ken.french/data_library.html";

/// How long a scraped link list stays valid.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Resolves a factor set and frequency to a download URL.
pub trait LinkResolver {
    /// Returns a fully-qualified URL to the current source file.
    fn resolve(&self, dataset: FactorSet, frequency: Frequency) -> Result<String>;
}

#[derive(Debug)]
struct CachedLinks {
    links: Vec<String>,
    fetched_at: Instant,
}

/// Link resolver backed by a scrape of the data library page.
///
/// The page is scraped lazily on first resolve and the CSV link list cached.
/// The cache invalidates after `ttl` (default 6 hours) or on an explicit
/// [`refresh`](Self::refresh); table data itself is never cached. Hrefs are
/// absolutized against the page URL and matched by upstream file-name stem,
/// so a renamed or vanished file surfaces as a resolution error instead of a
/// silently wrong download.
#[derive(Debug)]
pub struct DataLibraryResolver {
    client: reqwest::blocking::Client,
    page_url: String,
    ttl: Duration,
    cache: Mutex<Option<CachedLinks>>,
}

impl DataLibraryResolver {
    /// Creates a resolver against the live data library page.
    pub fn new() -> Result<Self> {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Creates a resolver with a custom cache TTL.
    pub fn with_ttl(ttl: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tuck/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            page_url: DATA_LIBRARY_URL.to_string(),
            ttl,
            cache: Mutex::new(None),
        })
    }

    /// Process-wide shared resolver, created on first use.
    pub fn shared() -> &'static Self {
        static SHARED: Lazy<DataLibraryResolver> =
            Lazy::new(|| DataLibraryResolver::new().expect("failed to build HTTP client"));
        &SHARED
    }

    /// Drops the cached link list; the next resolve re-scrapes the page.
    pub fn refresh(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        *cache = None;
    }

    fn links(&self) -> Result<Vec<String>> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(cached.links.clone());
            }
        }

        let links = self.scrape()?;
        debug!("scraped {} csv links from {}", links.len(), self.page_url);
        *cache = Some(CachedLinks {
            links: links.clone(),
            fetched_at: Instant::now(),
        });
        Ok(links)
    }

    fn scrape(&self) -> Result<Vec<String>> {
        let html = self
            .client
            .get(&self.page_url)
            .send()?
            .error_for_status()?
            .text()?;
        let base = Url::parse(&self.page_url)
            .map_err(|e| DataError::LinkResolution(format!("bad page URL {}: {e}", self.page_url)))?;
        Ok(extract_csv_links(&html, &base))
    }
}

impl LinkResolver for DataLibraryResolver {
    fn resolve(&self, dataset: FactorSet, frequency: Frequency) -> Result<String> {
        let stem = dataset.file_stem(frequency);
        let links = self.links()?;
        find_link(&links, stem).cloned().ok_or_else(|| {
            DataError::LinkResolution(format!(
                "no link matching {stem:?} on {} ({} csv links scraped)",
                self.page_url,
                links.len()
            ))
        })
    }
}

/// All CSV hrefs on the page, absolutized against `base`.
fn extract_csv_links(html: &str, base: &Url) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("invalid CSS selector for links");
    Html::parse_document(html)
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.to_ascii_lowercase().contains("csv"))
        .filter_map(|href| base.join(href).ok())
        .map(|url| url.to_string())
        .collect()
}

fn find_link<'a>(links: &'a [String], stem: &str) -> Option<&'a String> {
    links.iter().find(|link| link.contains(stem))
}
