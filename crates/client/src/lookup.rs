//! Title metadata lookup: season count, canonical title, cover image.
//!
//! Providers are pluggable behind [`MetadataProvider`] so the external
//! service can be swapped without touching the CRUD contract. The standard
//! chain consults a built-in table of well-known titles first and only then
//! the external search service.
//!
//! Also hosts the search input policy: lookups fire at most once per 300 ms
//! of typing inactivity and never for queries under 2 characters.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;

/// Minimum query length before a search may fire.
pub const MIN_QUERY_LEN: usize = 2;

/// Typing inactivity required before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A successful title lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Number of seasons known for the title (at least 1).
    pub season_count: u32,
    /// The provider's canonical spelling of the title.
    pub canonical_title: String,
    /// Cover image URL, when the provider has one.
    pub image_url: Option<String>,
}

/// The single lookup failure: the title is unknown to this provider or the
/// provider cannot be reached. Callers are not told which.
#[derive(Debug, thiserror::Error)]
#[error("metadata lookup unavailable")]
pub struct LookupUnavailable;

/// A source of title metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<LookupResult, LookupUnavailable>;
}

// ---------------------------------------------------------------------------
// Static season table
// ---------------------------------------------------------------------------

/// Season counts for well-known multi-season titles.
///
/// First-priority override: external relation data is often wrong for the
/// big franchises (split cours, renamed sequels), so these take precedence.
const SEASON_TABLE: &[(&str, u32)] = &[
    ("Naruto", 2),
    ("Naruto Shippuden", 21),
    ("One Piece", 20),
    ("Dragon Ball", 4),
    ("Dragon Ball Z", 9),
    ("Dragon Ball Super", 5),
    ("My Hero Academia", 6),
    ("Boku no Hero Academia", 6),
    ("Attack on Titan", 4),
    ("Shingeki no Kyojin", 4),
    ("Demon Slayer", 4),
    ("Kimetsu no Yaiba", 4),
    ("Jujutsu Kaisen", 3),
    ("Black Clover", 4),
    ("Fairy Tail", 3),
    ("Bleach", 16),
    ("Hunter x Hunter", 6),
    ("Fullmetal Alchemist", 2),
    ("Fullmetal Alchemist: Brotherhood", 1),
    ("Death Note", 1),
    ("Code Geass", 2),
    ("Steins;Gate", 2),
    ("Re:Zero", 3),
    ("Overlord", 4),
    ("Sword Art Online", 4),
    ("The Seven Deadly Sins", 5),
    ("Tokyo Ghoul", 4),
    ("Mob Psycho 100", 3),
    ("One Punch Man", 2),
    ("The Promised Neverland", 2),
    ("Dr. Stone", 3),
    ("Fire Force", 2),
    ("Vinland Saga", 2),
    ("The Rising of the Shield Hero", 3),
    ("That Time I Got Reincarnated as a Slime", 3),
    ("KonoSuba", 2),
    ("Log Horizon", 2),
    ("K-On!", 2),
    ("Clannad", 2),
    ("Your Name", 1),
    ("A Silent Voice", 1),
    ("Spirited Away", 1),
];

/// Lookup backed by [`SEASON_TABLE`].
///
/// Matching is fuzzy: case-insensitive, and a hit when either string
/// contains the other, so "naruto shippuden" finds "Naruto Shippuden" and
/// "Attack on Titan Final Season" still finds "Attack on Titan".
#[derive(Debug, Default)]
pub struct StaticSeasonTable;

#[async_trait]
impl MetadataProvider for StaticSeasonTable {
    async fn lookup(&self, title: &str) -> Result<LookupResult, LookupUnavailable> {
        let query = title.trim().to_lowercase();
        if query.is_empty() {
            return Err(LookupUnavailable);
        }

        for (known, seasons) in SEASON_TABLE {
            let known_lower = known.to_lowercase();
            if query.contains(&known_lower) || known_lower.contains(&query) {
                return Ok(LookupResult {
                    season_count: *seasons,
                    canonical_title: (*known).to_string(),
                    image_url: None,
                });
            }
        }

        Err(LookupUnavailable)
    }
}

// ---------------------------------------------------------------------------
// External search service (Jikan-style REST)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    mal_id: i64,
    title: String,
    #[serde(default)]
    images: Option<SearchImages>,
}

#[derive(Debug, Deserialize)]
struct SearchImages {
    jpg: Option<SearchImageUrl>,
}

#[derive(Debug, Deserialize)]
struct SearchImageUrl {
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelationsResponse {
    #[serde(default)]
    data: Vec<Relation>,
}

#[derive(Debug, Deserialize)]
struct Relation {
    relation: String,
}

/// Season count derived from relation data: the entry itself plus one per
/// "Sequel" relation.
fn count_seasons(relations: &RelationsResponse) -> u32 {
    1 + relations
        .data
        .iter()
        .filter(|r| r.relation == "Sequel")
        .count() as u32
}

/// Lookup against a Jikan-compatible REST service.
///
/// Searches for the title, then counts "Sequel" relations of the best match.
/// A failed search is [`LookupUnavailable`]; a failed relations call still
/// succeeds with a season count of 1 (the entry we did find).
pub struct JikanProvider {
    base_url: String,
    http: reqwest::Client,
}

/// Public Jikan v4 endpoint.
const JIKAN_BASE_URL: &str = "https://api.jikan.moe/v4";

impl Default for JikanProvider {
    fn default() -> Self {
        Self::new(JIKAN_BASE_URL)
    }
}

impl JikanProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    async fn search(&self, title: &str) -> Result<SearchEntry, LookupUnavailable> {
        let url = format!("{}/anime", self.base_url);
        let response = self
            .http
            .get(url)
            .query(&[("q", title), ("limit", "10"), ("sfw", "")])
            .send()
            .await
            .map_err(|_| LookupUnavailable)?;

        if !response.status().is_success() {
            return Err(LookupUnavailable);
        }

        let body: SearchResponse = response.json().await.map_err(|_| LookupUnavailable)?;
        body.data.into_iter().next().ok_or(LookupUnavailable)
    }

    async fn relations(&self, mal_id: i64) -> Option<RelationsResponse> {
        let url = format!("{}/anime/{mal_id}/relations", self.base_url);
        let response = self.http.get(url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json().await.ok()
    }
}

#[async_trait]
impl MetadataProvider for JikanProvider {
    async fn lookup(&self, title: &str) -> Result<LookupResult, LookupUnavailable> {
        let entry = self.search(title).await?;

        let season_count = match self.relations(entry.mal_id).await {
            Some(relations) => count_seasons(&relations),
            None => 1,
        };

        let image_url = entry
            .images
            .and_then(|i| i.jpg)
            .and_then(|j| j.image_url);

        Ok(LookupResult {
            season_count,
            canonical_title: entry.title,
            image_url,
        })
    }
}

// ---------------------------------------------------------------------------
// Provider chain
// ---------------------------------------------------------------------------

/// Consults providers in order; the first success wins.
pub struct LookupChain {
    providers: Vec<Box<dyn MetadataProvider>>,
}

impl LookupChain {
    /// An empty chain. Add providers in priority order.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn with_provider(mut self, provider: impl MetadataProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// The standard chain: static table first, external service as fallback.
    pub fn standard() -> Self {
        Self::new()
            .with_provider(StaticSeasonTable)
            .with_provider(JikanProvider::default())
    }
}

impl Default for LookupChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataProvider for LookupChain {
    async fn lookup(&self, title: &str) -> Result<LookupResult, LookupUnavailable> {
        for provider in &self.providers {
            if let Ok(result) = provider.lookup(title).await {
                return Ok(result);
            }
        }
        Err(LookupUnavailable)
    }
}

// ---------------------------------------------------------------------------
// Search debounce policy
// ---------------------------------------------------------------------------

/// Debounces title-search input.
///
/// Keystrokes replace the pending query; [`SearchDebouncer::due`] hands the
/// query out once 300 ms have passed without another keystroke. Queries under
/// [`MIN_QUERY_LEN`] characters cancel any pending search instead.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current input value at time `now`.
    pub fn keystroke(&mut self, query: &str, now: Instant) {
        let query = query.trim();
        if query.len() < MIN_QUERY_LEN {
            self.pending = None;
        } else {
            self.pending = Some((query.to_string(), now));
        }
    }

    /// Return the query to fire at time `now`, if the debounce window has
    /// elapsed. The query is handed out at most once.
    pub fn due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.duration_since(*at) >= SEARCH_DEBOUNCE => {
                self.pending.take().map(|(q, _)| q)
            }
            _ => None,
        }
    }
}
