//! Catalog seam between the session and the music service

use anyhow::Result;
use serde_json::Value;

use super::budget::SeedRequest;
use super::content::{ArtistHit, TrackHit};

/// Search and recommendation operations the session needs.
///
/// Errors returned from these calls are upstream failures and end the
/// session; an empty result is not an error.
pub trait Catalog {
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<ArtistHit>>;

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<TrackHit>>;

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<TrackHit>>;

    /// Recommended tracks as nested records (`id`, `name`, `album{..}`, `artist{..}`).
    async fn recommendations(&self, seeds: &SeedRequest) -> Result<Vec<Value>>;
}
