//! Spotify Web API catalog client

use std::sync::Arc;

use anyhow::Result;
use rspotify::{
    model::{
        ArtistId, Country, FullTrack, Market, RecommendationsAttribute, SearchResult,
        SearchType, SimplifiedTrack, TrackId,
    },
    prelude::*,
    ClientCredsSpotify,
};
use serde_json::{json, Value};

use crate::error::FinderError;
use crate::{log_api_request, log_api_result};

use super::budget::SeedRequest;
use super::catalog::Catalog;
use super::content::{share_url, ArtistHit, TrackHit};

/// Top tracks are looked up in a fixed market.
const TOP_TRACKS_MARKET: Market = Market::Country(Country::UnitedStates);

/// Catalog backed by the Spotify Web API
#[derive(Clone)]
pub struct SpotifyCatalog {
    client: Arc<ClientCredsSpotify>,
    recommendation_limit: u32,
}

impl SpotifyCatalog {
    pub fn new(client: ClientCredsSpotify, recommendation_limit: u32) -> Self {
        Self {
            client: Arc::new(client),
            recommendation_limit,
        }
    }
}

fn track_hit(track: FullTrack) -> TrackHit {
    TrackHit {
        id: track.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
        name: track.name,
        artist: track.artists.first().map(|a| a.name.clone()).unwrap_or_default(),
        album: track.album.name,
    }
}

/// Reduce a recommended track to the nested record the report works from.
///
/// Album and artist sub-records are only present when the payload carries
/// them, so the flattened table may have empty cells for those columns.
pub fn track_record(track: &SimplifiedTrack) -> Value {
    let id = track.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default();
    let mut record = json!({
        "id": id,
        "name": track.name,
        "preview_url": track.preview_url,
        "share_url": share_url("track", &id),
    });

    if let Some(album) = &track.album {
        let album_id = album.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default();
        record["album"] = json!({
            "id": album_id,
            "name": album.name,
            "image_url": album.images.first().map(|i| i.url.clone()),
            "image_url_small": album.images.last().map(|i| i.url.clone()),
            "share_url": share_url("album", &album_id),
        });
    }

    if let Some(artist) = track.artists.first() {
        let artist_id = artist.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default();
        record["artist"] = json!({
            "id": artist_id,
            "name": artist.name,
            "share_url": share_url("artist", &artist_id),
        });
    }

    record
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

impl Catalog for SpotifyCatalog {
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<ArtistHit>> {
        log_api_request!("search_artists", query, limit);
        let result = self
            .client
            .search(query, SearchType::Artist, None, None, Some(limit), None)
            .await;
        log_api_result!("search_artists", result);

        let artists = match result.map_err(|e| FinderError::spotify("Artist search", &e))? {
            SearchResult::Artists(page) => page
                .items
                .into_iter()
                .map(|artist| ArtistHit {
                    id: artist.id.id().to_string(),
                    name: artist.name,
                    genres: artist.genres,
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(artists)
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<TrackHit>> {
        log_api_request!("search_tracks", query, limit);
        let result = self
            .client
            .search(query, SearchType::Track, None, None, Some(limit), None)
            .await;
        log_api_result!("search_tracks", result);

        let tracks = match result.map_err(|e| FinderError::spotify("Track search", &e))? {
            SearchResult::Tracks(page) => page.items.into_iter().map(track_hit).collect(),
            _ => Vec::new(),
        };
        Ok(tracks)
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<TrackHit>> {
        log_api_request!("artist_top_tracks", artist_id);
        let id = ArtistId::from_id(artist_id)?;
        let result = self
            .client
            .artist_top_tracks(id, Some(TOP_TRACKS_MARKET))
            .await;
        log_api_result!("artist_top_tracks", result);

        let tracks = result.map_err(|e| FinderError::spotify("Top tracks lookup", &e))?;
        Ok(tracks.into_iter().map(track_hit).collect())
    }

    async fn recommendations(&self, seeds: &SeedRequest) -> Result<Vec<Value>> {
        log_api_request!(
            "recommendations",
            genres = ?seeds.genres,
            artists = ?seeds.artists,
            tracks = ?seeds.tracks
        );

        let artists = seeds
            .artists
            .iter()
            .map(|id| ArtistId::from_id(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let tracks = seeds
            .tracks
            .iter()
            .map(|id| TrackId::from_id(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let genres: Vec<&str> = seeds.genres.iter().map(String::as_str).collect();

        let result = self
            .client
            .recommendations(
                std::iter::empty::<RecommendationsAttribute>(),
                non_empty(artists),
                non_empty(genres),
                non_empty(tracks),
                None,
                Some(self.recommendation_limit),
            )
            .await;
        log_api_result!("recommendations", result);

        let recommendations =
            result.map_err(|e| FinderError::spotify("Recommendation request", &e))?;
        tracing::info!(count = recommendations.tracks.len(), "Received recommendations");
        Ok(recommendations.tracks.iter().map(track_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_drops_empty_seed_lists() {
        assert_eq!(non_empty(Vec::<&str>::new()), None);
        assert_eq!(non_empty(vec!["rock"]), Some(vec!["rock"]));
    }
}
