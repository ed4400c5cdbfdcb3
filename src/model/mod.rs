//! Model module - session state and catalog data
//!
//! - `types`: Core type definitions (seed categories, menu rows)
//! - `seed`: Deduplicating seed sets
//! - `budget`: Seed budget allocation and the recommendation request
//! - `flatten`: Nested record flattening into table rows
//! - `content`: Search results and the genre list
//! - `catalog`: The catalog trait the session talks to
//! - `spotify_client`: Spotify Web API implementation of the catalog
//! - `app_model`: Session state with its transitions

mod types;
mod seed;
mod budget;
mod flatten;
mod content;
mod catalog;
mod spotify_client;
mod app_model;

pub use types::{Category, MenuRow};

pub use seed::SeedSet;

pub use budget::{SeedRequest, SEED_CAP};

pub use flatten::{flatten_records, Tabular};

pub use content::{ArtistHit, TrackHit, GENRES};

pub use catalog::Catalog;

pub use spotify_client::SpotifyCatalog;

pub use app_model::SessionState;
