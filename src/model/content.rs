//! Catalog search results shown in selection tables

/// Genres offered on the genre selection screen.
pub const GENRES: [&str; 25] = [
    "alternative", "ambient", "blues", "chill", "country",
    "dance", "electronic", "folk", "funk", "happy",
    "hip-hop", "indie-pop", "jazz", "k-pop", "metal",
    "new-release", "pop", "punk", "reggae", "rock",
    "soul", "study", "trance", "work-out", "world-music",
];

/// An artist from search results
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistHit {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
}

impl ArtistHit {
    pub fn genres_joined(&self) -> String {
        self.genres.join(", ")
    }
}

/// A track from search results or an artist's top tracks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackHit {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
}

pub fn share_url(kind: &str, id: &str) -> String {
    format!("https://open.spotify.com/{kind}/{id}")
}
