//! Core type definitions for the application

/// The three kinds of recommendation seed.
///
/// `ALL` is the canonical seed priority used when the seed budget is split:
/// genres first, then artists, then tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Genre,
    Artist,
    Track,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Genre, Category::Artist, Category::Track];

    /// Plural noun used in messages ("Genres cleared!").
    pub fn plural(self) -> &'static str {
        match self {
            Category::Genre => "genres",
            Category::Artist => "artists",
            Category::Track => "tracks",
        }
    }

    /// Text of the matching menu entry.
    pub fn menu_option(self) -> &'static str {
        match self {
            Category::Genre => "Select your favorite genres",
            Category::Artist => "Select your favorite artists",
            Category::Track => "Select your favorite tracks",
        }
    }
}

/// A single row of the options menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuRow {
    pub number: usize,
    pub option: &'static str,
    pub user_input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_priority_is_genre_artist_track() {
        assert_eq!(
            Category::ALL,
            [Category::Genre, Category::Artist, Category::Track]
        );
    }
}
