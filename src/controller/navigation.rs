//! Genre, artist and track selection screens

use anyhow::Result;

use crate::console::Console;
use crate::error::FinderError;
use crate::mail::Mailer;
use crate::model::{ArtistHit, Catalog, Category, TrackHit, GENRES};
use crate::view;

use super::input::{parse_index, parse_selection, Selection};
use super::Session;

impl<C: Catalog, M: Mailer, K: Console> Session<C, M, K> {
    pub(super) fn select_genre(&mut self) -> Result<()> {
        self.say(&view::genres_table(self.state.seeds(Category::Genre), self.options.width));
        let Some(answer) = self.ask(
            "Please enter a comma-delimited list of numbers, or type \"clear\" to clear selected genres. ",
        )?
        else {
            return Ok(());
        };

        match parse_selection(&answer, GENRES.len())? {
            Selection::Clear => self.clear(Category::Genre),
            Selection::Indices(picked) => {
                let genres: Vec<String> = picked.iter().map(|&i| GENRES[i].to_string()).collect();
                self.state = std::mem::take(&mut self.state).add(Category::Genre, genres.clone(), genres);
            }
        }
        Ok(())
    }

    pub(super) async fn select_artist(&mut self) -> Result<()> {
        let Some(artists) = self.find_artists().await? else {
            return Ok(());
        };
        let Some(answer) = self.ask(
            "Select artists by entering a comma-delimited list of numbers, or type \"clear\" to clear selected artists. ",
        )?
        else {
            return Ok(());
        };

        match parse_selection(&answer, artists.len())? {
            Selection::Clear => self.clear(Category::Artist),
            Selection::Indices(picked) => {
                let (ids, names) = picked
                    .iter()
                    .map(|&i| (artists[i].id.clone(), artists[i].name.clone()))
                    .unzip::<_, _, Vec<_>, Vec<_>>();
                self.state = std::mem::take(&mut self.state).add(Category::Artist, ids, names);
            }
        }
        Ok(())
    }

    pub(super) async fn select_track(&mut self) -> Result<()> {
        let Some(criterion) = self.ask("Would you like to search by artist or title? ")? else {
            return Ok(());
        };

        let tracks = match criterion.trim().to_ascii_lowercase().as_str() {
            "title" => {
                let Some(query) = self.ask("\nEnter the name of a track: ")? else {
                    return Ok(());
                };
                self.catalog
                    .search_tracks(query.trim(), self.display_limit())
                    .await?
            }
            "artist" => match self.top_tracks_of_one_artist().await? {
                Some(tracks) => tracks,
                None => return Ok(()),
            },
            other => return Err(FinderError::InvalidSelection(other.to_string()).into()),
        };

        if tracks.is_empty() {
            return Err(FinderError::NoResults("tracks").into());
        }
        self.say("\nWe found the following tracks...\n");
        self.say(&view::tracks_table(&tracks, self.options.width));

        let Some(answer) = self.ask(
            "Select tracks by entering a comma-delimited list of numbers, or type \"clear\" to clear selected tracks. ",
        )?
        else {
            return Ok(());
        };

        match parse_selection(&answer, tracks.len())? {
            Selection::Clear => self.clear(Category::Track),
            Selection::Indices(picked) => {
                let (ids, names) = picked
                    .iter()
                    .map(|&i| (tracks[i].id.clone(), tracks[i].name.clone()))
                    .unzip::<_, _, Vec<_>, Vec<_>>();
                self.state = std::mem::take(&mut self.state).add(Category::Track, ids, names);
            }
        }
        Ok(())
    }

    /// Search artists by name and list them. `None` when input ran out.
    async fn find_artists(&mut self) -> Result<Option<Vec<ArtistHit>>> {
        let Some(query) = self.ask("\nEnter the name of an artist: ")? else {
            return Ok(None);
        };
        let artists = self
            .catalog
            .search_artists(query.trim(), self.display_limit())
            .await?;
        if artists.is_empty() {
            return Err(FinderError::NoResults("artists").into());
        }

        self.say("\nWe found the following artists...\n");
        self.say(&view::artists_table(&artists, self.options.width));
        Ok(Some(artists))
    }

    async fn top_tracks_of_one_artist(&mut self) -> Result<Option<Vec<TrackHit>>> {
        let Some(artists) = self.find_artists().await? else {
            return Ok(None);
        };
        let Some(answer) = self.ask("Select ONE artist to see their top tracks: ")? else {
            return Ok(None);
        };
        let artist = &artists[parse_index(&answer, artists.len())?];

        let mut tracks = self.catalog.artist_top_tracks(&artist.id).await?;
        tracks.truncate(self.options.display_limit);
        Ok(Some(tracks))
    }

    fn clear(&mut self, category: Category) {
        self.state = std::mem::take(&mut self.state).clear(category);
        let name = category.plural();
        let mut chars = name.chars();
        let title: String = chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default();
        self.say(&format!("{title} cleared!\n"));
    }

    fn display_limit(&self) -> u32 {
        u32::try_from(self.options.display_limit).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::console::testing::ScriptedConsole;
    use crate::controller::testing::{FakeCatalog, FakeMailer};
    use crate::controller::{Session, SessionOptions};
    use crate::model::Category;
    use crate::report::FileReportSink;

    fn session(catalog: FakeCatalog, script: &[&str], dir: &Path) -> Session<FakeCatalog, FakeMailer, ScriptedConsole> {
        Session::new(
            catalog,
            FakeMailer::default(),
            ScriptedConsole::new(script),
            Box::new(FileReportSink::new(dir)),
            SessionOptions {
                display_limit: 10,
                width: 100,
                mail_subject: "New Music Recommendations".into(),
                attachment_name: "Music_Recommendations.html".into(),
            },
        )
    }

    #[tokio::test]
    async fn genres_are_added_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(FakeCatalog::stocked(), &["17, 20"], dir.path());
        s.select_genre().unwrap();
        assert_eq!(s.state.display_label(Category::Genre), "pop, rock");
    }

    #[tokio::test]
    async fn repeated_genre_selection_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(FakeCatalog::stocked(), &["20", "20,20"], dir.path());
        s.select_genre().unwrap();
        s.select_genre().unwrap();
        assert_eq!(s.state.seeds(Category::Genre).len(), 1);
        let second_screen = s.console.output.iter().rev().find(|out| out.contains("Genres")).unwrap();
        let rock = second_screen.lines().find(|l| l.contains(" rock ")).unwrap();
        assert!(rock.contains('X'));
        let pop = second_screen.lines().find(|l| l.contains(" pop ")).unwrap();
        assert!(!pop.contains('X'));
    }

    #[tokio::test]
    async fn artist_search_without_hits_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FakeCatalog::default();
        let mut s = session(catalog, &["nobody"], dir.path());
        let err = s.select_artist().await.unwrap_err();
        assert_eq!(err.to_string(), "No artists found!");
    }

    #[tokio::test]
    async fn tracks_by_artist_use_one_artist_top_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(FakeCatalog::stocked(), &["Artist", "radiohead", "2", "1"], dir.path());
        s.select_track().await.unwrap();

        assert_eq!(
            *s.catalog.calls.borrow(),
            vec!["search_artists".to_string(), "artist_top_tracks:artist-2".to_string()]
        );
        assert_eq!(s.state.display_label(Category::Track), "Karma Police");
    }

    #[tokio::test]
    async fn unknown_track_criterion_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(FakeCatalog::stocked(), &["album"], dir.path());
        let err = s.select_track().await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid selection"));
        assert!(s.catalog.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn more_than_one_artist_for_top_tracks_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(FakeCatalog::stocked(), &["artist", "radiohead", "1,2"], dir.path());
        assert!(s.select_track().await.is_err());
        assert_eq!(s.state.seeds(Category::Track).len(), 0);
    }
}
