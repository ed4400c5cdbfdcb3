//! Tables for each session screen

use crate::model::{ArtistHit, MenuRow, SeedSet, Tabular, TrackHit, GENRES};

use super::render_table;

fn numbered<T>(items: &[T], columns: impl Fn(&T) -> Vec<String>) -> Vec<Vec<String>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut row = vec![(i + 1).to_string()];
            row.extend(columns(item));
            row
        })
        .collect()
}

pub fn menu_table(rows: &[MenuRow], width: u16) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| vec![row.number.to_string(), row.option.to_string(), row.user_input.clone()])
        .collect();
    render_table("Options", &["#", "Option", "Your Input"], &rows, width)
}

/// Genre list with an `X` next to genres already picked.
pub fn genres_table(selected: &SeedSet, width: u16) -> String {
    let rows = numbered(&GENRES, |genre| {
        let mark = if selected.contains_label(genre) { "X" } else { "" };
        vec![genre.to_string(), mark.to_string()]
    });
    render_table("Genres", &["#", "Genre", "Selected"], &rows, width)
}

pub fn artists_table(artists: &[ArtistHit], width: u16) -> String {
    let rows = numbered(artists, |artist| vec![artist.name.clone(), artist.genres_joined()]);
    render_table("Artists", &["#", "Artist", "Genre"], &rows, width)
}

pub fn tracks_table(tracks: &[TrackHit], width: u16) -> String {
    let rows = numbered(tracks, |track| vec![track.name.clone(), track.album.clone()]);
    render_table("Tracks", &["#", "Song Title", "Album"], &rows, width)
}

pub fn recommendations_table(table: &Tabular, width: u16) -> String {
    let projected = table.project(&["name", "artist_name", "album_name"]);
    let rows = numbered(&projected, |cells| cells.clone());
    render_table(
        "Recommendations",
        &["#", "Song Title", "Artist", "Album Name"],
        &rows,
        width,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{flatten_records, Category, SessionState};
    use serde_json::json;

    #[test]
    fn menu_shows_current_selections() {
        let state = SessionState::new().add(
            Category::Artist,
            vec!["id".to_string()],
            vec!["Radiohead".to_string()],
        );
        let out = menu_table(&state.menu_rows(), 100);
        assert!(out.contains("Select your favorite artists"));
        assert!(out.contains("Radiohead"));
        assert!(out.contains("5 Quit"));
    }

    #[test]
    fn selected_genres_are_marked() {
        let selected = SeedSet::default().add(vec!["rock".to_string()], vec!["rock".to_string()]);
        let out = genres_table(&selected, 100);
        let rock = out.lines().find(|l| l.contains(" rock ")).unwrap();
        assert!(rock.contains('X'));
        let pop = out.lines().find(|l| l.contains(" pop ")).unwrap();
        assert!(!pop.contains('X'));
    }

    #[test]
    fn recommendations_use_flattened_columns() {
        let table = flatten_records(&[json!({
            "name": "Creep",
            "album": {"name": "Pablo Honey"},
            "artist": {"name": "Radiohead"}
        })])
        .unwrap();
        let out = recommendations_table(&table, 100);
        let row = out.lines().nth(2).unwrap();
        assert!(row.contains("1 Creep"));
        assert!(row.contains("Radiohead"));
        assert!(row.contains("Pablo Honey"));
    }

    #[test]
    fn artists_list_their_genres() {
        let artists = vec![ArtistHit {
            id: "a1".into(),
            name: "Muse".into(),
            genres: vec!["rock".into(), "alternative rock".into()],
        }];
        let out = artists_table(&artists, 100);
        assert!(out.contains("1 Muse"));
        assert!(out.contains("rock, alternative rock"));
    }
}
