//! Session state: the three seed sets

use super::budget::SEED_CAP;
use super::seed::SeedSet;
use super::types::{Category, MenuRow};

/// Selected genres, artists and tracks.
///
/// Transitions consume the current state and return the next one; the
/// session loop is the only owner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    genres: SeedSet,
    artists: SeedSet,
    tracks: SeedSet,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeds(&self, category: Category) -> &SeedSet {
        match category {
            Category::Genre => &self.genres,
            Category::Artist => &self.artists,
            Category::Track => &self.tracks,
        }
    }

    fn seeds_mut(&mut self, category: Category) -> &mut SeedSet {
        match category {
            Category::Genre => &mut self.genres,
            Category::Artist => &mut self.artists,
            Category::Track => &mut self.tracks,
        }
    }

    pub fn add<I, L>(mut self, category: Category, ids: I, labels: L) -> Self
    where
        I: IntoIterator<Item = String>,
        L: IntoIterator<Item = String>,
    {
        let slot = self.seeds_mut(category);
        *slot = std::mem::take(slot).add(ids, labels);
        self
    }

    pub fn clear(mut self, category: Category) -> Self {
        let slot = self.seeds_mut(category);
        *slot = std::mem::take(slot).clear();
        self
    }

    /// Comma-joined labels shown next to the category's menu entry.
    pub fn display_label(&self, category: Category) -> String {
        self.seeds(category).labels_joined()
    }

    pub fn total_seeds(&self) -> usize {
        Category::ALL.iter().map(|&c| self.seeds(c).len()).sum()
    }

    /// More seeds selected than a single request can carry.
    pub fn exceeds_cap(&self) -> bool {
        self.total_seeds() > SEED_CAP
    }

    /// Rows of the options menu, with current selections for rows 1-3.
    pub fn menu_rows(&self) -> Vec<MenuRow> {
        let mut rows: Vec<MenuRow> = Category::ALL
            .iter()
            .enumerate()
            .map(|(i, &category)| MenuRow {
                number: i + 1,
                option: category.menu_option(),
                user_input: self.display_label(category),
            })
            .collect();
        rows.push(MenuRow {
            number: 4,
            option: "Discover new music",
            user_input: String::new(),
        });
        rows.push(MenuRow {
            number: 5,
            option: "Quit",
            user_input: String::new(),
        });
        rows
    }
}
