//! Seed budget allocation across categories

use crate::error::FinderError;

use super::app_model::SessionState;
use super::types::Category;

/// Maximum number of seeds the catalog accepts in one recommendation request.
pub const SEED_CAP: usize = 5;

/// Split `cap` across categories in the given order.
///
/// The running total advances by each category's full requested size, not
/// by what was granted. A category can therefore receive a truncated share
/// and still push the total past `cap`, which zeroes every later category.
pub fn allocate<K: Copy>(categories: &[(K, usize)], cap: usize) -> Vec<(K, usize)> {
    let mut used = 0usize;
    categories
        .iter()
        .map(|&(name, size)| {
            if used > cap {
                (name, 0)
            } else {
                let granted = size.min(cap - used);
                used += size;
                (name, granted)
            }
        })
        .collect()
}

/// Per-category seed allocation for one recommendation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedBudget {
    pub genres: usize,
    pub artists: usize,
    pub tracks: usize,
}

impl SeedBudget {
    /// Allocate `cap` over the state's seed sets in canonical priority order.
    pub fn for_state(state: &SessionState, cap: usize) -> Self {
        let sizes: Vec<(Category, usize)> = Category::ALL
            .iter()
            .map(|&category| (category, state.seeds(category).len()))
            .collect();

        let mut budget = Self::default();
        for (category, granted) in allocate(&sizes, cap) {
            *budget.slot_mut(category) = granted;
        }
        budget
    }

    fn slot_mut(&mut self, category: Category) -> &mut usize {
        match category {
            Category::Genre => &mut self.genres,
            Category::Artist => &mut self.artists,
            Category::Track => &mut self.tracks,
        }
    }

    pub fn total(&self) -> usize {
        self.genres + self.artists + self.tracks
    }
}

/// Truncated seed lists handed to the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedRequest {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
}

impl SeedRequest {
    /// Build the request for `state`, truncating each category to its budget.
    pub fn from_state(state: &SessionState, cap: usize) -> Result<Self, FinderError> {
        let budget = SeedBudget::for_state(state, cap);
        tracing::debug!(
            genres = budget.genres,
            artists = budget.artists,
            tracks = budget.tracks,
            total = budget.total(),
            "Seed budget"
        );
        let request = Self {
            genres: state.seeds(Category::Genre).take_ids(budget.genres),
            artists: state.seeds(Category::Artist).take_ids(budget.artists),
            tracks: state.seeds(Category::Track).take_ids(budget.tracks),
        };
        request.validate(cap)?;
        Ok(request)
    }

    pub fn len(&self) -> usize {
        self.genres.len() + self.artists.len() + self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self, cap: usize) -> Result<(), FinderError> {
        if self.is_empty() {
            return Err(FinderError::NoSeeds);
        }
        match self.len() {
            n if n > cap => Err(FinderError::TooManySeeds { requested: n, cap }),
            _ => Ok(()),
        }
    }
}
