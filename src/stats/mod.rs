//! # Aggregation Engine
//!
//! Single-pass statistics over already retrieved tracks.
//!
//! - [`Group`] tracks min, max and mean of a numeric dimension and resolves
//!   into a [`GroupSummary`] with track metadata attached.
//! - [`Mapping`] counts categorical labels and renders them as sorted,
//!   optionally truncated [`OrderedPairs`].
//! - [`words`] turns track titles into countable words.
//! - [`pitch`] and [`generation`] hold the fixed lookup tables.
//!
//! Nothing in here is shared between requests; every report builds its own
//! groups and mappings.

pub mod generation;
pub mod group;
pub mod mapping;
pub mod pitch;
pub mod words;

pub use generation::{Generation, generation_for_year};
pub use group::{Detail, DetailValue, Group, GroupSummary, Transform};
pub use mapping::{Mapping, OrderOptions, OrderedPairs, Sort, SortBy};
pub use words::count_words;
