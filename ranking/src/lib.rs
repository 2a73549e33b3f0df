//! Per-group selection over pre-aggregated row snapshots.
//!
//! Two selectors live here:
//! - [`select_top_n`] ranks the rows of every group and keeps the best `n`
//!   (the in-memory equivalent of `ROW_NUMBER() OVER (PARTITION BY .. ORDER BY ..)`
//!   followed by a `rank <= n` filter).
//! - [`select_latest`] keeps the single row with the highest identity value per
//!   group (the "latest row per group" correlated subquery).
//!
//! Both are pure functions over rows the storage layer already produced. Groups
//! are always reported in the order their key first appears in the input.

use std::hash::Hash;

pub mod error;
pub mod latest;
pub mod top_n;

mod partition;

pub use error::RankingError;
pub use latest::{LatestSelection, select_latest, select_latest_in};
pub use top_n::{RankedGroup, RankedRow, parse_limit, select_top_n};

/// A row that belongs to exactly one group.
pub trait Grouped {
    type Group: Eq + Hash + Clone;

    fn group_key(&self) -> Self::Group;
}

/// A grouped row that can be ordered inside its group.
///
/// Rows are ordered by `rank_key` descending. Rows with equal rank keys are
/// ordered by `tie_break_key` ascending; callers must keep `tie_break_key`
/// unique within a group for the order to be fully determined.
pub trait Ranked: Grouped {
    type RankKey: Ord;
    type TieBreak: Ord;

    fn rank_key(&self) -> Self::RankKey;
    fn tie_break_key(&self) -> Self::TieBreak;
}
