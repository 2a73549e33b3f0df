use serde::Serialize;
use tracing::debug;

use crate::{Ranked, RankingError, partition::partition_by};

/// A row together with its 1-based position inside its group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow<R> {
    pub rank: usize,
    #[serde(flatten)]
    pub row: R,
}

/// The surviving rows of one group, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGroup<G, R> {
    pub group_key: G,
    pub rows: Vec<RankedRow<R>>,
}

/// Converts a caller supplied limit into a usable `n`.
///
/// Limits below 1 are rejected with [`RankingError::InvalidArgument`].
pub fn parse_limit(n: i64) -> Result<usize, RankingError> {
    if n < 1 {
        return Err(RankingError::InvalidArgument(format!(
            "n must be at least 1, got {n}"
        )));
    }
    usize::try_from(n)
        .map_err(|_| RankingError::InvalidArgument(format!("n is out of range: {n}")))
}

/// Keeps the best `n` rows of every group.
///
/// Rows are partitioned by [`Grouped::group_key`](crate::Grouped::group_key) and
/// groups are emitted in the order their key first appears in `rows`. Inside a
/// group, rows are ordered by rank key descending and tie-break key ascending,
/// ranked `1..` in that order, and everything past `n` is dropped.
///
/// Rows that collide on both keys keep their input order.
///
/// # Errors
/// Returns [`RankingError::InvalidArgument`] when `n` is zero.
pub fn select_top_n<R>(
    rows: impl IntoIterator<Item = R>,
    n: usize,
) -> Result<Vec<RankedGroup<R::Group, R>>, RankingError>
where
    R: Ranked,
{
    if n == 0 {
        return Err(RankingError::InvalidArgument(
            "n must be at least 1, got 0".into(),
        ));
    }

    let groups = partition_by(rows, R::group_key);
    debug!(groups = groups.len(), n, "ranking groups");

    let ranked = groups
        .into_iter()
        .map(|(group_key, mut members)| {
            // stable: full-key collisions stay in input order
            members.sort_by(|a, b| {
                b.rank_key()
                    .cmp(&a.rank_key())
                    .then_with(|| a.tie_break_key().cmp(&b.tie_break_key()))
            });

            let rows = members
                .into_iter()
                .take(n)
                .enumerate()
                .map(|(idx, row)| RankedRow { rank: idx + 1, row })
                .collect();

            RankedGroup { group_key, rows }
        })
        .collect();

    Ok(ranked)
}
