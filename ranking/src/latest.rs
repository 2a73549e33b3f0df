use std::collections::HashMap;

use tracing::debug;

use crate::Grouped;

/// The latest row of every reported group.
///
/// Entries keep the order in which their group was first seen: seeded groups
/// first (in universe order), then groups discovered in the rows. A group maps
/// to `None` only when it was seeded and no row belonged to it.
#[derive(Debug, Clone)]
pub struct LatestSelection<G, R> {
    entries: Vec<(G, Option<R>)>,
    index: HashMap<G, usize>,
}

impl<G, R> LatestSelection<G, R>
where
    G: Eq + std::hash::Hash + Clone,
{
    fn with_universe(universe: impl IntoIterator<Item = G>) -> Self {
        let mut selection = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for group in universe {
            selection.slot(group);
        }
        selection
    }

    fn slot(&mut self, group: G) -> usize {
        if let Some(&slot) = self.index.get(&group) {
            return slot;
        }
        let slot = self.entries.len();
        self.index.insert(group.clone(), slot);
        self.entries.push((group, None));
        slot
    }

    /// Latest row of `group`, or `None` if the group is unknown or empty.
    pub fn get(&self, group: &G) -> Option<&R> {
        self.index
            .get(group)
            .and_then(|&slot| self.entries[slot].1.as_ref())
    }

    /// Whether `group` is reported at all (possibly with an absent row).
    pub fn contains_group(&self, group: &G) -> bool {
        self.index.contains_key(group)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&G, Option<&R>)> {
        self.entries.iter().map(|(g, r)| (g, r.as_ref()))
    }

    pub fn into_entries(self) -> Vec<(G, Option<R>)> {
        self.entries
    }
}

/// Picks, for every group present in `rows`, the row with the largest
/// `identity_key`.
///
/// When several rows share the largest identity, the first one encountered wins.
pub fn select_latest<R, I, F>(
    rows: impl IntoIterator<Item = R>,
    identity_key: F,
) -> LatestSelection<R::Group, R>
where
    R: Grouped,
    I: Ord,
    F: Fn(&R) -> I,
{
    select_latest_in(std::iter::empty(), rows, identity_key)
}

/// Like [`select_latest`], but every group in `universe` is reported even if no
/// row belongs to it; such groups map to an absent row.
///
/// Rows whose group is outside the universe are still reported, after the
/// seeded groups.
pub fn select_latest_in<R, I, F>(
    universe: impl IntoIterator<Item = R::Group>,
    rows: impl IntoIterator<Item = R>,
    identity_key: F,
) -> LatestSelection<R::Group, R>
where
    R: Grouped,
    I: Ord,
    F: Fn(&R) -> I,
{
    let mut selection = LatestSelection::with_universe(universe);
    let mut seen = 0usize;

    for row in rows {
        seen += 1;
        let slot = selection.slot(row.group_key());
        let current = &mut selection.entries[slot].1;
        let replace = match current.as_ref() {
            Some(existing) => identity_key(&row) > identity_key(existing),
            None => true,
        };
        if replace {
            *current = Some(row);
        }
    }

    debug!(rows = seen, groups = selection.len(), "selected latest rows");
    selection
}
