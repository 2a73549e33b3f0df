use std::collections::HashMap;
use std::hash::Hash;

/// Splits `rows` into groups, keeping both the first-appearance order of the
/// groups and the input order of rows inside each group.
pub(crate) fn partition_by<R, G, F>(rows: impl IntoIterator<Item = R>, key: F) -> Vec<(G, Vec<R>)>
where
    G: Eq + Hash + Clone,
    F: Fn(&R) -> G,
{
    let mut index: HashMap<G, usize> = HashMap::new();
    let mut groups: Vec<(G, Vec<R>)> = Vec::new();

    for row in rows {
        let group = key(&row);
        match index.get(&group) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                index.insert(group.clone(), groups.len());
                groups.push((group, vec![row]));
            }
        }
    }

    groups
}
