use serde::Serialize;
use std::collections::HashMap;

/// A category name and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
}

impl RankedCount {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Counts occurrences and sorts them by descending count.
///
/// Ties keep the order in which each name first appeared in `values`.
pub fn rank_by_frequency<'a, I>(values: I) -> Vec<RankedCount>
where
    I: IntoIterator<Item = &'a str>,
{
    // name -> (first position, count)
    let mut tally: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        tally.entry(value).or_insert((idx, 0)).1 += 1;
    }

    let mut ranked: Vec<_> = tally.into_iter().collect();
    ranked.sort_by(|(_, (first_a, count_a)), (_, (first_b, count_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });

    ranked
        .into_iter()
        .map(|(name, (_, count))| RankedCount::new(name, count))
        .collect()
}
