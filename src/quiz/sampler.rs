use std::collections::HashSet;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;

/// Picks `count` distinct values from `pool`, never `exclude`, in random order.
///
/// Returns `None` when the pool holds fewer than `count` eligible distinct
/// values; callers skip the question in that case.
pub fn sample<T, R>(pool: &[T], count: usize, exclude: Option<&T>, rng: &mut R) -> Option<Vec<T>>
where
    T: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut eligible = pool
        .iter()
        .filter(|item| Some(*item) != exclude)
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect::<Vec<T>>();

    if eligible.len() < count {
        return None;
    }
    eligible.shuffle(rng);
    eligible.truncate(count);
    Some(eligible)
}

pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(rng);
    items
}

pub fn options_with<R: Rng + ?Sized>(correct: &str, distractors: Vec<String>, rng: &mut R) -> Vec<String> {
    let mut options = distractors;
    options.push(correct.to_string());
    options.shuffle(rng);
    options
}

// First-seen order, empty values dropped
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
