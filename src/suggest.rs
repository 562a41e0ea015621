//! Edit-distance matching for "Perhaps you meant ..." hints.

/// Edit distance used when suggesting option names.
pub const OPTION_MAX_DISTANCE: usize = 4;

/// Strings longer than this (in characters) are never compared.
pub const MAX_COMPARED_LEN: usize = 255;

/// Levenshtein distance between `a` and `b`, or `None` once it is known to
/// exceed `max_distance`.
///
/// Distance is counted in characters, with unit cost for insertion,
/// deletion and substitution.
pub fn bounded_levenshtein(a: &str, b: &str, max_distance: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len().abs_diff(b.len()) > max_distance {
        return None;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        let mut row_min = curr[0];
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
            row_min = row_min.min(curr[j]);
        }
        // Every later row is at least this row's minimum.
        if row_min > max_distance {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[b.len()];
    (distance <= max_distance).then_some(distance)
}

/// Returns the candidate closest to `query`, if any is within
/// `max_distance` edits.
///
/// Candidates are scanned in order and only a strictly smaller distance
/// replaces the current best, so ties go to the earliest candidate.
pub fn closest<'a, I>(query: &str, candidates: I, max_distance: usize) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if query.is_empty() || query.chars().count() > MAX_COMPARED_LEN {
        return None;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for candidate in candidates {
        if candidate.is_empty() || candidate.chars().count() > MAX_COMPARED_LEN {
            continue;
        }
        let Some(distance) = bounded_levenshtein(query, candidate, max_distance) else {
            continue;
        };
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}
