use std::cmp::Ordering;

use crate::search::SearchItem;

/// Result cap when none is configured.
pub const DEFAULT_LIMIT: usize = 12;

/// Subsequence match of `query` in `target`, both already lowercase.
/// Each matched character scores 1, plus 1 when it directly follows the
/// previous match. `None` unless every query character is matched in order.
pub fn fuzzy_score(query: &str, target: &str) -> Option<u32> {
    let mut wanted = query.chars().peekable();
    let mut score = 0;
    let mut last: Option<usize> = None;

    for (i, c) in target.chars().enumerate() {
        let Some(&q) = wanted.peek() else { break };
        if c != q {
            continue;
        }
        wanted.next();
        score += if last.is_some_and(|l| l + 1 == i) { 2 } else { 1 };
        last = Some(i);
    }
    wanted.peek().is_none().then_some(score)
}

/// Tier priority first, then alphabetical by display ignoring case. Displays
/// differing only in case fall back to a byte comparison.
pub fn compare(a: &SearchItem, b: &SearchItem) -> Ordering {
    a.region().kind.cmp(&b.region().kind)
        .then_with(|| a.key().cmp(b.key()))
        .then_with(|| a.display().cmp(b.display()))
}

/// Rank `items` against `query`: prefix matches if there are any, otherwise
/// fuzzy subsequence matches. At most `limit` results.
pub fn search(query: &str, items: &[SearchItem], limit: usize) -> Vec<SearchItem> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<&SearchItem> = items.iter().filter(|item| item.key().starts_with(&q)).collect();
    if !hits.is_empty() {
        hits.sort_by(|a, b| compare(a, b));
        return hits.into_iter().take(limit).cloned().collect();
    }

    let mut scored: Vec<(u32, &SearchItem)> = items.iter()
        .filter_map(|item| fuzzy_score(&q, item.key()).map(|score| (score, item)))
        .collect();
    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| compare(a, b)));
    scored.into_iter().take(limit).map(|(_, item)| item.clone()).collect()
}
