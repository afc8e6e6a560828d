use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Case-insensitive ordered-subsequence test. An empty query matches anything.
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let mut query_chars = query.chars().flat_map(char::to_lowercase).peekable();
    for ch in target.chars().flat_map(char::to_lowercase) {
        match query_chars.peek() {
            Some(&wanted) if wanted == ch => {
                query_chars.next();
            }
            Some(_) => {}
            None => break,
        }
    }

    query_chars.peek().is_none()
}

/// Best-scoring id among those that [`fuzzy_match`] the query.
pub fn best_match<'a, I>(query: &str, ids: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if query.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    ids.into_iter()
        .filter(|id| fuzzy_match(query, id))
        .map(|id| (matcher.fuzzy_match(id, query).unwrap_or(0), id))
        .max_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.len().cmp(&a.1.len()))
                .then_with(|| b.1.cmp(a.1))
        })
        .map(|(_, id)| id)
}
