//! In-memory list filtering.
//!
//! List endpoints fetch the full candidate set once and narrow it here,
//! mirroring how the pages re-filter on every keystroke. Both criteria are
//! ANDed; an empty search term or an empty/"All" tag is the identity filter.
//! Output is a subsequence of the input — original order is preserved.

/// Content that can be matched by the list filter.
pub trait Searchable {
    /// Text fields searched by the case-insensitive substring match.
    fn haystacks(&self) -> Vec<&str>;

    /// Tags (or category) matched exactly, case-sensitively.
    fn tags(&self) -> &[String];
}

/// Narrow `items` by an optional substring and an optional exact tag.
pub fn apply<T: Searchable>(items: Vec<T>, search: Option<&str>, tag: Option<&str>) -> Vec<T> {
    let search = search.map(str::trim).filter(|s| !s.is_empty());
    let tag = tag.filter(|t| !t.is_empty() && *t != "All");

    if search.is_none() && tag.is_none() {
        return items;
    }

    let needle = search.map(str::to_lowercase);

    items
        .into_iter()
        .filter(|item| {
            if let Some(tag) = tag
                && !item.tags().iter().any(|t| t == tag)
            {
                return false;
            }

            if let Some(needle) = &needle {
                return item
                    .haystacks()
                    .iter()
                    .any(|h| h.to_lowercase().contains(needle))
                    || item
                        .tags()
                        .iter()
                        .any(|t| t.to_lowercase().contains(needle));
            }

            true
        })
        .collect()
}
