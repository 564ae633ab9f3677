use serde::{Deserialize, Serialize};

/// One page of a filtered list together with the size of the whole result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    /// Cuts `[offset, offset + limit)` out of the already filtered items.
    /// No limit means "everything after offset".
    pub fn paginate(items: Vec<T>, offset: Option<usize>, limit: Option<usize>) -> Self {
        let total = items.len();
        let offset = offset.unwrap_or(0);
        let items = match limit {
            Some(limit) => items.into_iter().skip(offset).take(limit).collect(),
            None => items.into_iter().skip(offset).collect(),
        };
        Self { items, total }
    }
}

/// Case-insensitive "contains" used by the list filters; an empty needle matches
pub fn contains_ci(haystack: Option<&str>, needle: Option<&str>) -> bool {
    let needle = match needle.map(str::trim) {
        None | Some("") => return true,
        Some(n) => n.to_lowercase(),
    };
    haystack
        .map(|h| h.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginates_after_counting() {
        let page = Page::paginate((1..=10).collect::<Vec<_>>(), Some(3), Some(4));
        assert_eq!(page.items, vec![4, 5, 6, 7]);
        assert_eq!(page.total, 10);

        let tail = Page::paginate((1..=10).collect::<Vec<_>>(), Some(8), None);
        assert_eq!(tail.items, vec![9, 10]);

        let past_end = Page::paginate((1..=3).collect::<Vec<_>>(), Some(5), Some(2));
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 3);
    }

    #[test]
    fn contains_ignores_case_and_empty_needles() {
        assert!(contains_ci(Some("Budi Santoso"), Some("santo")));
        assert!(contains_ci(Some("Budi"), Some("")));
        assert!(contains_ci(None, None));
        assert!(!contains_ci(None, Some("x")));
        assert!(!contains_ci(Some("Siti"), Some("budi")));
    }
}
