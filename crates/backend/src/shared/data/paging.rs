/// OFFSET for a 1-based page; pages past `i64::MAX` rows are capped there,
/// which SQLite answers with an empty page.
pub fn page_offset(page: u64, per_page: u64) -> i64 {
    page.saturating_sub(1)
        .checked_mul(per_page)
        .and_then(|offset| i64::try_from(offset).ok())
        .unwrap_or(i64::MAX)
}

/// LIMIT for a page size
pub fn page_limit(per_page: u64) -> i64 {
    i64::try_from(per_page).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_of_ordinary_pages() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 25), 50);
        assert_eq!(page_offset(0, 10), 0);
    }

    #[test]
    fn huge_pages_are_capped() {
        assert_eq!(page_offset(u64::MAX, 100), i64::MAX);
        assert_eq!(page_offset(u64::MAX / 2, 2), i64::MAX);
        assert_eq!(page_offset(i64::MAX as u64 + 2, 1), i64::MAX);
        assert_eq!(page_limit(u64::MAX), i64::MAX);
    }
}
