use super::ApiError;

pub fn validate_pagination(page: u64, page_size: u64) -> Result<(u64, u64), ApiError> {
    const MAX_PAGE_SIZE: u64 = 100;

    if page == 0 {
        return Err(ApiError::validation(
            "Invalid page: 0. Page numbers start at 1",
        ));
    }

    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(format!(
            "Invalid page_size: {}. Page size must be between 1 and {}",
            page_size, MAX_PAGE_SIZE
        )));
    }

    Ok((page, page_size))
}

pub fn validate_question(question: &str) -> Result<&str, ApiError> {
    let trimmed = question.trim();
    if trimmed.len() < 2 {
        return Err(ApiError::validation(
            "Question must be at least 2 characters",
        ));
    }
    Ok(trimmed)
}

/// Ids arrive as a comma-separated string. Non-numeric entries are dropped,
/// never rejected; a list with no usable ids just compares nothing.
#[must_use]
pub fn parse_compare_ids(raw: &str) -> Vec<i32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pagination() {
        assert!(validate_pagination(1, 10).is_ok());
        assert!(validate_pagination(50, 100).is_ok());
        assert!(validate_pagination(0, 10).is_err());
        assert!(validate_pagination(1, 0).is_err());
        assert!(validate_pagination(1, 101).is_err());
    }

    #[test]
    fn test_validate_question() {
        assert!(validate_question("Show CS courses").is_ok());
        assert!(validate_question("  ok  ").is_ok());
        assert!(validate_question("a").is_err());
        assert!(validate_question("   ").is_err());
    }

    #[test]
    fn test_parse_compare_ids() {
        assert_eq!(parse_compare_ids("7,abc,9"), vec![7, 9]);
        assert_eq!(parse_compare_ids(" 3 , 1 "), vec![3, 1]);
        assert!(parse_compare_ids("abc,def").is_empty());
        assert!(parse_compare_ids("").is_empty());
    }
}
