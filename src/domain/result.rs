//! Result type alias for tabscrub

use super::errors::ScrubError;

/// Result type alias for tabscrub operations
///
/// # Examples
///
/// ```
/// use tabscrub::domain::result::Result;
/// use tabscrub::domain::errors::ScrubError;
///
/// fn failing_function() -> Result<()> {
///     Err(ScrubError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScrubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
