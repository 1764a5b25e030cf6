//! Validation rules for note content and change comments.

use crate::error::CoreError;

/// Maximum note content length in characters.
pub const MAX_CONTENT_LENGTH: usize = 100_000;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Validate note content for a commit. The empty string is a valid note
/// body; only oversized content is rejected.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Note content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a change comment: non-empty after trimming, bounded length.
///
/// Returns the trimmed text so callers store the canonical form.
pub fn validate_comment(content: &str) -> Result<&str, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}
