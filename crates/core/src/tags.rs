//! Tag name normalization and limits.

/// Maximum length of a tag name after trimming.
pub const MAX_TAG_NAME_LEN: usize = 50;

/// Normalize a tag name: trim whitespace and lowercase.
///
/// The normalized form is the uniqueness key; the original casing is kept
/// as the display name.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate a raw tag name, returning a human-readable reason on failure.
pub fn validate_tag_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Tag names must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_TAG_NAME_LEN {
        return Err(format!(
            "Tag names must be at most {MAX_TAG_NAME_LEN} characters"
        ));
    }
    Ok(())
}
