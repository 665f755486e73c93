//! Field validation rules shared by the form layer and the wire boundary.

/// Validation rules for a single string field.
/// Copy trait for efficient passing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Rules with a mandatory length window.
    pub const fn length(min: usize, max: usize) -> Self {
        Self {
            required: true,
            min_length: Some(min),
            max_length: Some(max),
        }
    }

    /// Validate a string value against the rules.
    ///
    /// When both bounds are present the error message names the full window
    /// ("must be between .. and .. characters long") so the user sees the
    /// whole constraint, not just the bound that tripped.
    pub fn validate_str(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} must not be empty", field_label));
        }

        let len = value.chars().count();
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if len < min || len > max => Err(format!(
                "{} must be between {} and {} characters long",
                field_label, min, max
            )),
            (Some(min), None) if len < min => Err(format!(
                "{} must be at least {} characters long",
                field_label, min
            )),
            (None, Some(max)) if len > max => Err(format!(
                "{} must be at most {} characters long",
                field_label, max
            )),
            _ => Ok(()),
        }
    }
}

/// Incident title: 3..=50 characters.
pub const TITLE_RULES: ValidationRules = ValidationRules::length(3, 50);

/// Incident description: 3..=500 characters.
pub const DESCRIPTION_RULES: ValidationRules = ValidationRules::length(3, 500);

pub fn validate_title(title: &str) -> Result<(), String> {
    TITLE_RULES.validate_str(title, "Title")
}

pub fn validate_description(description: &str) -> Result<(), String> {
    DESCRIPTION_RULES.validate_str(description, "Description")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("ok").is_err());
        assert!(validate_title("bug").is_ok());
        assert!(validate_title(&"x".repeat(50)).is_ok());
        assert!(validate_title(&"x".repeat(51)).is_err());
    }

    #[test]
    fn title_message_names_the_window() {
        let err = validate_title("ok").unwrap_err();
        assert_eq!(err, "Title must be between 3 and 50 characters long");
    }

    #[test]
    fn description_bounds() {
        assert!(validate_description("ab").is_err());
        assert!(validate_description("abc").is_ok());
        assert!(validate_description(&"x".repeat(500)).is_ok());
        let err = validate_description(&"x".repeat(501)).unwrap_err();
        assert_eq!(err, "Description must be between 3 and 500 characters long");
    }

    #[test]
    fn bounds_count_characters_not_bytes() {
        // 3 multibyte characters satisfy the minimum even though the byte
        // length is larger.
        assert!(validate_title("äöü").is_ok());
    }
}
