//! Tests for configuration constants and their relationships

#[cfg(test)]
mod tests {
    use textcollapse::io::configuration::{
        DEFAULT_COUNT, DEFAULT_LINE_DELIMITER, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_SIZE,
        DEFAULT_PADDING_LEFT, DEFAULT_PADDING_RIGHT, DEFAULT_RADIUS, INPUT_EXTENSION,
        MAX_INDIVIDUAL_PROGRESS_BARS, MAX_RADIUS, MAX_SEQUENCE_SIZE, OUTPUT_SUFFIX,
    };

    // Tests defaults lie within their limits
    #[test]
    fn test_defaults_within_limits() {
        const {
            assert!(DEFAULT_RADIUS <= MAX_RADIUS);
            assert!(DEFAULT_MAX_SIZE <= MAX_SEQUENCE_SIZE);
            assert!(DEFAULT_COUNT <= DEFAULT_MAX_ATTEMPTS);
            assert!(MAX_INDIVIDUAL_PROGRESS_BARS > 0);
        }
    }

    // Tests the padding symbols can be told apart
    // Verified by setting both paddings to the same symbol
    #[test]
    fn test_padding_symbols_differ() {
        assert_ne!(DEFAULT_PADDING_LEFT, DEFAULT_PADDING_RIGHT);
        assert!(!DEFAULT_LINE_DELIMITER.is_empty());
    }

    // Tests file naming constants
    #[test]
    fn test_file_naming() {
        assert_eq!(INPUT_EXTENSION, "txt");
        assert!(OUTPUT_SUFFIX.starts_with('_'));
    }
}
