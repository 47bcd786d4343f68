//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use textcollapse::io::error::{invalid_parameter, invalid_source};
    use textcollapse::{AlgorithmError, Contradiction};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AlgorithmError::FileSystem {
            path: "/tmp/corpus.txt".into(),
            operation: "read corpus",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read corpus"));
        assert!(message.contains("/tmp/corpus.txt"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("radius", &99, &"must not exceed 64");

        let message = error.to_string();
        assert!(message.contains("radius"));
        assert!(message.contains("99"));
        assert!(message.contains("must not exceed 64"));
        assert!(error.source().is_none());
    }

    // Tests source data and symbol errors
    #[test]
    fn test_source_and_symbol_errors() {
        assert!(
            invalid_source(&"no samples")
                .to_string()
                .contains("no samples")
        );

        let code = AlgorithmError::InvalidSymbolCode {
            code: 12,
            vocabulary_size: 5,
        };
        assert!(code.to_string().contains("12"));
        assert!(code.to_string().contains('5'));

        let symbol = AlgorithmError::UnknownSymbol { symbol: 'q' };
        assert!(symbol.to_string().contains("'q'"));
    }

    // Tests io errors convert through the question mark operator
    #[test]
    fn test_from_io_error() {
        let error: AlgorithmError = std::io::Error::other("boom").into();
        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
    }

    // Tests contradictions report their position
    #[test]
    fn test_contradiction_display() {
        let empty = Contradiction::EmptyPosition {
            index: 4,
            iteration: 9,
        };
        assert_eq!(empty.index(), 4);
        assert_eq!(
            empty.to_string(),
            "Position 4 has no possible symbols (iteration 9)"
        );

        let unlearned = Contradiction::UnlearnedWindow { index: 2 };
        assert_eq!(unlearned.index(), 2);
        assert!(unlearned.to_string().contains("unlearned window"));
    }
}
