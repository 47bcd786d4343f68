//! Tests for sequence construction, boundaries and completion checks

#[cfg(test)]
mod tests {
    use textcollapse::algorithm::position::ResolveStrategy;
    use textcollapse::algorithm::sequence::{Sequence, SequenceConfig};
    use textcollapse::analysis::corpus::{CorpusConfig, CorpusModel};
    use textcollapse::io::configuration::MAX_SEQUENCE_SIZE;

    fn model(text: &str, radius: usize) -> CorpusModel {
        CorpusModel::from_text(text, CorpusConfig::with_radius(radius)).expect("valid corpus")
    }

    // Tests boundaries are resolved at construction
    // Verified by resolving only the first boundary position
    #[test]
    fn test_populate_resolves_boundaries() {
        let model = model("hello", 2);
        let config = model.sequence_config(6, ResolveStrategy::Weighted);
        let sequence = Sequence::populate(model.patterns(), config).expect("valid config");

        assert_eq!(sequence.len(), 10);
        assert_eq!(sequence.radius(), 2);
        assert_eq!(sequence.max_size(), 6);
        assert_eq!(sequence.interior(), 2..8);
        assert!(!sequence.is_empty());

        for index in 0..2 {
            let position = sequence.position(index).expect("boundary");
            assert_eq!(position.value(), Some(model.start_code()));
            assert_eq!(position.possible().sole(), Some(model.start_code()));
        }
        for index in 8..10 {
            let position = sequence.position(index).expect("boundary");
            assert_eq!(position.value(), Some(model.end_code()));
            assert_eq!(position.possible().sole(), Some(model.end_code()));
        }
        for index in sequence.interior() {
            assert!(!sequence.position(index).expect("interior").is_resolved());
        }
    }

    // Tests configurations that do not fit the table are rejected
    #[test]
    fn test_populate_rejects_invalid_config() {
        let model = model("ab", 1);
        let base = model.sequence_config(2, ResolveStrategy::Weighted);

        let bad_start = SequenceConfig {
            start_code: 99,
            ..base
        };
        assert!(Sequence::populate(model.patterns(), bad_start).is_err());

        let bad_end = SequenceConfig {
            end_code: model.vocabulary_size(),
            ..base
        };
        assert!(Sequence::populate(model.patterns(), bad_end).is_err());

        let too_long = SequenceConfig {
            max_size: MAX_SEQUENCE_SIZE + 1,
            ..base
        };
        assert!(Sequence::populate(model.patterns(), too_long).is_err());
    }

    // Tests a fresh sequence is neither solved nor contradicted
    #[test]
    fn test_fresh_sequence_state() {
        let model = model("ab", 1);
        let config = model.sequence_config(2, ResolveStrategy::Weighted);
        let mut sequence = Sequence::populate(model.patterns(), config).expect("valid config");

        assert_eq!(sequence.find_contradiction(), None);
        assert_eq!(sequence.values(), None);
        assert_eq!(sequence.find_unlearned_window(), Some(1));
        assert!(!sequence.is_fully_resolved());
        assert_eq!(sequence.to_string(), "0 [0, 1, 2, 3] [0, 1, 2, 3] 1");
    }

    // Tests a converged sequence resolves fully into learned windows
    // Verified by short-circuiting the auto-resolve fold
    #[test]
    fn test_sweep_then_resolve() {
        let model = model("ab", 1);
        let config = model.sequence_config(2, ResolveStrategy::Weighted);
        let mut sequence = Sequence::populate(model.patterns(), config).expect("valid config");

        sequence.sweep();
        assert!(sequence.is_fully_resolved());
        assert_eq!(sequence.values(), Some(vec![0, 2, 3, 1]));
        assert_eq!(sequence.find_unlearned_window(), None);
        assert_eq!(sequence.to_string(), "0 2 3 1");
    }

    // Tests a sequence without interior is complete immediately
    #[test]
    fn test_zero_size_sequence() {
        let model = model("ab", 1);
        let config = model.sequence_config(0, ResolveStrategy::Weighted);
        let mut sequence = Sequence::populate(model.patterns(), config).expect("valid config");

        assert_eq!(sequence.len(), 2);
        assert!(sequence.interior().is_empty());
        assert!(sequence.is_fully_resolved());
        assert_eq!(sequence.values(), Some(vec![0, 1]));
        assert_eq!(sequence.find_unlearned_window(), None);
    }

    // Tests the configuration and table are exposed unchanged
    #[test]
    fn test_accessors() {
        let model = model("abc", 1);
        let config = model.sequence_config(3, ResolveStrategy::MostFrequentCenter);
        let sequence = Sequence::populate(model.patterns(), config).expect("valid config");

        assert_eq!(sequence.config(), &config);
        assert_eq!(sequence.patterns().len(), model.patterns().len());
        assert_eq!(sequence.positions().len(), 5);
        assert!(sequence.position(5).is_none());
    }
}
