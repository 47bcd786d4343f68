//! Tests for `SymbolSet` membership and iteration

#[cfg(test)]
mod tests {
    use textcollapse::algorithm::symbol_set::SymbolSet;

    // Verifies a new set is empty
    // Verified by initializing the bits to 1
    #[test]
    fn test_new_set_is_empty() {
        let set = SymbolSet::new(8);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.capacity(), 8);
    }

    // Tests insertion and containment
    // Verified by removing the bit-setting logic from insert
    #[test]
    fn test_insert_and_contains() {
        let mut set = SymbolSet::new(8);
        set.insert(5);
        set.insert(2);
        assert!(set.contains(5));
        assert!(set.contains(2));
        assert!(!set.contains(3));
        assert_eq!(set.len(), 2);
    }

    // Tests out-of-range codes are ignored
    #[test]
    fn test_out_of_range_codes_are_never_members() {
        let mut set = SymbolSet::new(4);
        set.insert(10);
        assert!(set.is_empty());
        assert!(!set.contains(10));
        assert!(!set.remove(10));
    }

    // Tests remove reports prior membership
    // Verified by always returning true from remove
    #[test]
    fn test_remove_reports_presence() {
        let mut set = SymbolSet::new(4);
        set.insert(1);
        assert!(set.remove(1));
        assert!(!set.remove(1));
        assert!(set.is_empty());
    }

    // Tests sole only answers for single-member sets
    #[test]
    fn test_sole() {
        let mut set = SymbolSet::new(6);
        assert_eq!(set.sole(), None);

        set.insert(4);
        assert_eq!(set.sole(), Some(4));

        set.insert(0);
        assert_eq!(set.sole(), None);
    }

    // Tests iteration order is ascending regardless of insertion order
    #[test]
    fn test_iter_ascending() {
        let mut set = SymbolSet::new(10);
        for code in [7, 1, 4] {
            set.insert(code);
        }
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 4, 7]);
    }

    // Tests singleton construction and display
    #[test]
    fn test_singleton_and_display() {
        let set = SymbolSet::singleton(5, 3);
        assert_eq!(set.sole(), Some(3));
        assert_eq!(set.capacity(), 5);
        assert_eq!(set.to_string(), "SymbolSet(1 symbols: [3])");
    }
}
