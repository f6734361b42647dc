//! Tests for `TileBitset` operations including set operations and conversions

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;

    // Verifies new TileBitset is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = TileBitset::new(10);
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.capacity(), 10);
    }

    // Tests insertion and containment checking with 0-based indices
    // Verified by removing the bit-setting logic from insert method
    #[test]
    fn test_insert_and_contains() {
        let mut bitset = TileBitset::new(10);
        bitset.insert(0);
        bitset.insert(5);
        assert!(bitset.contains(0));
        assert!(bitset.contains(5));
        assert!(!bitset.contains(3));
        assert_eq!(bitset.count(), 2);
    }

    // Tests out-of-range indices are ignored rather than panicking
    // Verified by removing the capacity guard in insert
    #[test]
    fn test_insert_out_of_range_ignored() {
        let mut bitset = TileBitset::new(3);
        bitset.insert(3);
        bitset.insert(100);
        assert!(bitset.is_empty());
        assert!(!bitset.contains(100));
    }

    // Tests remove reports whether the tile was present
    // Verified by returning true unconditionally from remove
    #[test]
    fn test_remove_reports_previous_state() {
        let mut bitset = TileBitset::all(4);
        assert!(bitset.remove(2));
        assert!(!bitset.remove(2));
        assert!(!bitset.remove(9));
        assert_eq!(bitset.to_vec(), vec![0, 1, 3]);
    }

    // Tests set_single clears every other tile
    // Verified by skipping the fill before inserting
    #[test]
    fn test_set_single() {
        let mut bitset = TileBitset::all(5);
        bitset.set_single(3);
        assert_eq!(bitset.to_vec(), vec![3]);
        assert_eq!(bitset.first(), Some(3));
    }

    // Tests intersection of two bitsets returns correct elements
    // Verified by changing intersection operation to union operation
    #[test]
    fn test_intersection() {
        let set1 = TileBitset::from_indices(&[1, 3, 5], 10);
        let set2 = TileBitset::from_indices(&[3, 5, 7], 10);

        let intersection = set1.intersection(&set2);
        assert_eq!(intersection.to_vec(), vec![3, 5]);
    }

    // Tests union adds tiles from both sets
    // Verified by replacing union with intersection
    #[test]
    fn test_union_with() {
        let mut set1 = TileBitset::from_indices(&[0, 2], 4);
        let set2 = TileBitset::from_indices(&[2, 3], 4);
        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![0, 2, 3]);
    }

    // Tests complement flips exactly the tiles within capacity
    // Verified by returning a clone instead of the negation
    #[test]
    fn test_complement() {
        let bitset = TileBitset::from_indices(&[0, 3], 5);
        let complement = bitset.complement();
        assert_eq!(complement.to_vec(), vec![1, 2, 4]);
        assert_eq!(complement.capacity(), 5);
        assert!(TileBitset::all(5).complement().is_empty());
    }

    // Tests creation of bitset with all bits set
    // Verified by initializing all bits to 0 instead of 1
    #[test]
    fn test_all_bits_set() {
        let bitset = TileBitset::all(5);
        for i in 0..5 {
            assert!(bitset.contains(i));
        }
        assert_eq!(bitset.count(), 5);
        assert_eq!(bitset.iter_ones().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    // Tests display output lists the members
    // Verified by omitting the tile list from the format string
    #[test]
    fn test_display() {
        let bitset = TileBitset::single(4, 2);
        assert_eq!(bitset.to_string(), "TileBitset(1 tiles: [2])");
    }
}
