//! Bulk-call slicing
//!
//! Stores impose a ceiling on how many arguments one bulk call may carry.
//! Any bulk insert or removal touching more members than the ceiling is
//! issued as sequential sub-calls inside the caller's transaction. Chunking
//! never changes observable semantics.

/// Slices a bulk member list so no single store call exceeds the ceiling.
pub(crate) fn chunks<T>(items: &[T], ceiling: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(ceiling.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_count_is_ceil_of_n_over_c() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(chunks(&items, 3).count(), 4);
        assert_eq!(chunks(&items, 5).count(), 2);
        assert_eq!(chunks(&items, 10).count(), 1);
        assert_eq!(chunks(&items, 100).count(), 1);
    }

    #[test]
    fn test_chunks_preserve_order_and_members() {
        let items: Vec<u32> = (0..7).collect();
        let rejoined: Vec<u32> = chunks(&items, 2).flatten().copied().collect();
        assert_eq!(rejoined, items);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let items: Vec<u32> = Vec::new();
        assert_eq!(chunks(&items, 4).count(), 0);
    }
}
