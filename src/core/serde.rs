/// Serde helper functions for custom serialization

/// Skip serializing if value is zero
pub fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_helpers() {
        assert!(is_zero_u64(&0));
        assert!(!is_zero_u64(&7));
    }
}
