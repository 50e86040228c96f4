/// Generate a collision-resistant id (cuid2, lowercase alphanumeric).
///
/// Used for every primary key in the system and for error report ids.
pub fn create_id() -> String {
    cuid2::create_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_id_shape() {
        let id = create_id();
        assert!(id.len() >= 20);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_create_id_unique() {
        let a = create_id();
        let b = create_id();
        assert_ne!(a, b);
    }
}
