use rand::{distr::Alphanumeric, Rng};

use crate::utils::validation::RANDOM_ID_LEN;

/// Generates an 8-char alphanumeric public id for a bet mapping.
pub fn generate_random_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(RANDOM_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::is_valid_random_id;

    #[test]
    fn generated_ids_pass_validation() {
        for _ in 0..100 {
            let id = generate_random_id();
            assert_eq!(id.len(), RANDOM_ID_LEN);
            assert!(is_valid_random_id(&id), "invalid id generated: {}", id);
        }
    }
}
