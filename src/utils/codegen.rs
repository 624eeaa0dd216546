// src/utils/codegen.rs

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::error::AppError;

/// 32 symbols: the 36 alphanumerics minus the visually ambiguous I, O, 0, 1.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const CODE_PREFIX: &str = "CAT";

fn group(rng: &mut ThreadRng) -> String {
    (0..4)
        .map(|_| {
            let i = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[i] as char
        })
        .collect()
}

/// Produces one well-formed activation code, e.g. "CAT-A7QX-M3KP".
/// Pure draw from the alphabet; uniqueness is the caller's concern.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    format!("{}-{}-{}", CODE_PREFIX, group(&mut rng), group(&mut rng))
}

/// Draws until exactly `count` distinct codes exist.
///
/// Collisions are negligible in a 32^8 space, but duplicates are still
/// deduplicated rather than assumed away.
pub fn generate_batch(count: usize) -> Result<Vec<String>, AppError> {
    if count == 0 {
        return Err(AppError::BadRequest(
            "Code count must be greater than zero".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(count);
    let mut codes = Vec::with_capacity(count);
    while codes.len() < count {
        let code = generate();
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..200 {
            let code = generate();
            assert_eq!(code.len(), 13);

            let parts: Vec<&str> = code.split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "CAT");
            for part in &parts[1..] {
                assert_eq!(part.len(), 4);
                assert!(
                    part.bytes().all(|b| CODE_ALPHABET.contains(&b)),
                    "unexpected character in {}",
                    code
                );
            }
        }
    }

    #[test]
    fn codes_never_contain_ambiguous_characters() {
        for _ in 0..200 {
            let code = generate();
            assert!(!code[4..].contains(['I', 'O', '0', '1']), "{}", code);
        }
    }

    #[test]
    fn batch_returns_exactly_n_distinct_codes() {
        let codes = generate_batch(100).unwrap();
        assert_eq!(codes.len(), 100);

        let distinct: std::collections::HashSet<&String> = codes.iter().collect();
        assert_eq!(distinct.len(), 100);
    }

    #[test]
    fn batch_of_zero_is_an_input_error() {
        assert!(generate_batch(0).is_err());
    }
}
