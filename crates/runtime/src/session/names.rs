//! Random names for wild creatures and rival trainers.

use rand::Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 25;

/// Capitalised run of random letters, 3 to 25 characters long.
pub fn random_name(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(MIN_NAME_LEN..=MAX_NAME_LEN);
    (0..len)
        .map(|i| {
            let letter = char::from(LETTERS[rng.gen_range(0..LETTERS.len())]);
            if i == 0 {
                letter.to_ascii_uppercase()
            } else {
                letter
            }
        })
        .collect()
}
