use rand::{Rng, rngs::OsRng};

/// Literal prefix carried by every issued secret.
pub const SECRET_PREFIX: &str = "dandi";

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SEGMENT_LEN: usize = 9;

/// How many leading characters of a secret stay visible in its masked form.
const MASK_VISIBLE_LEN: usize = 6;
/// Fixed number of mask characters, independent of the true secret length
/// so the masked form never leaks how long a secret is.
const MASK_FILL_LEN: usize = 25;

/// Generates a fresh bearer secret: `dandi-<9 base36 chars>-<9 base36 chars>`.
///
/// Segments are drawn from the OS entropy source. Uniqueness is not checked
/// here; the storage layer's UNIQUE constraint surfaces the (negligibly
/// likely) collision instead of letting it pass silently.
pub fn generate_secret() -> String {
    format!(
        "{}-{}-{}",
        SECRET_PREFIX,
        random_segment(),
        random_segment()
    )
}

/// Display-safe rendering of a secret: first 6 characters followed by
/// exactly 25 `*` characters.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(MASK_VISIBLE_LEN).collect();
    format!("{}{}", visible, "*".repeat(MASK_FILL_LEN))
}

fn random_segment() -> String {
    let mut rng = OsRng;
    (0..SEGMENT_LEN)
        .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_has_expected_shape() {
        let secret = generate_secret();
        let parts: Vec<&str> = secret.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], SECRET_PREFIX);
        for segment in &parts[1..] {
            assert_eq!(segment.len(), SEGMENT_LEN);
            assert!(
                segment
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn consecutive_secrets_differ() {
        assert_ne!(generate_secret(), generate_secret());
    }

    #[test]
    fn mask_keeps_first_six_chars_and_fixed_fill() {
        let secret = generate_secret();
        let masked = mask_secret(&secret);

        assert_eq!(masked.len(), MASK_VISIBLE_LEN + MASK_FILL_LEN);
        assert_eq!(&masked[..MASK_VISIBLE_LEN], &secret[..MASK_VISIBLE_LEN]);
        assert!(masked[MASK_VISIBLE_LEN..].chars().all(|c| c == '*'));
        assert_ne!(masked, secret);
    }

    #[test]
    fn mask_width_is_independent_of_secret_length() {
        let short = mask_secret("dandi");
        let long = mask_secret(&generate_secret());

        assert!(short.ends_with(&"*".repeat(MASK_FILL_LEN)));
        assert_eq!(long.len(), MASK_VISIBLE_LEN + MASK_FILL_LEN);
    }
}
