//! Premium tutorial unlock-code engine.
//!
//! Unlock codes are human-entered shared secrets in `XXXX-XXXX-XXXX`
//! form, drawn from an alphabet that excludes visually confusable
//! characters (0/O, 1/I). Comparison is case- and separator-
//! insensitive plain string equality: the code gates content rendering,
//! it is not an authentication credential.

use rand::Rng;

/// Characters allowed in generated unlock codes.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of alphanumeric characters in a code (excluding dashes).
pub const CODE_CHARS: usize = 12;

/// Characters per dash-separated group.
pub const CODE_GROUP: usize = 4;

/// Normalize a code for comparison: strip dash separators, uppercase.
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Whether a supplied code matches the stored code.
///
/// Invariant under dash placement and letter case:
/// `"AB12-CD34-EF56"`, `"ab12cd34ef56"`, and `"AB12CD34EF56"` all
/// match a stored `"AB12-CD34-EF56"`.
pub fn codes_match(supplied: &str, stored: &str) -> bool {
    normalize_code(supplied) == normalize_code(stored)
}

/// Generate a fresh unlock code: 12 characters in 3 groups of 4,
/// separated by dashes (total length 14).
///
/// No uniqueness check against existing codes is performed; codes are
/// assigned by hand at low volume.
pub fn generate_unlock_code() -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(CODE_CHARS + 2);

    for i in 0..CODE_CHARS {
        if i > 0 && i % CODE_GROUP == 0 {
            code.push('-');
        }
        let idx = rng.random_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }

    code
}
