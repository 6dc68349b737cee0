use rand::Rng;

/// Draws `length` characters uniformly from `alphabet` using the thread-local CSPRNG.
///
/// An empty alphabet yields an empty string.
pub fn random_string_from(alphabet: &[u8], length: usize) -> String {
    if alphabet.is_empty() {
        return String::new();
    }
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect()
}
