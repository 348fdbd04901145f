use std::sync::Arc;
use tinyrand::RandRange;
use tinyrand_std::thread_rand;

// Lowercase, lookalikes (i, l, o, 0, 1) left out.
const ALPHABET: &[u8] = b"abcdefghjkmnpqrstuvwxyz23456789";
const ID_LEN: usize = 10;

/// Short random id for a connected client.
pub fn client_id() -> Arc<str> {
    let mut rng = thread_rand();
    let id: String = (0..ID_LEN)
        .map(|_| ALPHABET[rng.next_range(0..ALPHABET.len())] as char)
        .collect();
    Arc::from(id)
}
