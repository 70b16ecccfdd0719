//! Draft and post identifier minting.
//!
//! Ids look like `draft-1718000000000-k3v9qa07`: a prefix, the wall-clock
//! millisecond timestamp, and an 8-character base36 suffix. The suffix is 6
//! random characters followed by the 2 low base36 digits of a process-wide
//! mint counter. Those digits wrap every 1296 ids, so ids minted in the same
//! millisecond are kept apart by the counter for runs shorter than that and
//! by the random part beyond it.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix for ids minted for fresh editing sessions.
pub const DRAFT_ID_PREFIX: &str = "draft";
/// Prefix for ids minted for newly published posts.
pub const POST_ID_PREFIX: &str = "blog";

const RANDOM_LEN: usize = 6;
const SEQUENCE_LEN: usize = 2;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static MINT_COUNTER: AtomicU64 = AtomicU64::new(0);

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

fn random_suffix() -> String {
    let sequence = MINT_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut rng = rand::thread_rng();
    let mut mixed = rng.gen::<u64>() ^ sequence.rotate_left(29);
    let mut suffix = String::with_capacity(RANDOM_LEN + SEQUENCE_LEN);
    for _ in 0..RANDOM_LEN {
        suffix.push(BASE36[(mixed % 36) as usize] as char);
        mixed /= 36;
    }
    // Low digits of the sequence keep same-millisecond ids distinct.
    suffix.push(BASE36[(sequence % 36) as usize] as char);
    suffix.push(BASE36[((sequence / 36) % 36) as usize] as char);
    suffix
}

fn mint(prefix: &str) -> String {
    format!("{}-{}-{}", prefix, unix_millis(), random_suffix())
}

/// Mint a new draft id for a fresh editing session.
pub fn generate_draft_id() -> String {
    mint(DRAFT_ID_PREFIX)
}

/// Mint a new post id for a document published for the first time.
pub fn generate_post_id() -> String {
    mint(POST_ID_PREFIX)
}
