//! Store trait definition

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use crate::domain::StoreDocument;

const ID_SUFFIX_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Persistence seam for the store document.
///
/// Every request goes through a full `load` → mutate → `save` cycle with no
/// locking or transaction boundary, so overlapping requests can lose one of
/// two concurrent mutations (last `save` wins). Acceptable for the
/// single-user deployments this targets; a transactional backend can be
/// swapped in behind this trait to close the race.
#[async_trait]
pub trait Store: Send + Sync {
    /// Current store document. Degrades to an empty document when the
    /// backing state cannot be read; never fails.
    async fn load(&self) -> StoreDocument;

    /// Overwrite the persisted document with `doc`. Best-effort: failures
    /// are logged and swallowed, the caller's in-memory copy stands.
    async fn save(&self, doc: &StoreDocument);

    /// Fresh identifier: Unix milliseconds plus a random base36 suffix.
    /// Unique with overwhelming probability; no collision check.
    fn new_id(&self) -> String {
        generate_id()
    }
}

pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_CHARS[rng.gen_range(0..ID_SUFFIX_CHARS.len())] as char)
        .collect();
    format!("{}{}", Utc::now().timestamp_millis(), suffix)
}
