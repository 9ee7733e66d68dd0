use serde::{Deserialize, Serialize};

use super::{Transaction, User};

/// The aggregate root persisted as one JSON document.
///
/// The store owns the on-disk representation; services take a full in-memory
/// copy, mutate it and hand it back for a whole-document rewrite. There is no
/// partial update.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    pub users: Vec<User>,
    pub transactions: Vec<Transaction>,
}
