use crate::NodeId;
use crc32fast::Hasher;
use std::time::{SystemTime, UNIX_EPOCH};

/// Derive an id seed from a document name and a salt using CRC32
pub fn get_seed(name: &str, salt: u128) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    hasher.update(&salt.to_le_bytes());
    format!("{:08x}", hasher.finalize())
}

/// Sequential id generator for blocks minted during one editing session.
///
/// Ids have the form `<seed>-<n>`; the seed is salted with the clock so two
/// sessions over the same document do not hand out the same ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        let salt = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        Self::from_seed(get_seed(name, salt))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId::new(format!("{}-{}", self.seed, self.count))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
