use crc32fast::Hasher;

/// Source of fresh identifiers for blocks and pages.
///
/// Ids must never repeat within a configuration. Callers may plug in their
/// own scheme; [`IdGenerator`] is the default.
pub trait IdSource {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Derive a short seed from a namespace using CRC32.
pub fn seed_for(namespace: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(namespace.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Seeded sequential id generator: `<prefix>_<seed>_<count>`.
///
/// The seed mixes a namespace with the creation time so that two builder
/// sessions against the same site do not hand out the same ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(namespace: &str) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self::from_seed(seed_for(&format!("{}@{}", namespace, now)))
    }

    /// Deterministic generator, mainly for tests and replays.
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}_{}_{}", prefix, self.seed, self.count)
    }
}
