//! TTL cache for generated responses.
//!
//! Identical prompts within the TTL window are served from memory so the
//! hosted provider is not billed twice for the same question.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use super::{Generation, GenerationRequest};

struct CacheEntry {
    generation: Generation,
    inserted_at: Instant,
}

/// Bounded TTL cache keyed by a hash of the full request.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_entries: usize,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Cache key for a request: SHA-256 over prompt, system prompt, and
    /// sampling parameters.
    pub fn key_for(request: &GenerationRequest) -> String {
        let mut hasher = Sha256::new();
        hasher.update(request.prompt.as_bytes());
        hasher.update(b":");
        hasher.update(request.system_prompt.as_bytes());
        hasher.update(b":");
        hasher.update(format!("{:.3}:{}", request.temperature, request.max_tokens).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Look up a live entry, dropping it if expired.
    pub fn get(&self, key: &str) -> Option<Generation> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                Some(entry.generation.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert an entry, evicting expired (then oldest) entries at capacity.
    pub fn insert(&self, key: String, generation: Generation) {
        let mut entries = self.entries.lock();

        if entries.len() >= self.max_entries {
            let ttl = self.ttl;
            entries.retain(|_, e| e.inserted_at.elapsed() < ttl);

            // Still full after pruning: drop the oldest entry
            if entries.len() >= self.max_entries {
                if let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                generation,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
