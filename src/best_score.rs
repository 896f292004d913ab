//! Best score persistence
//!
//! A single integer, persisted to LocalStorage on web. Storage failures are
//! logged and the score keeps living in memory for the rest of the session.

/// Durable storage for the best score
pub trait ScoreStore {
    /// Stored best score, `None` if absent or unreadable
    fn load(&self) -> Option<u64>;
    /// Persist the best score; returns false if the write failed
    fn save(&mut self, score: u64) -> bool;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    /// Simulate an unavailable backend
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            fail_writes: false,
        }
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.value
    }

    fn save(&mut self, score: u64) -> bool {
        if self.fail_writes {
            return false;
        }
        self.value = Some(score);
        true
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// Storage key shared by all variants
    pub const DEFAULT_KEY: &'static str = "bestScore";

    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Option<u64> {
        let raw = Self::storage()?.get_item(&self.key).ok()??;
        parse_stored(&raw)
    }

    fn save(&mut self, score: u64) -> bool {
        match Self::storage() {
            Some(storage) => storage.set_item(&self.key, &score.to_string()).is_ok(),
            None => false,
        }
    }
}

/// Parse a stored value; tolerates whitespace and float-formatted integers
pub fn parse_stored(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.floor() as u64)
    })
}

/// Best score with write-through persistence
#[derive(Debug, Clone)]
pub struct BestScore<S: ScoreStore> {
    value: u64,
    store: S,
}

impl<S: ScoreStore> BestScore<S> {
    /// Read the stored best score, defaulting to 0
    pub fn load(store: S) -> Self {
        let value = store.load().unwrap_or(0);
        log::info!("Loaded best score: {}", value);
        Self { value, store }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Offer a score; persists and returns true if it beats the best
    pub fn offer(&mut self, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if self.store.save(score) {
            log::info!("Best score saved ({})", score);
        } else {
            log::warn!("Could not persist best score {}, keeping it in memory", score);
        }
        true
    }
}
