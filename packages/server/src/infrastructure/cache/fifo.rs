//! Bounded in-memory translation cache with strict FIFO eviction.
//!
//! Insertion order is the only eviction signal: reads never refresh an
//! entry, and overwriting an existing key keeps its original position.
//! Size-check, eviction and insertion happen under one lock.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CacheKey, TranslationCache, TranslationResult};

#[derive(Default)]
struct FifoStore {
    entries: HashMap<CacheKey, TranslationResult>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<CacheKey>,
}

pub struct FifoTranslationCache {
    store: Mutex<FifoStore>,
    max_size: NonZeroUsize,
}

impl FifoTranslationCache {
    pub fn new(max_size: NonZeroUsize) -> Self {
        Self {
            store: Mutex::new(FifoStore::default()),
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size.get()
    }
}

#[async_trait]
impl TranslationCache for FifoTranslationCache {
    async fn get(&self, text: &str, source: &str, target: &str) -> Option<TranslationResult> {
        let key = CacheKey::new(text, source, target);
        let store = self.store.lock().await;
        let hit = store.entries.get(&key).cloned();
        if hit.is_some() {
            tracing::debug!("Cache hit: {}", key.preview());
        }
        hit
    }

    async fn set(&self, text: &str, source: &str, target: &str, result: TranslationResult) {
        let key = CacheKey::new(text, source, target);
        let mut store = self.store.lock().await;

        if let Some(existing) = store.entries.get_mut(&key) {
            *existing = result;
            tracing::debug!("Cache overwrite: {}", key.preview());
            return;
        }

        if store.entries.len() >= self.max_size.get()
            && let Some(oldest) = store.order.pop_front()
        {
            store.entries.remove(&oldest);
            tracing::debug!("Cache eviction: {}", oldest.preview());
        }

        tracing::debug!("Cache set: {}", key.preview());
        store.order.push_back(key.clone());
        store.entries.insert(key, result);
    }

    async fn clear(&self) {
        let mut store = self.store.lock().await;
        store.entries.clear();
        store.order.clear();
        tracing::info!("Cache cleared");
    }

    async fn size(&self) -> usize {
        let store = self.store.lock().await;
        store.entries.len()
    }
}
