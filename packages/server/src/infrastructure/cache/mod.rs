//! Translation cache implementations.

mod fifo;

pub use fifo::FifoTranslationCache;
