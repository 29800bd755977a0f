//! Fixed-capacity, time-bounded quote cache.
//!
//! Entries expire `ttl` after insertion. When more than `capacity` tickers
//! are held, the least recently inserted one is evicted. Failed lookups are
//! never cached.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

use super::quotes_model::Quote;
use crate::constants::{QUOTE_CACHE_CAPACITY, QUOTE_CACHE_TTL_SECS};

#[derive(Debug)]
struct CachedQuote {
    quote: Quote,
    inserted_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CachedQuote>,
    /// Tickers in insertion order, oldest first.
    order: VecDeque<String>,
}

impl CacheState {
    fn remove(&mut self, ticker: &str) {
        if self.entries.remove(ticker).is_some() {
            self.order.retain(|t| t != ticker);
        }
    }
}

/// Thread-safe quote cache keyed by ticker.
#[derive(Debug)]
pub struct QuoteCache {
    capacity: usize,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(
            QUOTE_CACHE_CAPACITY,
            Duration::from_secs(QUOTE_CACHE_TTL_SECS),
        )
    }
}

impl QuoteCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    // The state is always left consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a fresh entry for `ticker`, dropping it if it has expired.
    pub fn get(&self, ticker: &str) -> Option<Quote> {
        let mut state = self.lock();
        let expired = match state.entries.get(ticker) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.quote.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            state.remove(ticker);
        }
        None
    }

    /// Stores `quote` under its ticker, replacing any previous entry.
    pub fn insert(&self, quote: Quote) {
        let mut state = self.lock();
        let ticker = quote.ticker.clone();
        state.remove(&ticker);
        state.order.push_back(ticker.clone());
        state.entries.insert(
            ticker,
            CachedQuote {
                quote,
                inserted_at: Instant::now(),
            },
        );

        while state.entries.len() > self.capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.lock().entries.contains_key(ticker)
    }
}
