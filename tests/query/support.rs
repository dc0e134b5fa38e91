//! Stores for exercising the query layer.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use blogkv::{InMemoryKvStore, KvError, KvStore, Post, PostQuery};

/// Wraps the in-memory store, sleeping on every `get` and recording how
/// many reads were in flight at once.
#[derive(Clone, Default)]
pub struct SlowStore {
    inner: InMemoryKvStore,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl KvStore for SlowStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);
        let result = self.inner.get(key);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn list_keys(&self) -> Result<Vec<String>, KvError> {
        self.inner.list_keys()
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), KvError> {
        self.inner.put(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool, KvError> {
        self.inner.delete(key)
    }
}

/// Lists keys fine but fails reads of one key.
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: InMemoryKvStore,
    pub failing_key: String,
}

impl KvStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        if key == self.failing_key {
            return Err(KvError::Unavailable("read timed out".into()));
        }
        self.inner.get(key)
    }

    fn list_keys(&self) -> Result<Vec<String>, KvError> {
        self.inner.list_keys()
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), KvError> {
        self.inner.put(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool, KvError> {
        self.inner.delete(key)
    }
}

pub fn numbered_posts<S: KvStore>(query: &PostQuery<S>, count: usize) {
    for n in 0..count {
        let post = Post::new(format!("post-{:03}", n), format!("Post {}", n), "body");
        query.put_post(&post).unwrap();
    }
}
