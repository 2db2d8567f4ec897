//! Unique job tokens
//!
//! A token names a job's submission script and is the string searched for in the remote process
//! table, so it has to be unique among jobs sharing a machine. Token sources are passed to job
//! construction explicitly, which lets tests use predictable names.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

pub trait TokenSource: Send + Sync {
    fn next_token(&self) -> String;
}

/// Random version 4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn next_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `<prefix>-0`, `<prefix>-1`, ...
#[derive(Debug)]
pub struct SequentialTokens {
    prefix: String,
    next: AtomicU64,
}

impl SequentialTokens {
    pub fn new(prefix: &str) -> Self {
        SequentialTokens { prefix: prefix.to_string(), next: AtomicU64::new(0) }
    }
}

impl TokenSource for SequentialTokens {
    fn next_token(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
