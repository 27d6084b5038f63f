//! The key-value substrate the store persists into.
//!
//! Each key is read and written atomically on its own. There are no
//! cross-key transactions: a crash between two `set` calls can leave
//! slots from different moments.

use std::collections::HashMap;

use crate::error::Result;

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for tests. Records every key written, in order.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
    writes: Vec<String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Keys written so far, in order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes.push(key.to_string());
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut kv = MemoryKv::new();
        assert!(kv.get("tasks").unwrap().is_none());
        kv.set("tasks", "[]").unwrap();
        assert_eq!(kv.get("tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(kv.writes(), ["tasks".to_string()]);
    }
}
