use sprintcal_core::SprintResult;
use std::collections::HashMap;

use crate::traits::StorageGateway;

/// In-memory gateway for repository tests. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    entries: HashMap<String, String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl StorageGateway for MemoryGateway {
    fn get(&self, key: &str) -> SprintResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SprintResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let gateway = MemoryGateway::new();
        assert!(gateway.get("sprints").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut gateway = MemoryGateway::new().with_entry("k", "old");
        gateway.set("k", "new").unwrap();
        assert_eq!(gateway.get("k").unwrap().as_deref(), Some("new"));
        assert_eq!(gateway.entries.len(), 1);
    }
}
