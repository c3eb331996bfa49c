use async_trait::async_trait;
use notice_kit::prelude::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// In-memory FileStorage; clones share the same blobs
#[derive(Default, Clone)]
pub struct MockFileStorage {
    pub blobs: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

#[allow(dead_code)]
impl MockFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }

    pub fn insert(&self, path: &str, data: &[u8]) {
        self.blobs
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
    }
}

#[async_trait]
impl FileStorage for MockFileStorage {
    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.lock().unwrap().get(path).cloned())
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> Result<()> {
        self.blobs.lock().unwrap().insert(path.to_string(), data);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
