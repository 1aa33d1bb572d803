//! In-memory store of journal memories.
//!
//! Memories are the cards shown on the constellation canvas; each one mounts
//! as a node with element id `memory-{id}`.

use chrono::{DateTime, Utc};
use mindfull_core::NodeId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub type MemoryId = i64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Memory not found: {0}")]
    NotFound(MemoryId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    /// Creation time in milliseconds since the epoch, bumped when needed so
    /// ids stay unique.
    pub id: MemoryId,
    pub title: String,
    pub category: String,
    pub content: String,
    pub shortcut: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Memory {
    /// Element id of this memory's card on the canvas.
    pub fn node_id(&self) -> NodeId {
        NodeId::new(format!("memory-{}", self.id))
    }
}

/// Fields supplied when creating a memory. All four are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMemory {
    pub title: String,
    pub category: String,
    pub content: String,
    pub shortcut: String,
}

impl NewMemory {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
        shortcut: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            content: content.into(),
            shortcut: shortcut.into(),
        }
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        let fields = [
            ("title", &self.title),
            ("category", &self.category),
            ("content", &self.content),
            ("shortcut", &self.shortcut),
        ];
        match fields.into_iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(StorageError::MissingField(name)),
            None => Ok(()),
        }
    }
}

/// The two memories every fresh journal starts with.
pub fn default_memories() -> Vec<NewMemory> {
    vec![
        NewMemory::new(
            "John 3:16",
            "Scripture",
            "For God so loved the world that he gave his one and only Son, that whoever believes in him shall not perish but have eternal life.",
            "jn3:16",
        ),
        NewMemory::new(
            "Love Definition",
            "Note",
            "Love is patient, love is kind. It does not envy, it does not boast.",
            "love-def",
        ),
    ]
}

#[derive(Debug, Default)]
struct StoreState {
    memories: Vec<Memory>,
    last_id: MemoryId,
}

/// Shared handle to the journal. Clones see the same memories.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding [`default_memories`].
    pub fn with_defaults() -> Self {
        let store = Self::new();
        for memory in default_memories() {
            // Seeds are known to be complete
            if let Err(err) = store.create(memory) {
                tracing::error!("Failed to seed memory: {err}");
            }
        }
        store
    }

    pub fn create(&self, new: NewMemory) -> Result<Memory, StorageError> {
        new.validate()?;

        let now = Utc::now();
        let mut state = self.state.write();
        let id = now.timestamp_millis().max(state.last_id + 1);
        state.last_id = id;

        let memory = Memory {
            id,
            title: new.title,
            category: new.category,
            content: new.content,
            shortcut: new.shortcut,
            created: now,
            updated: now,
        };
        state.memories.push(memory.clone());
        tracing::debug!(id, title = %memory.title, "Memory created");
        Ok(memory)
    }

    pub fn get(&self, id: MemoryId) -> Result<Memory, StorageError> {
        self.state
            .read()
            .memories
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    /// All memories in creation order.
    pub fn list(&self) -> Vec<Memory> {
        self.state.read().memories.clone()
    }

    pub fn delete(&self, id: MemoryId) -> Result<Memory, StorageError> {
        let mut state = self.state.write();
        let idx = state
            .memories
            .iter()
            .position(|m| m.id == id)
            .ok_or(StorageError::NotFound(id))?;
        let removed = state.memories.remove(idx);
        tracing::debug!(id, "Memory deleted");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.state.read().memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().memories.is_empty()
    }

    /// `(node id, label)` for every memory, ready to mount on the canvas.
    pub fn card_labels(&self) -> Vec<(NodeId, String)> {
        self.state
            .read()
            .memories
            .iter()
            .map(|m| (m.node_id(), m.title.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seeded() {
        let store = MemoryStore::with_defaults();
        let titles: Vec<_> = store.list().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["John 3:16", "Love Definition"]);
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let store = MemoryStore::new();
        let ids: Vec<_> = (0..20)
            .map(|i| {
                store
                    .create(NewMemory::new(format!("t{i}"), "Note", "c", "s"))
                    .unwrap()
                    .id
            })
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_create_requires_every_field() {
        let store = MemoryStore::new();
        let err = store
            .create(NewMemory::new("Title", "Note", "", "s"))
            .unwrap_err();
        assert_eq!(err, StorageError::MissingField("content"));
        assert!(store.is_empty());

        // Whitespace counts as content.
        store
            .create(NewMemory::new("Title", "Note", "  ", "s"))
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_and_delete() {
        let store = MemoryStore::with_defaults();
        let first = store.list()[0].clone();

        assert_eq!(store.get(first.id).unwrap(), first);
        assert_eq!(store.delete(first.id).unwrap().id, first.id);
        assert_eq!(store.get(first.id), Err(StorageError::NotFound(first.id)));
        assert_eq!(store.delete(first.id), Err(StorageError::NotFound(first.id)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store
            .create(NewMemory::new("Psalm 23", "Scripture", "The Lord is my shepherd", "ps23"))
            .unwrap();
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_card_labels_use_element_ids() {
        let store = MemoryStore::new();
        let memory = store
            .create(NewMemory::new("Title", "Note", "Body", "t"))
            .unwrap();
        let labels = store.card_labels();
        assert_eq!(labels[0].0.as_str(), format!("memory-{}", memory.id));
        assert_eq!(labels[0].1, "Title");
    }

    #[test]
    fn test_new_memory_from_partial_json() {
        let new: NewMemory = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(new.validate(), Err(StorageError::MissingField("category")));
    }
}
