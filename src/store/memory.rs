use super::{NoteStore, StoreResult};
use crate::model::{Note, NoteId, NotePatch};
use crate::validate::ValidNote;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-local store backed by a `DashMap`.
///
/// Each entry carries the sequence number it was created with, which gives
/// the newest-first listing order. Writes to one note lock only its shard,
/// so concurrent updates to the same note resolve last-write-wins.
pub struct InMemoryStore {
    notes: DashMap<NoteId, (u64, Note)>,
    next_seq: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            notes: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for InMemoryStore {
    async fn list(&self) -> StoreResult<Vec<Note>> {
        let mut entries: Vec<(u64, Note)> = self
            .notes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        Ok(entries.into_iter().map(|(_, note)| note).collect())
    }

    async fn insert(&self, note: ValidNote) -> StoreResult<Note> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let note = Note {
            id: NoteId::new(uuid::Uuid::new_v4().to_string()),
            title: note.title,
            content: note.content,
        };
        self.notes.insert(note.id.clone(), (seq, note.clone()));
        Ok(note)
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        Ok(self.notes.get(id).map(|entry| entry.value().1.clone()))
    }

    async fn update(&self, id: &NoteId, patch: NotePatch) -> StoreResult<Option<Note>> {
        Ok(self.notes.get_mut(id).map(|mut entry| {
            let note = &mut entry.value_mut().1;
            patch.apply_to(note);
            note.clone()
        }))
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<bool> {
        Ok(self.notes.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(title: &str, content: &str) -> ValidNote {
        ValidNote {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = InMemoryStore::new();
        let a = store.insert(valid("a", "1")).await.unwrap();
        let b = store.insert(valid("b", "2")).await.unwrap();
        assert!(!a.id.as_str().is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = InMemoryStore::new();
        for title in ["A", "B", "C"] {
            store.insert(valid(title, "x")).await.unwrap();
        }
        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn update_keeps_order_and_id() {
        let store = InMemoryStore::new();
        let first = store.insert(valid("first", "x")).await.unwrap();
        store.insert(valid("second", "y")).await.unwrap();

        let updated = store
            .update(&first.id, NotePatch::default().title("renamed"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, first.id);
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.content, "x");

        let list = store.list().await.unwrap();
        assert_eq!(list[1].title, "renamed");
    }

    #[tokio::test]
    async fn unknown_ids_are_reported_not_faulted() {
        let store = InMemoryStore::new();
        let missing = NoteId::new("missing");
        assert!(store.get(&missing).await.unwrap().is_none());
        assert!(
            store
                .update(&missing, NotePatch::default().title("t"))
                .await
                .unwrap()
                .is_none()
        );
        assert!(!store.delete(&missing).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_note() {
        let store = InMemoryStore::new();
        let note = store.insert(valid("a", "b")).await.unwrap();
        assert!(store.delete(&note.id).await.unwrap());
        assert!(!store.delete(&note.id).await.unwrap());
        assert!(store.get(&note.id).await.unwrap().is_none());
    }
}
