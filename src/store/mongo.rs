use super::{DEFAULT_DATABASE, NoteStore, StoreError, StoreResult};
use crate::model::{Note, NoteId, NotePatch};
use crate::validate::ValidNote;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

/// Stored shape of a note. Only `_id`, `title` and `content` are written;
/// the public [`Note`] exposes `_id` as the hex string `id`.
#[derive(Debug, Serialize, Deserialize)]
struct NoteDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    content: String,
}

impl From<NoteDocument> for Note {
    fn from(doc: NoteDocument) -> Self {
        Note {
            id: NoteId::new(doc.id.to_hex()),
            title: doc.title,
            content: doc.content,
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// MongoDB-backed store using the official async driver.
///
/// The driver's client is internally pooled and cheap to clone; one
/// instance is created at startup and shared by every request.
pub struct MongoStore {
    client: Client,
    notes: Collection<NoteDocument>,
}

impl MongoStore {
    /// Parse the connection string and bind to the notes collection. The
    /// driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(uri: &str, collection: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        tracing::info!(
            database = %database.name(),
            collection = %collection,
            "MongoDB store configured"
        );
        let notes = database.collection::<NoteDocument>(collection);
        Ok(Self { client, notes })
    }
}

/// Ids that are not valid ObjectIds cannot match any stored note.
fn object_id(id: &NoteId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

fn set_document(patch: &NotePatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(content) = &patch.content {
        set.insert("content", content.as_str());
    }
    set
}

#[async_trait]
impl NoteStore for MongoStore {
    async fn list(&self) -> StoreResult<Vec<Note>> {
        // ObjectIds are (creation second, per-process random bytes, counter).
        // Descending `_id` is newest first to the second, and exact within
        // one process. Notes inserted by different processes in the same
        // second are ordered by their random bytes, not by insert time.
        let cursor = self.notes.find(doc! {}).sort(doc! { "_id": -1 }).await?;
        let docs: Vec<NoteDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Note::from).collect())
    }

    async fn insert(&self, note: ValidNote) -> StoreResult<Note> {
        let doc = NoteDocument {
            id: ObjectId::new(),
            title: note.title,
            content: note.content,
        };
        self.notes.insert_one(&doc).await?;
        Ok(doc.into())
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        let found = self.notes.find_one(doc! { "_id": oid }).await?;
        Ok(found.map(Note::from))
    }

    async fn update(&self, id: &NoteId, patch: NotePatch) -> StoreResult<Option<Note>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        // `$set` rejects an empty document.
        if patch.is_empty() {
            return self.get(id).await;
        }
        let updated = self
            .notes
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set_document(&patch) })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Note::from))
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<bool> {
        let Some(oid) = object_id(id) else {
            return Ok(false);
        };
        let deleted = self.notes.find_one_and_delete(doc! { "_id": oid }).await?;
        Ok(deleted.is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_never_parse() {
        assert!(object_id(&NoteId::new("not-an-object-id")).is_none());
        let oid = ObjectId::new();
        assert_eq!(object_id(&NoteId::new(oid.to_hex())), Some(oid));
    }

    #[test]
    fn set_document_contains_only_supplied_fields() {
        let set = set_document(&NotePatch::default().content("body"));
        assert_eq!(set, doc! { "content": "body" });
    }

    #[test]
    fn ids_from_one_process_sort_in_creation_order() {
        let ids: Vec<ObjectId> = (0..100).map(|_| ObjectId::new()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn document_maps_id_to_hex() {
        let oid = ObjectId::new();
        let note: Note = NoteDocument {
            id: oid,
            title: "t".to_string(),
            content: "c".to_string(),
        }
        .into();
        assert_eq!(note.id.as_str(), oid.to_hex());
    }
}
