//! Concurrency tests for the note service over the in-memory store

use std::collections::HashSet;
use std::sync::Arc;

use notes::{InMemoryStore, NewNote, NoteService, NotePatch};

fn service() -> NoteService {
    NoteService::new(Arc::new(InMemoryStore::new()))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    let svc = service();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.create(NewNote::new(format!("note-{i}"), "body"))
                    .await
                    .expect("create should succeed")
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let note = handle.await.unwrap();
        assert!(ids.insert(note.id), "id reused");
    }

    assert_eq!(svc.list().await.unwrap().len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_one_note_are_last_write_wins() {
    let svc = service();
    let note = svc.create(NewNote::new("title", "v0")).await.unwrap();

    let handles: Vec<_> = (1..=20)
        .map(|i| {
            let svc = svc.clone();
            let id = note.id.clone();
            tokio::spawn(async move {
                svc.update(&id, NotePatch::default().content(format!("v{i}")))
                    .await
                    .expect("update should succeed")
            })
        })
        .collect();

    let mut written = HashSet::new();
    for handle in handles {
        let updated = handle.await.unwrap();
        assert_eq!(updated.title, "title");
        written.insert(updated.content);
    }

    // Whatever survives is one of the written values, never a mix.
    let final_note = svc.get(&note.id).await.unwrap();
    assert!(written.contains(&final_note.content));
    assert_eq!(svc.list().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_succeed_exactly_once() {
    let svc = service();
    let note = svc.create(NewNote::new("t", "c")).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let svc = svc.clone();
            let id = note.id.clone();
            tokio::spawn(async move { svc.delete(&id).await.is_ok() })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert!(svc.list().await.unwrap().is_empty());
}
