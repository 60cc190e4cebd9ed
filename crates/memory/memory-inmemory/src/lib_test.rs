//! Unit tests for the in-memory note store and conversation history.

use super::*;
use chrono::Duration;
use memory_core::{MemoryCategory, NewNote, NoteStatus};
use serde_json::Map;

fn note(owner: &str, content: &str, category: MemoryCategory) -> MemoryNote {
    MemoryNote::from_new(
        owner,
        NewNote {
            title: Some(format!("title {content}")),
            content: content.to_string(),
            category,
            tags: vec![category.to_string()],
            priority: 5,
            metadata: Map::new(),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_insert_and_get() {
    let store = InMemoryNoteStore::new();
    let stored = store
        .insert(note("owner-1", "correr", MemoryCategory::Goals))
        .await
        .unwrap();

    let fetched = store.get(stored.id).await.unwrap().unwrap();
    assert_eq!(fetched, stored);
    assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_list_is_scoped_filtered_and_newest_first() {
    let store = InMemoryNoteStore::new();
    let mut older = note("owner-1", "primera", MemoryCategory::Ideas);
    older.created_at -= Duration::minutes(5);
    store.insert(older).await.unwrap();
    store
        .insert(note("owner-1", "segunda", MemoryCategory::Ideas))
        .await
        .unwrap();
    store
        .insert(note("owner-1", "meta", MemoryCategory::Goals))
        .await
        .unwrap();
    store
        .insert(note("owner-2", "ajena", MemoryCategory::Ideas))
        .await
        .unwrap();

    let ideas = store
        .list(
            "owner-1",
            &NoteQuery {
                category: Some(MemoryCategory::Ideas),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let contents: Vec<&str> = ideas.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["segunda", "primera"]);

    let paged = store
        .list(
            "owner-1",
            &NoteQuery {
                limit: 1,
                offset: 1,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].content, "segunda");

    let searched = store
        .list(
            "owner-1",
            &NoteQuery {
                search: Some("PRIM".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);
}

#[tokio::test]
async fn test_update_keeps_created_at_and_requires_owner() {
    let store = InMemoryNoteStore::new();
    let stored = store
        .insert(note("owner-1", "proyecto", MemoryCategory::Projects))
        .await
        .unwrap();

    let mut changed = stored.clone();
    changed.status = NoteStatus::Completed;
    changed.created_at = Utc::now() + Duration::days(1);
    let updated = store.update(changed).await.unwrap();
    assert_eq!(updated.status, NoteStatus::Completed);
    assert_eq!(updated.created_at, stored.created_at);

    let mut foreign = stored.clone();
    foreign.owner_id = "owner-2".to_string();
    assert!(matches!(
        store.update(foreign).await,
        Err(MemoryError::NotFound(_))
    ));

    let active = store.list("owner-1", &NoteQuery::default()).await.unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn test_delete_only_own_notes() {
    let store = InMemoryNoteStore::new();
    let stored = store
        .insert(note("owner-1", "borrar", MemoryCategory::General))
        .await
        .unwrap();

    assert!(!store.delete(stored.id, "owner-2").await.unwrap());
    assert!(store.delete(stored.id, "owner-1").await.unwrap());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_find_by_source_and_count_source_interactions() {
    let store = InMemoryNoteStore::new();
    let mut sourced = note("owner-1", "desde chat", MemoryCategory::Reminders);
    sourced.source_interaction_id = Some("msg-1".to_string());
    store.insert(sourced).await.unwrap();
    let mut same_turn = note("owner-1", "plan del coach", MemoryCategory::Reminders);
    same_turn.source_interaction_id = Some("msg-1".to_string());
    store.insert(same_turn).await.unwrap();
    store
        .insert(note("owner-1", "manual", MemoryCategory::Reminders))
        .await
        .unwrap();

    let found = store.find_by_source("msg-1").await.unwrap().unwrap();
    assert_eq!(found.content, "desde chat");
    assert!(store.find_by_source("msg-2").await.unwrap().is_none());
    assert_eq!(store.count_source_interactions("owner-1").await.unwrap(), 1);
    assert_eq!(store.count_source_interactions("owner-2").await.unwrap(), 0);
}

#[tokio::test]
async fn test_history_recent_is_chronological() {
    let history = InMemoryConversationHistory::new();
    for content in ["uno", "dos", "tres"] {
        history
            .append(Interaction::new("owner-1", Sender::User, content))
            .await
            .unwrap();
    }
    history
        .append(Interaction::new("owner-2", Sender::User, "otro"))
        .await
        .unwrap();

    let recent = history.recent("owner-1", 2).await.unwrap();
    let contents: Vec<&str> = recent.iter().map(|i| i.content.as_str()).collect();
    assert_eq!(contents, vec!["dos", "tres"]);
    assert_eq!(history.len().await, 4);
}

#[tokio::test]
async fn test_history_by_sender_is_newest_first() {
    let history = InMemoryConversationHistory::new();
    history
        .append(Interaction::new("owner-1", Sender::User, "pregunta 1"))
        .await
        .unwrap();
    history
        .append(Interaction::new("owner-1", Sender::Coach, "respuesta 1"))
        .await
        .unwrap();
    history
        .append(Interaction::new("owner-1", Sender::User, "pregunta 2"))
        .await
        .unwrap();

    let user = history
        .list_by_sender("owner-1", Sender::User, 10)
        .await
        .unwrap();
    let contents: Vec<&str> = user.iter().map(|i| i.content.as_str()).collect();
    assert_eq!(contents, vec!["pregunta 2", "pregunta 1"]);
    assert_eq!(
        history
            .count_by_sender("owner-1", Sender::Coach)
            .await
            .unwrap(),
        1
    );
}
