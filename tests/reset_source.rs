use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use docs_import::contract::{
    Article, KnowledgeBase, KnowledgeSource, KnowledgeSourceId, MockKnowledgeBase,
};
use docs_import::error::ApiError;
use docs_import::source::{reset_source, DEFAULT_SOURCE_NAME};

fn source(id: &str, name: &str) -> KnowledgeSource {
    KnowledgeSource {
        id: KnowledgeSourceId::from(id),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn existing_source_is_deleted_then_recreated() {
    let mut kb = MockKnowledgeBase::new();
    kb.expect_list_sources().times(1).returning(|| {
        Ok(vec![
            source("other", "release notes"),
            source("X", DEFAULT_SOURCE_NAME),
        ])
    });
    kb.expect_delete_source()
        .withf(|id| id.as_str() == "X")
        .times(1)
        .returning(|_| Ok(()));
    kb.expect_create_source()
        .withf(|name| name.to_string() == DEFAULT_SOURCE_NAME)
        .times(1)
        .returning(|_| Ok(KnowledgeSourceId::from("Y")));

    let id = reset_source(&kb, DEFAULT_SOURCE_NAME).await.expect("reset succeeds");
    assert_eq!(id.as_str(), "Y");
    assert_ne!(id.as_str(), "X");
}

#[tokio::test]
async fn missing_source_is_only_created() {
    let mut kb = MockKnowledgeBase::new();
    kb.expect_list_sources()
        .times(1)
        .returning(|| Ok(vec![source("other", "opswat docs import (old)")]));
    kb.expect_delete_source().never();
    kb.expect_create_source()
        .times(1)
        .returning(|_| Ok(KnowledgeSourceId::from("new")));

    let id = reset_source(&kb, DEFAULT_SOURCE_NAME).await.unwrap();
    assert_eq!(id.as_str(), "new");
}

#[tokio::test]
async fn list_failure_aborts_before_create() {
    let mut kb = MockKnowledgeBase::new();
    kb.expect_list_sources().times(1).returning(|| {
        Err(ApiError::Status {
            status: 401,
            body: "unauthorized".into(),
        })
    });
    kb.expect_delete_source().never();
    kb.expect_create_source().never();

    let err = reset_source(&kb, DEFAULT_SOURCE_NAME).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
}

#[tokio::test]
async fn delete_failure_aborts_before_create() {
    let mut kb = MockKnowledgeBase::new();
    kb.expect_list_sources()
        .returning(|| Ok(vec![source("X", DEFAULT_SOURCE_NAME)]));
    kb.expect_delete_source().times(1).returning(|_| {
        Err(ApiError::Status {
            status: 500,
            body: "boom".into(),
        })
    });
    kb.expect_create_source().never();

    assert!(reset_source(&kb, DEFAULT_SOURCE_NAME).await.is_err());
}

/// In-memory knowledge base that behaves like the remote service.
#[derive(Default)]
struct InMemoryKnowledgeBase {
    sources: Mutex<Vec<KnowledgeSource>>,
    next_id: AtomicUsize,
}

impl InMemoryKnowledgeBase {
    fn count_named(&self, name: &str) -> usize {
        self.sources
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name == name)
            .count()
    }
}

#[async_trait]
impl KnowledgeBase for InMemoryKnowledgeBase {
    async fn list_sources(&self) -> Result<Vec<KnowledgeSource>, ApiError> {
        Ok(self.sources.lock().unwrap().clone())
    }

    async fn delete_source(&self, id: &KnowledgeSourceId) -> Result<(), ApiError> {
        self.sources.lock().unwrap().retain(|s| &s.id != id);
        Ok(())
    }

    async fn create_source(&self, name: &str) -> Result<KnowledgeSourceId, ApiError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = KnowledgeSourceId(format!("src-{n}"));
        self.sources.lock().unwrap().push(KnowledgeSource {
            id: id.clone(),
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn upload_article(&self, _article: &Article) -> Result<serde_json::Value, ApiError> {
        Ok(serde_json::Value::Null)
    }
}

#[tokio::test]
async fn repeated_resets_leave_exactly_one_source() {
    let kb = InMemoryKnowledgeBase::default();
    kb.create_source("unrelated").await.unwrap();

    let first = reset_source(&kb, DEFAULT_SOURCE_NAME).await.unwrap();
    assert_eq!(kb.count_named(DEFAULT_SOURCE_NAME), 1);

    let second = reset_source(&kb, DEFAULT_SOURCE_NAME).await.unwrap();
    assert_eq!(kb.count_named(DEFAULT_SOURCE_NAME), 1);
    assert_ne!(first, second);
    assert_eq!(kb.count_named("unrelated"), 1);
}

#[tokio::test]
async fn duplicate_sources_from_earlier_runs_are_all_removed() {
    let kb = InMemoryKnowledgeBase::default();
    kb.create_source(DEFAULT_SOURCE_NAME).await.unwrap();
    kb.create_source(DEFAULT_SOURCE_NAME).await.unwrap();

    reset_source(&kb, DEFAULT_SOURCE_NAME).await.unwrap();
    assert_eq!(kb.count_named(DEFAULT_SOURCE_NAME), 1);
}
