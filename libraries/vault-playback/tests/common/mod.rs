//! Shared fakes for playback pipeline tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vault_core::{CatalogError, CatalogFetcher, SessionDocument, SessionStore, Track, UserId};
use vault_playback::{Request, SeededShuffle, Skill, TurnInput};

pub const USER: &str = "amzn1.ask.account.test";
pub const CREDENTIAL: &str = "linked-token";

/// In-memory store that records every save
#[derive(Default)]
pub struct FakeStore {
    documents: Mutex<HashMap<String, SessionDocument>>,
    saves: AtomicUsize,
}

impl FakeStore {
    pub fn with_document(document: SessionDocument) -> Self {
        let store = Self::default();
        store
            .documents
            .lock()
            .unwrap()
            .insert(USER.to_string(), document);
        store
    }

    pub fn document(&self) -> Option<SessionDocument> {
        self.documents.lock().unwrap().get(USER).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for FakeStore {
    async fn load(&self, user_id: &UserId) -> vault_core::Result<Option<SessionDocument>> {
        Ok(self.documents.lock().unwrap().get(user_id.as_str()).cloned())
    }

    async fn save(&self, user_id: &UserId, document: &SessionDocument) -> vault_core::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.documents
            .lock()
            .unwrap()
            .insert(user_id.as_str().to_string(), document.clone());
        Ok(())
    }
}

/// Catalog that answers with a scripted result and counts fetches
pub struct FakeCatalog {
    result: Mutex<Result<Vec<Track>, CatalogError>>,
    fetches: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(result: Result<Vec<Track>, CatalogError>) -> Self {
        Self {
            result: Mutex::new(result),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, result: Result<Vec<Track>, CatalogError>) {
        *self.result.lock().unwrap() = result;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogFetcher for FakeCatalog {
    async fn fetch(&self, _credential: &str) -> Result<Vec<Track>, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.result.lock().unwrap().clone()
    }
}

pub fn three_tracks() -> Vec<Track> {
    vec![
        Track::new("A", "https://cdn.test/a.mp3").with_collection("Alpha"),
        Track::new("B", "https://cdn.test/b.mp3"),
        Track::new("C", "https://cdn.test/c.mp3"),
    ]
}

pub fn skill(store: &Arc<FakeStore>, catalog: &Arc<FakeCatalog>) -> Skill {
    Skill::new(store.clone(), catalog.clone()).with_shuffle(Arc::new(SeededShuffle::new(99)))
}

pub fn turn(request: Request) -> TurnInput {
    TurnInput::new(USER, Some(CREDENTIAL.to_string()), request)
}

pub fn anonymous_turn(request: Request) -> TurnInput {
    TurnInput::new(USER, None, request)
}
