mod common;

use std::sync::Arc;

use runtime::{
    Event, FileSaveRepository, InMemorySaveRepository, PlayerEvent, RepositoryError, Runtime,
    RuntimeConfig, RuntimeError, SaveRepository, SessionEvent, Topic,
};
use tempfile::TempDir;

use common::{arena, drain, oracles};

fn config() -> RuntimeConfig {
    RuntimeConfig {
        save_slot: "test".into(),
        autosave_interval: None,
        ..Default::default()
    }
}

fn notices(events: Vec<Event>) -> Vec<String> {
    events
        .into_iter()
        .filter_map(|event| match event {
            Event::Player(PlayerEvent::Notice { message }) => Some(message),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn save_then_load_rewinds_the_session() {
    let repo = Arc::new(InMemorySaveRepository::new());
    let runtime = Runtime::builder()
        .oracles(oracles())
        .initial_state(arena())
        .config(config())
        .save_repository(repo.clone())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);
    let mut player = handle.subscribe(Topic::Player);

    handle.tick_many(10).await.expect("ticks");
    handle.save().await.expect("save succeeds");
    assert!(repo.contains("test").expect("repo readable"));

    handle.tick_many(15).await.expect("ticks");
    handle.load().await.expect("load succeeds");
    assert_eq!(handle.query_state().await.expect("state").tick, 10);

    let session_events = drain(&mut session);
    assert_eq!(
        session_events,
        vec![
            Event::Session(SessionEvent::Saved {
                slot: "test".into(),
                tick: 10
            }),
            Event::Session(SessionEvent::Loaded {
                slot: "test".into(),
                tick: 10
            }),
        ]
    );
    let messages = notices(drain(&mut player));
    assert!(messages.contains(&"Game Saved!".to_string()));
    assert!(messages.contains(&"Game Loaded!".to_string()));
}

#[tokio::test]
async fn corrupt_saves_leave_the_session_running() {
    let repo = Arc::new(InMemorySaveRepository::new());
    repo.put("test", "{\"version\": 1, \"state\": 42}")
        .expect("seed corrupt record");
    let runtime = Runtime::builder()
        .oracles(oracles())
        .initial_state(arena())
        .config(config())
        .save_repository(repo)
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut player = handle.subscribe(Topic::Player);

    handle.tick_many(7).await.expect("ticks");
    let result = handle.load().await;
    assert!(matches!(
        result,
        Err(RuntimeError::Repository(RepositoryError::Json(_)))
    ));
    assert_eq!(handle.query_state().await.expect("state").tick, 7);
    assert!(notices(drain(&mut player)).contains(&"Load Failed (Corrupt Save?)".to_string()));

    handle.tick().await.expect("session keeps ticking");
}

#[tokio::test]
async fn persistence_requires_a_repository() {
    let runtime = Runtime::builder()
        .oracles(oracles())
        .initial_state(arena())
        .build()
        .await
        .expect("runtime builds");
    assert!(matches!(
        runtime.handle().save().await,
        Err(RuntimeError::PersistenceDisabled)
    ));
}

#[tokio::test]
async fn autosave_fires_on_the_interval() {
    let repo = Arc::new(InMemorySaveRepository::new());
    let config = RuntimeConfig {
        autosave_interval: Some(5),
        ..config()
    };
    let runtime = Runtime::builder()
        .oracles(oracles())
        .initial_state(arena())
        .config(config)
        .save_repository(repo.clone())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    handle.tick_many(4).await.expect("ticks");
    assert!(!repo.contains("test").expect("repo readable"));
    handle.tick().await.expect("tick");
    assert!(repo.contains("test").expect("repo readable"));
}

#[tokio::test]
async fn file_saves_resume_in_a_new_runtime() {
    let dir = TempDir::new().expect("temp dir");
    {
        let repo = Arc::new(FileSaveRepository::new(dir.path()).expect("repo"));
        let runtime = Runtime::builder()
            .oracles(oracles())
            .initial_state(arena())
            .config(config())
            .save_repository(repo)
            .build()
            .await
            .expect("runtime builds");
        let handle = runtime.handle();
        handle.tick_many(12).await.expect("ticks");
        handle.save().await.expect("save");
        drop(handle);
        runtime.shutdown().await.expect("worker joins");
    }

    let repo = Arc::new(FileSaveRepository::new(dir.path()).expect("repo"));
    let config = RuntimeConfig {
        resume: true,
        ..config()
    };
    let runtime = Runtime::builder()
        .oracles(oracles())
        .config(config)
        .save_repository(repo)
        .build()
        .await
        .expect("runtime builds");
    let state = runtime.handle().query_state().await.expect("state");
    assert_eq!(state.tick, 12);
    assert_eq!(state.seed, 9);
}
