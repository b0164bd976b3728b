mod common;

use game_core::{Command, CommandError, SessionStatus, TickOutcome};
use runtime::{Event, Runtime, RuntimeConfig, RuntimeError, Topic, WorldEvent};

use common::{arena, drain, oracles};

#[tokio::test]
async fn ticks_advance_and_publish_clock_events() {
    let config = RuntimeConfig {
        event_buffer_size: 1024,
        ..Default::default()
    };
    let runtime = Runtime::builder()
        .oracles(oracles())
        .config(config)
        .initial_state(arena())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut world = handle.subscribe(Topic::World);

    let outcome = handle.tick_many(100).await.expect("ticks run");
    assert_eq!(outcome, TickOutcome::Advanced(100));

    let clock_ticks: Vec<_> = drain(&mut world)
        .into_iter()
        .filter_map(|event| match event {
            Event::World(WorldEvent::ClockTick { time }) => Some(time),
            _ => None,
        })
        .collect();
    assert_eq!(clock_ticks, vec![6100]);

    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.tick, 100);
    assert_eq!(state.clock.time, 6100);
}

#[tokio::test]
async fn rejected_commands_surface_their_reason() {
    let runtime = Runtime::builder()
        .oracles(oracles())
        .initial_state(arena())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    let result = handle.send_command(Command::SelectSlot(99)).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Command(CommandError::SlotOutOfRange(99)))
    ));

    handle
        .send_command(Command::SelectSlot(3))
        .await
        .expect("valid slot");
    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.player.selected_slot, 3);
}

#[tokio::test]
async fn finished_sessions_halt() {
    let mut state = arena();
    state.status = SessionStatus::GameOver;
    let runtime = Runtime::builder()
        .oracles(oracles())
        .initial_state(state)
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    let outcome = handle.tick_many(5).await.expect("tick request");
    assert_eq!(outcome, TickOutcome::Halted(SessionStatus::GameOver));
    assert!(matches!(
        handle.send_command(Command::ToggleInventory).await,
        Err(RuntimeError::Command(CommandError::SessionOver))
    ));
    assert_eq!(handle.query_state().await.expect("state query").tick, 0);

    assert_eq!(
        runtime.run(Some(10)).await.expect("run returns"),
        TickOutcome::Halted(SessionStatus::GameOver)
    );
}

#[tokio::test]
async fn generated_worlds_start_with_the_starter_kit() {
    let config = RuntimeConfig {
        seed: Some(1234),
        ..Default::default()
    };
    let runtime = Runtime::builder()
        .oracles(oracles())
        .config(config)
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut player = handle.subscribe(Topic::Player);

    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.seed, 1234);
    assert!(!state.entities.is_empty());

    runtime.run(Some(3)).await.expect("run");
    let events = drain(&mut player);
    assert!(
        events
            .iter()
            .all(|event| matches!(event, Event::Player(_))),
        "player topic only carries player events"
    );
    drop(handle);
    runtime.shutdown().await.expect("worker joins");
}
