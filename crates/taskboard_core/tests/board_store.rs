use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use taskboard_core::{
    BoardStore, DragGesture, Effect, LaneId, LanePosition, ManualClock, MemoryKvStore, MoveAbort,
    MoveOutcome, Priority, SoundCue, TaskDefaults, TaskEditor, ToastKind,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn gesture(from: (LaneId, usize), to: Option<(LaneId, usize)>) -> DragGesture {
    DragGesture {
        source: LanePosition::new(from.0, from.1),
        destination: to.map(|(lane, index)| LanePosition::new(lane, index)),
    }
}

fn titled(title: &str) -> TaskDefaults {
    TaskDefaults {
        title: Some(title.to_string()),
        ..TaskDefaults::default()
    }
}

fn assert_unique_ids(store: &BoardStore<&MemoryKvStore, ManualClock>) {
    let mut seen = HashSet::new();
    for task in store.board().tasks() {
        assert!(seen.insert(task.id.clone()), "duplicate task id {}", task.id);
    }
}

#[test]
fn add_move_delete_scenario() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    assert_eq!(store.board().task_count(), 0);

    let (task_id, effects) = store.add_task(TaskDefaults::default());
    assert_eq!(effects, vec![Effect::PlaySound(SoundCue::Pop)]);
    let todo = &store.board().lane(LaneId::Todo).tasks;
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].id, task_id);
    assert_eq!(todo[0].title, "New Task");
    assert_eq!(todo[0].estimated_time, 30);
    assert_eq!(todo[0].priority, Priority::Medium);

    let outcome = store.move_task(gesture((LaneId::Todo, 0), Some((LaneId::Never, 0))));
    assert!(matches!(outcome, MoveOutcome::Moved { completed: true, .. }));
    assert!(store.board().lane(LaneId::Todo).tasks.is_empty());
    assert_eq!(store.board().lane(LaneId::Never).tasks[0].id, task_id);
    assert_eq!(store.completed_today(), 1);

    store.delete_task(&task_id);
    assert!(store.board().lane(LaneId::Never).tasks.is_empty());
}

#[test]
fn same_lane_forward_move_is_remove_then_insert() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    let (b, _) = store.add_task(titled("B"));
    let (a, _) = store.add_task(titled("A"));

    let outcome = store.move_task(gesture((LaneId::Todo, 0), Some((LaneId::Todo, 1))));
    assert!(matches!(outcome, MoveOutcome::Moved { completed: false, .. }));

    let order: Vec<_> = store
        .board()
        .lane(LaneId::Todo)
        .tasks
        .iter()
        .map(|task| task.id.clone())
        .collect();
    assert_eq!(order, vec![b, a]);
    assert_eq!(store.completed_today(), 0);
}

#[test]
fn identical_position_and_outside_drop_change_nothing() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    store.add_task(titled("only"));
    let before = serde_json::to_string(store.board()).unwrap();

    let same = store.move_task(gesture((LaneId::Todo, 0), Some((LaneId::Todo, 0))));
    assert_eq!(same, MoveOutcome::Aborted(MoveAbort::SamePosition));
    let outside = store.move_task(gesture((LaneId::Todo, 0), None));
    assert_eq!(outside, MoveOutcome::Aborted(MoveAbort::DroppedOutside));

    assert_eq!(serde_json::to_string(store.board()).unwrap(), before);
    assert_eq!(store.completed_today(), 0);
}

#[test]
fn completion_counter_is_one_way() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    store.add_task(titled("laundry"));

    let outcome = store.move_task(gesture((LaneId::Todo, 0), Some((LaneId::NotToday, 0))));
    assert_eq!(
        outcome.effects(),
        &[
            Effect::Celebrate,
            Effect::Toast(ToastKind::TaskMoved),
            Effect::PlaySound(SoundCue::Success),
        ]
    );
    assert_eq!(store.completed_today(), 1);

    let back = store.move_task(gesture((LaneId::NotToday, 0), Some((LaneId::Todo, 0))));
    assert!(back.effects().is_empty());
    assert_eq!(store.completed_today(), 1);
}

#[test]
fn adjust_time_clamps_at_zero_and_ignores_unknown_ids() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    let (task_id, _) = store.add_task(TaskDefaults::default());

    store.adjust_task_time(&task_id, 15);
    assert_eq!(store.board().task(&task_id).unwrap().estimated_time, 45);
    store.adjust_task_time(&task_id, -10_000);
    assert_eq!(store.board().task(&task_id).unwrap().estimated_time, 0);

    let before = store.board().clone();
    assert!(store.adjust_task_time("missing", 5).is_empty());
    assert!(store.delete_task("missing").is_empty());
    assert_eq!(store.board(), &before);
}

#[test]
fn update_replaces_in_place_and_skips_unknown_ids() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    store.add_task(titled("second"));
    let (first, _) = store.add_task(titled("first"));

    let mut editor = TaskEditor::open(store.board().task(&first).unwrap());
    editor.set_title("first, renamed");
    editor.add_tag("home");
    editor.set_priority(Priority::High);
    editor.set_color(Some("bg-slate-500".to_string()));
    let planned = Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap();
    editor.set_scheduled_for(Some(planned));
    let effects = editor.save(&mut store);
    assert_eq!(effects, vec![Effect::PlaySound(SoundCue::Save)]);

    let todo = &store.board().lane(LaneId::Todo).tasks;
    assert_eq!(todo[0].id, first);
    assert_eq!(todo[0].title, "first, renamed");
    assert_eq!(todo[0].tags, vec!["home".to_string()]);
    assert_eq!(todo[0].color.as_deref(), Some("bg-slate-500"));
    assert_eq!(todo[0].scheduled_for, Some(planned));
    assert_eq!(todo[1].title, "second");

    let mut stranger = todo[0].clone();
    stranger.id = "not-on-board".to_string();
    assert!(store.update_task(stranger).is_empty());
    assert_eq!(store.board().task_count(), 2);
}

#[test]
fn discarded_editor_leaves_board_untouched() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    let (task_id, _) = store.add_task(titled("keep me"));

    {
        let mut editor = TaskEditor::open(store.board().task(&task_id).unwrap());
        editor.set_title("scratch");
        assert!(editor.is_dirty());
    }

    assert_eq!(store.board().task(&task_id).unwrap().title, "keep me");
}

#[test]
fn operation_sequences_keep_ids_unique() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    let mut ids = Vec::new();
    for round in 0..12 {
        let (id, _) = store.add_task(titled(&format!("task {round}")));
        ids.push(id);
        if round % 3 == 0 {
            store.move_task(gesture((LaneId::Todo, 0), Some((LaneId::NotToday, round))));
        }
        if round % 4 == 1 {
            store.delete_task(&ids[round / 2]);
        }
        if round % 5 == 2 {
            store.adjust_task_time(&ids[round], -7);
        }
        assert_unique_ids(&store);
    }
}

#[test]
fn muted_store_emits_no_sounds() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    assert_eq!(
        store.toggle_sound(),
        vec![Effect::PlaySound(SoundCue::SwitchOff)]
    );
    assert!(!store.sound_enabled());

    let (task_id, effects) = store.add_task(TaskDefaults::default());
    assert!(effects.is_empty());
    assert!(store.adjust_task_time(&task_id, 5).is_empty());

    let outcome = store.move_task(gesture((LaneId::Todo, 0), Some((LaneId::Never, 0))));
    assert_eq!(
        outcome.effects(),
        &[Effect::Celebrate, Effect::Toast(ToastKind::TaskMoved)]
    );

    assert_eq!(store.toggle_sound(), vec![Effect::PlaySound(SoundCue::SwitchOn)]);
}

#[test]
fn collapse_toggles_single_and_all_cards() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    let (a, _) = store.add_task(titled("a"));
    let (b, _) = store.add_task(titled("b"));

    store.toggle_card_collapse(&a);
    assert!(store.is_collapsed(&a));
    assert!(!store.is_collapsed(&b));

    let effects = store.toggle_all_collapsed();
    assert!(effects.contains(&Effect::Toast(ToastKind::CollapsedAll)));
    assert!(store.is_collapsed(&a) && store.is_collapsed(&b));

    let effects = store.toggle_all_collapsed();
    assert!(effects.contains(&Effect::Toast(ToastKind::ExpandedAll)));
    assert!(!store.is_collapsed(&a) && !store.is_collapsed(&b));

    store.toggle_card_collapse(&b);
    store.delete_task(&b);
    assert!(!store.collapsed_cards().contains_key(&b));
}

#[test]
fn collapsing_unknown_card_records_nothing() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));
    store.add_task(titled("a"));

    assert!(store.toggle_card_collapse("ghost").is_empty());
    assert!(store.collapsed_cards().is_empty());
    assert!(!store.is_collapsed("ghost"));
}

#[test]
fn login_and_logout_round_trip() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));

    let effects = store.login();
    assert!(effects.contains(&Effect::Toast(ToastKind::LoggedIn)));
    assert!(store.login_state().is_logged_in);
    assert!(store.login_state().username.contains('#'));

    store.logout();
    assert!(!store.login_state().is_logged_in);
    assert!(store.login_state().username.is_empty());
}

#[test]
fn app_name_set_and_reset() {
    let kv = MemoryKvStore::new();
    let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(day(19)));

    assert!(!store.set_app_name("   "));
    assert!(store.set_app_name(" FocusFlex "));
    assert_eq!(store.app_name(), Some("FocusFlex"));

    store.reset_app_name();
    assert_eq!(store.app_name(), None);
}

#[test]
fn tick_resets_counter_after_date_change() {
    let kv = MemoryKvStore::new();
    let clock = ManualClock::new(day(19));
    let mut store = BoardStore::load_with_clock(&kv, clock.clone());
    store.add_task(titled("x"));
    store.move_task(gesture((LaneId::Todo, 0), Some((LaneId::Never, 0))));
    assert_eq!(store.completed_today(), 1);

    clock.set_today(day(20));
    assert!(!store.tick(Instant::now()));
    assert_eq!(store.completed_today(), 1);

    assert!(store.tick(Instant::now() + Duration::from_secs(61)));
    assert_eq!(store.completed_today(), 0);
}
