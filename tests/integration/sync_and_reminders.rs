//! Background simulator and reminder integration tests.
//!
//! The actors only keep time; everything they trigger flows through the
//! same `Message` surface, so the full cycles can be exercised here
//! without timers.

use chrono::{Duration as ChronoDuration, Utc};
use crossterm::event::KeyCode;

use sundown::core::reminder::{due_probes, probes};
use sundown::core::task::TaskStatus;
use sundown::tea::{update, Command, Message, NotificationLevel};

use crate::fixtures::{press, record_count, seeded_model, submit_input};

/// Test: a full sync cycle.
/// Given the seed workspace
/// When a tick arrives and the scheduled apply lands
/// Then exactly one record is added, the sync indicator clears, and the
/// timestamp is refreshed.
#[test]
fn test_sync_cycle_adds_exactly_one_record() {
    let mut model = seeded_model();
    let records = record_count(&model);

    let commands = update(&mut model, Message::SyncTick);
    assert!(model.syncing);
    assert_eq!(commands, vec![Command::ScheduleSyncApply]);
    assert_eq!(record_count(&model), records, "tick alone mutates nothing");

    update(&mut model, Message::SyncApply);
    assert!(!model.syncing);
    assert!(model.last_synced.is_some());
    assert_eq!(record_count(&model), records + 1);
}

/// Test: a finished workspace still refreshes the sync timestamp.
#[test]
fn test_sync_apply_on_finished_workspace_is_pure_refresh() {
    let mut model = seeded_model();
    for task in &mut model.active_mut().tasks {
        task.status = TaskStatus::Completed;
    }
    let records = record_count(&model);

    update(&mut model, Message::SyncTick);
    update(&mut model, Message::SyncApply);

    assert_eq!(record_count(&model), records);
    assert!(model.last_synced.is_some());
}

/// Test: repeated cycles keep growing the audit trail one record at a time.
#[test]
fn test_repeated_sync_cycles() {
    let mut model = seeded_model();
    let start = record_count(&model);

    for i in 1..=5 {
        update(&mut model, Message::SyncTick);
        update(&mut model, Message::SyncApply);
        assert_eq!(record_count(&model), start + i);
    }
}

/// Test: setting a reminder feeds the probe snapshot.
/// Given a reminder set on an incomplete task via the `+minutes` shorthand
/// When the probe snapshot is rebuilt
/// Then only that task appears (completed tasks never probe).
#[test]
fn test_reminder_input_to_probe_snapshot() {
    let mut model = seeded_model();

    // Cursor starts on task 1, which is Completed; move to task 2.
    press(&mut model, KeyCode::Char('j'));
    let commands = submit_input(&mut model, 'r', "+5");
    assert!(commands.contains(&Command::RefreshReminderProbes));

    let snapshot = probes(&model.active().tasks);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].task_id, model.active().tasks[1].id);
    assert!(snapshot[0].reminder > Utc::now());
}

/// Test: a reminder on a completed task is never probed.
#[test]
fn test_completed_task_reminder_is_ignored() {
    let mut model = seeded_model();

    submit_input(&mut model, 'r', "+5"); // task 1 is Completed
    assert!(probes(&model.active().tasks).is_empty());
}

/// Test: the due window is one minute wide.
#[test]
fn test_due_window_boundaries() {
    let mut model = seeded_model();
    let now = Utc::now();
    let id = model.active().tasks[1].id.clone();

    model
        .active_mut()
        .set_reminder(&id, Some(now - ChronoDuration::seconds(30)), "Current User");
    let snapshot = probes(&model.active().tasks);
    assert_eq!(due_probes(&snapshot, now).len(), 1, "inside the window");

    model
        .active_mut()
        .set_reminder(&id, Some(now - ChronoDuration::seconds(90)), "Current User");
    let snapshot = probes(&model.active().tasks);
    assert!(due_probes(&snapshot, now).is_empty(), "window has passed");

    model
        .active_mut()
        .set_reminder(&id, Some(now + ChronoDuration::seconds(30)), "Current User");
    let snapshot = probes(&model.active().tasks);
    assert!(due_probes(&snapshot, now).is_empty(), "not due yet");
}

/// Test: a due alert surfaces as an info notification with the task title.
#[test]
fn test_reminder_due_notification_text() {
    let mut model = seeded_model();
    let task = &model.active().tasks[1];
    let (id, title) = (task.id.clone(), task.title.clone());

    update(
        &mut model,
        Message::ReminderDue {
            task_id: id,
            title: title.clone(),
        },
    );

    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.level, NotificationLevel::Info);
    assert_eq!(
        n.message,
        format!("REMINDER: Task \"{}\" requires immediate attention!", title)
    );
}

/// Test: invalid reminder input leaves the task untouched.
#[test]
fn test_invalid_reminder_rejected() {
    let mut model = seeded_model();

    press(&mut model, KeyCode::Char('j'));
    submit_input(&mut model, 'r', "next tuesday");

    assert!(model.active().tasks[1].reminder.is_none());
    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
}

/// Test: sync state is visible in the render snapshot.
#[test]
fn test_sync_state_reaches_snapshot() {
    let mut model = seeded_model();

    update(&mut model, Message::SyncTick);
    assert!(model.snapshot().syncing);

    update(&mut model, Message::SyncApply);
    let snapshot = model.snapshot();
    assert!(!snapshot.syncing);
    assert!(snapshot.last_synced.is_some());
}
