//! End-to-end dashboard tests.
//!
//! Drive the full update loop with synthetic key events and background
//! messages, then assert on both the model and the render snapshot.

use std::io::Write;

use crossterm::event::KeyCode;

use sundown::core::task::{Priority, TaskStatus};
use sundown::import;
use sundown::tea::{update, Command, DetailTab, InputKind, Message, Mode, NotificationLevel, View};

use crate::fixtures::{press, record_count, seeded_model, submit_input, type_text};

/// Test: completing a task unblocks its dependents.
/// Given the seed workspace (task 3 waits on task 2)
/// When the operator completes task 2 from the board
/// Then task 3 stops being blocked and the progress gauge moves.
#[test]
fn test_toggle_chain_unblocks_dependents() {
    let mut model = seeded_model();

    let before = model.snapshot();
    assert_eq!(before.progress_percent, 17);
    assert!(
        before.tasks[2].blocked,
        "task 3 starts blocked behind task 2"
    );

    // Move the cursor to task 2 (row index 1) and toggle it.
    press(&mut model, KeyCode::Char('j'));
    press(&mut model, KeyCode::Char(' '));

    let ws = model.active();
    assert_eq!(ws.tasks[1].status, TaskStatus::Completed);

    let after = model.snapshot();
    assert_eq!(after.progress_percent, 33);
    assert!(!after.tasks[2].blocked, "task 3 is now actionable");
}

/// Test: a blocked task refuses completion.
/// Given the seed workspace
/// When the operator tries to complete task 3 while task 2 is incomplete
/// Then the toggle is ignored and an error notification is shown.
#[test]
fn test_blocked_task_rejects_completion() {
    let mut model = seeded_model();

    press(&mut model, KeyCode::Char('j'));
    press(&mut model, KeyCode::Char('j'));
    press(&mut model, KeyCode::Char(' '));

    assert_eq!(model.active().tasks[2].status, TaskStatus::Pending);
    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
    assert_eq!(n.message, "Task is blocked by incomplete dependencies");
}

/// Test: priority filter narrows the table without touching order.
#[test]
fn test_filter_cycle_and_visible_rows() {
    let mut model = seeded_model();

    press(&mut model, KeyCode::Char('f'));
    assert_eq!(model.priority_filter, Some(Priority::High));
    let snapshot = model.snapshot();
    assert_eq!(snapshot.tasks.len(), 4);
    assert!(snapshot.tasks.iter().all(|t| t.priority == Priority::High));

    press(&mut model, KeyCode::Char('f'));
    assert_eq!(model.priority_filter, Some(Priority::Medium));
    assert_eq!(model.snapshot().tasks.len(), 2);

    press(&mut model, KeyCode::Char('f'));
    press(&mut model, KeyCode::Char('f'));
    assert_eq!(model.priority_filter, None);
    assert_eq!(model.snapshot().tasks.len(), 6);
}

/// Test: reordering is a full-list swap and is refused under a filter.
#[test]
fn test_reorder_swaps_and_is_disabled_while_filtered() {
    let mut model = seeded_model();

    let first_title = model.active().tasks[0].title.clone();
    press(&mut model, KeyCode::Char('J'));
    assert_eq!(model.active().tasks[1].title, first_title);
    assert_eq!(model.selected, 1, "selection follows the moved row");

    press(&mut model, KeyCode::Char('f'));
    press(&mut model, KeyCode::Char('J'));
    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.message, "Reordering is disabled while filtered");
}

/// Test: detail pane dependency editing.
/// Given task 1 opened in the detail pane on the Dependencies tab
/// When the operator toggles the first candidate
/// Then the dependency is added, and toggling again removes it.
#[test]
fn test_detail_dependency_toggle_roundtrip() {
    let mut model = seeded_model();

    press(&mut model, KeyCode::Enter);
    assert_eq!(model.mode, Mode::Detail(DetailTab::Comments));
    press(&mut model, KeyCode::Char('3'));
    assert_eq!(model.mode, Mode::Detail(DetailTab::Deps));

    // First candidate for task 1 is task 2.
    press(&mut model, KeyCode::Char(' '));
    let deps = model.active().tasks[0].dependencies.clone();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0], model.active().tasks[1].id);

    press(&mut model, KeyCode::Char(' '));
    assert!(model.active().tasks[0].dependencies.is_empty());
}

/// Test: comments land on the selected task with the operator as author.
#[test]
fn test_comment_flow_records_operator() {
    let mut model = seeded_model();

    submit_input(&mut model, 'c', "Verified no instances remain");

    let task = &model.active().tasks[0];
    let comment = task.comments.last().unwrap();
    assert_eq!(comment.author, "Current User");
    assert_eq!(comment.text, "Verified no instances remain");
    // Comments are not audited.
    assert!(task.history.is_empty());
}

/// Test: workspace creation via the two-step name/region prompt.
/// Given the seed workspace is active
/// When the operator creates "Staging Env" in eu-west-1
/// Then the new workspace becomes active with the default roster,
/// and the picker can switch back to the seed.
#[test]
fn test_workspace_create_and_switch_back() {
    let mut model = seeded_model();

    press(&mut model, KeyCode::Char('n'));
    assert_eq!(model.mode, Mode::Input(InputKind::WorkspaceName));
    type_text(&mut model, "Staging Env");
    press(&mut model, KeyCode::Enter);
    assert_eq!(model.mode, Mode::Input(InputKind::WorkspaceRegion));
    type_text(&mut model, "eu-west-1");
    press(&mut model, KeyCode::Enter);

    assert_eq!(model.workspaces.len(), 2);
    let ws = model.active();
    assert_eq!(ws.name, "Staging Env");
    assert_eq!(ws.region, "eu-west-1");
    assert_eq!(ws.team, vec!["System Admin".to_string()]);
    assert!(ws.tasks.is_empty());

    // Picker: move to the seed workspace and switch.
    press(&mut model, KeyCode::Char('w'));
    assert_eq!(model.mode, Mode::WorkspacePicker);
    press(&mut model, KeyCode::Char('k'));
    press(&mut model, KeyCode::Enter);
    assert_eq!(model.active().name, "Legacy Production (AWS 1.0)");
    assert_eq!(model.mode, Mode::Board);
}

/// Test: empty region defaults to us-east-1.
#[test]
fn test_workspace_region_defaults() {
    let mut model = seeded_model();

    submit_input(&mut model, 'n', "Scratch");
    press(&mut model, KeyCode::Enter); // empty region
    assert_eq!(model.active().region, "us-east-1");
}

/// Test: team roster editing with duplicate rejection.
#[test]
fn test_team_roster_add_and_remove() {
    let mut model = seeded_model();

    submit_input(&mut model, 'T', "FinOps Team");
    assert!(model.active().team.contains(&"FinOps Team".to_string()));

    submit_input(&mut model, 'T', "FinOps Team");
    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
    assert_eq!(n.message, "'FinOps Team' is already on the team");

    submit_input(&mut model, 'D', "FinOps Team");
    assert!(!model.active().team.contains(&"FinOps Team".to_string()));

    submit_input(&mut model, 'D', "Nobody");
    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.message, "No team member named 'Nobody'");
}

/// Test: bulk import end to end through a real file.
/// Given a CSV payload on disk
/// When the file is loaded and the result delivered as a message
/// Then the tasks are appended as Pending and the counts update.
#[test]
fn test_import_file_appends_pending_tasks() {
    let mut model = seeded_model();
    let before = model.active().tasks.len();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "title,category,priority,owner,duedate\n\
         Delete old AMIs,Compute,High,DevOps Team,2025-02-12\n\
         Archive CloudWatch logs,Storage,Low,Data Team,2025-02-14"
    )
    .unwrap();

    let tasks = import::load_file(file.path(), &model.active().team).unwrap();
    let commands = update(&mut model, Message::TasksImported(tasks));

    assert_eq!(model.active().tasks.len(), before + 2);
    assert!(model
        .active()
        .tasks
        .iter()
        .skip(before)
        .all(|t| t.status == TaskStatus::Pending));
    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.level, NotificationLevel::Info);
    assert_eq!(n.message, "Imported 2 tasks");
    assert!(commands.contains(&Command::RefreshReminderProbes));

    let snapshot = model.snapshot();
    assert_eq!(snapshot.total, before + 2);
}

/// Test: a failed import surfaces as an error, mutating nothing.
#[test]
fn test_import_failure_reports_error() {
    let mut model = seeded_model();
    let records = record_count(&model);

    update(
        &mut model,
        Message::ImportFailed("IO error: No such file".to_string()),
    );

    assert_eq!(record_count(&model), records);
    let n = model.notification.as_ref().unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
}

/// Test: chat round trip.
/// Given the assistant prompt is open
/// When a question is submitted and the reply arrives
/// Then the transcript holds greeting, question, and answer in order.
#[test]
fn test_chat_prompt_and_reply() {
    let mut model = seeded_model();
    assert_eq!(model.chat.len(), 1, "transcript starts with the greeting");

    let commands = submit_input(&mut model, 'a', "What should I drain first?");
    assert!(matches!(&commands[..], [Command::AskAssistant { prompt }] if prompt == "What should I drain first?"));
    assert!(model.chat_pending);
    assert_eq!(model.chat.len(), 2);

    update(
        &mut model,
        Message::AdviceReady("Start with stateless compute.".to_string()),
    );
    assert!(!model.chat_pending);
    assert_eq!(model.chat.len(), 3);
    assert_eq!(model.chat[2].content, "Start with stateless compute.");
}

/// Test: a second question while one is pending is dropped.
#[test]
fn test_chat_pending_drops_second_prompt() {
    let mut model = seeded_model();

    submit_input(&mut model, 'a', "first");
    let commands = submit_input(&mut model, 'a', "second");

    assert!(commands.is_empty());
    assert_eq!(model.chat.len(), 2, "second prompt never enters the transcript");
}

/// Test: Tab cycles through all three views and back.
#[test]
fn test_view_cycle() {
    let mut model = seeded_model();
    assert_eq!(model.view, View::Dashboard);
    press(&mut model, KeyCode::Tab);
    assert_eq!(model.view, View::Infrastructure);
    press(&mut model, KeyCode::Tab);
    assert_eq!(model.view, View::Reports);
    press(&mut model, KeyCode::Tab);
    assert_eq!(model.view, View::Dashboard);
}

/// Test: quit emits exactly one Quit command.
#[test]
fn test_quit_key() {
    let mut model = seeded_model();
    let commands = press(&mut model, KeyCode::Char('q'));
    assert_eq!(commands, vec![Command::Quit]);
}

/// Test: every update that changes state bumps the snapshot version.
#[test]
fn test_snapshot_versions_are_monotonic() {
    let mut model = seeded_model();
    let mut last = model.snapshot().version;
    for code in [
        KeyCode::Char('j'),
        KeyCode::Char(' '),
        KeyCode::Char('f'),
        KeyCode::Tab,
    ] {
        press(&mut model, code);
        let v = model.snapshot().version;
        assert!(v > last, "version {} should exceed {}", v, last);
        last = v;
    }
}
