//! Terminal UI rendering for the Sundown dashboard.
//!
//! Single-screen operations dashboard: header with countdown, stat
//! cards, a task table with an expandable detail pane, and a side
//! panel for the team roster and the chat transcript.
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state. This enables the decoupled render loop.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Gauge, Paragraph},
    Frame,
};

use crate::assistant::ChatRole;
use crate::core::task::{Priority, TaskStatus};
use crate::core::workspace::WorkspaceStatus;
use crate::render::{Countdown, RenderState, TaskView};
use crate::tea::{DetailTab, InputKind, Mode, Notification, NotificationLevel, View};

// Color tokens (selection uses REVERSED modifier to adapt to terminal theme)
const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_SEPARATOR: Color = Color::White;

const COLOR_STATUS_COMPLETED: Color = Color::Green;
const COLOR_STATUS_IN_PROGRESS: Color = Color::Cyan;
const COLOR_STATUS_BLOCKED: Color = Color::Red;
const COLOR_STATUS_PENDING: Color = Color::DarkGray;

const COLOR_PRIORITY_HIGH: Color = Color::Red;
const COLOR_PRIORITY_MEDIUM: Color = Color::Yellow;
const COLOR_PRIORITY_LOW: Color = Color::DarkGray;

const COLOR_WS_HEALTHY: Color = Color::Green;
const COLOR_WS_AT_RISK: Color = Color::Yellow;
const COLOR_WS_CRITICAL: Color = Color::Red;

// Layout constants
const SIDE_PANEL_WIDTH: u16 = 36;

// Column widths for the task table
const STATUS_WIDTH: usize = 12;
const PRIORITY_WIDTH: usize = 6;
const CATEGORY_WIDTH: usize = 11;
const OWNER_WIDTH: usize = 14;
const DUE_WIDTH: usize = 10;
const LOG_WIDTH: usize = 4;
const SPACING: usize = 2;

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

fn keybindings_for_state(state: &RenderState) -> Vec<KeybindingGroup> {
    match state.mode {
        Mode::Board => vec![
            KeybindingGroup(vec![
                Keybinding("j/k", "move"),
                Keybinding("Tab", "view"),
                Keybinding("Enter", "detail"),
            ]),
            KeybindingGroup(vec![
                Keybinding("Space", "toggle"),
                Keybinding("J/K", "reorder"),
                Keybinding("f", "filter"),
            ]),
            KeybindingGroup(vec![
                Keybinding("c", "comment"),
                Keybinding("o", "owner"),
                Keybinding("p", "priority"),
                Keybinding("r", "remind"),
            ]),
            KeybindingGroup(vec![
                Keybinding("w", "workspace"),
                Keybinding("a", "ask"),
                Keybinding("q", "quit"),
            ]),
        ],
        Mode::Detail(_) => vec![KeybindingGroup(vec![
            Keybinding("1/2/3", "tab"),
            Keybinding("Space", "toggle dep"),
            Keybinding("Esc", "close"),
        ])],
        Mode::Input(_) => vec![KeybindingGroup(vec![
            Keybinding("Enter", "submit"),
            Keybinding("Esc", "cancel"),
        ])],
        Mode::WorkspacePicker => vec![KeybindingGroup(vec![
            Keybinding("j/k", "move"),
            Keybinding("Enter", "switch"),
            Keybinding("Esc", "cancel"),
        ])],
    }
}

/// Main render function - entry point for all UI drawing.
/// Takes an immutable RenderState snapshot.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    render_main_layout(frame, state);

    if state.mode == Mode::WorkspacePicker {
        render_workspace_picker(frame, state);
    }

    if let Some(ref notification) = state.notification {
        render_notification(frame, notification, frame.area());
    }
}

/// Render the main layout: header + stats + body + status bar.
fn render_main_layout(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();

    if area.height < 6 {
        render_header(frame, state, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(2), // stat cards + progress
        Constraint::Length(1), // separator
        Constraint::Fill(1),   // body
        Constraint::Length(1), // status bar
    ])
    .split(area);

    render_header(frame, state, chunks[0]);
    render_stats(frame, state, chunks[1]);
    render_separator(frame, chunks[2]);

    match state.view {
        View::Dashboard => render_dashboard(frame, state, chunks[3]),
        View::Infrastructure => render_infrastructure(frame, state, chunks[3]),
        View::Reports => render_reports(frame, state, chunks[3]),
    }

    render_statusbar(frame, state, chunks[4]);
}

/// Header: workspace identity on the left, sync state and countdown on
/// the right.
fn render_header(frame: &mut Frame, state: &RenderState, area: Rect) {
    let ws_color = workspace_status_color(state.workspace_status);

    let mut left: Vec<Span> = vec![
        Span::styled(
            state.workspace_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", state.region),
            Style::default().fg(COLOR_TEXT_DIMMED),
        ),
        Span::styled(" [", Style::default().fg(COLOR_TEXT_MUTED)),
        Span::styled(
            state.workspace_status.to_string(),
            Style::default().fg(ws_color),
        ),
        Span::styled("]", Style::default().fg(COLOR_TEXT_MUTED)),
        Span::styled(
            format!("  {}", state.view.label()),
            Style::default().fg(COLOR_TEXT_MUTED),
        ),
    ];

    let sync = if state.syncing {
        "Syncing...".to_string()
    } else {
        format_last_synced(state.last_synced)
    };
    let countdown = format_countdown(Countdown::remaining(state.deadline, Utc::now()));
    let right = format!("{}  │  {}", sync, countdown);

    let left_width: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let spacer = (area.width as usize)
        .saturating_sub(left_width)
        .saturating_sub(right.chars().count());
    if spacer > 0 {
        left.push(Span::raw(" ".repeat(spacer)));
    }
    left.push(Span::styled(
        right,
        Style::default()
            .fg(COLOR_TEXT_DIMMED)
            .add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(Line::from(left)), area);
}

/// Stat cards plus the overall progress gauge.
fn render_stats(frame: &mut Frame, state: &RenderState, area: Rect) {
    if area.height < 2 {
        return;
    }
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    let filter = match state.priority_filter {
        Some(p) => format!("  filter: {}", p),
        None => String::new(),
    };
    let line = Line::from(vec![
        Span::styled("Tasks ", Style::default().fg(COLOR_TEXT_MUTED)),
        Span::styled(
            format!("{}", state.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Completed ", Style::default().fg(COLOR_TEXT_MUTED)),
        Span::styled(
            format!("{}", state.completed),
            Style::default()
                .fg(COLOR_STATUS_COMPLETED)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Blockers ", Style::default().fg(COLOR_TEXT_MUTED)),
        Span::styled(
            format!("{}", state.blockers),
            Style::default()
                .fg(COLOR_STATUS_BLOCKED)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(filter, Style::default().fg(COLOR_PRIORITY_MEDIUM)),
    ]);
    frame.render_widget(Paragraph::new(line), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(COLOR_STATUS_IN_PROGRESS)
                .bg(Color::DarkGray),
        )
        .percent(state.progress_percent)
        .label(format!("{}%", state.progress_percent));
    frame.render_widget(gauge, rows[1]);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    let solid = "─".repeat(area.width as usize);
    let line = Line::from(Span::styled(solid, Style::default().fg(COLOR_SEPARATOR)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Dashboard body: task table (left) and team/chat side panel (right).
/// In detail mode the side panel shows the expanded task instead.
fn render_dashboard(frame: &mut Frame, state: &RenderState, area: Rect) {
    if area.width <= SIDE_PANEL_WIDTH + 20 {
        render_task_table(frame, state, area);
        return;
    }

    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(area);

    render_task_table(frame, state, chunks[0]);
    match state.mode {
        Mode::Detail(tab) => render_detail_pane(frame, state, tab, chunks[1]),
        _ => render_side_panel(frame, state, chunks[1]),
    }
}

/// Render the task table with scrolloff navigation.
fn render_task_table(frame: &mut Frame, state: &RenderState, area: Rect) {
    if state.tasks.is_empty() {
        let msg = Line::from(Span::styled(
            "No tasks. Press 'u' to import or 'f' to clear the filter.",
            Style::default().fg(COLOR_TEXT_DIMMED),
        ));
        frame.render_widget(Paragraph::new(msg), area);
        return;
    }

    let header_height = 1;
    let content_height = area.height.saturating_sub(header_height as u16) as usize;

    // Scrolloff: keep selection centered
    let center = content_height / 2;
    let start = state.selected.saturating_sub(center);
    let end = (start + content_height).min(state.tasks.len());
    let start = end.saturating_sub(content_height);

    let mut lines: Vec<Line> = Vec::with_capacity(content_height + header_height);
    lines.push(render_header_row(area.width));
    lines.extend(
        state
            .tasks
            .iter()
            .enumerate()
            .skip(start)
            .take(content_height)
            .map(|(idx, task)| render_task_row(task, idx == state.selected, area.width)),
    );

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_header_row(width: u16) -> Line<'static> {
    let header_style = Style::default()
        .fg(COLOR_TEXT_DIMMED)
        .add_modifier(Modifier::BOLD);
    let spacing = "  ";

    if width < 30 {
        return Line::from(Span::styled("TASK", header_style));
    }

    let total_fixed = STATUS_WIDTH
        + PRIORITY_WIDTH
        + CATEGORY_WIDTH
        + OWNER_WIDTH
        + DUE_WIDTH
        + LOG_WIDTH
        + SPACING * 6;
    let title_width = (width as usize).saturating_sub(total_fixed);

    let cols = [
        format!("{:<width$}", "STATUS", width = STATUS_WIDTH),
        format!("{:<width$}", "TASK", width = title_width),
        format!("{:<width$}", "PRI", width = PRIORITY_WIDTH),
        format!("{:<width$}", "CATEGORY", width = CATEGORY_WIDTH),
        format!("{:<width$}", "OWNER", width = OWNER_WIDTH),
        format!("{:<width$}", "DUE", width = DUE_WIDTH),
        format!("{:<width$}", "LOG", width = LOG_WIDTH),
    ];

    let mut spans = Vec::with_capacity(cols.len() * 2);
    for (i, col) in cols.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(spacing, header_style));
        }
        spans.push(Span::styled(col, header_style));
    }
    Line::from(spans)
}

/// Render a single task row.
/// Columns: STATUS | TASK (flex) | PRI | CATEGORY | OWNER | DUE | LOG
fn render_task_row(task: &TaskView, is_selected: bool, width: u16) -> Line<'static> {
    if width < 30 {
        let style = if is_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        return Line::from(Span::styled(truncate(&task.title, width as usize), style));
    }

    let total_fixed = STATUS_WIDTH
        + PRIORITY_WIDTH
        + CATEGORY_WIDTH
        + OWNER_WIDTH
        + DUE_WIDTH
        + LOG_WIDTH
        + SPACING * 6;
    let title_width = (width as usize).saturating_sub(total_fixed);

    // A derived-blocked task shows a lock marker next to its status.
    let status_label = if task.blocked && task.status != TaskStatus::Completed {
        format!("⊘ {}", task.status)
    } else {
        task.status.to_string()
    };
    let status_padded = format!(
        "{:<width$}",
        truncate(&status_label, STATUS_WIDTH),
        width = STATUS_WIDTH
    );

    let title_padded = format!(
        "{:<width$}",
        truncate(&task.title, title_width),
        width = title_width
    );
    let priority_padded = format!(
        "{:<width$}",
        priority_label(task.priority),
        width = PRIORITY_WIDTH
    );
    let category_padded = format!(
        "{:<width$}",
        truncate(&task.category.to_string(), CATEGORY_WIDTH),
        width = CATEGORY_WIDTH
    );
    let owner_padded = format!(
        "{:<width$}",
        truncate(&task.owner, OWNER_WIDTH),
        width = OWNER_WIDTH
    );
    let due = task
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let due_padded = format!("{:<width$}", due, width = DUE_WIDTH);
    let log_padded = format!("{:<width$}", task.log_count, width = LOG_WIDTH);

    let spacing = "  ";
    let status_color = if task.blocked && task.status != TaskStatus::Completed {
        COLOR_STATUS_BLOCKED
    } else {
        task_status_color(task.status)
    };

    let (status_style, primary_style, secondary_style, priority_style) = if is_selected {
        let selected = Style::default().add_modifier(Modifier::REVERSED);
        (selected, selected, selected, selected)
    } else {
        let primary = if task.status == TaskStatus::Completed {
            Style::default()
                .fg(COLOR_TEXT_MUTED)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default()
        };
        (
            Style::default().fg(status_color),
            primary,
            Style::default().fg(COLOR_TEXT_DIMMED),
            Style::default().fg(priority_color(task.priority)),
        )
    };

    Line::from(vec![
        Span::styled(status_padded, status_style),
        Span::styled(spacing, primary_style),
        Span::styled(title_padded, primary_style),
        Span::styled(spacing, primary_style),
        Span::styled(priority_padded, priority_style),
        Span::styled(spacing, primary_style),
        Span::styled(category_padded, secondary_style),
        Span::styled(spacing, primary_style),
        Span::styled(owner_padded, secondary_style),
        Span::styled(spacing, primary_style),
        Span::styled(due_padded, secondary_style),
        Span::styled(spacing, primary_style),
        Span::styled(log_padded, secondary_style),
    ])
}

/// Side panel: team roster on top, chat transcript below.
fn render_side_panel(frame: &mut Frame, state: &RenderState, area: Rect) {
    let team_height = (state.team.len() as u16 + 1).min(area.height / 3);
    let chunks =
        Layout::vertical([Constraint::Length(team_height), Constraint::Fill(1)]).split(area);

    let mut team_lines = vec![Line::from(Span::styled(
        "TEAM",
        Style::default()
            .fg(COLOR_TEXT_DIMMED)
            .add_modifier(Modifier::BOLD),
    ))];
    team_lines.extend(state.team.iter().map(|member| {
        Line::from(Span::styled(
            format!("  {}", member),
            Style::default().fg(COLOR_TEXT_DIMMED),
        ))
    }));
    frame.render_widget(Paragraph::new(team_lines), chunks[0]);

    render_chat(frame, state, chunks[1]);
}

fn render_chat(frame: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "ASSISTANT",
        Style::default()
            .fg(COLOR_TEXT_DIMMED)
            .add_modifier(Modifier::BOLD),
    ))];

    let wrap_width = area.width.saturating_sub(2) as usize;
    for msg in &state.chat {
        let (prefix, style) = match msg.role {
            ChatRole::User => ("> ", Style::default()),
            ChatRole::Model => ("  ", Style::default().fg(COLOR_TEXT_DIMMED)),
        };
        for chunk in wrap_text(&msg.content, wrap_width.max(8)) {
            lines.push(Line::from(Span::styled(
                format!("{}{}", prefix, chunk),
                style,
            )));
        }
    }
    if state.chat_pending {
        lines.push(Line::from(Span::styled(
            "  ...",
            Style::default().fg(COLOR_TEXT_MUTED),
        )));
    }

    // Tail the transcript
    let visible = area.height as usize;
    let start = lines.len().saturating_sub(visible);
    let lines: Vec<Line> = lines.into_iter().skip(start).collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Expanded detail pane for the selected task.
fn render_detail_pane(frame: &mut Frame, state: &RenderState, tab: DetailTab, area: Rect) {
    let Some(task) = state.tasks.get(state.selected) else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        truncate(&task.title, area.width as usize),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let tabs = [DetailTab::Comments, DetailTab::History, DetailTab::Deps];
    let mut tab_spans: Vec<Span> = Vec::new();
    for (i, t) in tabs.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::styled(" │ ", Style::default().fg(COLOR_TEXT_MUTED)));
        }
        let style = if *t == tab {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT_MUTED)
        };
        tab_spans.push(Span::styled(format!("{} {}", i + 1, t.label()), style));
    }
    lines.push(Line::from(tab_spans));
    lines.push(Line::from(""));

    match tab {
        DetailTab::Comments => {
            if task.comments.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No comments.",
                    Style::default().fg(COLOR_TEXT_MUTED),
                )));
            }
            for comment in &task.comments {
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} {}",
                        comment.timestamp.format("%m-%d %H:%M"),
                        comment.author
                    ),
                    Style::default().fg(COLOR_TEXT_DIMMED),
                )));
                for chunk in wrap_text(&comment.text, area.width.saturating_sub(2) as usize) {
                    lines.push(Line::from(format!("  {}", chunk)));
                }
            }
        }
        DetailTab::History => {
            if task.history.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No changes recorded.",
                    Style::default().fg(COLOR_TEXT_MUTED),
                )));
            }
            for entry in &task.history {
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} {} by {}",
                        entry.timestamp.format("%m-%d %H:%M"),
                        entry.field,
                        entry.author
                    ),
                    Style::default().fg(COLOR_TEXT_DIMMED),
                )));
                lines.push(Line::from(format!(
                    "  {} → {}",
                    entry.old_value, entry.new_value
                )));
            }
        }
        DetailTab::Deps => {
            let mut idx = 0;
            for candidate in state.tasks.iter().filter(|t| t.id != task.id) {
                let checked = task.dependencies.contains(&candidate.id);
                let marker = if checked { "[x]" } else { "[ ]" };
                let style = if idx == state.dep_selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else if checked {
                    Style::default()
                } else {
                    Style::default().fg(COLOR_TEXT_DIMMED)
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} {}",
                        marker,
                        truncate(&candidate.title, area.width.saturating_sub(4) as usize)
                    ),
                    style,
                )));
                idx += 1;
            }
            if idx == 0 {
                lines.push(Line::from(Span::styled(
                    "No other tasks.",
                    Style::default().fg(COLOR_TEXT_MUTED),
                )));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Infrastructure view: per-category rollups.
fn render_infrastructure(frame: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "CATEGORY ROLLUP",
        Style::default()
            .fg(COLOR_TEXT_DIMMED)
            .add_modifier(Modifier::BOLD),
    ))];

    for rollup in &state.rollups {
        let bar_width = 20usize;
        let filled = (rollup.percent as usize * bar_width) / 100;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(bar_width - filled));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", rollup.category.to_string()),
                Style::default(),
            ),
            Span::styled(bar, Style::default().fg(COLOR_STATUS_IN_PROGRESS)),
            Span::styled(
                format!(
                    "  {}/{} ({}%)",
                    rollup.completed, rollup.total, rollup.percent
                ),
                Style::default().fg(COLOR_TEXT_DIMMED),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Reports view: everything standing in the way of the deadline.
fn render_reports(frame: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "BLOCKERS",
        Style::default()
            .fg(COLOR_TEXT_DIMMED)
            .add_modifier(Modifier::BOLD),
    ))];

    let blocked: Vec<&TaskView> = state
        .tasks
        .iter()
        .filter(|t| {
            t.status == TaskStatus::Blocked || (t.blocked && t.status != TaskStatus::Completed)
        })
        .collect();

    if blocked.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing is blocked.",
            Style::default().fg(COLOR_STATUS_COMPLETED),
        )));
    }
    for task in blocked {
        let reason = if task.status == TaskStatus::Blocked {
            "flagged Blocked"
        } else {
            "waiting on dependencies"
        };
        lines.push(Line::from(vec![
            Span::styled("⊘ ", Style::default().fg(COLOR_STATUS_BLOCKED)),
            Span::styled(task.title.clone(), Style::default()),
            Span::styled(
                format!("  ({}, {} deps)", reason, task.dependencies.len()),
                Style::default().fg(COLOR_TEXT_MUTED),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Workspace picker overlay.
fn render_workspace_picker(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    let height = (state.workspaces.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 50.min(area.width.saturating_sub(2));
    let popup = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let mut lines = vec![Line::from(Span::styled(
        "WORKSPACES",
        Style::default()
            .fg(COLOR_TEXT_DIMMED)
            .add_modifier(Modifier::BOLD),
    ))];
    for (idx, ws) in state.workspaces.iter().enumerate() {
        let marker = if ws.active { "●" } else { " " };
        let style = if idx == state.picker_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} {}  ({})",
                marker,
                truncate(&ws.name, width.saturating_sub(16) as usize),
                ws.region
            ),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), popup);
}

/// Render the bottom status bar: keymap legend or input prompt.
fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let line = match state.mode {
        Mode::Input(kind) => render_input_line(state, kind),
        _ => render_keymap_line(state),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_keymap_line(state: &RenderState) -> Line<'static> {
    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let mut spans: Vec<Span> = Vec::new();
    for group in keybindings_for_state(state) {
        if group.0.is_empty() {
            continue;
        }
        if !spans.is_empty() {
            spans.push(Span::styled(" │ ", sep_style));
        }
        for (key_idx, keybinding) in group.0.iter().enumerate() {
            if key_idx > 0 {
                spans.push(Span::styled(" • ", sep_style));
            }
            spans.push(Span::styled(keybinding.0, key_style));
            spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
        }
    }
    Line::from(spans)
}

fn render_input_line(state: &RenderState, kind: InputKind) -> Line<'static> {
    let hint_style = Style::default().fg(COLOR_TEXT_MUTED);
    let label_style = Style::default().fg(Color::Reset);
    let input_style = Style::default().fg(Color::White);
    let cursor_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::SLOW_BLINK);

    Line::from(vec![
        Span::styled("Enter ", hint_style),
        Span::styled("• ", hint_style),
        Span::styled("Esc  ", hint_style),
        Span::styled(format!("{}: ", kind.label()), label_style),
        Span::styled(state.input_buffer.clone(), input_style),
        Span::styled("_", cursor_style),
    ])
}

/// Render notification message on the bottom line of the screen.
fn render_notification(frame: &mut Frame, notification: &Notification, area: Rect) {
    let notification_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, notification_area);

    let line = match notification.level {
        NotificationLevel::Error => Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(Color::Red),
            ),
        ]),
        NotificationLevel::Info => Line::from(Span::styled(
            notification.message.clone(),
            Style::default().fg(Color::Green),
        )),
    };

    frame.render_widget(Paragraph::new(line), notification_area);
}

// Helper functions

fn task_status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Completed => COLOR_STATUS_COMPLETED,
        TaskStatus::InProgress => COLOR_STATUS_IN_PROGRESS,
        TaskStatus::Blocked => COLOR_STATUS_BLOCKED,
        TaskStatus::Pending => COLOR_STATUS_PENDING,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => COLOR_PRIORITY_HIGH,
        Priority::Medium => COLOR_PRIORITY_MEDIUM,
        Priority::Low => COLOR_PRIORITY_LOW,
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Medium => "Med",
        Priority::Low => "Low",
    }
}

fn workspace_status_color(status: WorkspaceStatus) -> Color {
    match status {
        WorkspaceStatus::Healthy => COLOR_WS_HEALTHY,
        WorkspaceStatus::AtRisk => COLOR_WS_AT_RISK,
        WorkspaceStatus::Critical => COLOR_WS_CRITICAL,
    }
}

/// "12d 04:05:06" until the deadline, or "DEADLINE PASSED".
fn format_countdown(c: Countdown) -> String {
    if c.expired {
        "DEADLINE PASSED".to_string()
    } else {
        format!(
            "{}d {:02}:{:02}:{:02}",
            c.days, c.hours, c.minutes, c.seconds
        )
    }
}

fn format_last_synced(last: Option<DateTime<Utc>>) -> String {
    match last {
        Some(ts) => format!("Synced {}", ts.format("%H:%M:%S")),
        None => "Not synced".to_string(),
    }
}

/// Greedy word wrap; long words are split hard.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                out.push(std::mem::take(&mut current));
                current = word.to_string();
            }
            while current.chars().count() > width {
                let head: String = current.chars().take(width).collect();
                let tail: String = current.chars().skip(width).collect();
                out.push(head);
                current = tail;
            }
        }
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}~", truncated)
    }
}
