use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, RwLock};

use crate::actors::{ActorHandle, ReminderActor, SyncActor};
use crate::assistant::Assistant;
use crate::config::Config;
use crate::core::reminder::{self, ReminderProbe};
use crate::core::workspace::Workspace;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{dlog_debug, dlog_error, Result};

const MAX_BG_MESSAGES: usize = 50;

pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        import: Option<PathBuf>,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, import, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        import: Option<PathBuf>,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        dlog_debug!(
            "LogicThread::run_async operator={} sync_interval={}s",
            config.operator,
            config.sync_interval_secs
        );
        let assistant = Arc::new(Assistant::from_config(&config));
        let sync_interval = Duration::from_secs(config.sync_interval_secs);
        let reminder_interval = Duration::from_secs(config.reminder_interval_secs);

        let mut model = Model::new(vec![Workspace::seed()], config);
        if let Some(path) = import {
            match crate::import::load_file(&path, &model.active().team) {
                Ok(tasks) => {
                    dlog_debug!(
                        "startup import: {} tasks from {}",
                        tasks.len(),
                        path.display()
                    );
                    model.active_mut().upload_tasks(tasks);
                }
                Err(e) => {
                    dlog_error!("startup import failed: {}", e);
                    return Err(e);
                }
            }
        }

        let probes = Arc::new(RwLock::new(reminder::probes(&model.active().tasks)));
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        let actors = spawn_actors(
            msg_tx.clone(),
            probes.clone(),
            sync_interval,
            reminder_interval,
        );

        send_state(&state_tx, &model);
        // The countdown advances once a second even when nothing else
        // changes.
        let mut last_second = Instant::now();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) => {
                        for cmd in update(&mut model, Message::Key(key)) {
                            if execute_command(&mut model, cmd, &msg_tx, &probes, &assistant).await
                            {
                                shutdown.store(true, Ordering::Relaxed);
                                shutdown_actors(&actors);
                                return Ok(());
                            }
                        }

                        if model.dirty {
                            send_state(&state_tx, &model);
                            model.dirty = false;
                        }
                    }
                    Event::Resize(w, h) => {
                        update(&mut model, Message::Resize(w, h));
                    }
                    _ => {}
                }
            }

            // Background messages (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                for cmd in update(&mut model, msg) {
                    if execute_command(&mut model, cmd, &msg_tx, &probes, &assistant).await {
                        shutdown.store(true, Ordering::Relaxed);
                        shutdown_actors(&actors);
                        return Ok(());
                    }
                }
            }

            if last_second.elapsed() >= Duration::from_secs(1) {
                last_second = Instant::now();
                model.dirty = true;
            }

            if model.dirty {
                send_state(&state_tx, &model);
                model.dirty = false;
            }

            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        shutdown_actors(&actors);
        Ok(())
    }
}

/// Execute one side effect. Returns true when the app should quit.
async fn execute_command(
    model: &mut Model,
    cmd: Command,
    msg_tx: &mpsc::UnboundedSender<Message>,
    probes: &Arc<RwLock<Vec<ReminderProbe>>>,
    assistant: &Arc<Assistant>,
) -> bool {
    match cmd {
        Command::ScheduleSyncApply => {
            let settle = Duration::from_millis(model.config.sync_settle_ms);
            dlog_debug!("Command::ScheduleSyncApply settle={:?}", settle);
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(settle).await;
                let _ = tx.send(Message::SyncApply);
            });
        }

        Command::AskAssistant { prompt } => {
            dlog_debug!(
                "Command::AskAssistant prompt={}",
                prompt.chars().take(30).collect::<String>()
            );
            let assistant = assistant.clone();
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                let reply = assistant.advice(&prompt).await;
                let _ = tx.send(Message::AdviceReady(reply));
            });
        }

        Command::RefreshReminderProbes => {
            let snapshot = reminder::probes(&model.active().tasks);
            dlog_debug!("Command::RefreshReminderProbes count={}", snapshot.len());
            *probes.write().await = snapshot;
        }

        Command::ImportFile { path } => {
            dlog_debug!("Command::ImportFile path={}", path.display());
            let team = model.active().team.clone();
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                match crate::util::blocking(move || crate::import::load_file(&path, &team)).await {
                    Ok(tasks) => {
                        let _ = tx.send(Message::TasksImported(tasks));
                    }
                    Err(e) => {
                        dlog_error!("import failed: {}", e);
                        let _ = tx.send(Message::ImportFailed(e.to_string()));
                    }
                }
            });
        }

        Command::Quit => {
            dlog_debug!("Command::Quit");
            return true;
        }
    }

    false
}

fn send_state(state_tx: &Sender<RenderState>, model: &Model) {
    let _ = state_tx.try_send(model.snapshot());
}

fn spawn_actors(
    msg_tx: mpsc::UnboundedSender<Message>,
    probes: Arc<RwLock<Vec<ReminderProbe>>>,
    sync_interval: Duration,
    reminder_interval: Duration,
) -> Vec<ActorHandle> {
    dlog_debug!("Spawning actors");
    vec![
        SyncActor::new(msg_tx.clone())
            .with_interval(sync_interval)
            .spawn(),
        ReminderActor::new(msg_tx.clone(), probes)
            .with_interval(reminder_interval)
            .spawn(),
    ]
}

fn shutdown_actors(actors: &[ActorHandle]) {
    dlog_debug!("Shutting down {} actors", actors.len());
    for actor in actors {
        actor.shutdown();
    }
}
