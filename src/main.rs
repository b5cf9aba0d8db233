use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use sundown::app::LogicThread;
use sundown::config::Config;
use sundown::render::{RenderState, FRAME_DURATION};
use sundown::{dlog, ui, Result};

/// Sundown - decommissioning operations dashboard
#[derive(Parser, Debug)]
#[command(name = "sundown")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    SUNDOWN_DEBUG=1     Enable debug logging (alternative to --debug)\n    GEMINI_API_KEY      API key for the assistant panel")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.sundown/sundown.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Import tasks from a CSV file at startup
    #[arg(short = 'i', long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Operator name recorded in task history (overrides config)
    #[arg(long, value_name = "NAME")]
    pub operator: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    sundown::log::init_with_debug(cli.debug);

    if cli.debug {
        dlog!("Sundown starting (debug mode enabled)");
    } else {
        dlog!("Sundown starting");
    }

    let mut config = Config::load()?;
    if let Some(operator) = cli.operator {
        config.operator = operator;
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let import = cli.import;
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, import, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle.join();
    restore_terminal(&mut terminal)?;

    // Surface a logic-thread failure (e.g. a bad --import path) after the
    // terminal is restored so the message is actually readable.
    match logic_result {
        Ok(Err(e)) => {
            eprintln!("sundown: {}", e);
            Err(e)
        }
        _ => result,
    }
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
