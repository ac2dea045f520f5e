//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the page and
//! translates keyboard events into browser-style key names for the engine.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop redraws only after an event or a page mutation, and otherwise
//! sleeps up to 250ms in the event poll.
//!
//! ## Startup
//!
//! [`bootstrap::start`] can wait a long time for a page that never renders.
//! It runs against a ticker that redraws a waiting screen and drains input,
//! so `q` and Ctrl+C work from the first frame.
//!
//! ## Mutation Forwarding
//!
//! The page counts structural changes. Each pass drains that count and, when
//! it is non-zero, forwards one signal to [`Engine::on_mutation`], the same
//! way a mutation observer would batch a burst of DOM changes.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::bootstrap::{self, BootstrapError, BootstrapTiming};
use crate::core::input::KeyOutcome;
use crate::core::{Engine, Host};
use crate::page::Page;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(250);
const STARTUP_TICK: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Event types are needed to tell key repeats from presses. Terminals
        // without the kitty protocol ignore the request.
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}

/// Forwards pending page mutations to the engine. Returns whether any
/// were pending.
fn sync_mutations(engine: &mut Engine<Page>) -> bool {
    let pending = engine.host_mut().take_mutations();
    if pending == 0 {
        return false;
    }
    let eligible = engine.on_mutation();
    debug!("{} page mutation(s), {} eligible elements", pending, eligible);
    true
}

/// Outcome of [`bootstrap::start`], or `None` when `tick` asked to stop first.
type Startup<E> = Option<Result<Option<E>, BootstrapError>>;

/// Runs the bootstrap while calling `tick` every `interval` (first call
/// immediately). `tick` returns `Ok(true)` to abandon startup.
async fn bootstrap_until_quit<H, F>(
    engine: &mut Engine<H>,
    timing: &BootstrapTiming,
    interval: Duration,
    mut tick: F,
) -> std::io::Result<Startup<H::Element>>
where
    H: Host,
    F: FnMut() -> std::io::Result<bool>,
{
    let startup = bootstrap::start(engine, timing);
    tokio::pin!(startup);
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            result = &mut startup => return Ok(Some(result)),
            _ = ticker.tick() => {
                if tick()? {
                    return Ok(None);
                }
            }
        }
    }
}

pub async fn run(mut engine: Engine<Page>, timing: BootstrapTiming) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let title = engine.host().title().to_string();
    let startup = bootstrap_until_quit(&mut engine, &timing, STARTUP_TICK, || {
        terminal.draw(|f| ui::draw_waiting(f, &title))?;
        Ok(std::iter::from_fn(poll_event_immediate).any(|event| event == TuiEvent::Quit))
    })
    .await;

    match startup {
        Ok(Some(Ok(Some(first)))) => info!("Initial focus on {:?}", first),
        Ok(Some(Ok(None))) => info!("Bootstrap found nothing to focus"),
        Ok(Some(Err(e))) => warn!("Bootstrap failed: {}", e),
        Ok(None) => {
            info!("Quit requested during startup");
            ratatui::restore();
            return Ok(());
        }
        Err(e) => {
            ratatui::restore();
            return Err(e);
        }
    }
    // The bootstrap refresh already saw the initial document
    engine.host_mut().take_mutations();

    let mut needs_redraw = true;
    let result = loop {
        if sync_mutations(&mut engine) {
            needs_redraw = true;
        }

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &engine)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Quit => {
                    should_quit = true;
                    break;
                }
                TuiEvent::Resize => {}
                TuiEvent::Key(key) => {
                    if let KeyOutcome::Handled { command, .. } = engine.handle_key(&key) {
                        debug!("{:?} handled as {:?}", key.key, command);
                    }
                    // Activation may navigate; refresh before the next key
                    sync_mutations(&mut engine);
                }
            }
        }

        if should_quit {
            info!("Quit requested");
            break Ok(());
        }
    };

    ratatui::restore();
    result
}
