//! # Navigation Engine
//!
//! Wires the registry, the focus machine and the key map around one host.
//!
//! ```text
//! mutation signal ──► on_mutation() ──► Registry::refresh
//! key event ────────► handle_key() ──► KeyMap::dispatch
//!                                        ├─ Move     → FocusMachine::move_focus(snapshot)
//!                                        ├─ Activate → Registry::activate(platform focus)
//!                                        ├─ Back     → Host::history_back
//!                                        └─ Refresh  → Host::reload
//! ```
//!
//! Every call runs to completion before returning; the engine has no
//! background work and no interior mutability.

use log::{debug, info};

use crate::core::focus::{FocusMachine, FocusState, MoveOutcome};
use crate::core::geometry::NavigableElement;
use crate::core::host::Host;
use crate::core::input::{Command, KeyEvent, KeyMap, KeyOutcome};
use crate::core::registry::{Registry, RegistryOptions};
use crate::core::selector::{DEFAULT_DEAD_ZONE, Direction};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub registry: RegistryOptions,
    pub dead_zone: f64,
    pub keymap: KeyMap,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            registry: RegistryOptions::default(),
            dead_zone: DEFAULT_DEAD_ZONE,
            keymap: KeyMap::default(),
        }
    }
}

pub struct Engine<H: Host> {
    host: H,
    registry: Registry<H::Element>,
    focus: FocusMachine<H::Element>,
    keymap: KeyMap,
    dead_zone: f64,
}

impl<H: Host> Engine<H> {
    pub fn new(host: H, options: EngineOptions) -> Self {
        Self {
            host,
            registry: Registry::new(options.registry),
            focus: FocusMachine::new(),
            keymap: options.keymap,
            dead_zone: options.dead_zone,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn focus_state(&self) -> FocusState<H::Element> {
        self.focus.state()
    }

    /// The current eligible set, recomputed from the host.
    pub fn snapshot(&self) -> Vec<NavigableElement<H::Element>> {
        self.registry.snapshot(&self.host)
    }

    /// Entry point for the external mutation signal.
    pub fn on_mutation(&mut self) -> usize {
        self.registry.refresh(&mut self.host).len()
    }

    /// Applies first focus if nothing is focused yet.
    pub fn bootstrap(&mut self) -> Option<H::Element> {
        let pool = self.registry.snapshot(&self.host);
        self.focus.bootstrap(&mut self.host, &pool)
    }

    pub fn move_focus(&mut self, direction: Direction) -> MoveOutcome<H::Element> {
        let pool = self.registry.snapshot(&self.host);
        self.focus
            .move_focus(&mut self.host, &pool, direction, self.dead_zone)
    }

    /// Activates whatever holds platform focus. Returns the element clicked
    /// on behalf of the user, or `None` when nothing is focused.
    pub fn activate(&mut self) -> Option<H::Element> {
        let target = self.focus.activation_target(&self.host)?;
        debug!("Activate {:?}", target);
        self.registry.activate(&mut self.host, target);
        Some(target)
    }

    pub fn back(&mut self) -> bool {
        let went_back = self.host.history_back();
        if !went_back {
            debug!("Back requested with no history");
        }
        went_back
    }

    pub fn reload(&mut self) {
        info!("Reloading page");
        self.host.reload();
    }

    /// Runs one key event through the dispatcher and applies the command.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let outcome = self.keymap.dispatch(event);
        if let KeyOutcome::Handled { command, .. } = outcome {
            match command {
                Command::Move(direction) => {
                    self.move_focus(direction);
                }
                Command::Activate => {
                    self.activate();
                }
                Command::Back => {
                    self.back();
                }
                Command::Refresh => self.reload(),
            }
        }
        outcome
    }
}
