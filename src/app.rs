use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{ColorsConfig, Config, KeybindsConfig, parse_key};
use crate::format::RenderedColumn;
use crate::host::ResourceKind;
use crate::host::sim::SimulatedEngine;
use crate::inspector::{Inspector, OverlayFrame};
use crate::ui::theme::Theme;

const STATUS_TTL_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub pin: KeyCode,
    pub unpin: KeyCode,
    pub log_new: KeyCode,
    pub cycle_kind: KeyCode,
    pub toggle_delta: KeyCode,
    pub load_batch: KeyCode,
    pub unload_batch: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            pin: parse_key(&kb.pin).unwrap_or(KeyCode::Char('p')),
            unpin: parse_key(&kb.unpin).unwrap_or(KeyCode::Char('x')),
            log_new: parse_key(&kb.log_new).unwrap_or(KeyCode::Char('n')),
            cycle_kind: parse_key(&kb.cycle_kind).unwrap_or(KeyCode::Char('k')),
            toggle_delta: parse_key(&kb.toggle_delta).unwrap_or(KeyCode::Char('d')),
            load_batch: parse_key(&kb.load_batch).unwrap_or(KeyCode::Char('l')),
            unload_batch: parse_key(&kb.unload_batch).unwrap_or(KeyCode::Char('u')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.pin), "Pin live census"),
            (key_label(self.unpin), "Unpin selected column"),
            (key_label(self.log_new), "Log new objects"),
            (key_label(self.cycle_kind), "Cycle object kind"),
            (key_label(self.toggle_delta), "Delta view for selection"),
            (key_label(self.load_batch), "Load object batch"),
            (key_label(self.unload_batch), "Unload oldest batch"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("t".to_string(), "Cycle theme"));
        entries.push(("←→".to_string(), "Select column"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

/// A column ready to draw, and whether it shows a delta.
#[derive(Debug, Clone)]
pub struct DisplayColumn {
    pub slot: usize,
    pub column: RenderedColumn,
    pub is_delta: bool,
}

pub struct App {
    pub running: bool,
    pub inspector: Inspector<SimulatedEngine>,
    pub frame: Option<OverlayFrame>,
    pub selected_slot: usize,
    pub selected_kind: ResourceKind,
    pub show_delta: bool,
    pub input_mode: InputMode,
    pub status_message: Option<(String, Instant)>,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    colors: ColorsConfig,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut engine = SimulatedEngine::new(config.simulation.batch_size);
        if config.simulation.use_process_counters {
            engine = engine.with_process_probe();
        }
        for _ in 0..config.simulation.initial_batches {
            engine.load_batch();
        }
        Self::with_engine(config, engine)
    }

    pub fn with_engine(config: Config, engine: SimulatedEngine) -> Self {
        let inspector = Inspector::new(engine, config.general.sample_interval());
        let theme = Theme::from_config(&config.general.theme, &config.colors);
        let keybinds = ResolvedKeybinds::from_config(&config.keybinds);

        App {
            running: true,
            inspector,
            frame: None,
            selected_slot: 0,
            selected_kind: ResourceKind::Texture,
            show_delta: false,
            input_mode: InputMode::Normal,
            status_message: None,
            theme,
            keybinds,
            colors: config.colors,
        }
    }

    /// One render pass: refresh the census if due and rebuild the columns.
    pub fn on_frame(&mut self) {
        self.frame = self.inspector.render_pass(false);
        self.clamp_selection();

        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= STATUS_TTL_SECS
        {
            self.status_message = None;
        }
    }

    pub fn slot_count(&self) -> usize {
        self.inspector.history().slot_count()
    }

    /// Columns in slot order. The selected pinned slot shows its delta
    /// against the next newer slot while delta view is on.
    pub fn display_columns(&self) -> Vec<DisplayColumn> {
        let Some(frame) = &self.frame else {
            return Vec::new();
        };
        frame
            .columns
            .iter()
            .enumerate()
            .map(|(slot, column)| {
                let delta = (self.show_delta && slot == self.selected_slot)
                    .then(|| self.inspector.delta_column(slot))
                    .flatten();
                match delta {
                    Some(column) => DisplayColumn {
                        slot,
                        column,
                        is_delta: true,
                    },
                    None => DisplayColumn {
                        slot,
                        column: column.clone(),
                        is_delta: false,
                    },
                }
            })
            .collect()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if let KeyCode::Left = code {
            return Action::Navigate(Direction::Left);
        }
        if let KeyCode::Right = code {
            return Action::Navigate(Direction::Right);
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.pin {
            return Action::PinCurrent;
        }
        if code == kb.unpin {
            return Action::UnpinSelected;
        }
        if code == kb.log_new {
            return Action::LogNewObjects;
        }
        if code == kb.cycle_kind {
            return Action::CycleKind;
        }
        if code == kb.toggle_delta {
            return Action::ToggleDelta;
        }
        if code == kb.load_batch {
            return Action::LoadBatch;
        }
        if code == kb.unload_batch {
            return Action::UnloadBatch;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if code == KeyCode::Char('t') {
            return Action::CycleTheme;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(direction) => self.navigate(direction),
            Action::PinCurrent => {
                self.inspector.pin_current();
                self.set_status(format!(
                    "Pinned live census ({} pinned)",
                    self.inspector.history().pinned_len()
                ));
                self.refresh_columns();
            }
            Action::UnpinSelected => {
                match self.inspector.unpin(self.selected_slot) {
                    Ok(_) => self.set_status(format!("Unpinned column {}", self.selected_slot)),
                    Err(err) => self.set_status(format!("Cannot unpin: {err}")),
                }
                self.refresh_columns();
            }
            Action::LogNewObjects => {
                match self
                    .inspector
                    .log_new_objects(self.selected_slot, self.selected_kind)
                {
                    Ok(report) if report.is_empty() => self.set_status(format!(
                        "No new {} since #{}",
                        self.selected_kind.label().to_lowercase(),
                        self.selected_slot + 1
                    )),
                    Ok(report) => self.set_status(report.to_string()),
                    Err(err) => self.set_status(format!("Cannot compare: {err}")),
                }
            }
            Action::CycleKind => {
                self.selected_kind = self.selected_kind.next();
                self.set_status(format!("Object kind: {}", self.selected_kind.label()));
            }
            Action::CycleTheme => {
                self.theme = self.theme.next(&self.colors);
            }
            Action::ToggleDelta => {
                self.show_delta = !self.show_delta;
            }
            Action::LoadBatch => {
                let batch = self.inspector.host_mut().load_batch();
                self.set_status(format!("Loaded batch {batch}"));
            }
            Action::UnloadBatch => match self.inspector.host_mut().unload_oldest_batch() {
                Some(batch) => self.set_status(format!("Unloaded batch {batch}")),
                None => self.set_status("Nothing left to unload".to_string()),
            },
            Action::ToggleHelp => {
                self.input_mode = match self.input_mode {
                    InputMode::Help => InputMode::Normal,
                    InputMode::Normal => InputMode::Help,
                };
            }
            Action::None => {}
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    fn navigate(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.selected_slot = self.selected_slot.saturating_sub(1),
            Direction::Right => {
                if self.selected_slot + 1 < self.slot_count() {
                    self.selected_slot += 1;
                }
            }
        }
    }

    // Pin and unpin change the slot count; rebuild without waiting for the
    // next frame so the selection never points past the last column.
    fn refresh_columns(&mut self) {
        self.frame = self.inspector.render_pass(false);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let last = self.slot_count() - 1;
        if self.selected_slot > last {
            self.selected_slot = last;
        }
    }

    fn set_status(&mut self, message: String) {
        tracing::debug!(%message, "status");
        self.status_message = Some((message, Instant::now()));
    }
}
