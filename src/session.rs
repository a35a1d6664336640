use crate::clipboard::ClipboardRing;
use crate::config::Settings;
use crate::error::{SkResult, SoftKeysError};
use crate::floating::{FloatingWindow, ScreenSize};
use crate::geometry::{resolve, LayoutDef, ResolvedLayout};
use crate::keycodes::{CustomCommand, KeyCode, Modifier};
use crate::layouts::{KnownLayout, LayoutSet};
use crate::modifiers::{display_labels, ModifierMask, ModifierState};
use crate::touch::{GestureAction, PressKind, TouchDispatcher};
use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;
use tracing::{debug, info, warn};

/// What a key press turns into on the way out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    pub key_code: KeyCode,
    pub key_code_long_press: Option<KeyCode>,
    pub label: String,
    pub modifier_mask: ModifierMask,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Emitted {
    Key(KeyEvent),
    Text(String),
    Command(CustomCommand),
}

/// The platform side: injects key events and commits text.
pub trait InputSink {
    fn send_key(&mut self, event: &KeyEvent);
    fn commit_text(&mut self, text: &str);
    /// Called after the session handled a custom command itself, so the
    /// platform can follow up (create or destroy a window, start a drag).
    fn command(&mut self, _command: CustomCommand) {}
}

/// Keeps everything it receives, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub emitted: Vec<Emitted>,
}

impl InputSink for RecordingSink {
    fn send_key(&mut self, event: &KeyEvent) {
        self.emitted.push(Emitted::Key(event.clone()));
    }

    fn commit_text(&mut self, text: &str) {
        self.emitted.push(Emitted::Text(text.to_string()));
    }

    fn command(&mut self, command: CustomCommand) {
        self.emitted.push(Emitted::Command(command));
    }
}

/// Everything that can happen to a session. All of it is handled on one
/// loop, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Tick,
    ClipboardChanged(String),
    ScreenChanged { width: f32, height: f32 },
    DragWindow { dx: f32, dy: f32 },
    ReloadLayout(LayoutDef),
}

/// Channel for producers outside the loop (system clipboard listener,
/// rotation callbacks). The loop drains it with [`KeyboardSession::pump`].
pub fn event_channel() -> (Sender<SessionEvent>, Receiver<SessionEvent>) {
    mpsc::channel()
}

/// State of one input session. Built when input starts, dropped on teardown.
#[derive(Debug)]
pub struct KeyboardSession {
    settings: Settings,
    layouts: LayoutSet,
    layout: ResolvedLayout,
    generation: u64,
    modifiers: ModifierState,
    clipboard: ClipboardRing,
    dispatcher: TouchDispatcher,
    floating: Option<FloatingWindow>,
    screen: ScreenSize,
}

impl KeyboardSession {
    /// Resolves the active layout of `layouts`, substituting the fallback
    /// layout if it is structurally broken.
    pub fn new(settings: Settings, layouts: LayoutSet, screen: ScreenSize) -> SkResult<Self> {
        settings.validate()?;
        let layout = match resolve(layouts.active(), &settings.layout) {
            Ok(layout) => layout,
            Err(e) if e.is_structural() => {
                warn!(
                    "Layout '{}' rejected ({}); using fallback '{}'",
                    layouts.active_name(),
                    e,
                    KnownLayout::fallback()
                );
                resolve(&KnownLayout::fallback().definition(), &settings.layout)?
            }
            Err(e) => return Err(e),
        };

        let mut session = Self {
            dispatcher: TouchDispatcher::new(settings.timing.clone()),
            settings,
            layouts,
            layout: ResolvedLayout::default(),
            generation: 0,
            modifiers: ModifierState::new(),
            clipboard: ClipboardRing::new(),
            floating: None,
            screen,
        };
        session.install(layout);
        info!(
            "Session started with layout '{}' on {}x{}",
            session.layouts.active_name(),
            screen.width,
            screen.height
        );
        Ok(session)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &ResolvedLayout {
        &self.layout
    }

    pub fn layouts(&self) -> &LayoutSet {
        &self.layouts
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn clipboard(&self) -> &ClipboardRing {
        &self.clipboard
    }

    pub fn floating(&self) -> Option<&FloatingWindow> {
        self.floating.as_ref()
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn dispatcher(&self) -> &TouchDispatcher {
        &self.dispatcher
    }

    /// When the loop must wake up next to fire a timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dispatcher.next_deadline()
    }

    /// Labels for drawing key `id` under the current modifier state.
    pub fn display_labels(&self, id: usize) -> Option<(String, String)> {
        self.layout
            .keys
            .get(id)
            .map(|k| display_labels(k, &self.modifiers))
    }

    /// Boundary between two input sessions: modifiers reset, the active
    /// layout is rebuilt.
    pub fn begin_input(&mut self) {
        self.modifiers.reset();
        self.dispatcher.cancel();
        let def = self.layouts.active().clone();
        self.reload_or_fallback(&def);
    }

    /// Replaces the layout. On error the previous layout stays active.
    pub fn reload(&mut self, def: &LayoutDef) -> SkResult<()> {
        let layout = resolve(def, &self.settings.layout)?;
        self.install(layout);
        Ok(())
    }

    /// Like [`reload`](Self::reload), but a structurally broken layout is
    /// replaced by the fallback. The rejected layout's error is returned.
    pub fn reload_or_fallback(&mut self, def: &LayoutDef) -> Option<SoftKeysError> {
        match self.reload(def) {
            Ok(()) => None,
            Err(e) => {
                warn!("Layout rejected ({}); using fallback '{}'", e, KnownLayout::fallback());
                match resolve(&KnownLayout::fallback().definition(), &self.settings.layout) {
                    Ok(layout) => self.install(layout),
                    Err(fallback_err) => warn!("Fallback layout failed: {}", fallback_err),
                }
                Some(e)
            }
        }
    }

    /// Activates layout `index` of the set.
    pub fn select_layout(&mut self, index: usize) -> bool {
        if !self.layouts.set_active(index) {
            return false;
        }
        let def = self.layouts.active().clone();
        self.reload_or_fallback(&def);
        info!("Switched to layout '{}'", self.layouts.active_name());
        true
    }

    /// Swaps in a new layout and its clipboard slots in one step.
    fn install(&mut self, mut layout: ResolvedLayout) {
        for warning in &layout.warnings {
            warn!("Layout warning: {}", warning);
        }

        self.dispatcher.cancel();
        let mut clipboard = self.clipboard.clone();
        let min_slots = self
            .settings
            .clipboard
            .capacity
            .max(self.layouts.max_clipboard_keys());
        clipboard.rebind(&layout.clipboard_key_ids(), min_slots);
        layout.sync_clipboard_labels(&clipboard);

        info!(
            "Layout resolved: {} rows, {} keys, height {}",
            layout.rows.len(),
            layout.keys.len(),
            layout.total_height
        );
        self.layout = layout;
        self.clipboard = clipboard;
        self.generation += 1;

        if let Some(window) = self.floating.as_mut() {
            window.set_aspect_ratio(self.layout.aspect_ratio(), self.screen);
        }
    }

    /// Drains every queued event, in order.
    pub fn pump(
        &mut self,
        rx: &Receiver<SessionEvent>,
        now: Instant,
        sink: &mut dyn InputSink,
    ) -> usize {
        let mut handled = 0;
        while let Ok(event) = rx.try_recv() {
            self.handle(event, now, sink);
            handled += 1;
        }
        handled
    }

    pub fn handle(&mut self, event: SessionEvent, now: Instant, sink: &mut dyn InputSink) {
        // Timers that came due before this event fire first.
        let due = self.dispatcher.tick(now);
        self.apply_all(due, sink);

        match event {
            SessionEvent::PointerDown { x, y } => {
                self.dispatcher.press(&self.layout, x, y, now);
            }
            SessionEvent::PointerMove { x, y } => self.dispatcher.move_to(x, y),
            SessionEvent::PointerUp => {
                let actions = self.dispatcher.release(now);
                self.apply_all(actions, sink);
            }
            SessionEvent::Tick => {}
            SessionEvent::ClipboardChanged(text) => {
                if self.clipboard.add_entry(&text) {
                    self.layout.sync_clipboard_labels(&self.clipboard);
                }
            }
            SessionEvent::ScreenChanged { width, height } => {
                self.screen = ScreenSize::new(width, height);
                if let Some(window) = self.floating.as_mut() {
                    window.constrain(self.screen);
                }
            }
            SessionEvent::DragWindow { dx, dy } => {
                if let Some(window) = self.floating.as_mut() {
                    window.move_by(dx, dy, self.screen);
                }
            }
            SessionEvent::ReloadLayout(def) => {
                self.reload_or_fallback(&def);
            }
        }
    }

    fn apply_all(&mut self, actions: Vec<GestureAction>, sink: &mut dyn InputSink) {
        let generation = self.generation;
        for action in actions {
            // Ids of the remaining actions belong to a layout that is gone.
            if self.generation != generation {
                break;
            }
            self.apply(action, sink);
        }
    }

    fn apply(&mut self, action: GestureAction, sink: &mut dyn InputSink) {
        let Some(key) = self.layout.keys.get(action.key_id).cloned() else {
            return;
        };
        let (code, label, preserve) = match action.kind {
            PressKind::Primary => (key.code, key.label, key.preserve_label_case),
            PressKind::LongPress => (
                key.long_press_code,
                key.long_press_label,
                key.preserve_small_label_case,
            ),
        };

        let Some(code) = code else {
            let text = self.modifiers.commit_text(&label, preserve);
            if !text.is_empty() {
                debug!("Commit text {:?}", text);
                sink.commit_text(&text);
            }
            return;
        };

        if let Some(command) = CustomCommand::from_code(code) {
            self.run_command(command, key.id, sink);
        } else if let Some(modifier) = Modifier::from_code(code) {
            self.modifiers.toggle(modifier);
            debug!("{} toggled -> {}", modifier, self.modifiers.is_active(modifier));
        } else {
            let event = KeyEvent {
                key_code: code,
                key_code_long_press: match action.kind {
                    PressKind::Primary => key.long_press_code,
                    PressKind::LongPress => None,
                },
                label,
                modifier_mask: self.modifiers.consume(),
            };
            debug!("Key event {} mask {:?}", event.key_code, event.modifier_mask);
            sink.send_key(&event);
        }
    }

    fn run_command(&mut self, command: CustomCommand, key_id: usize, sink: &mut dyn InputSink) {
        debug!("Command {}", command);
        match command {
            CustomCommand::OpenFloating => {
                if self.floating.is_none() {
                    self.floating = Some(FloatingWindow::open(
                        self.settings.floating.clone(),
                        self.screen,
                        self.layout.aspect_ratio(),
                    ));
                }
            }
            CustomCommand::CloseFloating => self.floating = None,
            CustomCommand::GrowFloating | CustomCommand::ShrinkFloating => {
                let grow = command == CustomCommand::GrowFloating;
                if let Some(window) = self.floating.as_mut() {
                    window.resize_step(grow, self.screen);
                }
            }
            // The platform drives the drag through `DragWindow` events.
            CustomCommand::MoveFloating => {}
            CustomCommand::CycleLayout => {
                let next = self.layouts.next_index();
                self.select_layout(next);
            }
            CustomCommand::OpenClipboard => {
                if let Some(index) = self.layouts.clipboard_index() {
                    self.select_layout(index);
                }
            }
            CustomCommand::EraseClipboard => {
                self.clipboard.clear();
                self.layout.sync_clipboard_labels(&self.clipboard);
            }
            CustomCommand::ClipboardEntry => {
                if let Some(text) = self.clipboard.get_entry(key_id) {
                    sink.commit_text(text);
                }
            }
        }
        sink.command(command);
    }
}
