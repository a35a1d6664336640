use crate::reports;
use clap::Args;
use serde::Deserialize;
use softkeys::config::Settings;
use softkeys::error::SkResult;
use softkeys::floating::ScreenSize;
use softkeys::layouts::LayoutSet;
use softkeys::session::{KeyboardSession, RecordingSink, SessionEvent};
use std::fs;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub settings: Settings,

    /// JSON file with the screen size and a list of timed events.
    #[arg(short = 's', long)]
    pub script: String,

    /// Print emitted actions as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default = "default_screen")]
    pub screen: (f32, f32),
    pub events: Vec<ScriptStep>,
}

fn default_screen() -> (f32, f32) {
    (1080.0, 1920.0)
}

#[derive(Debug, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since the start of the replay.
    pub at: u64,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Tick,
    Clipboard { text: String },
    Screen { width: f32, height: f32 },
    Drag { dx: f32, dy: f32 },
}

impl From<ScriptEvent> for SessionEvent {
    fn from(event: ScriptEvent) -> Self {
        match event {
            ScriptEvent::Down { x, y } => SessionEvent::PointerDown { x, y },
            ScriptEvent::Move { x, y } => SessionEvent::PointerMove { x, y },
            ScriptEvent::Up => SessionEvent::PointerUp,
            ScriptEvent::Tick => SessionEvent::Tick,
            ScriptEvent::Clipboard { text } => SessionEvent::ClipboardChanged(text),
            ScriptEvent::Screen { width, height } => SessionEvent::ScreenChanged { width, height },
            ScriptEvent::Drag { dx, dy } => SessionEvent::DragWindow { dx, dy },
        }
    }
}

pub fn run(args: ReplayArgs, settings: Settings, layouts: LayoutSet) -> SkResult<()> {
    let script: Script = serde_json::from_str(&fs::read_to_string(&args.script)?)?;
    info!("▶️  Replaying {} events from {}", script.events.len(), args.script);

    let screen = ScreenSize::new(script.screen.0, script.screen.1);
    let mut session = KeyboardSession::new(settings, layouts, screen)?;
    let mut sink = RecordingSink::default();

    let start = Instant::now();
    for step in script.events {
        let now = start + Duration::from_millis(step.at);
        session.handle(step.event.into(), now, &mut sink);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sink.emitted)?);
    } else {
        reports::print_emitted(&sink.emitted);
        reports::print_session_state(&session);
    }
    Ok(())
}
