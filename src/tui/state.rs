use crate::model::PlacedEvent;
use crate::pipeline::Stage;
use crate::render::DayWindow;

pub struct AppState {
    pub events: Vec<PlacedEvent>,
    pub window: DayWindow,
    pub source: String,
    pub stage: Stage,
    pub message: String,
    pub recomputes: u64,
}

impl AppState {
    pub fn new(window: DayWindow, source: String) -> Self {
        Self {
            events: vec![],
            window,
            source,
            stage: Stage::Idle,
            message: "Loading...".to_string(),
            recomputes: 0,
        }
    }

    pub fn apply_events(&mut self, events: Vec<PlacedEvent>) {
        self.events = events;
        self.message = format!("Events: {}", self.events.len());
    }

    pub fn apply_status(&mut self, stage: Stage, last_error: Option<String>) {
        self.stage = stage;
        if let Some(err) = last_error {
            self.message = format!("Error: {}", err);
        }
    }

    pub fn stage_label(&self) -> &'static str {
        match self.stage {
            Stage::Idle => "idle",
            Stage::Loading => "loading",
            Stage::Processing => "processing",
            Stage::Rendered => "rendered",
        }
    }
}
