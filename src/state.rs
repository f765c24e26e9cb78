use crate::core::reference::service::ReferenceTimeline;
use crate::core::timeline::service::Timeline;
use crate::domain::models::{EditOutcome, EditorSettings};
use std::path::PathBuf;

#[derive(Debug)]
pub struct EditorState {
    pub settings_path: PathBuf,
    pub settings: EditorSettings,
    pub media_path: Option<PathBuf>,
    pub native_path: Option<PathBuf>,
    pub reference_path: Option<PathBuf>,
    pub timeline: Timeline,
    pub reference: ReferenceTimeline,
    pub change_count: u32,
}

impl EditorState {
    pub fn new(config_dir: PathBuf) -> Self {
        Self::with_settings(config_dir, EditorSettings::default())
    }

    pub fn with_settings(config_dir: PathBuf, settings: EditorSettings) -> Self {
        let settings_path = config_dir.join("settings.json");
        let timeline = Timeline::new(settings.timing_rules());
        Self {
            settings_path,
            settings,
            media_path: None,
            native_path: None,
            reference_path: None,
            timeline,
            reference: ReferenceTimeline::default(),
            change_count: 0,
        }
    }

    pub fn record(&mut self, outcome: EditOutcome) -> EditOutcome {
        if outcome.is_dirty() {
            self.change_count = self.change_count.saturating_add(1);
        }
        outcome
    }

    pub fn is_dirty(&self) -> bool {
        self.change_count > 0
    }
}
