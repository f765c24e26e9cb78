pub mod commands;
pub mod core;
pub mod domain;
pub mod infra;
pub mod state;

use crate::commands::editor::{close, fix_timing, list_paragraphs, open_media};
use crate::commands::reference::check_reference;
use crate::commands::settings::load_settings;
use crate::core::codec::escape::encode_text;
use crate::domain::models::AppError;
use crate::infra::logging::init_tracing;
use crate::state::EditorState;
use std::path::Path;

pub fn run(media_path: &Path, fix: bool) -> Result<(), AppError> {
    init_tracing();

    let config_dir = media_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let mut state = EditorState::new(config_dir);
    if let Err(error) = load_settings(&mut state) {
        tracing::warn!("using default settings: {error}");
    }

    open_media(&mut state, media_path)?;
    if let Err(error) = check_reference(&mut state) {
        tracing::warn!("reference ignored: {error}");
    }
    if fix && fix_timing(&mut state).is_dirty() {
        tracing::info!("timing normalized");
    }

    for (index, paragraph) in list_paragraphs(&state).iter().enumerate() {
        println!("{:>4}  {}", index + 1, paragraph);
        if let Some(hint) = state.reference.hint_for(index, &paragraph.text) {
            println!("      ref: {}", encode_text(&hint));
        }
    }

    close(&mut state)?;
    Ok(())
}
