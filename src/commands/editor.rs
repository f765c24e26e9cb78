use crate::core::reference::service::ReferenceTimeline;
use crate::core::timeline::service::Timeline;
use crate::domain::models::{AppError, EditOutcome, Paragraph, ParagraphView};
use crate::domain::time::TimeValue;
use crate::infra::storage::titler_store::{
    load_paragraphs, native_path, reference_path, save_paragraphs,
};
use crate::state::EditorState;
use std::path::Path;

/// Switches the session to a new media file. Pending edits are flushed
/// before the new `.titler` file is read; a damaged file fails the open and
/// leaves the timeline as it was.
pub fn open_media(state: &mut EditorState, media_path: &Path) -> Result<ParagraphView, AppError> {
    save(state)?;
    let native = native_path(media_path, &state.settings);
    let paragraphs = load_paragraphs(&native)?;

    let loaded = paragraphs.is_some();
    state.timeline = Timeline::from_paragraphs(
        paragraphs.unwrap_or_default(),
        state.settings.timing_rules(),
    );
    state.media_path = Some(media_path.to_path_buf());
    state.native_path = Some(native);
    state.reference_path = Some(reference_path(media_path, &state.settings));
    state.reference = ReferenceTimeline::default();
    state.change_count = 0;
    tracing::info!(
        "opened {} with {} paragraphs (existing file: {loaded})",
        media_path.display(),
        state.timeline.len()
    );
    Ok(current_paragraph(state))
}

/// Flushes the current file, then edits `paragraphs` detached from any file.
pub fn open_timeline(
    state: &mut EditorState,
    paragraphs: Vec<Paragraph>,
) -> Result<ParagraphView, AppError> {
    save(state)?;
    state.timeline = Timeline::from_paragraphs(paragraphs, state.settings.timing_rules());
    state.media_path = None;
    state.native_path = None;
    state.reference_path = None;
    state.reference = ReferenceTimeline::default();
    state.change_count = 0;
    Ok(current_paragraph(state))
}

pub fn current_paragraph(state: &EditorState) -> ParagraphView {
    let timeline = &state.timeline;
    let paragraph = timeline.current();
    ParagraphView {
        index: timeline.index(),
        count: timeline.len(),
        start: paragraph.start,
        end: paragraph.end,
        text: paragraph.text.clone(),
        is_last: timeline.is_last(),
    }
}

pub fn list_paragraphs(state: &EditorState) -> &[Paragraph] {
    state.timeline.paragraphs()
}

pub fn set_start(
    state: &mut EditorState,
    index: usize,
    position: TimeValue,
) -> Result<EditOutcome, AppError> {
    let outcome = state.timeline.set_start(index, position.canonical())?;
    Ok(state.record(outcome))
}

pub fn set_end(
    state: &mut EditorState,
    index: usize,
    position: TimeValue,
) -> Result<EditOutcome, AppError> {
    let outcome = state.timeline.set_end(index, position.canonical())?;
    Ok(state.record(outcome))
}

pub fn nudge_start(
    state: &mut EditorState,
    index: usize,
    forward: bool,
) -> Result<EditOutcome, AppError> {
    let delta = signed_step(state, forward);
    let outcome = state.timeline.nudge_start(index, delta)?;
    Ok(state.record(outcome))
}

pub fn nudge_end(
    state: &mut EditorState,
    index: usize,
    forward: bool,
) -> Result<EditOutcome, AppError> {
    let delta = signed_step(state, forward);
    let outcome = state.timeline.nudge_end(index, delta)?;
    Ok(state.record(outcome))
}

pub fn fix_timing(state: &mut EditorState) -> EditOutcome {
    let outcome = state.timeline.fix_timing();
    state.record(outcome)
}

pub fn join(state: &mut EditorState, index: usize) -> Result<EditOutcome, AppError> {
    let outcome = state.timeline.join(index)?;
    Ok(state.record(outcome))
}

pub fn remove(state: &mut EditorState, index: usize) -> Result<EditOutcome, AppError> {
    let outcome = state.timeline.remove(index)?;
    Ok(state.record(outcome))
}

pub fn remove_and_collapse(state: &mut EditorState, index: usize) -> Result<EditOutcome, AppError> {
    let outcome = state.timeline.remove_and_collapse(index)?;
    Ok(state.record(outcome))
}

pub fn update_text(
    state: &mut EditorState,
    index: usize,
    text: &str,
) -> Result<EditOutcome, AppError> {
    let outcome = state.timeline.set_text(index, text)?;
    Ok(state.record(outcome))
}

pub fn advance(state: &mut EditorState) -> EditOutcome {
    let outcome = state.timeline.advance();
    state.record(outcome)
}

pub fn retreat(state: &mut EditorState) -> bool {
    state.timeline.retreat()
}

pub fn select(state: &mut EditorState, index: usize) -> Result<ParagraphView, AppError> {
    state.timeline.select(index)?;
    Ok(current_paragraph(state))
}

pub fn follow_position(state: &mut EditorState, position: TimeValue) -> Option<usize> {
    let index = state.timeline.locate(position.canonical())?;
    state.timeline.select(index).ok()?;
    Some(index)
}

/// Writes the timeline only when something changed since the last write.
/// On failure the change counter is kept so a later call retries.
pub fn save(state: &mut EditorState) -> Result<bool, AppError> {
    if state.change_count == 0 {
        return Ok(false);
    }
    let Some(path) = state.native_path.as_deref() else {
        return Ok(false);
    };
    save_paragraphs(path, state.timeline.paragraphs()).map_err(|error| {
        tracing::warn!("failed to save {}: {error}", path.display());
        error
    })?;
    tracing::info!(
        "saved {} paragraphs after {} changes",
        state.timeline.len(),
        state.change_count
    );
    state.change_count = 0;
    Ok(true)
}

pub fn close(state: &mut EditorState) -> Result<bool, AppError> {
    let saved = save(state)?;
    state.media_path = None;
    state.native_path = None;
    state.reference_path = None;
    state.reference = ReferenceTimeline::default();
    state.timeline = Timeline::new(state.settings.timing_rules());
    Ok(saved)
}

fn signed_step(state: &EditorState, forward: bool) -> i64 {
    let step = state.settings.nudge_ms();
    if forward {
        step
    } else {
        -step
    }
}
