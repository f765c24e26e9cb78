use crate::domain::models::AppError;
use crate::state::EditorState;
use std::path::Path;

pub fn load_reference(state: &mut EditorState, path: &Path) -> Result<bool, AppError> {
    if state.reference_path.as_deref() != Some(path) {
        state.reference_path = Some(path.to_path_buf());
        state.reference.clear();
    }
    check_reference(state)
}

pub fn check_reference(state: &mut EditorState) -> Result<bool, AppError> {
    let Some(path) = state.reference_path.as_deref() else {
        return Ok(false);
    };
    state.reference.check_and_reload(path)
}

pub fn reference_text_for(state: &EditorState, index: usize) -> Option<String> {
    state.reference.text_for(index)
}

pub fn shape_mask_for(state: &EditorState, index: usize) -> Result<Option<String>, AppError> {
    let paragraph = state.timeline.get(index).ok_or(AppError::Index {
        index,
        count: state.timeline.len(),
    })?;
    Ok(state.reference.shape_mask_for(index, &paragraph.text))
}

pub fn reference_hint(state: &EditorState) -> Option<String> {
    let index = state.timeline.index();
    state
        .reference
        .hint_for(index, &state.timeline.current().text)
}
