use crate::domain::models::{AppError, EditorSettings};
use crate::state::EditorState;

pub fn load_settings(state: &mut EditorState) -> Result<EditorSettings, AppError> {
    let settings = load_or_default_settings(state)?;
    apply_settings(state, settings.clone());
    Ok(settings)
}

pub fn save_settings(state: &mut EditorState, settings: EditorSettings) -> Result<(), AppError> {
    settings.validate()?;
    write_settings(state, &settings)?;
    apply_settings(state, settings);
    Ok(())
}

fn apply_settings(state: &mut EditorState, settings: EditorSettings) {
    state.timeline.set_rules(settings.timing_rules());
    state.settings = settings;
}

fn load_or_default_settings(state: &EditorState) -> Result<EditorSettings, AppError> {
    if !state.settings_path.exists() {
        let settings = EditorSettings::default();
        write_settings(state, &settings)?;
        return Ok(settings);
    }
    let content = std::fs::read_to_string(&state.settings_path).map_err(|error| {
        AppError::Settings(format!("failed to read settings: {error}"))
    })?;
    let settings = serde_json::from_str::<EditorSettings>(&content)
        .map_err(|error| AppError::Settings(format!("failed to parse settings: {error}")))?;
    settings.validate()?;
    Ok(settings)
}

fn write_settings(state: &EditorState, settings: &EditorSettings) -> Result<(), AppError> {
    if let Some(parent) = state.settings_path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            AppError::Settings(format!("failed to create settings dir: {error}"))
        })?;
    }
    let raw = serde_json::to_string_pretty(settings).map_err(|error| {
        AppError::Settings(format!("failed to serialize settings: {error}"))
    })?;
    std::fs::write(&state.settings_path, raw)
        .map_err(|error| AppError::Settings(format!("failed to write settings: {error}")))
}

#[cfg(test)]
mod tests {
    use super::{load_settings, save_settings};
    use crate::domain::models::EditorSettings;
    use crate::state::EditorState;
    use tempfile::tempdir;

    #[test]
    fn first_load_writes_defaults() {
        let temp = tempdir().unwrap();
        let mut state = EditorState::new(temp.path().join("config"));
        let settings = load_settings(&mut state).unwrap();
        assert_eq!(settings, EditorSettings::default());
        let raw = std::fs::read_to_string(temp.path().join("config").join("settings.json")).unwrap();
        assert!(raw.contains("\"minParagraphSeconds\": 1"));
    }

    #[test]
    fn saved_settings_drive_timing_rules() {
        let temp = tempdir().unwrap();
        let mut state = EditorState::new(temp.path().to_path_buf());
        let settings = EditorSettings {
            min_paragraph_seconds: 2,
            max_paragraph_seconds: 6,
            ..EditorSettings::default()
        };
        save_settings(&mut state, settings.clone()).unwrap();
        assert_eq!(state.timeline.rules().min_duration_ms, 2_000);

        let mut reloaded = EditorState::new(temp.path().to_path_buf());
        assert_eq!(load_settings(&mut reloaded).unwrap(), settings);
        assert_eq!(reloaded.timeline.rules().default_duration_ms, 6_000);
    }

    #[test]
    fn out_of_range_settings_are_reported() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join("settings.json"),
            r#"{ "maxParagraphSeconds": 18446744073709552 }"#,
        )
        .unwrap();
        let mut state = EditorState::new(temp.path().to_path_buf());
        let error = load_settings(&mut state).unwrap_err();
        assert_eq!(error.code(), "SETTINGS_ERROR");
        assert_eq!(state.settings, EditorSettings::default());

        let zero = EditorSettings {
            min_paragraph_seconds: 0,
            ..EditorSettings::default()
        };
        assert!(save_settings(&mut state, zero).is_err());
        let raw = std::fs::read_to_string(temp.path().join("settings.json")).unwrap();
        assert!(raw.contains("18446744073709552"));
    }

    #[test]
    fn corrupt_settings_are_reported() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("settings.json"), "{ nope").unwrap();
        let mut state = EditorState::new(temp.path().to_path_buf());
        let error = load_settings(&mut state).unwrap_err();
        assert_eq!(error.code(), "SETTINGS_ERROR");
    }
}
