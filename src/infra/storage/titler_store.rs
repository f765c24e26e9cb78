use crate::core::codec::native::{decode_paragraphs, encode_paragraphs};
use crate::domain::models::{AppError, EditorSettings, Paragraph};
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub fn native_path(media_path: &Path, settings: &EditorSettings) -> PathBuf {
    media_path.with_extension(&settings.native_extension)
}

pub fn reference_path(media_path: &Path, settings: &EditorSettings) -> PathBuf {
    media_path.with_extension(&settings.reference_extension)
}

pub fn load_paragraphs(path: &Path) -> Result<Option<Vec<Paragraph>>, AppError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    let paragraphs = decode_paragraphs(&raw)?;
    tracing::debug!(
        "loaded {} paragraphs from {}",
        paragraphs.len(),
        path.display()
    );
    Ok(Some(paragraphs))
}

pub fn save_paragraphs(path: &Path, paragraphs: &[Paragraph]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode_paragraphs(paragraphs))?;
    tracing::debug!("saved {} paragraphs to {}", paragraphs.len(), path.display());
    Ok(())
}

pub fn read_text(path: &Path) -> Result<String, AppError> {
    Ok(std::fs::read_to_string(path)?)
}

pub fn modified_at(path: &Path) -> Result<Option<DateTime<Utc>>, AppError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    if !metadata.is_file() {
        return Ok(None);
    }
    Ok(Some(DateTime::<Utc>::from(metadata.modified()?)))
}
