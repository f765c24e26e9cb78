use crate::core::codec::escape::decode_text;
use crate::core::codec::subrip::parse_subrip;
use crate::core::reference::matcher::{reference_hint, shape_mask, texts_agree};
use crate::domain::models::{AppError, Paragraph};
use crate::infra::storage::titler_store::{modified_at, read_text};
use chrono::{DateTime, Utc};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ReferenceTimeline {
    paragraphs: Vec<Paragraph>,
    modified_at: DateTime<Utc>,
}

impl Default for ReferenceTimeline {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            modified_at: DateTime::<Utc>::MIN_UTC,
        }
    }
}

impl ReferenceTimeline {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn is_loaded(&self) -> bool {
        self.modified_at != DateTime::<Utc>::MIN_UTC
    }

    pub fn clear(&mut self) {
        self.paragraphs.clear();
        self.modified_at = DateTime::<Utc>::MIN_UTC;
    }

    /// Re-parses `path` only when its modification time moved.
    ///
    /// Returns whether the reference was replaced or cleared. A parse failure
    /// keeps the previous reference and its timestamp, so the next call
    /// tries again.
    pub fn check_and_reload(&mut self, path: &Path) -> Result<bool, AppError> {
        let Some(file_time) = modified_at(path)? else {
            let had_reference = self.is_loaded() || !self.paragraphs.is_empty();
            self.clear();
            return Ok(had_reference);
        };
        if file_time == self.modified_at {
            return Ok(false);
        }
        let paragraphs = read_text(path).and_then(|raw| parse_subrip(&raw)).map_err(|error| {
            tracing::warn!("reference {} not loaded: {error}", path.display());
            error
        })?;
        tracing::info!(
            "reference {} loaded with {} paragraphs",
            path.display(),
            paragraphs.len()
        );
        self.paragraphs = paragraphs;
        self.modified_at = file_time;
        Ok(true)
    }

    pub fn text_for(&self, index: usize) -> Option<String> {
        self.paragraphs
            .get(index)
            .map(|paragraph| decode_text(&paragraph.text))
    }

    pub fn shape_mask_for(&self, index: usize, live: &str) -> Option<String> {
        let reference = self.text_for(index)?;
        if texts_agree(live, &reference) {
            return None;
        }
        Some(shape_mask(&reference))
    }

    pub fn hint_for(&self, index: usize, live: &str) -> Option<String> {
        self.text_for(index)
            .map(|reference| reference_hint(live, &reference))
    }
}

#[cfg(test)]
mod tests {
    use super::ReferenceTimeline;
    use chrono::{DateTime, Utc};
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    const FIRST: &str = "1\n00:00:01,000 --> 00:00:02,000\nHello, World!\n\n2\n00:00:02,000 --> 00:00:03,000\nSecond <i>line</i>\n";
    const SECOND: &str = "1\n00:00:01,000 --> 00:00:02,000\nReplaced\n";

    fn touch(path: &std::path::Path, content: &str, offset_secs: u64) {
        std::fs::write(path, content).unwrap();
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + offset_secs);
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(when)
            .unwrap();
    }

    #[test]
    fn starts_empty_with_minimum_timestamp() {
        let reference = ReferenceTimeline::default();
        assert!(!reference.is_loaded());
        assert_eq!(reference.modified_at(), DateTime::<Utc>::MIN_UTC);
        assert_eq!(reference.text_for(0), None);
    }

    #[test]
    fn reloads_only_when_modification_time_changes() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("clip.srt");
        touch(&path, FIRST, 0);

        let mut reference = ReferenceTimeline::default();
        assert!(reference.check_and_reload(&path).unwrap());
        assert_eq!(reference.paragraphs().len(), 2);
        assert!(!reference.check_and_reload(&path).unwrap());

        touch(&path, SECOND, 10);
        assert!(reference.check_and_reload(&path).unwrap());
        assert_eq!(reference.text_for(0).as_deref(), Some("Replaced\r\n"));
        assert_eq!(reference.text_for(1), None);
    }

    #[test]
    fn missing_file_clears_reference() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("clip.srt");
        touch(&path, FIRST, 0);
        let mut reference = ReferenceTimeline::default();
        reference.check_and_reload(&path).unwrap();

        std::fs::remove_file(&path).unwrap();
        assert!(reference.check_and_reload(&path).unwrap());
        assert!(reference.paragraphs().is_empty());
        assert!(!reference.is_loaded());
        assert!(!reference.check_and_reload(&path).unwrap());
    }

    #[test]
    fn broken_file_keeps_previous_reference() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("clip.srt");
        touch(&path, FIRST, 0);
        let mut reference = ReferenceTimeline::default();
        reference.check_and_reload(&path).unwrap();
        let loaded_at = reference.modified_at();

        touch(&path, "1\n00:00:01,000 --> 00:00:02,000\n\n", 20);
        let error = reference.check_and_reload(&path).unwrap_err();
        assert_eq!(error.code(), "IMPORT_FORMAT_ERROR");
        assert_eq!(reference.paragraphs().len(), 2);
        assert_eq!(reference.modified_at(), loaded_at);
    }

    #[test]
    fn mask_only_when_live_text_differs() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("clip.srt");
        touch(&path, FIRST, 0);
        let mut reference = ReferenceTimeline::default();
        reference.check_and_reload(&path).unwrap();

        assert_eq!(
            reference.shape_mask_for(0, "...").as_deref(),
            Some("Xxxxx, Xxxxx!\r\n")
        );
        assert_eq!(reference.shape_mask_for(0, "hello world"), None);
        assert_eq!(
            reference.hint_for(1, "second line").as_deref(),
            Some("Second <i>line</i>\r\n")
        );
        assert_eq!(reference.hint_for(2, "anything"), None);
    }
}
