use crate::core::codec::escape::encode_text;
use crate::domain::models::{AppError, Paragraph};
use crate::domain::time::TimeValue;
use once_cell::sync::Lazy;
use regex::Regex;

static INDEX_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("index pattern should compile"));
static TIMING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9:,\s\->]+").expect("timing pattern should compile"));

pub fn parse_subrip(content: &str) -> Result<Vec<Paragraph>, AppError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.lines().collect();
    let mut paragraphs = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }
        if !INDEX_LINE.is_match(lines[i]) {
            return Err(import_error(i, lines[i]));
        }
        let index_line = i;
        i += 1;

        let Some(timing) = lines.get(i) else {
            return Err(import_error(index_line, lines[index_line]));
        };
        if !TIMING_LINE.is_match(timing) {
            return Err(import_error(i, timing));
        }
        let (start, end) = parse_timing(timing).ok_or_else(|| import_error(i, timing))?;
        let timing_line = i;
        i += 1;

        let mut text = String::new();
        while let Some(line) = lines.get(i) {
            i += 1;
            if line.trim().is_empty() {
                break;
            }
            text.push_str(line);
            text.push_str("\r\n");
        }
        if text.trim().is_empty() {
            return Err(import_error(timing_line, lines[timing_line]));
        }

        paragraphs.push(Paragraph::new(start, end, encode_text(&text)));
    }

    Ok(paragraphs)
}

fn parse_timing(line: &str) -> Option<(TimeValue, TimeValue)> {
    let mut parts = line.split('>');
    let start = parts.next()?.replace('-', " ").replace(',', ".");
    let end = parts.next()?.replace(',', ".");
    let start = TimeValue::parse(start.trim()).ok()?;
    let end = TimeValue::parse(end.trim()).ok()?;
    Some((start, end))
}

fn import_error(index: usize, line: &str) -> AppError {
    AppError::ImportFormat {
        line: index + 1,
        content: line.to_string(),
    }
}
