use crate::core::codec::escape::{decode_text, encode_text};
use crate::domain::models::{AppError, Paragraph};
use crate::domain::time::TimeValue;

const FIELD_SEPARATOR: char = '|';

pub fn encode_paragraph(paragraph: &Paragraph) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        paragraph.start,
        paragraph.end,
        encode_text(&paragraph.text)
    )
}

pub fn encode_paragraphs(paragraphs: &[Paragraph]) -> String {
    let mut out = String::new();
    for paragraph in paragraphs {
        out.push_str(&encode_paragraph(paragraph));
        out.push('\n');
    }
    out
}

pub fn decode_paragraphs(content: &str) -> Result<Vec<Paragraph>, AppError> {
    let mut paragraphs = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        paragraphs.push(decode_record(line).map_err(|error| {
            AppError::Format(format!("line {}: {error}", index + 1))
        })?);
    }
    Ok(paragraphs)
}

fn decode_record(line: &str) -> Result<Paragraph, AppError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [start, end, text] = fields.as_slice() else {
        return Err(AppError::Format(format!(
            "expected 3 fields, found {}",
            fields.len()
        )));
    };
    Ok(Paragraph::new(
        TimeValue::parse(start)?,
        TimeValue::parse(end)?,
        decode_text(text),
    ))
}

#[cfg(test)]
mod tests {
    use super::{decode_paragraphs, encode_paragraphs};
    use crate::domain::models::Paragraph;
    use crate::domain::time::TimeValue;

    fn secs(tenths: u64) -> TimeValue {
        TimeValue::from_millis(tenths * 100)
    }

    #[test]
    fn encode_writes_pipe_records() {
        let paragraphs = vec![
            Paragraph::new(secs(0), secs(25), "Hello"),
            Paragraph::new(secs(25), secs(61), "two\r\nlines | here"),
        ];
        assert_eq!(
            encode_paragraphs(&paragraphs),
            "00:00:00.0|00:00:02.5|Hello\n00:00:02.5|00:00:06.1|two{CR}{LF}lines {PIPE} here\n"
        );
    }

    #[test]
    fn decode_restores_saved_timeline() {
        let paragraphs = vec![
            Paragraph::new(secs(0), secs(40), "..."),
            Paragraph::new(secs(40), secs(80), "\tindented|piped\n"),
            Paragraph::new(secs(36_000), secs(36_012), ""),
        ];
        let decoded = decode_paragraphs(&encode_paragraphs(&paragraphs)).unwrap();
        assert_eq!(decoded, paragraphs);
    }

    #[test]
    fn decode_accepts_crlf_and_skips_blank_lines() {
        let decoded =
            decode_paragraphs("00:00:01.0|00:00:02.0|a\r\n\r\n00:00:02.0|00:00:03.0|b\r\n").unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].text, "b");
    }

    #[test]
    fn decode_rejects_missing_fields() {
        let error = decode_paragraphs("00:00:01.0|00:00:02.0|ok\n00:00:02.0|oops\n").unwrap_err();
        assert_eq!(error.code(), "FORMAT_ERROR");
        assert!(error.to_string().starts_with("line 2:"));
    }

    #[test]
    fn decode_rejects_bad_timestamp() {
        let error = decode_paragraphs("00:00:01.0|soon|text\n").unwrap_err();
        assert_eq!(error.code(), "FORMAT_ERROR");
    }

    #[test]
    fn empty_file_yields_no_paragraphs() {
        assert!(decode_paragraphs("").unwrap().is_empty());
    }
}
