const TOKENS: [(&str, &str); 4] = [
    ("\r", "{CR}"),
    ("\n", "{LF}"),
    ("\t", "{TAB}"),
    ("|", "{PIPE}"),
];

pub fn encode_text(text: &str) -> String {
    TOKENS
        .iter()
        .fold(text.to_string(), |acc, (raw, token)| acc.replace(raw, token))
}

pub fn decode_text(text: &str) -> String {
    TOKENS
        .iter()
        .fold(text.to_string(), |acc, (raw, token)| acc.replace(token, raw))
}

#[cfg(test)]
mod tests {
    use super::{decode_text, encode_text};

    #[test]
    fn encode_replaces_control_characters() {
        assert_eq!(
            encode_text("one\r\ntwo\tthree|four"),
            "one{CR}{LF}two{TAB}three{PIPE}four"
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let samples = [
            "",
            "plain",
            "line one\r\nline two\r\n",
            "a|b||c",
            "\t<i>tabbed</i>\n",
            "{braces} but no tokens",
        ];
        for sample in samples {
            assert_eq!(decode_text(&encode_text(sample)), sample);
        }
    }

    #[test]
    fn literal_tokens_are_not_preserved() {
        assert_eq!(decode_text(&encode_text("{LF}")), "\n");
    }
}
