use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\w>").expect("opening tag pattern should compile"));
static CLOSING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</\w>").expect("closing tag pattern should compile"));
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w]").expect("non-word pattern should compile"));
static WORD_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w").expect("word pattern should compile"));

pub fn alphas_only(text: &str) -> String {
    // Closing tags go second so `<<i>/b>` collapses fully.
    let text = OPENING_TAG.replace_all(text, "");
    let text = CLOSING_TAG.replace_all(&text, "");
    let text = NON_WORD.replace_all(&text, "");
    text.to_uppercase()
}

pub fn texts_agree(live: &str, reference: &str) -> bool {
    alphas_only(live) == alphas_only(reference)
}

pub fn shape_mask(text: &str) -> String {
    WORD_CHAR
        .replace_all(text, |caps: &Captures| {
            let value = &caps[0];
            if value.to_uppercase() == value {
                "X"
            } else {
                "x"
            }
        })
        .into_owned()
}

pub fn reference_hint(live: &str, reference: &str) -> String {
    if texts_agree(live, reference) {
        reference.to_string()
    } else {
        shape_mask(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::{alphas_only, reference_hint, shape_mask, texts_agree};

    #[test]
    fn alphas_only_strips_tags_and_punctuation() {
        assert_eq!(alphas_only("<i>Hello,</i> world!\r\n"), "HELLOWORLD");
        assert_eq!(alphas_only("It's 9 o'clock."), "ITS9OCLOCK");
    }

    #[test]
    fn tags_exposed_by_removing_an_opening_tag_are_stripped() {
        assert_eq!(alphas_only("<<i>/b>"), "");
        assert_eq!(alphas_only("a<<b>/i>b"), "AB");
    }

    #[test]
    fn long_tags_are_not_treated_as_markup() {
        assert_eq!(alphas_only("<font>a</font>"), "FONTAFONT");
    }

    #[test]
    fn agreement_ignores_case_and_punctuation() {
        assert!(texts_agree("hello world", "<b>Hello, World!</b>"));
        assert!(!texts_agree("hello word", "Hello, World!"));
    }

    #[test]
    fn shape_mask_keeps_structure() {
        assert_eq!(shape_mask("Hello, World 42!"), "Xxxxx, Xxxxx XX!");
        assert_eq!(shape_mask("ça va\r\n"), "xx xx\r\n");
    }

    #[test]
    fn hint_reveals_reference_only_on_match() {
        assert_eq!(reference_hint("hi there", "Hi there."), "Hi there.");
        assert_eq!(reference_hint("...", "Hi there."), "Xx xxxxx.");
    }
}
