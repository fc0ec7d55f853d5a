/// Splits text at the boundaries between whitespace, word-breaking
/// punctuation and everything else. Character references such as `&amp;` or
/// `&#8212;` always form a token of their own.
///
/// ## Example
///
/// ```not_rust
/// "Hi, there&nbsp;you!" -> ["Hi", ",", " ", "there", "&nbsp;", "you", "!"]
/// ```
pub fn split_text(text: &str) -> Vec<&str> {
    let mut result = Vec::new();

    let mut run_start = 0;
    let mut run_class: Option<CharClass> = None;

    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        let reference = if c == '&' {
            character_reference_length(&text[i..])
        } else {
            None
        };

        if let Some(length) = reference {
            if run_start < i {
                result.push(&text[run_start..i]);
            }
            result.push(&text[i..i + length]);

            // references are ASCII, so every remaining byte is one char
            chars.nth(length - 2);
            run_start = i + length;
            run_class = None;
            continue;
        }

        let class = CharClass::of(c);
        if run_class.is_some_and(|previous| previous != class) {
            result.push(&text[run_start..i]);
            run_start = i;
        }

        run_class = Some(class);
    }

    if run_start < text.len() {
        result.push(&text[run_start..]);
    }

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Punctuation,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if is_word_breaking_punctuation(c) {
            CharClass::Punctuation
        } else {
            CharClass::Other
        }
    }
}

fn is_word_breaking_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c, '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' | '¡' | '¿' | '«' | '»')
}

/// Length in bytes of the character reference at the start of `text`, if
/// there is one.
fn character_reference_length(text: &str) -> Option<usize> {
    let body = text.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];
    let name = name.strip_prefix('#').unwrap_or(name);

    let is_reference = !name.is_empty()
        && name.len() <= 32
        && name.chars().all(|c| c.is_ascii_alphanumeric());

    is_reference.then_some(end + 2)
}
