use crate::{
    Token,
    consts::{CLOSING_BRACKET, OPENING_BRACKET},
};

/// Copies `tokens` with an opening bracket right before the first
/// word-bearing token and a closing one right after the last. Spans without
/// words are copied as they are.
pub fn bracket(tokens: &[Token]) -> Vec<Token> {
    let (Some(first), Some(last)) = (
        tokens.iter().position(Token::is_word_bearing),
        tokens.iter().rposition(Token::is_word_bearing),
    ) else {
        return tokens.to_vec();
    };

    let mut bracketed = Vec::with_capacity(tokens.len() + 2);
    bracketed.extend_from_slice(&tokens[..first]);
    bracketed.push(tokens[first].sibling_text(OPENING_BRACKET));
    bracketed.extend_from_slice(&tokens[first..=last]);
    bracketed.push(tokens[last].sibling_text(CLOSING_BRACKET));
    bracketed.extend_from_slice(&tokens[last + 1..]);

    bracketed
}

/// Replaces a span holding any word by a single placeholder token placed
/// where its first word was. Spans without words are kept.
pub fn omit(tokens: &[Token], placeholder: &str) -> Vec<Token> {
    tokens
        .iter()
        .find(|token| token.is_word_bearing())
        .map_or_else(|| tokens.to_vec(), |first| vec![first.sibling_text(placeholder)])
}
