use tracing::debug;

use crate::tokens::model::{Token, TokenKind};

/// Split and classify the raw command line arguments.
///
/// Every argument containing `=` splits at the first occurrence; the left half keeps its
/// specifier and classifies as usual, the right half (possibly empty) is always a value.
/// Short option clusters `-abc` explode into one token per character, in place.
/// A `-` followed by a digit is a negative number, not a short option.
pub(crate) fn tokenize<'t>(arguments: &[&'t str]) -> Vec<Token<'t>> {
    let mut tokens = Vec::default();
    let mut fed = 0;

    for argument in arguments {
        let (head, value) = match argument.split_once('=') {
            Some((head, value)) => (head, Some(value)),
            None => (*argument, None),
        };

        classify(head, fed, &mut tokens);

        if let Some(value) = value {
            // The 1 accounts for the '=' delimiter.
            tokens.push(Token::new(TokenKind::Value, value, fed + head.len() + 1));
        }

        fed += argument.len();
    }

    debug!(
        "tokenized {} arguments into {} tokens",
        arguments.len(),
        tokens.len()
    );
    tokens
}

fn classify<'t>(head: &'t str, offset: usize, tokens: &mut Vec<Token<'t>>) {
    if let Some(name) = head.strip_prefix("--") {
        tokens.push(Token::new(TokenKind::LongOption, name, offset));
    } else if let Some(cluster) = head.strip_prefix('-') {
        match cluster.chars().next() {
            Some(first) if !first.is_ascii_digit() => {
                for (position, single) in cluster.char_indices() {
                    let text = &cluster[position..position + single.len_utf8()];
                    // The 1 accounts for the '-' specifier.
                    tokens.push(Token::new(TokenKind::ShortOption, text, offset + 1 + position));
                }
            }
            // A lone '-', or a negative number such as '-5'.
            _ => tokens.push(Token::new(TokenKind::Value, head, offset)),
        }
    } else {
        tokens.push(Token::new(TokenKind::Value, head, offset));
    }
}
