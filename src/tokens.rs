mod lexer;
mod model;

pub(crate) use lexer::tokenize;
pub(crate) use model::{Token, TokenKind};
