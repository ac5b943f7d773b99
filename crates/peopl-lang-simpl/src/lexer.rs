use logos::Logos;
use peopl_syntax::{Span, Spanned};

pub(crate) struct Lexed {
    pub tokens: Vec<Spanned<Token>>,
    pub comments: Vec<Span>,
}

/// Split `source` into tokens, setting comments aside.
pub(crate) fn lex(source: &str) -> Lexed {
    let mut tokens = Vec::new();
    let mut comments = Vec::new();
    for (token, range) in Token::lexer(source).spanned() {
        let span = Span::from(range);
        if token == Token::Comment {
            comments.push(span);
        } else {
            tokens.push(Spanned { token, span });
        }
    }
    Lexed { tokens, comments }
}

/// Extends an integer into a float when it's followed by `.` and a digit.
fn number(lex: &mut logos::Lexer<Token>) -> bool {
    let rest = lex.remainder().as_bytes();
    if rest.len() >= 2 && rest[0] == b'.' && rest[1].is_ascii_digit() {
        let fraction = rest[1..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        lex.bump(1 + fraction);
    }
    true
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    #[regex(r"\*\* [^\n]*")]
    Comment,

    #[token("type")]
    TypeKeyword,
    #[token("contract")]
    ContractKeyword,
    #[token("func")]
    FuncKeyword,
    #[token("true")]
    TrueKeyword,
    #[token("false")]
    FalseKeyword,
    #[token("not")]
    NotKeyword,
    #[token("and")]
    AndKeyword,
    #[token("or")]
    OrKeyword,

    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    TypeName,
    #[regex(r"[a-z][a-zA-Z0-9_]*")]
    FieldName,
    #[regex(r"[0-9]+", number)]
    Number,
    #[regex(r#""[^"]*""#)]
    String,

    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("=")]
    Equals,
    #[token("!=")]
    NotEquals,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEquals,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEquals,

    // A trailing backslash joins lines
    #[regex(r"\\\r?\n", logos::skip)]
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    #[error]
    Error,
}

#[cfg(test)]
mod tests {
    use super::{lex, Token};

    fn tokens(source: &str) -> Vec<Token> {
        lex(source)
            .tokens
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn it_lexes_declarations() {
        assert_eq!(
            tokens("func Point norm Float x.\n"),
            [
                Token::FuncKeyword,
                Token::TypeName,
                Token::FieldName,
                Token::TypeName,
                Token::FieldName,
                Token::Dot,
            ]
        );
    }

    #[test]
    fn it_lexes_numbers() {
        let lexed = lex("1 23.5 4.\n");
        let spans = lexed
            .tokens
            .iter()
            .map(|spanned| (spanned.token, spanned.span.start_offset, spanned.span.end_offset))
            .collect::<Vec<_>>();
        assert_eq!(
            spans,
            [
                (Token::Number, 0, 1),
                (Token::Number, 2, 6),
                (Token::Number, 7, 8),
                (Token::Dot, 8, 9),
            ]
        );
    }

    #[test]
    fn it_sets_comments_aside() {
        let lexed = lex("** a comment\ntypes ** another\n");
        assert_eq!(lexed.comments.len(), 2);
        assert_eq!(lexed.tokens.len(), 1);
        assert_eq!(lexed.tokens[0].token, Token::FieldName);
    }

    #[test]
    fn it_lexes_operators() {
        assert_eq!(
            tokens("a >= b != c and not d"),
            [
                Token::FieldName,
                Token::GreaterEquals,
                Token::FieldName,
                Token::NotEquals,
                Token::FieldName,
                Token::AndKeyword,
                Token::NotKeyword,
                Token::FieldName,
            ]
        );
    }

    #[test]
    fn it_errors_as_expected() {
        assert_eq!(tokens("a ! b"), [Token::FieldName, Token::Error, Token::FieldName]);
    }
}
