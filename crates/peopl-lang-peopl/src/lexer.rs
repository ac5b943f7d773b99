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
        match token {
            Token::Comment => comments.push(span),
            _ => tokens.push(Spanned { token, span }),
        }
    }
    Lexed { tokens, comments }
}

/// `1.5` is a float, but `1..` and `1.foo` aren't.
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

    #[token("namespace")]
    NamespaceKeyword,
    #[token("type")]
    TypeKeyword,
    #[token("func")]
    FuncKeyword,
    #[token("Nothing")]
    NothingKeyword,
    #[token("Never")]
    NeverKeyword,
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

    #[token("_")]
    Underscore,
    #[regex(r"_*[a-z][a-zA-Z0-9_]*")]
    ArgumentName,
    #[regex(r"_*[A-Z][a-zA-Z0-9_]*")]
    TypeName,
    #[regex(r"[0-9]+", number)]
    Number,
    #[regex(r#""[^"]*""#)]
    String,

    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
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
    #[token("?")]
    Question,
    #[token(";")]
    Semicolon,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,

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
    fn it_lexes_statements() {
        assert_eq!(
            tokens("func (Int) double() => Int in * 2.."),
            [
                Token::FuncKeyword,
                Token::OpenParen,
                Token::TypeName,
                Token::CloseParen,
                Token::ArgumentName,
                Token::OpenParen,
                Token::CloseParen,
                Token::FatArrow,
                Token::TypeName,
                Token::ArgumentName,
                Token::Star,
                Token::Number,
                Token::DotDot,
            ]
        );
    }

    #[test]
    fn it_lexes_names() {
        assert_eq!(
            tokens("_ _private __Hidden Nothing Nothingness Never"),
            [
                Token::Underscore,
                Token::ArgumentName,
                Token::TypeName,
                Token::NothingKeyword,
                Token::TypeName,
                Token::NeverKeyword,
            ]
        );
    }

    #[test]
    fn it_lexes_numbers() {
        let lexed = lex("1.5 2.. 3.x");
        let spans = lexed
            .tokens
            .iter()
            .map(|spanned| (spanned.token, spanned.span.start_offset, spanned.span.end_offset))
            .collect::<Vec<_>>();
        assert_eq!(
            spans,
            [
                (Token::Number, 0, 3),
                (Token::Number, 4, 5),
                (Token::DotDot, 5, 7),
                (Token::Number, 8, 9),
                (Token::Dot, 9, 10),
                (Token::ArgumentName, 10, 11),
            ]
        );
    }

    #[test]
    fn it_lexes_punctuation() {
        assert_eq!(
            tokens("Module::Type<T> {A, B} -> C ?;"),
            [
                Token::TypeName,
                Token::ColonColon,
                Token::TypeName,
                Token::Less,
                Token::TypeName,
                Token::Greater,
                Token::OpenBrace,
                Token::TypeName,
                Token::Comma,
                Token::TypeName,
                Token::CloseBrace,
                Token::Arrow,
                Token::TypeName,
                Token::Question,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn it_sets_comments_aside() {
        let lexed = lex("** about x\nx = 1.. ** trailing");
        assert_eq!(lexed.comments.len(), 2);
        assert_eq!(
            tokens("** about x\nx = 1.."),
            [Token::ArgumentName, Token::Equals, Token::Number, Token::DotDot]
        );
    }
}
