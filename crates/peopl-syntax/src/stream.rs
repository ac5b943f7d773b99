use crate::Span;

/// A token and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The token.
    pub token: T,
    /// Its source location.
    pub span: Span,
}

/// A cursor over lexed tokens, used by the recursive descent parsers.
#[derive(Debug, Clone)]
pub struct TokenStream<'input, T> {
    source: &'input str,
    tokens: Vec<Spanned<T>>,
    position: usize,
}

impl<'input, T: Copy + PartialEq> TokenStream<'input, T> {
    /// Wrap the `tokens` lexed from `source`.
    pub fn new(source: &'input str, tokens: Vec<Spanned<T>>) -> Self {
        Self {
            source,
            tokens,
            position: 0,
        }
    }

    /// The source text being parsed.
    pub fn source(&self) -> &'input str {
        self.source
    }

    /// The next token.
    pub fn peek(&self) -> Option<T> {
        self.peek_nth(0)
    }

    /// The token `n` tokens ahead of the next one.
    pub fn peek_nth(&self, n: usize) -> Option<T> {
        self.tokens.get(self.position + n).map(|spanned| spanned.token)
    }

    /// Is the next token `token`?
    pub fn at(&self, token: T) -> bool {
        self.peek() == Some(token)
    }

    /// Have all tokens been consumed?
    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Is the next token the first on its line?
    ///
    /// The start and end of input count as line starts.
    pub fn at_line_start(&self) -> bool {
        let next = match self.tokens.get(self.position) {
            None => return true,
            Some(next) => next,
        };
        let previous_end = match self.position.checked_sub(1) {
            None => return true,
            Some(previous) => self.tokens[previous].span.end_offset,
        };
        self.source[previous_end..next.span.start_offset].contains('\n')
    }

    /// Consume the next token.
    pub fn bump(&mut self) -> Option<Spanned<T>> {
        let next = self.tokens.get(self.position).copied();
        if next.is_some() {
            self.position += 1;
        }
        next
    }

    /// Consume the next token if it is `token`.
    pub fn eat(&mut self, token: T) -> Option<Span> {
        if self.at(token) {
            self.bump().map(|spanned| spanned.span)
        } else {
            None
        }
    }

    /// Span of the next token, or an empty span at the end of input.
    pub fn span(&self) -> Span {
        self.tokens
            .get(self.position)
            .map_or_else(|| Span::empty(self.source.len()), |next| next.span)
    }

    /// Source text of the next token, `None` at the end of input.
    pub fn text(&self) -> Option<&'input str> {
        let source = self.source;
        self.tokens
            .get(self.position)
            .map(|next| &source[next.span.start_offset..next.span.end_offset])
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Option<Span> {
        self.position
            .checked_sub(1)
            .map(|previous| self.tokens[previous].span)
    }

    /// A bookmark that [TokenStream::reset] can return to.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rewind (or fast forward) to a bookmark.
    pub fn reset(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }
}
