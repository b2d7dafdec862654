use crate::error::ParseError;

/// A token together with the 1-based source line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `%N`, carrying the 1-based index as written.
    Id(u32),
    /// Decimal or `0x` hex integer, possibly negative.
    Int(i128),
    Float(f64),
    /// A double-quoted string with its escapes resolved.
    Str(String),
    /// Mnemonics, enum names, masks (`A|B`) and symbolic expressions.
    Ident(String),
    Newline,
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Id(n) => write!(f, "%{}", n),
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{:?}", n),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Newline => write!(f, "end of line"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    line: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    /// Tokenizes the full source. Every line break becomes a `Newline`
    /// token; the stream always ends with `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Spanned<Token>>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_blanks_and_comments();
            match self.peek() {
                None => {
                    tokens.push(Spanned {
                        node: Token::Eof,
                        line: self.line,
                    });
                    break;
                }
                Some(b'\n') => {
                    tokens.push(Spanned {
                        node: Token::Newline,
                        line: self.line,
                    });
                    self.advance();
                    self.line += 1;
                }
                Some(_) => tokens.push(self.next_token()?),
            }
        }
        Ok(tokens)
    }

    fn skip_blanks_and_comments(&mut self) {
        loop {
            while self
                .peek()
                .map_or(false, |b| b != b'\n' && b.is_ascii_whitespace())
            {
                self.pos += 1;
            }
            if self.peek() == Some(b';') {
                while self.peek().map_or(false, |b| b != b'\n') {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek2(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn next_token(&mut self) -> Result<Spanned<Token>, ParseError> {
        let line = self.line;
        let start = self.pos;
        let node = match self.peek() {
            Some(b'%') => self.lex_id(start)?,
            Some(b'"') => self.lex_string()?,
            Some(b'-') if self.peek2().map_or(false, |b| b.is_ascii_digit()) => self.lex_number(start)?,
            Some(b) if b.is_ascii_digit() => self.lex_number(start)?,
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.lex_ident(start),
            _ => {
                let ch = self.src[start..].chars().next().unwrap_or('\0');
                return Err(ParseError::UnexpectedChar { ch, line });
            }
        };
        Ok(Spanned { node, line })
    }

    fn lex_id(&mut self, start: usize) -> Result<Token, ParseError> {
        self.advance(); // consume `%`
        while self.peek().map_or(false, |b| b.is_ascii_digit()) {
            self.advance();
        }
        let text = &self.src[start..self.pos];
        text[1..]
            .parse()
            .map(Token::Id)
            .map_err(|_| ParseError::InvalidLiteral {
                text: text.to_owned(),
                line: self.line,
            })
    }

    /// Only `\"` is an escape; any other backslash is kept as written.
    fn lex_string(&mut self) -> Result<Token, ParseError> {
        let start_line = self.line;
        self.advance(); // consume opening `"`
        let mut bytes = Vec::new();
        loop {
            match self.advance() {
                None => return Err(ParseError::UnterminatedString { line: start_line }),
                Some(b'"') => break,
                Some(b'\\') if self.peek() == Some(b'"') => {
                    self.advance();
                    bytes.push(b'"');
                }
                Some(b) => {
                    if b == b'\n' {
                        self.line += 1;
                    }
                    bytes.push(b);
                }
            }
        }
        // Only ASCII bytes are split or substituted, so the input's UTF-8
        // stays intact.
        Ok(Token::Str(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, ParseError> {
        if self.peek() == Some(b'-') {
            self.advance();
        }
        let digits_start = self.pos;
        if self.peek() == Some(b'0') && matches!(self.peek2(), Some(b'x') | Some(b'X')) {
            self.pos += 2;
            while self.peek().map_or(false, |b| b.is_ascii_hexdigit()) {
                self.advance();
            }
            let text = &self.src[start..self.pos];
            let negative = start != digits_start;
            let value = i128::from_str_radix(&self.src[digits_start + 2..self.pos], 16)
                .map_err(|_| self.invalid(text))?;
            return Ok(Token::Int(if negative { -value } else { value }));
        }

        while self.peek().map_or(false, |b| b.is_ascii_digit()) {
            self.advance();
        }

        // `1D`, `2D`, `3D`: a digit run glued to letters is a name, not a
        // number, unless the letters form an exponent.
        if start == digits_start && self.at_ident_continuation() && !self.at_exponent() {
            return Ok(self.lex_ident(start));
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') && self.peek2().map_or(false, |b| b.is_ascii_digit()) {
            is_float = true;
            self.advance(); // consume '.'
            while self.peek().map_or(false, |b| b.is_ascii_digit()) {
                self.advance();
            }
        }
        if self.at_exponent() {
            is_float = true;
            self.advance();
            if self.peek().map_or(false, |b| b == b'+' || b == b'-') {
                self.advance();
            }
            while self.peek().map_or(false, |b| b.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.src[start..self.pos];
        if is_float {
            text.parse().map(Token::Float).map_err(|_| self.invalid(text))
        } else {
            text.parse().map(Token::Int).map_err(|_| self.invalid(text))
        }
    }

    fn at_ident_continuation(&self) -> bool {
        self.peek().map_or(false, |b| b.is_ascii_alphabetic() || b == b'_')
    }

    fn at_exponent(&self) -> bool {
        if !matches!(self.peek(), Some(b'e') | Some(b'E')) {
            return false;
        }
        let bytes = self.src.as_bytes();
        match bytes.get(self.pos + 1) {
            Some(b) if b.is_ascii_digit() => true,
            Some(b'+') | Some(b'-') => bytes.get(self.pos + 2).map_or(false, |b| b.is_ascii_digit()),
            _ => false,
        }
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        while self.peek().map_or(false, |b| {
            b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'|' | b'@' | b'$')
        }) {
            self.advance();
        }
        Token::Ident(self.src[start..self.pos].to_owned())
    }

    fn invalid(&self, text: &str) -> ParseError {
        ParseError::InvalidLiteral {
            text: text.to_owned(),
            line: self.line,
        }
    }
}
