//! Tokenizer shared by literal and program parsing.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Var(String),
    Int(i64),
    Str(String),
    /// Contents of a backquoted duration.
    Duration(String),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    Arrow,
    Amp,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Ident(s) => format!("`{s}`"),
            Self::Var(s) => format!("variable `{s}`"),
            Self::Int(v) => format!("integer `{v}`"),
            Self::Str(_) => "string".to_string(),
            Self::Duration(s) => format!("duration `{s}`"),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::LBrace => "`{`".to_string(),
            Self::RBrace => "`}`".to_string(),
            Self::Comma => "`,`".to_string(),
            Self::Colon => "`:`".to_string(),
            Self::Dot => "`.`".to_string(),
            Self::Arrow => "`->`".to_string(),
            Self::Amp => "`&`".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Positioned failure, converted to a public `ParseError` by the caller.
#[derive(Debug, Clone)]
pub(crate) struct Failure {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Failure {
    pub(crate) fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Single-line rendering used for fact errors.
    pub(crate) fn describe(&self) -> String {
        format!("{} at column {}", self.message, self.column)
    }
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn take_while(&mut self, first: char, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    fn skip_trivia(&mut self) -> Result<(), Failure> {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            let (line, column) = (self.line, self.column);
                            self.bump();
                            self.bump();
                            let mut prev = ' ';
                            loop {
                                match self.bump() {
                                    Some('/') if prev == '*' => break,
                                    Some(c) => prev = c,
                                    None => {
                                        return Err(Failure::new(
                                            line,
                                            column,
                                            "unterminated block comment",
                                        ))
                                    }
                                }
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn int(&mut self, digits: String, line: usize, column: usize) -> Result<TokenKind, Failure> {
        digits
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| Failure::new(line, column, format!("integer `{digits}` out of range")))
    }

    fn quoted(&mut self, close: char, line: usize, column: usize) -> Result<String, Failure> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == close => return Ok(out),
                Some('\\') if close == '"' => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => break,
                },
                Some(c) => out.push(c),
                None => break,
            }
        }
        Err(Failure::new(line, column, "unterminated quoted text"))
    }

    fn next_token(&mut self) -> Result<Token, Failure> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);
        let Some(c) = self.bump() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                line,
                column,
            });
        };
        let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '&' => TokenKind::Amp,
            '"' => TokenKind::Str(self.quoted('"', line, column)?),
            '`' => TokenKind::Duration(self.quoted('`', line, column)?),
            '-' => match self.chars.peek() {
                Some('>') => {
                    self.bump();
                    TokenKind::Arrow
                }
                Some(d) if d.is_ascii_digit() => {
                    let first = *d;
                    self.bump();
                    let digits = self.take_while(first, |c| c.is_ascii_digit());
                    self.int(format!("-{digits}"), line, column)?
                }
                _ => return Err(Failure::new(line, column, "unexpected `-`")),
            },
            c if c.is_ascii_digit() => {
                let digits = self.take_while(c, |c| c.is_ascii_digit());
                self.int(digits, line, column)?
            }
            c if c.is_ascii_lowercase() => TokenKind::Ident(self.take_while(c, is_word)),
            c if c.is_ascii_uppercase() || c == '_' => TokenKind::Var(self.take_while(c, is_word)),
            other => {
                return Err(Failure::new(
                    line,
                    column,
                    format!("unexpected character `{other}`"),
                ))
            }
        };
        Ok(Token { kind, line, column })
    }
}

/// Tokenize the whole input; the last token is always `Eof`.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, Failure> {
    let mut lexer = Lexer {
        chars: src.chars().peekable(),
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
