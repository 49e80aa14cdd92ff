// Bang Tokens
// Token kinds produced by the lexer, with source positions

use miette::SourceSpan;
use std::fmt;

/// Byte range of a token or node in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.end.saturating_sub(span.start))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Print,
    Let,
    If,
    Loop,
    Begin,
    End,

    Identifier,
    IntLiteral,
    StringLiteral,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    Assign,

    // Punctuation
    LeftParen,
    RightParen,
    Semicolon,

    // Sentinels
    Error,
    EndOfInput,
}

impl TokenKind {
    /// Reserved words, checked after an identifier has been scanned
    pub const KEYWORDS: [(&'static str, TokenKind); 6] = [
        ("print", TokenKind::Print),
        ("let", TokenKind::Let),
        ("if", TokenKind::If),
        ("loop", TokenKind::Loop),
        ("begin", TokenKind::Begin),
        ("end", TokenKind::End),
    ];

    pub fn keyword(word: &str) -> Option<TokenKind> {
        Self::KEYWORDS
            .iter()
            .find(|(text, _)| *text == word)
            .map(|(_, kind)| *kind)
    }

    /// Whether the scanner stops on this kind
    pub fn is_terminal(self) -> bool {
        matches!(self, TokenKind::Error | TokenKind::EndOfInput)
    }

    /// Kinds whose lexeme is part of their printed form
    pub fn carries_lexeme(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::IntLiteral | TokenKind::StringLiteral
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Print => "PRINT",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Loop => "LOOP",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Identifier => "ID",
            TokenKind::IntLiteral => "INT",
            TokenKind::StringLiteral => "STR",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::Semicolon => "SC",
            TokenKind::Error => "ERR",
            TokenKind::EndOfInput => "DONE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token. String literal lexemes hold the unescaped text without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Error => write!(f, "Error on line {} ({})", self.line, self.lexeme),
            kind if kind.carries_lexeme() => write!(f, "{}({})", kind, self.lexeme),
            kind => write!(f, "{kind}"),
        }
    }
}
