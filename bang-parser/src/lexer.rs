// Bang Lexer
// Single-character lookahead scanner producing one token per call

use crate::token::{Span, Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;
use tracing::trace;

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    offset: usize, // Byte offset of the next unread char
    line: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            offset: 0,
            line: 1,
            finished: false,
        }
    }

    /// Current line (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scan the next token. Once input is exhausted every call returns `EndOfInput`.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line, "token");
        token
    }

    fn scan(&mut self) -> Token {
        loop {
            let start = self.offset;
            let Some(ch) = self.bump() else {
                return Token::new(TokenKind::EndOfInput, "", self.line, Span::new(start, start));
            };

            match ch {
                '\n' => self.line += 1,
                c if c.is_whitespace() => {}
                '/' if self.peek() == Some('/') => self.skip_line_comment(),
                c if c.is_ascii_alphabetic() => return self.read_word(c, start),
                c if c.is_ascii_digit() => return self.read_integer(c, start),
                '"' => return self.read_string(start),
                c => return self.single(c, start),
            }
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn token(&self, kind: TokenKind, lexeme: impl Into<String>, start: usize) -> Token {
        Token::new(kind, lexeme, self.line, Span::new(start, self.offset))
    }

    // The terminating newline is left for the main loop so it is counted once
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn single(&mut self, ch: char, start: usize) -> Token {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '!' => TokenKind::Bang,
            '=' => TokenKind::Assign,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ';' => TokenKind::Semicolon,
            _ => TokenKind::Error,
        };
        self.token(kind, ch.to_string(), start)
    }

    fn read_word(&mut self, first: char, start: usize) -> Token {
        let mut word = String::from(first);
        while let Some(ch) = self.peek().filter(char::is_ascii_alphanumeric) {
            word.push(ch);
            self.bump();
        }
        let kind = TokenKind::keyword(&word).unwrap_or(TokenKind::Identifier);
        self.token(kind, word, start)
    }

    fn read_integer(&mut self, first: char, start: usize) -> Token {
        let mut digits = String::from(first);
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.bump();
        }
        // Literals must fit the runtime integer
        let kind = if digits.parse::<i64>().is_ok() {
            TokenKind::IntLiteral
        } else {
            TokenKind::Error
        };
        self.token(kind, digits, start)
    }

    fn read_string(&mut self, start: usize) -> Token {
        let line = self.line;
        let mut text = String::new();
        let unterminated = |text: String, offset: usize| {
            Token::new(TokenKind::Error, format!("\"{text}"), line, Span::new(start, offset))
        };

        loop {
            match self.bump() {
                Some('"') => return self.token(TokenKind::StringLiteral, text, start),
                Some('\\') => match self.peek() {
                    None | Some('\n') => {
                        text.push('\\');
                        return unterminated(text, self.offset);
                    }
                    Some(escaped) => {
                        self.bump();
                        text.push(if escaped == 'n' { '\n' } else { escaped });
                    }
                },
                None => return unterminated(text, self.offset),
                // Strings never span lines; the error still reports the opening line
                Some('\n') => {
                    let offset = self.offset - 1;
                    text.push('\n');
                    self.line += 1;
                    return unterminated(text, offset);
                }
                Some(ch) => text.push(ch),
            }
        }
    }
}

/// Yields tokens up to and including the first `EndOfInput` or `Error`
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind.is_terminal();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|token| token.kind).collect()
    }

    #[test]
    fn test_next_token() {
        let input = "let x = 5;";
        let mut lexer = Lexer::new(input);

        let expected = vec![
            (TokenKind::Let, "let"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Assign, "="),
            (TokenKind::IntLiteral, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::EndOfInput, ""),
        ];

        for (kind, lexeme) in expected {
            let token = lexer.next_token();
            assert_eq!(token.kind, kind);
            assert_eq!(token.lexeme, lexeme);
        }
    }

    #[test]
    fn test_keywords_need_exact_match() {
        assert_eq!(
            kinds("print printer end1 Loop begin"),
            vec![
                TokenKind::Print,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Begin,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_identifier_stops_at_operator() {
        let tokens: Vec<Token> = Lexer::new("a1+22*b").collect();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["a1", "+", "22", "*", "b", ""]);
    }

    #[test]
    fn test_digits_then_letters_split() {
        assert_eq!(
            kinds("12ab"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Identifier,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn test_line_counting_and_comments() {
        let input = "print 1; // trailing comment\n\n// whole line\nprint 2";
        let tokens: Vec<Token> = Lexer::new(input).collect();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 4, 4, 4]);
    }

    #[test]
    fn test_single_slash_is_divide() {
        assert_eq!(
            kinds("6 / 3"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Slash,
                TokenKind::IntLiteral,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let token = Lexer::new(r#""a\nb\"c\\d\q""#).next_token();
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert_eq!(token.lexeme, "a\nb\"c\\dq");
    }

    #[test]
    fn test_unterminated_string_at_newline() {
        let mut lexer = Lexer::new("print 1;\nprint \"abc\nprint 2;");
        let token = lexer.find(|t| t.kind.is_terminal()).unwrap();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "\"abc\n");
        assert_eq!(token.line, 2);
    }

    #[test]
    fn test_unterminated_string_at_end_of_input() {
        let token = Lexer::new("\"abc").next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "\"abc");
        assert_eq!(token.line, 1);
    }

    #[test]
    fn test_trailing_backslash_in_string() {
        let token = Lexer::new("\"ab\\").next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "\"ab\\");
    }

    #[test]
    fn test_bad_character() {
        let token = Lexer::new("\n  $").next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "$");
        assert_eq!(token.line, 2);
    }

    #[test]
    fn test_integer_overflow_is_lexical_error() {
        let token = Lexer::new("99999999999999999999").next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "99999999999999999999");
    }

    #[test]
    fn test_scanning_resumes_after_error() {
        let mut lexer = Lexer::new("$ print");
        assert_eq!(lexer.next_token().kind, TokenKind::Error);
        assert_eq!(lexer.next_token().kind, TokenKind::Print);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_iterator_stops_at_error() {
        assert_eq!(
            kinds("print @ 1"),
            vec![TokenKind::Print, TokenKind::Error]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens: Vec<Token> = Lexer::new("let é").collect();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 6));
    }
}
