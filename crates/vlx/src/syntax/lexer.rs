//! Lexer for VLX text documents.

use std::fmt;

/// Token kinds of the VLX text syntax
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<vl::Actor>`, stored without the angle brackets
    Tag(String),
    /// Bare word: keys, enumeration values, header words
    Identifier(String),
    /// Quoted string, escapes resolved
    Str(String),
    /// Integer literal
    Integer(i64),
    /// Real literal
    Real(f64),
    /// `#uid`, stored with the leading `#`
    Uid(String),
    /// `{< ... >}` body
    Rawtext(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `NULL`
    Null,
    /// `=`
    Equals,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// End of input
    Eof,
    /// Character that starts no token
    Invalid(char),
    /// String reaching the end of its line
    UnterminatedString,
    /// Tag or raw text block reaching the end of input
    UnterminatedBlock,
    /// Number that does not parse
    BadNumber(String),
}

impl TokenKind {
    /// Short description for error messages
    pub fn name(&self) -> String {
        match self {
            TokenKind::Tag(tag) => format!("tag <{tag}>"),
            TokenKind::Identifier(name) => format!("identifier '{name}'"),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::Integer(value) => format!("integer {value}"),
            TokenKind::Real(value) => format!("real {value}"),
            TokenKind::Uid(uid) => format!("reference {uid}"),
            TokenKind::Rawtext(_) => "raw text block".to_string(),
            TokenKind::True => "'true'".to_string(),
            TokenKind::False => "'false'".to_string(),
            TokenKind::Null => "'NULL'".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Invalid(c) => format!("invalid character '{c}'"),
            TokenKind::UnterminatedString => "unterminated string".to_string(),
            TokenKind::UnterminatedBlock => "unterminated block".to_string(),
            TokenKind::BadNumber(text) => format!("malformed number '{text}'"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A token and the line it starts on
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was read
    pub kind: TokenKind,
    /// 1-based line number
    pub line: usize,
}

impl Token {
    /// Create a token
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }
}

/// Lexer for VLX text
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    ch: Option<char>,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            pos: 0,
            ch: None,
            line: 1,
        };
        lexer.read_char();
        lexer
    }

    /// Read the next character.
    fn read_char(&mut self) {
        if self.ch == Some('\n') {
            self.line += 1;
        }
        self.ch = self.input[self.pos..].chars().next();
        if let Some(c) = self.ch {
            self.pos += c.len_utf8();
        }
    }

    /// Peek at the next character without consuming.
    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Byte offset of the current character
    fn offset(&self) -> usize {
        self.pos - self.ch.map_or(0, char::len_utf8)
    }

    /// Skip whitespace and `//` comments.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.ch {
            if c.is_whitespace() {
                self.read_char();
            } else if c == '/' && self.peek_char() == Some('/') {
                while self.ch.is_some() && self.ch != Some('\n') {
                    self.read_char();
                }
            } else {
                break;
            }
        }
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == ':' || c == '.'
    }

    /// Consume characters while `accept` holds and return them
    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset();
        while let Some(c) = self.ch {
            if accept(c) {
                self.read_char();
            } else {
                break;
            }
        }
        let input = self.input;
        &input[start..self.offset()]
    }

    /// Read an identifier or keyword.
    fn read_identifier(&mut self) -> TokenKind {
        match self.read_while(|c| c.is_alphanumeric() || c == '_' || c == ':') {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "NULL" => TokenKind::Null,
            word => TokenKind::Identifier(word.to_string()),
        }
    }

    /// Read an integer or real, with optional sign and exponent.
    fn read_number(&mut self) -> TokenKind {
        let start = self.offset();
        let mut is_real = false;

        if matches!(self.ch, Some('+' | '-')) {
            self.read_char();
        }
        while let Some(c) = self.ch {
            if c.is_ascii_digit() {
                self.read_char();
            } else if c == '.' && !is_real {
                is_real = true;
                self.read_char();
            } else if c == 'e' || c == 'E' {
                is_real = true;
                self.read_char();
                if matches!(self.ch, Some('+' | '-')) {
                    self.read_char();
                }
            } else {
                break;
            }
        }

        let text = &self.input[start..self.offset()];
        if is_real {
            text.parse()
                .map_or_else(|_| TokenKind::BadNumber(text.to_string()), TokenKind::Real)
        } else {
            text.parse()
                .map_or_else(|_| TokenKind::BadNumber(text.to_string()), TokenKind::Integer)
        }
    }

    /// Read a string literal.
    fn read_string(&mut self) -> TokenKind {
        self.read_char(); // consume opening "
        let mut result = String::new();

        loop {
            match self.ch {
                None | Some('\n') => return TokenKind::UnterminatedString,
                Some('"') => {
                    self.read_char();
                    return TokenKind::Str(result);
                }
                Some('\\') => {
                    self.read_char();
                    match self.ch {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some(c) => result.push(c),
                        None => return TokenKind::UnterminatedString,
                    }
                    self.read_char();
                }
                Some(c) => {
                    result.push(c);
                    self.read_char();
                }
            }
        }
    }

    /// Read `<Tag>`.
    fn read_tag(&mut self) -> TokenKind {
        self.read_char(); // consume <
        let tag = self.read_while(|c| c != '>' && c != '\n');
        if self.ch != Some('>') {
            return TokenKind::UnterminatedBlock;
        }
        self.read_char();
        TokenKind::Tag(tag.to_string())
    }

    /// Read a `{< ... >}` block verbatim.
    fn read_rawtext(&mut self) -> TokenKind {
        self.read_char(); // consume {
        self.read_char(); // consume <
        let start = self.offset();
        loop {
            match self.ch {
                None => return TokenKind::UnterminatedBlock,
                Some('>') if self.peek_char() == Some('}') => {
                    let text = &self.input[start..self.offset()];
                    self.read_char();
                    self.read_char();
                    return TokenKind::Rawtext(text.to_string());
                }
                Some(_) => self.read_char(),
            }
        }
    }

    /// Read `#uid`.
    fn read_uid(&mut self) -> TokenKind {
        let start = self.offset();
        self.read_char(); // consume #
        self.read_while(Self::is_word_char);
        TokenKind::Uid(self.input[start..self.offset()].to_string())
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.read_char();
        kind
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let line = self.line;

        let kind = match self.ch {
            None => TokenKind::Eof,
            Some(c) => match c {
                'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),
                '0'..='9' | '-' | '+' | '.' => self.read_number(),
                '"' => self.read_string(),
                '#' => self.read_uid(),
                '<' => self.read_tag(),
                '{' if self.peek_char() == Some('<') => self.read_rawtext(),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '=' => self.single(TokenKind::Equals),
                other => self.single(TokenKind::Invalid(other)),
            },
        };

        Token::new(kind, line)
    }
}
