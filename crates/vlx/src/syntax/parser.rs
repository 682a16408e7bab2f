//! Parser for VLX text documents.
//!
//! Produces an unlinked [`Document`]: `#uid` references are kept as
//! [`ValueData::Uid`](crate::document::ValueData::Uid) values until
//! [`link`](super::link) resolves them.

use super::lexer::{Lexer, Token, TokenKind};
use crate::document::{Document, List, RawtextBlock, Structure, Value, ValueData};
use crate::foundation::collections::StructureKey;
use crate::serialization::{Result, VlxError};

/// Magic word opening every document
pub const HEADER_MAGIC: &str = "VLX";

/// A parsed document and its root structure
#[derive(Debug)]
pub struct Parsed {
    /// All structures of the document
    pub document: Document,
    /// The top-level structure
    pub root: StructureKey,
    /// Version declared by the header
    pub version: i64,
}

/// Parser for VLX text
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    document: Document,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            document: Document::new(),
        }
    }

    /// Parse the header and the single root structure.
    pub fn parse_document(mut self) -> Result<Parsed> {
        let version = self.parse_header()?;

        let line = self.current.line;
        let root = match self.parse_value()?.as_structure() {
            Some(root) => root,
            None => return Err(self.error_at("document root must be a structure", line)),
        };
        if !self.at_eof() {
            return Err(self.error(&format!("unexpected {} after the root structure", self.current.kind)));
        }

        log::debug!("parsed {} structures", self.document.len());
        Ok(Parsed {
            document: self.document,
            root,
            version,
        })
    }

    /// `VLX version=<n> encoding=ascii`
    fn parse_header(&mut self) -> Result<i64> {
        match &self.current.kind {
            TokenKind::Identifier(word) if word == HEADER_MAGIC => self.next_token(),
            _ => return Err(self.error("missing 'VLX' header")),
        }

        let mut version = None;
        while let (TokenKind::Identifier(name), TokenKind::Equals) = (&self.current.kind, &self.peek.kind) {
            let name = name.clone();
            self.next_token();
            self.next_token();
            match (name.as_str(), &self.current.kind) {
                ("version", TokenKind::Integer(value)) => version = Some(*value),
                ("encoding", TokenKind::Identifier(encoding)) if encoding == "ascii" => {}
                ("encoding", other) => {
                    return Err(self.error(&format!("unsupported encoding {other}")));
                }
                (_, other) => {
                    return Err(self.error(&format!("unexpected {other} in header field '{name}'")));
                }
            }
            self.next_token();
        }

        version.ok_or_else(|| self.error("header has no version"))
    }

    /// Advance to the next token.
    fn next_token(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Check if current token matches the given kind.
    fn cur_is(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Check if at end of input.
    fn at_eof(&self) -> bool {
        self.cur_is(&TokenKind::Eof)
    }

    /// Consume current token if it matches, return true if consumed.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.cur_is(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Expect current token to match and consume it.
    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {}, found {}", kind.name(), self.current.kind)))
        }
    }

    fn error(&self, message: &str) -> VlxError {
        self.error_at(message, self.current.line)
    }

    fn error_at(&self, message: &str, line: usize) -> VlxError {
        VlxError::Parse {
            message: message.to_string(),
            line,
        }
    }

    /// Any value, tagged or not.
    fn parse_value(&mut self) -> Result<Value> {
        let line = self.current.line;
        let tag = match &self.current.kind {
            TokenKind::Tag(tag) => {
                let tag = format!("<{tag}>");
                self.next_token();
                Some(tag)
            }
            _ => None,
        };

        let value = match std::mem::replace(&mut self.current.kind, TokenKind::Eof) {
            TokenKind::LBrace => {
                let Some(tag) = tag else {
                    return Err(self.error_at("structure without a tag", line));
                };
                self.next_token();
                let key = self.parse_structure(tag, line)?;
                return Ok(Value::structure(key).at_line(line));
            }
            TokenKind::LBracket => {
                self.next_token();
                return self.parse_list(tag, line);
            }
            TokenKind::LParen => {
                self.next_token();
                return self.parse_array(tag.as_deref(), line);
            }
            TokenKind::Rawtext(text) => Value::new(ValueData::RawtextBlock(RawtextBlock { tag, text })),
            other if tag.is_some() => {
                return Err(self.error(&format!("tag must be followed by a structure, list or array, found {other}")));
            }
            TokenKind::Str(text) => Value::string(text),
            TokenKind::Identifier(name) => Value::identifier(name),
            TokenKind::Integer(number) => Value::integer(number),
            TokenKind::Real(number) => Value::real(number),
            TokenKind::Uid(uid) => Value::uid(uid),
            TokenKind::True => Value::boolean(true),
            TokenKind::False => Value::boolean(false),
            TokenKind::Null => Value::null(),
            other => return Err(self.error(&format!("expected a value, found {other}"))),
        };
        self.next_token();
        Ok(value.at_line(line))
    }

    /// Entries of a structure, after its `{`.
    fn parse_structure(&mut self, tag: String, line: usize) -> Result<StructureKey> {
        let mut structure = Structure::new(tag).at_line(line);

        let mut first = true;
        while !self.eat(&TokenKind::RBrace) {
            let key = match &self.current.kind {
                TokenKind::Identifier(key) => key.clone(),
                other => return Err(self.error(&format!("expected a key, found {other}"))),
            };
            self.next_token();
            self.expect(&TokenKind::Equals)?;

            if first && key == "ID" {
                match &self.current.kind {
                    TokenKind::Uid(uid) => structure.set_uid(Some(uid.clone())),
                    other => return Err(self.error(&format!("'ID' must be a #uid, found {other}"))),
                }
                self.next_token();
            } else {
                let value = self.parse_value()?;
                structure.push(key, value);
            }
            first = false;
        }

        Ok(self.document.insert(structure))
    }

    /// Values of a list, after its `[`.
    fn parse_list(&mut self, tag: Option<String>, line: usize) -> Result<Value> {
        let mut list = List::new();
        list.tag = tag;
        while !self.eat(&TokenKind::RBracket) {
            if self.at_eof() {
                return Err(self.error_at("unterminated list", line));
            }
            list.push(self.parse_value()?);
        }
        Ok(Value::list(list).at_line(line))
    }

    /// Numbers of an array, after its `(`.
    #[allow(clippy::cast_precision_loss)]
    fn parse_array(&mut self, tag: Option<&str>, line: usize) -> Result<Value> {
        let mut integers = Vec::new();
        let mut reals = Vec::new();
        let mut all_integers = true;

        loop {
            match self.current.kind {
                TokenKind::RParen => break,
                TokenKind::Integer(number) => {
                    integers.push(number);
                    reals.push(number as f64);
                }
                TokenKind::Real(number) => {
                    all_integers = false;
                    reals.push(number);
                }
                ref other => return Err(self.error(&format!("expected a number in array, found {other}"))),
            }
            self.next_token();
        }
        self.next_token();

        let value = if all_integers {
            Value::array_integer(tag, integers)
        } else {
            Value::array_real(tag, reals)
        };
        Ok(value.at_line(line))
    }
}

/// Parse a complete VLX text document.
pub fn parse(source: &str) -> Result<Parsed> {
    Parser::new(source).parse_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(parsed: &Parsed) -> &Structure {
        parsed.document.structure(parsed.root).unwrap()
    }

    #[test]
    fn test_header_and_root() {
        let parsed = parse("VLX version=100 encoding=ascii\n<vl::ResourceDatabase>\n{\n\tSerializerVersion = 100\n}\n")
            .unwrap();
        assert_eq!(parsed.version, 100);
        let root = root(&parsed);
        assert_eq!(root.tag(), "<vl::ResourceDatabase>");
        assert_eq!(root.line_number(), 2);
        assert_eq!(root.get("SerializerVersion").and_then(Value::as_integer), Some(100));
        assert_eq!(root.get("SerializerVersion").unwrap().line_number(), 4);
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let error = parse("<vl::ResourceDatabase> { }").unwrap_err();
        assert!(matches!(error, VlxError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_uid_and_nested_values() {
        let source = r#"VLX version=100 encoding=ascii
<vl::Actor>
{
    ID = #actor_id1
    ObjectName = "hero"
    Lods = [ #geometry_id2 NULL ]
    Bounds = <vl::ArrayFloat3> ( 1 2.5 3 )
    Indices = ( 0 1 2 )
    Mode = PT_TRIANGLES
    Source = <glsl> {<void main() {}>}
}
"#;
        let parsed = parse(source).unwrap();
        let actor = root(&parsed);
        assert_eq!(actor.uid(), Some("#actor_id1"));
        assert_eq!(actor.get("ObjectName").and_then(Value::as_str), Some("hero"));
        assert!(actor.get("ID").is_none());

        let lods = actor.get("Lods").and_then(Value::as_list).unwrap();
        assert!(matches!(lods.values[0].data(), ValueData::Uid(uid) if uid == "#geometry_id2"));
        assert!(matches!(lods.values[1].data(), ValueData::Null));

        let bounds = actor.get("Bounds").and_then(Value::as_array_real).unwrap();
        assert_eq!(bounds.tag.as_deref(), Some("<vl::ArrayFloat3>"));
        assert_eq!(bounds.values, vec![1.0, 2.5, 3.0]);

        let indices = actor.get("Indices").and_then(Value::as_array_integer).unwrap();
        assert_eq!(indices.values, vec![0, 1, 2]);

        assert_eq!(actor.get("Mode").and_then(Value::as_identifier), Some("PT_TRIANGLES"));
        let source = actor.get("Source").and_then(Value::as_rawtext).unwrap();
        assert_eq!(source.text, "void main() {}");
        assert_eq!(source.tag.as_deref(), Some("<glsl>"));
    }

    #[test]
    fn test_untagged_structure_is_rejected() {
        let error = parse("VLX version=100 encoding=ascii\n<vl::Actor> { Child = { } }").unwrap_err();
        assert!(matches!(error, VlxError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_trailing_input_is_rejected() {
        assert!(parse("VLX version=100 encoding=ascii\n<vl::A> { }\n<vl::B> { }").is_err());
    }
}
