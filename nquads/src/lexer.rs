//! Tokenizer for one N-Quads line.
//!
//! Strict and relaxed syntaxes share the tokenizer and only differ by their [`CharClasses`].

use std::char;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Iri(String),
    BlankLabel(String),
    Literal(String),
    LangTag(String),
    /// `^^`
    DatatypeMarker,
    Dot,
    /// `<<`
    QuotedOpen,
    /// `>>`
    QuotedClose,
    Comment,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexError {
    Invalid,
    CodePoint(u32),
}

/// The character classes of a syntax.
pub(crate) struct CharClasses {
    pub iri: fn(char) -> bool,
    pub label_first: fn(char) -> bool,
    pub label: fn(char) -> bool,
    pub lang: fn(char) -> bool,
    pub lang_valid: fn(&str) -> bool,
    pub literal: fn(char) -> bool,
    /// Keeps unknown escape sequences verbatim instead of failing.
    pub lenient_escapes: bool,
    /// Ignores everything after the final dot.
    pub ignore_trailing: bool,
}

/// [W3C N-Quads grammar](https://www.w3.org/TR/n-quads/#sec-grammar)
pub(crate) static STRICT: CharClasses = CharClasses {
    iri: is_iriref_char,
    label_first: is_label_first_char,
    label: is_pn_chars,
    lang: is_lang_char,
    lang_valid: is_strict_langtag,
    literal: is_strict_literal_char,
    lenient_escapes: false,
    ignore_trailing: false,
};

pub(crate) static RELAXED: CharClasses = CharClasses {
    iri: is_relaxed_iri_char,
    label_first: is_relaxed_label_char,
    label: is_relaxed_label_char,
    lang: is_lang_char,
    lang_valid: is_relaxed_langtag,
    literal: is_relaxed_literal_char,
    lenient_escapes: true,
    ignore_trailing: true,
};

#[derive(Clone, Copy)]
pub(crate) struct Lexer<'a> {
    line: &'a str,
    position: usize,
    token_start: usize,
    classes: &'static CharClasses,
    star: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str, classes: &'static CharClasses, star: bool) -> Self {
        Self {
            line,
            position: 0,
            token_start: 0,
            classes,
            star,
        }
    }

    /// Byte offset of the start of the last token read.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub fn remainder(&self, from: usize) -> &'a str {
        self.line.get(from..).unwrap_or_default()
    }

    pub fn ignores_trailing(&self) -> bool {
        self.classes.ignore_trailing
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;
        let c = match self.current() {
            Some(c) => c,
            None => return Ok(Token::End),
        };
        match c {
            '<' if self.star && self.ahead(1) == Some('<') => {
                self.position += 2;
                Ok(Token::QuotedOpen)
            }
            '>' if self.star && self.ahead(1) == Some('>') => {
                self.position += 2;
                Ok(Token::QuotedClose)
            }
            '<' => self.iri(),
            '_' => self.blank_label(),
            '"' => self.literal(),
            '@' => self.langtag(),
            '^' if self.ahead(1) == Some('^') => {
                self.position += 2;
                Ok(Token::DatatypeMarker)
            }
            '.' => {
                self.position += 1;
                Ok(Token::Dot)
            }
            '#' => {
                self.position = self.line.len();
                Ok(Token::Comment)
            }
            _ => Err(LexError::Invalid),
        }
    }

    fn current(&self) -> Option<char> {
        self.line[self.position..].chars().next()
    }

    fn ahead(&self, count: usize) -> Option<char> {
        self.line[self.position..].chars().nth(count)
    }

    fn consume(&mut self, c: char) {
        self.position += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.consume(c);
        }
    }

    fn iri(&mut self) -> Result<Token, LexError> {
        // [6] IRIREF ::= '<' ([^#x00-#x20<>"{}|^`\] | UCHAR)* '>'
        self.position += 1;
        let mut buffer = String::new();
        loop {
            let c = self.current().ok_or(LexError::Invalid)?;
            match c {
                '>' => {
                    self.position += 1;
                    return Ok(Token::Iri(buffer));
                }
                '\\' => {
                    self.position += 1;
                    match self.current() {
                        Some('u') => buffer.push(self.hexa_char(4)?),
                        Some('U') => buffer.push(self.hexa_char(8)?),
                        _ if self.classes.lenient_escapes => buffer.push('\\'),
                        _ => return Err(LexError::Invalid),
                    }
                }
                c if (self.classes.iri)(c) => {
                    buffer.push(c);
                    self.consume(c);
                }
                _ => return Err(LexError::Invalid),
            }
        }
    }

    fn blank_label(&mut self) -> Result<Token, LexError> {
        // [141s] BLANK_NODE_LABEL ::= '_:' (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?
        if self.ahead(1) != Some(':') {
            return Err(LexError::Invalid);
        }
        self.position += 2;
        let mut buffer = String::new();
        match self.current() {
            Some(c) if (self.classes.label_first)(c) => {
                buffer.push(c);
                self.consume(c);
            }
            _ => return Err(LexError::Invalid),
        }
        loop {
            match self.current() {
                Some('.') => {
                    let dots = self.line[self.position..]
                        .chars()
                        .take_while(|c| *c == '.')
                        .count();
                    match self.ahead(dots) {
                        Some(c) if (self.classes.label)(c) => {
                            buffer.extend(std::iter::repeat('.').take(dots));
                            self.position += dots;
                        }
                        _ => return Ok(Token::BlankLabel(buffer)),
                    }
                }
                Some(c) if (self.classes.label)(c) => {
                    buffer.push(c);
                    self.consume(c);
                }
                _ => return Ok(Token::BlankLabel(buffer)),
            }
        }
    }

    fn langtag(&mut self) -> Result<Token, LexError> {
        self.position += 1;
        let start = self.position;
        while let Some(c) = self.current() {
            if !(self.classes.lang)(c) {
                break;
            }
            self.consume(c);
        }
        let tag = &self.line[start..self.position];
        if (self.classes.lang_valid)(tag) {
            Ok(Token::LangTag(tag.to_owned()))
        } else {
            Err(LexError::Invalid)
        }
    }

    fn literal(&mut self) -> Result<Token, LexError> {
        // [9] STRING_LITERAL_QUOTE ::= '"' ([^#x22#x5C#xA#xD] | ECHAR | UCHAR)* '"'
        self.position += 1;
        let mut buffer = String::new();
        loop {
            let c = self.current().ok_or(LexError::Invalid)?;
            match c {
                '"' => {
                    self.position += 1;
                    return Ok(Token::Literal(buffer));
                }
                '\\' => self.echar_or_uchar(&mut buffer)?,
                c if (self.classes.literal)(c) => {
                    buffer.push(c);
                    self.consume(c);
                }
                _ => return Err(LexError::Invalid),
            }
        }
    }

    fn echar_or_uchar(&mut self, buffer: &mut String) -> Result<(), LexError> {
        self.position += 1;
        let c = self.current().ok_or(LexError::Invalid)?;
        match c {
            't' => buffer.push('\t'),
            'b' => buffer.push('\u{8}'),
            'n' => buffer.push('\n'),
            'r' => buffer.push('\r'),
            'f' => buffer.push('\u{C}'),
            '"' => buffer.push('"'),
            '\'' => buffer.push('\''),
            '\\' => buffer.push('\\'),
            'u' => {
                buffer.push(self.hexa_char(4)?);
                return Ok(());
            }
            'U' => {
                buffer.push(self.hexa_char(8)?);
                return Ok(());
            }
            c if self.classes.lenient_escapes => {
                buffer.push('\\');
                buffer.push(c);
            }
            _ => return Err(LexError::Invalid),
        }
        self.consume(c);
        Ok(())
    }

    /// Reads the `u` or `U` of an UCHAR and its `len` hexadecimal digits.
    fn hexa_char(&mut self, len: usize) -> Result<char, LexError> {
        let digits = self
            .line
            .get(self.position + 1..self.position + 1 + len)
            .ok_or(LexError::Invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LexError::Invalid);
        }
        let point = u32::from_str_radix(digits, 16).map_err(|_| LexError::Invalid)?;
        self.position += 1 + len;
        char::from_u32(point).ok_or(LexError::CodePoint(point))
    }
}

fn is_iriref_char(c: char) -> bool {
    !matches!(
        c,
        '\0'..=' ' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'
    )
}

fn is_relaxed_iri_char(c: char) -> bool {
    c != '>'
}

// [157s] PN_CHARS_BASE
fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

// [158s] PN_CHARS_U ::= PN_CHARS_BASE | '_' | ':'
fn is_pn_chars_u(c: char) -> bool {
    is_pn_chars_base(c) || c == '_' || c == ':'
}

fn is_label_first_char(c: char) -> bool {
    is_pn_chars_u(c) || c.is_ascii_digit()
}

// [160s] PN_CHARS ::= PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
fn is_pn_chars(c: char) -> bool {
    is_pn_chars_u(c)
        || matches!(c, '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

fn is_relaxed_label_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '<' | '>' | '"' | '.'))
}

fn is_lang_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

// [144s] LANGTAG ::= '@' [a-zA-Z]+ ('-' [a-zA-Z0-9]+)*
fn is_strict_langtag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let primary = parts.next().unwrap_or_default();
    !primary.is_empty()
        && primary.bytes().all(|b| b.is_ascii_alphabetic())
        && parts.all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_alphanumeric()))
}

fn is_relaxed_langtag(tag: &str) -> bool {
    !tag.is_empty()
}

fn is_strict_literal_char(c: char) -> bool {
    !matches!(c, '"' | '\\' | '\n' | '\r')
}

fn is_relaxed_literal_char(c: char) -> bool {
    c != '"'
}
