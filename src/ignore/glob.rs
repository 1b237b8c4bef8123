//! Compiled gitignore globs
//!
//! A glob is compiled once into a list of path segments. Each segment is either
//! the any-depth marker (`**`) or a short program of typed tokens that is
//! matched against exactly one path segment, so no token can ever cross a `/`.

/// A compiled glob, split on `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    segments: Vec<Segment>,
}

/// One `/`-separated piece of a glob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `**` on its own: zero or more whole segments
    AnyDepth,
    /// Plain text with no wildcard
    Literal(String),
    /// Text with at least one wildcard or class
    Wild(Vec<Token>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Char(char),
    /// `?`
    AnyChar,
    /// `*` (runs of `*` inside a segment collapse to one)
    Star,
    Class(CharClass),
}

/// A bracket expression such as `[a-z]` or `[!0-9_]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    negated: bool,
    items: Vec<ClassItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassItem {
    Char(char),
    Range(char, char),
    Named(NamedClass),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedClass {
    Alnum,
    Alpha,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Xdigit,
}

impl NamedClass {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "alnum" => NamedClass::Alnum,
            "alpha" => NamedClass::Alpha,
            "blank" => NamedClass::Blank,
            "cntrl" => NamedClass::Cntrl,
            "digit" => NamedClass::Digit,
            "graph" => NamedClass::Graph,
            "lower" => NamedClass::Lower,
            "print" => NamedClass::Print,
            "punct" => NamedClass::Punct,
            "space" => NamedClass::Space,
            "upper" => NamedClass::Upper,
            "xdigit" => NamedClass::Xdigit,
            _ => return None,
        })
    }

    fn contains(self, c: char) -> bool {
        match self {
            NamedClass::Alnum => c.is_ascii_alphanumeric(),
            NamedClass::Alpha => c.is_ascii_alphabetic(),
            NamedClass::Blank => c == ' ' || c == '\t',
            NamedClass::Cntrl => c.is_ascii_control(),
            NamedClass::Digit => c.is_ascii_digit(),
            NamedClass::Graph => c.is_ascii_graphic(),
            NamedClass::Lower => c.is_ascii_lowercase(),
            NamedClass::Print => c.is_ascii_graphic() || c == ' ',
            NamedClass::Punct => c.is_ascii_punctuation(),
            NamedClass::Space => c.is_ascii_whitespace() || c == '\x0b',
            NamedClass::Upper => c.is_ascii_uppercase(),
            NamedClass::Xdigit => c.is_ascii_hexdigit(),
        }
    }
}

impl CharClass {
    fn matches(&self, c: char) -> bool {
        let hit = self.items.iter().any(|item| match *item {
            ClassItem::Char(x) => x == c,
            ClassItem::Range(lo, hi) => lo <= c && c <= hi,
            ClassItem::Named(named) => named.contains(c),
        });
        hit != self.negated
    }
}

impl Token {
    fn matches_char(&self, c: char) -> bool {
        match self {
            Token::Char(x) => *x == c,
            Token::AnyChar => true,
            Token::Class(class) => class.matches(c),
            Token::Star => false,
        }
    }
}

impl Segment {
    /// Match one path segment (never `AnyDepth`, which is handled by the caller)
    fn matches(&self, name: &str) -> bool {
        match self {
            Segment::AnyDepth => true,
            Segment::Literal(text) => text == name,
            Segment::Wild(tokens) => {
                let chars: Vec<char> = name.chars().collect();
                match_tokens(tokens, &chars)
            }
        }
    }
}

/// Wildcard match of a token program against one segment.
///
/// Greedy scan with a single backtrack point: on mismatch, resume just after
/// the most recent `*` with one more character consumed by it.
fn match_tokens(tokens: &[Token], text: &[char]) -> bool {
    let mut t = 0;
    let mut s = 0;
    let mut backtrack: Option<(usize, usize)> = None;

    while s < text.len() {
        match tokens.get(t) {
            Some(Token::Star) => {
                backtrack = Some((t, s));
                t += 1;
                continue;
            }
            Some(token) if token.matches_char(text[s]) => {
                t += 1;
                s += 1;
                continue;
            }
            _ => {}
        }

        match backtrack {
            Some((star, consumed)) => {
                t = star + 1;
                s = consumed + 1;
                backtrack = Some((star, consumed + 1));
            }
            None => return false,
        }
    }

    tokens[t..].iter().all(|token| matches!(token, Token::Star))
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((segment, rest)) => match path.split_first() {
            Some((first, tail)) => segment.matches(first) && match_segments(rest, tail),
            None => false,
        },
    }
}

impl Glob {
    /// Compile glob text. The returned flag is `true` when part of the text
    /// was malformed and had to be read literally.
    pub fn compile(text: &str) -> (Self, bool) {
        let mut malformed = false;
        let segments = text
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                let (segment, bad) = compile_segment(s);
                malformed |= bad;
                segment
            })
            .collect();

        (Glob { segments }, malformed)
    }

    /// Compiled segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the glob consumes exactly `path`, segment for segment
    pub fn matches_segments(&self, path: &[&str]) -> bool {
        !self.segments.is_empty() && match_segments(&self.segments, path)
    }
}

fn compile_segment(text: &str) -> (Segment, bool) {
    if text == "**" {
        return (Segment::AnyDepth, false);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut malformed = false;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                // A lone trailing backslash stands for itself
                match chars.get(i + 1) {
                    Some(&next) => {
                        tokens.push(Token::Char(next));
                        i += 2;
                    }
                    None => {
                        tokens.push(Token::Char('\\'));
                        i += 1;
                    }
                }
            }
            '*' => {
                if !matches!(tokens.last(), Some(Token::Star)) {
                    tokens.push(Token::Star);
                }
                i += 1;
            }
            '?' => {
                tokens.push(Token::AnyChar);
                i += 1;
            }
            '[' => match parse_class(&chars, i + 1) {
                Some((class, next)) => {
                    tokens.push(Token::Class(class));
                    i = next;
                }
                None => {
                    malformed = true;
                    tokens.push(Token::Char('['));
                    i += 1;
                }
            },
            c => {
                tokens.push(Token::Char(c));
                i += 1;
            }
        }
    }

    if tokens.iter().all(|t| matches!(t, Token::Char(_))) {
        let literal = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Char(c) => Some(*c),
                _ => None,
            })
            .collect();
        return (Segment::Literal(literal), malformed);
    }

    (Segment::Wild(tokens), malformed)
}

/// Parse a bracket expression starting just after `[`.
///
/// Returns the class and the index after the closing `]`, or `None` when the
/// expression is unterminated or names an unknown `[:class:]`.
fn parse_class(chars: &[char], start: usize) -> Option<(CharClass, usize)> {
    let mut i = start;
    let mut negated = false;
    if matches!(chars.get(i), Some('!') | Some('^')) {
        negated = true;
        i += 1;
    }

    let mut items = Vec::new();
    let mut first = true;

    loop {
        let c = *chars.get(i)?;

        if c == ']' && !first {
            return Some((CharClass { negated, items }, i + 1));
        }
        first = false;

        if c == '[' && chars.get(i + 1) == Some(&':') {
            let rest = &chars[i + 2..];
            let close = rest.windows(2).position(|w| w == [':', ']'])?;
            let name: String = rest[..close].iter().collect();
            items.push(ClassItem::Named(NamedClass::parse(&name)?));
            i += 2 + close + 2;
            continue;
        }

        let (low, after_low) = class_char(chars, i)?;

        // `a-z`; a `-` right before `]` is a plain dash
        if chars.get(after_low) == Some(&'-')
            && chars.get(after_low + 1).is_some_and(|&n| n != ']')
        {
            let (high, after_high) = class_char(chars, after_low + 1)?;
            items.push(ClassItem::Range(low, high));
            i = after_high;
        } else {
            items.push(ClassItem::Char(low));
            i = after_low;
        }
    }
}

fn class_char(chars: &[char], i: usize) -> Option<(char, usize)> {
    match *chars.get(i)? {
        '\\' => chars.get(i + 1).map(|&c| (c, i + 2)),
        c => Some((c, i + 1)),
    }
}
