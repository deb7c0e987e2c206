//! This lexer tokenizes Hack assembly.
use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{Error, Result};

/// Comments run from this marker to the end of the line.
const COMMENT: &str = "//";

// Alternatives are tried left to right, which gives numbers priority over
// operators and operators priority over identifiers. The last group catches
// every other run of non-blank characters so nothing is dropped silently.
static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<num>[0-9]+)",
        r"|(?P<op>[=;()@+\-&|!])",
        r"|(?P<id>[A-Za-z_.$:][A-Za-z0-9_.$:]*)",
        r"|(?P<bad>[^\sA-Za-z0-9_.$:=;()@+\-&|!]+)",
    ))
    .expect("token grammar is a valid regex")
});

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Number(String),
    Identifier(String),
    Operator(char),
    Invalid(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(s) | Token::Identifier(s) | Token::Invalid(s) => write!(f, "{}", s),
            Token::Operator(c) => write!(f, "{}", c),
        }
    }
}

impl Token {
    /// Returns true if this is the operator `op`.
    pub fn is_op(&self, op: char) -> bool {
        matches!(self, Token::Operator(c) if *c == op)
    }
}

/// The tokens of a single source line, tagged with its 1-based line number.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line {
    pub number: usize,
    pub tokens: Vec<Token>,
}

/// Hands out one `Line` per non-blank, non-comment source line, in order.
/// Once drained it cannot be rewound; build a new one for another pass.
pub struct Lexer {
    lines: VecDeque<Line>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer { lines: tokenize(source) }
    }

    pub fn has_more_lines(&self) -> bool {
        !self.lines.is_empty()
    }
}

impl Iterator for Lexer {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        self.lines.pop_front()
    }
}

/// Reads a whole source file into memory.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let read_err = |source| Error::SourceRead { path: path.to_path_buf(), source };

    let mut file = File::open(path).map_err(read_err)?;
    let mut source = String::new();
    file.read_to_string(&mut source).map_err(read_err)?;
    Ok(source)
}

pub fn tokenize(source: &str) -> VecDeque<Line> {
    let mut out: VecDeque<Line> = VecDeque::with_capacity(256);

    for (index, line) in source.lines().enumerate() {
        let code = strip_comment(line);
        if code.is_empty() {
            continue;
        }
        out.push_back(Line { number: index + 1, tokens: tokenize_line(code) });
    }

    out
}

/// Removes everything from the first comment marker onward and trims the rest.
fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

fn tokenize_line(line: &str) -> Vec<Token> {
    WORD.captures_iter(line)
        .filter_map(|caps| {
            if let Some(m) = caps.name("num") {
                Some(Token::Number(m.as_str().to_owned()))
            } else if let Some(m) = caps.name("op") {
                m.as_str().chars().next().map(Token::Operator)
            } else if let Some(m) = caps.name("id") {
                Some(Token::Identifier(m.as_str().to_owned()))
            } else {
                caps.name("bad").map(|m| Token::Invalid(m.as_str().to_owned()))
            }
        })
        .collect()
}
