//! The Parser module takes the per-line token lists from the Lexer
//! and classifies each line as a `Command`.
//!
//! Parsing is single-pass per line with one token of lookahead.
use std::collections::VecDeque;
use super::ast::Command;
use super::error::{Error, Result};
use super::lexer::{Lexer, Token};

pub struct Parser {
    lexer: Lexer,
    tokens: VecDeque<Token>,
    line: usize,
    command: Option<Command>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser { lexer, tokens: VecDeque::new(), line: 0, command: None }
    }

    pub fn has_more_commands(&self) -> bool {
        self.lexer.has_more_lines()
    }

    /// Moves to the next line and parses it into the current command.
    /// Returns false if the line held no command; the previous command
    /// is cleared either way.
    pub fn advance(&mut self) -> Result<bool> {
        self.command = None;
        self.tokens.clear();

        let line = match self.lexer.next() {
            Some(line) => line,
            None => return Ok(false),
        };
        self.line = line.number;
        self.tokens = VecDeque::from(line.tokens);

        if let Some(bad) = self.tokens.iter().find(|t| matches!(t, Token::Invalid(_))) {
            return Err(Error::syntax(self.line, format!("invalid token `{}`", bad)));
        }

        let first = match self.consume() {
            Some(tok) => tok,
            None => {
                warn!("lexer returned an empty command on line {}", self.line);
                return Ok(false);
            }
        };

        let command = if first.is_op('@') {
            self.address()?
        } else if first.is_op('(') {
            self.label()?
        } else {
            self.compute(first)?
        };
        self.expect_end()?;

        self.command = Some(command);
        Ok(true)
    }

    /// The command produced by the last successful `advance`.
    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }

    /// The source line of the current command.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Parses `@value`. The `@` has already been consumed.
    fn address(&mut self) -> Result<Command> {
        self.operand("an address or symbol after `@`").map(Command::Address)
    }

    /// Parses `(name)`. The `(` has already been consumed.
    fn label(&mut self) -> Result<Command> {
        let name = match self.consume() {
            Some(Token::Identifier(name)) => name,
            Some(tok) => return Err(self.unexpected(&tok, "a label name after `(`")),
            None => return Err(Error::syntax(self.line, "expected a label name after `(`")),
        };

        if self.next_is(')') {
            self.consume();
        } else {
            warn!("label `{}` on line {} is missing its closing `)`", name, self.line);
        }

        Ok(Command::Label(name))
    }

    /// Parses `dest=comp;jump` starting from its first token.
    fn compute(&mut self, first: Token) -> Result<Command> {
        let (dest, start) = self.dest(first)?;
        let comp = self.comp(start)?;
        let jump = self.jump()?;
        Ok(Command::Compute { dest, comp, jump })
    }

    /// Splits off `dest=` if present and returns the first token of the computation.
    fn dest(&mut self, first: Token) -> Result<(Option<String>, Token)> {
        if !self.next_is('=') {
            return Ok((None, first));
        }
        self.consume();

        let dest = match first {
            Token::Identifier(dest) => dest,
            tok => return Err(self.unexpected(&tok, "a destination before `=`")),
        };
        let start = self.consume()
            .ok_or_else(|| Error::syntax(self.line, "expected a computation after `=`"))?;

        Ok((Some(dest), start))
    }

    /// A computation is a unary operator applied to an operand, or an
    /// operand optionally followed by one binary operator and a second operand.
    fn comp(&mut self, start: Token) -> Result<String> {
        match start {
            Token::Operator(op) if op == '-' || op == '!' => {
                let operand = self.operand("an operand after a unary operator")?;
                Ok(format!("{}{}", op, operand))
            }
            Token::Number(mut comp) | Token::Identifier(mut comp) => {
                if let Some(Token::Operator(op)) = self.peek().cloned() {
                    if op != ';' {
                        self.consume();
                        let rhs = self.operand("an operand after a binary operator")?;
                        comp.push(op);
                        comp.push_str(&rhs);
                    }
                }
                Ok(comp)
            }
            tok => Err(self.unexpected(&tok, "a computation")),
        }
    }

    fn jump(&mut self) -> Result<Option<String>> {
        if !self.next_is(';') {
            return Ok(None);
        }
        self.consume();

        match self.consume() {
            Some(Token::Identifier(jump)) => Ok(Some(jump)),
            Some(tok) => Err(self.unexpected(&tok, "a jump condition after `;`")),
            None => Err(Error::syntax(self.line, "expected a jump condition after `;`")),
        }
    }

    /// Consumes a numeric literal or identifier.
    fn operand(&mut self, expected: &str) -> Result<String> {
        match self.consume() {
            Some(Token::Number(s)) | Some(Token::Identifier(s)) => Ok(s),
            Some(tok) => Err(self.unexpected(&tok, expected)),
            None => Err(Error::syntax(self.line, format!("expected {}", expected))),
        }
    }

    /// Anything left over means the line is not a single well-formed command.
    fn expect_end(&mut self) -> Result<()> {
        match self.consume() {
            Some(tok) => Err(Error::syntax(self.line, format!("unexpected `{}` after command", tok))),
            None => Ok(()),
        }
    }

    fn unexpected(&self, tok: &Token, expected: &str) -> Error {
        Error::syntax(self.line, format!("expected {}, found `{}`", expected, tok))
    }

    /// Pops a token off the current line and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Returns true if the next token is the operator `op`.
    fn next_is(&self, op: char) -> bool {
        self.peek().map_or(false, |tok| tok.is_op(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser {
        Parser::new(Lexer::new(source))
    }

    /// Parses a single line and returns its command.
    fn parse(source: &str) -> Result<Command> {
        let mut p = parser(source);
        assert!(p.advance()?);
        Ok(p.command().cloned().expect("command after successful advance"))
    }

    fn compute(dest: Option<&str>, comp: &str, jump: Option<&str>) -> Command {
        Command::Compute {
            dest: dest.map(str::to_owned),
            comp: comp.to_owned(),
            jump: jump.map(str::to_owned),
        }
    }

    #[test]
    fn test_address() {
        assert_eq!(parse("@100").unwrap(), Command::Address("100".to_owned()));
        assert_eq!(parse("@LOOP").unwrap(), Command::Address("LOOP".to_owned()));
        assert_eq!(parse("@ R13").unwrap(), Command::Address("R13".to_owned()));
        assert!(parse("@").is_err());
        assert!(parse("@=").is_err());
        assert!(parse("@1 2").is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(parse("(LOOP)").unwrap(), Command::Label("LOOP".to_owned()));
        assert_eq!(parse("(END").unwrap(), Command::Label("END".to_owned()));
        assert!(parse("(12)").is_err());
        assert!(parse("()").is_err());
        assert!(parse("(A) D").is_err());
    }

    #[test]
    fn test_compute() {
        assert_eq!(parse("D=A").unwrap(), compute(Some("D"), "A", None));
        assert_eq!(parse("AM=M-1").unwrap(), compute(Some("AM"), "M-1", None));
        assert_eq!(parse("D;JGT").unwrap(), compute(None, "D", Some("JGT")));
        assert_eq!(parse("0;JMP").unwrap(), compute(None, "0", Some("JMP")));
        assert_eq!(parse("M=D+1").unwrap(), compute(Some("M"), "D+1", None));
        assert_eq!(parse("D=-1").unwrap(), compute(Some("D"), "-1", None));
        assert_eq!(parse("M=!M").unwrap(), compute(Some("M"), "!M", None));
        assert_eq!(parse("D=D&A;JEQ").unwrap(), compute(Some("D"), "D&A", Some("JEQ")));
        assert_eq!(parse("-D;JLT").unwrap(), compute(None, "-D", Some("JLT")));
        assert_eq!(parse("M = D | M ; JNE").unwrap(), compute(Some("M"), "D|M", Some("JNE")));
    }

    #[test]
    fn test_compute_rejects_malformed() {
        // More than one binary operator is not part of the grammar.
        assert!(matches!(parse("D=D+A+1"), Err(Error::Syntax { line: 1, .. })));
        assert!(matches!(parse("D=-A+1"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("D="), Err(Error::Syntax { .. })));
        assert!(matches!(parse("D=D+"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("D;"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("D;5"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("1=A"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("=A"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("D=A;JMP;JMP"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_invalid_token() {
        let mut p = parser("\n\nD=A#");
        match p.advance() {
            Err(Error::Syntax { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains('#'));
            }
            other => panic!("expected a syntax error, got {:?}", other),
        }
        assert!(p.command().is_none());
    }

    #[test]
    fn test_advance_clears_previous_command() {
        let mut p = parser("@100\nD=A\n(LOOP)\nD=D+A+1\n");

        assert!(p.has_more_commands());
        assert_eq!(p.advance().unwrap(), true);
        assert_eq!(p.command().and_then(Command::symbol), Some("100"));
        assert_eq!(p.line(), 1);

        assert_eq!(p.advance().unwrap(), true);
        assert_eq!(p.command().and_then(Command::symbol), None);
        assert_eq!(p.command().and_then(Command::dest), Some("D"));

        assert_eq!(p.advance().unwrap(), true);
        assert_eq!(p.command(), Some(&Command::Label("LOOP".to_owned())));

        assert!(p.advance().is_err());
        assert_eq!(p.command(), None);
        assert_eq!(p.line(), 4);

        assert!(!p.has_more_commands());
        assert_eq!(p.advance().unwrap(), false);
    }
}
