//! Drives the two assembly passes.
//!
//! The first pass walks every command to bind labels to ROM addresses.
//! The second pass walks them again, allocates RAM for variables on first
//! use and encodes each instruction. Both passes re-tokenize the same source
//! text, so the file is read only once.
use std::convert::TryFrom;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::ast::Command;
use super::codegen::{self, EncodeError};
use super::error::{Error, Result};
use super::lexer::{self, Lexer};
use super::parser::Parser;
use super::symbols::{Address, SymbolTable, VARIABLE_BASE};

/// Extension given to assembled output files.
pub const OUTPUT_EXTENSION: &str = "hack";

/// One emitted machine word and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    /// ROM address of the instruction.
    pub address: usize,
    /// 1-based source line.
    pub line: usize,
    pub command: Command,
    pub bits: String,
}

/// The result of a successful assembly run.
#[derive(Debug)]
pub struct Program {
    words: Vec<Word>,
    symbols: SymbolTable,
}

impl Program {
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The symbol table as it stood at the end of the second pass.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// One binary word per line, each terminated by a newline.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 17);
        for word in &self.words {
            out.push_str(&word.bits);
            out.push('\n');
        }
        out
    }
}

/// State for a single assembly run. Consumed by `run`.
pub struct Assembler {
    symbols: SymbolTable,
    next_variable: u32,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Assembler { symbols: SymbolTable::new(), next_variable: VARIABLE_BASE.into() }
    }

    /// Assembles `source`, consuming the assembler.
    pub fn run(mut self, source: &str) -> Result<Program> {
        debug!("pass 1: collecting labels");
        self.collect_labels(Parser::new(Lexer::new(source)))?;

        debug!("pass 2: emitting code");
        let words = self.emit(Parser::new(Lexer::new(source)))?;

        info!("assembled {} instruction(s), {} symbol(s)", words.len(), self.symbols.len());
        Ok(Program { words, symbols: self.symbols })
    }

    /// Binds every label to the ROM address of the instruction that follows it.
    fn collect_labels(&mut self, mut parser: Parser) -> Result<()> {
        let mut pc: usize = 0;

        while parser.has_more_commands() {
            if !parser.advance()? {
                continue;
            }
            match parser.command() {
                Some(Command::Label(name)) => {
                    let addr = Address::try_from(pc).map_err(|_| Error::AddressRange {
                        line: parser.line(),
                        value: pc.to_string(),
                    })?;
                    if let Some(prev) = self.symbols.get(name) {
                        debug!("label `{}` on line {} rebinds {} to {}", name, parser.line(), prev, addr);
                    } else {
                        debug!("label `{}` = {}", name, addr);
                    }
                    self.symbols.insert(name.as_str(), addr);
                }
                Some(_) => pc += 1,
                None => {}
            }
        }

        Ok(())
    }

    /// Encodes every instruction in source order.
    fn emit(&mut self, mut parser: Parser) -> Result<Vec<Word>> {
        let mut words = Vec::new();

        while parser.has_more_commands() {
            if !parser.advance()? {
                continue;
            }
            let line = parser.line();
            let command = match parser.command() {
                Some(command) => command,
                None => continue,
            };

            let bits = match command {
                Command::Label(_) => continue,
                Command::Address(symbol) => {
                    let addr = self.resolve(symbol, line)?;
                    codegen::generate_a(addr)
                }
                Command::Compute { dest, comp, jump } => {
                    codegen::generate_c(dest.as_deref(), comp, jump.as_deref())
                }
            }
            .map_err(|err| encode_error(line, err))?;

            words.push(Word { address: words.len(), line, command: command.clone(), bits });
        }

        Ok(words)
    }

    /// Turns an address field into a number, allocating a variable if needed.
    fn resolve(&mut self, symbol: &str, line: usize) -> Result<u32> {
        if symbol.bytes().all(|b| b.is_ascii_digit()) {
            return symbol.parse::<u32>()
                .map_err(|_| Error::AddressRange { line, value: symbol.to_owned() });
        }

        if !self.symbols.contains(symbol) {
            let addr = Address::try_from(self.next_variable).map_err(|_| Error::AddressRange {
                line,
                value: self.next_variable.to_string(),
            })?;
            debug!("variable `{}` = {}", symbol, addr);
            self.symbols.insert(symbol, addr);
            self.next_variable += 1;
        }

        self.symbols.get(symbol)
            .map(u32::from)
            .ok_or_else(|| Error::SymbolLookup { line, symbol: symbol.to_owned() })
    }
}

fn encode_error(line: usize, err: EncodeError) -> Error {
    match err {
        EncodeError::UnknownComputation(comp) => Error::UnknownComputation { line, comp },
        EncodeError::UnknownDestination(dest) => Error::UnknownDestination { line, dest },
        EncodeError::UnknownJump(jump) => Error::UnknownJump { line, jump },
        EncodeError::OutOfRange { value, .. } => Error::AddressRange { line, value: value.to_string() },
    }
}

/// The default output path: `input` with its extension replaced by `.hack`.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Assembles the file at `input` and writes the words to `output`, or to
/// the sibling `.hack` file when no output is given.
/// Nothing is written unless the whole file assembles.
pub fn assemble_file(input: &Path, output: Option<&Path>) -> Result<(Program, PathBuf)> {
    let source = lexer::read_source(input)?;
    let program = Assembler::new().run(&source)?;

    let opath = match output {
        Some(path) => path.to_path_buf(),
        None => output_path(input),
    };
    if opath.exists() {
        warn!("`{}` already exists and will be overwritten", opath.display());
    } else {
        info!("creating `{}`", opath.display());
    }

    write_output(&opath, &program.to_text())?;
    Ok((program, opath))
}

/// Writes to a temporary sibling and renames it over `path` once complete.
fn write_output(path: &Path, text: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(text.as_bytes())?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(Error::OutputWrite { path: path.to_path_buf(), source });
    }
    Ok(())
}
