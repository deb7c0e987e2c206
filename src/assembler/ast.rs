//! This AST describes one parsed line of Hack assembly.
//!
//! Execution begins with the first instruction in the file.
//! Comments are prefixed with `//` and are single-line only.
//! Commands are delimited by newlines.
//!
//! Supported commands:
//!
//! ```nasm
//! @21          // A-instruction: load a literal into A
//! @LOOP        // A-instruction: load a label or variable address into A
//! D=M+1;JGT    // C-instruction: dest=comp;jump, dest and jump optional
//! 0;JMP        // C-instruction without a destination
//! (LOOP)       // Label: binds LOOP to the next instruction's address
//! ```

use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// `@value`, where value is a decimal literal or a symbol.
    Address(String),
    /// `dest=comp;jump`.
    Compute {
        dest: Option<String>,
        comp: String,
        jump: Option<String>,
    },
    /// `(name)`.
    Label(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Address(value) => write!(f, "@{}", value),
            Command::Label(name) => write!(f, "({})", name),
            Command::Compute { dest, comp, jump } => {
                if let Some(dest) = dest {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}

impl Command {
    /// The symbol or literal of an address or label command.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Command::Address(s) | Command::Label(s) => Some(s),
            Command::Compute { .. } => None,
        }
    }

    pub fn dest(&self) -> Option<&str> {
        match self {
            Command::Compute { dest, .. } => dest.as_deref(),
            _ => None,
        }
    }

    pub fn comp(&self) -> Option<&str> {
        match self {
            Command::Compute { comp, .. } => Some(comp),
            _ => None,
        }
    }

    pub fn jump(&self) -> Option<&str> {
        match self {
            Command::Compute { jump, .. } => jump.as_deref(),
            _ => None,
        }
    }

    /// Labels occupy no ROM word; everything else is one instruction.
    pub fn is_instruction(&self) -> bool {
        !matches!(self, Command::Label(_))
    }
}
