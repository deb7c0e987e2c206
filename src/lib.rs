//! hasm assembles Hack assembly (`.asm`) into Hack binary text (`.hack`).
//!
//! ```
//! use hasm::assembler::passes::Assembler;
//!
//! let program = Assembler::new().run("@2\nD=A\n").unwrap();
//! assert_eq!(program.to_text(), "0000000000000010\n1110110000010000\n");
//! ```

#[macro_use] extern crate log;

pub mod assembler;
