//! Translates command fields to 16-character binary words.
//!
//! ```text
//! A-instruction: 0vvv vvvv vvvv vvvv        v = 15-bit address
//! C-instruction: 111a cccc ccdd djjj        a+c = comp, d = dest, j = jump
//! ```
use thiserror::Error;

/// Largest value an A-instruction can carry.
pub const MAX_ADDRESS: u32 = 0x7FFF;

/// Destination mnemonics, indexed by their 3-bit code.
pub const DEST: [&str; 8] = ["", "M", "D", "MD", "A", "AM", "AD", "AMD"];

/// Jump mnemonics, indexed by their 3-bit code.
pub const JUMP: [&str; 8] = ["", "JGT", "JEQ", "JGE", "JLT", "JNE", "JLE", "JMP"];

/// Computation mnemonics and their 7-bit `a cccccc` codes.
/// The `a` bit selects M instead of A as the ALU's second input.
pub const COMP: [(&str, u8); 28] = [
    ("0",   0b0101010),
    ("1",   0b0111111),
    ("-1",  0b0111010),
    ("D",   0b0001100),
    ("A",   0b0110000),
    ("!D",  0b0001101),
    ("!A",  0b0110001),
    ("-D",  0b0001111),
    ("-A",  0b0110011),
    ("D+1", 0b0011111),
    ("A+1", 0b0110111),
    ("D-1", 0b0001110),
    ("A-1", 0b0110010),
    ("D+A", 0b0000010),
    ("D-A", 0b0010011),
    ("A-D", 0b0000111),
    ("D&A", 0b0000000),
    ("D|A", 0b0010101),
    ("M",   0b1110000),
    ("!M",  0b1110001),
    ("-M",  0b1110011),
    ("M+1", 0b1110111),
    ("M-1", 0b1110010),
    ("D+M", 0b1000010),
    ("D-M", 0b1010011),
    ("M-D", 0b1000111),
    ("D&M", 0b1000000),
    ("D|M", 0b1010101),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown computation `{0}`")]
    UnknownComputation(String),

    #[error("unknown destination `{0}`")]
    UnknownDestination(String),

    #[error("unknown jump condition `{0}`")]
    UnknownJump(String),

    #[error("{value} does not fit in {width} bits")]
    OutOfRange { value: u32, width: usize },
}

/// Encodes an A-instruction.
pub fn generate_a(addr: u32) -> Result<String, EncodeError> {
    if addr > MAX_ADDRESS {
        return Err(EncodeError::OutOfRange { value: addr, width: 15 });
    }
    Ok(format!("0{}", to_bits(addr, 15)?))
}

/// Encodes a C-instruction. Absent dest or jump fields encode as `000`.
pub fn generate_c(dest: Option<&str>, comp: &str, jump: Option<&str>) -> Result<String, EncodeError> {
    let comp_bits = to_bits(comp_code(comp)?.into(), 7)?;
    let dest_bits = to_bits(dest_code(dest.unwrap_or(""))?, 3)?;
    let jump_bits = to_bits(jump_code(jump.unwrap_or(""))?, 3)?;
    Ok(format!("111{}{}{}", comp_bits, dest_bits, jump_bits))
}

pub fn comp_code(comp: &str) -> Result<u8, EncodeError> {
    COMP.iter()
        .find(|(mnemonic, _)| *mnemonic == comp)
        .map(|(_, code)| *code)
        .ok_or_else(|| EncodeError::UnknownComputation(comp.to_owned()))
}

pub fn dest_code(dest: &str) -> Result<u32, EncodeError> {
    index_of(&DEST, dest).ok_or_else(|| EncodeError::UnknownDestination(dest.to_owned()))
}

pub fn jump_code(jump: &str) -> Result<u32, EncodeError> {
    index_of(&JUMP, jump).ok_or_else(|| EncodeError::UnknownJump(jump.to_owned()))
}

fn index_of(table: &[&str; 8], mnemonic: &str) -> Option<u32> {
    table.iter().position(|m| *m == mnemonic).map(|idx| idx as u32)
}

/// Formats `value` as exactly `width` binary digits, padded with zeros on the left.
/// Values that need more than `width` bits are rejected rather than truncated.
pub fn to_bits(value: u32, width: usize) -> Result<String, EncodeError> {
    if width < 32 && value >> width != 0 {
        return Err(EncodeError::OutOfRange { value, width });
    }
    Ok(format!("{:0width$b}", value, width = width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bits() {
        assert_eq!(to_bits(0, 3), Ok("000".to_owned()));
        assert_eq!(to_bits(5, 3), Ok("101".to_owned()));
        assert_eq!(to_bits(7, 3), Ok("111".to_owned()));
        assert_eq!(to_bits(8, 3), Err(EncodeError::OutOfRange { value: 8, width: 3 }));
        assert_eq!(to_bits(100, 15), Ok("000000001100100".to_owned()));
    }

    #[test]
    fn test_generate_a() {
        assert_eq!(generate_a(100), Ok("0000000001100100".to_owned()));
        assert_eq!(generate_a(0), Ok("0000000000000000".to_owned()));
        assert_eq!(generate_a(32767), Ok("0111111111111111".to_owned()));
        assert!(generate_a(32768).is_err());
        assert!(generate_a(u32::MAX).is_err());
    }

    #[test]
    fn test_generate_a_decodes_back() {
        for addr in (0..=MAX_ADDRESS).step_by(97).chain(std::iter::once(MAX_ADDRESS)) {
            let word = generate_a(addr).unwrap();
            assert_eq!(word.len(), 16);
            assert!(word.starts_with('0'));
            assert_eq!(u32::from_str_radix(&word[1..], 2), Ok(addr));
        }
    }

    #[test]
    fn test_generate_c() {
        assert_eq!(generate_c(Some("D"), "A", Some("JGT")), Ok("1110110000010001".to_owned()));
        assert_eq!(generate_c(Some("M"), "D+1", Some("JMP")), Ok("1110011111001111".to_owned()));
        assert_eq!(generate_c(Some("M"), "D", None), Ok("1110001100001000".to_owned()));
        assert_eq!(generate_c(Some("D"), "M", None), Ok("1111110000010000".to_owned()));
        assert_eq!(generate_c(None, "0", Some("JMP")), Ok("1110101010000111".to_owned()));
        assert_eq!(generate_c(Some("AMD"), "D|M", Some("JLE")), Ok("1111010101111110".to_owned()));
    }

    #[test]
    fn test_generate_c_fields_decode_back() {
        for (comp, code) in COMP.iter() {
            for (d, dest) in DEST.iter().enumerate() {
                for (j, jump) in JUMP.iter().enumerate() {
                    let dest = if dest.is_empty() { None } else { Some(*dest) };
                    let jump = if jump.is_empty() { None } else { Some(*jump) };
                    let word = generate_c(dest, comp, jump).unwrap();
                    assert_eq!(word.len(), 16);
                    assert!(word.starts_with("111"));
                    assert_eq!(u8::from_str_radix(&word[3..10], 2), Ok(*code));
                    assert_eq!(usize::from_str_radix(&word[10..13], 2), Ok(d));
                    assert_eq!(usize::from_str_radix(&word[13..16], 2), Ok(j));
                }
            }
        }
    }

    #[test]
    fn test_unknown_fields() {
        assert_eq!(generate_c(None, "D*A", None), Err(EncodeError::UnknownComputation("D*A".to_owned())));
        // Operand order matters: only A-D and M-D are defined for the reversed forms.
        assert!(generate_c(None, "A+D", None).is_err());
        assert_eq!(generate_c(Some("DM"), "D", None), Err(EncodeError::UnknownDestination("DM".to_owned())));
        assert_eq!(generate_c(None, "D", Some("JUMP")), Err(EncodeError::UnknownJump("JUMP".to_owned())));
    }

    #[test]
    fn test_comp_a_bit() {
        for (comp, code) in COMP.iter() {
            assert_eq!(code >> 6 == 1, comp.contains('M'), "a-bit of {}", comp);
        }
    }
}
