use std::fmt;

use crate::instruction::Instruction;
use crate::opcode;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipEqImm { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipNeImm { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            AddImm { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, .. } => write!(f, "SHR V{:X}", x),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, .. } => write!(f, "SHL V{:X}", x),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadI { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipKeyReleased { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "DATA {:#06X}", op),
        }
    }
}

/// One decoded word of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub address: u16,
    pub word: u16,
    pub instruction: Instruction,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:#05X}  {:04X}  {}",
            self.address, self.word, self.instruction
        )
    }
}

/// Decodes `bytes` two at a time as if they were loaded at `origin`.
///
/// A trailing odd byte is padded with zero and shows up as data.
pub fn disassemble(bytes: &[u8], origin: u16) -> Vec<Line> {
    bytes
        .chunks(2)
        .enumerate()
        .map(|(index, pair)| {
            let word = opcode::from_bytes(pair[0], pair.get(1).copied().unwrap_or(0));
            let instruction = match (pair.len(), Instruction::decode(word)) {
                (1, _) => Instruction::Unknown(word),
                (_, instruction) => instruction,
            };
            Line {
                address: origin.wrapping_add(2 * index as u16),
                word,
                instruction,
            }
        })
        .collect()
}
