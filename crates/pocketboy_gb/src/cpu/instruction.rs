//! Opcode decoding.
//!
//! Both opcode spaces are decoded once, at compile time, into 256-entry
//! tables of [`Instruction`] / [`CbInstruction`] descriptors. The executor
//! only ever matches on the descriptor, and instruction timing is a property
//! of the descriptor rather than of the handler that runs it.

use std::fmt;

/// 8-bit operand in the standard register order used by opcode tables:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlIndirect,
    A,
}

impl Reg8 {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Self::B,
            1 => Self::C,
            2 => Self::D,
            3 => Self::E,
            4 => Self::H,
            5 => Self::L,
            6 => Self::HlIndirect,
            _ => Self::A,
        }
    }

    #[inline]
    pub const fn is_memory(self) -> bool {
        matches!(self, Self::HlIndirect)
    }
}

/// Register pairs addressed by 16-bit loads and arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
}

impl Reg16 {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Self::BC,
            1 => Self::DE,
            2 => Self::HL,
            _ => Self::SP,
        }
    }
}

/// Register pairs addressed by PUSH/POP, where AF replaces SP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16Stack {
    BC,
    DE,
    HL,
    AF,
}

impl Reg16Stack {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Self::BC,
            1 => Self::DE,
            2 => Self::HL,
            _ => Self::AF,
        }
    }
}

/// Branch conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Self::NZ,
            1 => Self::Z,
            2 => Self::NC,
            _ => Self::C,
        }
    }
}

/// Register-indirect addressing used by `LD (rr),A` / `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    BC,
    DE,
    /// (HL) followed by HL += 1.
    HlInc,
    /// (HL) followed by HL -= 1.
    HlDec,
}

impl Indirect {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Self::BC,
            1 => Self::DE,
            2 => Self::HlInc,
            _ => Self::HlDec,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Self::Add,
            1 => Self::Adc,
            2 => Self::Sub,
            3 => Self::Sbc,
            4 => Self::And,
            5 => Self::Xor,
            6 => Self::Or,
            _ => Self::Cp,
        }
    }
}

/// A decoded main-table opcode. Immediate operands are fetched by the
/// executor; the descriptor only says how many and what to do with them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    /// `LD r,r'`, including the (HL) forms.
    Ld { dst: Reg8, src: Reg8 },
    /// `LD r,d8`
    LdImm(Reg8),
    /// `LD rr,d16`
    LdImm16(Reg16),
    /// `LD (rr),A`
    StoreA(Indirect),
    /// `LD A,(rr)`
    LoadA(Indirect),
    /// `LD (a16),SP`
    StoreSp,
    /// `LDH (a8),A`
    StoreHigh,
    /// `LDH A,(a8)`
    LoadHigh,
    /// `LD (C),A`
    StoreHighC,
    /// `LD A,(C)`
    LoadHighC,
    /// `LD (a16),A`
    StoreAbs,
    /// `LD A,(a16)`
    LoadAbs,
    /// `LD SP,HL`
    LdSpHl,
    /// `LD HL,SP+e8`
    LdHlSpOffset,
    /// `ADD SP,e8`
    AddSpOffset,
    Alu(AluOp, Reg8),
    AluImm(AluOp),
    Inc(Reg8),
    Dec(Reg8),
    Inc16(Reg16),
    Dec16(Reg16),
    AddHl(Reg16),
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,
    Jr(Option<Cond>),
    Jp(Option<Cond>),
    JpHl,
    Call(Option<Cond>),
    Ret(Option<Cond>),
    Reti,
    /// Call to a fixed vector (0x00, 0x08, ..., 0x38).
    Rst(u8),
    Push(Reg16Stack),
    Pop(Reg16Stack),
    /// 0xCB: the next byte selects a [`CbInstruction`].
    PrefixCb,
}

impl Instruction {
    /// Documented T-cycle cost. `branch_taken` only matters for branches;
    /// unconditional branches are always executed with it set.
    pub const fn cycles(self, branch_taken: bool) -> u32 {
        use Instruction::*;
        match self {
            Nop | Stop | Halt | Di | Ei => 4,
            Ld { dst, src } => {
                if dst.is_memory() || src.is_memory() {
                    8
                } else {
                    4
                }
            }
            LdImm(r) => {
                if r.is_memory() {
                    12
                } else {
                    8
                }
            }
            LdImm16(_) => 12,
            StoreA(_) | LoadA(_) => 8,
            StoreSp => 20,
            StoreHigh | LoadHigh => 12,
            StoreHighC | LoadHighC => 8,
            StoreAbs | LoadAbs => 16,
            LdSpHl => 8,
            LdHlSpOffset => 12,
            AddSpOffset => 16,
            Alu(_, r) => {
                if r.is_memory() {
                    8
                } else {
                    4
                }
            }
            AluImm(_) => 8,
            Inc(r) | Dec(r) => {
                if r.is_memory() {
                    12
                } else {
                    4
                }
            }
            Inc16(_) | Dec16(_) | AddHl(_) => 8,
            Rlca | Rrca | Rla | Rra | Daa | Cpl | Scf | Ccf => 4,
            Jr(_) => {
                if branch_taken {
                    12
                } else {
                    8
                }
            }
            Jp(_) => {
                if branch_taken {
                    16
                } else {
                    12
                }
            }
            JpHl => 4,
            Call(_) => {
                if branch_taken {
                    24
                } else {
                    12
                }
            }
            Ret(None) | Reti => 16,
            Ret(Some(_)) => {
                if branch_taken {
                    20
                } else {
                    8
                }
            }
            Rst(_) => 16,
            Push(_) => 16,
            Pop(_) => 12,
            // The prefix fetch is folded into the CB instruction's own cost.
            PrefixCb => 0,
        }
    }

    /// Encoded length in bytes, including the opcode.
    pub const fn length(self) -> u16 {
        use Instruction::*;
        match self {
            LdImm(_) | StoreHigh | LoadHigh | LdHlSpOffset | AddSpOffset | AluImm(_) | Jr(_)
            | Stop | PrefixCb => 2,
            LdImm16(_) | StoreSp | StoreAbs | LoadAbs | Jp(_) | Call(_) => 3,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CbOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
    Bit(u8),
    Res(u8),
    Set(u8),
}

/// A decoded CB-prefixed opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CbInstruction {
    pub op: CbOp,
    pub target: Reg8,
}

impl CbInstruction {
    /// T-cycle cost including the 0xCB prefix fetch. (HL) operands cost
    /// double the register form.
    pub const fn cycles(self) -> u32 {
        if self.target.is_memory() {
            16
        } else {
            8
        }
    }
}

const fn decode_main(opcode: u8) -> Option<Instruction> {
    use Instruction::*;

    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = (opcode >> 4) & 0x03;
    let cc = Cond::from_index(y);

    let instruction = match opcode {
        0x00 => Nop,
        0x10 => Stop,
        0x76 => Halt,
        0xF3 => Di,
        0xFB => Ei,

        0x01 | 0x11 | 0x21 | 0x31 => LdImm16(Reg16::from_index(p)),
        0x02 | 0x12 | 0x22 | 0x32 => StoreA(Indirect::from_index(p)),
        0x0A | 0x1A | 0x2A | 0x3A => LoadA(Indirect::from_index(p)),
        0x03 | 0x13 | 0x23 | 0x33 => Inc16(Reg16::from_index(p)),
        0x0B | 0x1B | 0x2B | 0x3B => Dec16(Reg16::from_index(p)),
        0x09 | 0x19 | 0x29 | 0x39 => AddHl(Reg16::from_index(p)),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => Inc(Reg8::from_index(y)),
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => Dec(Reg8::from_index(y)),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => LdImm(Reg8::from_index(y)),

        0x07 => Rlca,
        0x0F => Rrca,
        0x17 => Rla,
        0x1F => Rra,
        0x27 => Daa,
        0x2F => Cpl,
        0x37 => Scf,
        0x3F => Ccf,

        0x08 => StoreSp,
        0x18 => Jr(None),
        0x20 | 0x28 | 0x30 | 0x38 => Jr(Some(Cond::from_index(y & 0x03))),

        // 0x76 (HALT) is matched above.
        0x40..=0x7F => Ld {
            dst: Reg8::from_index(y),
            src: Reg8::from_index(z),
        },
        0x80..=0xBF => Alu(AluOp::from_index(y), Reg8::from_index(z)),
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => AluImm(AluOp::from_index(y)),

        0xC0 | 0xC8 | 0xD0 | 0xD8 => Ret(Some(cc)),
        0xC9 => Ret(None),
        0xD9 => Reti,
        0xC2 | 0xCA | 0xD2 | 0xDA => Jp(Some(cc)),
        0xC3 => Jp(None),
        0xE9 => JpHl,
        0xC4 | 0xCC | 0xD4 | 0xDC => Call(Some(cc)),
        0xCD => Call(None),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => Pop(Reg16Stack::from_index(p)),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => Push(Reg16Stack::from_index(p)),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => Rst(opcode & 0x38),
        0xCB => PrefixCb,

        0xE0 => StoreHigh,
        0xF0 => LoadHigh,
        0xE2 => StoreHighC,
        0xF2 => LoadHighC,
        0xEA => StoreAbs,
        0xFA => LoadAbs,
        0xE8 => AddSpOffset,
        0xF8 => LdHlSpOffset,
        0xF9 => LdSpHl,

        // Opcode holes: D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD.
        _ => return None,
    };
    Some(instruction)
}

const fn decode_prefixed(opcode: u8) -> CbInstruction {
    let y = (opcode >> 3) & 0x07;
    let op = match opcode >> 6 {
        0 => match y {
            0 => CbOp::Rlc,
            1 => CbOp::Rrc,
            2 => CbOp::Rl,
            3 => CbOp::Rr,
            4 => CbOp::Sla,
            5 => CbOp::Sra,
            6 => CbOp::Swap,
            _ => CbOp::Srl,
        },
        1 => CbOp::Bit(y),
        2 => CbOp::Res(y),
        _ => CbOp::Set(y),
    };
    CbInstruction {
        op,
        target: Reg8::from_index(opcode),
    }
}

const fn build_main_table() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_main(i as u8);
        i += 1;
    }
    table
}

const fn build_cb_table() -> [CbInstruction; 256] {
    let mut table = [decode_prefixed(0); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_prefixed(i as u8);
        i += 1;
    }
    table
}

static MAIN_TABLE: [Option<Instruction>; 256] = build_main_table();
static CB_TABLE: [CbInstruction; 256] = build_cb_table();

/// Look up a main-table opcode. `None` marks an unused opcode.
#[inline]
pub fn decode(opcode: u8) -> Option<Instruction> {
    MAIN_TABLE[opcode as usize]
}

/// Look up the opcode that follows a 0xCB prefix. Every byte is valid.
#[inline]
pub fn decode_cb(opcode: u8) -> CbInstruction {
    CB_TABLE[opcode as usize]
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
            Reg8::HlIndirect => "(HL)",
            Reg8::A => "A",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => "HL",
            Reg16::SP => "SP",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Reg16Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg16Stack::BC => "BC",
            Reg16Stack::DE => "DE",
            Reg16Stack::HL => "HL",
            Reg16Stack::AF => "AF",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Indirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HlInc => "(HL+)",
            Indirect::HlDec => "(HL-)",
        };
        f.write_str(name)
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        };
        f.write_str(name)
    }
}

fn write_branch(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    cond: Option<Cond>,
    operand: &str,
) -> fmt::Result {
    match (cond, operand.is_empty()) {
        (Some(cc), true) => write!(f, "{name} {cc}"),
        (Some(cc), false) => write!(f, "{name} {cc},{operand}"),
        (None, true) => f.write_str(name),
        (None, false) => write!(f, "{name} {operand}"),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Nop => f.write_str("NOP"),
            Stop => f.write_str("STOP"),
            Halt => f.write_str("HALT"),
            Di => f.write_str("DI"),
            Ei => f.write_str("EI"),
            Ld { dst, src } => write!(f, "LD {dst},{src}"),
            LdImm(r) => write!(f, "LD {r},d8"),
            LdImm16(rr) => write!(f, "LD {rr},d16"),
            StoreA(ind) => write!(f, "LD {ind},A"),
            LoadA(ind) => write!(f, "LD A,{ind}"),
            StoreSp => f.write_str("LD (a16),SP"),
            StoreHigh => f.write_str("LDH (a8),A"),
            LoadHigh => f.write_str("LDH A,(a8)"),
            StoreHighC => f.write_str("LD (C),A"),
            LoadHighC => f.write_str("LD A,(C)"),
            StoreAbs => f.write_str("LD (a16),A"),
            LoadAbs => f.write_str("LD A,(a16)"),
            LdSpHl => f.write_str("LD SP,HL"),
            LdHlSpOffset => f.write_str("LD HL,SP+e8"),
            AddSpOffset => f.write_str("ADD SP,e8"),
            Alu(op, r) => write!(f, "{op}{r}"),
            AluImm(op) => write!(f, "{op}d8"),
            Inc(r) => write!(f, "INC {r}"),
            Dec(r) => write!(f, "DEC {r}"),
            Inc16(rr) => write!(f, "INC {rr}"),
            Dec16(rr) => write!(f, "DEC {rr}"),
            AddHl(rr) => write!(f, "ADD HL,{rr}"),
            Rlca => f.write_str("RLCA"),
            Rrca => f.write_str("RRCA"),
            Rla => f.write_str("RLA"),
            Rra => f.write_str("RRA"),
            Daa => f.write_str("DAA"),
            Cpl => f.write_str("CPL"),
            Scf => f.write_str("SCF"),
            Ccf => f.write_str("CCF"),
            Jr(cc) => write_branch(f, "JR", cc, "e8"),
            Jp(cc) => write_branch(f, "JP", cc, "a16"),
            JpHl => f.write_str("JP HL"),
            Call(cc) => write_branch(f, "CALL", cc, "a16"),
            Ret(cc) => write_branch(f, "RET", cc, ""),
            Reti => f.write_str("RETI"),
            Rst(vector) => write!(f, "RST {vector:02X}h"),
            Push(rr) => write!(f, "PUSH {rr}"),
            Pop(rr) => write!(f, "POP {rr}"),
            PrefixCb => f.write_str("PREFIX CB"),
        }
    }
}

impl fmt::Display for CbInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.target;
        match self.op {
            CbOp::Rlc => write!(f, "RLC {target}"),
            CbOp::Rrc => write!(f, "RRC {target}"),
            CbOp::Rl => write!(f, "RL {target}"),
            CbOp::Rr => write!(f, "RR {target}"),
            CbOp::Sla => write!(f, "SLA {target}"),
            CbOp::Sra => write!(f, "SRA {target}"),
            CbOp::Swap => write!(f, "SWAP {target}"),
            CbOp::Srl => write!(f, "SRL {target}"),
            CbOp::Bit(bit) => write!(f, "BIT {bit},{target}"),
            CbOp::Res(bit) => write!(f, "RES {bit},{target}"),
            CbOp::Set(bit) => write!(f, "SET {bit},{target}"),
        }
    }
}
