//! Opcode dispatch table.
//!
//! One immutable entry per opcode byte: a diagnostic mnemonic, an operation
//! tag, an addressing-mode tag and the base cycle count. The executor in the
//! parent module matches on the two tags, so decode stays O(1) without any
//! function-pointer machinery.

/// How an instruction locates its operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddrMode {
    /// Operand is implicit (or the accumulator itself).
    Implied,
    /// Operand is the byte following the opcode.
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    /// Signed 8-bit branch offset.
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// Pointer indirection, with the page-wrap hardware bug.
    Indirect,
    /// ($zp,X) — pointer formed in zero page before indirection.
    IndexedIndirectX,
    /// ($zp),Y — indirection first, then Y offset.
    IndirectIndexedY,
}

/// What an instruction does once its operand is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

/// A single dispatch table entry.
pub struct Opcode {
    /// Mnemonic for human inspection only; `"???"` marks unofficial opcodes.
    pub mnemonic: &'static str,
    pub operation: Operation,
    pub mode: AddrMode,
    /// Base cycle count before page-cross and branch penalties.
    pub cycles: u8,
}

const fn entry(mnemonic: &'static str, operation: Operation, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        operation,
        mode,
        cycles,
    }
}

use self::AddrMode as M;
use self::Operation as O;

/// Lookup table indexed by the opcode byte. Unofficial opcodes decode as
/// implied-mode no-ops with their documented cycle cost, except `$EB`, which
/// aliases SBC immediate on real silicon.
pub static OPCODE_TABLE: [Opcode; 256] = [
    // $00 - $0F
    entry("BRK", O::Brk, M::Immediate, 7),
    entry("ORA", O::Ora, M::IndexedIndirectX, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 3),
    entry("ORA", O::Ora, M::ZeroPage, 3),
    entry("ASL", O::Asl, M::ZeroPage, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("PHP", O::Php, M::Implied, 3),
    entry("ORA", O::Ora, M::Immediate, 2),
    entry("ASL", O::Asl, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 4),
    entry("ORA", O::Ora, M::Absolute, 4),
    entry("ASL", O::Asl, M::Absolute, 6),
    entry("???", O::Nop, M::Implied, 6),
    // $10 - $1F
    entry("BPL", O::Bpl, M::Relative, 2),
    entry("ORA", O::Ora, M::IndirectIndexedY, 5),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 4),
    entry("ORA", O::Ora, M::ZeroPageX, 4),
    entry("ASL", O::Asl, M::ZeroPageX, 6),
    entry("???", O::Nop, M::Implied, 6),
    entry("CLC", O::Clc, M::Implied, 2),
    entry("ORA", O::Ora, M::AbsoluteY, 4),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 7),
    entry("???", O::Nop, M::Implied, 4),
    entry("ORA", O::Ora, M::AbsoluteX, 4),
    entry("ASL", O::Asl, M::AbsoluteX, 7),
    entry("???", O::Nop, M::Implied, 7),
    // $20 - $2F
    entry("JSR", O::Jsr, M::Absolute, 6),
    entry("AND", O::And, M::IndexedIndirectX, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("BIT", O::Bit, M::ZeroPage, 3),
    entry("AND", O::And, M::ZeroPage, 3),
    entry("ROL", O::Rol, M::ZeroPage, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("PLP", O::Plp, M::Implied, 4),
    entry("AND", O::And, M::Immediate, 2),
    entry("ROL", O::Rol, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("BIT", O::Bit, M::Absolute, 4),
    entry("AND", O::And, M::Absolute, 4),
    entry("ROL", O::Rol, M::Absolute, 6),
    entry("???", O::Nop, M::Implied, 6),
    // $30 - $3F
    entry("BMI", O::Bmi, M::Relative, 2),
    entry("AND", O::And, M::IndirectIndexedY, 5),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 4),
    entry("AND", O::And, M::ZeroPageX, 4),
    entry("ROL", O::Rol, M::ZeroPageX, 6),
    entry("???", O::Nop, M::Implied, 6),
    entry("SEC", O::Sec, M::Implied, 2),
    entry("AND", O::And, M::AbsoluteY, 4),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 7),
    entry("???", O::Nop, M::Implied, 4),
    entry("AND", O::And, M::AbsoluteX, 4),
    entry("ROL", O::Rol, M::AbsoluteX, 7),
    entry("???", O::Nop, M::Implied, 7),
    // $40 - $4F
    entry("RTI", O::Rti, M::Implied, 6),
    entry("EOR", O::Eor, M::IndexedIndirectX, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 3),
    entry("EOR", O::Eor, M::ZeroPage, 3),
    entry("LSR", O::Lsr, M::ZeroPage, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("PHA", O::Pha, M::Implied, 3),
    entry("EOR", O::Eor, M::Immediate, 2),
    entry("LSR", O::Lsr, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("JMP", O::Jmp, M::Absolute, 3),
    entry("EOR", O::Eor, M::Absolute, 4),
    entry("LSR", O::Lsr, M::Absolute, 6),
    entry("???", O::Nop, M::Implied, 6),
    // $50 - $5F
    entry("BVC", O::Bvc, M::Relative, 2),
    entry("EOR", O::Eor, M::IndirectIndexedY, 5),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 4),
    entry("EOR", O::Eor, M::ZeroPageX, 4),
    entry("LSR", O::Lsr, M::ZeroPageX, 6),
    entry("???", O::Nop, M::Implied, 6),
    entry("CLI", O::Cli, M::Implied, 2),
    entry("EOR", O::Eor, M::AbsoluteY, 4),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 7),
    entry("???", O::Nop, M::Implied, 4),
    entry("EOR", O::Eor, M::AbsoluteX, 4),
    entry("LSR", O::Lsr, M::AbsoluteX, 7),
    entry("???", O::Nop, M::Implied, 7),
    // $60 - $6F
    entry("RTS", O::Rts, M::Implied, 6),
    entry("ADC", O::Adc, M::IndexedIndirectX, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 3),
    entry("ADC", O::Adc, M::ZeroPage, 3),
    entry("ROR", O::Ror, M::ZeroPage, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("PLA", O::Pla, M::Implied, 4),
    entry("ADC", O::Adc, M::Immediate, 2),
    entry("ROR", O::Ror, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("JMP", O::Jmp, M::Indirect, 5),
    entry("ADC", O::Adc, M::Absolute, 4),
    entry("ROR", O::Ror, M::Absolute, 6),
    entry("???", O::Nop, M::Implied, 6),
    // $70 - $7F
    entry("BVS", O::Bvs, M::Relative, 2),
    entry("ADC", O::Adc, M::IndirectIndexedY, 5),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 4),
    entry("ADC", O::Adc, M::ZeroPageX, 4),
    entry("ROR", O::Ror, M::ZeroPageX, 6),
    entry("???", O::Nop, M::Implied, 6),
    entry("SEI", O::Sei, M::Implied, 2),
    entry("ADC", O::Adc, M::AbsoluteY, 4),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 7),
    entry("???", O::Nop, M::Implied, 4),
    entry("ADC", O::Adc, M::AbsoluteX, 4),
    entry("ROR", O::Ror, M::AbsoluteX, 7),
    entry("???", O::Nop, M::Implied, 7),
    // $80 - $8F
    entry("???", O::Nop, M::Implied, 2),
    entry("STA", O::Sta, M::IndexedIndirectX, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 6),
    entry("STY", O::Sty, M::ZeroPage, 3),
    entry("STA", O::Sta, M::ZeroPage, 3),
    entry("STX", O::Stx, M::ZeroPage, 3),
    entry("???", O::Nop, M::Implied, 3),
    entry("DEY", O::Dey, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("TXA", O::Txa, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("STY", O::Sty, M::Absolute, 4),
    entry("STA", O::Sta, M::Absolute, 4),
    entry("STX", O::Stx, M::Absolute, 4),
    entry("???", O::Nop, M::Implied, 4),
    // $90 - $9F
    entry("BCC", O::Bcc, M::Relative, 2),
    entry("STA", O::Sta, M::IndirectIndexedY, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 6),
    entry("STY", O::Sty, M::ZeroPageX, 4),
    entry("STA", O::Sta, M::ZeroPageX, 4),
    entry("STX", O::Stx, M::ZeroPageY, 4),
    entry("???", O::Nop, M::Implied, 4),
    entry("TYA", O::Tya, M::Implied, 2),
    entry("STA", O::Sta, M::AbsoluteY, 5),
    entry("TXS", O::Txs, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("STA", O::Sta, M::AbsoluteX, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("???", O::Nop, M::Implied, 5),
    // $A0 - $AF
    entry("LDY", O::Ldy, M::Immediate, 2),
    entry("LDA", O::Lda, M::IndexedIndirectX, 6),
    entry("LDX", O::Ldx, M::Immediate, 2),
    entry("???", O::Nop, M::Implied, 6),
    entry("LDY", O::Ldy, M::ZeroPage, 3),
    entry("LDA", O::Lda, M::ZeroPage, 3),
    entry("LDX", O::Ldx, M::ZeroPage, 3),
    entry("???", O::Nop, M::Implied, 3),
    entry("TAY", O::Tay, M::Implied, 2),
    entry("LDA", O::Lda, M::Immediate, 2),
    entry("TAX", O::Tax, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("LDY", O::Ldy, M::Absolute, 4),
    entry("LDA", O::Lda, M::Absolute, 4),
    entry("LDX", O::Ldx, M::Absolute, 4),
    entry("???", O::Nop, M::Implied, 4),
    // $B0 - $BF
    entry("BCS", O::Bcs, M::Relative, 2),
    entry("LDA", O::Lda, M::IndirectIndexedY, 5),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 5),
    entry("LDY", O::Ldy, M::ZeroPageX, 4),
    entry("LDA", O::Lda, M::ZeroPageX, 4),
    entry("LDX", O::Ldx, M::ZeroPageY, 4),
    entry("???", O::Nop, M::Implied, 4),
    entry("CLV", O::Clv, M::Implied, 2),
    entry("LDA", O::Lda, M::AbsoluteY, 4),
    entry("TSX", O::Tsx, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 4),
    entry("LDY", O::Ldy, M::AbsoluteX, 4),
    entry("LDA", O::Lda, M::AbsoluteX, 4),
    entry("LDX", O::Ldx, M::AbsoluteY, 4),
    entry("???", O::Nop, M::Implied, 4),
    // $C0 - $CF
    entry("CPY", O::Cpy, M::Immediate, 2),
    entry("CMP", O::Cmp, M::IndexedIndirectX, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("CPY", O::Cpy, M::ZeroPage, 3),
    entry("CMP", O::Cmp, M::ZeroPage, 3),
    entry("DEC", O::Dec, M::ZeroPage, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("INY", O::Iny, M::Implied, 2),
    entry("CMP", O::Cmp, M::Immediate, 2),
    entry("DEX", O::Dex, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 2),
    entry("CPY", O::Cpy, M::Absolute, 4),
    entry("CMP", O::Cmp, M::Absolute, 4),
    entry("DEC", O::Dec, M::Absolute, 6),
    entry("???", O::Nop, M::Implied, 6),
    // $D0 - $DF
    entry("BNE", O::Bne, M::Relative, 2),
    entry("CMP", O::Cmp, M::IndirectIndexedY, 5),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 4),
    entry("CMP", O::Cmp, M::ZeroPageX, 4),
    entry("DEC", O::Dec, M::ZeroPageX, 6),
    entry("???", O::Nop, M::Implied, 6),
    entry("CLD", O::Cld, M::Implied, 2),
    entry("CMP", O::Cmp, M::AbsoluteY, 4),
    entry("NOP", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 7),
    entry("???", O::Nop, M::Implied, 4),
    entry("CMP", O::Cmp, M::AbsoluteX, 4),
    entry("DEC", O::Dec, M::AbsoluteX, 7),
    entry("???", O::Nop, M::Implied, 7),
    // $E0 - $EF
    entry("CPX", O::Cpx, M::Immediate, 2),
    entry("SBC", O::Sbc, M::IndexedIndirectX, 6),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("CPX", O::Cpx, M::ZeroPage, 3),
    entry("SBC", O::Sbc, M::ZeroPage, 3),
    entry("INC", O::Inc, M::ZeroPage, 5),
    entry("???", O::Nop, M::Implied, 5),
    entry("INX", O::Inx, M::Implied, 2),
    entry("SBC", O::Sbc, M::Immediate, 2),
    entry("NOP", O::Nop, M::Implied, 2),
    entry("???", O::Sbc, M::Immediate, 2),
    entry("CPX", O::Cpx, M::Absolute, 4),
    entry("SBC", O::Sbc, M::Absolute, 4),
    entry("INC", O::Inc, M::Absolute, 6),
    entry("???", O::Nop, M::Implied, 6),
    // $F0 - $FF
    entry("BEQ", O::Beq, M::Relative, 2),
    entry("SBC", O::Sbc, M::IndirectIndexedY, 5),
    entry("???", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 8),
    entry("???", O::Nop, M::Implied, 4),
    entry("SBC", O::Sbc, M::ZeroPageX, 4),
    entry("INC", O::Inc, M::ZeroPageX, 6),
    entry("???", O::Nop, M::Implied, 6),
    entry("SED", O::Sed, M::Implied, 2),
    entry("SBC", O::Sbc, M::AbsoluteY, 4),
    entry("NOP", O::Nop, M::Implied, 2),
    entry("???", O::Nop, M::Implied, 7),
    entry("???", O::Nop, M::Implied, 4),
    entry("SBC", O::Sbc, M::AbsoluteX, 4),
    entry("INC", O::Inc, M::AbsoluteX, 7),
    entry("???", O::Nop, M::Implied, 7),
];
