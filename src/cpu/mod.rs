use crate::bus::Bus;

pub mod opcodes;


use opcodes::{AddrMode, Opcode, Operation, OPCODE_TABLE};

pub const FLAG_CARRY: u8 = 0b0000_0001;
pub const FLAG_ZERO: u8 = 0b0000_0010;
pub const FLAG_INTERRUPT_DISABLE: u8 = 0b0000_0100;
pub const FLAG_DECIMAL: u8 = 0b0000_1000;
pub const FLAG_BREAK: u8 = 0b0001_0000;
pub const FLAG_UNUSED: u8 = 0b0010_0000;
pub const FLAG_OVERFLOW: u8 = 0b0100_0000;
pub const FLAG_NEGATIVE: u8 = 0b1000_0000;

pub const VECTOR_NMI: u16 = 0xFFFA;
pub const VECTOR_RESET: u16 = 0xFFFC;
pub const VECTOR_IRQ_BRK: u16 = 0xFFFE;

const RESET_CYCLES: u8 = 8;
const IRQ_CYCLES: u8 = 7;
const NMI_CYCLES: u8 = 8;

/// NES-variant MOS 6502 CPU core.
///
/// Driven one tick at a time through [`Cpu::clock`]. The first tick of an
/// instruction decodes and executes it in full and seeds a cycle countdown;
/// the remaining ticks only burn the countdown, so each instruction occupies
/// exactly its documented number of clocks including page-cross and branch
/// penalties. Decimal mode is inert, matching the 2A03.
#[derive(Clone, bincode::Encode, bincode::Decode)]
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    status: u8,
    // Per-instruction scratch: meaningless between instructions.
    opcode: u8,
    addr_abs: u16,
    addr_rel: u16,
    fetched: u8,
    cycles_remaining: u8,
    irq_pending: bool,
    nmi_pending: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// All registers zeroed. `pc` stays untouched until [`Cpu::reset`] loads
    /// it from the reset vector.
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: 0,
            opcode: 0,
            addr_abs: 0,
            addr_rel: 0,
            fetched: 0,
            cycles_remaining: 0,
            irq_pending: false,
            nmi_pending: false,
        }
    }

    /// Advance the CPU by one clock tick.
    ///
    /// At an instruction boundary this services a pending interrupt or
    /// decodes and executes the next instruction; mid-instruction it only
    /// counts the elapsed cycle down.
    pub fn clock(&mut self, bus: &mut Bus) {
        if self.cycles_remaining == 0 {
            if self.nmi_pending {
                self.nmi_pending = false;
                self.service_interrupt(bus, VECTOR_NMI, NMI_CYCLES);
            } else if self.irq_pending {
                // Edge-style: a request raised while interrupts are masked
                // is dropped, not held.
                self.irq_pending = false;
                if !self.get_flag(FLAG_INTERRUPT_DISABLE) {
                    self.service_interrupt(bus, VECTOR_IRQ_BRK, IRQ_CYCLES);
                }
            }
        }

        if self.cycles_remaining == 0 {
            self.set_flag(FLAG_UNUSED, true);

            self.opcode = self.fetch_byte(bus);
            let entry = &OPCODE_TABLE[self.opcode as usize];
            self.cycles_remaining = entry.cycles;

            let page_crossed = self.resolve_address(bus, entry.mode);
            let penalty_eligible = self.execute(bus, entry.operation);
            if page_crossed && penalty_eligible {
                self.cycles_remaining += 1;
            }
        }

        self.cycles_remaining -= 1;
    }

    /// Bring the CPU to its power-on state and load `pc` from the reset
    /// vector at `$FFFC`. Takes 8 cycles before the first fetch.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = FLAG_UNUSED;
        self.pc = bus.read_u16(VECTOR_RESET);
        self.opcode = 0;
        self.addr_abs = 0;
        self.addr_rel = 0;
        self.fetched = 0;
        self.irq_pending = false;
        self.nmi_pending = false;
        self.cycles_remaining = RESET_CYCLES;
    }

    /// Latch a maskable interrupt request. Serviced at the next instruction
    /// boundary unless the interrupt-disable flag is set, in which case the
    /// request is discarded.
    pub fn request_irq(&mut self) {
        self.irq_pending = true;
    }

    /// Latch a non-maskable interrupt request. Always serviced at the next
    /// instruction boundary.
    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Status register as observed by software: bit 5 always reads high.
    pub fn status(&self) -> u8 {
        self.status | FLAG_UNUSED
    }

    pub fn flag(&self, flag: u8) -> bool {
        self.status() & flag != 0
    }

    /// Clock ticks left in the current instruction; zero at a boundary.
    pub fn remaining_cycles(&self) -> u8 {
        self.cycles_remaining
    }

    /// Opcode byte of the most recently fetched instruction.
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    fn service_interrupt(&mut self, bus: &mut Bus, vector: u16, cycles: u8) {
        self.push_byte(bus, (self.pc >> 8) as u8);
        self.push_byte(bus, self.pc as u8);
        self.set_flag(FLAG_BREAK, false);
        self.set_flag(FLAG_UNUSED, true);
        self.set_flag(FLAG_INTERRUPT_DISABLE, true);
        self.push_byte(bus, self.status);
        self.pc = bus.read_u16(vector);
        self.cycles_remaining = cycles;
    }

    /// Compute the effective address (or branch offset) for the current
    /// instruction. Returns whether the computation crossed a page boundary,
    /// which costs an extra cycle for penalty-eligible operations.
    fn resolve_address(&mut self, bus: &mut Bus, mode: AddrMode) -> bool {
        match mode {
            AddrMode::Implied => {
                self.fetched = self.a;
                false
            }
            AddrMode::Immediate => {
                self.addr_abs = self.pc;
                self.pc = self.pc.wrapping_add(1);
                false
            }
            AddrMode::ZeroPage => {
                self.addr_abs = self.fetch_byte(bus) as u16;
                false
            }
            AddrMode::ZeroPageX => {
                self.addr_abs = self.fetch_byte(bus).wrapping_add(self.x) as u16;
                false
            }
            AddrMode::ZeroPageY => {
                self.addr_abs = self.fetch_byte(bus).wrapping_add(self.y) as u16;
                false
            }
            AddrMode::Relative => {
                let offset = self.fetch_byte(bus) as u16;
                // Sign-extend bit 7 so 16-bit wrapping addition moves the
                // program counter backwards for negative offsets.
                self.addr_rel = if offset & 0x0080 != 0 {
                    offset | 0xFF00
                } else {
                    offset
                };
                false
            }
            AddrMode::Absolute => {
                self.addr_abs = self.fetch_word(bus);
                false
            }
            AddrMode::AbsoluteX => {
                let base = self.fetch_word(bus);
                self.addr_abs = base.wrapping_add(self.x as u16);
                Cpu::page_crossed(base, self.addr_abs)
            }
            AddrMode::AbsoluteY => {
                let base = self.fetch_word(bus);
                self.addr_abs = base.wrapping_add(self.y as u16);
                Cpu::page_crossed(base, self.addr_abs)
            }
            AddrMode::Indirect => {
                let ptr = self.fetch_word(bus);
                let lo = bus.read(ptr);
                // Hardware bug: a pointer ending in $FF wraps within its
                // page instead of carrying into the next one.
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr.wrapping_add(1)
                };
                let hi = bus.read(hi_addr);
                self.addr_abs = ((hi as u16) << 8) | lo as u16;
                false
            }
            AddrMode::IndexedIndirectX => {
                let ptr = self.fetch_byte(bus).wrapping_add(self.x);
                self.addr_abs = Cpu::read_zero_page_word(bus, ptr);
                false
            }
            AddrMode::IndirectIndexedY => {
                let ptr = self.fetch_byte(bus);
                let base = Cpu::read_zero_page_word(bus, ptr);
                self.addr_abs = base.wrapping_add(self.y as u16);
                Cpu::page_crossed(base, self.addr_abs)
            }
        }
    }

    /// Run the operation for the current instruction. Returns whether the
    /// operation is eligible for the page-cross cycle penalty.
    fn execute(&mut self, bus: &mut Bus, operation: Operation) -> bool {
        match operation {
            Operation::Adc => {
                let value = self.fetch(bus);
                self.add_with_carry(value);
                true
            }
            Operation::Sbc => {
                // Two's-complement subtraction: add the inverted operand.
                let value = self.fetch(bus);
                self.add_with_carry(value ^ 0xFF);
                true
            }
            Operation::And => {
                self.a &= self.fetch(bus);
                self.update_zero_and_negative(self.a);
                true
            }
            Operation::Ora => {
                self.a |= self.fetch(bus);
                self.update_zero_and_negative(self.a);
                true
            }
            Operation::Eor => {
                self.a ^= self.fetch(bus);
                self.update_zero_and_negative(self.a);
                true
            }
            Operation::Asl => {
                let value = self.fetch(bus);
                let result = value.wrapping_shl(1);
                self.set_flag(FLAG_CARRY, value & 0x80 != 0);
                self.update_zero_and_negative(result);
                self.write_back(bus, result);
                false
            }
            Operation::Lsr => {
                let value = self.fetch(bus);
                let result = value >> 1;
                self.set_flag(FLAG_CARRY, value & 0x01 != 0);
                self.update_zero_and_negative(result);
                self.write_back(bus, result);
                false
            }
            Operation::Rol => {
                let value = self.fetch(bus);
                let carry_in = if self.get_flag(FLAG_CARRY) { 1 } else { 0 };
                let result = (value << 1) | carry_in;
                self.set_flag(FLAG_CARRY, value & 0x80 != 0);
                self.update_zero_and_negative(result);
                self.write_back(bus, result);
                false
            }
            Operation::Ror => {
                let value = self.fetch(bus);
                let carry_in = if self.get_flag(FLAG_CARRY) { 0x80 } else { 0 };
                let result = (value >> 1) | carry_in;
                self.set_flag(FLAG_CARRY, value & 0x01 != 0);
                self.update_zero_and_negative(result);
                self.write_back(bus, result);
                false
            }
            Operation::Inc => {
                let value = self.fetch(bus).wrapping_add(1);
                bus.write(self.addr_abs, value);
                self.update_zero_and_negative(value);
                false
            }
            Operation::Dec => {
                let value = self.fetch(bus).wrapping_sub(1);
                bus.write(self.addr_abs, value);
                self.update_zero_and_negative(value);
                false
            }
            Operation::Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative(self.x);
                false
            }
            Operation::Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative(self.y);
                false
            }
            Operation::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative(self.x);
                false
            }
            Operation::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative(self.y);
                false
            }
            Operation::Cmp => {
                let register = self.a;
                self.compare(bus, register);
                true
            }
            Operation::Cpx => {
                let register = self.x;
                self.compare(bus, register);
                false
            }
            Operation::Cpy => {
                let register = self.y;
                self.compare(bus, register);
                false
            }
            Operation::Bit => {
                let value = self.fetch(bus);
                self.set_flag(FLAG_ZERO, self.a & value == 0);
                self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
                self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
                false
            }
            Operation::Lda => {
                self.a = self.fetch(bus);
                self.update_zero_and_negative(self.a);
                true
            }
            Operation::Ldx => {
                self.x = self.fetch(bus);
                self.update_zero_and_negative(self.x);
                true
            }
            Operation::Ldy => {
                self.y = self.fetch(bus);
                self.update_zero_and_negative(self.y);
                true
            }
            Operation::Sta => {
                bus.write(self.addr_abs, self.a);
                false
            }
            Operation::Stx => {
                bus.write(self.addr_abs, self.x);
                false
            }
            Operation::Sty => {
                bus.write(self.addr_abs, self.y);
                false
            }
            Operation::Tax => {
                self.x = self.a;
                self.update_zero_and_negative(self.x);
                false
            }
            Operation::Tay => {
                self.y = self.a;
                self.update_zero_and_negative(self.y);
                false
            }
            Operation::Txa => {
                self.a = self.x;
                self.update_zero_and_negative(self.a);
                false
            }
            Operation::Tya => {
                self.a = self.y;
                self.update_zero_and_negative(self.a);
                false
            }
            Operation::Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative(self.x);
                false
            }
            Operation::Txs => {
                // The only transfer that leaves the flags alone.
                self.sp = self.x;
                false
            }
            Operation::Bcc => {
                let taken = !self.get_flag(FLAG_CARRY);
                self.branch(taken);
                false
            }
            Operation::Bcs => {
                let taken = self.get_flag(FLAG_CARRY);
                self.branch(taken);
                false
            }
            Operation::Beq => {
                let taken = self.get_flag(FLAG_ZERO);
                self.branch(taken);
                false
            }
            Operation::Bne => {
                let taken = !self.get_flag(FLAG_ZERO);
                self.branch(taken);
                false
            }
            Operation::Bmi => {
                let taken = self.get_flag(FLAG_NEGATIVE);
                self.branch(taken);
                false
            }
            Operation::Bpl => {
                let taken = !self.get_flag(FLAG_NEGATIVE);
                self.branch(taken);
                false
            }
            Operation::Bvc => {
                let taken = !self.get_flag(FLAG_OVERFLOW);
                self.branch(taken);
                false
            }
            Operation::Bvs => {
                let taken = self.get_flag(FLAG_OVERFLOW);
                self.branch(taken);
                false
            }
            Operation::Jmp => {
                self.pc = self.addr_abs;
                false
            }
            Operation::Jsr => {
                let return_addr = self.pc.wrapping_sub(1);
                self.push_byte(bus, (return_addr >> 8) as u8);
                self.push_byte(bus, return_addr as u8);
                self.pc = self.addr_abs;
                false
            }
            Operation::Rts => {
                let lo = self.pop_byte(bus) as u16;
                let hi = self.pop_byte(bus) as u16;
                self.pc = ((hi << 8) | lo).wrapping_add(1);
                false
            }
            Operation::Brk => {
                self.brk(bus);
                false
            }
            Operation::Rti => {
                let status = self.pop_byte(bus);
                self.status = status & !(FLAG_BREAK | FLAG_UNUSED);
                let lo = self.pop_byte(bus) as u16;
                let hi = self.pop_byte(bus) as u16;
                self.pc = (hi << 8) | lo;
                false
            }
            Operation::Pha => {
                self.push_byte(bus, self.a);
                false
            }
            Operation::Php => {
                // The pushed copy always carries B and the unused bit.
                let value = self.status | FLAG_BREAK | FLAG_UNUSED;
                self.push_byte(bus, value);
                false
            }
            Operation::Pla => {
                self.a = self.pop_byte(bus);
                self.update_zero_and_negative(self.a);
                false
            }
            Operation::Plp => {
                let value = self.pop_byte(bus);
                self.status = value | FLAG_UNUSED;
                false
            }
            Operation::Clc => {
                self.set_flag(FLAG_CARRY, false);
                false
            }
            Operation::Sec => {
                self.set_flag(FLAG_CARRY, true);
                false
            }
            Operation::Cli => {
                self.set_flag(FLAG_INTERRUPT_DISABLE, false);
                false
            }
            Operation::Sei => {
                self.set_flag(FLAG_INTERRUPT_DISABLE, true);
                false
            }
            Operation::Cld => {
                self.set_flag(FLAG_DECIMAL, false);
                false
            }
            Operation::Sed => {
                self.set_flag(FLAG_DECIMAL, true);
                false
            }
            Operation::Clv => {
                self.set_flag(FLAG_OVERFLOW, false);
                false
            }
            Operation::Nop => false,
        }
    }

    /// Shared core of ADC and SBC. Decimal mode is deliberately ignored: the
    /// NES CPU wires the flag but not the BCD correction circuitry.
    fn add_with_carry(&mut self, value: u8) {
        let carry = if self.get_flag(FLAG_CARRY) { 1u16 } else { 0 };
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;
        self.set_flag(FLAG_CARRY, sum > 0xFF);
        self.set_flag(
            FLAG_OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result) & 0x80) != 0,
        );
        self.a = result;
        self.update_zero_and_negative(result);
    }

    fn compare(&mut self, bus: &mut Bus, register: u8) {
        let value = self.fetch(bus);
        let result = register.wrapping_sub(value);
        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative(result);
    }

    /// Conditional relative jump. A taken branch costs one extra cycle, two
    /// if the target lands in a different page than the updated `pc`.
    fn branch(&mut self, condition: bool) {
        if condition {
            self.cycles_remaining += 1;
            self.addr_abs = self.pc.wrapping_add(self.addr_rel);
            if Cpu::page_crossed(self.addr_abs, self.pc) {
                self.cycles_remaining += 1;
            }
            self.pc = self.addr_abs;
        }
    }

    fn brk(&mut self, bus: &mut Bus) {
        self.pc = self.pc.wrapping_add(1);
        self.set_flag(FLAG_INTERRUPT_DISABLE, true);
        self.push_byte(bus, (self.pc >> 8) as u8);
        self.push_byte(bus, self.pc as u8);
        self.push_byte(bus, self.status | FLAG_BREAK | FLAG_UNUSED);
        self.set_flag(FLAG_BREAK, false);
        self.pc = bus.read_u16(VECTOR_IRQ_BRK);
    }

    /// Load the working operand. Implied-mode instructions operate on the
    /// accumulator copy staged by the addressing resolver; everything else
    /// reads from the effective address.
    fn fetch(&mut self, bus: &mut Bus) -> u8 {
        if OPCODE_TABLE[self.opcode as usize].mode != AddrMode::Implied {
            self.fetched = bus.read(self.addr_abs);
        }
        self.fetched
    }

    /// Store a shift/rotate result where the operand came from: the
    /// accumulator for implied mode, memory otherwise.
    fn write_back(&mut self, bus: &mut Bus, value: u8) {
        if OPCODE_TABLE[self.opcode as usize].mode == AddrMode::Implied {
            self.a = value;
        } else {
            bus.write(self.addr_abs, value);
        }
    }

    fn fetch_byte(&mut self, bus: &mut Bus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn fetch_word(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.fetch_byte(bus) as u16;
        let hi = self.fetch_byte(bus) as u16;
        (hi << 8) | lo
    }

    /// 16-bit read from zero page; the high byte wraps within the page.
    fn read_zero_page_word(bus: &Bus, addr: u8) -> u16 {
        let lo = bus.read(addr as u16) as u16;
        let hi = bus.read(addr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    fn push_byte(&mut self, bus: &mut Bus, value: u8) {
        bus.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop_byte(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | self.sp as u16)
    }

    fn update_zero_and_negative(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    fn set_flag(&mut self, flag: u8, value: bool) {
        if value {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    fn get_flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    #[inline]
    fn page_crossed(a: u16, b: u16) -> bool {
        (a & 0xFF00) != (b & 0xFF00)
    }
}

/// Table entry for an opcode, exposed for diagnostics such as tracing.
pub fn describe(opcode: u8) -> &'static Opcode {
    &OPCODE_TABLE[opcode as usize]
}
