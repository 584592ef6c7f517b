
use crate::bus::Bus;
use crate::cpu::{Cpu, VECTOR_RESET};
use std::error::Error;

/// The emulator shell: owns the CPU and the bus and drives the clock.
///
/// The CPU never owns its bus; it borrows it for the duration of each
/// operation, so the shell is the single place where both halves live.
#[derive(Clone, bincode::Encode, bincode::Decode)]
pub struct Emulator {
    pub cpu: Cpu,
    pub bus: Bus,
    cycles: u64,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: Bus::new(),
            cycles: 0,
        }
    }

    /// Load a program into memory and wire the reset vector to it.
    pub fn load_program(&mut self, start: u16, data: &[u8]) {
        self.bus.load(start, data);
        self.bus.write_u16(VECTOR_RESET, start);
    }

    /// Reset the CPU and restart the cycle counter. The 8 reset cycles are
    /// consumed here, so the counter reads zero at the first instruction
    /// boundary and the next tick begins the first instruction.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        while self.cpu.remaining_cycles() > 0 {
            self.cpu.clock(&mut self.bus);
        }
        self.cycles = 0;
    }

    /// Advance the machine by one clock tick.
    pub fn clock(&mut self) {
        self.cpu.clock(&mut self.bus);
        self.cycles += 1;
    }

    /// Run ticks until the current instruction (or pending interrupt
    /// service) completes. Returns the number of ticks consumed.
    pub fn step_instruction(&mut self) -> u32 {
        let mut ticks = 0;
        loop {
            self.clock();
            ticks += 1;
            if self.cpu.remaining_cycles() == 0 {
                break;
            }
        }
        ticks
    }

    /// Run whole instructions until at least `budget` cycles have elapsed
    /// since the counter was last reset.
    pub fn run_for_cycles(&mut self, budget: u64) {
        while self.cycles < budget {
            self.step_instruction();
        }
    }

    pub fn request_irq(&mut self) {
        self.cpu.request_irq();
    }

    pub fn request_nmi(&mut self) {
        self.cpu.request_nmi();
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn save_state_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn Error>> {
        let bytes = bincode::encode_to_vec(self, bincode::config::standard())?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load_state_from_file<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<(), Box<dyn Error>> {
        let bytes = std::fs::read(path)?;
        let (state, _): (Emulator, usize) =
            bincode::decode_from_slice(&bytes, bincode::config::standard())?;
        *self = state;
        Ok(())
    }
}
