//! Cycle-approximate emulation of the NES-variant MOS 6502.
//!
//! The crate is split the way the hardware is: [`bus::Bus`] is the flat
//! 64 KiB memory the processor talks to, [`cpu::Cpu`] is the execution
//! engine, and [`emulator::Emulator`] owns both and drives the clock.

pub mod bus;
pub mod cpu;
pub mod emulator;
