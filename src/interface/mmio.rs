//! Raw peripheral register access.

/// Byte and word access to the peripheral address space.
pub trait RegisterIo {
    /// Reads an 8-bit register.
    fn read_u8(&mut self, address: u16) -> u8;

    /// Writes an 8-bit register.
    fn write_u8(&mut self, address: u16, value: u8);

    /// Reads a 16-bit register.
    fn read_u16(&mut self, address: u16) -> u16;

    /// Writes a 16-bit register.
    fn write_u16(&mut self, address: u16, value: u16);
}

/// Volatile access to the memory-mapped peripheral space of the running MCU.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Creates a handle to the peripheral address space.
    ///
    /// # Safety
    ///
    /// The caller must be running on the MSP430G2553 (or a part with the same
    /// peripheral map) and must not hand out another owner of the USCI_B0 or
    /// Timer0_A3 registers while this handle is alive.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterIo for Mmio {
    #[inline]
    fn read_u8(&mut self, address: u16) -> u8 {
        // SAFETY: `Mmio::new` guarantees the address space is the peripheral map.
        unsafe { core::ptr::read_volatile(address as usize as *const u8) }
    }

    #[inline]
    fn write_u8(&mut self, address: u16, value: u8) {
        // SAFETY: see `read_u8`.
        unsafe { core::ptr::write_volatile(address as usize as *mut u8, value) }
    }

    #[inline]
    fn read_u16(&mut self, address: u16) -> u16 {
        // SAFETY: see `read_u8`; word registers are 2-byte aligned.
        unsafe { core::ptr::read_volatile(address as usize as *const u16) }
    }

    #[inline]
    fn write_u16(&mut self, address: u16, value: u16) {
        // SAFETY: see `read_u16`.
        unsafe { core::ptr::write_volatile(address as usize as *mut u16, value) }
    }
}
