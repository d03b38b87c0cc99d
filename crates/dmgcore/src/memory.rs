use crate::error::MemoryError;
use crate::MEMORY_SIZE;

/// Abstraction over the CPU's view of the address space.
///
/// The core only needs byte reads and writes. Hosts that model IO registers,
/// banking or a PPU wrap a [`Memory`] in their own type and override the
/// hooks they care about.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Called by the engine once a frame's cycle budget has been consumed.
    ///
    /// This is where a host refreshes video/audio. `frame` is the number of
    /// frames completed so far, including this one. The default does nothing.
    fn end_frame(&mut self, _frame: u64) {}
}

/// Flat 64 KiB byte array with no side effects.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nonzero = self.bytes.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Memory")
            .field("size", &MEMORY_SIZE)
            .field("nonzero", &nonzero)
            .finish()
    }
}

impl Memory {
    /// Zero-filled address space.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; MEMORY_SIZE]),
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// Copy a raw image into memory starting at `offset`.
    ///
    /// Fails without writing anything if the image would extend past 0xFFFF.
    pub fn load(&mut self, offset: u16, image: &[u8]) -> Result<(), MemoryError> {
        let start = offset as usize;
        let end = start
            .checked_add(image.len())
            .filter(|&end| end <= MEMORY_SIZE)
            .ok_or(MemoryError::ImageTooLarge {
                offset,
                len: image.len(),
            })?;
        self.bytes[start..end].copy_from_slice(image);
        Ok(())
    }

    /// Set every byte to `value`.
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    /// The full memory image, index = address.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Bus for Memory {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_ends_of_the_address_space_are_usable() {
        let mut mem = Memory::new();
        mem.write(0x0000, 0x12);
        mem.write(0xFFFF, 0x34);
        assert_eq!(mem.read(0x0000), 0x12);
        assert_eq!(mem.read(0xFFFF), 0x34);
        assert_eq!(mem.as_slice().len(), MEMORY_SIZE);
    }

    #[test]
    fn load_copies_image_at_offset() {
        let mut mem = Memory::new();
        mem.load(0x0100, &[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(mem.read(0x00FF), 0x00);
        assert_eq!(mem.read(0x0100), 0xAA);
        assert_eq!(mem.read(0x0102), 0xCC);
        assert_eq!(mem.read(0x0103), 0x00);
    }

    #[test]
    fn load_rejects_images_past_the_end() {
        let mut mem = Memory::new();
        let err = mem.load(0xFFFE, &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            MemoryError::ImageTooLarge {
                offset: 0xFFFE,
                len: 3
            }
        );
        // Nothing was written.
        assert_eq!(mem.read(0xFFFE), 0);
        assert_eq!(mem.read(0xFFFF), 0);

        // Exactly filling the tail is fine.
        mem.load(0xFFFE, &[1, 2]).unwrap();
        assert_eq!(mem.read(0xFFFF), 2);
    }

    #[test]
    fn full_image_load_from_zero() {
        let mut mem = Memory::new();
        let image = vec![0x5A; MEMORY_SIZE];
        mem.load(0, &image).unwrap();
        assert!(mem.as_slice().iter().all(|&b| b == 0x5A));

        mem.fill(0);
        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }
}
