//! iNES ROM image parsing (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: a 16-byte
//! header (magic `"NES\x1A"`, PRG size in 16 KiB units, CHR size in 8 KiB
//! units, flags 6–7), an optional 512-byte trainer, PRG ROM, CHR ROM and an
//! optional 8 KiB PlayChoice INST-ROM blob. Only the pieces the CPU core
//! needs are interpreted; the rest of the header is carried verbatim.

use std::io::Read;

use crate::error::NervaError;

/// A loaded game image. PRG is what gets mapped into the CPU address space;
/// CHR is graphics data for a PPU and is kept but never exposed on the CPU
/// bus.
pub struct Cartridge {
    pub header: [u8; Cartridge::HEADER_SIZE],
    pub trainer: Vec<u8>,
    pub prg: Vec<u8>,
    pub chr: Vec<u8>,
    pub play_choice: Vec<u8>,
}

impl Cartridge {
    pub const HEADER_SIZE: usize = 16;
    pub const TRAINER_SIZE: usize = 512;
    pub const PRG_BANK_SIZE: usize = 16 * 1024;
    pub const CHR_BANK_SIZE: usize = 8 * 1024;
    pub const PLAY_CHOICE_SIZE: usize = 8 * 1024;

    pub const MAGIC: [u8; 4] = *b"NES\x1a";

    /// Parse an iNES image from a byte stream. Fails with `InvalidMagic` on a
    /// bad signature and `Io` if the stream ends before the header-declared
    /// sections do.
    pub fn load<R: Read>(mut data: R) -> Result<Self, NervaError> {
        let mut header = [0u8; Self::HEADER_SIZE];
        data.read_exact(&mut header)?;

        if header[0..4] != Self::MAGIC {
            let mut magic = [0u8; 4];
            magic.copy_from_slice(&header[0..4]);
            return Err(NervaError::InvalidMagic(magic));
        }

        let mut cart = Cartridge {
            header,
            trainer: Vec::new(),
            prg: Vec::new(),
            chr: Vec::new(),
            play_choice: Vec::new(),
        };

        if cart.has_trainer() {
            cart.trainer = read_blob(&mut data, Self::TRAINER_SIZE)?;
        }

        cart.prg = read_blob(
            &mut data,
            cart.prg_bank_count() as usize * Self::PRG_BANK_SIZE,
        )?;
        cart.chr = read_blob(
            &mut data,
            cart.chr_bank_count() as usize * Self::CHR_BANK_SIZE,
        )?;

        if cart.has_play_choice() {
            cart.play_choice = read_blob(&mut data, Self::PLAY_CHOICE_SIZE)?;
        }

        Ok(cart)
    }

    /// Number of 16 KiB PRG ROM banks (header byte 4).
    pub fn prg_bank_count(&self) -> u8 {
        self.header[4]
    }

    /// Number of 8 KiB CHR ROM banks (header byte 5).
    pub fn chr_bank_count(&self) -> u8 {
        self.header[5]
    }

    /// Flag 6 bit 2: a 512-byte trainer sits between header and PRG.
    pub fn has_trainer(&self) -> bool {
        self.header[6] & 0x04 != 0
    }

    /// Flag 7 bit 1: PlayChoice-10 data follows the CHR banks.
    pub fn has_play_choice(&self) -> bool {
        self.header[7] & 0x02 != 0
    }
}

fn read_blob<R: Read>(data: &mut R, size: usize) -> Result<Vec<u8>, NervaError> {
    let mut buf = vec![0u8; size];
    data.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(prg_banks: u8, chr_banks: u8, flag6: u8) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&Cartridge::MAGIC);
        data.push(prg_banks);
        data.push(chr_banks);
        data.push(flag6);
        data.extend_from_slice(&[0; 9]);

        if flag6 & 0x04 != 0 {
            data.extend(std::iter::repeat(0xAA).take(Cartridge::TRAINER_SIZE));
        }
        data.extend(std::iter::repeat(0x11).take(prg_banks as usize * Cartridge::PRG_BANK_SIZE));
        data.extend(std::iter::repeat(0x22).take(chr_banks as usize * Cartridge::CHR_BANK_SIZE));
        data
    }

    #[test]
    fn loads_prg_and_chr_banks() {
        let cart = Cartridge::load(&image(2, 1, 0)[..]).unwrap();

        assert_eq!(cart.prg_bank_count(), 2);
        assert_eq!(cart.chr_bank_count(), 1);
        assert_eq!(cart.prg.len(), 2 * Cartridge::PRG_BANK_SIZE);
        assert_eq!(cart.chr.len(), Cartridge::CHR_BANK_SIZE);
        assert!(cart.prg.iter().all(|&b| b == 0x11));
        assert!(cart.chr.iter().all(|&b| b == 0x22));
    }

    #[test]
    fn trainer_is_split_from_prg() {
        let cart = Cartridge::load(&image(1, 0, 0x04)[..]).unwrap();

        assert!(cart.has_trainer());
        assert_eq!(cart.trainer.len(), Cartridge::TRAINER_SIZE);
        // PRG must start after the trainer, not inside it.
        assert!(cart.prg.iter().all(|&b| b == 0x11));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = image(1, 1, 0);
        data[0] = b'X';

        match Cartridge::load(&data[..]) {
            Err(NervaError::InvalidMagic(magic)) => assert_eq!(magic[0], b'X'),
            other => panic!("expected InvalidMagic, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn truncated_image_is_an_io_error() {
        let mut data = image(1, 1, 0);
        data.truncate(data.len() - 100);

        assert!(matches!(
            Cartridge::load(&data[..]),
            Err(NervaError::Io(_))
        ));
    }
}
