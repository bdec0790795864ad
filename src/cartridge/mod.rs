//! NES cartridge loading.
//!
//! Parses iNES format ROM images into their header, trainer and bank blobs.

pub mod cartridge;

pub use cartridge::Cartridge;
