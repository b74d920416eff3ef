//! # `chskit` main library
//!
//! This library models the cylinder-head-sector (CHS) disk address, the 3-byte
//! coordinate used by BIOS interrupt 0x13 and kept in MBR partition records
//! long after disks outgrew it.
//!
//! ## Architecture
//!
//! There is one value type, `chs::ChsAddress`.  It can be built from explicit
//! coordinates, decoded from the 3-byte field, or derived from a logical block
//! address (LBA) given the disk geometry (heads per track and sectors per track).
//! The reverse operations are also provided.  Coordinates too wide for their
//! encoded field wrap silently when encoded, as the format has always done;
//! only a malformed buffer or a zero geometry parameter is an error.
//!
//! This crate does not read or write disk images or partition tables, it only
//! handles the address itself.

pub mod chs;
