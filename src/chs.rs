//! ## CHS Address Module
//!
//! This contains the 3-byte cylinder-head-sector address used by BIOS interrupt 0x13
//! and retained in MBR partition records, along with the arithmetic taking it
//! to and from a logical block address (LBA).
//!
//! The encoding packs 10 bits of cylinder, 8 bits of head, and 6 bits of sector
//! into 3 bytes.  Values too wide for their field wrap silently when encoded;
//! this is how the format has always behaved and is not treated as an error.

use std::fmt;
use std::str::FromStr;
use log::{trace,debug,error};

/// Length of the encoded address in bytes
pub const LENGTH: usize = 3;

/// Enumerates CHS addressing errors.  The `Display` trait will print the equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("input did not match the address format")]
    InvalidInput,
    #[error("geometry parameter out of range")]
    InvalidArgument
}

/// Cylinder-head-sector address in the legacy BIOS form.
///
/// The fields are kept wider than their encoded widths.  Values that do not fit
/// wrap when the address is encoded, see `to_bytes`.  Fields are public, but the
/// usual lifecycle runs through `new`, `from_bytes`, or `from_lba`.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub struct ChsAddress {
    /// cylinder, 10 bits when encoded
    pub cylinder: usize,
    /// head, 8 bits when encoded
    pub head: usize,
    /// sector, 6 bits when encoded, numbering starts at 1
    pub sector: usize
}

impl Default for ChsAddress {
    /// The end-of-disk sentinel 1023/254/63, found in partition records
    /// describing disks that have outgrown CHS.
    fn default() -> Self {
        Self {
            cylinder: 1023,
            head: 254,
            sector: 63
        }
    }
}

impl ChsAddress {
    /// Create an address from explicit coordinates.  No range checking is done,
    /// the fields only have to fit when the address is encoded.
    pub fn new(cylinder: usize,head: usize,sector: usize) -> Self {
        Self {
            cylinder,
            head,
            sector
        }
    }
    /// Decode an address from its 3-byte form.
    pub fn from_bytes(buf: &[u8]) -> Result<Self,Error> {
        if buf.len()!=LENGTH {
            debug!("CHS buffer length {} was refused",buf.len());
            return Err(Error::InvalidInput);
        }
        trace!("decode CHS {}",hex::encode(buf));
        Ok(Self {
            // sector is in bits 5:0, bits 7:6 hold cylinder bits 9:8
            head: buf[0] as usize,
            sector: (buf[1] & 0x3f) as usize,
            cylinder: (((buf[1] & 0xc0) as usize) << 2) | buf[2] as usize
        })
    }
    /// Decode an address from its 3-byte form, updating in place.
    pub fn update_from_bytes(&mut self,buf: &[u8]) -> Result<(),Error> {
        *self = Self::from_bytes(buf)?;
        Ok(())
    }
    /// Encode the address into its 3-byte form.  Each field is masked to its
    /// encoded width, so out of range values wrap rather than fail.
    pub fn to_bytes(&self) -> [u8;LENGTH] {
        // cylinder bits 9:8 land in bits 7:6 of the sector byte
        let high = (self.cylinder >> 2) & 0xc0;
        let ans = [
            (self.head & 0xff) as u8,
            (high ^ (self.sector & 0x3f)) as u8,
            (self.cylinder & 0xff) as u8
        ];
        trace!("encode CHS {}",hex::encode(ans));
        ans
    }
    /// Get the address of a logical block with respect to the given disk geometry.
    /// This assumes the mapping track = cylinder*hpt + head.
    pub fn from_lba(lba: usize,hpt: usize,spt: usize) -> Result<Self,Error> {
        if hpt<1 || spt<1 {
            error!("CHS mapping was passed 0 geometry ({} heads, {} sectors)",hpt,spt);
            return Err(Error::InvalidArgument);
        }
        let ans = Self {
            cylinder: lba/(spt*hpt),
            head: (lba/spt)%hpt,
            sector: lba%spt + 1
        };
        trace!("LBA {} maps to {}",lba,ans);
        Ok(ans)
    }
    /// Set this address to that of a logical block, in place.
    pub fn update_from_lba(&mut self,lba: usize,hpt: usize,spt: usize) -> Result<(),Error> {
        *self = Self::from_lba(lba,hpt,spt)?;
        Ok(())
    }
    /// Get the logical block address corresponding to the given disk geometry.
    /// The mapping takes the sector number as 1-based per the format.  A sector
    /// of 0, which some callers keep as a not-present sentinel, is not an error;
    /// it wraps to one block before the start of the track.
    pub fn to_lba(&self,hpt: usize,spt: usize) -> Result<usize,Error> {
        if hpt<1 || spt<1 {
            error!("CHS mapping was passed 0 geometry ({} heads, {} sectors)",hpt,spt);
            return Err(Error::InvalidArgument);
        }
        // sector 0 wraps here instead of trapping on the subtraction
        let ans = ((self.cylinder*hpt + self.head)*spt).wrapping_add(self.sector.wrapping_sub(1));
        trace!("{} maps to LBA {}",self,ans);
        Ok(ans)
    }
}

impl fmt::Display for ChsAddress {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{}/{}/{}",self.cylinder,self.head,self.sector)
    }
}

impl FromStr for ChsAddress {
    type Err = Error;
    /// Parse an address in `cylinder/head/sector` notation, e.g. `1023/254/63`
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        let fields = s.split('/').map(usize::from_str).collect::<Result<Vec<usize>,_>>();
        match fields {
            Ok(v) if v.len()==3 => Ok(Self::new(v[0],v[1],v[2])),
            _ => {
                debug!("CHS string `{}` was refused",s);
                Err(Error::InvalidInput)
            }
        }
    }
}
