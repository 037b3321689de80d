//! Typed view over a 32 byte UART frame.
//!
//! ```text
//! offset  field
//! 0..2    header 0x42 0x4D
//! 2..4    frame length
//! 4..10   PM1.0, PM2.5, PM10 (standard)
//! 10..16  PM1.0, PM2.5, PM10 (atmospheric)
//! 16..28  particle counts, 300 mL .. 10 L
//! 28..30  reserved
//! 30..32  checksum over bytes 0..30
//! ```
//!
//! All multi-byte fields are big-endian.

use crate::types::{
    Concentrations, Measurement, MeasurementContext, ParticleChannel, ParticleCounts,
};

/// Size of a complete frame.
pub const FRAME_LEN: usize = 32;
/// Start-of-frame bytes.
pub const HEADER: [u8; 2] = [0x42, 0x4D];
/// Number of leading bytes covered by the checksum.
pub const CHECKSUM_DATA_LEN: usize = 30;
/// Position of the big-endian checksum.
pub const CHECKSUM_OFFSET: usize = 30;

/// Reasons a frame is rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    #[cfg_attr(feature = "thiserror", error("invalid frame header {0:02x?}"))]
    InvalidHeader([u8; 2]),
    #[cfg_attr(
        feature = "thiserror",
        error("checksum mismatch: frame says {expected:#06x}, computed {computed:#06x}")
    )]
    ChecksumMismatch { expected: u16, computed: u16 },
}

/// Sum of all bytes, wrapping at 2^16.
pub fn checksum(data: &[u8]) -> u16 {
    let mut sum: u16 = 0;
    for byte in data.iter().copied() {
        sum = sum.wrapping_add(byte as u16);
    }
    sum
}

/// Read-only view over a captured frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    bytes: &'a [u8; FRAME_LEN],
}

impl<'a> Frame<'a> {
    /// Wraps captured bytes without validating them.
    pub fn new(bytes: &'a [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw frame bytes.
    pub fn as_bytes(&self) -> &'a [u8; FRAME_LEN] {
        self.bytes
    }

    fn be16(&self, offset: usize) -> u16 {
        u16::from_be_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    /// First two bytes, `0x42 0x4D` in a valid frame.
    pub fn header(&self) -> [u8; 2] {
        [self.bytes[0], self.bytes[1]]
    }

    /// Length field as reported by the sensor. Not used for validation.
    pub fn frame_length(&self) -> u16 {
        self.be16(2)
    }

    /// Checksum stored in the frame.
    pub fn checksum(&self) -> u16 {
        self.be16(CHECKSUM_OFFSET)
    }

    /// Checksum computed over the data window.
    pub fn computed_checksum(&self) -> u16 {
        checksum(&self.bytes[..CHECKSUM_DATA_LEN])
    }

    /// Checks the header and the checksum.
    pub fn validate(&self) -> Result<(), FrameError> {
        let header = self.header();
        if header != HEADER {
            return Err(FrameError::InvalidHeader(header));
        }
        let expected = self.checksum();
        let computed = self.computed_checksum();
        if expected != computed {
            return Err(FrameError::ChecksumMismatch { expected, computed });
        }
        Ok(())
    }

    /// Same as [`Frame::validate`], without the reason.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// PM1.0, PM2.5 and PM10 for the given context.
    pub fn concentrations(&self, context: MeasurementContext) -> Concentrations {
        let base = match context {
            MeasurementContext::Standard => 4,
            MeasurementContext::Atmospheric => 10,
        };
        Concentrations::from([self.be16(base), self.be16(base + 2), self.be16(base + 4)])
    }

    /// Particle count of one channel. Independent of the measurement context.
    pub fn particle_count(&self, channel: ParticleChannel) -> u16 {
        self.be16(channel.frame_offset())
    }

    /// All six particle counts.
    pub fn particle_counts(&self) -> ParticleCounts {
        ParticleCounts::from(ParticleChannel::ALL.map(|channel| self.particle_count(channel)))
    }

    /// Concentrations for `context` plus all particle counts.
    pub fn measurement(&self, context: MeasurementContext) -> Measurement {
        Measurement {
            context,
            concentrations: self.concentrations(context),
            counts: self.particle_counts(),
        }
    }
}
