use core::fmt;

use crate::registers::Register;

/// Measurement context used to interpret the concentration fields.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MeasurementContext {
    /// Standard particle concentrations (CF=1).
    #[default]
    Standard = 0,
    /// Concentrations compensated for the current atmosphere.
    Atmospheric = 1,
}

/// Raw context value outside of the known range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[cfg_attr(feature = "thiserror", error("unknown measurement context {0}"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidContext(pub u8);

impl TryFrom<u8> for MeasurementContext {
    type Error = InvalidContext;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(MeasurementContext::Standard),
            1 => Ok(MeasurementContext::Atmospheric),
            other => Err(InvalidContext(other)),
        }
    }
}

/// Transport the sensor is attached through.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Uart,
    I2c,
}

/// Particle count channel.
///
/// Each channel reports the number of particles above 0.1 µm in the given volume of air.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParticleChannel {
    In300mL,
    In500mL,
    In1L,
    In2_5L,
    In5L,
    In10L,
}

impl ParticleChannel {
    /// All channels in frame order.
    pub const ALL: [ParticleChannel; 6] = [
        ParticleChannel::In300mL,
        ParticleChannel::In500mL,
        ParticleChannel::In1L,
        ParticleChannel::In2_5L,
        ParticleChannel::In5L,
        ParticleChannel::In10L,
    ];

    /// Offset of the big-endian count field inside a UART frame.
    pub(crate) fn frame_offset(self) -> usize {
        match self {
            ParticleChannel::In300mL => 16,
            ParticleChannel::In500mL => 18,
            ParticleChannel::In1L => 20,
            ParticleChannel::In2_5L => 22,
            ParticleChannel::In5L => 24,
            ParticleChannel::In10L => 26,
        }
    }

    /// Register holding this count in I2C mode.
    pub(crate) fn register(self) -> Register {
        match self {
            ParticleChannel::In300mL => Register::Count300mL,
            ParticleChannel::In500mL => Register::Count500mL,
            ParticleChannel::In1L => Register::Count1L,
            ParticleChannel::In2_5L => Register::Count2_5L,
            ParticleChannel::In5L => Register::Count5L,
            ParticleChannel::In10L => Register::Count10L,
        }
    }
}

/// Mass concentrations in µg/m³.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Concentrations {
    /// PM1.0 concentration [µg/m³]
    pub pm1_0: u16,
    /// PM2.5 concentration [µg/m³]
    pub pm2_5: u16,
    /// PM10 concentration [µg/m³]
    pub pm10: u16,
}

impl From<[u16; 3]> for Concentrations {
    fn from(data: [u16; 3]) -> Self {
        Self {
            pm1_0: data[0],
            pm2_5: data[1],
            pm10: data[2],
        }
    }
}

/// Particle counts for all six channels.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParticleCounts {
    pub in_300ml: u16,
    pub in_500ml: u16,
    pub in_1l: u16,
    pub in_2_5l: u16,
    pub in_5l: u16,
    pub in_10l: u16,
}

impl ParticleCounts {
    pub fn get(&self, channel: ParticleChannel) -> u16 {
        match channel {
            ParticleChannel::In300mL => self.in_300ml,
            ParticleChannel::In500mL => self.in_500ml,
            ParticleChannel::In1L => self.in_1l,
            ParticleChannel::In2_5L => self.in_2_5l,
            ParticleChannel::In5L => self.in_5l,
            ParticleChannel::In10L => self.in_10l,
        }
    }
}

impl From<[u16; 6]> for ParticleCounts {
    fn from(data: [u16; 6]) -> Self {
        Self {
            in_300ml: data[0],
            in_500ml: data[1],
            in_1l: data[2],
            in_2_5l: data[3],
            in_5l: data[4],
            in_10l: data[5],
        }
    }
}

/// Concentrations and particle counts taken from the same report.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Context the concentrations were read in.
    pub context: MeasurementContext,
    pub concentrations: Concentrations,
    pub counts: ParticleCounts,
}

/// MPM10 reading in the flat form returned by [`crate::Mpm10::read_data`].
///
/// An invalid reading has all concentrations set to zero.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// PM1.0 concentration [µg/m³]
    pub pm1_0: u16,
    /// PM2.5 concentration [µg/m³]
    pub pm2_5: u16,
    /// PM10 concentration [µg/m³]
    pub pm10: u16,
    /// Whether the values came from a validated frame or successful register reads.
    pub valid: bool,
}

impl From<Concentrations> for Reading {
    fn from(c: Concentrations) -> Self {
        Self {
            pm1_0: c.pm1_0,
            pm2_5: c.pm2_5,
            pm10: c.pm10,
            valid: true,
        }
    }
}

impl<E> From<Result<Concentrations, E>> for Reading {
    fn from(result: Result<Concentrations, E>) -> Self {
        result.map(Reading::from).unwrap_or_default()
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return f.write_str("invalid reading");
        }
        write!(
            f,
            "PM1.0: {} µg/m³; PM2.5: {} µg/m³; PM10: {} µg/m³",
            self.pm1_0, self.pm2_5, self.pm10
        )
    }
}
