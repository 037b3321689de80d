use crate::types::MeasurementContext;

/// Default I2C address of the sensor.
pub const MPM10_I2C_ADDRESS: u8 = 0x19;

/// Registers of the I2C interface. Every register holds a big-endian 16-bit value.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    Pm1_0 = 0x05,
    Pm2_5 = 0x07,
    Pm10 = 0x09,
    Pm1_0Atm = 0x0B,
    Pm2_5Atm = 0x0D,
    Pm10Atm = 0x0F,
    Count300mL = 0x11,
    Count500mL = 0x13,
    Count1L = 0x15,
    Count2_5L = 0x17,
    Count5L = 0x19,
    Count10L = 0x1B,
}

impl Register {
    pub fn address(self) -> u8 {
        self as u8
    }

    /// PM1.0, PM2.5 and PM10 registers for the given context.
    pub fn concentrations(context: MeasurementContext) -> [Register; 3] {
        match context {
            MeasurementContext::Standard => [Register::Pm1_0, Register::Pm2_5, Register::Pm10],
            MeasurementContext::Atmospheric => {
                [Register::Pm1_0Atm, Register::Pm2_5Atm, Register::Pm10Atm]
            }
        }
    }
}
