use embedded_hal::i2c::I2c;

use crate::error::Error;
use crate::registers::{Register, MPM10_I2C_ADDRESS};
use crate::sensor::ParticulateSensor;
use crate::types::{
    Concentrations, Measurement, MeasurementContext, Mode, ParticleChannel, ParticleCounts,
};

/// MPM10 attached through I2C.
#[derive(Debug)]
pub struct I2cReader<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> I2cReader<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Creates a reader for a sensor at the default address `0x19`.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, MPM10_I2C_ADDRESS)
    }

    /// Creates a reader for a sensor at `address`.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// I2C address the reader talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Releases the bus.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Reads one big-endian 16-bit register.
    pub fn read_register(&mut self, register: Register) -> Result<u16, Error<E>> {
        let mut buf = [0u8; 2];
        if let Err(e) = self
            .i2c
            .write_read(self.address, &[register.address()], &mut buf)
        {
            warn!("mpm10: reading register {:#x} failed", register.address());
            return Err(Error::Transport(e));
        }
        Ok(u16::from_be_bytes(buf))
    }

    /// Checks whether the sensor acknowledges its address.
    pub fn probe(&mut self) -> bool {
        self.i2c.write(self.address, &[]).is_ok()
    }
}

impl<I2C, E> ParticulateSensor for I2cReader<I2C>
where
    I2C: I2c<Error = E>,
{
    type Error = Error<E>;

    const MODE: Mode = Mode::I2c;

    /// All three registers have to be read successfully, otherwise the whole read fails.
    fn read(&mut self, context: MeasurementContext) -> Result<Concentrations, Self::Error> {
        if !self.probe() {
            debug!("mpm10: no acknowledge from {:#x}", self.address);
            return Err(Error::NotConnected);
        }
        let [pm1_0, pm2_5, pm10] = Register::concentrations(context);
        Ok(Concentrations::from([
            self.read_register(pm1_0)?,
            self.read_register(pm2_5)?,
            self.read_register(pm10)?,
        ]))
    }

    fn read_measurement(
        &mut self,
        context: MeasurementContext,
    ) -> Result<Measurement, Self::Error> {
        let concentrations = self.read(context)?;
        let mut counts = [0u16; 6];
        for (count, channel) in counts.iter_mut().zip(ParticleChannel::ALL) {
            *count = self.particle_count(channel)?;
        }
        Ok(Measurement {
            context,
            concentrations,
            counts: ParticleCounts::from(counts),
        })
    }

    fn particle_count(&mut self, channel: ParticleChannel) -> Result<u16, Self::Error> {
        self.read_register(channel.register())
    }

    fn is_connected(&mut self) -> bool {
        self.probe()
    }
}
