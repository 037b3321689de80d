use crate::types::{Concentrations, Measurement, MeasurementContext, Mode, ParticleChannel};

/// Common interface of the UART and I2C readers.
pub trait ParticulateSensor {
    type Error;

    /// Transport this reader talks through.
    const MODE: Mode;

    /// Reads PM1.0, PM2.5 and PM10 in the given context.
    fn read(&mut self, context: MeasurementContext) -> Result<Concentrations, Self::Error>;

    /// Reads the concentrations together with all particle counts.
    ///
    /// Over UART both come from the same frame.
    fn read_measurement(&mut self, context: MeasurementContext)
        -> Result<Measurement, Self::Error>;

    /// Reads a single particle count channel.
    fn particle_count(&mut self, channel: ParticleChannel) -> Result<u16, Self::Error>;

    fn is_connected(&mut self) -> bool;
}
