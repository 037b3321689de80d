use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::UartConfig;
use crate::i2c::I2cReader;
use crate::sensor::ParticulateSensor;
use crate::transport::SerialTransport;
use crate::types::{Measurement, MeasurementContext, Mode, ParticleChannel, Reading};
use crate::uart::UartReader;

/// MPM10 driver.
///
/// Holds the measurement context and flattens reader errors into the invalid, all-zero
/// [`Reading`] and zero particle counts. Use [`Mpm10::read_measurement`] or the reader
/// returned by [`Mpm10::sensor_mut`] to see why a read failed.
#[derive(Debug)]
pub struct Mpm10<S> {
    sensor: S,
    context: MeasurementContext,
}

impl<S, D> Mpm10<UartReader<S, D>>
where
    S: SerialTransport,
    D: DelayNs,
{
    /// Creates a driver reading frames from a serial port with the default configuration.
    pub fn new_uart(serial: S, delay: D) -> Self {
        Self::new(UartReader::new(serial, delay))
    }

    pub fn new_uart_with_config(serial: S, delay: D, config: UartConfig) -> Self {
        Self::new(UartReader::with_config(serial, delay, config))
    }
}

impl<I2C> Mpm10<I2cReader<I2C>>
where
    I2C: I2c,
{
    /// Creates a driver reading registers at the default I2C address.
    pub fn new_i2c(i2c: I2C) -> Self {
        Self::new(I2cReader::new(i2c))
    }
}

impl<S: ParticulateSensor> Mpm10<S> {
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            context: MeasurementContext::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        S::MODE
    }

    pub fn measurement_context(&self) -> MeasurementContext {
        self.context
    }

    /// Selects the context used by following reads.
    ///
    /// Accepts a [`MeasurementContext`] or its raw `u8` value. Unknown raw values are
    /// ignored and the current context is kept.
    pub fn set_measurement_context<C>(&mut self, context: C)
    where
        C: TryInto<MeasurementContext>,
    {
        match context.try_into() {
            Ok(context) => self.context = context,
            Err(_) => debug!("mpm10: ignoring unknown measurement context"),
        }
    }

    /// Reads PM1.0, PM2.5 and PM10 in the current context.
    pub fn read_data(&mut self) -> Reading {
        Reading::from(self.sensor.read(self.context))
    }

    /// Reads concentrations and all particle counts in one go.
    pub fn read_measurement(&mut self) -> Result<Measurement, S::Error> {
        self.sensor.read_measurement(self.context)
    }

    /// Over UART this performs a full blocking capture.
    pub fn is_connected(&mut self) -> bool {
        self.sensor.is_connected()
    }

    /// Particle count of one channel, or zero if it could not be read.
    pub fn particle_count(&mut self, channel: ParticleChannel) -> u16 {
        self.sensor.particle_count(channel).unwrap_or(0)
    }

    pub fn pm_in_300ml(&mut self) -> u16 {
        self.particle_count(ParticleChannel::In300mL)
    }

    pub fn pm_in_500ml(&mut self) -> u16 {
        self.particle_count(ParticleChannel::In500mL)
    }

    pub fn pm_in_1l(&mut self) -> u16 {
        self.particle_count(ParticleChannel::In1L)
    }

    pub fn pm_in_2_5l(&mut self) -> u16 {
        self.particle_count(ParticleChannel::In2_5L)
    }

    pub fn pm_in_5l(&mut self) -> u16 {
        self.particle_count(ParticleChannel::In5L)
    }

    pub fn pm_in_10l(&mut self) -> u16 {
        self.particle_count(ParticleChannel::In10L)
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Releases the underlying reader.
    pub fn destroy(self) -> S {
        self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::tests::{build_frame, sample_frame};
    use crate::frame::FRAME_LEN;
    use crate::uart::tests::ScriptedSerial;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay as DelayMock;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const INVALID: Reading = Reading {
        pm1_0: 0,
        pm2_5: 0,
        pm10: 0,
        valid: false,
    };

    fn uart(bytes: &[u8]) -> Mpm10<UartReader<ScriptedSerial, DelayMock>> {
        Mpm10::new_uart(ScriptedSerial::new(bytes), DelayMock::new())
    }

    #[test]
    fn defaults_to_standard_context() {
        let mut sensor = uart(&sample_frame());
        assert_eq!(sensor.mode(), Mode::Uart);
        assert_eq!(sensor.measurement_context(), MeasurementContext::Standard);
        assert_eq!(
            sensor.read_data(),
            Reading {
                pm1_0: 10,
                pm2_5: 20,
                pm10: 30,
                valid: true
            }
        );
    }

    #[test]
    fn atmospheric_context() {
        let mut sensor = uart(&sample_frame());
        sensor.set_measurement_context(MeasurementContext::Atmospheric);
        assert_eq!(
            sensor.read_data(),
            Reading {
                pm1_0: 5,
                pm2_5: 15,
                pm10: 25,
                valid: true
            }
        );
    }

    #[test]
    fn raw_context_values() {
        let mut sensor = uart(&[]);
        sensor.set_measurement_context(1u8);
        assert_eq!(sensor.measurement_context(), MeasurementContext::Atmospheric);
        sensor.set_measurement_context(99u8);
        assert_eq!(sensor.measurement_context(), MeasurementContext::Atmospheric);
        sensor.set_measurement_context(0u8);
        assert_eq!(sensor.measurement_context(), MeasurementContext::Standard);
        sensor.set_measurement_context(2u8);
        assert_eq!(sensor.measurement_context(), MeasurementContext::Standard);
    }

    #[test]
    fn short_capture_is_invalid_reading() {
        let bytes = sample_frame();
        let mut sensor = uart(&bytes[..FRAME_LEN - 1]);
        assert_eq!(sensor.read_data(), INVALID);
    }

    #[test]
    fn corrupted_frame_is_invalid_reading() {
        let mut bytes = sample_frame();
        bytes[12] ^= 0x80;
        let mut sensor = uart(&bytes);
        assert_eq!(sensor.read_data(), INVALID);
    }

    #[test]
    fn uart_counts() {
        let frame = build_frame([0; 3], [0; 3], [11, 22, 33, 44, 55, 66]);
        let mut bytes = Vec::new();
        for _ in 0..6 {
            bytes.extend_from_slice(&frame);
        }
        let mut sensor = uart(&bytes);
        assert_eq!(
            [
                sensor.pm_in_300ml(),
                sensor.pm_in_500ml(),
                sensor.pm_in_1l(),
                sensor.pm_in_2_5l(),
                sensor.pm_in_5l(),
                sensor.pm_in_10l(),
            ],
            [11, 22, 33, 44, 55, 66]
        );
        // Nothing left to capture.
        assert_eq!(sensor.pm_in_300ml(), 0);
    }

    #[test]
    fn uart_connectivity_follows_frame_validity() {
        let mut bytes = sample_frame();
        let mut sensor = uart(&bytes);
        assert!(sensor.is_connected());

        bytes[0] = 0;
        let mut sensor = uart(&bytes);
        assert!(!sensor.is_connected());

        let (serial, _) = sensor.destroy().destroy();
        assert_eq!((serial.opened, serial.closed), (1, 1));
    }

    #[test]
    fn i2c_read_data() {
        let expectations = [
            Transaction::write(0x19, vec![]),
            Transaction::write_read(0x19, vec![0x05], vec![0x00, 0x0A]),
            Transaction::write_read(0x19, vec![0x07], vec![0x00, 0x14]),
            Transaction::write_read(0x19, vec![0x09], vec![0x00, 0x1E]),
        ];
        let mut sensor = Mpm10::new_i2c(I2cMock::new(&expectations));
        assert_eq!(sensor.mode(), Mode::I2c);
        assert_eq!(
            sensor.read_data(),
            Reading {
                pm1_0: 10,
                pm2_5: 20,
                pm10: 30,
                valid: true
            }
        );
        let mut mock = sensor.destroy().destroy();
        mock.done();
    }

    #[test]
    fn i2c_partial_failure_is_invalid_reading() {
        let expectations = [
            Transaction::write(0x19, vec![]),
            Transaction::write_read(0x19, vec![0x0B], vec![0x00, 0x05]),
            Transaction::write_read(0x19, vec![0x0D], vec![0x00, 0x0F]),
            Transaction::write_read(0x19, vec![0x0F], vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
        ];
        let mut sensor = Mpm10::new_i2c(I2cMock::new(&expectations));
        sensor.set_measurement_context(MeasurementContext::Atmospheric);
        assert_eq!(sensor.read_data(), INVALID);
        let mut mock = sensor.destroy().destroy();
        mock.done();
    }

    #[test]
    fn i2c_failed_count_is_zero() {
        let expectations = [
            Transaction::write_read(0x19, vec![0x11], vec![0x01, 0x2C]),
            Transaction::write_read(0x19, vec![0x13], vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
            Transaction::write_read(0x19, vec![0x15], vec![0x00, 0x07]),
        ];
        let mut sensor = Mpm10::new_i2c(I2cMock::new(&expectations));
        assert_eq!(sensor.pm_in_300ml(), 300);
        assert_eq!(sensor.pm_in_500ml(), 0);
        assert_eq!(sensor.pm_in_1l(), 7);
        let mut mock = sensor.destroy().destroy();
        mock.done();
    }

    #[test]
    fn i2c_connectivity_uses_presence_probe() {
        let expectations = [
            Transaction::write(0x19, vec![]),
            Transaction::write(0x19, vec![]).with_error(ErrorKind::Other),
        ];
        let mut sensor = Mpm10::new_i2c(I2cMock::new(&expectations));
        assert!(sensor.is_connected());
        assert!(!sensor.is_connected());
        let mut mock = sensor.destroy().destroy();
        mock.done();
    }
}
