use embedded_hal::delay::DelayNs;

use crate::config::UartConfig;
use crate::error::Error;
use crate::frame::{Frame, FRAME_LEN};
use crate::sensor::ParticulateSensor;
use crate::transport::SerialTransport;
use crate::types::{Concentrations, Measurement, MeasurementContext, Mode, ParticleChannel};

/// MPM10 attached through a UART.
///
/// Every read opens the port, captures one 32 byte frame and closes the port again.
pub struct UartReader<S, D> {
    serial: S,
    delay: D,
    config: UartConfig,
    buffer: [u8; FRAME_LEN],
}

impl<S, D> UartReader<S, D>
where
    S: SerialTransport,
    D: DelayNs,
{
    pub fn new(serial: S, delay: D) -> Self {
        Self::with_config(serial, delay, UartConfig::default())
    }

    pub fn with_config(serial: S, delay: D, config: UartConfig) -> Self {
        Self {
            serial,
            delay,
            config,
            buffer: [0; FRAME_LEN],
        }
    }

    pub fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Releases the serial port and delay.
    pub fn destroy(self) -> (S, D) {
        (self.serial, self.delay)
    }

    /// View over the buffer filled by the last capture.
    pub fn last_frame(&self) -> Frame<'_> {
        Frame::new(&self.buffer)
    }

    /// Captures and validates a fresh frame.
    pub fn capture(&mut self) -> Result<Frame<'_>, Error<S::Error>> {
        self.serial
            .open(self.config.baud_rate)
            .map_err(Error::Transport)?;
        let filled = self.fill_buffer();
        let closed = self.serial.close().map_err(Error::Transport);
        let received = filled?;
        closed?;

        trace!("mpm10: captured {} bytes", received);
        if received < FRAME_LEN {
            warn!("mpm10: capture timed out after {} bytes", received);
            return Err(Error::Timeout { received });
        }

        let frame = Frame::new(&self.buffer);
        if let Err(e) = frame.validate() {
            debug!("mpm10: frame rejected: {}", e);
            return Err(e.into());
        }
        Ok(frame)
    }

    /// Reads bytes into the buffer until it is full or the port stays idle for the timeout.
    ///
    /// Every received byte restarts the idle clock. Positions not reached are zeroed.
    fn fill_buffer(&mut self) -> Result<usize, Error<S::Error>> {
        let timeout_us = self.config.timeout_us();
        let poll_us = self.config.poll_interval_us.max(1);
        let mut idle_us: u64 = 0;
        let mut received = 0;

        let result = loop {
            if received == FRAME_LEN {
                break Ok(());
            }
            match self.serial.available() {
                Ok(true) => match self.serial.read_byte() {
                    Ok(byte) => {
                        self.buffer[received] = byte;
                        received += 1;
                        idle_us = 0;
                    }
                    Err(e) => break Err(Error::Transport(e)),
                },
                Ok(false) => {
                    if idle_us >= timeout_us {
                        break Ok(());
                    }
                    self.delay.delay_us(poll_us);
                    idle_us += poll_us as u64;
                }
                Err(e) => break Err(Error::Transport(e)),
            }
        };

        self.buffer[received..].fill(0);
        result.map(|()| received)
    }
}

impl<S, D> ParticulateSensor for UartReader<S, D>
where
    S: SerialTransport,
    D: DelayNs,
{
    type Error = Error<S::Error>;

    const MODE: Mode = Mode::Uart;

    fn read(&mut self, context: MeasurementContext) -> Result<Concentrations, Self::Error> {
        Ok(self.capture()?.concentrations(context))
    }

    fn read_measurement(
        &mut self,
        context: MeasurementContext,
    ) -> Result<Measurement, Self::Error> {
        Ok(self.capture()?.measurement(context))
    }

    fn particle_count(&mut self, channel: ParticleChannel) -> Result<u16, Self::Error> {
        Ok(self.capture()?.particle_count(channel))
    }

    /// Blocks for a full capture; the sensor counts as connected if it produced a valid frame.
    fn is_connected(&mut self) -> bool {
        self.capture().is_ok()
    }
}
