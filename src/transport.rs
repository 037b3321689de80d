//! Byte stream transport used by the UART reader.

use core::fmt::Debug;

use embedded_io::{Read, ReadExactError, ReadReady};

/// A serial port the UART reader can acquire for the duration of one capture.
///
/// `open` is called at the start of every capture and `close` before the capture returns,
/// including when it fails.
pub trait SerialTransport {
    type Error: Debug;

    /// Acquire the port, configured for `baud_rate` 8N1.
    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error>;

    /// Whether at least one byte can be read without blocking.
    fn available(&mut self) -> Result<bool, Self::Error>;

    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Release the port.
    fn close(&mut self) -> Result<(), Self::Error>;
}

impl<T: SerialTransport + ?Sized> SerialTransport for &mut T {
    type Error = T::Error;

    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        (**self).open(baud_rate)
    }

    fn available(&mut self) -> Result<bool, Self::Error> {
        (**self).available()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

/// Adapts an already configured `embedded-io` UART.
///
/// The HAL owns the port configuration, so `open` and `close` do nothing.
pub struct IoSerial<T> {
    io: T,
}

impl<T> IoSerial<T> {
    pub fn new(io: T) -> Self {
        Self { io }
    }

    pub fn destroy(self) -> T {
        self.io
    }
}

impl<T> SerialTransport for IoSerial<T>
where
    T: Read + ReadReady,
{
    type Error = ReadExactError<T::Error>;

    fn open(&mut self, _baud_rate: u32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&mut self) -> Result<bool, Self::Error> {
        self.io.read_ready().map_err(ReadExactError::Other)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        self.io.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
