use crate::frame::FrameError;

/// Errors returned by the UART and I2C readers.
///
/// `E` is the error type of the underlying transport.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The serial port or I2C bus reported an error.
    #[cfg_attr(feature = "thiserror", error("transport error: {0:?}"))]
    Transport(E),
    /// The idle timeout elapsed before a full frame was received.
    #[cfg_attr(
        feature = "thiserror",
        error("timed out after receiving {received} of 32 frame bytes")
    )]
    Timeout { received: usize },
    /// The frame did not start with the expected header bytes.
    #[cfg_attr(feature = "thiserror", error("invalid frame header {0:02x?}"))]
    InvalidHeader([u8; 2]),
    /// The frame checksum did not match the sum of the data bytes.
    #[cfg_attr(
        feature = "thiserror",
        error("checksum mismatch: frame says {expected:#06x}, computed {computed:#06x}")
    )]
    ChecksumMismatch { expected: u16, computed: u16 },
    /// The sensor did not acknowledge its address.
    #[cfg_attr(feature = "thiserror", error("sensor not connected"))]
    NotConnected,
}

impl<E> From<FrameError> for Error<E> {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::InvalidHeader(header) => Error::InvalidHeader(header),
            FrameError::ChecksumMismatch { expected, computed } => {
                Error::ChecksumMismatch { expected, computed }
            }
        }
    }
}
