/// UART capture configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate the port is opened with before every capture.
    pub baud_rate: u32,
    /// Idle time after the last received byte that ends a capture, in milliseconds.
    pub timeout_ms: u32,
    /// Delay between polls of an idle port, in microseconds.
    pub poll_interval_us: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            timeout_ms: 1000,
            poll_interval_us: 100,
        }
    }
}

impl UartConfig {
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// A zero interval is raised to 1 µs so an idle port always advances the timeout clock.
    pub fn with_poll_interval_us(mut self, poll_interval_us: u32) -> Self {
        self.poll_interval_us = poll_interval_us.max(1);
        self
    }

    pub(crate) fn timeout_us(&self) -> u64 {
        self.timeout_ms as u64 * 1000
    }
}
