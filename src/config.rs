use std::time::Duration;

#[derive(argh::FromArgs, Debug)]
/// show RGB readings from a serial color sensor
pub struct Args {
    #[argh(option, short = 'p')]
    /// serial port to open instead of searching for a known device
    pub port: Option<String>,
}

/// Fixed link parameters for the sensor board.
#[derive(Debug, Clone)]
pub struct PortSettings {
    pub baud_rate: u32,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub device_patterns: &'static [&'static str],
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            timeout: Duration::from_secs(1),
            poll_interval: Duration::from_millis(100),
            device_patterns: &["Arduino", "USB Serial"],
        }
    }
}
