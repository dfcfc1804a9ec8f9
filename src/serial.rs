use std::io::{self, Read};
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use serialport::{ClearBuffer, SerialPort, SerialPortInfo, SerialPortType};

use crate::config::PortSettings;

/// A detected port and the description used to recognise the device on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortCandidate {
    pub name: String,
    pub description: String,
}

impl PortCandidate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl From<SerialPortInfo> for PortCandidate {
    fn from(info: SerialPortInfo) -> Self {
        let description = match &info.port_type {
            SerialPortType::UsbPort(usb) => {
                let parts = [usb.manufacturer.as_deref(), usb.product.as_deref()]
                    .into_iter()
                    .flatten()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>();
                if parts.is_empty() {
                    info.port_name.clone()
                } else {
                    parts.join(" ")
                }
            }
            _ => info.port_name.clone(),
        };

        Self::new(info.port_name, description)
    }
}

pub fn list_ports() -> anyhow::Result<Vec<PortCandidate>> {
    let ports = serialport::available_ports().context("failed to enumerate serial ports")?;
    Ok(ports.into_iter().map(PortCandidate::from).collect())
}

/// First port whose description contains any of `patterns`, in enumeration order.
pub fn select_port<'a>(ports: &'a [PortCandidate], patterns: &[&str]) -> Option<&'a PortCandidate> {
    ports.iter().find(|port| {
        patterns
            .iter()
            .any(|pattern| port.description.contains(pattern))
    })
}

/// Name of the port the sensor board is on, or an error telling the user
/// to check the connection.
pub fn choose_port(ports: &[PortCandidate], patterns: &[&str]) -> anyhow::Result<String> {
    for port in ports {
        tracing::debug!(name = %port.name, description = %port.description, "found serial port");
    }

    match select_port(ports, patterns) {
        Some(port) => Ok(port.name.clone()),
        None => bail!("Arduino not found. Check the connection."),
    }
}

pub fn find_device_port(settings: &PortSettings) -> anyhow::Result<String> {
    choose_port(&list_ports()?, settings.device_patterns)
}

/// Line-oriented input the poll loop reads from.
pub trait LineSource {
    /// Whether a read would find data without waiting.
    fn has_input(&mut self) -> io::Result<bool>;

    /// Reads up to and including the next `\n`. On timeout or end of input
    /// whatever was received so far is returned. The whole call is bounded
    /// by the link timeout, not just each underlying read.
    fn read_line(&mut self) -> io::Result<Vec<u8>>;
}

/// Splits a byte stream into lines, keeping bytes read past a newline for
/// the next call.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the next line, or the partial line once `timeout` has passed
    /// since the call started.
    pub fn read_line<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        timeout: Duration,
    ) -> io::Result<Vec<u8>> {
        let deadline = Instant::now() + timeout;
        let mut chunk = [0u8; 64];
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                return Ok(self.pending.drain(..=pos).collect());
            }

            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(ref e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) => return Err(e),
            }

            if Instant::now() >= deadline {
                break;
            }
        }

        Ok(std::mem::take(&mut self.pending))
    }
}

/// The open connection to the sensor board.
pub struct SerialLink {
    name: String,
    port: Box<dyn SerialPort>,
    buffer: LineBuffer,
    timeout: Duration,
}

impl SerialLink {
    pub fn open(name: &str, settings: &PortSettings) -> anyhow::Result<Self> {
        let port = serialport::new(name, settings.baud_rate)
            .timeout(settings.timeout)
            .open()
            .with_context(|| format!("failed to open {name}"))?;

        // drop whatever the board printed before we attached
        port.clear(ClearBuffer::Input)
            .with_context(|| format!("failed to clear input buffer of {name}"))?;

        Ok(Self {
            name: name.to_owned(),
            port,
            buffer: LineBuffer::default(),
            timeout: settings.timeout,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl LineSource for SerialLink {
    fn has_input(&mut self) -> io::Result<bool> {
        if !self.buffer.is_empty() {
            return Ok(true);
        }
        Ok(self.port.bytes_to_read()? > 0)
    }

    fn read_line(&mut self) -> io::Result<Vec<u8>> {
        self.buffer.read_line(&mut self.port, self.timeout)
    }
}
