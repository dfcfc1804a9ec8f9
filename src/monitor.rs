use anyhow::Context;
use tracing::{debug, error, warn};

use crate::reading::Reading;
use crate::serial::LineSource;

/// What a single poll did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to read, or only whitespace.
    Idle,
    Updated(Reading),
    /// A line arrived but did not carry a reading.
    Rejected(String),
    Failed(String),
}

/// Owns the line source and the reading currently on screen.
pub struct Monitor<S> {
    source: S,
    current: Option<Reading>,
}

impl<S: LineSource> Monitor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current(&self) -> Option<Reading> {
        self.current
    }

    /// Runs one poll. Errors are logged and never escape; the next tick
    /// starts from scratch.
    pub fn tick(&mut self) -> Tick {
        match self.poll() {
            Ok(Tick::Updated(reading)) => {
                debug!(%reading, hex = %reading.hex(), "reading received");
                self.current = Some(reading);
                Tick::Updated(reading)
            }
            Ok(Tick::Rejected(line)) => {
                warn!("discarding malformed line: {line:?}");
                Tick::Rejected(line)
            }
            Ok(tick) => tick,
            Err(err) => {
                error!("serial poll failed: {err:#}");
                Tick::Failed(format!("{err:#}"))
            }
        }
    }

    fn poll(&mut self) -> anyhow::Result<Tick> {
        if !self.source.has_input().context("failed to query pending input")? {
            return Ok(Tick::Idle);
        }

        let raw = self.source.read_line().context("failed to read line")?;
        let text = String::from_utf8(raw).context("line is not valid UTF-8")?;
        let line = text.trim();
        if line.is_empty() {
            return Ok(Tick::Idle);
        }

        Ok(match Reading::parse(line) {
            Some(reading) => Tick::Updated(reading),
            None => Tick::Rejected(line.to_owned()),
        })
    }
}
