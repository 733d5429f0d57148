//! Raspberry Pi GPIO binding backed by `rppal`.

use std::time::Duration;

use rpireboot_core::{Edge, InputLine, Level, LineError, LineRegistry, Pull};
use rppal::gpio::{self, Gpio, InputPin, Pin, Trigger};
use tracing::{debug, warn};

/// Access to the SoC's GPIO lines, addressed as `GPIO<n>` (BCM numbering).
pub struct RppalGpio {
    gpio: Gpio,
}

impl RppalGpio {
    pub fn new() -> Result<Self, gpio::Error> {
        Ok(Self { gpio: Gpio::new()? })
    }
}

impl LineRegistry for RppalGpio {
    type Line = RppalLine;

    fn by_name(&self, name: &str) -> Option<RppalLine> {
        let bcm = parse_line_name(name)?;
        match self.gpio.get(bcm) {
            Ok(pin) => {
                debug!(pin = bcm, "Acquired GPIO line");
                Some(RppalLine {
                    state: Some(LineState::Idle(pin)),
                })
            }
            Err(e) => {
                warn!(pin = bcm, error = %e, "GPIO line unavailable");
                None
            }
        }
    }
}

/// Accepts `GPIO18`, `gpio18` and `18`.
fn parse_line_name(name: &str) -> Option<u8> {
    let name = name.trim();
    let digits = match name.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("gpio") => &name[4..],
        _ => name,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

enum LineState {
    Idle(Pin),
    Input(InputPin),
}

/// One GPIO line, unconfigured until [`InputLine::configure_input`] succeeds.
pub struct RppalLine {
    state: Option<LineState>,
}

fn trigger(edge: Edge) -> Trigger {
    match edge {
        Edge::Rising => Trigger::RisingEdge,
        Edge::Falling => Trigger::FallingEdge,
        Edge::Both => Trigger::Both,
    }
}

fn hardware(e: gpio::Error) -> LineError {
    LineError::Hardware(e.to_string())
}

fn level(level: gpio::Level) -> Level {
    Level::from(level == gpio::Level::High)
}

impl InputLine for RppalLine {
    fn configure_input(&mut self, pull: Pull, edge: Edge) -> Result<(), LineError> {
        let pin = match self.state.take() {
            Some(LineState::Idle(pin)) => pin,
            Some(configured @ LineState::Input(_)) => {
                self.state = Some(configured);
                return Err(LineError::AlreadyConfigured);
            }
            None => return Err(LineError::NotConfigured),
        };

        let mut input = match pull {
            Pull::Up => pin.into_input_pullup(),
            Pull::Down => pin.into_input_pulldown(),
            Pull::Float => pin.into_input(),
        };
        input.set_interrupt(trigger(edge), None).map_err(hardware)?;

        self.state = Some(LineState::Input(input));
        Ok(())
    }

    fn wait_for_edge(&mut self, timeout: Option<Duration>) -> Result<bool, LineError> {
        match &mut self.state {
            Some(LineState::Input(input)) => input
                .poll_interrupt(false, timeout)
                .map(|event| event.is_some())
                .map_err(hardware),
            _ => Err(LineError::NotConfigured),
        }
    }

    fn read(&self) -> Result<Level, LineError> {
        match &self.state {
            Some(LineState::Input(input)) => Ok(level(input.read())),
            Some(LineState::Idle(pin)) => Ok(level(pin.read())),
            None => Err(LineError::NotConfigured),
        }
    }
}
