//! Command Builder
//!
//! Formats validated argument records into EBB command lines.
//!
//! Line format: `CODE[,field]*\r`
//! - fields are base-10 integers, no padding or separators
//! - optional fields are skipped entirely when absent
//! - the terminator is a lone carriage return

use std::fmt::Display;

use super::bounded::Enable2;
use super::commands::{EnableMotors, LowLevelMove, SetPenState, StepperServoConfig};
use super::enums::{Enable1, WireEnum};
use super::CR;

/// Accumulates the comma-separated fields of one command line
pub struct CommandBuilder {
    code: &'static str,
    line: String,
}

impl CommandBuilder {
    /// Start a line with `code`
    pub fn new(code: &'static str) -> Self {
        Self {
            code,
            line: String::from(code),
        }
    }

    /// Append a field
    pub fn field(mut self, value: impl Display) -> Self {
        self.line.push(',');
        self.line.push_str(&value.to_string());
        self
    }

    /// Append a field only if present
    pub fn optional(self, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.field(value),
            None => self,
        }
    }

    /// Terminate the line
    pub fn build(mut self) -> String {
        self.line.push(CR);
        tracing::trace!(code = self.code, line = ?self.line, "built EBB command");
        self.line
    }
}

/// Print the firmware version string
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#V>
pub fn version() -> String {
    CommandBuilder::new("V").build()
}

/// Reinitialize the EBB to its power-on state without dropping off USB
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#R>
pub fn reset() -> String {
    CommandBuilder::new("R").build()
}

/// Drop off USB and reboot as if just plugged in; no output follows
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#RB>
pub fn reboot() -> String {
    CommandBuilder::new("RB").build()
}

/// Query whether a command is executing and which motors are moving
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#QM>
pub fn query_motors() -> String {
    CommandBuilder::new("QM").build()
}

/// Query the general status byte, see [`super::status`] for its bits
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#QG>
pub fn query_general() -> String {
    CommandBuilder::new("QG").build()
}

/// Raise or lower the pen
///
/// A value of 1 moves the servo to servo_min (`SC,4`) and 0 moves it to
/// servo_max (`SC,5`). LOWER is emitted as `1` and RAISE as `0`.
pub fn set_pen_state(args: &SetPenState) -> String {
    CommandBuilder::new("SP")
        .field(args.value.code())
        .optional(args.duration)
        .optional(args.port_b_pin)
        .build()
}

/// Configure one stepper or servo parameter
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#SC>
pub fn stepper_and_servo_mode_configure(args: &StepperServoConfig) -> String {
    CommandBuilder::new("SC")
        .field(args.parameter().code())
        .field(args.integer())
        .build()
}

/// Enable or disable each motor; `enable1` also picks the global step mode
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#EM>
pub fn enable_motors(args: &EnableMotors) -> String {
    CommandBuilder::new("EM")
        .field(args.enable1.code())
        .field(args.enable2)
        .build()
}

/// Set power and step resolution for one or both motors
///
/// Motor 2 stays disabled when `enable2` is omitted.
pub fn motors(enable1: Enable1, enable2: Option<Enable2>) -> String {
    enable_motors(&EnableMotors::new(enable1, enable2.unwrap_or_default()))
}

/// Step both motors with per-axis rate and acceleration
///
/// The clear code is appended as a seventh field only when set.
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#LM>
pub fn low_level_move(args: &LowLevelMove) -> String {
    let (a1, a2) = (&args.axis1, &args.axis2);
    CommandBuilder::new("LM")
        .field(a1.rate)
        .field(a1.steps)
        .field(a1.accel)
        .field(a2.rate)
        .field(a2.steps)
        .field(a2.accel)
        .optional(args.clear.map(WireEnum::code))
        .build()
}
