//! Protocol commands
//!
//! Argument records for the EBB commands this crate can generate. Every
//! field is a constrained type, so a record that exists is a record that
//! can be formatted.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::bounded::{
    Acceleration, Bounded, Enable2, MaxS2Channels, PenDuration, PortBPin, RcServoMax, RcServoMin,
    S2ChannelDuration, ServoRate, StepCount, StepRate,
};
use super::enums::{
    Clear, Enable1, PenLiftMechanism, PenState, Power, ScParameter, StepperSignalControl, WireEnum,
};
use super::{command_builder, schema, ValidationError};

/// Set Pen State ("SP" command)
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#SP>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPenState {
    /// Requested pen position
    pub value: PenState,
    /// Delay before the next command starts, in milliseconds
    pub duration: Option<PenDuration>,
    /// Alternate output pin; replaces `duration` on the wire
    pub port_b_pin: Option<PortBPin>,
}

impl SetPenState {
    /// Move the pen to `value` with no trailing arguments
    pub fn new(value: PenState) -> Self {
        Self {
            value,
            duration: None,
            port_b_pin: None,
        }
    }

    /// Pen up
    pub fn raise() -> Self {
        Self::new(PenState::Raise)
    }

    /// Pen down
    pub fn lower() -> Self {
        Self::new(PenState::Lower)
    }

    /// Set the move duration
    pub fn with_duration(mut self, duration: PenDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Drive a port B pin instead of the pen servo
    pub fn with_port_b_pin(mut self, pin: PortBPin) -> Self {
        self.port_b_pin = Some(pin);
        self
    }
}

/// Stepper and Servo Mode Configure ("SC" command)
///
/// One variant per parameter slot, each carrying the only payload type that
/// slot accepts.
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#SC>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperServoConfig {
    /// `SC,1`
    PenLiftMechanism(PenLiftMechanism),
    /// `SC,2`
    StepperSignalControl(StepperSignalControl),
    /// `SC,4`
    RcServoMin(RcServoMin),
    /// `SC,5`
    RcServoMax(RcServoMax),
    /// `SC,8`
    MaximumS2Channels(MaxS2Channels),
    /// `SC,9`
    S2ChannelDurationMs(S2ChannelDuration),
    /// `SC,10`, both directions
    ServoRate(ServoRate),
    /// `SC,11`
    ServoRateUp(ServoRate),
    /// `SC,12`
    ServoRateDown(ServoRate),
    /// `SC,13`
    UseAltPrg(Power),
}

impl StepperServoConfig {
    /// Select the pen lift output
    pub fn pen_lift_mechanism(mechanism: PenLiftMechanism) -> Self {
        Self::PenLiftMechanism(mechanism)
    }

    /// Select who drives the stepper signals
    pub fn stepper_signal_control(control: StepperSignalControl) -> Self {
        Self::StepperSignalControl(control)
    }

    /// Servo pen-up position
    pub fn rc_servo_min(position: i64) -> Result<Self, ValidationError> {
        RcServoMin::new(position).map(Self::RcServoMin)
    }

    /// Servo pen-down position
    pub fn rc_servo_max(position: i64) -> Result<Self, ValidationError> {
        RcServoMax::new(position).map(Self::RcServoMax)
    }

    /// Number of `S2` channels
    pub fn maximum_s2_channels(channels: i64) -> Result<Self, ValidationError> {
        MaxS2Channels::new(channels).map(Self::MaximumS2Channels)
    }

    /// Time slot per `S2` channel
    pub fn s2_channel_duration_ms(ms: i64) -> Result<Self, ValidationError> {
        S2ChannelDuration::new(ms).map(Self::S2ChannelDurationMs)
    }

    /// Pen servo slew rate in both directions
    pub fn servo_rate(rate: i64) -> Result<Self, ValidationError> {
        ServoRate::new(rate).map(Self::ServoRate)
    }

    /// Pen servo slew rate when raising
    pub fn servo_rate_up(rate: i64) -> Result<Self, ValidationError> {
        ServoRate::new(rate).map(Self::ServoRateUp)
    }

    /// Pen servo slew rate when lowering
    pub fn servo_rate_down(rate: i64) -> Result<Self, ValidationError> {
        ServoRate::new(rate).map(Self::ServoRateDown)
    }

    /// Use the alternate PRG button input
    pub fn use_alt_prg(power: Power) -> Self {
        Self::UseAltPrg(power)
    }

    /// The power-on value of `parameter`, if the protocol defines one
    pub fn default_for(parameter: ScParameter) -> Option<Self> {
        match parameter {
            ScParameter::RcServoMin => RcServoMin::DEFAULT.map(Self::RcServoMin),
            ScParameter::RcServoMax => RcServoMax::DEFAULT.map(Self::RcServoMax),
            ScParameter::MaximumS2Channels => MaxS2Channels::DEFAULT.map(Self::MaximumS2Channels),
            ScParameter::S2ChannelDurationMs => {
                S2ChannelDuration::DEFAULT.map(Self::S2ChannelDurationMs)
            }
            ScParameter::PenLiftMechanism
            | ScParameter::StepperSignalControl
            | ScParameter::ServoRate
            | ScParameter::ServoRateUp
            | ScParameter::ServoRateDown
            | ScParameter::UseAltPrg => None,
        }
    }

    /// Build from raw wire codes
    ///
    /// `integer` is checked against the domain of the selected parameter;
    /// when omitted, the parameter's default is used if it has one.
    pub fn from_codes(parameter: i64, integer: Option<i64>) -> Result<Self, ValidationError> {
        const FIELD: &str = "integer";

        let parameter = ScParameter::validate("parameter", parameter)?;
        let Some(integer) = integer else {
            return Self::default_for(parameter).ok_or_else(|| ValidationError::missing(FIELD));
        };

        Ok(match parameter {
            ScParameter::PenLiftMechanism => {
                Self::PenLiftMechanism(PenLiftMechanism::validate(FIELD, integer)?)
            }
            ScParameter::StepperSignalControl => {
                Self::StepperSignalControl(StepperSignalControl::validate(FIELD, integer)?)
            }
            ScParameter::RcServoMin => Self::RcServoMin(RcServoMin::validate(FIELD, integer)?),
            ScParameter::RcServoMax => Self::RcServoMax(RcServoMax::validate(FIELD, integer)?),
            ScParameter::MaximumS2Channels => {
                Self::MaximumS2Channels(MaxS2Channels::validate(FIELD, integer)?)
            }
            ScParameter::S2ChannelDurationMs => {
                Self::S2ChannelDurationMs(S2ChannelDuration::validate(FIELD, integer)?)
            }
            ScParameter::ServoRate => Self::ServoRate(ServoRate::validate(FIELD, integer)?),
            ScParameter::ServoRateUp => Self::ServoRateUp(ServoRate::validate(FIELD, integer)?),
            ScParameter::ServoRateDown => {
                Self::ServoRateDown(ServoRate::validate(FIELD, integer)?)
            }
            ScParameter::UseAltPrg => Self::UseAltPrg(Power::validate(FIELD, integer)?),
        })
    }

    /// Parameter slot this value configures
    pub fn parameter(&self) -> ScParameter {
        match self {
            Self::PenLiftMechanism(_) => ScParameter::PenLiftMechanism,
            Self::StepperSignalControl(_) => ScParameter::StepperSignalControl,
            Self::RcServoMin(_) => ScParameter::RcServoMin,
            Self::RcServoMax(_) => ScParameter::RcServoMax,
            Self::MaximumS2Channels(_) => ScParameter::MaximumS2Channels,
            Self::S2ChannelDurationMs(_) => ScParameter::S2ChannelDurationMs,
            Self::ServoRate(_) => ScParameter::ServoRate,
            Self::ServoRateUp(_) => ScParameter::ServoRateUp,
            Self::ServoRateDown(_) => ScParameter::ServoRateDown,
            Self::UseAltPrg(_) => ScParameter::UseAltPrg,
        }
    }

    /// The payload as its raw wire integer
    pub fn integer(&self) -> i64 {
        match *self {
            Self::PenLiftMechanism(m) => i64::from(m.code()),
            Self::StepperSignalControl(c) => i64::from(c.code()),
            Self::RcServoMin(v) => v.wire(),
            Self::RcServoMax(v) => v.wire(),
            Self::MaximumS2Channels(v) => v.wire(),
            Self::S2ChannelDurationMs(v) => v.wire(),
            Self::ServoRate(v) | Self::ServoRateUp(v) | Self::ServoRateDown(v) => v.wire(),
            Self::UseAltPrg(p) => i64::from(p.code()),
        }
    }
}

/// Enable Motors ("EM" command)
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#EM>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnableMotors {
    /// Motor 1 state and global step mode
    pub enable1: Enable1,
    /// Motor 2 state
    pub enable2: Enable2,
}

impl EnableMotors {
    /// Set both motors
    pub fn new(enable1: Enable1, enable2: Enable2) -> Self {
        Self { enable1, enable2 }
    }

    /// Set motor 1 (and with it the global step mode), leaving motor 2 disabled
    pub fn motor1(enable1: Enable1) -> Self {
        Self::new(enable1, Enable2::default())
    }

    /// Microstepping resolution shared by both motors
    pub fn global_step_mode(&self) -> Option<u8> {
        self.enable1.microsteps()
    }
}

/// Field names of the two `LM` axes
pub(crate) const AXIS_FIELDS: [[&str; 3]; 2] =
    [["rate1", "steps1", "accel1"], ["rate2", "steps2", "accel2"]];

/// One axis of a low-level move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    /// Initial step rate
    pub rate: StepRate,
    /// Steps to take; the sign gives the direction
    pub steps: StepCount,
    /// Added to the rate on every tick
    pub accel: Acceleration,
}

impl Axis {
    /// Range-checked axis not tied to a position in the move
    pub fn new(rate: i64, steps: i64, accel: i64) -> Result<Self, ValidationError> {
        Self::validate(
            [StepRate::FIELD, StepCount::FIELD, Acceleration::FIELD],
            rate,
            steps,
            accel,
        )
    }

    /// Axis 1 of a move, rejected as `rate1`/`steps1`/`accel1`
    pub fn first(rate: i64, steps: i64, accel: i64) -> Result<Self, ValidationError> {
        Self::validate(AXIS_FIELDS[0], rate, steps, accel)
    }

    /// Axis 2 of a move, rejected as `rate2`/`steps2`/`accel2`
    pub fn second(rate: i64, steps: i64, accel: i64) -> Result<Self, ValidationError> {
        Self::validate(AXIS_FIELDS[1], rate, steps, accel)
    }

    pub(crate) fn validate(
        fields: [&'static str; 3],
        rate: i64,
        steps: i64,
        accel: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            rate: StepRate::validate(fields[0], rate)?,
            steps: StepCount::validate(fields[1], steps)?,
            accel: Acceleration::validate(fields[2], accel)?,
        })
    }

    /// A constant-rate axis with no acceleration
    pub fn constant(rate: StepRate, steps: StepCount) -> Self {
        Self {
            rate,
            steps,
            accel: Acceleration::ZERO,
        }
    }
}

/// Low-level Move, step-limited ("LM" command)
///
/// See <http://evil-mad.github.io/EggBot/ebb.html#LM>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowLevelMove {
    /// Motor 1
    pub axis1: Axis,
    /// Motor 2
    pub axis2: Axis,
    /// Accumulators to reset before the move
    pub clear: Option<Clear>,
}

impl LowLevelMove {
    /// Move both axes, leaving the accumulators alone
    pub fn new(axis1: Axis, axis2: Axis) -> Self {
        Self {
            axis1,
            axis2,
            clear: None,
        }
    }

    /// Clear accumulators before moving
    pub fn with_clear(mut self, clear: Clear) -> Self {
        self.clear = Some(clear);
        self
    }
}

/// Every command this crate can generate
///
/// Deserializing goes through the same validation as
/// [`schema::parse_command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Command {
    /// Firmware version query ("V" command)
    Version,
    /// Reset to power-on state without dropping USB ("R" command)
    Reset,
    /// Full reboot; the EBB drops off USB and re-enumerates ("RB" command)
    Reboot,
    /// Query motor and FIFO status ("QM" command)
    QueryMotors,
    /// Query the 8-bit general status byte ("QG" command)
    QueryGeneral,
    /// "SP" command
    SetPenState(SetPenState),
    /// "SC" command
    StepperServoConfig(StepperServoConfig),
    /// "EM" command
    EnableMotors(EnableMotors),
    /// "LM" command
    LowLevelMove(LowLevelMove),
}

impl Command {
    /// Wire code identifying the command
    pub fn code(&self) -> &'static str {
        match self {
            Command::Version => "V",
            Command::Reset => "R",
            Command::Reboot => "RB",
            Command::QueryMotors => "QM",
            Command::QueryGeneral => "QG",
            Command::SetPenState(_) => "SP",
            Command::StepperServoConfig(_) => "SC",
            Command::EnableMotors(_) => "EM",
            Command::LowLevelMove(_) => "LM",
        }
    }

    /// Check if the EBB answers this command with data beyond the usual "OK"
    pub fn expects_response(&self) -> bool {
        matches!(
            self,
            Command::Version | Command::QueryMotors | Command::QueryGeneral
        )
    }

    /// Full command line, including the trailing carriage return
    pub fn to_wire(&self) -> String {
        match self {
            Command::Version => command_builder::version(),
            Command::Reset => command_builder::reset(),
            Command::Reboot => command_builder::reboot(),
            Command::QueryMotors => command_builder::query_motors(),
            Command::QueryGeneral => command_builder::query_general(),
            Command::SetPenState(args) => command_builder::set_pen_state(args),
            Command::StepperServoConfig(args) => {
                command_builder::stepper_and_servo_mode_configure(args)
            }
            Command::EnableMotors(args) => command_builder::enable_motors(args),
            Command::LowLevelMove(args) => command_builder::low_level_move(args),
        }
    }

    /// Command line as bytes for the transport
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_wire().into_bytes()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl TryFrom<Value> for Command {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        schema::parse_command(&value)
    }
}

impl From<SetPenState> for Command {
    fn from(args: SetPenState) -> Self {
        Command::SetPenState(args)
    }
}

impl From<StepperServoConfig> for Command {
    fn from(args: StepperServoConfig) -> Self {
        Command::StepperServoConfig(args)
    }
}

impl From<EnableMotors> for Command {
    fn from(args: EnableMotors) -> Self {
        Command::EnableMotors(args)
    }
}

impl From<LowLevelMove> for Command {
    fn from(args: LowLevelMove) -> Self {
        Command::LowLevelMove(args)
    }
}
