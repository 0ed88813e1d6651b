//! EBB Command Protocol
//!
//! Builds command lines for the EiBotBoard serial protocol used by the
//! EggBot and AxiDraw family of pen plotters.
//!
//! Arguments are validated into typed records, then formatted as
//! `CODE,field,...\r`. See <http://evil-mad.github.io/EggBot/ebb.html>.

pub mod bounded;
pub mod command_builder;
pub mod commands;
pub mod enums;
mod error;
pub mod schema;
pub mod status;

pub use bounded::{
    Acceleration, Bounded, Enable2, MaxS2Channels, PenDuration, PortBPin, RcServoMax, RcServoMin,
    S2ChannelDuration, ServoRate, StepCount, StepRate,
};
pub use command_builder::CommandBuilder;
pub use commands::{Axis, Command, EnableMotors, LowLevelMove, SetPenState, StepperServoConfig};
pub use enums::{
    Clear, Enable1, PenLiftMechanism, PenState, Power, ScParameter, StepperSignalControl, WireEnum,
};
pub use error::{Domain, ValidationError};

/// Command line terminator; the EBB does not accept a linefeed
pub const CR: char = '\r';
