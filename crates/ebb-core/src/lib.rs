//! # EBB Core Library
//!
//! Typed command generation for the EiBotBoard (EBB) serial protocol.
//!

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Argument records constrained to the EBB's legal ranges and enumerations
//! - Exact `CODE,field,...\r` command line formatting
//! - Validation of untyped (JSON) command objects
//! - Command scripts loaded from JSON
//!
//! Writing the lines to a serial port and reading the replies is left to the
//! caller.
//!
//! ## Example
//!
//! ```rust
//! use ebb_core::protocol::{
//!     command_builder, Enable1, PenDuration, PenLiftMechanism, SetPenState, StepperServoConfig,
//! };
//!
//! let config = StepperServoConfig::pen_lift_mechanism(PenLiftMechanism::RcServoOut);
//! assert_eq!(command_builder::stepper_and_servo_mode_configure(&config), "SC,1,1\r");
//!
//! assert_eq!(command_builder::motors(Enable1::GlobalStepMode1_16, None), "EM,1,0\r");
//!
//! let pen = SetPenState::raise().with_duration(PenDuration::new(500)?);
//! assert_eq!(command_builder::set_pen_state(&pen), "SP,0,500\r");
//! # Ok::<(), ebb_core::protocol::ValidationError>(())
//! ```

pub mod protocol;
pub mod script;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::protocol::{
        Axis, Bounded, Clear, Command, Enable1, Enable2, EnableMotors, LowLevelMove,
        PenLiftMechanism, PenState, Power, ScParameter, SetPenState, StepperServoConfig,
        StepperSignalControl, ValidationError, WireEnum,
    };
    pub use crate::script::{CommandScript, ScriptError};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
