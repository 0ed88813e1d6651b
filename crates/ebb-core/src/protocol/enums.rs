//! Wire-code enumerations
//!
//! Every enumerated EBB argument is a closed set of named integer codes.
//! Each set is its own Rust type, so a code from one set can never stand in
//! for a code from another even when the numbers coincide.

use super::ValidationError;

/// A closed enumeration with a fixed integer code per member
pub trait WireEnum: Copy + Sized + 'static {
    /// Protocol name of the enumeration, used in error messages
    const NAME: &'static str;

    /// `(name, code)` for every member, in code order
    const MEMBERS: &'static [(&'static str, u8)];

    /// Integer emitted on the wire
    fn code(self) -> u8;

    /// Protocol name of this member
    fn name(self) -> &'static str;

    /// Member with wire code `code`, if there is one
    fn from_code(code: i64) -> Option<Self>;

    /// Member with protocol name `name`; names of other enumerations never match
    fn from_name(name: &str) -> Option<Self>;

    /// Look up a member by code, reporting `field` on failure
    fn validate(field: &'static str, code: i64) -> Result<Self, ValidationError> {
        Self::from_code(code)
            .ok_or_else(|| ValidationError::not_a_member(field, code, Self::NAME, Self::MEMBERS))
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $ty:ident as $wire:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $name:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $ty {
            $(
                #[doc = concat!("`", $name, "` (", stringify!($code), ")")]
                $(#[$vmeta])*
                $variant = $code,
            )+
        }

        impl WireEnum for $ty {
            const NAME: &'static str = $wire;
            const MEMBERS: &'static [(&'static str, u8)] = &[$( ($name, $code), )+];

            fn code(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }

            fn from_code(code: i64) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl TryFrom<i64> for $ty {
            type Error = ValidationError;

            fn try_from(code: i64) -> Result<Self, Self::Error> {
                <Self as WireEnum>::validate(stringify!($ty), code)
            }
        }
    };
}

wire_enum! {
    /// Logical pen position for `SP`
    ///
    /// The wire value is inverted relative to the servo travel: RAISE sends
    /// `0` and LOWER sends `1`.
    pub enum PenState as "PEN_STATE" {
        Raise = 0 => "RAISE",
        Lower = 1 => "LOWER",
    }
}

wire_enum! {
    /// `SC` parameter slots
    ///
    /// See <http://evil-mad.github.io/EggBot/ebb.html#SC>
    pub enum ScParameter as "SC" {
        PenLiftMechanism = 1 => "PEN_LIFT_MECHANISM",
        StepperSignalControl = 2 => "STEPPER_SIGNAL_CONTROL",
        /// Pen up position, in 83.3 ns units
        RcServoMin = 4 => "RC_SERVO_MIN",
        /// Pen down position, in 83.3 ns units
        RcServoMax = 5 => "RC_SERVO_MAX",
        MaximumS2Channels = 8 => "MAXIMUM_S2_CHANNELS",
        S2ChannelDurationMs = 9 => "S2_CHANNEL_DURATION_MS",
        ServoRate = 10 => "SERVO_RATE",
        ServoRateUp = 11 => "SERVO_RATE_UP",
        ServoRateDown = 12 => "SERVO_RATE_DOWN",
        /// Alternate pause button function on RB0 (RB2 on EBB v1.1)
        UseAltPrg = 13 => "USE_ALT_PRG",
    }
}

wire_enum! {
    /// Output driving the pen lift
    pub enum PenLiftMechanism as "PEN_LIFT_MECHANISM" {
        SolenoidOut = 0 => "SOLENOID_OUT",
        RcServoOut = 1 => "RC_SERVO_OUT",
        SolenoidAndRcServoOut = 2 => "SOLENOID_AND_RC_SERVO_OUT",
    }
}

wire_enum! {
    /// Where the stepper driver signals come from
    pub enum StepperSignalControl as "STEPPER_SIGNAL_CONTROL" {
        Microcontroller = 0 => "MICROCONTROLLER",
        External = 1 => "EXTERNAL",
        Disconnect = 2 => "DISCONNECT",
    }
}

wire_enum! {
    /// On/off switch for boolean `SC` slots
    pub enum Power as "POWER" {
        Off = 0 => "OFF",
        On = 1 => "ON",
    }
}

wire_enum! {
    /// Motor 1 enable code for `EM`
    ///
    /// Any nonzero code also sets the global step mode, which applies to
    /// both motors.
    pub enum Enable1 as "ENABLE_1" {
        DisableMotor = 0 => "DISABLE_MOTOR",
        GlobalStepMode1_16 = 1 => "GLOBAL_STEP_MODE_1_16",
        GlobalStepMode1_8 = 2 => "GLOBAL_STEP_MODE_1_8",
        GlobalStepMode1_4 = 3 => "GLOBAL_STEP_MODE_1_4",
        GlobalStepMode1_2 = 4 => "GLOBAL_STEP_MODE_1_2",
        GlobalStepModeFull = 5 => "GLOBAL_STEP_MODE_FULL",
    }
}

impl Enable1 {
    /// Whether motor 1 is powered
    pub fn is_enabled(self) -> bool {
        self != Enable1::DisableMotor
    }

    /// Microsteps per full step selected for both motors, `None` when disabled
    pub fn microsteps(self) -> Option<u8> {
        match self {
            Enable1::DisableMotor => None,
            Enable1::GlobalStepMode1_16 => Some(16),
            Enable1::GlobalStepMode1_8 => Some(8),
            Enable1::GlobalStepMode1_4 => Some(4),
            Enable1::GlobalStepMode1_2 => Some(2),
            Enable1::GlobalStepModeFull => Some(1),
        }
    }
}

wire_enum! {
    /// Motion queue clearing for `LM`
    pub enum Clear as "CLEAR" {
        NoClear = 0 => "NONE",
        Clear1 = 1 => "CLEAR_1",
        Clear2 = 2 => "CLEAR_2",
        ClearBoth = 3 => "CLEAR_BOTH",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_protocol() {
        assert_eq!(ScParameter::PenLiftMechanism.code(), 1);
        assert_eq!(ScParameter::RcServoMin.code(), 4);
        assert_eq!(ScParameter::UseAltPrg.code(), 13);
        assert_eq!(PenLiftMechanism::RcServoOut.code(), 1);
        assert_eq!(StepperSignalControl::Disconnect.code(), 2);
        assert_eq!(Clear::ClearBoth.code(), 3);
    }

    #[test]
    fn test_members_are_exhaustive() {
        for &(name, code) in ScParameter::MEMBERS {
            let by_code = ScParameter::from_code(i64::from(code)).unwrap();
            let by_name = ScParameter::from_name(name).unwrap();
            assert_eq!(by_code, by_name);
            assert_eq!(by_code.name(), name);
        }
        assert_eq!(ScParameter::MEMBERS.len(), 10);
    }

    #[test]
    fn test_unused_sc_codes_rejected() {
        for code in [0, 3, 6, 7, 14] {
            assert!(ScParameter::from_code(code).is_none(), "code {code}");
        }
    }

    #[test]
    fn test_names_are_scoped_to_their_enumeration() {
        assert!(PenLiftMechanism::from_name("DISCONNECT").is_none());
        assert!(Enable1::from_name("ENABLE_MOTOR_2").is_none());
        assert_eq!(
            StepperSignalControl::from_name("DISCONNECT"),
            Some(StepperSignalControl::Disconnect)
        );
    }

    #[test]
    fn test_try_from_reports_enumeration() {
        let err = Enable1::try_from(6).unwrap_err();
        assert_eq!(err.value.as_deref(), Some("6"));
        assert!(err.to_string().contains("ENABLE_1 member"));
    }

    #[test]
    fn test_global_step_mode() {
        assert_eq!(Enable1::DisableMotor.microsteps(), None);
        assert_eq!(Enable1::GlobalStepMode1_16.microsteps(), Some(16));
        assert_eq!(Enable1::GlobalStepModeFull.microsteps(), Some(1));
        assert!(!Enable1::DisableMotor.is_enabled());
    }
}
