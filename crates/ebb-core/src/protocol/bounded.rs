//! Range-constrained integer arguments
//!
//! Each type only holds values inside its inclusive protocol range; the
//! constructors are the single place the range is checked. Types with a
//! power-on default expose it as `DEFAULT` and through [`Default`].

use std::fmt;

use super::ValidationError;

/// An integer newtype with an inclusive legal range
pub trait Bounded: Copy + Sized {
    /// Field name used when the value is rejected outside a record context
    const FIELD: &'static str;
    /// Smallest legal value
    const MIN: i64;
    /// Largest legal value
    const MAX: i64;
    /// Power-on value substituted when the field is omitted
    const DEFAULT: Option<Self>;

    /// Check `value` against the range, reporting `field` on failure
    fn validate(field: &'static str, value: i64) -> Result<Self, ValidationError>;

    /// Value as emitted on the wire
    fn wire(self) -> i64;
}

macro_rules! bounded_integer {
    (@default $ty:ident) => { None };
    (@default $ty:ident $default:expr) => { Some($ty($default)) };
    (
        $(#[$meta:meta])*
        pub struct $ty:ident($repr:ty) in $min:expr, $max:expr;
        field = $field:literal
        $(, default = $default:expr)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $ty($repr);

        impl $ty {
            /// Smallest legal value
            pub const MIN: $repr = $min;
            /// Largest legal value
            pub const MAX: $repr = $max;

            /// Range-checked constructor, reporting `FIELD` on failure
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                <Self as Bounded>::validate(<Self as Bounded>::FIELD, value)
            }

            /// Raw value
            pub fn get(self) -> $repr {
                self.0
            }
        }

        impl Bounded for $ty {
            const FIELD: &'static str = $field;
            const MIN: i64 = $min as i64;
            const MAX: i64 = $max as i64;
            const DEFAULT: Option<Self> = bounded_integer!(@default $ty $($default)?);

            fn validate(field: &'static str, value: i64) -> Result<Self, ValidationError> {
                if (<Self as Bounded>::MIN..=<Self as Bounded>::MAX).contains(&value) {
                    Ok(Self(value as $repr))
                } else {
                    Err(ValidationError::out_of_range(
                        field,
                        value,
                        <Self as Bounded>::MIN,
                        <Self as Bounded>::MAX,
                    ))
                }
            }

            fn wire(self) -> i64 {
                i64::from(self.0)
            }
        }

        impl TryFrom<i64> for $ty {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$ty> for i64 {
            fn from(value: $ty) -> i64 {
                i64::from(value.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        $(
            impl Default for $ty {
                fn default() -> Self {
                    $ty($default)
                }
            }
        )?
    };
}

bounded_integer! {
    /// Pen move duration for `SP`, in milliseconds
    pub struct PenDuration(u16) in 1, u16::MAX;
    field = "duration"
}

bounded_integer! {
    /// Port B pin used as the pen output for `SP`
    pub struct PortBPin(u8) in 1, 7;
    field = "portBpin"
}

bounded_integer! {
    /// `SC,4` servo minimum (pen up), in 83.3 ns units
    pub struct RcServoMin(u16) in 1, u16::MAX;
    field = "integer",
    default = 12000
}

bounded_integer! {
    /// `SC,5` servo maximum (pen down), in 83.3 ns units
    pub struct RcServoMax(u16) in 1, u16::MAX;
    field = "integer",
    default = 16000
}

bounded_integer! {
    /// `SC,8` number of RC servo PWM channels cycled by `S2`
    pub struct MaxS2Channels(u8) in 1, 24;
    field = "integer",
    default = 8
}

bounded_integer! {
    /// `SC,9` milliseconds between successive `S2` channels
    pub struct S2ChannelDuration(u8) in 1, 6;
    field = "integer",
    default = 3
}

bounded_integer! {
    /// `SC,10`/`11`/`12` servo slew rate, same units as the `S2` rate
    pub struct ServoRate(u16) in 0, u16::MAX;
    field = "integer"
}

bounded_integer! {
    /// `LM` step rate register value
    pub struct StepRate(u32) in 0, i32::MAX as u32;
    field = "rate"
}

bounded_integer! {
    /// `LM` signed step count; `i32::MIN` is not representable on the wire
    pub struct StepCount(i32) in -i32::MAX, i32::MAX;
    field = "steps"
}

bounded_integer! {
    /// `LM` signed acceleration register value
    pub struct Acceleration(i32) in -i32::MAX, i32::MAX;
    field = "accel"
}

impl Acceleration {
    /// Constant velocity
    pub const ZERO: Acceleration = Acceleration(0);
}

bounded_integer! {
    /// Motor 2 enable code for `EM`
    ///
    /// `0` disables motor 2. Every nonzero code only enables it: the step
    /// mode is global and owned by motor 1's code.
    pub struct Enable2(u8) in 0, 5;
    field = "enable2",
    default = 0
}

impl Enable2 {
    /// `DISABLE_MOTOR`
    pub const DISABLE_MOTOR: Enable2 = Enable2(0);
    /// `ENABLE_MOTOR_2`
    pub const ENABLE_MOTOR_2: Enable2 = Enable2(1);

    /// Protocol names accepted in place of a code
    pub const NAMES: &'static [&'static str] = &["DISABLE_MOTOR", "ENABLE_MOTOR_2"];

    /// Look up one of [`Enable2::NAMES`]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DISABLE_MOTOR" => Some(Self::DISABLE_MOTOR),
            "ENABLE_MOTOR_2" => Some(Self::ENABLE_MOTOR_2),
            _ => None,
        }
    }

    /// Whether motor 2 is powered
    pub fn is_enabled(self) -> bool {
        self.0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_accepted() {
        assert_eq!(PenDuration::new(1).unwrap().get(), 1);
        assert_eq!(PenDuration::new(65535).unwrap().get(), 65535);
        for pin in 1..=7 {
            assert!(PortBPin::new(pin).is_ok(), "pin {pin}");
        }
        assert_eq!(StepRate::new(2_147_483_647).unwrap().get(), i32::MAX as u32);
        assert_eq!(StepCount::new(-2_147_483_647).unwrap().get(), -i32::MAX);
        assert_eq!(ServoRate::new(0).unwrap().get(), 0);
    }

    #[test]
    fn test_one_past_boundaries_rejected() {
        assert!(PenDuration::new(0).is_err());
        assert!(PenDuration::new(65536).is_err());
        assert!(PortBPin::new(0).is_err());
        assert!(PortBPin::new(8).is_err());
        assert!(MaxS2Channels::new(25).is_err());
        assert!(S2ChannelDuration::new(7).is_err());
        assert!(StepRate::new(-1).is_err());
        assert!(StepRate::new(2_147_483_648).is_err());
        assert!(StepCount::new(-2_147_483_648).is_err());
        assert!(Acceleration::new(2_147_483_648).is_err());
        assert!(Enable2::new(6).is_err());
    }

    #[test]
    fn test_rejection_names_field() {
        let err = PortBPin::new(9).unwrap_err();
        assert_eq!(err.field, "portBpin");
        assert_eq!(err.value.as_deref(), Some("9"));

        let err = StepCount::validate("steps2", i64::MIN).unwrap_err();
        assert_eq!(err.field, "steps2");
    }

    #[test]
    fn test_new_reports_own_field() {
        assert_eq!(PenDuration::new(0).unwrap_err().field, PenDuration::FIELD);
        assert_eq!(StepRate::new(-1).unwrap_err().field, StepRate::FIELD);
        assert_eq!(Enable2::new(6).unwrap_err().field, "enable2");
    }

    #[test]
    fn test_defaults_satisfy_their_domain() {
        fn check<T: Bounded + PartialEq + std::fmt::Debug>(expected: i64) {
            let default = T::DEFAULT.unwrap();
            assert_eq!(default.wire(), expected);
            assert_eq!(T::validate(T::FIELD, expected).unwrap(), default);
        }
        check::<RcServoMin>(12000);
        check::<RcServoMax>(16000);
        check::<MaxS2Channels>(8);
        check::<S2ChannelDuration>(3);
        check::<Enable2>(0);
        assert!(ServoRate::DEFAULT.is_none());
        assert!(PenDuration::DEFAULT.is_none());
    }

    #[test]
    fn test_enable2_names() {
        assert_eq!(Enable2::from_name("ENABLE_MOTOR_2"), Some(Enable2::ENABLE_MOTOR_2));
        assert_eq!(Enable2::from_name("GLOBAL_STEP_MODE_1_16"), None);
        assert!(Enable2::new(5).unwrap().is_enabled());
        assert!(!Enable2::default().is_enabled());
    }
}
