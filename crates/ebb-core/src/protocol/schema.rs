//! Untyped input validation
//!
//! Turns `serde_json::Value` objects into command records. Field names follow
//! the EBB documentation (`portBpin`, `rate1`, ...) and the command is chosen
//! by a `"command"` field holding its wire code:
//!
//! ```json
//! {"command": "SC", "parameter": "PEN_LIFT_MECHANISM", "integer": "RC_SERVO_OUT"}
//! ```
//!
//! Enumerated fields take a member name or a numeric code. Names are only
//! looked up in the enumeration the field expects. `null` counts as absent.
//! Unknown fields are ignored.

use serde_json::{Map, Value};

use super::bounded::{
    Acceleration, Bounded, Enable2, MaxS2Channels, PenDuration, PortBPin, RcServoMax, RcServoMin,
    S2ChannelDuration, ServoRate, StepCount, StepRate,
};
use super::commands::{
    Axis, Command, EnableMotors, LowLevelMove, SetPenState, StepperServoConfig, AXIS_FIELDS,
};
use super::enums::{Clear, Enable1, PenState, ScParameter, WireEnum};
use super::{Domain, ValidationError};

/// Wire codes accepted in the `"command"` field
pub const COMMAND_CODES: &[&str] = &["V", "R", "RB", "QM", "QG", "SP", "SC", "EM", "LM"];

const PEN_STATES: &[&str] = &["RAISE", "LOWER"];

/// Validate a command object of any kind
pub fn parse_command(value: &Value) -> Result<Command, ValidationError> {
    let obj = object("command", value)?;
    let code = required(obj, "command")?;

    match code.as_str() {
        Some("V") => Ok(Command::Version),
        Some("R") => Ok(Command::Reset),
        Some("RB") => Ok(Command::Reboot),
        Some("QM") => Ok(Command::QueryMotors),
        Some("QG") => Ok(Command::QueryGeneral),
        Some("SP") => set_pen_state(obj).map(Command::SetPenState),
        Some("SC") => stepper_servo_config(obj).map(Command::StepperServoConfig),
        Some("EM") => enable_motors(obj).map(Command::EnableMotors),
        Some("LM") => low_level_move(obj).map(Command::LowLevelMove),
        _ => Err(ValidationError::not_a_keyword("command", code, COMMAND_CODES)),
    }
}

/// Validate the arguments of an `SP` object
pub fn set_pen_state(obj: &Map<String, Value>) -> Result<SetPenState, ValidationError> {
    let value = required(obj, "value")?;
    let state = value
        .as_str()
        .and_then(PenState::from_name)
        .ok_or_else(|| ValidationError::not_a_keyword("value", value, PEN_STATES))?;

    Ok(SetPenState {
        value: state,
        duration: optional(obj, "duration")
            .map(|v| bounded::<PenDuration>("duration", v))
            .transpose()?,
        port_b_pin: optional(obj, "portBpin")
            .map(|v| bounded::<PortBPin>("portBpin", v))
            .transpose()?,
    })
}

/// Validate the arguments of an `SC` object
///
/// `integer` may be omitted for parameters with a power-on default.
pub fn stepper_servo_config(
    obj: &Map<String, Value>,
) -> Result<StepperServoConfig, ValidationError> {
    const FIELD: &str = "integer";

    let parameter = member::<ScParameter>("parameter", required(obj, "parameter")?)?;
    let integer = optional(obj, FIELD);
    let enumerated = || integer.ok_or_else(|| ValidationError::missing(FIELD));

    Ok(match parameter {
        ScParameter::PenLiftMechanism => {
            StepperServoConfig::PenLiftMechanism(member(FIELD, enumerated()?)?)
        }
        ScParameter::StepperSignalControl => {
            StepperServoConfig::StepperSignalControl(member(FIELD, enumerated()?)?)
        }
        ScParameter::RcServoMin => {
            StepperServoConfig::RcServoMin(bounded_or_default::<RcServoMin>(FIELD, integer)?)
        }
        ScParameter::RcServoMax => {
            StepperServoConfig::RcServoMax(bounded_or_default::<RcServoMax>(FIELD, integer)?)
        }
        ScParameter::MaximumS2Channels => StepperServoConfig::MaximumS2Channels(
            bounded_or_default::<MaxS2Channels>(FIELD, integer)?,
        ),
        ScParameter::S2ChannelDurationMs => StepperServoConfig::S2ChannelDurationMs(
            bounded_or_default::<S2ChannelDuration>(FIELD, integer)?,
        ),
        ScParameter::ServoRate => {
            StepperServoConfig::ServoRate(bounded_or_default::<ServoRate>(FIELD, integer)?)
        }
        ScParameter::ServoRateUp => {
            StepperServoConfig::ServoRateUp(bounded_or_default::<ServoRate>(FIELD, integer)?)
        }
        ScParameter::ServoRateDown => {
            StepperServoConfig::ServoRateDown(bounded_or_default::<ServoRate>(FIELD, integer)?)
        }
        ScParameter::UseAltPrg => StepperServoConfig::UseAltPrg(member(FIELD, enumerated()?)?),
    })
}

/// Validate the arguments of an `EM` object
pub fn enable_motors(obj: &Map<String, Value>) -> Result<EnableMotors, ValidationError> {
    let enable1 = member::<Enable1>("enable1", required(obj, "enable1")?)?;
    let enable2 = match optional(obj, "enable2") {
        None => Enable2::default(),
        Some(value) => match value.as_str() {
            Some(name) => Enable2::from_name(name).ok_or_else(|| {
                ValidationError::not_a_keyword("enable2", value, Enable2::NAMES)
            })?,
            None => bounded::<Enable2>("enable2", value)?,
        },
    };

    Ok(EnableMotors::new(enable1, enable2))
}

/// Validate the arguments of an `LM` object
pub fn low_level_move(obj: &Map<String, Value>) -> Result<LowLevelMove, ValidationError> {
    let axis = |[rate, steps, accel]: [&'static str; 3]| -> Result<Axis, ValidationError> {
        Ok(Axis {
            rate: bounded::<StepRate>(rate, required(obj, rate)?)?,
            steps: bounded::<StepCount>(steps, required(obj, steps)?)?,
            accel: bounded::<Acceleration>(accel, required(obj, accel)?)?,
        })
    };

    Ok(LowLevelMove {
        axis1: axis(AXIS_FIELDS[0])?,
        axis2: axis(AXIS_FIELDS[1])?,
        clear: optional(obj, "clear")
            .map(|v| member::<Clear>("clear", v))
            .transpose()?,
    })
}

fn object<'a>(field: &'static str, value: &'a Value) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::wrong_type(field, value, Domain::Object))
}

fn optional<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, ValidationError> {
    optional(obj, field).ok_or_else(|| ValidationError::missing(field))
}

/// Read a whole number, saturating at the `i64` bounds
///
/// Fractional, non-finite and non-numeric values are rejected.
fn integer(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let wrong_type = || ValidationError::wrong_type(field, value, Domain::Integer);
    let Value::Number(n) = value else {
        return Err(wrong_type());
    };

    if let Some(i) = n.as_i64() {
        Ok(i)
    } else if n.as_u64().is_some() {
        Ok(i64::MAX)
    } else {
        match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
            _ => Err(wrong_type()),
        }
    }
}

fn bounded<T: Bounded>(field: &'static str, value: &Value) -> Result<T, ValidationError> {
    T::validate(field, integer(field, value)?).map_err(|err| ValidationError {
        value: Some(value.to_string()),
        ..err
    })
}

fn bounded_or_default<T: Bounded>(
    field: &'static str,
    value: Option<&Value>,
) -> Result<T, ValidationError> {
    match value {
        Some(value) => bounded(field, value),
        None => T::DEFAULT.ok_or_else(|| ValidationError::missing(field)),
    }
}

fn member<E: WireEnum>(field: &'static str, value: &Value) -> Result<E, ValidationError> {
    let found = match value {
        Value::String(name) => E::from_name(name),
        Value::Number(_) => integer(field, value).ok().and_then(E::from_code),
        _ => None,
    };
    found.ok_or_else(|| ValidationError::not_a_member(field, value, E::NAME, E::MEMBERS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::enums::{PenLiftMechanism, StepperSignalControl};
    use serde_json::json;

    fn parse(value: Value) -> Result<Command, ValidationError> {
        parse_command(&value)
    }

    #[test]
    fn test_pen_state_from_json() {
        let cmd = parse(json!({"command": "SP", "value": "RAISE", "duration": 500})).unwrap();
        assert_eq!(cmd.to_wire(), "SP,0,500\r");

        let cmd = parse(json!({"command": "SP", "value": "LOWER", "duration": null})).unwrap();
        assert_eq!(cmd.to_wire(), "SP,1\r");
    }

    #[test]
    fn test_pen_state_rejects_codes() {
        let err = parse(json!({"command": "SP", "value": 1})).unwrap_err();
        assert_eq!(err.field, "value");
        assert_eq!(err.expected, Domain::Keyword(PEN_STATES));
    }

    #[test]
    fn test_wrong_type_and_fraction() {
        let err = parse(json!({"command": "SP", "value": "RAISE", "duration": "500"})).unwrap_err();
        assert_eq!(err.field, "duration");
        assert_eq!(err.expected, Domain::Integer);

        let err = parse(json!({"command": "SP", "value": "RAISE", "duration": 1.5})).unwrap_err();
        assert_eq!(err.expected, Domain::Integer);

        let cmd = parse(json!({"command": "SP", "value": "RAISE", "duration": 2.0})).unwrap();
        assert_eq!(cmd.to_wire(), "SP,0,2\r");
    }

    #[test]
    fn test_out_of_range_reports_supplied_value() {
        let err = parse(json!({"command": "SP", "value": "RAISE", "portBpin": 8})).unwrap_err();
        assert_eq!(err.field, "portBpin");
        assert_eq!(err.value.as_deref(), Some("8"));
        assert_eq!(err.expected, Domain::Range { min: 1, max: 7 });

        let err = parse(json!({
            "command": "LM",
            "rate1": u64::MAX, "steps1": 0, "accel1": 0,
            "rate2": 0, "steps2": 0, "accel2": 0
        }))
        .unwrap_err();
        assert_eq!(err.field, "rate1");
        assert_eq!(err.value, Some(u64::MAX.to_string()));
    }

    #[test]
    fn test_sc_names_and_codes() {
        let by_name = parse(json!({
            "command": "SC", "parameter": "PEN_LIFT_MECHANISM", "integer": "RC_SERVO_OUT"
        }))
        .unwrap();
        let by_code = parse(json!({"command": "SC", "parameter": 1, "integer": 1})).unwrap();
        assert_eq!(by_name, by_code);
        assert_eq!(
            by_name,
            Command::StepperServoConfig(StepperServoConfig::PenLiftMechanism(
                PenLiftMechanism::RcServoOut
            ))
        );
    }

    #[test]
    fn test_sc_rejects_member_of_other_enumeration() {
        let err = parse(json!({
            "command": "SC", "parameter": "PEN_LIFT_MECHANISM", "integer": "DISCONNECT"
        }))
        .unwrap_err();
        assert_eq!(err.field, "integer");
        assert!(matches!(
            err.expected,
            Domain::Member { enumeration: "PEN_LIFT_MECHANISM", .. }
        ));

        let ok = parse(json!({
            "command": "SC", "parameter": "STEPPER_SIGNAL_CONTROL", "integer": "DISCONNECT"
        }))
        .unwrap();
        assert_eq!(
            ok,
            Command::StepperServoConfig(StepperServoConfig::StepperSignalControl(
                StepperSignalControl::Disconnect
            ))
        );
    }

    #[test]
    fn test_sc_defaults_and_required() {
        let cmd = parse(json!({"command": "SC", "parameter": "RC_SERVO_MAX"})).unwrap();
        assert_eq!(cmd.to_wire(), "SC,5,16000\r");

        let err = parse(json!({"command": "SC", "parameter": "SERVO_RATE_UP"})).unwrap_err();
        assert_eq!(err, ValidationError::missing("integer"));

        let err = parse(json!({"command": "SC", "parameter": "USE_ALT_PRG"})).unwrap_err();
        assert_eq!(err, ValidationError::missing("integer"));
    }

    #[test]
    fn test_em_from_json() {
        let cmd = parse(json!({"command": "EM", "enable1": "GLOBAL_STEP_MODE_1_16"})).unwrap();
        assert_eq!(cmd.to_wire(), "EM,1,0\r");

        let cmd = parse(json!({"command": "EM", "enable1": 5, "enable2": "ENABLE_MOTOR_2"})).unwrap();
        assert_eq!(cmd.to_wire(), "EM,5,1\r");

        let err = parse(json!({"command": "EM", "enable1": "ENABLE_MOTOR_2"})).unwrap_err();
        assert_eq!(err.field, "enable1");

        let err = parse(json!({"command": "EM", "enable1": 0, "enable2": 6})).unwrap_err();
        assert_eq!(err.field, "enable2");
    }

    #[test]
    fn test_lm_missing_axis_field() {
        let err = parse(json!({
            "command": "LM",
            "rate1": 1, "steps1": 1, "accel1": 1,
            "rate2": 1, "accel2": 1
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::missing("steps2"));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse(json!({"command": "XM"})).unwrap_err();
        assert_eq!(err.field, "command");
        assert_eq!(err.expected, Domain::Keyword(COMMAND_CODES));

        let err = parse(json!(["SP"])).unwrap_err();
        assert_eq!(err.expected, Domain::Object);
    }

    #[test]
    fn test_validation_does_not_mutate_input() {
        let input = json!({"command": "SC", "parameter": "RC_SERVO_MIN"});
        let before = input.clone();
        parse_command(&input).unwrap();
        assert_eq!(input, before);
    }
}
