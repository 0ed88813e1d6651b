//! `QG` general status bits
//!
//! The EBB answers `QG` with one hex byte. This crate never reads it; the
//! masks are here for the transport layer that does.

/// Motion FIFO holds a queued move
pub const FIFO_NOT_EMPTY: u8 = 1 << 0;
/// Motor 2 is stepping
pub const MOTOR2_MOVING: u8 = 1 << 1;
/// Motor 1 is stepping
pub const MOTOR1_MOVING: u8 = 1 << 2;
/// A motion command is executing
pub const COMMAND_EXECUTING: u8 = 1 << 3;
/// Pen is down
pub const PEN_DOWN: u8 = 1 << 4;
/// PRG button pressed since the last `QB`
pub const PRG_BUTTON: u8 = 1 << 5;
/// Level of pin RB2
pub const GPIO_RB2: u8 = 1 << 6;
/// Level of pin RB5
pub const GPIO_RB5: u8 = 1 << 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_cover_the_byte() {
        let bits = [
            FIFO_NOT_EMPTY,
            MOTOR2_MOVING,
            MOTOR1_MOVING,
            COMMAND_EXECUTING,
            PEN_DOWN,
            PRG_BUTTON,
            GPIO_RB2,
            GPIO_RB5,
        ];
        assert_eq!(bits.iter().fold(0u8, |acc, b| acc | b), 0xFF);
        assert_eq!(bits.iter().map(|b| b.count_ones()).sum::<u32>(), 8);
    }
}
