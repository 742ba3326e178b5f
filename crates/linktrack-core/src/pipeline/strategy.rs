use tracing::info;

use crate::frame::PhysicalPosition;
use crate::serial::MotorCommand;

/// Control policy: maps the green, blue and red joint positions (cm) to motor
/// speeds.
///
/// Any `FnMut(green, blue, red) -> (speed_a, speed_b)` closure is a strategy.
/// Output is saturated to `[-1, 1]` before encoding, so implementations need
/// not clamp.
pub trait ActuationStrategy: Send {
    fn actuate(
        &mut self,
        green: PhysicalPosition,
        blue: PhysicalPosition,
        red: PhysicalPosition,
    ) -> MotorCommand;
}

impl<F> ActuationStrategy for F
where
    F: FnMut(PhysicalPosition, PhysicalPosition, PhysicalPosition) -> (f64, f64) + Send,
{
    fn actuate(
        &mut self,
        green: PhysicalPosition,
        blue: PhysicalPosition,
        red: PhysicalPosition,
    ) -> MotorCommand {
        let (speed_a, speed_b) = self(green, blue, red);
        MotorCommand::new(speed_a, speed_b)
    }
}

/// Keeps both motors stopped. Useful for calibrating the vision side alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldStill;

impl ActuationStrategy for HoldStill {
    fn actuate(&mut self, _: PhysicalPosition, _: PhysicalPosition, _: PhysicalPosition) -> MotorCommand {
        MotorCommand::STOP
    }
}

/// Logs every set of joint positions before delegating.
pub struct LogPositions<S> {
    inner: S,
}

impl<S: ActuationStrategy> LogPositions<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ActuationStrategy> ActuationStrategy for LogPositions<S> {
    fn actuate(
        &mut self,
        green: PhysicalPosition,
        blue: PhysicalPosition,
        red: PhysicalPosition,
    ) -> MotorCommand {
        info!(
            green = ?(green.x as i64, green.y as i64),
            blue = ?(blue.x as i64, blue.y as i64),
            red = ?(red.x as i64, red.y as i64),
            "joint positions (cm)"
        );
        self.inner.actuate(green, blue, red)
    }
}
