use jiff::SignedDuration;
use thiserror::Error;

use crate::problem::kmh::Kmh;

pub const DEFAULT_PROVIDER_TIMEOUT: SignedDuration = SignedDuration::from_secs(30);
pub const DEFAULT_DWELL_TIME: SignedDuration = SignedDuration::from_mins(3);
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerParamsError {
    #[error("average speed must be a positive number, got {0} km/h")]
    AverageSpeed(f64),

    #[error("provider timeout must be positive, got {0}")]
    ProviderTimeout(SignedDuration),

    #[error("dwell time cannot be negative, got {0}")]
    DwellTime(SignedDuration),
}

#[derive(Clone, Debug)]
pub struct OptimizerParams {
    /// Bound on the single call made to the routing provider
    pub provider_timeout: SignedDuration,

    /// Speed used to turn estimated distances into travel times
    pub average_speed: Kmh,

    /// Time spent at each stop before leaving for the next one
    pub dwell_time: SignedDuration,
}

impl OptimizerParams {
    pub fn validate(&self) -> Result<(), OptimizerParamsError> {
        if !self.average_speed.is_valid() {
            return Err(OptimizerParamsError::AverageSpeed(
                self.average_speed.value(),
            ));
        }

        if !self.provider_timeout.is_positive() {
            return Err(OptimizerParamsError::ProviderTimeout(self.provider_timeout));
        }

        if self.dwell_time.is_negative() {
            return Err(OptimizerParamsError::DwellTime(self.dwell_time));
        }

        Ok(())
    }
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            average_speed: Kmh::new(DEFAULT_AVERAGE_SPEED_KMH),
            dwell_time: DEFAULT_DWELL_TIME,
        }
    }
}
