use serde::Serialize;

use crate::errors::{CoreError, CoreResult};

/// Growth rate applied per day when the caller has no better estimate.
pub const DEFAULT_DAILY_RATE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnProjection {
    pub principal: f64,
    pub days: u32,
    pub total_return: f64,
    pub profit: f64,
}

/// Compounds `principal` daily at `daily_rate` for `days`.
pub fn project_return(principal: f64, days: u32, daily_rate: f64) -> CoreResult<ReturnProjection> {
    if !principal.is_finite() || principal < 0.0 {
        return Err(CoreError::InvalidArgument(format!(
            "principal must be a non-negative amount, got {principal}"
        )));
    }
    if !daily_rate.is_finite() || daily_rate < 0.0 {
        return Err(CoreError::InvalidArgument(format!(
            "daily rate must be non-negative, got {daily_rate}"
        )));
    }
    let total_return = principal * (1.0 + daily_rate).powf(days as f64);
    Ok(ReturnProjection {
        principal,
        days,
        total_return,
        profit: total_return - principal,
    })
}
