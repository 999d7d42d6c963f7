//! 仿真时间类型
//!
//! 定义逻辑时间（单位由调用方约定）及其校验规则。

use super::error::SimError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// 逻辑仿真时间：有限且非负的 `f64`。
///
/// 构造时即完成校验，因此 `SimTime` 可以安全地实现全序。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// 负数、NaN、无穷大均返回 `InvalidTime`。
    pub fn new(time: f64) -> Result<SimTime, SimError> {
        if time.is_finite() && time >= 0.0 {
            // -0.0 统一成 0.0，避免 Display 输出 "-0"
            Ok(SimTime(time + 0.0))
        } else {
            Err(SimError::InvalidTime { time })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// 在当前时间上加一个非负延迟。
    pub fn checked_add(self, delay: f64) -> Result<SimTime, SimError> {
        if !(delay.is_finite() && delay >= 0.0) {
            return Err(SimError::InvalidDelay { delay });
        }
        SimTime::new(self.0 + delay)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialEq<f64> for SimTime {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for SimTime {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl TryFrom<f64> for SimTime {
    type Error = SimError;

    fn try_from(time: f64) -> Result<Self, Self::Error> {
        SimTime::new(time)
    }
}

impl From<u32> for SimTime {
    fn from(time: u32) -> Self {
        SimTime(f64::from(time))
    }
}

impl From<SimTime> for f64 {
    fn from(time: SimTime) -> Self {
        time.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
