//! 汽车进程
//!
//! 等价于协程写法：
//!
//! ```text
//! loop {
//!     log("parking"); wait(parking);
//!     log("driving"); wait(driving);
//! }
//! ```
//!
//! 每个 `wait` 都改写成一次 `timeout`，到期后进入下一个状态。

use super::trace::TraceLog;
use crate::sim::{Action, Event, EventScheduler, SimError, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CarError {
    #[error(transparent)]
    Sim(#[from] SimError),

    /// 停车和行驶时长都为 0 时进程会在同一时刻无限循环
    #[error("car {car:?} has zero parking and driving time")]
    ZeroCycle { car: String },

    /// 一个完整周期加到当前时间上后时钟不再前进（浮点精度耗尽）
    #[error("car {car:?} cannot advance the clock past {now}")]
    Stalled { car: String, now: SimTime },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarState {
    Parking,
    Driving,
}

impl CarState {
    pub fn next(self) -> CarState {
        match self {
            CarState::Parking => CarState::Driving,
            CarState::Driving => CarState::Parking,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarState::Parking => "parking",
            CarState::Driving => "driving",
        }
    }
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 汽车进程的参数
#[derive(Debug, Clone)]
pub struct Car {
    name: String,
    parking: f64,
    driving: f64,
    trace: TraceLog,
}

impl Car {
    /// 两个时长必须是非负有限值，且不能同时为 0。
    pub fn new(
        name: impl Into<String>,
        parking: f64,
        driving: f64,
        trace: TraceLog,
    ) -> Result<Car, CarError> {
        let name = name.into();
        SimTime::ZERO.checked_add(parking)?;
        SimTime::ZERO.checked_add(driving)?;
        if parking + driving == 0.0 {
            return Err(CarError::ZeroCycle { car: name });
        }
        Ok(Car {
            name,
            parking,
            driving,
            trace,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 某个状态持续的时长
    pub fn hold(&self, state: CarState) -> f64 {
        match state {
            CarState::Parking => self.parking,
            CarState::Driving => self.driving,
        }
    }

    /// 在 `now + delay` 以停车状态启动进程，返回第一个事件（可用于取消启动）。
    pub fn start(self, sched: &mut EventScheduler, delay: f64) -> Result<Event, SimError> {
        sched.timeout_action(
            delay,
            EnterState {
                car: self,
                state: CarState::Parking,
            },
        )
    }
}

/// 续延：到期时进入 `state`，记录日志并调度下一个状态。
struct EnterState {
    car: Car,
    state: CarState,
}

impl Action for EnterState {
    fn execute(self: Box<Self>, sched: &mut EventScheduler) -> Result<(), SimError> {
        let EnterState { car, state } = *self;
        let now = sched.now();
        debug!(car = car.name(), state = %state, now = %now, "状态切换");

        if now.checked_add(car.parking + car.driving)? <= now {
            return Err(SimError::action(CarError::Stalled {
                car: car.name().to_string(),
                now,
            }));
        }
        car.trace.record(now, car.name(), state);

        let hold = car.hold(state);
        sched.timeout_action(
            hold,
            EnterState {
                car,
                state: state.next(),
            },
        )?;
        Ok(())
    }
}
