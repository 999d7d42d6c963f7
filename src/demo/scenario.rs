//! 车队场景配置
//!
//! 从 JSON 描述若干辆车及运行截止时间，例如：
//!
//! ```json
//! { "until": 15, "cars": [ { "name": "car-0", "parking": 5, "driving": 2 } ] }
//! ```

use super::car::{Car, CarError};
use super::trace::{TraceLog, TraceRecord};
use crate::sim::{EventScheduler, SimError, SimTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_PARKING: f64 = 5.0;
pub const DEFAULT_DRIVING: f64 = 2.0;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Car(#[from] CarError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub until: SimTime,
    #[serde(default)]
    pub cars: Vec<CarSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_parking")]
    pub parking: f64,
    #[serde(default = "default_driving")]
    pub driving: f64,
    /// 启动延迟
    #[serde(default)]
    pub start: f64,
}

fn default_parking() -> f64 {
    DEFAULT_PARKING
}

fn default_driving() -> f64 {
    DEFAULT_DRIVING
}

impl Default for CarSpec {
    fn default() -> Self {
        Self {
            name: None,
            parking: DEFAULT_PARKING,
            driving: DEFAULT_DRIVING,
            start: 0.0,
        }
    }
}

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub final_time: SimTime,
    pub events: u64,
    pub trace: Vec<TraceRecord>,
}

impl ScenarioSpec {
    /// `cars` 辆参数相同、同时启动的车
    pub fn fleet(cars: usize, parking: f64, driving: f64, until: f64) -> Result<Self, SimError> {
        Ok(Self {
            until: SimTime::new(until)?,
            cars: (0..cars)
                .map(|_| CarSpec {
                    parking,
                    driving,
                    ..CarSpec::default()
                })
                .collect(),
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// 在新的调度器上启动所有车辆并运行到 `until`。
    pub fn run(&self, logging: bool) -> Result<ScenarioOutcome, ScenarioError> {
        let mut sched = EventScheduler::new();
        let trace = TraceLog::new();

        for (idx, spec) in self.cars.iter().enumerate() {
            let name = spec
                .name
                .clone()
                .unwrap_or_else(|| format!("car-{idx}"));
            Car::new(name, spec.parking, spec.driving, trace.clone())?.start(&mut sched, spec.start)?;
        }

        info!(cars = self.cars.len(), until = %self.until, "开始运行场景");
        sched.run_until_max_time(self.until.get(), logging)?;

        Ok(ScenarioOutcome {
            final_time: sched.now(),
            events: sched.processed_count(),
            trace: trace.snapshot(),
        })
    }
}
