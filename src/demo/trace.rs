//! 进程状态切换记录

use super::car::CarState;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// 一次状态切换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub time: SimTime,
    pub car: String,
    pub state: CarState,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: start {} at {}", self.car, self.state, self.time)
    }
}

/// 多个进程共享的切换日志；克隆得到同一份日志。
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    records: Arc<Mutex<Vec<TraceRecord>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, time: SimTime, car: &str, state: CarState) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TraceRecord {
                time,
                car: car.to_string(),
                state,
            });
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 当前日志的快照
    pub fn snapshot(&self) -> Vec<TraceRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
