//! 调度器状态

use serde::{Deserialize, Serialize};
use std::fmt;

/// 调度器是否处于运行循环中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSchedulerStatus {
    /// 初始状态，也是运行循环结束后的静止状态
    #[default]
    Inactive,
    /// `run_until_max_time` / `run` 执行期间
    Active,
}

impl EventSchedulerStatus {
    pub const ALL: [EventSchedulerStatus; 2] =
        [EventSchedulerStatus::Inactive, EventSchedulerStatus::Active];

    pub fn as_str(self) -> &'static str {
        match self {
            EventSchedulerStatus::Inactive => "INACTIVE",
            EventSchedulerStatus::Active => "ACTIVE",
        }
    }
}

impl fmt::Display for EventSchedulerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
