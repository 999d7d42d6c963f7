//! 演示和示例代码
//!
//! 用调度器的公开接口实现的"汽车"进程：在停车与行驶两个状态间交替，
//! 每个状态持续固定时长。进程不依赖协程，而是显式的状态枚举加续延回调。

mod car;
mod scenario;
mod trace;

pub use car::{Car, CarError, CarState};
pub use scenario::{CarSpec, ScenarioError, ScenarioOutcome, ScenarioSpec};
pub use trace::{TraceLog, TraceRecord};
