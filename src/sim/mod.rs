//! 调度核心模块
//!
//! 此模块包含离散事件仿真的核心组件：逻辑时间、事件、调度器及其状态与错误类型。

// 子模块声明
mod error;
mod event;
mod scheduled_event;
mod scheduler;
mod status;
mod time;

// 重新导出公共接口
pub use error::{BoxError, SimError};
pub use event::{Action, Event};
pub use scheduler::EventScheduler;
pub use status::EventSchedulerStatus;
pub use time::SimTime;
