//! 调度错误
//!
//! 所有错误都在出错的调用处同步返回，调度器不做重试，被拒绝的事件不会入队。

use super::time::SimTime;
use thiserror::Error;

/// 回调内部错误的装箱类型。
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SimError {
    /// 事件时间为负数或不是有限值
    #[error("invalid event time {time}: logical time must be finite and non-negative")]
    InvalidTime { time: f64 },

    /// `timeout` 的延迟为负数或不是有限值
    #[error("invalid delay {delay}: delay must be finite and non-negative")]
    InvalidDelay { delay: f64 },

    /// 事件时间早于调度器当前时间
    #[error("cannot schedule event at {time}, scheduler is already at {now}")]
    PastScheduling { time: SimTime, now: SimTime },

    /// 同一个事件句柄被调度了两次
    #[error("event at {time} has already been scheduled")]
    AlreadyScheduled { time: SimTime },

    /// 事件回调返回的错误，原样向上传播
    #[error("event action failed: {0}")]
    Action(#[source] BoxError),
}

impl SimError {
    pub fn action(err: impl Into<BoxError>) -> SimError {
        SimError::Action(err.into())
    }
}
