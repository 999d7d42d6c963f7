//! 事件与回调
//!
//! `Event` 是一个可克隆的句柄：调度器持有队列中的那一份，调用方可以保留另一份用于取消。
//! 事件本身不包含任何调度逻辑。

use super::error::SimError;
use super::scheduler::EventScheduler;
use super::time::SimTime;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// 事件回调：可被调度执行。使用 `self: Box<Self>` 以支持 move/所有权转移。
///
/// 闭包通过 [`Event::new`] / [`EventScheduler::timeout`] 传入即可；
/// 需要具名状态的回调可以直接实现此 trait。
pub trait Action: Send + 'static {
    fn execute(self: Box<Self>, sched: &mut EventScheduler) -> Result<(), SimError>;

    /// 用于日志输出的回调名称
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// 把闭包包装成 [`Action`]
pub(crate) struct FnAction<F>(pub(crate) F);

impl<F> Action for FnAction<F>
where
    F: FnOnce(&mut EventScheduler) -> Result<(), SimError> + Send + 'static,
{
    fn execute(self: Box<Self>, sched: &mut EventScheduler) -> Result<(), SimError> {
        (self.0)(sched)
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}

type Context = Box<dyn Any + Send + Sync>;

struct EventInner {
    time: SimTime,
    action_name: &'static str,
    action: Mutex<Option<Box<dyn Action>>>,
    context: Option<Context>,
    cancelled: AtomicBool,
    scheduled: AtomicBool,
    fired: AtomicBool,
}

/// 一个带时间戳的待执行回调。
///
/// 克隆得到的是同一个事件（共享取消标记），而不是副本。
#[derive(Clone)]
pub struct Event {
    inner: Arc<EventInner>,
}

impl Event {
    /// 创建事件。`time` 为负数（或非有限值）时返回 `InvalidTime`。
    ///
    /// 这里不检查任何调度器的当前时间，是否"过去"由 [`EventScheduler::schedule`] 判断。
    pub fn new<F>(time: f64, action: F) -> Result<Event, SimError>
    where
        F: FnOnce(&mut EventScheduler) -> Result<(), SimError> + Send + 'static,
    {
        Ok(Event::build(SimTime::new(time)?, Box::new(FnAction(action)), None))
    }

    /// 同 [`Event::new`]，并附带调用方自用的上下文数据。
    pub fn with_context<F, C>(time: f64, action: F, context: C) -> Result<Event, SimError>
    where
        F: FnOnce(&mut EventScheduler) -> Result<(), SimError> + Send + 'static,
        C: Any + Send + Sync,
    {
        Ok(Event::build(
            SimTime::new(time)?,
            Box::new(FnAction(action)),
            Some(Box::new(context)),
        ))
    }

    pub fn from_action<A: Action>(time: f64, action: A) -> Result<Event, SimError> {
        Ok(Event::build(SimTime::new(time)?, Box::new(action), None))
    }

    pub(crate) fn build(time: SimTime, action: Box<dyn Action>, context: Option<Context>) -> Event {
        Event {
            inner: Arc::new(EventInner {
                time,
                action_name: action.name(),
                action: Mutex::new(Some(action)),
                context,
                cancelled: AtomicBool::new(false),
                scheduled: AtomicBool::new(false),
                fired: AtomicBool::new(false),
            }),
        }
    }

    pub fn time(&self) -> SimTime {
        self.inner.time
    }

    /// 取消事件：出队时跳过回调，但不从队列中移除（惰性删除）。
    ///
    /// 幂等；事件已执行后调用不产生任何效果。
    pub fn cancel(&self) {
        if !self.has_fired() {
            self.inner.cancelled.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Relaxed)
    }

    /// 回调是否已被调用
    pub fn has_fired(&self) -> bool {
        self.inner.fired.load(Ordering::Relaxed)
    }

    /// 是否已交给某个调度器
    pub fn is_scheduled(&self) -> bool {
        self.inner.scheduled.load(Ordering::Relaxed)
    }

    /// 按类型取出上下文；没有上下文或类型不符时返回 `None`。
    pub fn context<T: Any>(&self) -> Option<&T> {
        self.inner.context.as_ref()?.downcast_ref::<T>()
    }

    pub fn action_name(&self) -> &'static str {
        self.inner.action_name
    }

    /// 是否是同一个事件（而不只是时间和回调相同）
    pub fn ptr_eq(a: &Event, b: &Event) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// 标记为已调度，返回之前是否已经被调度过。
    pub(crate) fn mark_scheduled(&self) -> bool {
        self.inner.scheduled.swap(true, Ordering::Relaxed)
    }

    /// 标记为已执行并取出回调；每个事件最多取出一次。
    pub(crate) fn take_action(&self) -> Option<Box<dyn Action>> {
        self.inner.fired.store(true, Ordering::Relaxed);
        self.inner
            .action
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("time", &self.time())
            .field("action", &self.action_name())
            .field("has_context", &self.inner.context.is_some())
            .field("cancelled", &self.is_cancelled())
            .field("fired", &self.has_fired())
            .finish()
    }
}
