//! 事件调度器
//!
//! 维护逻辑时钟与待执行事件队列，按 `(时间, 插入序号)` 的确定性顺序执行回调。
//! 回调可以在同一个调度器上继续调度事件（包括当前时刻），以此串联出"进程"。

use super::error::SimError;
use super::event::{Action, Event, FnAction};
use super::scheduled_event::ScheduledEvent;
use super::status::EventSchedulerStatus;
use super::time::SimTime;
use std::any::Any;
use std::collections::BinaryHeap;
use std::ops::{Deref, DerefMut};
use tracing::{debug, info, trace};

/// 离散事件调度器：维护当前时间、事件队列与运行状态。
///
/// 单线程、同步执行；多线程生产者需要在外部用 `Mutex` 串行化。
#[derive(Default)]
pub struct EventScheduler {
    now: SimTime,
    next_seq: u64,
    processed: u64,
    status: EventSchedulerStatus,
    q: BinaryHeap<ScheduledEvent>,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn status(&self) -> EventSchedulerStatus {
        self.status
    }

    /// 队列中的事件数（包括已取消、尚未出队的事件）
    pub fn pending_len(&self) -> usize {
        self.q.len()
    }

    pub fn is_idle(&self) -> bool {
        self.q.is_empty()
    }

    /// 队首事件的时间
    pub fn peek_time(&self) -> Option<SimTime> {
        self.q.peek().map(ScheduledEvent::at)
    }

    /// 已出队的事件数（包括被跳过的已取消事件）
    pub fn processed_count(&self) -> u64 {
        self.processed
    }

    /// 把事件加入队列。不会推进时间，也不会执行任何回调。
    ///
    /// 已调度过的事件（包括已执行的）返回 `AlreadyScheduled`，优先于时间检查；
    /// 时间早于 `now` 返回 `PastScheduling`。
    /// 出错时队列保持不变。
    #[tracing::instrument(level = "trace", skip(self, event), fields(schedule_at = %event.time(), action = event.action_name()))]
    pub fn schedule(&mut self, event: Event) -> Result<(), SimError> {
        let at = event.time();
        if event.is_scheduled() {
            return Err(SimError::AlreadyScheduled { time: at });
        }
        if at < self.now {
            return Err(SimError::PastScheduling { time: at, now: self.now });
        }
        if event.mark_scheduled() {
            return Err(SimError::AlreadyScheduled { time: at });
        }

        let seq = self.next_seq;
        trace!(now = %self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent::new(seq, event));

        debug!(queue_size = self.q.len(), "事件已加入队列");
        Ok(())
    }

    /// 在 `now + delay` 调度回调，返回事件句柄（可用于取消）。
    pub fn timeout<F>(&mut self, delay: f64, action: F) -> Result<Event, SimError>
    where
        F: FnOnce(&mut EventScheduler) -> Result<(), SimError> + Send + 'static,
    {
        self.schedule_after(delay, Box::new(FnAction(action)), None)
    }

    /// 同 [`EventScheduler::timeout`]，并附带上下文数据。
    pub fn timeout_with_context<F, C>(
        &mut self,
        delay: f64,
        action: F,
        context: C,
    ) -> Result<Event, SimError>
    where
        F: FnOnce(&mut EventScheduler) -> Result<(), SimError> + Send + 'static,
        C: Any + Send + Sync,
    {
        self.schedule_after(delay, Box::new(FnAction(action)), Some(Box::new(context)))
    }

    /// 以具名 [`Action`] 代替闭包的 `timeout`。
    pub fn timeout_action<A: Action>(&mut self, delay: f64, action: A) -> Result<Event, SimError> {
        self.schedule_after(delay, Box::new(action), None)
    }

    fn schedule_after(
        &mut self,
        delay: f64,
        action: Box<dyn Action>,
        context: Option<Box<dyn Any + Send + Sync>>,
    ) -> Result<Event, SimError> {
        let at = self.now.checked_add(delay)?;
        let event = Event::build(at, action, context);
        self.schedule(event.clone())?;
        Ok(event)
    }

    /// 执行队首的一个事件。
    ///
    /// 队列为空时返回 `Ok(None)` 且时间不变。否则先把 `now` 推进到事件时间，
    /// 再执行回调（已取消的事件跳过回调），无论是否取消都返回出队的事件。
    /// 回调返回的错误原样传播，此时事件已出队、时间已推进。
    pub fn step(&mut self) -> Result<Option<Event>, SimError> {
        self.step_inner(false)
    }

    fn step_inner(&mut self, logging: bool) -> Result<Option<Event>, SimError> {
        let Some(item) = self.q.pop() else {
            return Ok(None);
        };
        self.now = item.at();
        self.processed += 1;

        let ScheduledEvent { seq, event } = item;
        debug!(
            event_num = self.processed,
            now = %self.now,
            seq,
            cancelled = event.is_cancelled(),
            remaining_queue = self.q.len(),
            "执行事件"
        );
        if logging {
            info!(
                now = %self.now,
                seq,
                cancelled = event.is_cancelled(),
                action = event.action_name(),
                "处理事件"
            );
        }

        if !event.is_cancelled() {
            if let Some(action) = event.take_action() {
                action.execute(self)?;
            }
        }
        Ok(Some(event))
    }

    /// 运行直到队列为空或下一个事件晚于 `max_time`，然后把时间推进到 `max_time`。
    ///
    /// 时间恰好等于 `max_time` 的事件会被执行。`max_time < now` 时不执行任何事件，时间不回退。
    /// 运行期间状态为 `Active`，任何方式退出（包括回调出错或 panic）都会恢复原状态。
    /// 之后以更大的 `max_time` 再次调用会从当前状态继续。
    pub fn run_until_max_time(&mut self, max_time: f64, logging: bool) -> Result<(), SimError> {
        let until = SimTime::new(max_time)?;
        let mut guard = ActiveGuard::enter(self);
        let start = guard.processed;
        if logging {
            info!(now = %guard.now, until = %until, queue_size = guard.q.len(), "▶️  运行到 max_time");
        }

        while guard.peek_time().is_some_and(|at| at <= until) {
            guard.step_inner(logging)?;
        }
        guard.now = guard.now.max(until);

        if logging {
            info!(
                total_events = guard.processed - start,
                final_time = %guard.now,
                remaining_queue = guard.q.len(),
                "✅ 运行结束"
            );
        }
        Ok(())
    }

    /// 运行所有事件直到队列为空；结束时 `now` 为最后一个事件的时间。
    pub fn run(&mut self, logging: bool) -> Result<(), SimError> {
        let mut guard = ActiveGuard::enter(self);
        let start = guard.processed;
        if logging {
            info!("▶️  开始运行仿真");
        }
        debug!(now = %guard.now, queue_size = guard.q.len(), "初始状态");

        while !guard.q.is_empty() {
            guard.step_inner(logging)?;
        }

        if logging {
            info!(
                total_events = guard.processed - start,
                final_time = %guard.now,
                "✅ 仿真完成"
            );
        }
        Ok(())
    }
}

/// 运行循环期间持有调度器并把状态置为 `Active`，drop 时恢复进入前的状态。
struct ActiveGuard<'a> {
    sched: &'a mut EventScheduler,
    prev: EventSchedulerStatus,
}

impl<'a> ActiveGuard<'a> {
    fn enter(sched: &'a mut EventScheduler) -> Self {
        let prev = sched.status;
        sched.status = EventSchedulerStatus::Active;
        Self { sched, prev }
    }
}

impl Deref for ActiveGuard<'_> {
    type Target = EventScheduler;

    fn deref(&self) -> &EventScheduler {
        self.sched
    }
}

impl DerefMut for ActiveGuard<'_> {
    fn deref_mut(&mut self) -> &mut EventScheduler {
        self.sched
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.sched.status = self.prev;
    }
}
