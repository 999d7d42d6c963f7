//! 队列条目
//!
//! 待执行事件在堆中的表示：按 `(时间, 插入序号)` 组成严格全序。

use super::event::Event;
use super::time::SimTime;
use std::cmp::Ordering;

pub(crate) struct ScheduledEvent {
    pub(crate) seq: u64,
    pub(crate) event: Event,
}

impl ScheduledEvent {
    pub(crate) fn new(seq: u64, event: Event) -> Self {
        Self { seq, event }
    }

    pub(crate) fn at(&self) -> SimTime {
        self.event.time()
    }

    fn key(&self) -> (SimTime, u64) {
        (self.at(), self.seq)
    }
}

// BinaryHeap 是 max-heap：键越小优先级越高，所以比较时交换左右。
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent {}
