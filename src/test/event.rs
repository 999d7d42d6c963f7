use crate::sim::{Action, Event, EventScheduler, SimError};
use std::sync::{Arc, Mutex};

fn noop(_: &mut EventScheduler) -> Result<(), SimError> {
    Ok(())
}

#[test]
fn event_rejects_negative_time() {
    assert!(matches!(
        Event::new(-1.0, noop),
        Err(SimError::InvalidTime { .. })
    ));
    let ev = Event::new(0.0, noop).expect("event at zero");
    assert_eq!(ev.time(), 0.0);
    assert!(!ev.is_cancelled());
    assert!(!ev.is_scheduled());
    assert!(!ev.has_fired());
}

#[test]
fn event_cancel_is_idempotent() {
    let ev = Event::new(4.0, noop).expect("event");
    ev.cancel();
    ev.cancel();
    assert!(ev.is_cancelled());
}

#[test]
fn cancel_after_fire_is_a_no_op() {
    let mut sched = EventScheduler::new();
    let ev = sched.timeout(1.0, noop).expect("timeout");
    sched.step().expect("step");
    assert!(ev.has_fired());

    ev.cancel();
    assert!(!ev.is_cancelled());
}

#[test]
fn event_context_is_retrieved_by_type() {
    let ev = Event::with_context(2.0, noop, String::from("car-0")).expect("event");
    assert_eq!(ev.context::<String>().map(String::as_str), Some("car-0"));
    assert!(ev.context::<u32>().is_none());

    let bare = Event::new(2.0, noop).expect("event");
    assert!(bare.context::<String>().is_none());
}

#[test]
fn clones_share_identity_but_equal_events_do_not() {
    let a = Event::new(1.0, noop).expect("a");
    let b = Event::new(1.0, noop).expect("b");
    let a2 = a.clone();

    assert!(Event::ptr_eq(&a, &a2));
    assert!(!Event::ptr_eq(&a, &b));

    a2.cancel();
    assert!(a.is_cancelled());
    assert!(!b.is_cancelled());
}

#[test]
fn action_name_reports_the_callback_type() {
    let ev = Event::new(1.0, noop).expect("event");
    assert!(ev.action_name().ends_with("noop"), "{}", ev.action_name());
}

#[test]
fn action_runs_at_most_once() {
    let hits = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&hits);
    let ev = Event::new(1.0, move |_| {
        *counter.lock().expect("hits lock") += 1;
        Ok(())
    })
    .expect("event");

    let mut sched = EventScheduler::new();
    sched.schedule(ev.clone()).expect("schedule");
    sched.run(false).expect("run");
    assert!(matches!(
        sched.schedule(ev),
        Err(SimError::AlreadyScheduled { .. })
    ));
    sched.run(false).expect("run again");

    assert_eq!(*hits.lock().expect("hits lock"), 1);
}

struct Record {
    log: Arc<Mutex<Vec<f64>>>,
}

impl Action for Record {
    fn execute(self: Box<Self>, sched: &mut EventScheduler) -> Result<(), SimError> {
        self.log.lock().expect("log lock").push(sched.now().get());
        Ok(())
    }
}

#[test]
fn struct_actions_are_scheduled_like_closures() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let ev = Event::from_action(2.5, Record { log: Arc::clone(&log) }).expect("event");
    assert!(ev.action_name().ends_with("Record"), "{}", ev.action_name());

    let mut sched = EventScheduler::new();
    sched.schedule(ev.clone()).expect("schedule");
    assert!(ev.is_scheduled());
    sched.run(false).expect("run");

    assert_eq!(*log.lock().expect("log lock"), vec![2.5]);
    assert!(ev.has_fired());
}
