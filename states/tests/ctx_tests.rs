//! Behaviour of `StateCtx`: lazy computes, explicit commands and subscriptions.

use std::any::{Any, TypeId};

use linkup_states::{
    Command, Compute, ComputeDeps, Dep, State, StateCtx, StateSyncStatus, Updater, assign_impl,
    state_assign_impl,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counter(u32);

impl State for Counter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Label(&'static str);

impl State for Label {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Doubled(u32);

impl Compute for Doubled {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none().state::<Counter>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        updater.set(Self(deps.state::<Counter>().0 * 2));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

#[derive(Debug, Default)]
struct Increment;

impl Command for Increment {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        updater.set(Counter(deps.state::<Counter>().0 + 1));
    }
}

fn ctx() -> StateCtx {
    let mut ctx = StateCtx::new();
    ctx.add_state(Counter(1));
    ctx.add_state(Label("start"));
    ctx.record_compute(Doubled::default());
    ctx.record_command(Increment);
    ctx.run_computed();
    ctx
}

#[test]
fn computes_run_once_and_then_only_when_a_dependency_changes() {
    let mut ctx = ctx();
    assert_eq!(ctx.cached::<Doubled>(), Some(&Doubled(2)));
    assert_eq!(ctx.sync_status::<Doubled>(), Some(StateSyncStatus::Clean));

    ctx.update::<Label>(|label| label.0 = "unrelated");
    assert_eq!(ctx.sync_status::<Doubled>(), Some(StateSyncStatus::Clean));

    ctx.update::<Counter>(|counter| counter.0 = 5);
    assert_eq!(ctx.sync_status::<Doubled>(), Some(StateSyncStatus::Dirty));
    ctx.run_computed();
    assert_eq!(ctx.cached::<Doubled>(), Some(&Doubled(10)));
}

#[test]
fn dispatch_applies_writes_before_returning() {
    let mut ctx = ctx();
    ctx.dispatch::<Increment>();

    assert_eq!(ctx.state::<Counter>(), &Counter(2));
    assert_eq!(ctx.cached::<Doubled>(), Some(&Doubled(4)));
}

#[test]
fn unknown_command_is_an_error() {
    let mut ctx = StateCtx::new();
    assert!(ctx.try_dispatch::<Increment>().is_err());
}

#[test]
fn subscribers_see_only_their_topic() {
    let mut ctx = ctx();
    let counter = ctx.subscribe::<Counter>();
    let label = ctx.subscribe::<Label>();

    ctx.update::<Counter>(|counter| counter.0 += 1);
    ctx.update::<Counter>(|counter| counter.0 += 1);

    let change = counter.latest().expect("counter changed");
    assert_eq!(change.topic, TypeId::of::<Counter>());
    assert_eq!(change.generation, 2);
    assert!(!counter.has_changed(), "latest drains the queue");
    assert!(!label.has_changed());
}

#[test]
fn compute_results_are_published_too() {
    let mut ctx = ctx();
    let doubled = ctx.subscribe::<Doubled>();

    ctx.dispatch::<Increment>();

    assert!(doubled.has_changed());
}

#[test]
fn unsubscribe_and_drop_both_end_delivery() {
    let mut ctx = ctx();
    let kept = ctx.subscribe::<Counter>();
    let dropped = ctx.subscribe::<Counter>();
    let removed = ctx.subscribe::<Counter>();
    assert_eq!(ctx.subscriber_count::<Counter>(), 3);

    ctx.unsubscribe(removed);
    assert_eq!(ctx.subscriber_count::<Counter>(), 2);

    drop(dropped);
    ctx.update::<Counter>(|counter| counter.0 += 1);
    assert_eq!(
        ctx.subscriber_count::<Counter>(),
        1,
        "disconnected subscribers are pruned on publish"
    );
    assert!(kept.has_changed());
}
