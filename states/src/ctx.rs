use std::{
    any::{Any, TypeId, type_name},
    collections::BTreeMap,
};

use flume::{Receiver, Sender};
use log::{debug, error, warn};

use crate::{
    Command, Compute, Dep, Error, Graph, State, StateSyncStatus, TopologyError, Updater,
    subscription::{Change, Subscriber, Subscription, SubscriptionId},
    updater::Update,
};

/// Owner of every state, compute and command in the application.
///
/// The UI reads through `state` / `cached`, writes through `update` / `state_mut`, and
/// triggers behaviour with `dispatch`. Computes are re-run lazily by `run_computed`,
/// in dependency order, only when something they read has changed.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,
    names: BTreeMap<TypeId, &'static str>,
    status: BTreeMap<TypeId, StateSyncStatus>,

    graph: Graph<TypeId>,
    order: Option<Vec<TypeId>>,

    generations: BTreeMap<TypeId, u64>,
    subscribers: BTreeMap<TypeId, Vec<Subscriber>>,
    next_subscription: u64,

    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("pending_updates", &self.recv.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            names: BTreeMap::new(),
            status: BTreeMap::new(),
            graph: Graph::new(),
            order: None,
            generations: BTreeMap::new(),
            subscribers: BTreeMap::new(),
            next_subscription: 0,
            send,
            recv,
        }
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.names.insert(id, type_name::<T>());
        self.graph.add_node(id);
        self.order = None;
        self.states.insert(id, Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        self.names.insert(id, type_name::<T>());
        self.graph.add_node(id);

        let mut deps: Vec<TypeId> = compute.deps().iter().collect();
        deps.sort();
        deps.dedup();
        for dep in deps {
            if let Err(err) = self.graph.route_to(dep, id) {
                warn!("{}: {err}", type_name::<T>());
            }
        }

        self.order = None;
        self.status.insert(id, StateSyncStatus::BeforeInit);
        self.computes.insert(id, Box::new(compute));
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        let id = TypeId::of::<T>();
        self.names.insert(id, type_name::<T>());
        self.commands.insert(id, Box::new(command));
    }

    /// Checks the dependency graph for cycles, naming the offending types.
    pub fn verify_deps(&self) -> Result<(), TopologyError<&'static str>> {
        self.graph
            .topology_order()
            .map(|_| ())
            .map_err(|err| match err {
                TopologyError::CycleDetected(route) => {
                    TopologyError::CycleDetected(route.map(|id| self.name_of(id)))
                }
                TopologyError::DuplicateEdge(route) => {
                    TopologyError::DuplicateEdge(route.map(|id| self.name_of(id)))
                }
            })
    }

    fn name_of(&self, id: TypeId) -> &'static str {
        self.names.get(&id).copied().unwrap_or("<unregistered>")
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never added with `add_state`.
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable access for UI input widgets.
    ///
    /// The state is treated as changed as soon as it is borrowed.
    ///
    /// # Panics
    /// Panics if `T` was never added with `add_state`.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_changed(id);
        match self
            .states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => state,
            None => panic!("{}", Error::state_not_found(type_name::<T>())),
        }
    }

    /// Apply `f` to state `T` and propagate the change.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        let id = TypeId::of::<T>();
        let Some(state) = self
            .states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        else {
            error!("update skipped: {}", Error::state_not_found(type_name::<T>()));
            return;
        };
        f(state);
        self.mark_changed(id);
    }

    /// Latest cached value of compute `T`, if it is registered.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    pub fn sync_status<T: Any>(&self) -> Option<StateSyncStatus> {
        self.status.get(&TypeId::of::<T>()).copied()
    }

    /// Run command `T` now, then apply its writes and refresh affected computes.
    pub fn dispatch<T: Command>(&mut self) {
        if let Err(err) = self.try_dispatch::<T>() {
            error!("dispatch failed: {err}");
        }
    }

    pub fn try_dispatch<T: Command>(&mut self) -> Result<(), Error> {
        let command = self
            .commands
            .get(&TypeId::of::<T>())
            .ok_or_else(|| Error::command_not_found(type_name::<T>()))?;

        debug!("dispatch {}", type_name::<T>());
        command.run(Dep::new(&self.states, &self.computes), self.updater());

        self.sync_computes();
        self.run_computed();
        Ok(())
    }

    /// Apply every queued write from computes and commands.
    pub fn sync_computes(&mut self) {
        while let Ok((id, value)) = self.recv.try_recv() {
            if let Some(state) = self.states.get_mut(&id) {
                state.assign_box(value);
                self.mark_changed(id);
            } else if let Some(compute) = self.computes.get_mut(&id) {
                compute.assign_box(value);
                self.status.insert(id, StateSyncStatus::Clean);
                self.mark_changed(id);
            } else {
                warn!("dropping update for unregistered type {id:?}");
            }
        }
    }

    /// Re-run every compute whose dependencies changed, in dependency order.
    pub fn run_computed(&mut self) {
        for id in self.compute_order() {
            let needs_run = self.status.get(&id).is_some_and(|status| status.needs_run());
            if !needs_run {
                continue;
            }
            let Some(compute) = self.computes.get(&id) else {
                continue;
            };

            compute.compute(Dep::new(&self.states, &self.computes), self.updater());
            // a compute may legitimately publish nothing; it is still up to date
            self.status.insert(id, StateSyncStatus::Clean);
            self.sync_computes();
        }
    }

    fn compute_order(&mut self) -> Vec<TypeId> {
        if let Some(order) = &self.order {
            return order.clone();
        }

        let order: Vec<TypeId> = match self.graph.topology_order() {
            Ok(order) => order
                .into_iter()
                .filter(|id| self.computes.contains_key(id))
                .collect(),
            Err(err) => {
                error!("compute graph is not a DAG, falling back to registration order: {err}");
                self.computes.keys().copied().collect()
            }
        };
        self.order = Some(order.clone());
        order
    }

    fn mark_changed(&mut self, id: TypeId) {
        for dependent in self.graph.dependents(id) {
            if let Some(status) = self.status.get_mut(&dependent) {
                *status = StateSyncStatus::Dirty;
            }
        }
        self.publish(id);
    }

    fn publish(&mut self, topic: TypeId) {
        let generation = self.generations.entry(topic).or_default();
        *generation += 1;
        let change = Change {
            topic,
            generation: *generation,
        };

        if let Some(subscribers) = self.subscribers.get_mut(&topic) {
            subscribers.retain(|subscriber| subscriber.send.send(change).is_ok());
        }
    }

    /// Be notified whenever state or compute `T` changes.
    pub fn subscribe<T: Any>(&mut self) -> Subscription {
        let topic = TypeId::of::<T>();
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        let (send, recv) = flume::unbounded();
        self.subscribers
            .entry(topic)
            .or_default()
            .push(Subscriber { id, send });
        debug!("subscription {id:?} on {}", type_name::<T>());

        Subscription::new(id, topic, recv)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        if let Some(subscribers) = self.subscribers.get_mut(&subscription.topic()) {
            subscribers.retain(|subscriber| subscriber.id != subscription.id());
        }
    }

    pub fn subscriber_count<T: Any>(&self) -> usize {
        self.subscribers
            .get(&TypeId::of::<T>())
            .map_or(0, Vec::len)
    }
}
