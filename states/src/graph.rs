use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt::{Debug, Formatter},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError<T>
where
    T: Debug,
{
    #[error("Cycle detected in dependency graph, from {:?}", .0)]
    CycleDetected(DepRoute<T>),
    #[error("Duplicate edge detected in dependency graph, from {:?} to {:?}", .0.route[0], .0.route[1])]
    DuplicateEdge(DepRoute<T>),
}

pub struct DepRoute<T> {
    // first is the start node, last is the end node
    route: Vec<T>,
}

impl<T> DepRoute<T> {
    pub fn nodes(&self) -> &[T] {
        &self.route
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> DepRoute<U> {
        DepRoute {
            route: self.route.into_iter().map(f).collect(),
        }
    }
}

impl<T> Debug for DepRoute<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Some((last, init)) = self.route.split_last() else {
            return write!(f, "[]");
        };
        for item in init {
            write!(f, "{item:?} -> ")?;
        }
        write!(f, "{last:?}")
    }
}

/// Directed dependency graph: an edge `from -> to` means `to` reads `from`.
#[derive(Debug)]
pub struct Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    edges: BTreeMap<Node, BTreeSet<Node>>,
    nodes: BTreeSet<Node>,
    reach_cache: BTreeMap<Node, BTreeSet<Node>>,
}

impl<Node> Default for Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Node> Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    pub fn new() -> Self {
        Self {
            edges: BTreeMap::new(),
            nodes: BTreeSet::new(),
            reach_cache: BTreeMap::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node);
    }

    pub fn route_to(&mut self, from: Node, to: Node) -> Result<(), TopologyError<Node>> {
        self.nodes.insert(from);
        self.nodes.insert(to);
        if !self.edges.entry(from).or_default().insert(to) {
            return Err(TopologyError::DuplicateEdge(DepRoute {
                route: vec![from, to],
            }));
        }
        self.reach_cache.clear();
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    fn direct(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.edges.get(&node).into_iter().flatten().copied()
    }

    /// Kahn's algorithm. Ties resolve by node order so the result is deterministic.
    pub fn topology_order(&self) -> Result<Vec<Node>, TopologyError<Node>> {
        let mut in_degree: BTreeMap<Node, usize> = self.nodes.iter().map(|n| (*n, 0)).collect();
        for targets in self.edges.values() {
            for to in targets {
                *in_degree.entry(*to).or_default() += 1;
            }
        }

        let mut ready: BTreeSet<Node> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| *node)
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());

        while let Some(node) = ready.pop_first() {
            order.push(node);
            for next in self.direct(node) {
                if let Some(degree) = in_degree.get_mut(&next) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(next);
                    }
                }
            }
        }

        if order.len() == in_degree.len() {
            return Ok(order);
        }

        let remaining: Vec<Node> = in_degree
            .into_iter()
            .filter(|(node, _)| !order.contains(node))
            .map(|(node, _)| node)
            .collect();
        let route = self.find_cycle(&remaining).unwrap_or_default();
        Err(TopologyError::CycleDetected(DepRoute { route }))
    }

    fn find_cycle(&self, nodes: &[Node]) -> Option<Vec<Node>> {
        let mut visited = BTreeSet::new();
        let mut on_path = BTreeSet::new();
        let mut path = Vec::new();
        let mut stack: Vec<(Node, std::vec::IntoIter<Node>)> = Vec::new();

        let neighbours = |node: Node| {
            self.direct(node)
                .filter(|n| nodes.contains(n))
                .collect::<Vec<_>>()
                .into_iter()
        };

        for &start in nodes {
            if !visited.insert(start) {
                continue;
            }
            stack.push((start, neighbours(start)));
            on_path.insert(start);
            path.push(start);

            while let Some((current, next)) = stack.last_mut() {
                if let Some(neighbour) = next.next() {
                    if on_path.contains(&neighbour) {
                        let pos = path.iter().position(|&x| x == neighbour)?;
                        let mut cycle = path[pos..].to_vec();
                        cycle.push(neighbour);
                        return Some(cycle);
                    }
                    if visited.insert(neighbour) {
                        on_path.insert(neighbour);
                        path.push(neighbour);
                        stack.push((neighbour, neighbours(neighbour)));
                    }
                } else {
                    let done = *current;
                    stack.pop();
                    on_path.remove(&done);
                    path.pop();
                }
            }
        }
        None
    }

    /// Every node that transitively depends on `node`.
    pub fn dependents(&mut self, node: Node) -> Vec<Node> {
        if let Some(cached) = self.reach_cache.get(&node) {
            return cached.iter().copied().collect();
        }

        let mut collected = BTreeSet::new();
        let mut queue = VecDeque::from([node]);
        while let Some(current) = queue.pop_front() {
            for next in self.direct(current) {
                // the `collected` check also stops us looping on a cycle
                if collected.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        let result = collected.iter().copied().collect();
        self.reach_cache.insert(node, collected);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_order_respects_edges() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2).unwrap();
        graph.route_to(2, 3).unwrap();
        graph.route_to(1, 3).unwrap();

        assert_eq!(graph.topology_order().unwrap(), vec![1, 2, 3]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn isolated_nodes_are_ordered() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_node(9);
        graph.route_to(4, 5).unwrap();

        assert_eq!(graph.topology_order().unwrap(), vec![4, 5, 9]);
    }

    #[test]
    fn cycle_is_reported_with_route() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2).unwrap();
        graph.route_to(2, 3).unwrap();
        graph.route_to(3, 1).unwrap();

        match graph.topology_order() {
            Err(TopologyError::CycleDetected(route)) => {
                let rendered = format!("{route:?}");
                assert!(rendered.contains("->"));
                assert_eq!(route.nodes().first(), route.nodes().last());
                let err = TopologyError::CycleDetected(route);
                assert!(err.to_string().contains("Cycle detected"));
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2).unwrap();

        match graph.route_to(1, 2) {
            Err(err @ TopologyError::DuplicateEdge(_)) => {
                assert!(err.to_string().contains("from 1 to 2"));
            }
            other => panic!("expected duplicate edge, got {other:?}"),
        }
    }

    #[test]
    fn dependents_are_transitive() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2).unwrap();
        graph.route_to(2, 3).unwrap();
        graph.route_to(4, 3).unwrap();

        assert_eq!(graph.dependents(1), vec![2, 3]);
        assert_eq!(graph.dependents(3), Vec::<u32>::new());

        graph.route_to(3, 5).unwrap();
        assert_eq!(graph.dependents(1), vec![2, 3, 5]);
    }
}
