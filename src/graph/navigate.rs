//! Bounded one-hop-at-a-time navigation toward a target module.
//!
//! Breadth-first by design: when a shallow README and a deep architecture
//! file are both reachable, the shallower node is found first and the
//! cheaper context wins. The hop budget and the visited-set guard are what
//! guarantee termination on malformed cyclic links.

use super::KnowledgeGraph;
use std::collections::{HashMap, HashSet, VecDeque};

/// The outcome of one navigation query.
///
/// On success `visited` is the shortest start-to-target path (k+1 nodes for
/// a shortest path of k hops). On failure it is every node actually visited
/// before the search gave up, in visit order - useful for diagnosing a
/// missing module without ever materializing the whole graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub visited: Vec<String>,
    pub found: bool,
}

/// BFS from `start` following outbound links until a node with
/// `module_id == target_module` is reached or `max_hops` is exhausted.
///
/// An unknown start node or an unreachable target is a normal negative
/// result, not an error.
pub fn navigate(
    graph: &KnowledgeGraph,
    start: &str,
    target_module: &str,
    max_hops: usize,
) -> Navigation {
    if !graph.contains(start) {
        return Navigation {
            visited: Vec::new(),
            found: false,
        };
    }

    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut parents: HashMap<String, String> = HashMap::new();
    let mut visit_order: Vec<String> = Vec::new();

    queue.push_back((start.to_string(), 0));
    seen.insert(start.to_string());
    visit_order.push(start.to_string());

    while let Some((path, depth)) = queue.pop_front() {
        if graph.module_id_of(&path) == Some(target_module) {
            return Navigation {
                visited: chain_to(&parents, start, &path),
                found: true,
            };
        }

        if depth == max_hops {
            continue;
        }

        for neighbor in graph.neighbors(&path) {
            if seen.insert(neighbor.clone()) {
                parents.insert(neighbor.clone(), path.clone());
                visit_order.push(neighbor.clone());
                queue.push_back((neighbor.clone(), depth + 1));
            }
        }
    }

    Navigation {
        visited: visit_order,
        found: false,
    }
}

/// Reconstruct the start-to-target chain from BFS parent links
fn chain_to(parents: &HashMap<String, String>, start: &str, target: &str) -> Vec<String> {
    let mut chain = vec![target.to_string()];
    let mut current = target;
    while current != start {
        // every non-start node on the chain was enqueued with a parent
        let parent = &parents[current];
        chain.push(parent.clone());
        current = parent;
    }
    chain.reverse();
    chain
}
