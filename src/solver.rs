//! Visiting-order solver.
//!
//! Builds a path from the depot by repeatedly taking the cheapest edge out of
//! the last placed stop, then optionally improves it with 2-opt moves. Meant
//! for the handful of stops a day trip has, not for large instances.

use tracing::debug;

use crate::error::SolveError;
use crate::matrix::CostMatrix;

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Return to the depot after the last stop.
    pub round_trip: bool,
    /// Maximum improving 2-opt moves; 0 keeps the greedy path as is.
    pub local_search_iterations: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            round_trip: false,
            local_search_iterations: 100,
        }
    }
}

/// A solved visiting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    order: Vec<usize>,
    round_trip: bool,
    total_cost: u64,
    masked_legs: usize,
}

impl Route {
    /// Every location index exactly once, depot first.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn depot(&self) -> usize {
        self.order[0]
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn round_trip(&self) -> bool {
        self.round_trip
    }

    /// Stops in travel order; a round trip ends back at the depot.
    pub fn stops(&self) -> Vec<usize> {
        let mut stops = self.order.clone();
        if self.round_trip && self.order.len() > 1 {
            stops.push(self.order[0]);
        }
        stops
    }

    /// Consecutive `(from, to)` location pairs.
    pub fn legs(&self) -> Vec<(usize, usize)> {
        self.stops().windows(2).map(|pair| (pair[0], pair[1])).collect()
    }

    /// Sum of edge costs, with unknown edges charged
    /// [`UNKNOWN_EDGE_COST`](crate::matrix::UNKNOWN_EDGE_COST).
    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    /// Legs that had to use an edge of unknown cost.
    pub fn masked_legs(&self) -> usize {
        self.masked_legs
    }
}

/// Orders all locations of `matrix` into a path starting at `depot`.
pub fn solve(matrix: &CostMatrix, depot: usize, options: &SolveOptions) -> Result<Route, SolveError> {
    let n = matrix.len();
    if n == 0 {
        return Err(SolveError::Empty);
    }
    if depot >= n {
        return Err(SolveError::DepotOutOfRange { depot, size: n });
    }
    if n > 1 {
        if let Some(index) = (0..n).find(|&node| !matrix.has_known_edge(node)) {
            return Err(SolveError::Unreachable { index });
        }
    }

    let mut order = cheapest_arc_path(matrix, depot);
    let greedy_cost = path_cost(matrix, &order, options.round_trip);
    local_search(&mut order, matrix, options);

    let total_cost = path_cost(matrix, &order, options.round_trip);
    let route = Route {
        masked_legs: masked_legs(matrix, &order, options.round_trip),
        order,
        round_trip: options.round_trip,
        total_cost,
    };
    debug!(
        stops = n,
        greedy_cost,
        total_cost,
        masked_legs = route.masked_legs,
        "solved visiting order"
    );
    Ok(route)
}

/// Greedy construction: extend the path by the cheapest edge out of its last
/// node. Ties go to the lowest index so results are repeatable.
fn cheapest_arc_path(matrix: &CostMatrix, depot: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[depot] = true;
    order.push(depot);

    let mut current = depot;
    while order.len() < n {
        let mut best: Option<(usize, u64)> = None;
        for next in (0..n).filter(|&j| !visited[j]) {
            let cost = matrix.edge_cost(current, next);
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((next, cost));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

fn path_cost(matrix: &CostMatrix, order: &[usize], round_trip: bool) -> u64 {
    let mut cost: u64 = order
        .windows(2)
        .map(|pair| matrix.edge_cost(pair[0], pair[1]))
        .fold(0, u64::saturating_add);
    if round_trip && order.len() > 1 {
        cost = cost.saturating_add(matrix.edge_cost(order[order.len() - 1], order[0]));
    }
    cost
}

fn masked_legs(matrix: &CostMatrix, order: &[usize], round_trip: bool) -> usize {
    let mut legs: Vec<(usize, usize)> = order.windows(2).map(|pair| (pair[0], pair[1])).collect();
    if round_trip && order.len() > 1 {
        legs.push((order[order.len() - 1], order[0]));
    }
    legs.into_iter()
        .filter(|&(from, to)| matrix.get(from, to).is_none())
        .count()
}

/// 2-opt: reverse a segment after the depot if that lowers the path cost.
/// Returns true if an improvement was made.
fn two_opt_improve(order: &mut [usize], matrix: &CostMatrix, round_trip: bool) -> bool {
    let n = order.len();
    if n < 3 {
        return false;
    }

    let current_cost = path_cost(matrix, order, round_trip);
    let mut candidate = order.to_vec();

    for i in 1..n - 1 {
        for j in i + 1..n {
            candidate[i..=j].reverse();
            if path_cost(matrix, &candidate, round_trip) < current_cost {
                order.copy_from_slice(&candidate);
                return true;
            }
            candidate[i..=j].reverse();
        }
    }

    false
}

/// Run 2-opt until no more improvements or max iterations reached.
fn local_search(order: &mut [usize], matrix: &CostMatrix, options: &SolveOptions) {
    for _ in 0..options.local_search_iterations {
        if !two_opt_improve(order, matrix, options.round_trip) {
            break;
        }
    }
}
