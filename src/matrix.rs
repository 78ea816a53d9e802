//! Pairwise distance matrices and the cost view the solver works on.

use std::ops::Range;

use tracing::{debug, warn};

use crate::error::{ProviderError, SolveError};
use crate::location::Place;
use crate::traits::{CostMetric, DistanceMatrixProvider, MatrixBlock, MatrixElement, TravelMode};

/// Cost charged for an edge whose distance is unknown.
///
/// Large enough that any path over known edges is preferred, small enough
/// that a handful of them summed never overflows.
pub const UNKNOWN_EDGE_COST: u64 = 1_000_000_000;

/// Square matrix of travel metrics indexed by place order.
///
/// Diagonal entries are never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Option<MatrixElement>>,
}

impl DistanceMatrix {
    /// A matrix of the given size with every entry unknown.
    pub fn unknown(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, from: usize, to: usize) -> Option<MatrixElement> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells[from * self.size + to]
    }

    pub fn set(&mut self, from: usize, to: usize, element: Option<MatrixElement>) {
        if from < self.size && to < self.size {
            self.cells[from * self.size + to] = element;
        }
    }

    pub fn distance(&self, from: usize, to: usize) -> Option<u64> {
        self.get(from, to).map(|e| e.distance_meters)
    }

    pub fn duration(&self, from: usize, to: usize) -> Option<u64> {
        self.get(from, to).map(|e| e.duration_seconds)
    }

    /// Number of off-diagonal pairs with no value.
    pub fn unknown_pairs(&self) -> usize {
        (0..self.size)
            .flat_map(|i| (0..self.size).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j && self.get(i, j).is_none())
            .count()
    }

    /// Projects the matrix onto the metric the route should minimize.
    pub fn cost_matrix(&self, metric: CostMetric) -> CostMatrix {
        let cells = self
            .cells
            .iter()
            .map(|cell| {
                cell.map(|e| match metric {
                    CostMetric::Distance => e.distance_meters,
                    CostMetric::Duration => e.duration_seconds,
                })
            })
            .collect();
        CostMatrix {
            size: self.size,
            cells,
        }
    }
}

/// Square matrix of optional edge costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    size: usize,
    cells: Vec<Option<u64>>,
}

impl CostMatrix {
    /// Builds a cost matrix from rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<Option<u64>>>) -> Result<Self, SolveError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(SolveError::NotSquare {
                    row,
                    len: values.len(),
                    size,
                });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    /// Fully known matrix; convenient for tests and estimates.
    pub fn from_costs(rows: Vec<Vec<u64>>) -> Result<Self, SolveError> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Known cost of the edge, if any.
    pub fn get(&self, from: usize, to: usize) -> Option<u64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells[from * self.size + to]
    }

    /// Cost the solver charges: unknown edges become [`UNKNOWN_EDGE_COST`].
    pub fn edge_cost(&self, from: usize, to: usize) -> u64 {
        if from == to {
            return 0;
        }
        self.get(from, to).unwrap_or(UNKNOWN_EDGE_COST)
    }

    /// Whether the node has at least one known edge to or from another node.
    pub fn has_known_edge(&self, node: usize) -> bool {
        (0..self.size)
            .filter(|&other| other != node)
            .any(|other| self.get(node, other).is_some() || self.get(other, node).is_some())
    }
}

/// Requests every pairwise distance for `places`, batched to the provider's
/// limits.
///
/// A failed block leaves only its own cells unknown. The call fails only if
/// every block failed.
pub fn build_matrix<P>(
    provider: &P,
    places: &[Place],
    mode: TravelMode,
) -> Result<DistanceMatrix, ProviderError>
where
    P: DistanceMatrixProvider + ?Sized,
{
    let n = places.len();
    let mut matrix = DistanceMatrix::unknown(n);
    for i in 0..n {
        matrix.set(i, i, Some(MatrixElement::new(0, 0)));
    }
    if n < 2 {
        return Ok(matrix);
    }

    let blocks = plan_blocks(n, provider.max_dimension(), provider.max_elements());
    debug!(places = n, blocks = blocks.len(), %mode, "requesting distance matrix");

    let mut failures = 0;
    let mut last_error = None;
    for (origins, destinations) in &blocks {
        let result = provider
            .matrix_block(&places[origins.clone()], &places[destinations.clone()], mode)
            .and_then(|block| check_shape(block, origins.len(), destinations.len()));

        match result {
            Ok(block) => {
                for (row, values) in origins.clone().zip(block) {
                    for (col, value) in destinations.clone().zip(values) {
                        if row != col {
                            matrix.set(row, col, value);
                        }
                    }
                }
            }
            Err(err) => {
                warn!(
                    origins = ?origins,
                    destinations = ?destinations,
                    error = %err,
                    "distance matrix block failed; marking pairs unknown"
                );
                failures += 1;
                last_error = Some(err);
            }
        }
    }

    match last_error {
        Some(err) if failures == blocks.len() => Err(err),
        _ => Ok(matrix),
    }
}

/// Splits an `n x n` request into origin/destination ranges that respect
/// both per-call limits.
fn plan_blocks(
    n: usize,
    max_dimension: usize,
    max_elements: usize,
) -> Vec<(Range<usize>, Range<usize>)> {
    let max_dimension = max_dimension.max(1);
    let cols = n.min(max_dimension).min(max_elements).max(1);
    let rows = (max_elements / cols).min(max_dimension).min(n).max(1);

    let mut blocks = Vec::new();
    for row_start in (0..n).step_by(rows) {
        for col_start in (0..n).step_by(cols) {
            blocks.push((
                row_start..(row_start + rows).min(n),
                col_start..(col_start + cols).min(n),
            ));
        }
    }
    blocks
}

fn check_shape(block: MatrixBlock, rows: usize, cols: usize) -> Result<MatrixBlock, ProviderError> {
    if block.len() != rows || block.iter().any(|row| row.len() != cols) {
        return Err(ProviderError::Malformed {
            endpoint: "distancematrix",
            message: format!("expected a {rows}x{cols} block"),
        });
    }
    Ok(block)
}
