//! A* search over the voxel grid.
//!
//! Neighbors are the 26 voxels within Chebyshev distance 1. Edge cost and
//! heuristic are both the Euclidean distance between integer grid indices, so
//! the heuristic is admissible and consistent in index space. It is NOT the
//! real-world metric: one index step is `resolution` meters on every axis only
//! under the flat-earth sizing, so "shortest" here means shortest in grid
//! steps.
//!
//! Search state (g, h, f, parent) lives on the voxels of the grid arena; the
//! open set is a `Frontier` and the closed set a `Vec<bool>` over the arena.
//! Closed voxels are never updated again, which keeps every parent chain
//! acyclic and ending at the start voxel.
//!
//! When the destination is not reached (frontier exhausted or iteration cap
//! hit) the search falls back to the closed voxel nearest the destination, as
//! long as it is strictly nearer than the start was.

use crate::frontier::Frontier;
use crate::grid::{VoxelGrid, VoxelId, VoxelIndex};

/// How a search run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The destination voxel was reached. `path` runs start to destination.
    Found { path: Vec<VoxelId>, iterations: usize },
    /// The destination was not reached; `path` ends at the closest voxel
    /// expanded, `remaining` grid units away from the destination.
    Partial {
        path: Vec<VoxelId>,
        remaining: f64,
        iterations: usize,
    },
    /// Nothing expanded got any closer to the destination than the start.
    Exhausted { iterations: usize },
}

impl SearchOutcome {
    pub fn iterations(&self) -> usize {
        match self {
            SearchOutcome::Found { iterations, .. }
            | SearchOutcome::Partial { iterations, .. }
            | SearchOutcome::Exhausted { iterations } => *iterations,
        }
    }
}

/// Euclidean distance between two voxels in grid-index units.
pub fn grid_distance(a: VoxelIndex, b: VoxelIndex) -> f64 {
    let dx = b.ix as f64 - a.ix as f64;
    let dy = b.iy as f64 - a.iy as f64;
    let dz = b.iz as f64 - a.iz as f64;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Run A* from `start` to `end`, expanding at most `max_iterations` voxels.
///
/// Unwalkable voxels are never entered. The grid's per-voxel search state is
/// overwritten.
pub fn find_path(
    grid: &mut VoxelGrid,
    start: VoxelId,
    end: VoxelId,
    max_iterations: usize,
) -> SearchOutcome {
    let end_index = grid.voxel(end).index;
    let start_h = grid_distance(grid.voxel(start).index, end_index);
    {
        let start_voxel = grid.voxel_mut(start);
        start_voxel.parent = None;
        start_voxel.set_scores(0.0, start_h);
    }

    let mut frontier = Frontier::with_capacity(grid.len());
    let mut closed = vec![false; grid.len()];
    frontier.push(start, start_h);

    let mut closest = start;
    let mut closest_h = start_h;
    let mut iterations = 0usize;
    let mut neighbors: Vec<VoxelId> = Vec::with_capacity(26);

    while iterations < max_iterations {
        let Some(current) = frontier.pop() else {
            break;
        };
        iterations += 1;

        let (current_index, current_g, current_h) = {
            let voxel = grid.voxel(current);
            (voxel.index, voxel.g(), voxel.h())
        };

        if iterations % 1000 == 0 {
            tracing::trace!(
                "Iteration {}: distance to goal = {:.2}",
                iterations,
                current_h
            );
        }

        if current == end {
            tracing::debug!("Path found in {} iterations", iterations);
            return SearchOutcome::Found {
                path: reconstruct_path(grid, current),
                iterations,
            };
        }

        closed[current.0] = true;
        if current_h < closest_h {
            closest_h = current_h;
            closest = current;
        }

        neighbors.clear();
        neighbors.extend(grid.neighbors(current));
        for &next in &neighbors {
            if closed[next.0] || !grid.voxel(next).walkable {
                continue;
            }

            let next_index = grid.voxel(next).index;
            let tentative_g = current_g + grid_distance(current_index, next_index);
            if !frontier.contains(next) || tentative_g < grid.voxel(next).g() {
                let h = grid_distance(next_index, end_index);
                let voxel = grid.voxel_mut(next);
                voxel.parent = Some(current);
                voxel.set_scores(tentative_g, h);
                frontier.push(next, voxel.f());
            }
        }
    }

    if closest_h < start_h {
        tracing::warn!(
            "No complete path found. Returning path to closest voxel ({:.2} grid units from goal)",
            closest_h
        );
        return SearchOutcome::Partial {
            path: reconstruct_path(grid, closest),
            remaining: closest_h,
            iterations,
        };
    }

    tracing::debug!("No path found after {} iterations", iterations);
    SearchOutcome::Exhausted { iterations }
}

/// Follow parent links from `last` back to the start, returned start-first.
fn reconstruct_path(grid: &VoxelGrid, last: VoxelId) -> Vec<VoxelId> {
    let mut path = vec![last];
    let mut current = last;
    // Parent chains are acyclic, so this cannot exceed the voxel count.
    while let Some(parent) = grid.voxel(current).parent {
        if path.len() > grid.len() {
            break;
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GeoBounds;
    use std::collections::HashSet;

    /// Empty grid of exactly `nx` x `ny` x `nz` voxels at 100 m resolution.
    fn grid(nx: usize, ny: usize, nz: usize) -> VoxelGrid {
        let bounds = GeoBounds {
            min_lat: 0.0,
            max_lat: (ny as f64 * 100.0 - 50.0) / 111_000.0,
            min_lon: 0.0,
            max_lon: (nx as f64 * 100.0 - 50.0) / 100_000.0,
            min_alt_m: 0.0,
            max_alt_m: nz as f64 * 100.0 - 50.0,
        };
        let grid = VoxelGrid::new(bounds, 100.0, 1_000_000).unwrap();
        assert_eq!(
            (grid.dims().nx, grid.dims().ny, grid.dims().nz),
            (nx, ny, nz)
        );
        grid
    }

    fn id(grid: &VoxelGrid, ix: usize, iy: usize, iz: usize) -> VoxelId {
        grid.dims().id_of(VoxelIndex::new(ix, iy, iz))
    }

    fn block(grid: &mut VoxelGrid, ix: usize, iy: usize, iz: usize) {
        let target = id(grid, ix, iy, iz);
        grid.voxel_mut(target).walkable = false;
    }

    fn cost(grid: &VoxelGrid, path: &[VoxelId]) -> f64 {
        path.windows(2)
            .map(|pair| grid_distance(grid.voxel(pair[0]).index, grid.voxel(pair[1]).index))
            .sum()
    }

    #[test]
    fn heuristic_matches_edge_cost() {
        let a = VoxelIndex::new(0, 0, 0);
        assert_eq!(grid_distance(a, VoxelIndex::new(1, 0, 0)), 1.0);
        assert!((grid_distance(a, VoxelIndex::new(1, 1, 1)) - 3f64.sqrt()).abs() < 1e-12);
        assert_eq!(grid_distance(VoxelIndex::new(3, 4, 0), a), 5.0);
    }

    #[test]
    fn open_grid_path_takes_diagonals() {
        let mut g = grid(8, 5, 2);
        let start = id(&g, 0, 0, 0);
        let end = id(&g, 5, 2, 0);
        let SearchOutcome::Found { path, .. } = find_path(&mut g, start, end, 10_000) else {
            panic!("expected a complete path");
        };
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        // Two diagonal and three straight steps.
        assert_eq!(path.len(), 6);
        let expected = 2.0 * 2f64.sqrt() + 3.0;
        assert!((cost(&g, &path) - expected).abs() < 1e-9);
    }

    #[test]
    fn start_equal_to_end_is_a_single_voxel_path() {
        let mut g = grid(3, 3, 1);
        let here = id(&g, 1, 1, 0);
        assert_eq!(
            find_path(&mut g, here, here, 10),
            SearchOutcome::Found {
                path: vec![here],
                iterations: 1
            }
        );
    }

    #[test]
    fn routes_through_the_gap_in_a_wall() {
        let mut g = grid(7, 7, 1);
        for iy in 0..7 {
            if iy != 5 {
                block(&mut g, 3, iy, 0);
            }
        }
        let start = id(&g, 0, 1, 0);
        let end = id(&g, 6, 1, 0);
        let SearchOutcome::Found { path, .. } = find_path(&mut g, start, end, 10_000) else {
            panic!("expected a complete path");
        };
        assert!(path.contains(&id(&g, 3, 5, 0)));
        assert!(path.iter().all(|&v| g.voxel(v).walkable));

        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len(), "path revisits a voxel");
        for pair in path.windows(2) {
            let a = g.voxel(pair[0]).index;
            let b = g.voxel(pair[1]).index;
            assert!(a.ix.abs_diff(b.ix) <= 1 && a.iy.abs_diff(b.iy) <= 1 && a.iz.abs_diff(b.iz) <= 1);
        }
    }

    #[test]
    fn sealed_start_with_no_progress_is_exhausted() {
        // Start in the corner column, wall right next to it, goal on the same row.
        let mut g = grid(6, 3, 1);
        for iy in 0..3 {
            block(&mut g, 1, iy, 0);
        }
        let start = id(&g, 0, 1, 0);
        let end = id(&g, 5, 1, 0);
        let outcome = find_path(&mut g, start, end, 10_000);
        assert!(matches!(outcome, SearchOutcome::Exhausted { iterations: 3 }), "{outcome:?}");
    }

    #[test]
    fn walled_off_goal_falls_back_to_closest_voxel() {
        let mut g = grid(8, 3, 1);
        for iy in 0..3 {
            block(&mut g, 5, iy, 0);
        }
        let start = id(&g, 0, 1, 0);
        let end = id(&g, 7, 1, 0);
        let SearchOutcome::Partial {
            path, remaining, ..
        } = find_path(&mut g, start, end, 10_000)
        else {
            panic!("expected a fallback path");
        };
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&id(&g, 4, 1, 0)));
        assert_eq!(remaining, 3.0);
        assert!(remaining < grid_distance(VoxelIndex::new(0, 1, 0), VoxelIndex::new(7, 1, 0)));
    }

    #[test]
    fn zero_iterations_never_panics() {
        let mut g = grid(4, 4, 1);
        let start = id(&g, 0, 0, 0);
        let end = id(&g, 3, 3, 0);
        assert_eq!(
            find_path(&mut g, start, end, 0),
            SearchOutcome::Exhausted { iterations: 0 }
        );
    }

    #[test]
    fn iteration_cap_yields_fallback_then_full_path() {
        let start_index = VoxelIndex::new(0, 0, 0);
        let end_index = VoxelIndex::new(19, 0, 0);
        let start_h = grid_distance(start_index, end_index);

        let mut best_complete: Option<f64> = None;
        for cap in [2, 5, 20, 100, 1_000, 10_000] {
            let mut g = grid(20, 3, 2);
            let start = g.dims().id_of(start_index);
            let end = g.dims().id_of(end_index);
            match find_path(&mut g, start, end, cap) {
                SearchOutcome::Found { path, iterations } => {
                    assert!(iterations <= cap);
                    let c = cost(&g, &path);
                    if let Some(previous) = best_complete {
                        assert!(c <= previous + 1e-9, "cap {cap} made the path worse");
                    }
                    best_complete = Some(c);
                }
                SearchOutcome::Partial { remaining, .. } => {
                    assert!(best_complete.is_none(), "larger cap lost a complete path");
                    assert!(remaining < start_h);
                }
                SearchOutcome::Exhausted { .. } => panic!("open grid should always progress"),
            }
        }
        assert!(best_complete.is_some());
    }

    #[test]
    fn parent_chain_ends_at_start() {
        let mut g = grid(5, 5, 3);
        let start = id(&g, 0, 0, 0);
        let end = id(&g, 4, 4, 2);
        let outcome = find_path(&mut g, start, end, 10_000);
        let SearchOutcome::Found { path, .. } = outcome else {
            panic!("expected a complete path");
        };
        assert_eq!(g.voxel(start).parent, None);
        assert_eq!(path[0], start);
        assert_eq!(path.len(), 5);
    }
}
