//! Gap-bridging searches used by repair and regrowth.

use std::collections::HashMap;

use crate::grid::{Coordinate, Grid};
use crate::solver::{walkable_neighbors, MinQueue};

/// Depth cap for repair bridges: `min(100, cells / 4)`.
pub(crate) fn repair_depth(grid: &Grid) -> u64 {
    (grid.cell_count() as u64 / 4).min(100)
}

/// Depth cap for regrowth bridges: `min(50, cells / 4)`.
pub(crate) fn regrowth_depth(grid: &Grid) -> u64 {
    (grid.cell_count() as u64 / 4).min(50)
}

/// A* from `from` to `to` that never expands past accumulated cost
/// `max_depth`.
///
/// Returns the full path including both endpoints, `[from]` when they
/// coincide, or `None` when `to` is unwalkable or out of reach.
pub(crate) fn bounded_astar(
    grid: &Grid,
    from: Coordinate,
    to: Coordinate,
    max_depth: u64,
) -> Option<Vec<Coordinate>> {
    if from == to {
        return Some(vec![from]);
    }
    if !grid.is_walkable(from) || !grid.is_walkable(to) {
        return None;
    }

    let target = grid.index(to);
    let origin = grid.index(from);
    let h = |c: Coordinate| f64::from(c.manhattan(to));

    let mut g: HashMap<usize, u64> = HashMap::from([(origin, 0)]);
    let mut came_from: HashMap<usize, usize> = HashMap::new();
    let mut closed = vec![false; grid.cell_count()];
    let mut open = MinQueue::new();
    open.push(h(from), origin);

    while let Some(entry) = open.pop() {
        let current = entry.index;
        if current == target {
            let mut path = vec![grid.coordinate(current)];
            let mut at = current;
            while let Some(&prev) = came_from.get(&at) {
                path.push(grid.coordinate(prev));
                at = prev;
            }
            path.reverse();
            return Some(path);
        }
        if closed[current] {
            continue;
        }
        closed[current] = true;

        let g_current = g[&current];
        for next in walkable_neighbors(grid, grid.coordinate(current)) {
            let next_index = grid.index(next);
            if closed[next_index] {
                continue;
            }
            let tentative = g_current + u64::from(grid.cell_at(next_index).step_cost());
            if tentative > max_depth {
                continue;
            }
            if tentative < g.get(&next_index).copied().unwrap_or(u64::MAX) {
                g.insert(next_index, tentative);
                came_from.insert(next_index, current);
                open.push(tentative as f64 + h(next), next_index);
            }
        }
    }
    None
}

/// Row-first then column-first straight walk, failing on the first wall.
pub(crate) fn straight_line(grid: &Grid, from: Coordinate, to: Coordinate) -> Option<Vec<Coordinate>> {
    let mut path = vec![from];
    let mut current = from;
    while current != to {
        current = if current.row != to.row {
            current.offset((to.row - current.row).signum(), 0)
        } else {
            current.offset(0, (to.col - current.col).signum())
        };
        if !grid.is_walkable(current) {
            return None;
        }
        path.push(current);
    }
    Some(path)
}

/// Bounded A* with a straight-walk fallback.
pub(crate) fn bridge(
    grid: &Grid,
    from: Coordinate,
    to: Coordinate,
    max_depth: u64,
) -> Option<Vec<Coordinate>> {
    bounded_astar(grid, from, to, max_depth).or_else(|| straight_line(grid, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_depth_caps() {
        let small = fixtures::open_3x3();
        assert_eq!(repair_depth(&small), 2);
        assert_eq!(regrowth_depth(&small), 2);
        let room = fixtures::open_room();
        assert_eq!(repair_depth(&room), 36);
        assert_eq!(regrowth_depth(&room), 36);
    }

    #[test]
    fn test_bounded_astar_finds_short_gap() {
        let grid = fixtures::open_room();
        let path = bounded_astar(&grid, c(0, 0), c(0, 3), 10).unwrap();
        assert_eq!(path.first(), Some(&c(0, 0)));
        assert_eq!(path.last(), Some(&c(0, 3)));
        assert_eq!(path.len(), 4);
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn test_bounded_astar_respects_depth() {
        let grid = fixtures::serpentine();
        assert!(bounded_astar(&grid, c(0, 0), c(2, 0), 5).is_none());
        assert!(bounded_astar(&grid, c(0, 0), c(2, 0), 30).is_some());
    }

    #[test]
    fn test_bounded_astar_edge_cases() {
        let grid = fixtures::blocked_1x3();
        assert_eq!(bounded_astar(&grid, c(0, 0), c(0, 0), 0), Some(vec![c(0, 0)]));
        assert!(bounded_astar(&grid, c(0, 0), c(0, 1), 10).is_none());
        assert!(bounded_astar(&grid, c(0, 0), c(5, 5), 10).is_none());
    }

    #[test]
    fn test_straight_line() {
        let grid = fixtures::open_3x3();
        let path = straight_line(&grid, c(0, 0), c(2, 1)).unwrap();
        assert_eq!(path, vec![c(0, 0), c(1, 0), c(2, 0), c(2, 1)]);

        let grid = fixtures::serpentine();
        assert!(straight_line(&grid, c(0, 0), c(2, 0)).is_none());
    }

    #[test]
    fn test_bridge_falls_back_to_straight_line() {
        let grid = fixtures::open_room();
        // depth 0 defeats A*, the straight walk still succeeds
        let path = bridge(&grid, c(0, 0), c(0, 2), 0).unwrap();
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(0, 2)]);
    }
}
