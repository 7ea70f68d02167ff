use std::collections::BinaryHeap;

use chiton_core::{Cell, Error, Result, RiskMap};

use crate::frontier::{FrontierEntry, PathNode};

/// Sentinel parent index for cells that were never discovered.
const NO_PARENT: usize = usize::MAX;

/// Lowest total risk from the top-left to the bottom-right cell of `map`.
///
/// The start cell is free; every cell entered afterwards adds its risk.
pub fn lowest_total_risk(map: &RiskMap) -> Result<u32> {
    lowest_total_risk_between(map, Cell::ORIGIN, map.bottom_right())
}

/// Lowest total risk of any path from `from` to `to`.
///
/// Both endpoints must lie inside the map. Returns 0 when they coincide.
pub fn lowest_total_risk_between(map: &RiskMap, from: Cell, to: Cell) -> Result<u32> {
    let mut search = Search::new(map, false);
    search.run(from, to)
}

/// Lowest-risk path from `from` to `to`, both endpoints included.
///
/// The first node is `from` at cost 0; the last node is `to` carrying the
/// same total that [`lowest_total_risk_between`] returns.
pub fn lowest_risk_path(map: &RiskMap, from: Cell, to: Cell) -> Result<Vec<PathNode>> {
    let mut search = Search::new(map, true);
    search.run(from, to)?;
    Ok(search.path(from, to))
}

// ---------------------------------------------------------------------------
// Per-call search state
// ---------------------------------------------------------------------------

/// Buffers for a single search. Created per call and dropped on return, so
/// nothing is shared between searches.
struct Search<'a> {
    map: &'a RiskMap,
    visited: Vec<bool>,
    parents: Vec<usize>,
    frontier: BinaryHeap<FrontierEntry>,
}

impl<'a> Search<'a> {
    fn new(map: &'a RiskMap, track_path: bool) -> Self {
        let len = map.extent().len();
        Self {
            map,
            visited: vec![false; len],
            parents: if track_path {
                vec![NO_PARENT; len]
            } else {
                Vec::new()
            },
            frontier: BinaryHeap::new(),
        }
    }

    /// Uniform-cost search that finalizes a cell on first discovery.
    ///
    /// Every edge into a cell costs that cell's risk, whichever neighbour it
    /// is entered from, and risks are at least 1. Cells are expanded in
    /// non-decreasing cost order, so the first expansion to reach a cell
    /// is already a cheapest one. With zero or negative costs this no longer
    /// holds and tentative distances would be needed.
    fn run(&mut self, from: Cell, to: Cell) -> Result<u32> {
        let map = self.map;
        let extent = map.extent();
        let (Some(start), Some(goal)) = (extent.index(from), extent.index(to)) else {
            return Err(Error::InvalidArgument(format!(
                "endpoints {from} -> {to} outside {extent} map"
            )));
        };
        log::debug!("searching {} map from {} to {}", extent, from, to);

        if start == goal {
            return Ok(0);
        }

        self.visited[start] = true;
        self.frontier.push(FrontierEntry { cost: 0, idx: start });

        let mut expanded = 0usize;
        while let Some(FrontierEntry { cost, idx }) = self.frontier.pop() {
            expanded += 1;
            for (risk, np) in map.neighbors(extent.cell(idx)) {
                let Some(ni) = extent.index(np) else {
                    continue;
                };
                if self.visited[ni] {
                    continue;
                }
                self.visited[ni] = true;
                if !self.parents.is_empty() {
                    self.parents[ni] = idx;
                }

                let step = u32::from(risk);
                debug_assert!(step > 0, "entry risk must be positive");
                let total = cost + step;

                if ni == goal {
                    log::debug!(
                        "reached {} at cost {} after {} expansions",
                        to,
                        total,
                        expanded
                    );
                    return Ok(total);
                }
                self.frontier.push(FrontierEntry {
                    cost: total,
                    idx: ni,
                });
            }
        }

        Err(Error::UnreachableTarget { from, to })
    }

    /// Walk parent links back from `to`. Only meaningful after a successful
    /// [`run`](Self::run) with path tracking on.
    fn path(&self, from: Cell, to: Cell) -> Vec<PathNode> {
        let extent = self.map.extent();
        let mut cells = Vec::new();
        let mut ci = extent.index(to).unwrap_or(NO_PARENT);
        let start = extent.index(from).unwrap_or(NO_PARENT);
        while ci != NO_PARENT {
            cells.push(extent.cell(ci));
            if ci == start {
                break;
            }
            ci = self.parents[ci];
        }
        cells.reverse();

        let mut cost = 0;
        cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                if i > 0 {
                    cost += self.map.at(cell).map_or(0, u32::from);
                }
                PathNode { cell, cost }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiton_core::{DEFAULT_TILE_FACTOR, Risk};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EXAMPLE: &str = "\
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581";

    fn map(lines: &[&str]) -> RiskMap {
        RiskMap::from_lines(lines).unwrap()
    }

    fn random_map(rng: &mut impl Rng, rows: usize, cols: usize) -> RiskMap {
        let lines: Vec<String> = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| char::from(b'0' + rng.random_range(1..10u8)))
                    .collect()
            })
            .collect();
        RiskMap::from_lines(&lines).unwrap()
    }

    #[test]
    fn example_cave() {
        let m = RiskMap::parse(EXAMPLE).unwrap();
        assert_eq!(lowest_total_risk(&m), Ok(40));
    }

    #[test]
    fn example_cave_tiled() {
        let m = RiskMap::parse(EXAMPLE).unwrap();
        let big = m.tile(DEFAULT_TILE_FACTOR).unwrap();
        assert_eq!(lowest_total_risk(&big), Ok(315));
    }

    #[test]
    fn low_risk_corridor() {
        let m = map(&["19999", "19111", "19191", "19111", "11191"]);
        // Down column 0, along row 4 to column 2, then around the 9 via row 3.
        assert_eq!(lowest_total_risk(&m), Ok(10));
    }

    #[test]
    fn small_grid() {
        assert_eq!(lowest_total_risk(&map(&["116", "138", "213"])), Ok(7));
    }

    #[test]
    fn single_cell_is_free() {
        assert_eq!(lowest_total_risk(&map(&["5"])), Ok(0));
    }

    #[test]
    fn single_row_and_column() {
        assert_eq!(lowest_total_risk(&map(&["94321"])), Ok(10));
        assert_eq!(lowest_total_risk(&map(&["9", "4", "3"])), Ok(7));
    }

    #[test]
    fn search_may_turn_back_left() {
        let m = map(&["111", "991", "991", "111", "199", "199", "111"]);
        assert_eq!(lowest_total_risk(&m), Ok(12));
    }

    #[test]
    fn between_arbitrary_cells() {
        let m = map(&["123", "456", "789"]);
        let (a, b) = (Cell::new(2, 2), Cell::new(0, 0));
        // 6 + 3 + 2 + 1 or 8 + 7 + 4 + 1, cheaper one wins.
        assert_eq!(lowest_total_risk_between(&m, a, b), Ok(12));
        assert_eq!(lowest_total_risk_between(&m, a, a), Ok(0));
    }

    #[test]
    fn endpoints_outside_map_are_rejected() {
        let m = map(&["12", "34"]);
        for (from, to) in [
            (Cell::new(2, 0), Cell::new(1, 1)),
            (Cell::ORIGIN, Cell::new(0, 2)),
        ] {
            assert!(matches!(
                lowest_total_risk_between(&m, from, to),
                Err(Error::InvalidArgument(_))
            ));
            assert!(lowest_risk_path(&m, from, to).is_err());
        }
    }

    #[test]
    fn path_is_consistent_with_cost() {
        let m = RiskMap::parse(EXAMPLE).unwrap();
        let (from, to) = (Cell::ORIGIN, m.bottom_right());
        let path = lowest_risk_path(&m, from, to).unwrap();

        assert_eq!(path.first(), Some(&PathNode { cell: from, cost: 0 }));
        assert_eq!(path.last().map(|n| (n.cell, n.cost)), Some((to, 40)));
        for w in path.windows(2) {
            assert!(w[0].cell.is_adjacent(w[1].cell), "{:?}", w);
            let entered = m.at(w[1].cell).map(u32::from).unwrap();
            assert_eq!(w[1].cost, w[0].cost + entered);
        }
    }

    #[test]
    fn path_of_single_cell() {
        let m = map(&["7"]);
        let path = lowest_risk_path(&m, Cell::ORIGIN, Cell::ORIGIN).unwrap();
        assert_eq!(path, vec![PathNode { cell: Cell::ORIGIN, cost: 0 }]);
    }

    #[test]
    fn repeated_searches_agree() {
        let m = RiskMap::parse(EXAMPLE).unwrap();
        let first = lowest_total_risk(&m);
        for _ in 0..5 {
            assert_eq!(lowest_total_risk(&m), first);
        }
        let p1 = lowest_risk_path(&m, Cell::ORIGIN, m.bottom_right()).unwrap();
        let p2 = lowest_risk_path(&m, Cell::ORIGIN, m.bottom_right()).unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn bounded_by_right_then_down() {
        let mut rng = StdRng::seed_from_u64(15);
        for _ in 0..50 {
            let rows = rng.random_range(1..12usize);
            let cols = rng.random_range(1..12usize);
            let m = random_map(&mut rng, rows, cols);
            let cost = lowest_total_risk(&m).unwrap();
            assert!(cost <= m.right_then_down_risk(), "\n{m}");
            // At least one step per row and column crossed.
            assert!(cost as usize >= rows + cols - 2, "\n{m}");
        }
    }

    #[test]
    fn raising_a_risk_never_lowers_the_total() {
        let mut rng = StdRng::seed_from_u64(2021);
        for _ in 0..30 {
            let m = random_map(&mut rng, 8, 8);
            let before = lowest_total_risk(&m).unwrap();
            let target = Cell::new(rng.random_range(0..8usize), rng.random_range(0..8usize));

            let text = m.to_string();
            let raised: Vec<String> = text
                .lines()
                .enumerate()
                .map(|(row, line)| {
                    line.chars()
                        .enumerate()
                        .map(|(col, ch)| {
                            if Cell::new(row, col) == target {
                                let r = Risk::from_digit(ch).unwrap();
                                let up = Risk::new(r.get().saturating_add(1)).unwrap_or(Risk::MAX);
                                char::from(b'0' + up.get())
                            } else {
                                ch
                            }
                        })
                        .collect()
                })
                .collect();
            let after = lowest_total_risk(&RiskMap::from_lines(&raised).unwrap()).unwrap();
            assert!(after >= before, "{before} -> {after} raising {target}\n{m}");
        }
    }

    #[test]
    fn matches_full_relaxation_on_random_maps() {
        let mut rng = StdRng::seed_from_u64(315);
        for _ in 0..20 {
            let m = random_map(&mut rng, 9, 7);
            assert_eq!(lowest_total_risk(&m), Ok(reference_dijkstra(&m)), "\n{m}");
        }
    }

    /// Textbook Dijkstra with a tentative-distance table.
    fn reference_dijkstra(m: &RiskMap) -> u32 {
        let extent = m.extent();
        let mut dist = vec![u32::MAX; extent.len()];
        let mut heap = BinaryHeap::new();
        dist[0] = 0;
        heap.push(FrontierEntry { cost: 0, idx: 0 });
        while let Some(FrontierEntry { cost, idx }) = heap.pop() {
            if cost > dist[idx] {
                continue;
            }
            for (r, n) in m.neighbors(extent.cell(idx)) {
                let ni = extent.index(n).unwrap();
                let nd = cost + u32::from(r);
                if nd < dist[ni] {
                    dist[ni] = nd;
                    heap.push(FrontierEntry { cost: nd, idx: ni });
                }
            }
        }
        dist[extent.len() - 1]
    }
}
