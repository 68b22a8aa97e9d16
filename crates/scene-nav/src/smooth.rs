use crate::{GridCoord, NavigationGrid, PathSmoothing};

/// Apply `mode` to a raw cell route. The first and last cells are always kept.
pub fn smooth_cells(
    grid: &NavigationGrid,
    cells: &[GridCoord],
    mode: PathSmoothing,
) -> Vec<GridCoord> {
    match mode {
        PathSmoothing::None => cells.to_vec(),
        PathSmoothing::Collinear => collapse_collinear(cells),
        PathSmoothing::LineOfSight => collapse_collinear(&shortcut_line_of_sight(grid, cells)),
    }
}

/// Drop cells that continue the previous step's direction.
pub fn collapse_collinear(cells: &[GridCoord]) -> Vec<GridCoord> {
    if cells.len() <= 2 {
        return cells.to_vec();
    }

    let mut out = Vec::with_capacity(cells.len());
    out.push(cells[0]);
    for w in cells.windows(3) {
        let (a, b, c) = (w[0], w[1], w[2]);
        if direction(a, b) != direction(b, c) {
            out.push(b);
        }
    }
    out.push(cells[cells.len() - 1]);
    out
}

/// Greedy string pulling: from each kept cell, jump to the furthest later cell that is in
/// line of sight.
pub fn shortcut_line_of_sight(grid: &NavigationGrid, cells: &[GridCoord]) -> Vec<GridCoord> {
    if cells.len() <= 2 {
        return cells.to_vec();
    }

    let mut out = vec![cells[0]];
    let mut current = 0;
    while current < cells.len() - 1 {
        let mut furthest = current + 1;
        for i in (current + 2..cells.len()).rev() {
            if grid.line_of_sight(cells[current], cells[i]) {
                furthest = i;
                break;
            }
        }
        out.push(cells[furthest]);
        current = furthest;
    }
    out
}

// Reduced step direction; consecutive cells on a straight run share it.
fn direction(a: GridCoord, b: GridCoord) -> (i32, i32) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let g = gcd(dx.abs(), dy.abs()).max(1);
    (dx / g, dy / g)
}

fn gcd(mut a: i32, mut b: i32) -> i32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
