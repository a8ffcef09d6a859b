// src/core/qid.rs

use std::fmt;

/// Identifies a qubit that actions are applied to.
///
/// Two families are supported: qubits on a line, indexed by a single integer,
/// and qubits on a square grid, indexed by `(row, col)`. Ordering is total
/// (line qubits sort before grid qubits, grid qubits sort row-major) so that
/// qubit sets can be laid out deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Qid {
    /// A qubit at position `x` on a line.
    Line(i64),
    /// A qubit at `(row, col)` on a grid.
    Grid {
        /// Row index
        row: i32,
        /// Column index
        col: i32,
    },
}

impl Qid {
    /// Creates a line qubit.
    pub fn line(x: i64) -> Self {
        Qid::Line(x)
    }

    /// Creates a grid qubit.
    pub fn grid(row: i32, col: i32) -> Self {
        Qid::Grid { row, col }
    }

    /// Line qubits `start..end`, in order.
    pub fn line_range(start: i64, end: i64) -> Vec<Qid> {
        (start..end).map(Qid::Line).collect()
    }

    /// Grid qubits of a `rows x cols` rectangle anchored at the origin, row-major.
    pub fn grid_rect(rows: i32, cols: i32) -> Vec<Qid> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Qid::Grid { row, col }))
            .collect()
    }

    /// Grid qubits of a `diameter x diameter` square anchored at the origin.
    pub fn grid_square(diameter: i32) -> Vec<Qid> {
        Self::grid_rect(diameter, diameter)
    }

    /// Whether `other` is a nearest neighbour of `self`.
    /// Only qubits of the same family can be adjacent.
    pub fn is_adjacent(&self, other: &Qid) -> bool {
        match (self, other) {
            (Qid::Line(a), Qid::Line(b)) => (a - b).abs() == 1,
            (Qid::Grid { row: r1, col: c1 }, Qid::Grid { row: r2, col: c2 }) => {
                (r1 - r2).abs() + (c1 - c2).abs() == 1
            }
            _ => false,
        }
    }

    /// Nearest neighbours of this qubit. When `within` is given, only
    /// neighbours contained in it are returned.
    pub fn neighbors(&self, within: Option<&[Qid]>) -> Vec<Qid> {
        let candidates = match *self {
            Qid::Line(x) => vec![Qid::Line(x - 1), Qid::Line(x + 1)],
            Qid::Grid { row, col } => vec![
                Qid::Grid { row: row - 1, col },
                Qid::Grid { row: row + 1, col },
                Qid::Grid { row, col: col - 1 },
                Qid::Grid { row, col: col + 1 },
            ],
        };
        match within {
            Some(allowed) => candidates.into_iter().filter(|q| allowed.contains(q)).collect(),
            None => candidates,
        }
    }
}

impl fmt::Display for Qid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qid::Line(x) => write!(f, "q({})", x),
            Qid::Grid { row, col } => write!(f, "q({}, {})", row, col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_line_before_grid_and_row_major() {
        let mut qubits = vec![Qid::grid(1, 0), Qid::line(5), Qid::grid(0, 3), Qid::line(-2)];
        qubits.sort();
        assert_eq!(qubits, vec![Qid::line(-2), Qid::line(5), Qid::grid(0, 3), Qid::grid(1, 0)]);
    }

    #[test]
    fn test_grid_rect_and_square() {
        assert_eq!(
            Qid::grid_rect(1, 2),
            vec![Qid::grid(0, 0), Qid::grid(0, 1)]
        );
        let square = Qid::grid_square(2);
        assert_eq!(square.len(), 4);
        assert_eq!(square[3], Qid::grid(1, 1));
        assert!(Qid::grid_rect(0, 5).is_empty());
    }

    #[test]
    fn test_adjacency() {
        assert!(Qid::grid(0, 0).is_adjacent(&Qid::grid(0, 1)));
        assert!(Qid::grid(0, 0).is_adjacent(&Qid::grid(-1, 0)));
        assert!(!Qid::grid(0, 0).is_adjacent(&Qid::grid(1, 1)));
        assert!(!Qid::grid(0, 0).is_adjacent(&Qid::grid(0, 0)));
        assert!(Qid::line(3).is_adjacent(&Qid::line(4)));
        assert!(!Qid::line(0).is_adjacent(&Qid::grid(0, 1)));
    }

    #[test]
    fn test_neighbors_filtered() {
        let q = Qid::grid(1, 1);
        assert_eq!(q.neighbors(None).len(), 4);
        let square = Qid::grid_square(2);
        let mut within = q.neighbors(Some(&square));
        within.sort();
        assert_eq!(within, vec![Qid::grid(0, 1), Qid::grid(1, 0)]);
        assert_eq!(Qid::line(0).neighbors(Some(&Qid::line_range(0, 3))), vec![Qid::line(1)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Qid::line(3).to_string(), "q(3)");
        assert_eq!(Qid::grid(-1, 2).to_string(), "q(-1, 2)");
    }
}
