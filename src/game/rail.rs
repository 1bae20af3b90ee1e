//! Rail network the snake is confined to
//!
//! Every cell carries an [`Exits`] set telling which of its four edges can be
//! crossed. Generated maps are a lattice of corridors on every third row and
//! column, framed by a one-cell border that has no exits at all.

use super::{direction::Direction, error::GameError, state::Position};

/// Smallest grid side the engine accepts; below this no corridor fits inside the frame
pub const MIN_GRID_SIDE: usize = 4;

/// Traversable edges of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exits {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Exits {
    pub const CLOSED: Exits = Exits {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Whether the edge in `direction` is open. Idle never is.
    pub fn allows(&self, direction: Direction) -> bool {
        match direction {
            Direction::None => false,
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// A cell with at least one open edge is part of the rail network
    pub fn is_rail(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Width x height grid of exit sets, row-major. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailMap {
    width: usize,
    height: usize,
    cells: Vec<Exits>,
}

impl RailMap {
    /// Builds the corridor lattice for a grid of the given size.
    ///
    /// Pure and deterministic. Grids too small to hold a corridor come back
    /// with every cell closed; callers that need a playable map check
    /// [`RailMap::find_safe_spot`].
    pub fn generate(width: usize, height: usize) -> Self {
        let (w, h) = (width as i32, height as i32);
        let is_border = |x: i32, y: i32| x == 0 || y == 0 || x == w - 1 || y == h - 1;

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..h {
            for x in 0..w {
                if !on_rail_pattern(x, y) || is_border(x, y) {
                    cells.push(Exits::CLOSED);
                    continue;
                }

                // A neighbour only counts if it is on the pattern and is not the frame row/column
                cells.push(Exits {
                    up: y - 1 > 0 && on_rail_pattern(x, y - 1),
                    down: y + 1 < h - 1 && on_rail_pattern(x, y + 1),
                    left: x - 1 > 0 && on_rail_pattern(x - 1, y),
                    right: x + 1 < w - 1 && on_rail_pattern(x + 1, y),
                });
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a map from explicit row-major cells, e.g. a hand-drawn layout
    pub fn from_cells(width: usize, height: usize, cells: Vec<Exits>) -> Result<Self, GameError> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(GameError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Exit set of the cell at `pos`, or `None` when `pos` is off the grid
    pub fn exits(&self, pos: Position) -> Option<Exits> {
        if !self.contains(pos) {
            return None;
        }
        let index = pos.y as usize * self.width + pos.x as usize;
        self.cells.get(index).copied()
    }

    pub fn is_rail(&self, pos: Position) -> bool {
        self.exits(pos).is_some_and(|exits| exits.is_rail())
    }

    /// All rail cells in row-major order
    pub fn rail_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, exits)| exits.is_rail())
            .map(|(index, _)| {
                Position::new((index % self.width) as i32, (index / self.width) as i32)
            })
    }

    /// First rail cell in row-major order that is not listed in `avoid`
    pub fn find_safe_spot(&self, avoid: &[Position]) -> Option<Position> {
        self.rail_cells().find(|pos| !avoid.contains(pos))
    }
}

fn on_rail_pattern(x: i32, y: i32) -> bool {
    (x - 1).rem_euclid(3) == 0 || (y - 1).rem_euclid(3) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(map: &RailMap, x: i32, y: i32) -> Exits {
        map.exits(Position::new(x, y)).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        for (w, h) in [(4, 4), (10, 10), (36, 36), (13, 7)] {
            assert_eq!(RailMap::generate(w, h), RailMap::generate(w, h));
        }
    }

    #[test]
    fn test_border_is_closed() {
        let map = RailMap::generate(10, 10);
        for y in 0..10 {
            for x in 0..10 {
                if x == 0 || y == 0 || x == 9 || y == 9 {
                    assert_eq!(at(&map, x, y), Exits::CLOSED, "border ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_open_exits_lead_to_interior_rail() {
        for (w, h) in [(10, 10), (36, 36), (11, 17)] {
            let map = RailMap::generate(w, h);
            for pos in map.rail_cells() {
                let exits = map.exits(pos).unwrap();
                for dir in Direction::ALL {
                    if !exits.allows(dir) {
                        continue;
                    }
                    let next = pos.moved_in_direction(dir);
                    assert!(map.is_rail(next), "{pos:?} -> {dir:?} leads off rail");
                    assert!(
                        next.x > 0 && next.y > 0 && next.x < w as i32 - 1 && next.y < h as i32 - 1,
                        "{pos:?} -> {dir:?} leads into the border"
                    );
                    assert!(map.exits(next).unwrap().allows(dir.opposite()));
                }
            }
        }
    }

    #[test]
    fn test_lattice_layout() {
        let map = RailMap::generate(10, 10);

        // Corner of the first corridor square
        assert_eq!(
            at(&map, 1, 1),
            Exits {
                up: false,
                down: true,
                left: false,
                right: true,
            }
        );

        // Crossing of two inner corridors
        assert_eq!(
            at(&map, 4, 4),
            Exits {
                up: true,
                down: true,
                left: true,
                right: true,
            }
        );

        // Between corridors
        assert!(!map.is_rail(Position::new(2, 2)));

        // Dead end against the right frame
        assert_eq!(
            at(&map, 8, 1),
            Exits {
                up: false,
                down: false,
                left: true,
                right: false,
            }
        );
    }

    #[test]
    fn test_tiny_grid_has_no_rail() {
        let map = RailMap::generate(2, 2);
        assert_eq!(map.rail_cells().count(), 0);
        assert_eq!(map.find_safe_spot(&[]), None);
    }

    #[test]
    fn test_off_grid_has_no_exits() {
        let map = RailMap::generate(10, 10);
        assert_eq!(map.exits(Position::new(-1, 3)), None);
        assert_eq!(map.exits(Position::new(3, 10)), None);
    }

    #[test]
    fn test_find_safe_spot_scans_row_major() {
        let map = RailMap::generate(10, 10);
        assert_eq!(map.find_safe_spot(&[]), Some(Position::new(1, 1)));
        assert_eq!(
            map.find_safe_spot(&[Position::new(1, 1)]),
            Some(Position::new(2, 1))
        );
    }

    #[test]
    fn test_find_safe_spot_exhausted() {
        let map = RailMap::generate(4, 4);
        let all: Vec<Position> = map.rail_cells().collect();
        assert!(!all.is_empty());
        assert_eq!(map.find_safe_spot(&all), None);
    }

    #[test]
    fn test_from_cells_checks_length() {
        let err = RailMap::from_cells(3, 3, vec![Exits::CLOSED; 8]).unwrap_err();
        assert_eq!(
            err,
            GameError::CellCountMismatch {
                expected: 9,
                actual: 8
            }
        );
        assert!(RailMap::from_cells(3, 3, vec![Exits::CLOSED; 9]).is_ok());
    }
}
