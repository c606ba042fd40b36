//! The rasterized level: one typed cell per game pixel.
//!
//! The map keeps two layers. The static layer holds what never moves
//! (diamonds, platforms, obstacles); the live layer is the static layer
//! with both movers' footprints painted on top. Refreshing the movers only
//! touches the cells they covered before and the cells they cover now.

use geofriends_core::{Level, MoverKind, MoverState, ObjectKind, Point, Range};
use log::trace;

use crate::config::NavConfig;
use crate::error::NavError;

/// A map cell: its position and what currently occupies it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub kind: ObjectKind,
}

impl Cell {
    /// Whether `mover` may pass through this cell.
    #[inline]
    pub fn is_walkable(self, mover: MoverKind) -> bool {
        self.kind.is_walkable_for(mover)
    }
}

/// Occupancy grid over the level area.
#[derive(Debug, Clone)]
pub struct Map {
    area: Range,
    base: Vec<ObjectKind>,
    live: Vec<ObjectKind>,
    // live-layer indices currently holding a mover footprint
    painted: Vec<usize>,
    rectangle_area: i32,
}

impl Map {
    /// Create a map of open space over `area`.
    pub fn new(area: Range, rectangle_area: i32) -> Result<Self, NavError> {
        if area.is_empty() {
            return Err(NavError::EmptyArea);
        }
        let n = area.len();
        Ok(Self {
            area,
            base: vec![ObjectKind::Space; n],
            live: vec![ObjectKind::Space; n],
            painted: Vec::new(),
            rectangle_area,
        })
    }

    /// Rasterize a level: diamonds, then platforms and obstacles, then both
    /// movers. Everything is clipped to the level area.
    pub fn from_level(level: &Level, cfg: &NavConfig) -> Result<Self, NavError> {
        let mut map = Self::new(level.area, cfg.rectangle_area)?;

        let e = cfg.diamond_extent;
        for &d in &level.diamonds {
            let r = Range::new(d.x - e, d.y - e, d.x + e + 1, d.y + e + 1);
            map.fill_static(r, ObjectKind::Diamond);
        }
        for b in &level.circle_platforms {
            map.fill_static(b.bounds(), ObjectKind::CirclePlatform);
        }
        for b in &level.rectangle_platforms {
            map.fill_static(b.bounds(), ObjectKind::RectanglePlatform);
        }
        for b in &level.obstacles {
            map.fill_static(b.bounds(), ObjectKind::Obstacle);
        }
        map.live.clone_from(&map.base);

        map.refresh(&level.circle, &level.rectangle);
        Ok(map)
    }

    /// The covered area.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.area
    }

    /// Whether `p` lies on the map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.area.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.area.contains(p) {
            return None;
        }
        let rel = p - self.area.min;
        Some((rel.y * self.area.width() + rel.x) as usize)
    }

    /// The cell at `p`, or `None` off the map. Positions are never clamped.
    pub fn cell_at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| Cell {
            pos: p,
            kind: self.live[i],
        })
    }

    /// What occupies `p`, or `None` off the map.
    #[inline]
    pub fn kind_at(&self, p: Point) -> Option<ObjectKind> {
        self.index(p).map(|i| self.live[i])
    }

    /// Overwrite the cell at `p` in both layers. Returns `false` off the map.
    pub fn set(&mut self, p: Point, kind: ObjectKind) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        self.base[i] = kind;
        self.live[i] = kind;
        true
    }

    /// Whether `p` is on the map and walkable for `mover`.
    #[inline]
    pub fn is_walkable(&self, p: Point, mover: MoverKind) -> bool {
        self.kind_at(p).is_some_and(|k| k.is_walkable_for(mover))
    }

    fn fill_static(&mut self, r: Range, kind: ObjectKind) {
        for p in r.intersect(self.area) {
            if let Some(i) = self.index(p) {
                self.base[i] = kind;
            }
        }
    }

    fn paint_mover(&mut self, r: Range, kind: ObjectKind) {
        for p in r.intersect(self.area) {
            let Some(i) = self.index(p) else { continue };
            if self.base[i].is_solid() {
                continue;
            }
            self.live[i] = kind;
            self.painted.push(i);
        }
    }

    /// Move both footprints: restore the previously painted cells from the
    /// static layer, then paint the movers at their new positions.
    pub fn refresh(&mut self, circle: &MoverState, rectangle: &MoverState) {
        for &i in &self.painted {
            self.live[i] = self.base[i];
        }
        self.painted.clear();

        let rect = rectangle.footprint(MoverKind::Rectangle, self.rectangle_area);
        self.paint_mover(rect, ObjectKind::Rectangle);
        let circ = circle.footprint(MoverKind::Circle, self.rectangle_area);
        self.paint_mover(circ, ObjectKind::Circle);
        trace!("map: movers repainted, circle {circ}, rectangle {rect}");
    }

    /// Whether `mover` can travel in a straight line from `p1` to `p2`.
    ///
    /// Steps one pixel at a time along the axis with the larger delta,
    /// excluding both endpoints. At each step the cells at the floor and
    /// the ceiling of the interpolated coordinate on the other axis must
    /// both be walkable; a sample off the map counts as blocked.
    pub fn is_line_walkable(&self, p1: Point, p2: Point, mover: MoverKind) -> bool {
        let d = p2 - p1;
        if d.x.abs() >= d.y.abs() {
            if d.x == 0 {
                return true;
            }
            let step = d.x.signum();
            let mut x = p1.x + step;
            while x != p2.x {
                let (lo, hi) = floor_ceil((x - p1.x) as i64 * d.y as i64, d.x as i64);
                let a = Point::new(x, p1.y + lo);
                let b = Point::new(x, p1.y + hi);
                if !self.is_walkable(a, mover) || !self.is_walkable(b, mover) {
                    return false;
                }
                x += step;
            }
        } else {
            let step = d.y.signum();
            let mut y = p1.y + step;
            while y != p2.y {
                let (lo, hi) = floor_ceil((y - p1.y) as i64 * d.x as i64, d.y as i64);
                let a = Point::new(p1.x + lo, y);
                let b = Point::new(p1.x + hi, y);
                if !self.is_walkable(a, mover) || !self.is_walkable(b, mover) {
                    return false;
                }
                y += step;
            }
        }
        true
    }
}

/// Floor and ceiling of `num / den` in exact integer arithmetic. `den != 0`.
fn floor_ceil(num: i64, den: i64) -> (i32, i32) {
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    let lo = num.div_euclid(den);
    let hi = if num.rem_euclid(den) == 0 { lo } else { lo + 1 };
    (lo as i32, hi as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofriends_core::Block;

    fn open_map(w: i32, h: i32) -> Map {
        Map::new(Range::new(0, 0, w, h), 10_000).unwrap()
    }

    #[test]
    fn floor_ceil_handles_signs() {
        assert_eq!(floor_ceil(7, 2), (3, 4));
        assert_eq!(floor_ceil(-7, 2), (-4, -3));
        assert_eq!(floor_ceil(7, -2), (-4, -3));
        assert_eq!(floor_ceil(6, 3), (2, 2));
        assert_eq!(floor_ceil(0, -5), (0, 0));
    }

    #[test]
    fn empty_area_is_rejected() {
        assert_eq!(
            Map::new(Range::new(0, 0, 0, 10), 10_000).unwrap_err(),
            NavError::EmptyArea
        );
    }

    #[test]
    fn cell_at_out_of_bounds_is_none() {
        let map = open_map(10, 10);
        assert!(map.cell_at(Point::new(10, 0)).is_none());
        assert!(map.cell_at(Point::new(-1, 3)).is_none());
        assert_eq!(
            map.cell_at(Point::new(9, 9)),
            Some(Cell {
                pos: Point::new(9, 9),
                kind: ObjectKind::Space
            })
        );
    }

    #[test]
    fn single_obstacle_cell_blocks_horizontal_line() {
        let mut map = open_map(20, 10);
        let a = Point::new(2, 5);
        let b = Point::new(17, 5);
        assert!(map.is_line_walkable(a, b, MoverKind::Circle));

        map.set(Point::new(9, 5), ObjectKind::Obstacle);
        assert!(!map.is_line_walkable(a, b, MoverKind::Circle));
        assert!(!map.is_line_walkable(a, b, MoverKind::Rectangle));

        map.set(Point::new(9, 5), ObjectKind::Space);
        assert!(map.is_line_walkable(a, b, MoverKind::Circle));
    }

    #[test]
    fn endpoints_are_not_sampled() {
        let mut map = open_map(20, 10);
        map.set(Point::new(2, 5), ObjectKind::Obstacle);
        map.set(Point::new(17, 5), ObjectKind::Obstacle);
        assert!(map.is_line_walkable(Point::new(2, 5), Point::new(17, 5), MoverKind::Circle));
        assert!(map.is_line_walkable(Point::new(3, 3), Point::new(3, 3), MoverKind::Circle));
    }

    #[test]
    fn either_straddled_cell_blocks() {
        // From (0,0) to (4,1): at x = 2 the line sits at y = 0.5, between
        // rows 0 and 1.
        let mut map = open_map(10, 10);
        map.set(Point::new(2, 1), ObjectKind::Obstacle);
        assert!(!map.is_line_walkable(Point::new(0, 0), Point::new(4, 1), MoverKind::Circle));
        map.set(Point::new(2, 1), ObjectKind::Space);
        map.set(Point::new(2, 0), ObjectKind::Obstacle);
        assert!(!map.is_line_walkable(Point::new(0, 0), Point::new(4, 1), MoverKind::Circle));
    }

    #[test]
    fn vertical_and_steep_lines_scan_rows() {
        let mut map = open_map(10, 30);
        map.set(Point::new(4, 12), ObjectKind::Obstacle);
        assert!(!map.is_line_walkable(Point::new(4, 1), Point::new(4, 25), MoverKind::Rectangle));
        assert!(map.is_line_walkable(Point::new(5, 1), Point::new(5, 25), MoverKind::Rectangle));
        assert!(!map.is_line_walkable(Point::new(3, 1), Point::new(5, 25), MoverKind::Rectangle));
    }

    #[test]
    fn off_map_samples_block() {
        let map = open_map(10, 10);
        assert!(!map.is_line_walkable(Point::new(-5, 2), Point::new(5, 2), MoverKind::Circle));
        assert!(map.is_line_walkable(Point::new(-1, 2), Point::new(5, 2), MoverKind::Circle));
    }

    #[test]
    fn line_walk_is_symmetric() {
        let mut map = open_map(40, 40);
        for p in Range::new(15, 15, 22, 22) {
            map.set(p, ObjectKind::Obstacle);
        }
        let pts = [
            Point::new(1, 1),
            Point::new(38, 30),
            Point::new(10, 37),
            Point::new(30, 2),
            Point::new(14, 14),
            Point::new(22, 25),
        ];
        for &a in &pts {
            for &b in &pts {
                assert_eq!(
                    map.is_line_walkable(a, b, MoverKind::Circle),
                    map.is_line_walkable(b, a, MoverKind::Circle),
                    "{a} <-> {b}"
                );
            }
        }
    }

    #[test]
    fn platforms_block_the_other_mover() {
        let level = Level {
            area: Range::new(0, 0, 100, 100),
            circle: MoverState::new(Point::new(10, 10), 4),
            rectangle: MoverState::new(Point::new(80, 80), 10),
            circle_platforms: vec![Block::new(Point::new(50, 30), 20, 4)],
            rectangle_platforms: vec![Block::new(Point::new(50, 60), 20, 4)],
            ..Level::default()
        };
        let map = Map::from_level(&level, &NavConfig::default()).unwrap();
        let (a, b) = (Point::new(50, 20), Point::new(50, 40));
        assert!(map.is_line_walkable(a, b, MoverKind::Circle));
        assert!(!map.is_line_walkable(a, b, MoverKind::Rectangle));
        let (a, b) = (Point::new(50, 50), Point::new(50, 70));
        assert!(!map.is_line_walkable(a, b, MoverKind::Circle));
        assert!(map.is_line_walkable(a, b, MoverKind::Rectangle));
    }

    #[test]
    fn refresh_moves_footprints_and_spares_solids() {
        let level = Level {
            area: Range::new(0, 0, 100, 100),
            circle: MoverState::new(Point::new(10, 10), 4),
            rectangle: MoverState::new(Point::new(50, 85), 50),
            obstacles: vec![Block::new(Point::new(50, 95), 100, 10)],
            diamonds: vec![Point::new(90, 10)],
            ..Level::default()
        };
        let mut map = Map::from_level(&level, &NavConfig::default()).unwrap();
        assert_eq!(map.kind_at(Point::new(10, 10)), Some(ObjectKind::Circle));
        assert_eq!(map.kind_at(Point::new(50, 85)), Some(ObjectKind::Rectangle));
        // The rectangle (200 x 50) hangs over the floor; the floor stays solid.
        assert_eq!(map.kind_at(Point::new(50, 95)), Some(ObjectKind::Obstacle));
        assert_eq!(map.kind_at(Point::new(90, 10)), Some(ObjectKind::Diamond));

        let circle = MoverState::new(Point::new(30, 10), 4);
        let rectangle = MoverState::new(Point::new(50, 40), 20);
        map.refresh(&circle, &rectangle);
        assert_eq!(map.kind_at(Point::new(10, 10)), Some(ObjectKind::Space));
        assert_eq!(map.kind_at(Point::new(30, 10)), Some(ObjectKind::Circle));
        assert_eq!(map.kind_at(Point::new(50, 85)), Some(ObjectKind::Space));
        assert_eq!(map.kind_at(Point::new(50, 40)), Some(ObjectKind::Rectangle));
        assert_eq!(map.kind_at(Point::new(50, 95)), Some(ObjectKind::Obstacle));
    }

    #[test]
    fn mover_cells_are_walkable() {
        let level = Level {
            area: Range::new(0, 0, 100, 40),
            circle: MoverState::new(Point::new(10, 20), 5),
            rectangle: MoverState::new(Point::new(50, 20), 100),
            ..Level::default()
        };
        let map = Map::from_level(&level, &NavConfig::default()).unwrap();
        let cell = map.cell_at(Point::new(50, 20)).unwrap();
        assert_eq!(cell.kind, ObjectKind::Rectangle);
        assert!(cell.is_walkable(MoverKind::Circle));
        assert!(map.is_line_walkable(Point::new(1, 20), Point::new(99, 20), MoverKind::Circle));
    }
}
