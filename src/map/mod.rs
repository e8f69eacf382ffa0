use bracket_geometry::prelude::{Point, Rect};

use crate::config::FieldConfig;

const BRANCH_START_TILE: i32 = 2;
const BRANCH_SPACING_TILES: i32 = 5;
const LEFT_BRANCHES: i32 = 3;
const RIGHT_BRANCHES: i32 = 2;

/// Strict overlap: rectangles that only share an edge do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x1 < b.x2 && b.x1 < a.x2 && a.y1 < b.y2 && b.y1 < a.y2
}

/// The exploration field: dirt roads the avatar may walk on, and a set of
/// impassable grass tiles covering everything else.
#[derive(Clone, Debug)]
pub struct FieldMap {
    pub width: i32,
    pub height: i32,
    pub tile_size: i32,
    pub roads: Vec<Rect>,
    pub grass: Vec<Rect>,
}

impl FieldMap {
    /// One vertical main road through the middle, three branches to the
    /// left and two to the right, grass tiles on the rest.
    pub fn generate(config: &FieldConfig) -> Self {
        let (width, height, tile) = (config.width, config.height, config.tile_size);
        let road_width = config.road_width;

        let main_x = width / 2 - road_width / 2;
        let main_road = Rect::with_size(main_x, 0, road_width, height);
        let mut roads = vec![main_road];

        for i in 0..LEFT_BRANCHES {
            let y = (BRANCH_START_TILE + i * BRANCH_SPACING_TILES) * tile;
            roads.push(Rect::with_size(tile, y, main_x - tile, road_width));
        }
        let right_x = main_x + road_width;
        for i in 0..RIGHT_BRANCHES {
            let y = (BRANCH_START_TILE + i * BRANCH_SPACING_TILES) * tile;
            roads.push(Rect::with_size(right_x, y, width - right_x - tile, road_width));
        }

        let mut grass = Vec::new();
        for row in 0..height / tile {
            let mut x = 0;
            while x < width {
                let candidate = Rect::with_size(x, row * tile, tile, tile);
                if !roads.iter().any(|road| overlaps(road, &candidate)) {
                    grass.push(candidate);
                }
                x += tile;
            }
        }

        Self {
            width,
            height,
            tile_size: tile,
            roads,
            grass,
        }
    }

    /// Where the avatar starts: a little up and left of centre, on the road.
    pub fn spawn_point(&self, avatar_size: i32) -> Point {
        Point::new(
            (self.width - avatar_size * 2) / 2,
            (self.height - avatar_size * 2) / 2,
        )
    }

    pub fn is_road(&self, point: Point) -> bool {
        self.roads.iter().any(|road| {
            point.x >= road.x1 && point.x < road.x2 && point.y >= road.y1 && point.y < road.y2
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldMap {
        FieldMap::generate(&FieldConfig::default())
    }

    #[test]
    fn roads_match_the_layout() {
        let map = field();
        assert_eq!(map.roads.len(), 6);
        assert_eq!(map.roads[0], Rect::with_size(376, 0, 48, 600));
        assert_eq!(map.roads[1], Rect::with_size(32, 64, 344, 48));
        assert_eq!(map.roads[3], Rect::with_size(32, 384, 344, 48));
        assert_eq!(map.roads[4], Rect::with_size(424, 64, 344, 48));
    }

    #[test]
    fn no_grass_on_any_road() {
        let map = field();
        assert!(!map.grass.is_empty());
        for tile in &map.grass {
            assert!(map.roads.iter().all(|road| !overlaps(road, tile)));
        }
    }

    #[test]
    fn spawn_is_walkable() {
        let map = field();
        let spawn = map.spawn_point(32);
        assert_eq!(spawn, Point::new(368, 268));
        let area = Rect::with_size(spawn.x, spawn.y, 32, 32);
        assert!(map.grass.iter().all(|tile| !overlaps(tile, &area)));
        assert!(map.is_road(Point::new(400, 300)));
        assert!(!map.is_road(Point::new(5, 5)));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::with_size(0, 0, 32, 32);
        let b = Rect::with_size(32, 0, 32, 32);
        assert!(!overlaps(&a, &b));
        assert!(overlaps(&a, &Rect::with_size(31, 31, 5, 5)));
    }
}
