//! Built-in level definitions
//!
//! Levels are static templates; [`load`] hands out a fresh mutable copy so a
//! playthrough never dirties the definition. Coordinates are world units with
//! a top-left origin.

use glam::Vec2;

use crate::sim::{Coin, Goal, MovePath, MovingPlatform, Platform, Rect};

/// A level template ready to be copied into live game state
#[derive(Debug, Clone)]
pub struct LevelData {
    pub name: &'static str,
    pub level_height: f32,
    pub player_start: Vec2,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
}

const PLATFORM_COLORS: [u32; 5] = [0x52BE80, 0x58D68D, 0x45B39D, 0x48C9B0, 0x5DADE2];
const HMOVER_COLOR: u32 = 0xE74C3C;
const VMOVER_COLOR: u32 = 0x9B59B6;
const GOAL_COLOR: u32 = 0xF39C12;

const COIN_SIZE: f32 = 20.0;

fn plat(x: f32, y: f32, w: f32, color_idx: usize) -> Platform {
    Platform {
        rect: Rect::new(x, y, w, 20.0),
        color: PLATFORM_COLORS[color_idx],
    }
}

fn coin(x: f32, y: f32) -> Coin {
    Coin {
        rect: Rect::new(x, y, COIN_SIZE, COIN_SIZE),
        collected: false,
        animation: 0.0,
    }
}

fn hmover(x: f32, y: f32, w: f32, start: f32, end: f32, speed: f32, direction: f32) -> MovingPlatform {
    MovingPlatform {
        rect: Rect::new(x, y, w, 20.0),
        color: HMOVER_COLOR,
        path: MovePath::Horizontal { start, end },
        speed,
        direction,
    }
}

fn vmover(x: f32, y: f32, w: f32, start: f32, end: f32, speed: f32, direction: f32) -> MovingPlatform {
    MovingPlatform {
        rect: Rect::new(x, y, w, 20.0),
        color: VMOVER_COLOR,
        path: MovePath::Vertical { start, end },
        speed,
        direction,
    }
}

fn goal(x: f32, y: f32) -> Goal {
    Goal {
        rect: Rect::new(x, y, 70.0, 50.0),
        color: GOAL_COLOR,
    }
}

pub fn level_count() -> usize {
    3
}

/// Build a fresh copy of the level at `index`, or None past the last level
pub fn load(index: usize) -> Option<LevelData> {
    match index {
        0 => Some(tutorial_valley()),
        1 => Some(mountain_climb()),
        2 => Some(sky_fortress()),
        _ => None,
    }
}

pub fn level_name(index: usize) -> &'static str {
    match index {
        0 => "Tutorial Valley",
        1 => "Mountain Climb",
        2 => "Sky Fortress",
        _ => "",
    }
}

/// A gentle staircase up to the goal, no moving platforms
fn tutorial_valley() -> LevelData {
    LevelData {
        name: "Tutorial Valley",
        level_height: 800.0,
        player_start: Vec2::new(100.0, 650.0),
        platforms: vec![
            plat(50.0, 700.0, 150.0, 0),
            plat(300.0, 650.0, 100.0, 1),
            plat(500.0, 600.0, 100.0, 2),
            plat(650.0, 550.0, 100.0, 3),
            plat(400.0, 450.0, 150.0, 4),
            plat(200.0, 350.0, 100.0, 0),
            plat(550.0, 300.0, 100.0, 1),
            plat(350.0, 200.0, 120.0, 2),
        ],
        moving_platforms: Vec::new(),
        coins: vec![
            coin(320.0, 620.0),
            coin(520.0, 570.0),
            coin(420.0, 420.0),
            coin(220.0, 320.0),
            coin(570.0, 270.0),
        ],
        goal: goal(375.0, 150.0),
    }
}

/// Tall vertical climb built around moving-platform crossings
fn mountain_climb() -> LevelData {
    LevelData {
        name: "Mountain Climb",
        level_height: 1200.0,
        player_start: Vec2::new(375.0, 1050.0),
        platforms: vec![
            // Starting area
            plat(350.0, 1100.0, 100.0, 0),
            // Lower gap, crossed on the first mover
            plat(50.0, 1000.0, 80.0, 1),
            plat(670.0, 1000.0, 80.0, 2),
            plat(100.0, 900.0, 60.0, 3),
            plat(640.0, 900.0, 60.0, 4),
            // Middle section
            plat(50.0, 750.0, 80.0, 0),
            plat(670.0, 750.0, 80.0, 1),
            // Zigzag
            plat(150.0, 600.0, 70.0, 2),
            plat(580.0, 600.0, 70.0, 3),
            plat(50.0, 480.0, 60.0, 4),
            plat(690.0, 480.0, 60.0, 0),
            // Final approach
            plat(200.0, 350.0, 80.0, 1),
            plat(520.0, 350.0, 80.0, 2),
            plat(100.0, 250.0, 60.0, 3),
            plat(640.0, 250.0, 60.0, 4),
            // Goal platform
            plat(350.0, 150.0, 100.0, 0),
        ],
        moving_platforms: vec![
            hmover(200.0, 1000.0, 100.0, 150.0, 550.0, 1.5, 1.0),
            hmover(300.0, 800.0, 90.0, 200.0, 500.0, 2.0, -1.0),
            // Elevator through the middle section
            vmover(375.0, 650.0, 80.0, 550.0, 850.0, 1.2, 1.0),
            hmover(350.0, 400.0, 100.0, 250.0, 450.0, 1.0, 1.0),
            hmover(350.0, 250.0, 80.0, 200.0, 500.0, 1.8, -1.0),
        ],
        coins: vec![
            coin(125.0, 1070.0),
            coin(625.0, 1070.0),
            coin(375.0, 1000.0),
            coin(175.0, 920.0),
            coin(575.0, 920.0),
            coin(375.0, 850.0),
            coin(125.0, 770.0),
            coin(645.0, 770.0),
            coin(275.0, 700.0),
            coin(475.0, 700.0),
            coin(375.0, 620.0),
            coin(175.0, 550.0),
            coin(595.0, 550.0),
            coin(375.0, 470.0),
            coin(125.0, 400.0),
            coin(625.0, 400.0),
            coin(275.0, 320.0),
            coin(495.0, 320.0),
            coin(225.0, 170.0),
            coin(545.0, 170.0),
        ],
        goal: goal(365.0, 60.0),
    }
}

/// Small isolated platforms; every crossing needs a mover
fn sky_fortress() -> LevelData {
    LevelData {
        name: "Sky Fortress",
        level_height: 1000.0,
        player_start: Vec2::new(400.0, 850.0),
        platforms: vec![
            plat(350.0, 900.0, 100.0, 0),
            plat(50.0, 800.0, 60.0, 1),
            plat(690.0, 800.0, 60.0, 2),
            plat(100.0, 650.0, 40.0, 3),
            plat(660.0, 650.0, 40.0, 4),
            plat(50.0, 500.0, 50.0, 0),
            plat(700.0, 500.0, 50.0, 1),
            plat(150.0, 350.0, 40.0, 2),
            plat(610.0, 350.0, 40.0, 3),
            plat(375.0, 200.0, 50.0, 4),
        ],
        moving_platforms: vec![
            hmover(200.0, 800.0, 100.0, 120.0, 580.0, 2.5, 1.0),
            vmover(400.0, 700.0, 80.0, 450.0, 750.0, 1.5, -1.0),
            hmover(250.0, 550.0, 70.0, 150.0, 550.0, 3.0, 1.0),
            // Dual lifts running in counter-phase
            vmover(200.0, 400.0, 60.0, 300.0, 500.0, 1.8, 1.0),
            vmover(540.0, 400.0, 60.0, 300.0, 500.0, 1.8, -1.0),
            hmover(375.0, 250.0, 60.0, 200.0, 500.0, 3.5, 1.0),
        ],
        coins: vec![
            coin(120.0, 770.0),
            coin(640.0, 770.0),
            coin(220.0, 620.0),
            coin(560.0, 620.0),
            coin(370.0, 470.0),
            coin(120.0, 370.0),
            coin(640.0, 370.0),
            coin(390.0, 220.0),
        ],
        goal: goal(375.0, 180.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_THICKNESS, WORLD_WIDTH};

    #[test]
    fn test_level_count_matches_load() {
        for i in 0..level_count() {
            assert!(load(i).is_some(), "level {i} must load");
        }
        assert!(load(level_count()).is_none());
    }

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(0), "Tutorial Valley");
        assert_eq!(level_name(2), "Sky Fortress");
        assert_eq!(level_name(99), "");
        for i in 0..level_count() {
            assert_eq!(load(i).unwrap().name, level_name(i));
        }
    }

    #[test]
    fn test_geometry_is_sane() {
        for i in 0..level_count() {
            let level = load(i).unwrap();
            assert!(level.level_height >= 800.0);

            let start = level.player_start;
            assert!(start.x >= 0.0 && start.x < WORLD_WIDTH);
            assert!(start.y < level.level_height - GROUND_THICKNESS);

            for p in &level.platforms {
                assert!(p.rect.right() <= WORLD_WIDTH);
                assert!(p.rect.bottom() <= level.level_height);
            }
            for c in &level.coins {
                assert!(!c.collected);
                assert_eq!(c.animation, 0.0);
            }
            assert!(level.goal.rect.y < level.level_height);
        }
    }

    #[test]
    fn test_mover_ranges_contain_spawn() {
        for i in 0..level_count() {
            let level = load(i).unwrap();
            for m in &level.moving_platforms {
                assert!(m.direction == 1.0 || m.direction == -1.0);
                assert!(m.speed > 0.0);
                match m.path {
                    MovePath::Horizontal { start, end } => {
                        assert!(start <= end);
                        assert!(m.rect.x >= start && m.rect.x <= end);
                    }
                    MovePath::Vertical { start, end } => {
                        assert!(start <= end);
                        assert!(m.rect.y >= start && m.rect.y <= end);
                    }
                }
            }
        }
    }

    #[test]
    fn test_loads_are_independent_copies() {
        let mut a = load(0).unwrap();
        a.coins[0].collected = true;
        let b = load(0).unwrap();
        assert!(!b.coins[0].collected);
    }
}
