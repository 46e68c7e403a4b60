//! Platform collision resolution
//!
//! One actor against axis-aligned rectangles. Platforms resolve in a fixed
//! order (static list first, then moving) and a later platform may override
//! an earlier correction in the same tick; tests encode that last-write-wins
//! behavior. There is no swept collision, so very fast horizontal motion can
//! snap past thin platforms.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Coin, Goal, MovingPlatform, Platform, Player};
use crate::consts::DEATH_MARGIN;

/// Resolve the player against one platform rectangle.
///
/// Exactly one correction applies per platform per tick, in priority order:
/// landing (with optional rider displacement for moving platforms), ceiling
/// hit, side push-out. Returns true only for a landing, which is what keeps
/// the player supported this tick. The landing test compares the previous
/// tick's bottom edge (`bottom - vy`) against the platform top and accepts
/// `vy >= 0`, so an actor resting on the surface re-grounds every tick.
fn resolve(player: &mut Player, rect: &Rect, carry: Option<Vec2>) -> bool {
    if !player.rect.overlaps(rect) {
        return false;
    }

    let prev_bottom = player.rect.bottom() - player.vel.y;

    if prev_bottom <= rect.y && player.vel.y >= 0.0 {
        // Landing on top
        player.rect.y = rect.y - player.rect.h;
        player.vel.y = 0.0;
        player.grounded = true;
        if let Some(shift) = carry {
            player.rect.x += shift.x;
            player.rect.y += shift.y;
        }
        return true;
    } else if player.rect.y < rect.bottom() && player.rect.y > rect.y && player.vel.y < 0.0 {
        // Hitting the underside
        player.rect.y = rect.bottom();
        player.vel.y = 0.0;
    } else if player.rect.x < rect.center_x() {
        // Side push-out, tie-broken on the platform's horizontal midpoint
        player.rect.x = rect.x - player.rect.w;
        player.vel.x = 0.0;
    } else {
        player.rect.x = rect.right();
        player.vel.x = 0.0;
    }

    false
}

/// Resolve against a static platform. True iff the player landed on it.
pub fn resolve_static(player: &mut Player, platform: &Platform) -> bool {
    resolve(player, &platform.rect, None)
}

/// Resolve against a moving platform. A landing additionally translates the
/// player by the platform's per-tick displacement, which is what makes the
/// player ride it.
pub fn resolve_moving(player: &mut Player, platform: &MovingPlatform) -> bool {
    resolve(player, &platform.rect, Some(platform.frame_displacement()))
}

/// Snap to the ground plane if the player sank below it. True iff supported.
pub fn resolve_ground(player: &mut Player, ground_y: f32) -> bool {
    if player.rect.bottom() > ground_y {
        player.rect.y = ground_y - player.rect.h;
        player.vel.y = 0.0;
        player.grounded = true;
        return true;
    }
    false
}

/// Does the player touch an uncollected coin?
pub fn check_coin(player: &Player, coin: &Coin) -> bool {
    !coin.collected && player.rect.overlaps(&coin.rect)
}

/// Does the player touch the goal?
pub fn check_goal(player: &Player, goal: &Goal) -> bool {
    player.rect.overlaps(&goal.rect)
}

/// Has the player fallen past the death threshold?
pub fn check_death(player: &Player, level_height: f32) -> bool {
    player.rect.y > level_height + DEATH_MARGIN
}
