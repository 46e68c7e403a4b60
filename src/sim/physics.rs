//! Player kinematics
//!
//! Explicit Euler with no sub-stepping: moving fast through thin platforms
//! is an accepted limitation. Constants are tuned for a 60 Hz tick.

use crate::consts::{FRICTION, GRAVITY};

use super::state::Player;

/// Advance the player one tick from the input snapshot.
///
/// Order matters and is fixed: horizontal input (or friction decay), jump,
/// gravity, position update. Friction decays vx exponentially toward zero
/// but never hard-zeroes it.
pub fn integrate(player: &mut Player, left: bool, right: bool, jump: bool) {
    if left {
        player.vel.x = -player.speed;
    } else if right {
        player.vel.x = player.speed;
    } else {
        player.vel.x *= FRICTION;
    }

    // Reacts to the flag being true while grounded; press-vs-hold is the
    // caller's concern.
    if jump && player.grounded {
        player.vel.y = player.jump_power;
        player.grounded = false;
    }

    player.vel.y += GRAVITY;

    player.rect.x += player.vel.x;
    player.rect.y += player.vel.y;
}

/// Clamp the player horizontally to the world. The vertical axis is left
/// open: falling past the level bottom is the death condition, handled by
/// the state machine.
pub fn clamp_to_world(player: &mut Player, world_width: f32) {
    if player.rect.x < 0.0 {
        player.rect.x = 0.0;
        player.vel.x = 0.0;
    }
    if player.rect.right() > world_width {
        player.rect.x = world_width - player.rect.w;
        player.vel.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{JUMP_POWER, PLAYER_SPEED};
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(x, y)
    }

    #[test]
    fn test_horizontal_input_sets_velocity() {
        let mut p = player_at(100.0, 100.0);
        integrate(&mut p, true, false, false);
        assert_eq!(p.vel.x, -PLAYER_SPEED);

        integrate(&mut p, false, true, false);
        assert_eq!(p.vel.x, PLAYER_SPEED);
    }

    #[test]
    fn test_friction_decays_but_never_zeroes() {
        let mut p = player_at(100.0, 100.0);
        p.vel.x = PLAYER_SPEED;

        let mut prev = p.vel.x;
        for _ in 0..50 {
            integrate(&mut p, false, false, false);
            assert!(p.vel.x > 0.0, "friction must not hard-zero vx");
            assert!(p.vel.x < prev, "vx must strictly decay");
            assert!((p.vel.x - prev * FRICTION).abs() < 1e-6);
            prev = p.vel.x;
        }
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut p = player_at(100.0, 100.0);
        p.grounded = false;
        integrate(&mut p, false, false, true);
        // No jump: gravity only
        assert_eq!(p.vel.y, GRAVITY);

        let mut p = player_at(100.0, 100.0);
        p.grounded = true;
        integrate(&mut p, false, false, true);
        assert_eq!(p.vel.y, JUMP_POWER + GRAVITY);
        assert!(!p.grounded);
    }

    #[test]
    fn test_gravity_every_tick() {
        let mut p = player_at(100.0, 100.0);
        integrate(&mut p, false, false, false);
        integrate(&mut p, false, false, false);
        assert_eq!(p.vel.y, 2.0 * GRAVITY);
    }

    #[test]
    fn test_euler_position_update() {
        let mut p = player_at(100.0, 100.0);
        p.vel.x = 3.0;
        p.vel.y = -2.0;
        integrate(&mut p, false, false, false);
        // x moved by the decayed vx, y by vy after gravity
        assert_eq!(p.rect.x, 100.0 + 3.0 * FRICTION);
        assert_eq!(p.rect.y, 100.0 + (-2.0 + GRAVITY));
    }

    #[test]
    fn test_world_clamp_left() {
        let mut p = player_at(-5.0, 100.0);
        p.vel.x = -4.0;
        clamp_to_world(&mut p, 800.0);
        assert_eq!(p.rect.x, 0.0);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_world_clamp_right() {
        let mut p = player_at(790.0, 100.0);
        p.vel.x = 4.0;
        clamp_to_world(&mut p, 800.0);
        assert_eq!(p.rect.right(), 800.0);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_no_vertical_clamp() {
        // Falling far below the world must not be corrected here
        let mut p = player_at(100.0, 5000.0);
        p.vel.y = 20.0;
        clamp_to_world(&mut p, 800.0);
        assert_eq!(p.rect.y, 5000.0);
        assert_eq!(p.vel.y, 20.0);
    }

    proptest! {
        #[test]
        fn prop_friction_preserves_sign(vx in -50.0f32..50.0) {
            let mut p = player_at(100.0, 100.0);
            p.vel.x = vx;
            for _ in 0..200 {
                integrate(&mut p, false, false, false);
                prop_assert!(p.vel.x.abs() <= vx.abs());
                if vx != 0.0 {
                    prop_assert!(p.vel.x.signum() == vx.signum() || p.vel.x == 0.0);
                }
            }
        }
    }
}
