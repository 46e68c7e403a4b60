//! Fixed timestep simulation tick
//!
//! One call advances the whole game by one step: state machine first, then
//! goal/death evaluation, physics, platform motion, collision resolution and
//! bookkeeping.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};
use super::{collision, physics};
use crate::consts::*;
use crate::levels;

/// Input snapshot for a single tick. Event handlers only set flags here;
/// the sim reads it once per tick and never mutates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Pause toggle (one-shot, cleared by the host after each tick)
    pub pause: bool,
    /// Full session reset (one-shot)
    pub reset: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Explicit external reset works from any phase, including the terminal
    // ones.
    if input.reset {
        state.reset();
        return;
    }

    // Pause toggles only between Playing and Paused; it must not fire while
    // dead, game over or won.
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    // The run timer keeps counting through the death and level-complete
    // countdowns and freezes for good once the final goal is reached.
    if !state.game_completed {
        state.stats.timer += dt;
    }

    match state.phase {
        GamePhase::Dead => {
            state.death_timer = state.death_timer.saturating_sub(1);
            if state.death_timer == 0 {
                state.respawn_player();
            }
            return;
        }
        GamePhase::LevelComplete => {
            state.level_complete_timer = state.level_complete_timer.saturating_sub(1);
            if state.level_complete_timer == 0 {
                state.next_level();
            }
            return;
        }
        GamePhase::GameOver | GamePhase::Won => return,
        GamePhase::Playing | GamePhase::Paused => {}
    }

    state.time_ticks += 1;

    // Goal and death are evaluated on the position the previous tick
    // resolved. Checking before integration matters: the full-width ground
    // plane would otherwise snap a fallen player back up before the death
    // threshold could ever be observed.
    if collision::check_goal(&state.player, &state.goal) {
        on_goal_reached(state);
        return;
    }
    if collision::check_death(&state.player, state.level_height) {
        on_death(state);
        return;
    }

    let was_grounded = state.player.grounded;

    physics::integrate(&mut state.player, input.left, input.right, input.jump);
    physics::clamp_to_world(&mut state.player, WORLD_WIDTH);

    // Edge-detect the actual takeoff for effects
    if input.jump && was_grounded && !state.player.grounded {
        let feet = Vec2::new(state.player.rect.center_x(), state.player.rect.bottom());
        state.spawn_jump_particles(feet);
        state.events.push(GameEvent::Jump);
    }

    for platform in &mut state.moving_platforms {
        platform.advance();
    }

    collect_coins(state);

    // Fixed iteration order: static list first, then moving. A later
    // platform may override an earlier correction (last write wins).
    let mut supported = false;
    for platform in &state.platforms {
        if collision::resolve_static(&mut state.player, platform) {
            supported = true;
        }
    }
    for platform in &state.moving_platforms {
        if collision::resolve_moving(&mut state.player, platform) {
            supported = true;
        }
    }
    if !supported && !collision::resolve_ground(&mut state.player, state.ground_y) {
        state.player.grounded = false;
    }

    state.camera.follow(state.player.rect.y, state.level_height);
    state.update_particles();
}

/// Animate all coins and collect the ones the player touches. Collection is
/// irreversible and independent of phase transitions.
fn collect_coins(state: &mut GameState) {
    for i in 0..state.coins.len() {
        state.coins[i].animation += COIN_ANIMATION_RATE;
        if collision::check_coin(&state.player, &state.coins[i]) {
            state.coins[i].collected = true;
            state.stats.coins_collected += 1;
            state.stats.score += COIN_SCORE;
            let center = state.coins[i].rect.center();
            state.spawn_coin_particles(center);
            state.events.push(GameEvent::CoinCollected);
        }
    }
}

/// Score bonuses, best-time records and the transition to LevelComplete or
/// Won.
fn on_goal_reached(state: &mut GameState) {
    let timer = state.stats.timer;
    let time_bonus = TIME_BONUS_CUTOFF.saturating_sub(timer as u32) * TIME_BONUS_RATE;
    let life_bonus = state.player.lives.max(0) as u32 * LIFE_BONUS;
    state.stats.score += time_bonus + life_bonus;
    state.events.push(GameEvent::GoalReached);

    if state.best_times.record_level(state.current_level, timer) {
        state.events.push(GameEvent::LevelRecord {
            level: state.current_level,
            time: timer,
        });
    }
    if state.best_times.record_global(timer) {
        state.events.push(GameEvent::GlobalRecord { time: timer });
    }

    state.has_won = true;
    if state.current_level + 1 >= levels::level_count() {
        state.phase = GamePhase::Won;
        state.game_completed = true;
        log::info!("Run complete in {:.1}s", timer);
    } else {
        state.phase = GamePhase::LevelComplete;
        state.level_complete_timer = LEVEL_COMPLETE_DELAY_TICKS;
        state.events.push(GameEvent::LevelComplete);
    }
}

/// Lose a life; either arm the respawn countdown or end the run
fn on_death(state: &mut GameState) {
    state.stats.deaths += 1;
    state.player.lives -= 1;
    let center = state.player.rect.center();
    state.spawn_death_particles(center);
    state.events.push(GameEvent::Death);

    if state.player.lives <= 0 {
        state.phase = GamePhase::GameOver;
    } else {
        state.phase = GamePhase::Dead;
        state.death_timer = RESPAWN_DELAY_TICKS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> GameState {
        GameState::new(12345)
    }

    /// Drop the player onto the goal rectangle of the current level
    fn place_on_goal(state: &mut GameState) {
        let goal = state.goal.rect;
        state.player.rect.x = goal.x;
        state.player.rect.y = goal.y;
        state.player.vel = Vec2::ZERO;
        // Keep coins out of the way so scoring is isolated
        state.coins.clear();
    }

    #[test]
    fn test_pause_toggle_only_playing_and_paused() {
        let mut state = fresh_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);

        // Pause must not fire while dead
        state.phase = GamePhase::Dead;
        state.death_timer = 50;
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Dead);
    }

    #[test]
    fn test_paused_is_a_no_op() {
        let mut state = fresh_state();
        state.phase = GamePhase::Paused;
        let before_x = state.player.rect.x;
        let before_timer = state.stats.timer;

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.rect.x, before_x);
        assert_eq!(state.stats.timer, before_timer);
    }

    #[test]
    fn test_idempotent_rest_on_platform() {
        let mut state = fresh_state();
        // Level 1 has a static platform at (50, 700, 150, 20)
        let plat = state.platforms[0].rect;
        state.player.rect.x = plat.x + 10.0;
        state.player.rect.y = plat.y - state.player.rect.h;
        state.player.vel = Vec2::ZERO;
        state.player.grounded = true;

        let before = state.player.rect;
        tick(&mut state, &TickInput::default(), SIM_DT);

        // Grounded invariant: resting actor is unchanged and re-grounded
        assert_eq!(state.player.rect, before);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(state.player.grounded);
        assert_eq!(state.player.rect.bottom(), plat.y);
    }

    #[test]
    fn test_falling_player_lands_and_grounds() {
        let mut state = fresh_state();
        let plat = state.platforms[0].rect;
        state.player.rect.x = plat.x + 10.0;
        state.player.rect.y = plat.y - state.player.rect.h - 4.0;
        state.player.vel = Vec2::new(0.0, 5.0);
        state.player.grounded = false;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.grounded);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.rect.bottom(), plat.y);
    }

    #[test]
    fn test_coin_collection_is_monotonic() {
        let mut state = fresh_state();
        let coin_rect = state.coins[0].rect;
        state.player.rect.x = coin_rect.x;
        state.player.rect.y = coin_rect.y;
        state.player.vel = Vec2::ZERO;

        let score_before = state.stats.score;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.coins[0].collected);
        assert_eq!(state.stats.coins_collected, 1);
        assert_eq!(state.stats.score, score_before + COIN_SCORE);

        // Still overlapping next tick: no double collection
        state.player.rect.x = coin_rect.x;
        state.player.rect.y = coin_rect.y;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.coins[0].collected);
        assert_eq!(state.stats.coins_collected, 1);
        assert_eq!(state.stats.score, score_before + COIN_SCORE);
    }

    #[test]
    fn test_goal_scoring_on_final_level() {
        let mut state = fresh_state();
        state.load_level(levels::level_count() - 1);
        state.stats.timer = 45.2;
        state.player.lives = 3;
        place_on_goal(&mut state);

        let score_before = state.stats.score;
        tick(&mut state, &TickInput::default(), SIM_DT);

        // timeBonus = (120 - 45) * 10 = 750, lifeBonus = 3 * 500 = 1500
        assert_eq!(state.stats.score, score_before + 2250);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.game_completed);
        assert!(state.has_won);

        // Timer is frozen from now on
        let frozen = state.stats.timer;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.stats.timer, frozen);
    }

    #[test]
    fn test_goal_records_best_times() {
        let mut state = fresh_state();
        state.stats.timer = 30.0;
        place_on_goal(&mut state);

        tick(&mut state, &TickInput::default(), SIM_DT);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::GoalReached));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::LevelRecord { level: 0, .. }))
        );
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::GlobalRecord { .. }))
        );
        assert!(state.best_times.level(0) < BEST_TIME_SENTINEL);

        // A slower finish does not lower the record
        let best = state.best_times.level(0);
        state.phase = GamePhase::Playing;
        state.has_won = false;
        state.stats.timer = best + 50.0;
        place_on_goal(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.best_times.level(0), best);
        assert!(
            !state
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelRecord { .. }))
        );
    }

    #[test]
    fn test_goal_arms_level_complete_countdown() {
        let mut state = fresh_state();
        place_on_goal(&mut state);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.level_complete_timer, LEVEL_COMPLETE_DELAY_TICKS);
        assert!(state.has_won);
    }

    #[test]
    fn test_level_complete_countdown_advances_level() {
        let mut state = fresh_state();
        state.phase = GamePhase::LevelComplete;
        state.has_won = true;
        state.level_complete_timer = 1;
        state.stats.coins_collected = 3;
        let score_before = state.stats.score;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.stats.levels_completed, 1);
        assert_eq!(state.stats.score, score_before + LEVEL_BONUS);
        // Per-level stats reset on load
        assert_eq!(state.stats.coins_collected, 0);
        assert_eq!(state.stats.timer, 0.0);
        assert!(!state.has_won);
    }

    #[test]
    fn test_death_with_one_life_is_game_over() {
        let mut state = fresh_state();
        state.player.lives = 1;
        state.player.rect.y = state.level_height + 150.0;
        state.player.rect.x = 400.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.stats.deaths, 1);
        assert!(state.take_events().contains(&GameEvent::Death));
    }

    #[test]
    fn test_death_with_lives_left_arms_respawn() {
        let mut state = fresh_state();
        state.player.lives = 3;
        state.player.rect.y = state.level_height + 150.0;
        state.player.rect.x = 400.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.death_timer, RESPAWN_DELAY_TICKS);
    }

    #[test]
    fn test_respawn_at_countdown_exhaustion() {
        let mut state = fresh_state();
        let anchor = state.player.respawn;
        state.phase = GamePhase::Dead;
        state.death_timer = 1;
        state.player.rect.y = state.level_height + 200.0;
        state.player.vel = Vec2::new(3.0, 9.0);
        state.camera.y = 250.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.rect.x, anchor.x);
        assert_eq!(state.player.rect.y, anchor.y);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(!state.player.grounded);
        assert_eq!(state.camera.y, 0.0);
    }

    #[test]
    fn test_terminal_states_ignore_input() {
        for phase in [GamePhase::GameOver, GamePhase::Won] {
            let mut state = fresh_state();
            state.phase = phase;
            let before_x = state.player.rect.x;

            let input = TickInput {
                left: true,
                jump: true,
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT);
            assert_eq!(state.phase, phase);
            assert_eq!(state.player.rect.x, before_x);
        }
    }

    #[test]
    fn test_reset_restores_session_but_keeps_best_times() {
        let mut state = fresh_state();
        state.best_times.record_level(1, 42.0);
        state.phase = GamePhase::GameOver;
        state.player.lives = 0;
        state.stats.score = 5000;
        state.stats.deaths = 3;
        state.current_level = 2;

        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, STARTING_LIVES);
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.deaths, 0);
        assert_eq!(state.current_level, 0);
        assert_eq!(state.best_times.level(1), 42.0);
    }

    #[test]
    fn test_riding_platform_carries_player() {
        let mut state = fresh_state();
        // Mountain Climb has horizontal movers
        state.load_level(1);
        state.platforms.clear();
        state.coins.clear();
        let mover = &mut state.moving_platforms[0];
        mover.speed = 2.0;
        mover.direction = 1.0;
        let plat = mover.rect;

        state.player.rect.x = plat.x + 10.0;
        state.player.rect.y = plat.y - state.player.rect.h;
        state.player.vel = Vec2::ZERO;
        state.player.grounded = true;

        let x_before = state.player.rect.x;
        tick(&mut state, &TickInput::default(), SIM_DT);
        // No input: vx stays zero, so the full delta is the platform carry
        assert_eq!(state.player.rect.x, x_before + 2.0);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_jump_emits_event_once() {
        let mut state = fresh_state();
        let plat = state.platforms[0].rect;
        state.player.rect.x = plat.x + 10.0;
        state.player.rect.y = plat.y - state.player.rect.h;
        state.player.vel = Vec2::ZERO;
        state.player.grounded = true;

        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.take_events().contains(&GameEvent::Jump));
        assert!(!state.player.grounded);

        // Holding jump while airborne emits nothing
        tick(&mut state, &input, SIM_DT);
        assert!(!state.take_events().contains(&GameEvent::Jump));
    }
}
