//! Scenario tests for the simulation, driven through the public environment.

use std::sync::Arc;

use super::*;
use crate::maze::movement::{adjacent, sample_move};
use crate::maze::{Facing, GridMap, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn classic() -> Arc<GridMap> {
    Arc::new(GridMap::classic().unwrap())
}

fn env_with(n_evaders: usize, encoding: Encoding, seed: u64) -> HideSeekEnv {
    let config = EnvConfig {
        encoding,
        ..EnvConfig::with_evaders(n_evaders)
    };
    HideSeekEnv::new(classic(), config, seed).unwrap()
}

/// Shorthand for a world state on the classic maze.
fn world(seeker: (usize, usize), evaders: &[((usize, usize), Facing)]) -> WorldState {
    WorldState::new(
        Position::new(seeker.0, seeker.1),
        evaders
            .iter()
            .map(|&((x, y), facing)| EvaderState::new(Position::new(x, y), facing))
            .collect(),
    )
}

#[cfg(test)]
mod catching {
    use super::*;

    #[test]
    fn test_adjacent_evader_looking_away_is_caught() {
        let mut env = env_with(1, Encoding::Scalar, 0);
        env.load_state(world((3, 1), &[((5, 1), Facing::East)]))
            .unwrap();

        let result = env.step(SeekerAction::Catch).unwrap();
        assert_eq!(result.reward, 100);
        assert!(result.terminated);
        assert_eq!(result.info.captured, vec![0]);
        assert_eq!(env.state().evaders[0].facing, Facing::Captured);
        assert_eq!(env.phase(), Phase::Terminated);
    }

    #[test]
    fn test_last_evader_caught_ends_episode_without_moving_others() {
        let mut env = env_with(3, Encoding::Scalar, 0);
        env.load_state(world(
            (3, 1),
            &[
                ((7, 3), Facing::Captured),
                ((9, 5), Facing::Captured),
                ((5, 1), Facing::East),
            ],
        ))
        .unwrap();

        let result = env.step(SeekerAction::Catch).unwrap();
        assert_eq!(result.reward, 100);
        assert!(result.terminated);
        assert_eq!(result.info.remaining, 0);
        assert_eq!(env.state().evaders[0].position, Position::new(7, 3));
        assert_eq!(env.state().evaders[1].position, Position::new(9, 5));
        assert_eq!(env.state().evaders[2].position, Position::new(5, 1));
    }

    #[test]
    fn test_captured_evader_stays_put_while_others_move() {
        let mut env = env_with(3, Encoding::Scalar, 17);
        env.load_state(world(
            (1, 1),
            &[
                ((9, 5), Facing::East),
                ((7, 3), Facing::Captured),
                ((9, 9), Facing::West),
            ],
        ))
        .unwrap();

        let mut others_moved = false;
        for _ in 0..10 {
            let before = env.state().clone();
            let result = env.step(SeekerAction::Stand).unwrap();
            assert!(!result.terminated);
            assert_eq!(result.info.remaining, 2);

            let after = env.state();
            assert_eq!(after.evaders[1], EvaderState::new(Position::new(7, 3), Facing::Captured));
            others_moved |= after.evaders[0].position != before.evaders[0].position
                || after.evaders[2].position != before.evaders[2].position;
        }
        assert!(others_moved);
    }

    #[test]
    fn test_simultaneous_captures_add_up() {
        let mut env = env_with(2, Encoding::Scalar, 0);
        env.load_state(world(
            (3, 1),
            &[((5, 1), Facing::East), ((3, 2), Facing::South)],
        ))
        .unwrap();

        let result = env.step(SeekerAction::Catch).unwrap();
        assert_eq!(result.reward, 200);
        assert!(result.terminated);
        assert_eq!(result.info.captured, vec![0, 1]);
    }

    #[test]
    fn test_one_watcher_protects_every_evader() {
        let mut env = env_with(2, Encoding::Scalar, 0);
        // The second evader looks up the seeker's column from far away.
        env.load_state(world(
            (3, 1),
            &[((5, 1), Facing::East), ((3, 5), Facing::North)],
        ))
        .unwrap();

        let result = env.step(SeekerAction::Catch).unwrap();
        assert_eq!(result.reward, -10);
        assert!(!result.terminated);
        assert!(result.info.spotted);
        assert_eq!(result.info.spotters, vec![1]);
        assert!(result.info.captured.is_empty());
        assert_eq!(env.state().n_active(), 2);
    }

    #[test]
    fn test_catch_on_empty_neighborhood_is_penalized() {
        let mut env = env_with(1, Encoding::Scalar, 0);
        env.load_state(world((1, 1), &[((9, 9), Facing::East)]))
            .unwrap();

        let result = env.step(SeekerAction::Catch).unwrap();
        assert_eq!(result.reward, -10);
        assert!(!result.info.spotted);
        assert!(result.info.captured.is_empty());
    }
}

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn test_blocked_move_keeps_position() {
        let mut env = env_with(1, Encoding::Scalar, 0);
        env.load_state(world((1, 1), &[((9, 9), Facing::East)]))
            .unwrap();

        let result = env.step(SeekerAction::East).unwrap();
        assert_eq!(result.reward, -10);
        assert!(!result.terminated);
        assert!(result.info.seeker_blocked);
        assert_eq!(env.state().seeker, Position::new(1, 1));
    }

    #[test]
    fn test_evaders_move_every_turn() {
        let mut env = env_with(1, Encoding::Scalar, 5);
        env.load_state(world((1, 1), &[((9, 5), Facing::East)]))
            .unwrap();

        env.step(SeekerAction::Stand).unwrap();
        let evader = env.state().evaders[0];
        assert!(adjacent(env.map(), Position::new(9, 5), evader.position));
        let heading = evader.facing.heading().unwrap();
        assert_eq!(
            Position::new(9, 5).offset(heading, GridMap::stride(heading)),
            Some(evader.position)
        );
    }

    #[test]
    fn test_resampling_needs_at_most_four_draws() {
        let map = GridMap::classic().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for &cell in map.open_cells() {
            for _ in 0..20 {
                let step = sample_move(&map, cell, &mut rng).unwrap();
                assert!((1..=4).contains(&step.attempts));
                assert!(adjacent(&map, cell, step.position));
            }
        }
    }
}

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn test_step_after_termination_fails() {
        let mut env = env_with(1, Encoding::Scalar, 0);
        env.load_state(world((3, 1), &[((5, 1), Facing::East)]))
            .unwrap();
        env.step(SeekerAction::Catch).unwrap();

        assert_eq!(env.step(SeekerAction::Stand), Err(EnvError::EpisodeFinished));
        assert_eq!(env.steps(), 1);
    }

    #[test]
    fn test_reset_reopens_terminated_episode() {
        let mut env = env_with(1, Encoding::Scalar, 0);
        env.load_state(world((3, 1), &[((5, 1), Facing::East)]))
            .unwrap();
        env.step(SeekerAction::Catch).unwrap();

        env.reset(None).unwrap();
        assert_eq!(env.phase(), Phase::Active);
        assert_eq!(env.steps(), 0);
        assert_eq!(env.cumulative_reward(), 0);
        assert_eq!(env.state().seeker, env.config().seeker_start);
        assert!(env.step(SeekerAction::Stand).is_ok());
    }

    #[test]
    fn test_loading_fully_captured_state_terminates() {
        let mut env = env_with(1, Encoding::Scalar, 0);
        env.load_state(world((1, 1), &[((5, 1), Facing::Captured)]))
            .unwrap();
        assert!(env.is_terminated());
    }

    #[test]
    fn test_cumulative_reward_tracks_steps() {
        let mut env = env_with(1, Encoding::Scalar, 0);
        env.load_state(world((1, 1), &[((9, 9), Facing::East)]))
            .unwrap();
        env.step(SeekerAction::East).unwrap();
        env.step(SeekerAction::South).unwrap();
        assert_eq!(env.steps(), 2);
        assert_eq!(env.cumulative_reward(), -11);
    }
}

#[cfg(test)]
mod encoding {
    use super::*;

    #[test]
    fn test_scalar_observation_matches_codec() {
        let mut env = env_with(2, Encoding::Scalar, 0);
        let state = world((3, 1), &[((5, 1), Facing::East), ((9, 5), Facing::North)]);
        let obs = env.load_state(state.clone()).unwrap();
        assert_eq!(obs.index(), Some(env.codec().encode(&state).unwrap()));
        assert_eq!(env.codec().decode(obs.index().unwrap()).unwrap(), state);
    }

    #[test]
    fn test_array_observation_matches_codec() {
        let mut env = env_with(2, Encoding::Array, 0);
        let state = world((3, 1), &[((5, 1), Facing::Captured), ((9, 5), Facing::North)]);
        let obs = env.load_state(state.clone()).unwrap();
        let digits = obs.digits().unwrap();
        assert_eq!(digits.len(), env.codec().width());
        assert_eq!(env.codec().from_digits(digits).unwrap(), state);
    }

    #[test]
    fn test_state_space_size_for_classic_maze() {
        assert_eq!(env_with(1, Encoding::Scalar, 0).state_space_size(), Some(32_805));
        assert_eq!(
            env_with(3, Encoding::Scalar, 0).state_space_size(),
            Some(81 * 405 * 405 * 405)
        );
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn agents_stay_on_open_cells(
            seed in any::<u64>(),
            actions in prop::collection::vec(0usize..SeekerAction::COUNT, 1..150),
        ) {
            let mut env = env_with(2, Encoding::Scalar, seed);
            for action in actions {
                if env.is_terminated() {
                    break;
                }
                env.step_index(action).unwrap();
                let state = env.state();
                prop_assert!(env.map().is_agent_cell(state.seeker));
                for evader in &state.evaders {
                    prop_assert!(env.map().is_agent_cell(evader.position));
                }
            }
        }

        #[test]
        fn captures_never_undo(
            seed in any::<u64>(),
            actions in prop::collection::vec(0usize..SeekerAction::COUNT, 1..150),
        ) {
            let mut env = env_with(3, Encoding::Scalar, seed);
            // Start with one evader already out so later turns exercise it.
            let mut start = env.state().clone();
            start.evaders[0].facing = Facing::Captured;
            env.load_state(start.clone()).unwrap();

            let mut captured_at: Vec<Option<Position>> = start
                .evaders
                .iter()
                .map(|e| (!e.is_active()).then_some(e.position))
                .collect();
            for action in actions {
                if env.is_terminated() {
                    break;
                }
                let result = env.step_index(action).unwrap();
                for (i, evader) in env.state().evaders.iter().enumerate() {
                    if let Some(position) = captured_at[i] {
                        prop_assert_eq!(evader.facing, Facing::Captured);
                        prop_assert_eq!(evader.position, position);
                    } else if !evader.is_active() {
                        captured_at[i] = Some(evader.position);
                    }
                }
                prop_assert_eq!(result.info.remaining, env.state().n_active());
                prop_assert_eq!(result.terminated, env.state().all_captured());
            }
        }

        #[test]
        fn single_evader_rewards_are_bounded(
            seed in any::<u64>(),
            actions in prop::collection::vec(0usize..SeekerAction::COUNT, 1..150),
        ) {
            let mut env = env_with(1, Encoding::Scalar, seed);
            let bound = env.state_space_size().unwrap();
            for action in actions {
                if env.is_terminated() {
                    break;
                }
                let result = env.step_index(action).unwrap();
                prop_assert!([-10, -1, 100].contains(&result.reward));
                prop_assert!(result.observation.index().unwrap() < bound);
            }
        }
    }
}
