//! Property tests for engine invariants over random catalogs and play.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use movie_chain::core::{GameConfig, GameState, Player, PlayerId};
use movie_chain::movies::{Catalog, ConnectionType, Movie, MovieCatalog, MovieId};
use movie_chain::rules::WinCondition;

const ACTORS: [&str; 4] = ["Ava", "Ben", "Cy", "Di"];
const GENRES: [&str; 3] = ["Drama", "Comedy", "Horror"];

/// (actor flags, genre index) per movie.
fn catalog_strategy() -> impl Strategy<Value = Vec<(Vec<bool>, usize)>> {
    prop::collection::vec(
        (prop::collection::vec(any::<bool>(), ACTORS.len()), 0..GENRES.len()),
        2..16,
    )
}

fn build_state(spec: &[(Vec<bool>, usize)]) -> GameState {
    let movies: Vec<Movie> = spec
        .iter()
        .enumerate()
        .map(|(i, (flags, genre))| {
            let actors = ACTORS
                .iter()
                .zip(flags)
                .filter(|&(_, &on)| on)
                .map(|(name, _)| *name);
            Movie::new(MovieId::new(i as u32 + 1), format!("Movie {i}"), 2000)
                .with_actors(actors)
                .with_genres([GENRES[*genre]])
        })
        .collect();

    let players = vec![
        Player::new("Ann", WinCondition::new(ConnectionType::Genre, "Drama", 3)),
        Player::new("Bo", WinCondition::new(ConnectionType::Actor, "Ava", 3)),
    ];
    let catalog = MovieCatalog::from_movies(movies).unwrap();
    let mut state = GameState::new(catalog, players, &GameConfig::default());
    state.initial_game_state().unwrap();
    state
}

/// Try each candidate in turn, applying legal moves. Returns moves applied.
fn play(state: &mut GameState, candidates: &[usize]) -> usize {
    let count = state.catalog().len();
    let mut applied = 0;
    for &pick in candidates {
        let id = MovieId::new((pick % count) as u32 + 1);
        let Some(candidate) = state.catalog().get(id).cloned() else {
            continue;
        };
        let player = state.current_player_id();
        if let Some(mv) = state.try_build_move(player, &candidate) {
            state.apply_move(mv);
            state.next_turn();
            applied += 1;
        }
    }
    applied
}

proptest! {
    #[test]
    fn test_used_ids_grow_one_per_transition(
        spec in catalog_strategy(),
        candidates in prop::collection::vec(0usize..32, 0..40),
    ) {
        let mut state = build_state(&spec);

        let applied = play(&mut state, &candidates);

        prop_assert_eq!(state.used_movie_ids().len(), applied + 1);
        prop_assert_eq!(state.play_history().len(), applied + 1);
        let distinct: FxHashSet<MovieId> = state.play_history().iter().map(|m| m.id).collect();
        prop_assert_eq!(distinct.len(), applied + 1);
    }

    #[test]
    fn test_usage_never_exceeds_limit(
        spec in catalog_strategy(),
        candidates in prop::collection::vec(0usize..32, 0..40),
    ) {
        let mut state = build_state(&spec);

        play(&mut state, &candidates);

        for mv in state.move_history() {
            let count = state.usage_count(mv.connection(), mv.value());
            let recorded = state
                .move_history()
                .iter()
                .filter(|other| other.uses(mv.connection(), mv.value()))
                .count();
            prop_assert!(count <= state.usage_limit());
            prop_assert_eq!(count as usize, recorded);
        }
    }

    #[test]
    fn test_every_built_move_validates(
        spec in catalog_strategy(),
        candidates in prop::collection::vec(0usize..32, 0..20),
        pick in 0usize..32,
    ) {
        let mut state = build_state(&spec);
        play(&mut state, &candidates);

        let id = MovieId::new((pick % state.catalog().len()) as u32 + 1);
        let candidate = state.catalog().get(id).cloned().unwrap();
        if let Some(mv) = state.try_build_move(state.current_player_id(), &candidate) {
            prop_assert!(state.is_valid_move(&mv));
        }
    }

    #[test]
    fn test_progress_is_min_of_calls_and_target(calls in 0u32..20, target in 1u32..10) {
        let mut wc = WinCondition::new(ConnectionType::Genre, "Drama", target);

        for _ in 0..calls {
            wc.record_progress();
        }

        prop_assert_eq!(wc.progress(), calls.min(target));
        prop_assert_eq!(wc.is_met(), calls >= target);
    }

    #[test]
    fn test_next_turn_advances_by_k_mod_n(players in 2usize..8, k in 0u32..50) {
        let roster: Vec<Player> = (0..players)
            .map(|i| Player::new(format!("P{i}"), WinCondition::new(ConnectionType::Genre, "Drama", 1)))
            .collect();
        let mut state = GameState::new(MovieCatalog::new(), roster, &GameConfig::default());

        for _ in 0..k {
            state.next_turn();
        }

        prop_assert_eq!(state.current_player_id(), PlayerId::new((k as usize % players) as u8));
        prop_assert_eq!(state.rounds_played(), k);
    }
}
