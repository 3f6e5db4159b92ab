//! Authoritative game state and the move-legality engine.
//!
//! ## GameState
//!
//! Owns everything that changes during a game:
//! - The current movie (top of the play pile)
//! - Players, the current seat, and the round counter
//! - Used movie ids and per-connection usage counts
//! - Play history (every movie, including power-up replacements) and move
//!   history (player moves only)
//! - Power-up inventories and blocked seats
//! - The time-expiry flag
//!
//! All mutation goes through `&mut self` methods, so whoever owns the state
//! serializes access to it. Legality checks never mutate.
//!
//! ## GameSnapshot
//!
//! Read-only copy for display. Histories use `im` vectors, so taking a
//! snapshot does not copy them.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use super::config::GameConfig;
use super::error::GameError;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::movies::{Catalog, ConnectionType, Movie, MovieCatalog, MovieId};
use crate::rules::{GameResult, Move, PowerUp, PowerUpSet, WinCondition};

/// Full mutable game state.
#[derive(Clone, Debug)]
pub struct GameState<C: Catalog = MovieCatalog> {
    catalog: C,
    rng: GameRng,
    usage_limit: u32,

    current_movie: Option<Movie>,
    players: PlayerMap<Player>,
    current: PlayerId,
    rounds_played: u32,

    used_movie_ids: FxHashSet<MovieId>,
    connection_usage: FxHashMap<ConnectionType, FxHashMap<String, u32>>,

    play_history: Vector<Movie>,
    move_history: Vector<Move>,

    power_ups: PlayerMap<PowerUpSet>,
    blocked: FxHashSet<PlayerId>,

    time_expired: bool,
    expired_player: Option<PlayerId>,
}

impl<C: Catalog> GameState<C> {
    /// Create a game with the given players and no current movie.
    ///
    /// Call [`initial_game_state`](Self::initial_game_state) before playing.
    ///
    /// # Panics
    ///
    /// Panics if `players` is empty or has more than 255 entries. Use
    /// [`setup`](Self::setup) to get a config error instead.
    #[must_use]
    pub fn new(catalog: C, players: Vec<Player>, config: &GameConfig) -> Self {
        let players = PlayerMap::from_vec(players);
        let player_count = players.player_count();

        Self {
            catalog,
            rng: GameRng::new(config.seed).for_context("catalog"),
            usage_limit: config.connection_usage_limit,
            current_movie: None,
            players,
            current: PlayerId::new(0),
            rounds_played: 0,
            used_movie_ids: FxHashSet::default(),
            connection_usage: FxHashMap::default(),
            play_history: Vector::new(),
            move_history: Vector::new(),
            power_ups: PlayerMap::new(player_count, |_| PowerUpSet::full()),
            blocked: FxHashSet::default(),
            time_expired: false,
            expired_player: None,
        }
    }

    /// Build a ready-to-play game from a config: one random win condition
    /// per named player, then a random starting movie.
    pub fn setup(catalog: C, config: &GameConfig) -> Result<Self, GameError> {
        config.validate().map_err(GameError::InvalidConfig)?;

        let mut win_rng = GameRng::new(config.seed).for_context("win-conditions");
        let players = config
            .player_names
            .iter()
            .map(|name| {
                let condition = WinCondition::random(
                    &catalog,
                    &mut win_rng,
                    config.win_target,
                    config.genre_only_win_conditions,
                );
                debug!(player = %name, condition = %condition.description(), "Assigned win condition");
                Player::new(name.clone(), condition)
            })
            .collect();

        let mut state = Self::new(catalog, players, config);
        state.initial_game_state()?;
        Ok(state)
    }

    /// Seed the play pile with a random catalog movie.
    ///
    /// The starting movie is not a `Move`: it goes into the play history
    /// and the used set only.
    pub fn initial_game_state(&mut self) -> Result<(), GameError> {
        let movie = self.catalog.random_movie(&mut self.rng)?;
        info!(movie = %movie.title, "Starting movie drawn");
        self.replace_current_movie(movie);
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub fn current_movie(&self) -> Option<&Movie> {
        self.current_movie.as_ref()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// The seat after the current one. In a two-player game, the opponent.
    #[must_use]
    pub fn opponent_id(&self) -> PlayerId {
        self.current.next(self.player_count())
    }

    /// Get a player. Panics if `id` is not a seat in this game.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    #[must_use]
    pub fn usage_limit(&self) -> u32 {
        self.usage_limit
    }

    /// Times `connection`/`value` has linked two movies so far.
    #[must_use]
    pub fn usage_count(&self, connection: ConnectionType, value: &str) -> u32 {
        self.connection_usage
            .get(&connection)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0)
    }

    /// Every movie that has been on the pile, including the starting movie
    /// and Escape draws. Without Escape its length is one more than the
    /// number of moves.
    #[must_use]
    pub fn used_movie_ids(&self) -> &FxHashSet<MovieId> {
        &self.used_movie_ids
    }

    #[must_use]
    pub fn is_used(&self, id: MovieId) -> bool {
        self.used_movie_ids.contains(&id)
    }

    /// Every movie that has been on top of the pile, oldest first.
    #[must_use]
    pub fn play_history(&self) -> &Vector<Movie> {
        &self.play_history
    }

    /// Accepted player moves, oldest first.
    #[must_use]
    pub fn move_history(&self) -> &Vector<Move> {
        &self.move_history
    }

    /// Power-ups `player` still holds. Empty for unknown seats.
    #[must_use]
    pub fn power_ups_for(&self, player: PlayerId) -> PowerUpSet {
        if self.players.contains(player) {
            self.power_ups[player].clone()
        } else {
            PowerUpSet::empty()
        }
    }

    #[must_use]
    pub fn is_blocked(&self, player: PlayerId) -> bool {
        self.blocked.contains(&player)
    }

    #[must_use]
    pub fn is_time_expired(&self) -> bool {
        self.time_expired
    }

    // === Move legality ===

    /// Find a legal move from the current movie to `candidate` for `player`.
    ///
    /// The player's own win-condition connection is tried first; after that,
    /// connection types in declaration order and the candidate's values in
    /// stored order. Returns `None` if nothing links legally.
    #[must_use]
    pub fn try_build_move(&self, player: PlayerId, candidate: &Movie) -> Option<Move> {
        let current = self.current_movie.as_ref()?;
        if !self.players.contains(player) {
            return None;
        }

        let goal = self.players[player].win_condition();
        if current.has_connection(goal.connection(), goal.value())
            && self.is_legal(candidate, goal.connection(), goal.value())
        {
            return Some(Move::new(player, candidate.clone(), goal.connection(), goal.value()));
        }

        for connection in ConnectionType::iter() {
            for value in candidate.connections(connection) {
                if current.has_connection(connection, value)
                    && self.is_legal(candidate, connection, value)
                {
                    return Some(Move::new(player, candidate.clone(), connection, value.clone()));
                }
            }
        }

        None
    }

    /// Check a move against the current state: unused movie, connection
    /// under its usage limit, and both movies actually sharing it.
    #[must_use]
    pub fn is_valid_move(&self, mv: &Move) -> bool {
        self.is_legal(mv.movie(), mv.connection(), mv.value())
    }

    /// [`try_build_move`](Self::try_build_move) with the failure explained.
    pub fn build_move(&self, player: PlayerId, candidate: &Movie) -> Result<Move, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        self.try_build_move(player, candidate)
            .ok_or_else(|| GameError::InvalidMove {
                title: candidate.title.clone(),
            })
    }

    fn is_legal(&self, candidate: &Movie, connection: ConnectionType, value: &str) -> bool {
        let Some(current) = &self.current_movie else {
            return false;
        };

        !self.used_movie_ids.contains(&candidate.id)
            && self.usage_count(connection, value) < self.usage_limit
            && current.has_connection(connection, value)
            && candidate.has_connection(connection, value)
    }

    // === Mutation ===

    /// Record a validated move. Does not advance the turn.
    #[instrument(
        skip_all,
        fields(
            player = %mv.player(),
            movie = %mv.movie().title,
            connection = %mv.connection(),
            value = mv.value(),
        )
    )]
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.is_valid_move(&mv), "apply_move called with an invalid move");

        *self
            .connection_usage
            .entry(mv.connection())
            .or_default()
            .entry(mv.value().to_string())
            .or_insert(0) += 1;

        let movie = mv.movie().clone();
        self.used_movie_ids.insert(movie.id);
        self.catalog.mark_used(movie.id);
        self.play_history.push_back(movie.clone());
        self.current_movie = Some(movie);

        if self.players.contains(mv.player()) {
            let player = &mut self.players[mv.player()];
            if player.win_condition().matches(mv.connection(), mv.value()) {
                player.record_win_progress();
                info!(
                    progress = player.win_condition().progress(),
                    target = player.win_condition().target(),
                    "Win condition advanced"
                );
            }
        }

        self.move_history.push_back(mv);
    }

    /// Put `movie` on top of the pile without a `Move`.
    ///
    /// Connection usage and win progress are untouched; the movie is marked
    /// used so it cannot be played onto itself. It joins the play history
    /// but not the move history.
    pub fn replace_current_movie(&mut self, movie: Movie) {
        self.used_movie_ids.insert(movie.id);
        self.catalog.mark_used(movie.id);
        self.play_history.push_back(movie.clone());
        self.current_movie = Some(movie);
    }

    /// Swap the current movie for a fresh random one from the catalog.
    pub fn escape_to_random_movie(&mut self) -> Result<&Movie, GameError> {
        let movie = self.catalog.random_movie(&mut self.rng)?;
        info!(movie = %movie.title, "Escaped to new movie");
        self.replace_current_movie(movie);
        self.current_movie.as_ref().ok_or(GameError::CatalogExhausted)
    }

    /// Hand the turn to the next seat.
    pub fn next_turn(&mut self) {
        self.current = self.current.next(self.player_count());
        self.rounds_played += 1;
        debug!(current = %self.current, rounds = self.rounds_played, "Turn advanced");
    }

    /// Skip the current player's turn.
    pub fn skip_player(&mut self) {
        self.next_turn();
    }

    /// Block `target`.
    ///
    /// If `target` is the current player the block is consumed at once and
    /// the turn moves on. Otherwise the mark is only recorded.
    pub fn block_player(&mut self, target: PlayerId) {
        self.blocked.insert(target);
        if target == self.current {
            self.blocked.remove(&target);
            debug!(player = %target, "Blocked player skipped");
            self.next_turn();
        }
    }

    /// Spend `power_up` from `player`'s inventory and execute it.
    ///
    /// Returns false, with no side effects, if the player no longer holds it
    /// or it could not be carried out.
    pub fn apply_command(&mut self, player: PlayerId, power_up: PowerUp) -> bool {
        self.try_apply_command(player, power_up).is_ok()
    }

    /// [`apply_command`](Self::apply_command) with the failure explained.
    #[instrument(skip_all, fields(player = %player, power_up = %power_up))]
    pub fn try_apply_command(&mut self, player: PlayerId, power_up: PowerUp) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.players.contains(player) || !self.power_ups[player].contains(power_up) {
            debug!("Power-up not held");
            return Err(GameError::PowerUpSpent(power_up));
        }

        power_up.execute(self)?;
        self.power_ups[player].take(power_up);
        info!("Power-up applied");
        Ok(())
    }

    /// Mark the current player's clock as run out. Idempotent.
    pub fn set_time_expired(&mut self) {
        if self.time_expired {
            return;
        }
        self.time_expired = true;
        self.expired_player = Some(self.current);
        info!(player = %self.current, "Turn clock expired");
    }

    // === Termination ===

    /// True once time has expired or any player's win condition is met.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.time_expired || self.players.values().any(|p| p.win_condition().is_met())
    }

    /// The winner, if the game is over.
    ///
    /// On time expiry, the seat after the one whose clock ran out. Otherwise
    /// the first seat, in order, whose win condition is met.
    #[must_use]
    pub fn get_winner(&self) -> Option<PlayerId> {
        if self.time_expired {
            let expired = self.expired_player.unwrap_or(self.current);
            return Some(expired.next(self.player_count()));
        }

        self.players
            .iter()
            .find(|(_, p)| p.win_condition().is_met())
            .map(|(id, _)| id)
    }

    /// `Some(result)` once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_game_over() {
            return None;
        }
        Some(self.get_winner().map_or(GameResult::Draw, GameResult::Winner))
    }

    /// Cheap read-only copy for display.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_movie: self.current_movie.clone(),
            current_player: self.current,
            players: self.players.clone(),
            power_ups: self.power_ups.clone(),
            play_history: self.play_history.clone(),
            move_history: self.move_history.clone(),
            rounds_played: self.rounds_played,
            time_expired: self.time_expired,
        }
    }
}

/// Point-in-time view of a game for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub current_movie: Option<Movie>,
    pub current_player: PlayerId,
    pub players: PlayerMap<Player>,
    pub power_ups: PlayerMap<PowerUpSet>,
    pub play_history: Vector<Movie>,
    pub move_history: Vector<Move>,
    pub rounds_played: u32,
    pub time_expired: bool,
}
