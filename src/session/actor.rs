//! The session task: one game, one owner, one turn clock.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, instrument};

use super::input::Input;
use crate::core::{GameConfig, GameError, GameSnapshot, GameState, PlayerId};
use crate::movies::{Catalog, Suggester};
use crate::rules::{GameResult, Move, PowerUp};

/// Requests sent into a running session.
#[derive(Debug)]
pub enum SessionCommand {
    /// A line typed by `player`.
    Input { player: PlayerId, text: String },
    /// Ask for a snapshot of the current state.
    Snapshot(oneshot::Sender<GameSnapshot>),
    /// Ask for catalog titles starting with `prefix`.
    Suggest {
        prefix: String,
        reply: oneshot::Sender<Vec<String>>,
    },
    /// End the game now, without a winner.
    Stop,
}

/// Events emitted by a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// `player` is now on the clock.
    TurnStarted { player: PlayerId, round: u32 },
    /// A guess was accepted and applied.
    MovePlayed(Move),
    /// A power-up was spent.
    PowerUpUsed { player: PlayerId, power_up: PowerUp },
    /// An input was refused; the same player is still to act.
    Rejected(GameError),
    /// Final message. The session task exits right after.
    GameEnded(GameResult),
}

#[derive(Clone, Copy, Debug)]
struct SessionSettings {
    command_marker: char,
    turn_time_limit: Option<Duration>,
    suggestion_limit: usize,
}

/// Spawn a session task that owns `state` until the game ends.
///
/// `state` should already hold a starting movie. Returns the command sender,
/// the update receiver, and a handle that yields the final state. Dropping
/// the command sender stops the game like [`SessionCommand::Stop`].
pub fn spawn_session<C>(
    state: GameState<C>,
    config: &GameConfig,
) -> (
    mpsc::UnboundedSender<SessionCommand>,
    mpsc::UnboundedReceiver<SessionUpdate>,
    JoinHandle<GameState<C>>,
)
where
    C: Catalog + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let settings = SessionSettings {
        command_marker: config.command_marker,
        turn_time_limit: config.turn_time_limit,
        suggestion_limit: config.suggestion_limit,
    };

    let handle = tokio::spawn(run_session(state, settings, cmd_rx, update_tx));

    (cmd_tx, update_rx, handle)
}

/// Main session loop.
///
/// The turn deadline is rebuilt whenever the (current seat, round) pair
/// changes, so an old turn's clock can never fire against a newer turn.
#[instrument(skip_all)]
async fn run_session<C: Catalog>(
    mut state: GameState<C>,
    settings: SessionSettings,
    mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
    update_tx: mpsc::UnboundedSender<SessionUpdate>,
) -> GameState<C> {
    let suggester = Suggester::new(state.catalog().titles());
    let mut turn = (state.current_player_id(), state.rounds_played());
    let mut deadline = settings.turn_time_limit.map(|limit| Instant::now() + limit);
    announce_turn(&state, &update_tx);

    loop {
        if let Some(result) = state.result() {
            info!(?result, rounds = state.rounds_played(), "Game over");
            let _ = update_tx.send(SessionUpdate::GameEnded(result));
            break;
        }

        let clock = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(SessionCommand::Input { player, text }) => {
                    let update = handle_input(&mut state, settings.command_marker, player, &text)
                        .unwrap_or_else(|err| {
                            debug!(player = %player, error = %err, "Input rejected");
                            SessionUpdate::Rejected(err)
                        });
                    let _ = update_tx.send(update);
                }
                Some(SessionCommand::Snapshot(reply)) => {
                    let _ = reply.send(state.snapshot());
                }
                Some(SessionCommand::Suggest { prefix, reply }) => {
                    let titles = suggester
                        .suggest(&prefix, settings.suggestion_limit)
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    let _ = reply.send(titles);
                }
                Some(SessionCommand::Stop) | None => {
                    info!(rounds = state.rounds_played(), "Session stopped");
                    let _ = update_tx.send(SessionUpdate::GameEnded(GameResult::Draw));
                    break;
                }
            },
            () = clock => {
                state.set_time_expired();
                continue;
            }
        }

        let now = (state.current_player_id(), state.rounds_played());
        if now != turn && !state.is_game_over() {
            turn = now;
            deadline = settings.turn_time_limit.map(|limit| Instant::now() + limit);
            announce_turn(&state, &update_tx);
        }
    }

    state
}

fn announce_turn<C: Catalog>(state: &GameState<C>, update_tx: &mpsc::UnboundedSender<SessionUpdate>) {
    let player = state.current_player_id();
    let round = state.rounds_played();
    debug!(player = %player, round, "Turn started");
    let _ = update_tx.send(SessionUpdate::TurnStarted { player, round });
}

/// Apply one input line on behalf of `player`.
///
/// An accepted guess ends the turn. A power-up does not; its own effect
/// decides whether the turn moves on.
fn handle_input<C: Catalog>(
    state: &mut GameState<C>,
    marker: char,
    player: PlayerId,
    text: &str,
) -> Result<SessionUpdate, GameError> {
    if player != state.current_player_id() {
        return Err(GameError::NotYourTurn(player));
    }

    match Input::parse(text, marker)? {
        Input::Command(power_up) => {
            state.try_apply_command(player, power_up)?;
            Ok(SessionUpdate::PowerUpUsed { player, power_up })
        }
        Input::Guess(title) => {
            let movie = state
                .catalog()
                .movie_by_title(&title)
                .cloned()
                .ok_or(GameError::UnresolvedTitle(title))?;
            let mv = state.build_move(player, &movie)?;
            state.apply_move(mv.clone());
            state.next_turn();
            Ok(SessionUpdate::MovePlayed(mv))
        }
    }
}
