/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::HashMap, fmt};

use log::info;
use thiserror::Error;

use crate::{Color, Game, GameStatus, Move, MoveError, MoveList, Position};

/// Identifier of a game within a [`Lobby`].
pub type GameId = u32;

/// Largest identifier handed out by [`Lobby::create_game`].
///
/// Ids stay within the non-negative range of a signed 32-bit integer so that clients storing them as such never see a negative id.
pub const MAX_GAME_ID: GameId = i32::MAX as GameId;

/// Reasons a [`Lobby`] operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    /// The request itself was malformed, such as a blank game name.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No game is registered under the provided id.
    #[error("no game with id {0}")]
    NotFound(GameId),

    /// The requested seat already has a player in it.
    #[error("{color} in game {id} is already taken by {player:?}")]
    AlreadyTaken {
        id: GameId,
        color: Color,
        player: String,
    },

    /// The game rejected a move.
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// A game registered in a [`Lobby`], along with its name and the players seated at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: GameId,
    pub name: String,
    pub white: Option<String>,
    pub black: Option<String>,
    pub game: Game,
}

impl GameRecord {
    /// Creates a record for a fresh game with no players seated.
    pub fn new(id: GameId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            white: None,
            black: None,
            game: Game::new(),
        }
    }

    /// The player seated as `color`, if any.
    pub fn player(&self, color: Color) -> Option<&str> {
        match color {
            Color::White => self.white.as_deref(),
            Color::Black => self.black.as_deref(),
        }
    }

    fn seat_mut(&mut self, color: Color) -> &mut Option<String> {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let white = self.white.as_deref().unwrap_or("(open)");
        let black = self.black.as_deref().unwrap_or("(open)");
        write!(f, "{:>10}  {:<20} {white} vs {black}", self.id, self.name)
    }
}

/// Keyed storage of [`GameRecord`]s.
///
/// The [`Lobby`] owns one of these and never assumes anything about how records are kept.
pub trait GameStore {
    /// Fetches the record stored under `id`.
    fn get(&self, id: GameId) -> Option<&GameRecord>;

    /// Fetches the record stored under `id` for modification.
    fn get_mut(&mut self, id: GameId) -> Option<&mut GameRecord>;

    /// Stores `record` under its id, replacing any record already stored there.
    fn put(&mut self, record: GameRecord);

    /// Removes and returns the record stored under `id`.
    fn delete(&mut self, id: GameId) -> Option<GameRecord>;

    /// Removes every record.
    fn clear(&mut self);

    /// All stored records, in no particular order.
    fn records(&self) -> Vec<&GameRecord>;

    /// Returns `true` if a record is stored under `id`.
    fn contains(&self, id: GameId) -> bool {
        self.get(id).is_some()
    }
}

/// A [`GameStore`] that keeps everything in memory, for as long as it lives.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    games: HashMap<GameId, GameRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn get(&self, id: GameId) -> Option<&GameRecord> {
        self.games.get(&id)
    }

    fn get_mut(&mut self, id: GameId) -> Option<&mut GameRecord> {
        self.games.get_mut(&id)
    }

    fn put(&mut self, record: GameRecord) {
        self.games.insert(record.id, record);
    }

    fn delete(&mut self, id: GameId) -> Option<GameRecord> {
        self.games.remove(&id)
    }

    fn clear(&mut self) {
        self.games.clear();
    }

    fn records(&self) -> Vec<&GameRecord> {
        self.games.values().collect()
    }
}

/// A registry of games that players can create, list, join, and play through.
///
/// Players are identified by name only; nothing here verifies who is asking.
#[derive(Debug)]
pub struct Lobby<S: GameStore = MemoryStore> {
    /// Where the games live.
    store: S,

    /// Source of new game ids.
    rng: fastrand::Rng,
}

impl Lobby<MemoryStore> {
    /// Creates an empty [`Lobby`] backed by a [`MemoryStore`].
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl Default for Lobby<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameStore> Lobby<S> {
    /// Creates a [`Lobby`] on top of an existing store.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a [`Lobby`] whose game ids are drawn from a seeded generator, making them reproducible.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self {
            store,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new game called `name` and returns its id.
    ///
    /// # Example
    /// ```
    /// # use referee::{Lobby, LobbyError};
    /// let mut lobby = Lobby::new();
    /// let id = lobby.create_game("friday blitz").unwrap();
    /// assert_eq!(lobby.game(id).unwrap().name, "friday blitz");
    ///
    /// assert!(matches!(lobby.create_game("   "), Err(LobbyError::BadRequest(_))));
    /// ```
    pub fn create_game(&mut self, name: &str) -> Result<GameId, LobbyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LobbyError::BadRequest(String::from("a game needs a name")));
        }

        // Draw until we land on an unused id
        let mut id = self.rng.u32(0..=MAX_GAME_ID);
        while self.store.contains(id) {
            id = self.rng.u32(0..=MAX_GAME_ID);
        }

        self.store.put(GameRecord::new(id, name));
        info!("Created game {id} ({name:?})");

        Ok(id)
    }

    /// Seats `player` as `color` in the game `id`.
    pub fn join_game(&mut self, id: GameId, color: Color, player: &str) -> Result<(), LobbyError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(LobbyError::BadRequest(String::from("a player needs a name")));
        }

        let record = self.store.get_mut(id).ok_or(LobbyError::NotFound(id))?;

        if let Some(seated) = record.player(color) {
            return Err(LobbyError::AlreadyTaken {
                id,
                color,
                player: seated.to_string(),
            });
        }

        *record.seat_mut(color) = Some(player.to_string());
        info!("{player} joined game {id} as {color}");

        Ok(())
    }

    /// Fetches the record of the game `id`.
    pub fn game(&self, id: GameId) -> Result<&GameRecord, LobbyError> {
        self.store.get(id).ok_or(LobbyError::NotFound(id))
    }

    /// All registered games, ordered by id.
    pub fn list_games(&self) -> Vec<&GameRecord> {
        let mut games = self.store.records();
        games.sort_by_key(|record| record.id);
        games
    }

    /// The legal moves of the piece on `position` in the game `id`.
    ///
    /// An empty square yields `None`, exactly as [`Game::valid_moves`] does.
    pub fn valid_moves(&self, id: GameId, position: Position) -> Result<Option<MoveList>, LobbyError> {
        Ok(self.game(id)?.game.valid_moves(position))
    }

    /// Plays `mv` in the game `id`, returning the status of the game afterwards.
    pub fn make_move(&mut self, id: GameId, mv: Move) -> Result<GameStatus, LobbyError> {
        let record = self.store.get_mut(id).ok_or(LobbyError::NotFound(id))?;
        record.game.make_move(mv)?;

        let status = record.game.status();
        if status.is_over() {
            info!("Game {id} ended in {status}");
        }

        Ok(status)
    }

    /// Removes every game.
    pub fn clear(&mut self) {
        self.store.clear();
        info!("Cleared all games");
    }
}
