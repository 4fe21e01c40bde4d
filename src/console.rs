/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use log::warn;

use crate::{perft, splitperft, Command, Game, GameId, Lobby, Move, Position};

/// An interactive console for playing and inspecting games.
///
/// Commands arrive over a channel, either from [`Console::send_command`] or from a thread reading `stdin`,
/// and are executed one at a time by [`Console::run`].
#[derive(Debug)]
pub struct Console {
    /// The console's own game, used whenever no lobby game is open.
    game: Game,

    /// Every game created through the console.
    lobby: Lobby,

    /// The lobby game that commands currently apply to, if any.
    open: Option<GameId>,

    /// One half of a channel, responsible for sending commands to the console to execute.
    sender: Sender<Command>,

    /// One half of a channel, responsible for receiving commands for the console to execute.
    receiver: Receiver<Command>,
}

impl Console {
    /// Constructs a new [`Console`] instance to be executed with [`Console::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            game: Game::new(),
            lobby: Lobby::new(),
            open: None,
            sender,
            receiver,
        }
    }

    /// Returns a string of the program's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Sends a [`Command`] to the console to be executed.
    pub fn send_command(&self, command: Command) -> Result<()> {
        self.sender
            .send(command)
            .context("Failed to send command to console")
    }

    /// Execute the main event loop for the console.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    /// A failing command prints its error and the loop carries on.
    pub fn run(&mut self) -> Result<()> {
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                warn!("Input handler thread stopping: {err}");
            }
        });

        while let Ok(cmd) = self.receiver.recv() {
            if cmd == Command::Exit {
                break;
            }

            if let Err(err) = self.execute(cmd) {
                eprintln!("Error: {err:#}");
            }
        }

        Ok(())
    }

    /// Executes a single [`Command`], printing its results.
    pub fn execute(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Display => println!("{}", self.current()?),

            Command::Moves { square, sort } => self.moves(square, sort)?,

            Command::Move {
                from,
                to,
                promotion,
            } => {
                let mv = Move::with_promotion(from, to, promotion);

                let status = match self.open {
                    Some(id) => self.lobby.make_move(id, mv)?,
                    None => {
                        self.game.make_move(mv)?;
                        self.game.status()
                    }
                };

                println!("{mv}: {status}");
            }

            Command::Status => {
                let game = self.current()?;
                println!("{} to move: {}", game.side_to_move(), game.status());
            }

            Command::New => {
                self.game = Game::new();
                self.open = None;
            }

            Command::Perft { depth } => {
                let game = *self.current()?;
                let now = Instant::now();
                let nodes = perft(&game, depth);
                let elapsed = now.elapsed();

                let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
                println!("{nodes} nodes in {elapsed:.1?} ({nps:.0} nps)");
            }

            Command::Splitperft { depth } => {
                let game = *self.current()?;
                let split = splitperft(&game, depth);

                for (mv, nodes) in &split {
                    println!("{mv}\t{nodes}");
                }

                let total = split.iter().map(|(_, nodes)| nodes).sum::<u64>();
                println!("\n{total}");
            }

            Command::Games => {
                let games = self.lobby.list_games();
                if games.is_empty() {
                    println!("(none)");
                }

                for record in games {
                    let marker = if Some(record.id) == self.open { '*' } else { ' ' };
                    println!("{marker}{record}");
                }
            }

            Command::Create { name } => {
                let id = self.lobby.create_game(&name.join(" "))?;
                self.open = Some(id);
                println!("Created game {id}");
            }

            Command::Join { id, color, player } => {
                self.lobby.join_game(id, color, &player)?;
                println!("{player} is playing {color} in game {id}");
            }

            Command::Open { id } => {
                let record = self.lobby.game(id)?;
                println!("Opened game {id} ({})", record.name);
                self.open = Some(id);
            }

            // Handled by `run`, but harmless if executed directly
            Command::Exit => {}
        }

        Ok(())
    }

    /// The game that commands currently apply to.
    fn current(&self) -> Result<&Game> {
        match self.open {
            Some(id) => Ok(&self.lobby.game(id)?.game),
            None => Ok(&self.game),
        }
    }

    /// Prints the legal moves of the piece on `square`, or of the whole side to move.
    fn moves(&self, square: Option<Position>, sort: bool) -> Result<()> {
        let game = self.current()?;

        let mut moves = match square {
            Some(square) => match game.valid_moves(square) {
                Some(moves) => moves.to_vec(),
                None => bail!("There is no piece on {square}"),
            },
            None => game.legal_moves(),
        };

        if sort {
            moves.sort_by_key(|mv| mv.to_string());
        }

        // If there are none, print "(none)"
        let moves_string = if moves.is_empty() {
            String::from("(none)")
        } else {
            moves
                .iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{moves_string}");

        Ok(())
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<Command>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line from stdin")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(Command::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Console received input of 0 bytes and is quitting");
        }

        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match buf.parse::<Command>() {
            Ok(cmd) => sender.send(cmd).context("Failed to send command to console")?,

            // Help output is reported as an error by clap, but is still meant for the user
            Err(err) => {
                if !err.use_stderr() {
                    println!("{err}");
                } else {
                    warn!("Could not parse {buf:?}");
                    eprintln!("{err}");
                }
            }
        }
    }
}
