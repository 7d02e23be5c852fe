//! Line-oriented interactive session.

use crate::render::render_board;
use anyhow::{Context, Result, bail};
use kwazam_engine::{Game, Move, MoveOutcome, Observer, PieceView, Team};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  board              show the board
  select C R         select the piece on (C,R)
  moves [C R]        list legal moves of the selection or of the piece on (C,R)
  move C R           move the selected piece to (C,R)
  move C R C R       move the piece on the first square to the second
  save NAME          save the game to a slot
  load NAME          load a slot
  reset              start a new game
  json               print the pieces as JSON
  help               show this text
  quit               leave";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Show the board.
    Board,
    /// Select the piece on a square.
    Select(i32, i32),
    /// List legal moves of the selection, or of the piece on a square.
    Moves(Option<(i32, i32)>),
    /// Move the selection.
    MoveSelected(i32, i32),
    /// Move a piece from one square to another.
    Move(i32, i32, i32, i32),
    /// Save to a slot.
    Save(String),
    /// Load a slot.
    Load(String),
    /// Start over.
    Reset,
    /// Dump the pieces as JSON.
    Json,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

impl Input {
    /// Parses one line; blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Ok(None);
        };

        let input = match (verb, args.len()) {
            ("board", 0) => Input::Board,
            ("select", 2) => Input::Select(coordinate(args[0])?, coordinate(args[1])?),
            ("moves", 0) => Input::Moves(None),
            ("moves", 2) => Input::Moves(Some((coordinate(args[0])?, coordinate(args[1])?))),
            ("move", 2) => Input::MoveSelected(coordinate(args[0])?, coordinate(args[1])?),
            ("move", 4) => Input::Move(
                coordinate(args[0])?,
                coordinate(args[1])?,
                coordinate(args[2])?,
                coordinate(args[3])?,
            ),
            ("save", 1) => Input::Save(args[0].to_string()),
            ("load", 1) => Input::Load(args[0].to_string()),
            ("reset", 0) => Input::Reset,
            ("json", 0) => Input::Json,
            ("help", 0) => Input::Help,
            ("quit" | "exit", 0) => Input::Quit,
            _ => bail!("Unrecognized command {:?}, try 'help'", line.trim()),
        };
        Ok(Some(input))
    }
}

fn coordinate(word: &str) -> Result<i32> {
    word.parse()
        .with_context(|| format!("Expected a number, found {:?}", word))
}

/// Events collected by [`TerminalObserver`] between commands.
#[derive(Debug, Default)]
struct Pending {
    redraw: bool,
    winners: Vec<Team>,
}

/// Observer that queues redraws and winner announcements for the session.
struct TerminalObserver(Rc<RefCell<Pending>>);

impl Observer for TerminalObserver {
    fn on_state_changed(&mut self, pieces: &[PieceView]) {
        debug!(pieces = pieces.len(), "Redraw requested");
        self.0.borrow_mut().redraw = true;
    }

    fn on_winner(&mut self, winner: Team) {
        self.0.borrow_mut().winners.push(winner);
    }
}

/// Runs commands from `input` against `game` until `quit` or end of input.
#[instrument(skip_all)]
pub fn run<R, W>(game: &mut Game, input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let pending = Rc::new(RefCell::new(Pending::default()));
    let observer = game.subscribe(Box::new(TerminalObserver(pending.clone())));
    info!("Session started");

    writeln!(out, "{}", render_board(game))?;
    for line in input.lines() {
        let line = line?;
        let command = match Input::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                continue;
            }
        };
        if command == Input::Quit {
            break;
        }

        execute(game, command, out)?;

        let Pending { redraw, winners } = std::mem::take(&mut *pending.borrow_mut());
        for winner in winners {
            writeln!(out, "{winner} captured the Sau and wins!")?;
        }
        if redraw {
            writeln!(out, "{}", render_board(game))?;
        }
    }

    game.unsubscribe(observer);
    info!("Session ended");
    Ok(())
}

/// Executes one command; rule failures are reported to `out`, only I/O
/// failures are returned.
fn execute<W: Write>(game: &mut Game, command: Input, out: &mut W) -> Result<()> {
    match command {
        Input::Board => writeln!(out, "{}", render_board(game))?,
        Input::Select(column, row) => match game.select_piece_at(column, row) {
            Some(_) => writeln!(out, "{}", render_board(game))?,
            None => writeln!(out, "error: no piece on ({column},{row})")?,
        },
        Input::Moves(None) => {
            if game.selected().is_none() {
                writeln!(out, "error: nothing selected")?;
            } else {
                list_moves(&game.legal_moves(), out)?;
            }
        }
        Input::Moves(Some((column, row))) => match game.piece_at(column, row) {
            Some(piece) => list_moves(&game.legal_moves_for(piece.id()), out)?,
            None => writeln!(out, "error: no piece on ({column},{row})")?,
        },
        Input::MoveSelected(column, row) => {
            let result = game.move_selected(column, row);
            report(result, out)?;
        }
        Input::Move(from_column, from_row, column, row) => {
            match game.piece_at(from_column, from_row).map(|piece| piece.id()) {
                Some(id) => report(game.propose_move(id, column, row), out)?,
                None => writeln!(out, "error: no piece on ({from_column},{from_row})")?,
            }
        }
        Input::Save(name) => match game.save(&name) {
            Ok(path) => writeln!(out, "Saved to {}", path.display())?,
            Err(err) => writeln!(out, "error: {err}")?,
        },
        Input::Load(name) => match game.load(&name) {
            Ok(()) => writeln!(out, "Loaded {name}")?,
            Err(err) => writeln!(out, "error: {err}")?,
        },
        Input::Reset => game.reset(),
        Input::Json => writeln!(out, "{}", pieces_json(game)?)?,
        Input::Help => writeln!(out, "{HELP}")?,
        Input::Quit => {}
    }
    Ok(())
}

fn report<W, E>(result: Result<MoveOutcome, E>, out: &mut W) -> Result<()>
where
    W: Write,
    E: std::fmt::Display,
{
    match result {
        Ok(MoveOutcome::Continued {
            alternated: true, ..
        }) => writeln!(out, "Tor and Xor swap roles.")?,
        Ok(_) => {}
        Err(err) => writeln!(out, "error: {err}")?,
    }
    Ok(())
}

fn list_moves<W: Write>(moves: &[Move], out: &mut W) -> Result<()> {
    if moves.is_empty() {
        writeln!(out, "No legal moves")?;
        return Ok(());
    }
    let targets: Vec<String> = moves.iter().map(|mov| mov.destination().to_string()).collect();
    writeln!(out, "{}", targets.join(" "))?;
    Ok(())
}

/// Pieces and side to move as pretty-printed JSON.
pub fn pieces_json(game: &Game) -> Result<String> {
    let value = serde_json::json!({
        "turn": game.turn(),
        "turn_count": game.turn_count(),
        "winner": game.winner(),
        "pieces": game.pieces(),
    });
    serde_json::to_string_pretty(&value).context("Failed to encode pieces")
}
