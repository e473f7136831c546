//! Line-oriented hot-seat game over any reader and writer.
//!
//! The terminal is just another front-end for the interaction adapter:
//! `select`/`place` drive the tap controller, `drag` drives the drag
//! controller, and `hold` is a long press.

use anyhow::Result;
use derive_more::{Display, Error};
use std::io::{BufRead, Write};
use std::str::FromStr;
use timeline_core::{
    CardDetails, CardRef, Controller, DragTarget, GameConfig, GameSession, GameState,
    InteractionMode, Intent, Player, PressOutcome, SessionError, TapResponse, format_year,
};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  select N          toggle hand card N (tap mode; also `tap N`)
  place I           put the selected card in slot I (tap mode)
  drag N slot I     drag hand card N to slot I (drag mode)
  drag N hand M     drag hand card N onto hand position M (drag mode)
  hold hand N       show details of hand card N
  hold timeline N   show details of timeline card N
  move A B          move hand card A to position B
  mode tap|drag     switch interaction mode
  show              redraw the table
  restart           deal again with the same settings
  help              show this help
  quit              leave the game";

/// A parsed terminal command.
///
/// Hand and timeline card numbers are 1-based as printed; slots are
/// 0-based as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Toggle selection of a hand card.
    Select(usize),
    /// Tap an insertion slot.
    Place(usize),
    /// Drag a hand card to a timeline slot.
    DragToSlot {
        /// Hand card number.
        card: usize,
        /// Slot number.
        slot: usize,
    },
    /// Drag a hand card onto another hand position.
    DragToHand {
        /// Hand card number.
        card: usize,
        /// Target hand position.
        position: usize,
    },
    /// Long-press a card.
    Hold(CardRef),
    /// Reorder the hand.
    Move {
        /// Hand card number.
        from: usize,
        /// Target hand position.
        to: usize,
    },
    /// Switch interaction mode.
    Mode(InteractionMode),
    /// Redraw.
    Show,
    /// Print the command list.
    Help,
    /// Deal again.
    Restart,
    /// Leave.
    Quit,
}

/// Error parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct CommandError {
    /// What was wrong with the input.
    pub message: String,
}

impl CommandError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn number(word: Option<&str>) -> Result<usize, CommandError> {
    let word = word.ok_or_else(|| CommandError::new("Missing number"))?;
    word.parse()
        .map_err(|_| CommandError::new(format!("Not a number: {word}")))
}

/// Converts a printed 1-based card number to an index.
fn card_index(word: Option<&str>) -> Result<usize, CommandError> {
    number(word)?
        .checked_sub(1)
        .ok_or_else(|| CommandError::new("Cards are numbered from 1"))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| CommandError::new("Empty command"))?
            .to_ascii_lowercase();

        let command = match verb.as_str() {
            "select" | "tap" => Command::Select(card_index(words.next())?),
            "place" => Command::Place(number(words.next())?),
            "drag" => {
                let card = card_index(words.next())?;
                match words.next() {
                    Some("slot") => Command::DragToSlot {
                        card,
                        slot: number(words.next())?,
                    },
                    Some("hand") => Command::DragToHand {
                        card,
                        position: card_index(words.next())?,
                    },
                    _ => return Err(CommandError::new("Usage: drag N slot I | drag N hand M")),
                }
            }
            "hold" => match words.next() {
                Some("hand") => Command::Hold(CardRef::Hand(card_index(words.next())?)),
                Some("timeline") => Command::Hold(CardRef::Timeline(card_index(words.next())?)),
                _ => return Err(CommandError::new("Usage: hold hand N | hold timeline N")),
            },
            "move" => Command::Move {
                from: card_index(words.next())?,
                to: card_index(words.next())?,
            },
            "mode" => {
                let word = words
                    .next()
                    .ok_or_else(|| CommandError::new("Usage: mode tap|drag"))?;
                Command::Mode(
                    word.parse()
                        .map_err(|_| CommandError::new(format!("Unknown mode: {word}")))?,
                )
            }
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "restart" => Command::Restart,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::new(format!("Unknown command: {other}"))),
        };
        Ok(command)
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive game loop.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    session: GameSession,
    config: GameConfig,
    controller: Controller,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a terminal over a loaded session.
    pub fn new(
        input: R,
        output: W,
        session: GameSession,
        config: GameConfig,
        mode: InteractionMode,
    ) -> Self {
        Self {
            input,
            output,
            session,
            config,
            controller: Controller::for_mode(mode),
        }
    }

    /// Deals a game and reads commands until `quit` or end of input.
    #[instrument(skip(self), fields(mode = %self.controller.mode()))]
    pub fn run(&mut self) -> Result<()> {
        self.session.start(self.config.clone())?;
        info!("Terminal game started");
        writeln!(self.output, "Welcome to Timeline! Type `help` for commands.")?;
        self.skip_empty_hands()?;
        self.render()?;

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match line.trim().parse::<Command>() {
                Ok(command) => {
                    if let Flow::Quit = self.handle(command)? {
                        break;
                    }
                }
                Err(error) => writeln!(self.output, "{error}. Type `help` for commands.")?,
            }
        }
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Returns the session, for inspection after `run`.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Consumes the terminal and returns its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn state(&self) -> Result<&GameState> {
        Ok(self.session.state().ok_or(SessionError::NotStarted)?)
    }

    #[instrument(skip(self))]
    fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Show => self.render()?,
            Command::Restart => {
                self.controller.reset();
                self.session.restart()?;
                writeln!(self.output, "New game dealt.")?;
                self.skip_empty_hands()?;
                self.render()?;
            }
            Command::Mode(mode) => {
                self.controller = Controller::for_mode(mode);
                writeln!(self.output, "Interaction mode: {mode}")?;
            }
            Command::Hold(card) => self.hold(card)?,
            _ if self.state()?.is_over() => {
                writeln!(self.output, "The game is over. Type `restart` or `quit`.")?;
            }
            Command::Move { from, to } => self.commit(Intent::Reorder { from, to })?,
            Command::Select(card) => self.tap(CardRef::Hand(card))?,
            Command::Place(slot) => self.tap(CardRef::Target(slot))?,
            Command::DragToSlot { card, slot } => {
                let len = self.state()?.timeline().len();
                let target = match slot {
                    0 => Some(DragTarget::StartEdge),
                    s if s == len => Some(DragTarget::EndEdge),
                    s if s > len => None,
                    s => Some(DragTarget::TimelineCard {
                        index: s,
                        pointer_x: 0.0,
                        card_center_x: 1.0,
                    }),
                };
                self.drag(card, target)?;
            }
            Command::DragToHand { card, position } => {
                self.drag(card, Some(DragTarget::HandSlot(position)))?
            }
        }
        Ok(Flow::Continue)
    }

    fn tap(&mut self, card: CardRef) -> Result<()> {
        let state = self.state()?.clone();
        let Controller::Tap(tap) = &mut self.controller else {
            writeln!(self.output, "`select` and `place` need tap mode (`mode tap`).")?;
            return Ok(());
        };

        match tap.handle_press(&state, card, PressOutcome::Tap) {
            TapResponse::Selected(_) => {
                let name = tap
                    .selected_card(&state)
                    .map(|e| e.display_name.clone())
                    .unwrap_or_default();
                writeln!(self.output, "Selected \"{name}\". Choose a slot with `place I`.")?;
                self.render_slots(&state)?;
            }
            TapResponse::Deselected => writeln!(self.output, "Selection cleared.")?,
            TapResponse::Commit(intent) => self.commit(intent)?,
            TapResponse::ShowDetails(details) => self.print_details(&details)?,
            TapResponse::Ignored => match card {
                CardRef::Target(_) if tap.selected_card(&state).is_none() => {
                    writeln!(self.output, "Select a card first with `select N`.")?
                }
                _ => writeln!(self.output, "Nothing there.")?,
            },
        }
        Ok(())
    }

    fn drag(&mut self, card: usize, target: Option<DragTarget>) -> Result<()> {
        let state = self.state()?.clone();
        let Controller::Drag(drag) = &mut self.controller else {
            writeln!(self.output, "`drag` needs drag mode (`mode drag`).")?;
            return Ok(());
        };

        if !drag.start(&state, card) {
            writeln!(self.output, "No card {} in your hand.", card + 1)?;
            return Ok(());
        }
        drag.over(&state, target);
        match drag.end(&state, target) {
            Some(intent) => self.commit(intent)?,
            None => writeln!(self.output, "Card returned to your hand.")?,
        }
        Ok(())
    }

    fn hold(&mut self, card: CardRef) -> Result<()> {
        let state = self.state()?.clone();
        let details = match &mut self.controller {
            Controller::Tap(tap) => match tap.handle_press(&state, card, PressOutcome::LongPress) {
                TapResponse::ShowDetails(details) => Some(details),
                _ => None,
            },
            Controller::Drag(_) => CardDetails::lookup(&state, card),
        };
        match details {
            Some(details) => self.print_details(&details)?,
            None => writeln!(self.output, "Nothing there.")?,
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn commit(&mut self, intent: Intent) -> Result<()> {
        let seat = self.state()?.current_player_index();

        match self.session.apply(&intent) {
            Ok(Some(result)) => {
                writeln!(self.output, "{result}")?;
                if let Some(revealed) = self.session.revealing_card().cloned() {
                    writeln!(
                        self.output,
                        "  \"{}\" happened in {}.",
                        revealed.display_name,
                        format_year(revealed.year)
                    )?;
                    self.session.clear_reveal();
                }
                let state = self.state()?;
                if !state.is_over()
                    && let Some(player) = emptied_hand(state, seat)
                {
                    let name = player.name.clone();
                    writeln!(self.output, "{name} has emptied their hand! The round plays out.")?;
                }
            }
            Ok(None) => writeln!(self.output, "Hand reordered.")?,
            Err(SessionError::Place(error)) => {
                warn!(%error, "Rejected intent");
                writeln!(self.output, "Not allowed: {error}")?;
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        }

        if intent.ends_turn() {
            self.skip_empty_hands()?;
            self.render()?;
        }
        Ok(())
    }

    /// Passes for seats with nothing to play, at most one lap.
    fn skip_empty_hands(&mut self) -> Result<()> {
        let seats = self.state()?.players().len();
        for _ in 0..seats {
            let state = self.state()?;
            if state.is_over() {
                return Ok(());
            }
            let Some(player) = state.current_player() else {
                return Ok(());
            };
            if !player.hand.is_empty() {
                return Ok(());
            }
            let name = player.name.clone();
            self.session.pass()?;
            writeln!(self.output, "{name} has no cards and passes.")?;
        }
        let state = self.state()?;
        if !state.is_over() && state.players().iter().all(|p| p.hand.is_empty()) {
            writeln!(self.output, "No player has cards left. Type `restart` or `quit`.")?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        let name = self
            .session
            .state()
            .and_then(|s| s.current_player())
            .map(|p| p.name.clone())
            .unwrap_or_default();
        write!(self.output, "{name}> ")?;
        self.output.flush()?;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let state = self.state()?.clone();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Round {}, turn {}. Deck: {} cards.",
            state.round_number(),
            state.turn_number(),
            state.deck().len()
        )?;

        writeln!(self.output, "Timeline:")?;
        for (i, event) in state.timeline().iter().enumerate() {
            writeln!(
                self.output,
                "  {}. {} ({})",
                i + 1,
                event.display_name,
                format_year(event.year)
            )?;
        }

        if state.is_over() {
            writeln!(self.output, "Game over!")?;
            for (place, winner) in state.standings().iter().enumerate() {
                writeln!(
                    self.output,
                    "  {}. {} (turn {})",
                    place + 1,
                    winner.name,
                    winner.win_turn.unwrap_or(0)
                )?;
            }
            return Ok(());
        }

        if let Some(player) = state.current_player() {
            writeln!(self.output, "{}'s hand:", player.name)?;
            for (i, event) in player.hand.iter().enumerate() {
                writeln!(self.output, "  {}. {}", i + 1, event.display_name)?;
            }
        }
        Ok(())
    }

    fn render_slots(&mut self, state: &GameState) -> Result<()> {
        let Controller::Tap(tap) = &self.controller else {
            return Ok(());
        };
        let slots = tap.insertion_targets(state);
        for slot in &slots {
            let left = slot.left_event.as_ref().map(|e| format_year(e.year));
            let right = slot.right_event.as_ref().map(|e| format_year(e.year));
            let label = match (left, right) {
                (None, None) => "empty timeline".to_string(),
                (None, Some(r)) => format!("before {r}"),
                (Some(l), None) => format!("after {l}"),
                (Some(l), Some(r)) => format!("between {l} and {r}"),
            };
            writeln!(self.output, "  [{}] {}", slot.index, label)?;
        }
        Ok(())
    }

    fn print_details(&mut self, details: &CardDetails) -> Result<()> {
        let event = &details.event;
        let year = if details.reveal_year {
            format_year(event.year)
        } else {
            "????".to_string()
        };
        writeln!(self.output, "{} ({})", event.display_name, year)?;
        writeln!(self.output, "  {} / {}", event.category.label(), event.difficulty)?;
        if !event.description.is_empty() {
            writeln!(self.output, "  {}", event.description)?;
        }
        Ok(())
    }
}

/// Returns the player at `seat` if their hand is empty and they have won.
fn emptied_hand(state: &GameState, seat: usize) -> Option<&Player> {
    state.players().get(seat).filter(|p| p.has_won)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("select 2".parse::<Command>(), Ok(Command::Select(1)));
        assert_eq!("TAP 1".parse::<Command>(), Ok(Command::Select(0)));
        assert_eq!("place 0".parse::<Command>(), Ok(Command::Place(0)));
        assert_eq!("hold timeline 3".parse::<Command>(), Ok(Command::Hold(CardRef::Timeline(2))));
        assert_eq!("move 1 4".parse::<Command>(), Ok(Command::Move { from: 0, to: 3 }));
        assert_eq!(
            "drag 2 slot 5".parse::<Command>(),
            Ok(Command::DragToSlot { card: 1, slot: 5 })
        );
        assert_eq!(
            "drag 2 hand 1".parse::<Command>(),
            Ok(Command::DragToHand { card: 1, position: 0 })
        );
        assert_eq!("mode drag".parse::<Command>(), Ok(Command::Mode(InteractionMode::Drag)));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!("select".parse::<Command>().is_err());
        assert!("select 0".parse::<Command>().is_err());
        assert!("select two".parse::<Command>().is_err());
        assert!("hold deck 1".parse::<Command>().is_err());
        assert!("mode swipe".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_emptied_hand_checks_the_seat_not_the_name() {
        let pool: Vec<_> = (0..3)
            .map(|i| {
                timeline_core::HistoricalEvent::new(
                    format!("tie-{i}"),
                    format!("Tied {i}"),
                    1500,
                    timeline_core::Category::Cultural,
                    timeline_core::Difficulty::Easy,
                )
            })
            .collect();
        let config = GameConfig::new(2, 1, 1)
            .with_player_names(vec!["Ada".to_string(), "Ada".to_string()]);
        let mut session = GameSession::new(pool, Some(3));
        session.start(config).expect("starts");

        let state = session.state().expect("started");
        let card = state.players()[0].hand[0].id.clone();
        let drop = timeline_core::DropPosition::at(state.timeline(), 0);
        session.place(&card, &drop).expect("placed");
        let state = session.state().expect("started");

        assert!(!state.is_over());
        assert!(emptied_hand(state, 0).is_some());
        assert!(emptied_hand(state, 1).is_none());
    }
}
