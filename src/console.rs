//! Terminal Front End
//!
//! Line-oriented [`Participant`] over any reader and writer, plus the main
//! menu loop. Rendering is kept in free functions so it can be checked
//! without a terminal.
//!
//! End of input at any prompt counts as `x`. An I/O failure also ends the
//! round; it is reported by [`Console::run`] once the round unwinds. A draw
//! that fails verification voids its round and returns to the menu.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::game::dice::DiceSet;
use crate::game::events::RoundEvent;
use crate::game::input::{self, MenuChoice, Prompt};
use crate::game::probability::{probability_matrix, ProbabilityMatrix};
use crate::game::round::{
    play_round, Dealer, Decision, GameError, Participant, RoundOutcome, RoundReport,
    FIRST_MOVE_RANGE, ROLL_RANGE,
};
use crate::game::state::{Outcome, Party, SelectionError};
use crate::proof::transcript::DrawPurpose;
use crate::proof::verify::{FairnessViolation, Publication, Reveal};

/// Front-end errors.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Terminal read or write failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Round aborted.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Transcript could not be rendered.
    #[error("transcript encoding failed: {0}")]
    Transcript(#[from] serde_json::Error),
}

/// Interactive session over one dice set.
pub struct Console<'a, R, W> {
    dice: &'a DiceSet,
    labels: Vec<String>,
    matrix: ProbabilityMatrix,
    input: R,
    output: W,
    show_transcript: bool,
    failure: Option<io::Error>,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    /// New session. The probability table is computed once here.
    pub fn new(dice: &'a DiceSet, input: R, output: W) -> Self {
        Self {
            dice,
            labels: dice.configurations(),
            matrix: probability_matrix(dice),
            input,
            output,
            show_transcript: false,
            failure: None,
        }
    }

    /// Print each round's transcript as JSON after the result.
    pub fn with_transcript(mut self, show: bool) -> Self {
        self.show_transcript = show;
        self
    }

    /// Consume the session, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Main menu loop. Returns when the player exits.
    pub fn run<D>(&mut self, dealer: &mut D) -> Result<(), ConsoleError>
    where
        D: Dealer + ?Sized,
    {
        let dice = self.dice;
        loop {
            self.emit("\nMain menu:\n1 - start game\n2 - help\nx - exit\n");
            match self.ask("Your selection: ", input::parse_menu) {
                Decision::Quit => break,
                Decision::Proceed(MenuChoice::StartGame) => {}
            }

            let outcome = play_round(dice, dealer, self);
            self.take_failure()?;

            let report = match outcome {
                Ok(RoundOutcome::Completed(report)) => report,
                Ok(RoundOutcome::Quit) => break,
                // A void round goes back to the menu; the session continues.
                Err(GameError::Fairness { purpose, violation }) => {
                    self.emit(&render_violation(purpose, &violation));
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            self.emit(&render_outcome(&report));
            if self.show_transcript {
                let json = report.transcript.to_json()?;
                self.emit(&format!("\nRound transcript:\n{json}\n"));
            }
        }

        self.emit("\nGoodbye.\n");
        self.take_failure()
    }

    fn take_failure(&mut self) -> Result<(), ConsoleError> {
        match self.failure.take() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }

    /// Write text. The first failure is kept and later writes are dropped.
    fn emit(&mut self, text: &str) {
        if self.failure.is_some() {
            return;
        }
        if let Err(error) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
        {
            self.failure = Some(error);
        }
    }

    /// One line of input, or `None` on end of input or failure.
    fn read_line(&mut self) -> Option<String> {
        if self.failure.is_some() {
            return None;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                debug!("end of input");
                None
            }
            Ok(_) => Some(line),
            Err(error) => {
                self.failure = Some(error);
                None
            }
        }
    }

    /// Prompt until the line parses to an answer or the player exits.
    fn ask<T>(&mut self, question: &str, parse: impl Fn(&str) -> Prompt<T>) -> Decision<T> {
        loop {
            self.emit(question);
            let Some(line) = self.read_line() else {
                return Decision::Quit;
            };
            match parse(&line) {
                Prompt::Accepted(value) => return Decision::Proceed(value),
                Prompt::Exit => return Decision::Quit,
                Prompt::Help => {
                    let table = render_help_table(&self.labels, &self.matrix);
                    self.emit(&table);
                }
                Prompt::Invalid => self.emit("Invalid input, try again.\n"),
            }
        }
    }
}

impl<R: BufRead, W: Write> Participant for Console<'_, R, W> {
    fn observe(&mut self, event: &RoundEvent) {
        let text = match event {
            RoundEvent::FirstMoveCommitted { publication } => format!(
                "Let's determine who makes the first move.\n{}",
                render_publication(FIRST_MOVE_RANGE, publication)
            ),
            RoundEvent::FirstMoveRevealed {
                reveal,
                guess,
                first,
            } => {
                let verdict = if reveal.value() == i64::from(*guess) {
                    "You guessed right"
                } else {
                    "You guessed wrong"
                };
                let mover = match first {
                    Party::User => "you make",
                    Party::System => "I make",
                };
                format!(
                    "{}{verdict}, {mover} the first move.\n",
                    render_reveal("My selection", reveal)
                )
            }
            RoundEvent::DieChosen { party, index } => {
                let label = self.labels.get(*index).map(String::as_str).unwrap_or("?");
                match party {
                    Party::User => format!("You chose the [{label}] die.\n"),
                    Party::System => format!("I chose the [{label}] die.\n"),
                }
            }
            RoundEvent::SelectionRejected { error, .. } => render_rejection(&self.labels, error),
            RoundEvent::RollCommitted { party, publication } => format!(
                "It's time for {} roll.\n{}",
                possessive(*party),
                render_publication(ROLL_RANGE, publication)
            ),
            RoundEvent::RollRevealed {
                party,
                reveal,
                face,
            } => {
                let whose = match party {
                    Party::User => "Your",
                    Party::System => "My",
                };
                format!(
                    "{}{whose} roll result is {face}.\n",
                    render_reveal("My number", reveal)
                )
            }
        };
        self.emit(&text);
    }

    fn guess_first_move(&mut self, _publication: &Publication) -> Decision<u8> {
        self.ask(
            "Try to guess my selection (0 or 1, ? - help, x - exit): ",
            input::parse_guess,
        )
    }

    fn choose_die(&mut self, dice: &DiceSet, available: &[usize]) -> Decision<usize> {
        let listing = render_dice_list(&self.labels, available);
        self.emit(&format!("Choose your die:\n{listing}? - help\nx - exit\n"));
        let count = dice.len();
        self.ask("Your selection: ", |line| input::parse_die_choice(line, count))
    }

    fn acknowledge_roll(&mut self, _party: Party, _publication: &Publication) -> Decision<()> {
        self.ask("Press Enter to see the result (? - help, x - exit): ", input::parse_acknowledge)
    }
}

fn possessive(party: Party) -> &'static str {
    match party {
        Party::User => "your",
        Party::System => "my",
    }
}

/// Commitment announcement.
pub fn render_publication(range: (i64, i64), publication: &Publication) -> String {
    let (range_start, range_end) = range;
    format!(
        "I selected a random value in the range {range_start}..{range_end} ({}={}).\n",
        publication.scheme.as_str().to_ascii_uppercase(),
        publication.commitment
    )
}

/// Revealed value with everything needed to check it by hand.
pub fn render_reveal(lead: &str, reveal: &Reveal) -> String {
    match reveal {
        Reveal::Hmac { value, key } => {
            format!("{lead}: {value} (KEY={}).\n", hex::encode_upper(key))
        }
        Reveal::Hash { value, nonce, key } => format!(
            "{lead}: {value} (NONCE={}, KEY={}).\n",
            hex::encode_upper(nonce),
            hex::encode_upper(key)
        ),
    }
}

/// Selectable dice, numbered from 1 by their position in the full set.
pub fn render_dice_list(labels: &[String], available: &[usize]) -> String {
    let mut out = String::new();
    for &index in available {
        if let Some(label) = labels.get(index) {
            let _ = writeln!(out, "{} - {label}", index + 1);
        }
    }
    out
}

/// Probability that the row die beats the column die.
pub fn render_help_table(labels: &[String], matrix: &ProbabilityMatrix) -> String {
    const CORNER: &str = "User dice v";
    let width = labels
        .iter()
        .map(String::len)
        .chain([CORNER.len(), "- (0.3333)".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::from("Probability of the win for the user:\n");
    let _ = write!(out, "{CORNER:<width$}");
    for label in labels {
        let _ = write!(out, " | {label:<width$}");
    }
    out.push('\n');
    out.push_str(&"-".repeat((width + 3) * (labels.len() + 1)));
    out.push('\n');

    for (row, label) in labels.iter().enumerate() {
        let _ = write!(out, "{label:<width$}");
        for column in 0..labels.len() {
            let cell = match matrix.get(row, column) {
                Some(p) if matrix.is_convention(row, column) => format!("- ({p})"),
                Some(p) => p.to_string(),
                None => String::new(),
            };
            let _ = write!(out, " | {cell:<width$}");
        }
        out.push('\n');
    }
    out
}

/// Refused die choice, numbered the way the player typed it.
pub fn render_rejection(labels: &[String], error: &SelectionError) -> String {
    let reason = match *error {
        SelectionError::OutOfRange { index, max } => {
            format!("there is no die {}; choose between 1 and {}", index + 1, max + 1)
        }
        SelectionError::AlreadyClaimed { index, owner } => {
            let label = labels.get(index).map(String::as_str).unwrap_or("?");
            let holder = match owner {
                Party::User => "you",
                Party::System => "me",
            };
            format!("die {} [{label}] is already taken by {holder}", index + 1)
        }
        SelectionError::AlreadyChosen { .. } => "you have already chosen a die".to_string(),
    };
    format!("That die cannot be chosen: {reason}.\n")
}

/// Warning for a draw whose reveal did not verify.
pub fn render_violation(purpose: DrawPurpose, violation: &FairnessViolation) -> String {
    let draw = match purpose {
        DrawPurpose::FirstMove => "first-move",
        DrawPurpose::UserRoll => "user roll",
        DrawPurpose::SystemRoll => "system roll",
    };
    format!(
        "\nWARNING: the {draw} draw did not verify: {violation}.\n\
         This round is void. Returning to the main menu.\n"
    )
}

/// Round result line.
pub fn render_outcome(report: &RoundReport) -> String {
    let (user, system) = (report.user_face, report.system_face);
    match report.outcome {
        Outcome::UserWins => format!("You win ({user} > {system})!\n"),
        Outcome::SystemWins => format!("I win ({system} > {user})!\n"),
        Outcome::Tie => format!("It's a tie ({user} = {system}).\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::RangeError;
    use crate::proof::mac::MacCommitment;
    use crate::proof::transcript::RoundTranscript;
    use crate::proof::verify::{Scheme, SealedDraw};
    use std::collections::VecDeque;
    use std::io::Cursor;

    struct FixedDealer {
        values: VecDeque<i64>,
        pick: usize,
    }

    impl Dealer for FixedDealer {
        fn draw(&mut self, _start: i64, _end: i64) -> Result<SealedDraw, RangeError> {
            let value = self.values.pop_front().unwrap();
            Ok(SealedDraw::Hmac(MacCommitment::seal(value, [0xAB; 32])))
        }

        fn pick_die(&mut self, _available: &[usize]) -> Option<usize> {
            Some(self.pick)
        }
    }

    fn dice() -> DiceSet {
        DiceSet::parse(["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]).unwrap()
    }

    /// Seals the first-move value 0 but reveals 1.
    struct ForgingDealer;

    impl Dealer for ForgingDealer {
        fn draw(&mut self, _start: i64, _end: i64) -> Result<SealedDraw, RangeError> {
            let mut commitment = MacCommitment::seal(0, [0xCD; 32]);
            commitment.value = 1;
            Ok(SealedDraw::Hmac(commitment))
        }

        fn pick_die(&mut self, available: &[usize]) -> Option<usize> {
            available.first().copied()
        }
    }

    fn session<D: Dealer>(
        dice: &DiceSet,
        script: &str,
        dealer: &mut D,
    ) -> (String, Result<(), ConsoleError>) {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut console = Console::new(dice, input, Vec::new());
        let result = console.run(dealer);
        let output = String::from_utf8(console.into_output()).unwrap();
        (output, result)
    }

    #[test]
    fn test_full_round_system_wins() {
        let dice = dice();
        let mut dealer = FixedDealer {
            values: VecDeque::from([0, 2, 0]),
            pick: 1,
        };
        let (output, result) = session(&dice, "1\n0\n1\n\n\nx\n", &mut dealer);
        assert!(result.is_ok());
        assert!(output.contains("You guessed right, you make the first move."));
        assert!(output.contains("You chose the [2,2,4,4,9,9] die."));
        assert!(output.contains("I chose the [6,8,1,1,8,6] die."));
        assert!(output.contains(&format!("KEY={}", "AB".repeat(32))));
        assert!(output.contains("Your roll result is 4."));
        assert!(output.contains("My roll result is 6."));
        assert!(output.contains("I win (6 > 4)!"));
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_system_first_lists_remaining_dice() {
        let dice = dice();
        let mut dealer = FixedDealer {
            values: VecDeque::from([1, 4, 3]),
            pick: 1,
        };
        // Guess wrong, ack system roll, try the taken die, then take die 3.
        let (output, result) = session(&dice, "1\n0\n\n2\n3\n\n", &mut dealer);
        assert!(result.is_ok());
        assert!(output.contains("I make the first move."));
        assert!(output.contains("1 - 2,2,4,4,9,9\n3 - 7,5,3,7,5,3\n"));
        assert!(!output.contains("2 - 6,8,1,1,8,6"));
        assert!(output.contains(
            "That die cannot be chosen: die 2 [6,8,1,1,8,6] is already taken by me."
        ));
        assert!(output.contains("I win (8 > 7)!"));
    }

    #[test]
    fn test_failed_reveal_voids_round_only() {
        let dice = dice();
        let (output, result) = session(&dice, "1\n0\n2\nx\n", &mut ForgingDealer);
        assert!(result.is_ok());

        let warning = output.find("WARNING: the first-move draw did not verify").unwrap();
        assert!(output[warning..].contains("This round is void."));
        // Menu comes back and still answers.
        assert!(output[warning..].contains("Main menu:"));
        assert!(output[warning..].contains("Probability of the win for the user:"));
        assert!(!output.contains("You guessed"));
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_rejection_uses_typed_numbers() {
        let labels = dice().configurations();
        assert_eq!(
            render_rejection(&labels, &SelectionError::OutOfRange { index: 3, max: 2 }),
            "That die cannot be chosen: there is no die 4; choose between 1 and 3.\n"
        );
        assert_eq!(
            render_rejection(
                &labels,
                &SelectionError::AlreadyClaimed {
                    index: 0,
                    owner: Party::System
                }
            ),
            "That die cannot be chosen: die 1 [2,2,4,4,9,9] is already taken by me.\n"
        );
    }

    #[test]
    fn test_help_and_invalid_reprompt() {
        let dice = dice();
        let mut dealer = FixedDealer {
            values: VecDeque::new(),
            pick: 0,
        };
        let (output, result) = session(&dice, "?\n9\nx\n", &mut dealer);
        assert!(result.is_ok());
        assert!(output.contains("Probability of the win for the user:"));
        assert!(output.contains("- (0.3333)"));
        assert!(output.contains("Invalid input, try again."));
    }

    #[test]
    fn test_end_of_input_quits_round() {
        let dice = dice();
        let mut dealer = FixedDealer {
            values: VecDeque::from([0]),
            pick: 0,
        };
        let (output, result) = session(&dice, "1\n", &mut dealer);
        assert!(result.is_ok());
        assert!(output.contains("Try to guess my selection"));
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_transcript_printed() {
        let dice = dice();
        let mut dealer = FixedDealer {
            values: VecDeque::from([0, 2, 0]),
            pick: 1,
        };
        let input = Cursor::new(b"1\n0\n1\n\n\n".to_vec());
        let mut console = Console::new(&dice, input, Vec::new()).with_transcript(true);
        console.run(&mut dealer).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();

        let start = output.find("Round transcript:\n").unwrap() + "Round transcript:\n".len();
        let json = output[start..].split("\n\nMain menu").next().unwrap();
        let transcript = RoundTranscript::from_json(json).unwrap();
        assert_eq!(transcript.entries.len(), 3);
        assert!(transcript.verify().is_ok());
    }

    #[test]
    fn test_help_table_layout() {
        let dice = dice();
        let labels = dice.configurations();
        let table = render_help_table(&labels, &probability_matrix(&dice));
        let rows: Vec<&str> = table.lines().collect();
        // Title, header, rule, one row per die.
        assert_eq!(rows.len(), 3 + labels.len());
        assert!(rows[1].contains("6,8,1,1,8,6"));
        assert_eq!(rows[3].matches("- (0.3333)").count(), 1);
        assert!(rows[3].starts_with("2,2,4,4,9,9"));
    }

    #[test]
    fn test_render_hash_reveal_includes_nonce() {
        let reveal = Reveal::Hash {
            value: 3,
            nonce: [0x01; 32],
            key: [0x02; 32],
        };
        let text = render_reveal("My number", &reveal);
        assert!(text.starts_with("My number: 3 (NONCE=0101"));
        assert!(text.contains(&format!("KEY={}", "02".repeat(32))));
    }

    #[test]
    fn test_render_publication() {
        let publication = Publication {
            scheme: Scheme::Hmac,
            commitment: "ab".repeat(32),
        };
        assert_eq!(
            render_publication((0, 1), &publication),
            format!("I selected a random value in the range 0..1 (HMAC={}).\n", "ab".repeat(32))
        );
    }
}
