//! Player Input Parsing
//!
//! Every prompt line parses into a [`Prompt`]: the caller shows help on
//! `Help`, stops on `Exit`, repeats the prompt on `Invalid`, and proceeds on
//! `Accepted`. Nothing here prints or exits.

/// Outcome of parsing one line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt<T> {
    /// Usable answer.
    Accepted(T),
    /// `?`: show the probability table, then ask again.
    Help,
    /// `x`: leave the game.
    Exit,
    /// Anything else; ask again.
    Invalid,
}

/// Help keyword.
pub const HELP: &str = "?";

/// Exit keyword.
pub const EXIT: &str = "x";

/// Main menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Play a round.
    StartGame,
}

/// Normalize and handle the keywords shared by every prompt.
fn keyword<T>(input: &str) -> Result<String, Prompt<T>> {
    let normalized = input.trim().to_ascii_lowercase();
    match normalized.as_str() {
        HELP => Err(Prompt::Help),
        EXIT => Err(Prompt::Exit),
        _ => Ok(normalized),
    }
}

/// Main menu: `1` start, `2` or `?` help, `x` exit.
pub fn parse_menu(input: &str) -> Prompt<MenuChoice> {
    let normalized = match keyword(input) {
        Ok(normalized) => normalized,
        Err(prompt) => return prompt,
    };
    match normalized.as_str() {
        "1" => Prompt::Accepted(MenuChoice::StartGame),
        "2" => Prompt::Help,
        _ => Prompt::Invalid,
    }
}

/// First-move guess: `0` or `1`.
pub fn parse_guess(input: &str) -> Prompt<u8> {
    let normalized = match keyword(input) {
        Ok(normalized) => normalized,
        Err(prompt) => return prompt,
    };
    match normalized.as_str() {
        "0" => Prompt::Accepted(0),
        "1" => Prompt::Accepted(1),
        _ => Prompt::Invalid,
    }
}

/// Die selection, typed 1-based, returned 0-based.
///
/// Only the shape of the input is checked here. Whether the die is still
/// free is for the round to decide, so a taken die comes back `Accepted`.
pub fn parse_die_choice(input: &str, dice_count: usize) -> Prompt<usize> {
    let normalized = match keyword(input) {
        Ok(normalized) => normalized,
        Err(prompt) => return prompt,
    };
    match normalized.parse::<usize>() {
        Ok(n) if (1..=dice_count).contains(&n) => Prompt::Accepted(n - 1),
        _ => Prompt::Invalid,
    }
}

/// Roll acknowledgement: any line (usually just Enter) except the keywords.
pub fn parse_acknowledge(input: &str) -> Prompt<()> {
    match keyword::<()>(input) {
        Ok(_) => Prompt::Accepted(()),
        Err(prompt) => prompt,
    }
}
