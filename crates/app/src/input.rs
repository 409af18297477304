use lidwoord_core::model::Article;

/// What a line typed at the drill prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Answer(Article),
    /// Start over with every word.
    RestartAll,
    /// Drill the words missed in the finished session.
    RetryWrong,
    /// Show the rules of thumb for de and het.
    Rules,
    Help,
    Quit,
}

// Arrow keys arrive as ANSI escape sequences when the terminal is in line mode.
const ARROW_LEFT: &str = "\u{1b}[D";
const ARROW_RIGHT: &str = "\u{1b}[C";

/// Map one input line to a command. Case and surrounding whitespace are ignored.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    match trimmed {
        ARROW_LEFT => return Some(Command::Answer(Article::De)),
        ARROW_RIGHT => return Some(Command::Answer(Article::Het)),
        _ => {}
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "1" | "d" | "de" => Some(Command::Answer(Article::De)),
        "2" | "h" | "het" => Some(Command::Answer(Article::Het)),
        "a" | "r" | "reset" | "alles" => Some(Command::RestartAll),
        "f" | "w" | "fouten" => Some(Command::RetryWrong),
        "g" | "regels" => Some(Command::Rules),
        "?" | "help" | "hulp" => Some(Command::Help),
        "q" | "quit" | "stop" => Some(Command::Quit),
        _ => None,
    }
}

/// Whether a confirmation answer means yes (`j`/`ja`/`y`/`yes`).
pub fn is_yes(line: &str) -> bool {
    matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "j" | "ja" | "y" | "yes"
    )
}
