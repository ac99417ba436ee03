/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Plain text, blank included. Goes through [`crate::view::HeroView::submit`].
    Search(String),
    Open(usize),
    Close,
    Role(Option<String>),
    All,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
<keyword>     search heroes, blank lists everything
:open <n>     show hero n
:close        close the hero view
:role [name]  only show one role, no name clears it
:all          browse all heroes
:quit         exit";

impl Command {
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Command::Search(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let mut parts = rest.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match (name, argument) {
            ("open", Some(n)) => n
                .parse()
                .map(Command::Open)
                .unwrap_or_else(|_| Command::Unknown(line.trim().to_string())),
            ("close", None) => Command::Close,
            ("role", role) => Command::Role(role.map(str::to_string)),
            ("all", None) => Command::All,
            ("help", None) => Command::Help,
            ("quit" | "q", None) => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}
