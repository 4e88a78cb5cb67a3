/// A command name followed by its arguments, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub arguments: Vec<String>,
}

impl ParsedCommand {
    pub fn new(name: impl Into<String>, arguments: Vec<String>) -> Self {
        ParsedCommand {
            name: name.into(),
            arguments,
        }
    }
}

/// Splits a line on runs of ASCII whitespace. The first token is the
/// command name; quotes, backslashes and non-ASCII spaces have no special
/// meaning.
///
/// Returns `None` for empty or whitespace-only input.
pub fn parse(line: &str) -> Option<ParsedCommand> {
    let mut tokens = line.split_ascii_whitespace().map(str::to_owned);
    let name = tokens.next()?;
    Some(ParsedCommand {
        name,
        arguments: tokens.collect(),
    })
}
