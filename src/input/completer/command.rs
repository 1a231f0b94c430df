use std::collections::BTreeSet;

use rustyline::completion::Pair;

#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            commands: names.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches_in_order() {
        let completer = CommandCompleter::new(["mv", "mkdir", "ls", "exit"]);
        let displays: Vec<String> = completer
            .complete_command("m")
            .into_iter()
            .map(|p| p.display)
            .collect();
        assert_eq!(displays, vec!["mkdir", "mv"]);
    }

    #[test]
    fn test_empty_prefix_lists_everything() {
        let completer = CommandCompleter::new(["cd", "pwd"]);
        assert_eq!(completer.complete_command("").len(), 2);
        assert!(completer.complete_command("x").is_empty());
    }
}
