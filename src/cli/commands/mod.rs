use std::collections::HashMap;

pub mod backup;
pub mod config;
pub mod records;
pub mod report;
pub mod system;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(report::definitions());
    commands.extend(records::definitions());
    commands.extend(backup::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Arguments split into positionals, `--key value` options and bare flags.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: HashMap<&'a str, &'a str>,
    flags: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    /// `valued` lists the options that consume the following token.
    pub fn parse(args: &[&'a str], valued: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            if valued.contains(&arg) {
                let value = iter.next().ok_or_else(|| {
                    CommandError::InvalidArguments(format!("`{arg}` needs a value"))
                })?;
                parsed.options.insert(arg, value);
            } else if arg == "-y" || (arg.starts_with("--") && arg.len() > 2) {
                parsed.flags.push(arg);
            } else {
                parsed.positional.push(arg);
            }
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied()
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| *flag == name)
    }

    pub fn assume_yes(&self) -> bool {
        self.has_flag("--yes") || self.has_flag("-y")
    }

    pub fn reject_unknown_flags(&self, known: &[&str]) -> Result<(), CommandError> {
        match self.flags.iter().find(|flag| !known.contains(flag)) {
            Some(flag) => Err(CommandError::InvalidArguments(format!(
                "unknown option `{flag}`"
            ))),
            None => Ok(()),
        }
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}
