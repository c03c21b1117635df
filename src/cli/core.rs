use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::{
    cli::{
        commands::{self, CommandDefinition, CommandRegistry},
        io as cli_io,
        output::{self, OutputPreferences},
    },
    config::{Config, ConfigManager},
    core::{services::SummaryService, store::Store, utils::PathResolver},
    currency::format_amount,
    errors::LedgerError,
    storage::JsonFileStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("readline failure: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Ledger(inner),
            CommandError::Io(inner) => CliError::Io(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

/// Everything a command handler can reach: records, settings and shell state.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) theme: ColorfulTheme,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) store: Store,
    pub(crate) base_dir: PathBuf,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    pub fn with_base_dir(mode: CliMode, base_dir: PathBuf) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
        });

        let config_manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = config_manager.load()?;
        let backend = JsonFileStore::new(base_dir.clone())?;
        let mut store = Store::load(Box::new(backend), config.storage_key.clone());

        let label = config.currency_label.clone();
        store.subscribe(move |document| {
            let totals = SummaryService::dashboard(document);
            output::info(format!(
                "Saved. Cash received {} | Expenses {} | Net {}",
                format_amount(&label, totals.revenue),
                format_amount(&label, totals.expenses),
                format_amount(&label, totals.net)
            ));
        });

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config,
            config_manager,
            store,
            base_dir,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "fundraising> ".to_string()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn currency(&self) -> &str {
        &self.config.currency_label
    }

    pub(crate) fn backup_dir(&self) -> PathBuf {
        PathResolver::backup_dir_in(&self.base_dir)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(definition) = self.registry.get(command) {
            let handler = definition.handler;
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    /// Destructive commands run only after a yes. Script mode never prompts,
    /// so there the answer has to come from a `--yes` flag.
    pub(crate) fn confirm_destructive(
        &self,
        prompt: &str,
        assume_yes: bool,
    ) -> Result<bool, CommandError> {
        if assume_yes {
            return Ok(true);
        }
        match self.mode {
            CliMode::Script => {
                output::warning("Refusing to continue without confirmation; pass --yes.");
                Ok(false)
            }
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) => {
                output::error(err);
                Ok(())
            }
            CommandError::Io(err) => {
                output::error(format!("I/O failure: {err}"));
                Ok(())
            }
            CommandError::Dialoguer(err) => Err(CliError::Command(err.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base_dir: PathBuf,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::with_base_dir(CliMode::Script, base_dir)?;
    for line in lines {
        match crate::cli::shell::handle_line(&mut context, line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(context)
}
