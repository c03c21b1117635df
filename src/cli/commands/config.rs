use crate::cli::commands::{usage_error, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

const CONFIG_USAGE: &str = "config [show | currency <label> | fallback <department>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change organization settings",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show(context),
        ["currency", label] => {
            let label = label.trim();
            if label.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "currency label must not be empty".into(),
                ));
            }
            context.config.currency_label = label.to_string();
            save(context)?;
            output::success(format!("Currency label set to {label}."));
            Ok(())
        }
        ["fallback", department] => {
            let canonical = context
                .config
                .canonical_department(department)
                .map(str::to_string)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "unknown department `{}`",
                        department
                    ))
                })?;
            context.config.fallback_department = canonical.clone();
            save(context)?;
            output::success(format!("CSV imports now default to {canonical}."));
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::raw(format!("  Departments : {}", config.departments.join(", ")));
    output::raw(format!("  CSV fallback: {}", config.fallback_department));
    output::raw(format!("  Currency    : {}", config.currency_label));
    output::raw(format!("  Storage key : {}", config.storage_key));
    output::raw(format!("  Backups     : {}-YYYY-MM-DD.json", config.backup_prefix));
    output::raw(format!("  Data dir    : {}", context.base_dir.display()));
    output::raw(format!("  Config file : {}", context.config_manager.path().display()));
    Ok(())
}

fn save(context: &ShellContext) -> Result<(), CommandError> {
    context.config_manager.save(&context.config)?;
    tracing::info!(path = %context.config_manager.path().display(), "configuration saved");
    Ok(())
}
