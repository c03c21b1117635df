use std::{fs, path::PathBuf};

use chrono::Local;

use crate::cli::commands::{usage_error, CommandDefinition, ParsedArgs};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::ImportService;

const IMPORT_USAGE: &str = "import-csv <file>";
const BACKUP_USAGE: &str = "backup [directory]";
const RESTORE_USAGE: &str = "restore <file> [--yes]";
const RESET_USAGE: &str = "reset [--yes]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "import-csv",
            "Import pledges from a name,department,amount CSV file",
            IMPORT_USAGE,
            cmd_import_csv,
        ),
        CommandDefinition::new(
            "backup",
            "Write today's backup file",
            BACKUP_USAGE,
            cmd_backup,
        ),
        CommandDefinition::new("backups", "List saved backups", "backups", cmd_backups),
        CommandDefinition::new(
            "restore",
            "Replace all records with a backup file",
            RESTORE_USAGE,
            cmd_restore,
        ),
        CommandDefinition::new("reset", "Erase all records", RESET_USAGE, cmd_reset),
    ]
}

fn cmd_import_csv(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [file] = args else {
        return Err(usage_error(IMPORT_USAGE));
    };
    let text = fs::read_to_string(file)?;
    let fallback = context.config.fallback_department.clone();
    let report = ImportService::import_csv_pledges(&mut context.store, &text, &fallback)?;

    if report.imported == 0 {
        output::warning("No pledges found in the file.");
    } else {
        output::success(format!("Imported {} pledges.", report.imported));
    }
    if report.skipped > 0 {
        output::warning(format!(
            "Skipped {} lines without a name or amount.",
            report.skipped
        ));
    }
    Ok(())
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => context.backup_dir(),
        [dir] => PathBuf::from(dir),
        _ => return Err(usage_error(BACKUP_USAGE)),
    };
    let path = ImportService::write_backup(
        context.store.document(),
        &dir,
        &context.config.backup_prefix,
        Local::now().date_naive(),
    )?;
    output::success(format!("Backup written to {}", path.display()));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups =
        ImportService::list_backups(&context.backup_dir(), &context.config.backup_prefix)?;
    output::section("Backups");
    if backups.is_empty() {
        output::info("No backups yet. Use `backup` to create one.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("Size"),
        TableColumn::left("File"),
    ]);
    for info in backups {
        let file = info
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.push_row(vec![
            info.date.format("%d %b %Y").to_string(),
            format!("{} B", info.size_bytes),
            file,
        ]);
    }
    output::raw(table.render());
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    parsed.reject_unknown_flags(&["--yes", "-y"])?;
    let [file] = parsed.positional.as_slice() else {
        return Err(usage_error(RESTORE_USAGE));
    };
    let path = resolve_backup_path(context, file);

    // Validate before asking, so a bad file never reaches the prompt.
    let document = ImportService::read_backup(&path)?;

    let prompt = format!(
        "Replace all current records with {} pledges, {} payments and {} expenses from {}?",
        document.pledges.len(),
        document.transactions.len(),
        document.expenses.len(),
        path.display()
    );
    if !context.confirm_destructive(&prompt, parsed.assume_yes())? {
        output::info("Restore cancelled.");
        return Ok(());
    }

    context.store.replace(document);
    context.store.persist()?;
    tracing::info!(path = %path.display(), "backup restored");
    output::success("Backup restored.");
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    parsed.reject_unknown_flags(&["--yes", "-y"])?;
    if !parsed.positional.is_empty() {
        return Err(usage_error(RESET_USAGE));
    }
    let prompt = "Delete ALL pledges, payments and expenses?";
    if !context.confirm_destructive(prompt, parsed.assume_yes())? {
        output::info("Reset cancelled.");
        return Ok(());
    }
    context.store.clear()?;
    output::success("All records erased.");
    Ok(())
}

/// A bare file name that does not exist locally is looked up in the backup directory.
fn resolve_backup_path(context: &ShellContext, raw: &str) -> PathBuf {
    let direct = PathBuf::from(raw);
    if direct.exists() {
        return direct;
    }
    let in_backups = context.backup_dir().join(raw);
    if in_backups.exists() {
        in_backups
    } else {
        direct
    }
}
