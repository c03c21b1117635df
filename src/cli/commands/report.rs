use crate::cli::commands::{usage_error, CommandDefinition, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{SummaryService, TransactionService};
use crate::currency::{format_amount, format_number, format_record_date};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "dashboard",
            "Show cash received, expenses and net balance",
            "dashboard",
            cmd_dashboard,
        ),
        CommandDefinition::new(
            "pledges",
            "List pledges with amounts paid, or one pledge with its payments",
            "pledges [pledge-id]",
            cmd_pledges,
        ),
        CommandDefinition::new(
            "departments",
            "Show cash collected per department",
            "departments",
            cmd_departments,
        ),
        CommandDefinition::new(
            "ledger",
            "Show income and expenses, newest first",
            "ledger [--limit N]",
            cmd_ledger,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let doc = context.store.document();
    let totals = SummaryService::dashboard(doc);
    let label = context.currency();

    output::section("Dashboard");
    output::raw(format!("  Cash received : {}", format_amount(label, totals.revenue)));
    output::raw(format!("  Expenses      : {}", format_amount(label, totals.expenses)));
    output::raw(format!("  Net balance   : {}", format_amount(label, totals.net)));
    output::raw(format!(
        "  Records       : {} pledges, {} payments, {} expenses",
        doc.pledges.len(),
        doc.transactions.len(),
        doc.expenses.len()
    ));
    Ok(())
}

fn cmd_pledges(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => list_pledges(context),
        [reference] => show_pledge(context, reference),
        _ => Err(usage_error("pledges [pledge-id]")),
    }
}

fn list_pledges(context: &ShellContext) -> CommandResult {
    let rows = SummaryService::pledge_progress(context.store.document());
    output::section("Pledges");
    if rows.is_empty() {
        output::info("No pledges recorded yet. Use `pledge-add` or `import-csv`.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Name").max_width(28),
        TableColumn::left("Department"),
        TableColumn::right("Pledged"),
        TableColumn::right("Paid"),
        TableColumn::right("Balance"),
        TableColumn::left("Status"),
    ]);
    for row in rows {
        table.push_row(vec![
            row.id.short().to_string(),
            row.name,
            row.department,
            format_number(row.pledged),
            format_number(row.paid),
            format_number(row.balance),
            row.status.to_string(),
        ]);
    }
    output::raw(table.render());
    Ok(())
}

fn show_pledge(context: &ShellContext, reference: &str) -> CommandResult {
    let doc = context.store.document();
    let pledge = doc
        .find_pledge(reference)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let label = context.currency();

    output::section(format!("Pledge {}", pledge.id.short()));
    output::raw(format!("  Name       : {}", pledge.name));
    output::raw(format!("  Department : {}", pledge.department));
    output::raw(format!("  Pledged    : {}", format_amount(label, pledge.amount)));
    output::raw(format!(
        "  Paid       : {}",
        format_amount(label, SummaryService::amount_paid_for_pledge(doc, &pledge.id))
    ));
    output::raw(format!(
        "  Balance    : {}",
        format_amount(label, SummaryService::pledge_balance(doc, pledge))
    ));
    output::raw(format!(
        "  Status     : {}",
        SummaryService::pledge_status(doc, pledge)
    ));

    let payments = TransactionService::payments_for(doc, pledge.id.as_str());
    if payments.is_empty() {
        output::info("No payments recorded against this pledge.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Ref"),
        TableColumn::right("Amount"),
    ]);
    for txn in payments {
        table.push_row(vec![
            format_record_date(&txn.date),
            txn.id.short().to_string(),
            format_number(txn.amount),
        ]);
    }
    output::raw(table.render());
    Ok(())
}

fn cmd_departments(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals =
        SummaryService::department_totals(context.store.document(), &context.config.departments);
    let label = context.currency();

    output::section("Departments");
    let mut table = Table::new(vec![
        TableColumn::left("Department"),
        TableColumn::right(format!("Collected ({label})")),
    ]);
    for total in totals {
        table.push_row(vec![total.department, format_number(total.collected)]);
    }
    output::raw(table.render());
    Ok(())
}

fn cmd_ledger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["--limit"])?;
    parsed.reject_unknown_flags(&[])?;
    if !parsed.positional.is_empty() {
        return Err(usage_error("ledger [--limit N]"));
    }
    let limit = match parsed.option("--limit") {
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a valid limit"))
        })?),
        None => None,
    };

    let entries = SummaryService::unified_ledger(context.store.document());
    output::section("Ledger");
    if entries.is_empty() {
        output::info("Nothing recorded yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Ref"),
        TableColumn::left("Name").max_width(32),
        TableColumn::left("Type"),
        TableColumn::right("Amount"),
    ]);
    for entry in entries.into_iter().take(limit.unwrap_or(usize::MAX)) {
        table.push_row(vec![
            format_record_date(&entry.date),
            entry.id.short().to_string(),
            entry.name,
            entry.kind.to_string(),
            format_number(entry.amount),
        ]);
    }
    output::raw(table.render());
    Ok(())
}
