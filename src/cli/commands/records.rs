use crate::cli::commands::{usage_error, CommandDefinition, ParsedArgs};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{ExpenseService, PledgeService, TransactionService};
use crate::currency::format_amount;

const PLEDGE_USAGE: &str = "pledge-add <name> <department> <amount>";
const CASH_USAGE: &str = "cash-add <name> <department> <amount> [--date YYYY-MM-DD] [--pledge ID]";
const EXPENSE_USAGE: &str = "expense-add <description> <amount> [--date YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("pledge-add", "Record a pledge", PLEDGE_USAGE, cmd_pledge_add),
        CommandDefinition::new(
            "cash-add",
            "Record cash received, optionally against a pledge",
            CASH_USAGE,
            cmd_cash_add,
        ),
        CommandDefinition::new(
            "expense-add",
            "Record money spent",
            EXPENSE_USAGE,
            cmd_expense_add,
        ),
    ]
}

fn cmd_pledge_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, department, amount] = args else {
        return Err(usage_error(PLEDGE_USAGE));
    };
    let pledge = PledgeService::create(&context.config, name, department, amount)?;
    let summary = format!(
        "Pledge from {} ({}) for {}",
        pledge.name,
        pledge.department,
        format_amount(context.currency(), pledge.amount)
    );
    let id = context.store.append(pledge)?;
    context.store.persist()?;
    output::success(format!("{summary} recorded as {}.", id.short()));
    Ok(())
}

fn cmd_cash_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["--date", "--pledge"])?;
    parsed.reject_unknown_flags(&[])?;
    let [name, department, amount] = parsed.positional.as_slice() else {
        return Err(usage_error(CASH_USAGE));
    };
    let txn = TransactionService::record_cash(
        &context.config,
        context.store.document(),
        name,
        department,
        amount,
        parsed.option("--date"),
        parsed.option("--pledge"),
    )?;
    let summary = match &txn.pledge_id {
        Some(pledge_id) => format!(
            "Payment of {} from {} against pledge {}",
            format_amount(context.currency(), txn.amount),
            txn.name,
            pledge_id.short()
        ),
        None => format!(
            "Donation of {} from {}",
            format_amount(context.currency(), txn.amount),
            txn.name
        ),
    };
    let id = context.store.append(txn)?;
    context.store.persist()?;
    output::success(format!("{summary} recorded as {}.", id.short()));
    Ok(())
}

fn cmd_expense_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["--date"])?;
    parsed.reject_unknown_flags(&[])?;
    let [description, amount] = parsed.positional.as_slice() else {
        return Err(usage_error(EXPENSE_USAGE));
    };
    let expense = ExpenseService::create(description, amount, parsed.option("--date"))?;
    let summary = format!(
        "Expense `{}` of {}",
        expense.description,
        format_amount(context.currency(), expense.amount)
    );
    let id = context.store.append(expense)?;
    context.store.persist()?;
    output::success(format!("{summary} recorded as {}.", id.short()));
    Ok(())
}
