use colored::{ColoredString, Colorize};

use wise_core::PeriodTotals;
use wise_domain::{BudgetStatus, BudgetTotals, Transaction};

/// Enables or disables ANSI colours for the rest of the process.
pub fn set_color_enabled(enabled: bool) {
    if !enabled || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
}

pub fn section(title: &str) {
    println!("{}", format!("=== {} ===", title.trim()).bold());
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "[ok]".green(), message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    println!("{} {}", "[!]".yellow(), message.as_ref());
}

pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        other => other,
    }
}

/// `$1,234.50`, with a leading minus for negative values.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{}{grouped}.{:02}", currency_symbol(currency), cents % 100)
}

pub fn signed(amount: f64, currency: &str) -> ColoredString {
    let text = format_amount(amount, currency);
    if amount < 0.0 {
        text.red()
    } else {
        text.green()
    }
}

pub fn totals_lines(totals: &PeriodTotals, currency: &str) -> Vec<String> {
    vec![
        format!("Income:  {}", format_amount(totals.income, currency).green()),
        format!("Expense: {}", format_amount(totals.expense, currency).red()),
        format!("Balance: {}", signed(totals.balance, currency)),
    ]
}

pub fn status_label(status: BudgetStatus) -> ColoredString {
    match status {
        BudgetStatus::OverBudget => status.to_string().red().bold(),
        BudgetStatus::OnTrack => status.to_string().yellow(),
        BudgetStatus::UnderBudget => status.to_string().green(),
        BudgetStatus::Empty => status.to_string().dimmed(),
    }
}

pub fn budget_line(label: &str, totals: &BudgetTotals, currency: &str) -> String {
    let percent = totals
        .percent_used
        .map(|p| format!("{p:.0}%"))
        .unwrap_or_else(|| "-".into());
    format!(
        "{label:<16} {} / {} ({percent}) {}",
        format_amount(totals.spent, currency),
        format_amount(totals.budgeted, currency),
        status_label(totals.status)
    )
}

pub fn transaction_line(txn: &Transaction, currency: &str) -> String {
    format!(
        "{}  {:<14} {:<24} {}  {}",
        txn.date.format("%Y-%m-%d"),
        txn.category,
        txn.description,
        signed(txn.signed_amount(), currency),
        txn.id.to_string().dimmed()
    )
}
