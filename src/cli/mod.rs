//! `budget_wise_cli`: a thin command front end over [`LedgerManager`].

pub mod output;

use chrono::NaiveDate;
use uuid::Uuid;

use wise_core::{SortDirection, SortKey};
use wise_domain::{start_of_day, EntryDraft, Frequency, Timeframe, TransactionType};
use wise_storage_json::{JsonLedgerStore, StoragePaths};

use crate::{
    config::{self, Config},
    core::{clock_from_env, LedgerManager},
    errors::BudgetError,
    utils::{self, build_info},
};

/// Parses `args` (without the program name) and runs one command.
pub fn run(args: Vec<String>) -> Result<(), BudgetError> {
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        print_usage();
        return Err(BudgetError::InvalidInput("missing command".into()));
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "version" | "--version" => return version(&rest),
        "help" | "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    let (_, config, paths) = config::load(utils::app_data_dir())?;
    output::set_color_enabled(config.ui_color_enabled);
    let store = JsonLedgerStore::with_retention(
        StoragePaths::under(&paths.ledger_root),
        config.backup_retention,
    )?;
    let mut manager = LedgerManager::open(Box::new(store), clock_from_env()?)?;
    let mut session = Session {
        manager: &mut manager,
        config: &config,
    };

    match command.as_str() {
        "add" => session.add(&rest),
        "summary" => session.summary(&rest),
        "trend" => session.trend(&rest),
        "budget" => session.budget(&rest),
        "subscriptions" => session.subscriptions(&rest),
        "history" => session.history(&rest),
        "remove" => session.remove(&rest),
        "categories" => session.categories(&rest),
        "catch-up" => session.catch_up(),
        "export" => session.export(),
        other => {
            print_usage();
            Err(BudgetError::InvalidInput(format!("unknown command `{other}`")))
        }
    }
}

struct Session<'a> {
    manager: &'a mut LedgerManager,
    config: &'a Config,
}

impl Session<'_> {
    fn currency(&self) -> &str {
        &self.config.currency
    }

    fn add(&mut self, args: &[String]) -> Result<(), BudgetError> {
        let (positional, flags) = split_flags(args)?;
        let [kind, amount, category, rest @ ..] = positional.as_slice() else {
            return Err(BudgetError::InvalidInput(
                "usage: add <income|expense> <amount> <category> [description]".into(),
            ));
        };
        let kind = TransactionType::parse(kind)
            .ok_or_else(|| BudgetError::InvalidInput(format!("unknown entry type `{kind}`")))?;
        let amount = parse_amount(amount)?;
        let date = match flag(&flags, "date") {
            Some(raw) => start_of_day(parse_date(raw)?),
            None => self.manager.now(),
        };
        let frequency = match flag(&flags, "every") {
            Some(raw) => Frequency::parse(raw)
                .ok_or_else(|| BudgetError::InvalidInput(format!("unknown frequency `{raw}`")))?,
            None => Frequency::None,
        };
        let draft = EntryDraft {
            kind,
            amount,
            category: category.clone(),
            description: rest.join(" "),
            date,
        };
        let recorded = self.manager.record_entry(draft, frequency)?;
        self.manager.save()?;
        output::success(format!("Recorded {kind} {}", recorded.transaction_id));
        if let Some(id) = recorded.definition_id {
            output::success(format!("Repeats {frequency}, definition {id}"));
        }
        Ok(())
    }

    fn summary(&mut self, args: &[String]) -> Result<(), BudgetError> {
        let timeframe = timeframe_arg(args.first(), self.config.timeframe())?;
        let offset = match args.get(1) {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| BudgetError::InvalidInput(format!("invalid offset `{raw}`")))?,
            None => 0,
        };
        let (window, totals) = self.manager.summary(timeframe, offset)?;
        output::section(&window.label);
        for line in output::totals_lines(&totals, self.currency()) {
            println!("{line}");
        }
        let breakdown =
            wise_core::SummaryService::aggregate_by_category(&self.manager.ledger().transactions, &window);
        if !breakdown.is_empty() {
            println!();
            for (category, spent) in breakdown {
                println!("  {category:<16} {}", output::format_amount(spent, self.currency()));
            }
        }
        let recent = self.manager.recent(self.config.recent_limit);
        if offset == 0 && !recent.is_empty() {
            println!();
            println!("Recent:");
            for txn in &recent {
                println!("{}", output::transaction_line(txn, self.currency()));
            }
        }
        Ok(())
    }

    fn trend(&mut self, args: &[String]) -> Result<(), BudgetError> {
        let timeframe = timeframe_arg(args.first(), self.config.timeframe())?;
        let count = match args.get(1) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| BudgetError::InvalidInput(format!("invalid count `{raw}`")))?,
            None => self.config.trend_periods,
        };
        output::section(&format!("{} trend", timeframe.short_label()));
        for point in self.manager.trend(timeframe, count) {
            println!(
                "{:<24} +{} -{} = {}",
                point.window.label,
                output::format_amount(point.totals.income, self.currency()),
                output::format_amount(point.totals.expense, self.currency()),
                output::signed(point.totals.balance, self.currency())
            );
        }
        Ok(())
    }

    fn budget(&mut self, args: &[String]) -> Result<(), BudgetError> {
        match args.first().map(String::as_str) {
            Some("set") => {
                let [_, category, value] = args else {
                    return Err(BudgetError::InvalidInput("usage: budget set <category> <amount>".into()));
                };
                let value = parse_limit(value)?;
                self.manager.set_limit(category, value)?;
                self.manager.save()?;
                output::success(format!("Limit for {} set", category.trim()));
                Ok(())
            }
            Some("cap") => {
                let [_, timeframe, value] = args else {
                    return Err(BudgetError::InvalidInput(
                        "usage: budget cap <daily|monthly|yearly> <amount>".into(),
                    ));
                };
                let value = parse_limit(value)?;
                let mut overall = self.manager.ledger().overall_budget;
                match Timeframe::parse(timeframe) {
                    Some(Timeframe::Daily) => overall.daily = value,
                    Some(Timeframe::Monthly) => overall.monthly = value,
                    Some(Timeframe::Yearly) => overall.yearly = value,
                    _ => {
                        return Err(BudgetError::InvalidInput(format!(
                            "caps exist for daily, monthly and yearly, not `{timeframe}`"
                        )))
                    }
                }
                self.manager.set_overall_budget(overall);
                self.manager.save()?;
                output::success(format!("{timeframe} cap set"));
                Ok(())
            }
            Some(other) => Err(BudgetError::InvalidInput(format!("unknown budget action `{other}`"))),
            None => {
                let overall = self.manager.overall_statuses();
                let categories = self.manager.category_statuses();
                if overall.is_empty() && categories.is_empty() {
                    output::warning("No budgets configured.");
                    return Ok(());
                }
                output::section("Budgets");
                for status in overall {
                    println!(
                        "{}",
                        output::budget_line(status.timeframe.short_label(), &status.totals, self.currency())
                    );
                }
                for status in categories {
                    println!("{}", output::budget_line(&status.category, &status.totals, self.currency()));
                }
                Ok(())
            }
        }
    }

    fn subscriptions(&mut self, args: &[String]) -> Result<(), BudgetError> {
        if let [action, id] = args {
            if action == "cancel" {
                let id = parse_id(id)?;
                let removed = self.manager.cancel_definition(id)?;
                self.manager.save()?;
                output::success(format!("Cancelled {}", removed.description));
                return Ok(());
            }
        }
        if !args.is_empty() {
            return Err(BudgetError::InvalidInput("usage: subscriptions [cancel <id>]".into()));
        }
        let cost = self.manager.subscription_cost();
        output::section("Subscriptions");
        println!("Monthly: {}", output::format_amount(cost.monthly, self.currency()));
        println!("Yearly:  {}", output::format_amount(cost.yearly, self.currency()));
        for charge in self.manager.upcoming_charges() {
            let due = match charge.days_until {
                d if d < 0 => format!("overdue {}d", -d),
                0 => "due today".into(),
                d => format!("in {d}d"),
            };
            println!(
                "  {:<24} {:>10} {:<8} {due:<12} {}",
                charge.definition.description,
                output::format_amount(charge.definition.amount, self.currency()),
                charge.definition.frequency,
                charge.definition.id
            );
        }
        Ok(())
    }

    fn history(&mut self, args: &[String]) -> Result<(), BudgetError> {
        let (positional, flags) = split_flags(args)?;
        let key = match flag(&flags, "sort") {
            Some("amount") => SortKey::Amount,
            Some("date") | None => SortKey::Date,
            Some(other) => return Err(BudgetError::InvalidInput(format!("unknown sort key `{other}`"))),
        };
        let direction = if flags.iter().any(|(name, _)| name == "asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        let term = positional.join(" ");
        let groups = self.manager.history(&term, key, direction);
        if groups.is_empty() {
            output::warning("No transactions found.");
        }
        for group in groups {
            output::section(&group.title);
            for txn in &group.transactions {
                println!("{}", output::transaction_line(txn, self.currency()));
            }
        }
        Ok(())
    }

    fn remove(&mut self, args: &[String]) -> Result<(), BudgetError> {
        let [id] = args else {
            return Err(BudgetError::InvalidInput("usage: remove <transaction-id>".into()));
        };
        let removed = self.manager.remove_transaction(parse_id(id)?)?;
        self.manager.save()?;
        output::success(format!("Removed {}", removed.description));
        Ok(())
    }

    fn categories(&mut self, args: &[String]) -> Result<(), BudgetError> {
        match args {
            [] => {
                output::section("Categories");
                for category in &self.manager.ledger().categories {
                    match self.manager.ledger().limit_for(category) {
                        Some(limit) => println!("  {category:<16} limit {}", output::format_amount(limit, self.currency())),
                        None => println!("  {category}"),
                    }
                }
                Ok(())
            }
            [action, name @ ..] if action == "add" && !name.is_empty() => {
                let added = self.manager.add_category(&name.join(" "))?;
                self.manager.save()?;
                output::success(format!("Added category {added}"));
                Ok(())
            }
            [action, name @ ..] if action == "remove" && !name.is_empty() => {
                self.manager.remove_category(&name.join(" "))?;
                self.manager.save()?;
                output::success("Category removed");
                Ok(())
            }
            _ => Err(BudgetError::InvalidInput("usage: categories [add|remove <name>]".into())),
        }
    }

    fn catch_up(&mut self) -> Result<(), BudgetError> {
        let generated = self.manager.generated_on_open() + self.manager.catch_up()?;
        output::success(format!("Recurring entries up to date ({generated} generated)"));
        Ok(())
    }

    fn export(&mut self) -> Result<(), BudgetError> {
        println!("{}", serde_json::to_string_pretty(self.manager.ledger())?);
        Ok(())
    }
}

fn version(args: &[String]) -> Result<(), BudgetError> {
    let info = build_info::current();
    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.describe());
    }
    Ok(())
}

type Flags = Vec<(String, Option<String>)>;

/// Splits `--name value` pairs (and bare `--asc`) from positional arguments.
fn split_flags(args: &[String]) -> Result<(Vec<String>, Flags), BudgetError> {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.strip_prefix("--") {
            Some("asc") => flags.push(("asc".to_string(), None)),
            Some(name) => {
                let value = iter
                    .next()
                    .ok_or_else(|| BudgetError::InvalidInput(format!("--{name} needs a value")))?;
                flags.push((name.to_string(), Some(value.clone())));
            }
            None => positional.push(arg.clone()),
        }
    }
    Ok((positional, flags))
}

fn flag<'a>(flags: &'a Flags, name: &str) -> Option<&'a str> {
    flags
        .iter()
        .find(|(flag, _)| flag == name)
        .and_then(|(_, value)| value.as_deref())
}

fn timeframe_arg(raw: Option<&String>, default: Timeframe) -> Result<Timeframe, BudgetError> {
    match raw {
        Some(raw) => Timeframe::parse(raw)
            .ok_or_else(|| BudgetError::InvalidInput(format!("unknown timeframe `{raw}`"))),
        None => Ok(default),
    }
}

fn parse_amount(raw: &str) -> Result<f64, BudgetError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| BudgetError::InvalidInput(format!("invalid amount `{raw}`")))
}

fn parse_limit(raw: &str) -> Result<f64, BudgetError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| BudgetError::InvalidInput(format!("invalid amount `{raw}`")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, BudgetError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BudgetError::InvalidInput(format!("invalid date `{raw}`, expected YYYY-MM-DD")))
}

fn parse_id(raw: &str) -> Result<Uuid, BudgetError> {
    Uuid::parse_str(raw.trim()).map_err(|_| BudgetError::InvalidInput(format!("invalid id `{raw}`")))
}

fn print_usage() {
    eprintln!(
        "Usage: budget_wise_cli <command>\n\
         Commands:\n  \
         add <income|expense> <amount> <category> [description] [--date YYYY-MM-DD] [--every daily|weekly|monthly|yearly]\n  \
         summary [daily|weekly|monthly|yearly] [offset]\n  \
         trend [timeframe] [count]\n  \
         budget [set <category> <amount> | cap <daily|monthly|yearly> <amount>]\n  \
         subscriptions [cancel <id>]\n  \
         history [search] [--sort date|amount] [--asc]\n  \
         remove <transaction-id>\n  \
         categories [add|remove <name>]\n  \
         catch-up\n  \
         export\n  \
         version [--json]"
    );
}
