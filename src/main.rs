use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::{debug, error, LevelFilter};

use splitwise::accounting::summary::format_amount;
use splitwise::accounting::{AddExpense, CategoryValue, Person, RemoveCategory};
use splitwise::args::{Args, Command};
use splitwise::session::Session;
use splitwise::{chart, data};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.common().log_level());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("exiting with error: {err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        },
    }
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: Args) -> Result<()> {
    debug!("{args:?}");
    let mut session = Session::open(args.common().file())?;

    match args.command() {
        Command::Add(add) => {
            let operation = AddExpense::new(add.person(), add.category(), add.amount())?;
            let message = format!(
                "Added '{}' of {} to {}",
                operation.category(),
                format_amount(operation.amount()),
                add.person()
            );
            session.apply(operation.into())?;
            println!("{message}");
        },

        Command::Remove(remove) => {
            let operation = RemoveCategory::new(remove.person(), remove.category())?;
            let existed = session.store().ledger(remove.person()).contains(operation.category());
            session.apply(operation.into())?;
            if existed {
                println!("Removed '{}' from {}", remove.category().trim(), remove.person());
            } else {
                println!("{} has no category '{}'", remove.person(), remove.category().trim());
            }
        },

        Command::Edit(edit) => {
            let operation = edit.operation(session.store())?;
            let message = format!(
                "{}: '{}' is now '{}' with {}",
                edit.person(),
                operation.category(),
                operation.new_name(),
                format_amount(operation.new_total())
            );
            session.apply(operation.into())?;
            println!("{message}");
        },

        Command::Summary => print_summary(&session),

        Command::Chart(chart_args) => {
            let series = session.chart_series();
            if chart_args.csv() {
                data::export_csv(&series, io::stdout())?;
            } else {
                print!("{}", chart::render(&series, chart_args.width()));
            }
        },

        Command::List => print_list(&session),
    }

    Ok(())
}

fn print_summary(session: &Session) {
    let summary = session.summary();
    println!("Total spent: {}", format_amount(summary.grand_total()));
    for person in Person::ALL {
        println!("{} spent: {}", person, format_amount(summary.total(person)));
    }
    println!("{}", summary.balance());
}

fn print_list(session: &Session) {
    for person in Person::ALL {
        println!("{}", person);
        let ledger = session.store().ledger(person);
        if ledger.is_empty() {
            println!("  (no expenses)");
        }
        for (category, value) in ledger.iter() {
            let detail = match value {
                CategoryValue::Scalar(_) => String::new(),
                CategoryValue::Series(_) => format!(" ({} entries)", value.entries()),
            };
            println!("  {}: {}{}", category, format_amount(value.effective_total()), detail);
        }
    }
}
