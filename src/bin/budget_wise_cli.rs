use std::{env, process};

use budget_wise::{cli, init};

fn main() {
    init();

    if let Err(err) = cli::run(env::args().skip(1).collect()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
