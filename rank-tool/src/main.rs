use std::process::exit;

use anyhow::Error;
use structopt::StructOpt;

use crate::{check::CheckCmd, compare::CompareCmd, exit_code::FATAL_ERROR};

mod check;
mod compare;
mod exit_code;
mod inputs;
mod report;
mod utils;

/// Compares the first-page results of two search engines.
#[derive(StructOpt, Debug)]
enum CommandArgs {
    Compare(CompareCmd),
    Check(CheckCmd),
}

impl CommandArgs {
    fn run(self) -> Result<i32, Error> {
        match self {
            CommandArgs::Compare(cmd) => cmd.run(),
            CommandArgs::Check(cmd) => cmd.run(),
        }
    }
}

fn main() {
    env_logger::init();

    let exit_code = match CommandArgs::from_args().run() {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("{:?}", error);
            FATAL_ERROR
        }
    };

    exit(exit_code);
}
