//! Greets people named on the command line.
//!
//! ```text
//! cargo run --example greet -- --greeting=Howdy -n 2 ann bob
//! cargo run --example greet -- --help
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use flagbind::{FlagError, Flags, register_and_parse, render_help};

#[derive(Flags)]
struct Options {
    #[flag("--greeting=WORD how to open each line")]
    greeting: String,
    #[flag("-n=COUNT how many times to greet each person")]
    times: usize,
    #[flag("--shout print in upper case")]
    shout: bool,
    #[flag(rest)]
    names: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            greeting: "Hello".to_owned(),
            times: 1,
            shout: false,
            names: Vec::new(),
        }
    }
}

fn greetings(options: &Options) -> Vec<String> {
    let names: Vec<&str> = if options.names.is_empty() {
        vec!["world"]
    } else {
        options.names.iter().map(String::as_str).collect()
    };
    names
        .into_iter()
        .flat_map(|name| std::iter::repeat_n(format!("{}, {name}!", options.greeting), options.times))
        .map(|line| {
            if options.shout {
                line.to_uppercase()
            } else {
                line
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let mut options = Options::default();
    let mut stdout = io::stdout().lock();
    match register_and_parse(&mut options) {
        Ok(_) => {}
        Err(FlagError::HelpRequested) => {
            let text = render_help("greet", "[NAME...]", Some(&Options::default()));
            return match stdout.write_all(text.as_bytes()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            };
        }
        Err(err) => {
            return if writeln!(io::stderr(), "greet: {err}").is_ok() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            };
        }
    }
    for line in greetings(&options) {
        if writeln!(stdout, "{line}").is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
