use clap::Parser;
use std::path::Path;
use std::process;
use tmsim::loader::{ProgramLoader, Variant};
use tmsim::machine;
use tmsim::report::{format_summary, ConsoleReporter};
use tmsim::DEFAULT_MAX_STEPS;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine description file to execute
    #[clap(short, long)]
    machine: String,

    /// Load the description as a cache-register machine
    #[clap(short, long)]
    cached: bool,

    /// Inputs to run; defaults to the description's `inputs` list
    #[clap(short, long)]
    input: Vec<String>,

    /// Maximum number of steps per run
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 't', long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();

    let variant = if cli.cached {
        Variant::Cached
    } else {
        Variant::Base
    };

    let program = match ProgramLoader::load_program(Path::new(&cli.machine), variant) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let inputs = if cli.input.is_empty() {
        program.inputs.clone()
    } else {
        cli.input.clone()
    };

    let mut records = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let record = if cli.trace {
            machine::run_with_reporter(&program, input, cli.max_steps, &mut ConsoleReporter)
        } else {
            machine::run(&program, input, cli.max_steps)
        };

        if program.is_cached() {
            println!("'{}' -> '{}'", record.input, record.output);
        }

        records.push(record);
    }

    print!("{}", format_summary(&records));
}
