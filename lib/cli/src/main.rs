use std::io::{self, BufRead, IsTerminal, Write};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;
use elapsed::measure_time;
use itertools::Itertools;
use log::{debug, error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use prop_cnf_core::tseitin::{TseitinOptions, DEFAULT_PREFIX};
use prop_cnf_core::{Cnf, Formula, Limits, DEFAULT_LIMITS};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Formula to convert. Without it, formulas are read from stdin, one per line.
    #[arg(value_name = "FORMULA")]
    formula: Option<String>,

    /// Conversion algorithm.
    #[arg(short, long, value_enum, default_value_t = Method::Both)]
    method: Method,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Maximum nesting of the input text.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_LIMITS.max_nesting)]
    max_nesting: usize,

    /// Maximum depth of the formula tree.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_LIMITS.max_depth)]
    max_depth: usize,

    /// Maximum number of nodes produced by the standard algorithm.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_LIMITS.max_nodes)]
    max_nodes: usize,

    /// Prefix of the fresh Tseitin variables.
    #[arg(long, value_name = "STR", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
enum Method {
    Standard,
    Tseitin,
    Both,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
enum Format {
    Text,
    Inline,
    Dimacs,
}

impl Cli {
    fn limits(&self) -> Limits {
        Limits {
            max_nesting: self.max_nesting,
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }

    fn tseitin_options(&self) -> TseitinOptions {
        TseitinOptions {
            prefix: self.prefix.clone(),
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    TermLogger::init(args.log_level(), Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    debug!("args = {:?}", args);

    match &args.formula {
        Some(input) => run(input, &args),
        None => interactive(&args),
    }
}

fn interactive(args: &Cli) -> color_eyre::Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut lines = stdin.lock().lines();
    loop {
        if prompt {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        if let Err(e) = run(line, args) {
            error!("{}", e);
        }
    }
    Ok(())
}

fn run(input: &str, args: &Cli) -> color_eyre::Result<()> {
    let limits = args.limits();
    let formula = match Formula::parse_with(input, &limits) {
        Ok(formula) => formula,
        Err(e) => {
            if let Some(position) = e.position() {
                eprintln!("  {}", input);
                eprintln!("  {}^", " ".repeat(position));
            }
            return Err(e.into());
        }
    };
    info!("Parsed {} nodes over {} atoms", formula.size(), formula.atoms().len());

    if args.format == Format::Text {
        println!("Formula: {}", formula);
    }

    if matches!(args.method, Method::Standard | Method::Both) {
        if let Err(e) = run_standard(&formula, &limits, args.format) {
            if args.method == Method::Standard {
                return Err(e);
            }
            error!("Standard CNF failed: {}", e);
        }
    }

    if matches!(args.method, Method::Tseitin | Method::Both) {
        let (elapsed, cnf) = measure_time(|| formula.clone().to_tseitin(&limits, &args.tseitin_options()));
        let cnf = cnf?;
        info!("Tseitin CNF computed in {}", elapsed);
        print_cnf("Tseitin CNF", &cnf, args.format);
    }

    Ok(())
}

fn run_standard(formula: &Formula, limits: &Limits, format: Format) -> color_eyre::Result<()> {
    let (elapsed, result) = measure_time(|| formula.clone().to_cnf(limits));
    let result = result?;
    info!("Standard CNF computed in {}", elapsed);
    if format == Format::Text {
        println!("Standard formula: {}", result);
    }
    let cnf = Cnf::from_formula(&result).ok_or_else(|| eyre!("Standard result is not in CNF: {}", result))?;
    print_cnf("Standard CNF", &cnf, format);
    Ok(())
}

fn print_cnf(title: &str, cnf: &Cnf, format: Format) {
    match format {
        Format::Text => {
            println!("{}:", title);
            for clause in cnf.iter() {
                println!("  {}", clause.display(&cnf.symbols));
            }
            println!("Total {} clauses", cnf.num_clauses());
            if !cnf.definitions.is_empty() {
                println!("Total {} fresh variables:", cnf.num_fresh());
                for d in cnf.definitions.iter() {
                    println!("  {}", d.display(&cnf.symbols));
                }
            }
        }
        Format::Inline => {
            println!("{}: {}", title, cnf.display_inline());
        }
        Format::Dimacs => {
            println!("c {}", title);
            if !cnf.fresh.is_empty() {
                println!("c fresh: {}", cnf.fresh.iter().join(" "));
            }
            print!("{}", cnf.dimacs());
        }
    }
}
