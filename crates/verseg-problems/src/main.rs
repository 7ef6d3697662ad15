use std::{
    io::{self, BufWriter, Read, Write},
    process,
    str::FromStr,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use prettytable::{row, Table};
use tracing_subscriber::EnvFilter;
use verseg_problems::{
    validate::{self, Workload},
    DistinctCount,
    FrequentValues,
    RangeKth,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// k-th smallest value per window. Reads `n q`, the array and `q` lines of `l r k`
    Kth,
    /// Distinct values per window. Reads `n`, the array, `q` and `q` lines of `l r`
    Distinct,
    /// Values occurring more than `t` times per window. Reads `n q t`, the array and `q` lines of `l r`
    Frequent,
    /// Compares every problem against brute-force references on random workloads
    Validate {
        #[clap(short, long, value_parser, default_value_t = 1000)]
        queries: usize,
        #[clap(short, long, value_parser, default_value_t = 1000)]
        len: usize,
        #[clap(short, long, value_parser, default_value_t = 42)]
        seed: u64,
    },
}

/// Whitespace separated tokens from stdin
struct Scanner {
    input: String,
    offset: usize,
}

impl Scanner {
    fn stdin() -> Result<Self> {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        Ok(Self { input, offset: 0 })
    }

    fn next<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let rest = &self.input[self.offset..];
        let start = rest.len() - rest.trim_start().len();
        let token = rest[start..]
            .split_whitespace()
            .next()
            .context("unexpected end of input")?;
        self.offset += start + token.len();
        token
            .parse()
            .with_context(|| format!("invalid token {:?}", token))
    }

    fn values<T>(&mut self, n: usize) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        (0..n).map(|_| self.next()).collect()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args.command) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Kth => kth(),
        Command::Distinct => distinct(),
        Command::Frequent => frequent(),
        Command::Validate { queries, len, seed } => run_validation(Workload { len, queries, seed }),
    }
}

fn kth() -> Result<()> {
    let mut scanner = Scanner::stdin()?;
    let (n, q): (usize, usize) = (scanner.next()?, scanner.next()?);
    let values: Vec<i64> = scanner.values(n)?;
    let kth = RangeKth::new(&values)?;

    let mut out = BufWriter::new(io::stdout().lock());
    for _ in 0..q {
        let (l, r, k): (usize, usize, u64) = (scanner.next()?, scanner.next()?, scanner.next()?);
        writeln!(out, "{}", kth.query(l, r, k)?)?;
    }
    Ok(())
}

fn distinct() -> Result<()> {
    let mut scanner = Scanner::stdin()?;
    let n: usize = scanner.next()?;
    let values: Vec<i64> = scanner.values(n)?;
    let distinct = DistinctCount::new(&values)?;

    let q: usize = scanner.next()?;
    let mut out = BufWriter::new(io::stdout().lock());
    for _ in 0..q {
        let (l, r): (usize, usize) = (scanner.next()?, scanner.next()?);
        writeln!(out, "{}", distinct.query(l, r)?)?;
    }
    Ok(())
}

fn frequent() -> Result<()> {
    let mut scanner = Scanner::stdin()?;
    let (n, q, t): (usize, usize, u64) = (scanner.next()?, scanner.next()?, scanner.next()?);
    let values: Vec<i64> = scanner.values(n)?;
    let frequent = FrequentValues::new(&values)?;

    let mut out = BufWriter::new(io::stdout().lock());
    for _ in 0..q {
        let (l, r): (usize, usize) = (scanner.next()?, scanner.next()?);
        writeln!(out, "{}", frequent.query(l, r, t)?)?;
    }
    Ok(())
}

fn run_validation(workload: Workload) -> Result<()> {
    println!(
        "Validating {} queries per problem over {} values (seed {})...",
        workload.queries, workload.len, workload.seed
    );
    let reports = validate::run(&workload)?;

    let mut table = Table::new();
    table.add_row(row!["problem", "queries", "mismatches", "elapsed"]);
    for report in &reports {
        table.add_row(row![
            report.problem,
            report.queries,
            report.mismatches,
            format!("{:?}", report.elapsed),
        ]);
    }
    table.printstd();

    let failed = reports.iter().filter(|report| !report.passed()).count();
    if failed > 0 {
        bail!("{} of {} problems disagree with the references", failed, reports.len());
    }
    println!("All problems agree with the references!");
    Ok(())
}
