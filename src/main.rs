use std::io::{self, Write};
use std::num::ParseIntError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};
use structopt::StructOpt;

use dobutsu_endgame::{
    search, IntoPretty, Position, Table, LEGAL, LOSS, TABLE_SIZE, WIN,
};

#[derive(StructOpt)]
#[structopt(name = "dobutsu", about = "Strong endgame solver for Dōbutsu shōgi")]
struct Opt {
    /// Initial board as 18 ASCII characters: squares 0..11 then the hand.
    #[structopt(short = "b", default_value = "ELG C  c gle      ")]
    board: String,

    /// Verify encode/decode round-trips over [start, stop) and set LEGAL bits.
    #[structopt(short = "c")]
    check: bool,

    /// Search depth in plies.
    #[structopt(short = "d", default_value = "0")]
    depth: i32,

    /// Clear the win/loss/depth bits of every LEGAL entry.
    #[structopt(short = "e")]
    empty: bool,

    /// Backing file for the table; anonymous memory when absent.
    #[structopt(short = "f", parse(from_os_str))]
    file: Option<PathBuf>,

    /// Gote moves first.
    #[structopt(short = "g")]
    gote: bool,

    /// Count legal / won / lost positions in the table.
    #[structopt(short = "n")]
    count: bool,

    /// Print every legal position in [start, stop).
    #[structopt(short = "p")]
    print: bool,

    /// Start index; rounded down to even, 0x hex accepted.
    #[structopt(short = "s", default_value = "0", parse(try_from_str = parse_index))]
    start: u64,

    /// Stop index (exclusive); 0x hex accepted, defaults to the table size.
    #[structopt(short = "t", parse(try_from_str = parse_index))]
    stop: Option<u64>,

    /// Verbose tracing.
    #[structopt(short = "v")]
    verbose: bool,
}

fn parse_index(s: &str) -> Result<u64, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

static STOP: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_: libc::c_int) {
    STOP.store(true, Ordering::Relaxed);
}

fn progress(done: u64, total: u64) {
    print!("{:.3}%\r", 100.0 * done as f64 / total as f64);
    let _ = io::stdout().flush();
}

fn main() -> anyhow::Result<ExitCode> {
    let no_args = std::env::args().len() == 1;
    let opt = Opt::from_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if opt.verbose { "debug" } else { "info" },
    ))
    .init();

    unsafe {
        libc::signal(
            libc::SIGINT,
            on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t,
        );
    }

    let mut check = opt.check;
    let mut empty = opt.empty;
    let mut count = opt.count;
    let print = opt.print || no_args;

    let mut table = match &opt.file {
        Some(path) => match Table::open(path, TABLE_SIZE) {
            Ok(table) => table,
            Err(err) => {
                warn!(
                    "cannot map {}: {err}; falling back to anonymous memory",
                    path.display()
                );
                check = false;
                empty = false;
                count = false;
                Table::anonymous(TABLE_SIZE).context("allocating anonymous table")?
            }
        },
        None => Table::anonymous(TABLE_SIZE).context("allocating anonymous table")?,
    };

    let start = opt.start & !1;
    let stop = opt.stop.unwrap_or(table.size()).min(table.size()).max(start);

    let t0 = Instant::now();

    // A whole-range check finds close to 336760432 legal even indices; the
    // stranded-chick rejection trims the lenient-rule figure slightly.
    if check || print {
        let mut legal = 0u64;
        let mut index = start;
        while index < stop && !STOP.load(Ordering::Relaxed) {
            if index & ((1 << 21) - 1) == 0 {
                progress(index - start, stop - start);
            }
            if let Some(position) = Position::decode(index) {
                legal += 1;
                if print {
                    println!("{index:#x}");
                    println!("{}", position.pretty());
                    println!();
                }
                if check {
                    let back = position.encode();
                    if back.0 == index {
                        table.mark_legal(index);
                    } else {
                        println!("{index:#x}/{:#x}", back.0);
                        break;
                    }
                }
            }
            index += 2;
        }
        println!(
            "{legal} positions ({:.3}%)",
            100.0 * legal as f64 / ((stop - start) / 2) as f64
        );
    }

    if opt.depth > 0 && !STOP.load(Ordering::Relaxed) {
        let initial =
            Position::from_template(&opt.board, !opt.gote).context("parsing board string")?;
        for depth in 1..=opt.depth {
            print!("depth {depth}\r");
            let _ = io::stdout().flush();
            let result = search(&initial, depth, &mut table, &STOP);
            let c = table.counters;
            println!(
                "{} wins, {} losses, {} queries, {} matches",
                c.wins, c.losses, c.queries, c.matches
            );
            match result {
                Some(value) => info!("depth {depth}: {value:+}"),
                None => break,
            }
        }
    }

    if count || empty {
        let mut legal = 0u64;
        let mut won = 0u64;
        let mut lost = 0u64;
        let mut index = start;
        while index < stop && !STOP.load(Ordering::Relaxed) {
            if index & ((1 << 21) - 1) == 0 {
                progress(index - start, stop - start);
            }
            let byte = table.get(index);
            if byte & LEGAL != 0 {
                legal += 1;
                if byte & WIN != 0 {
                    won += 1;
                }
                if byte & LOSS != 0 {
                    lost += 1;
                }
                if empty && byte & !LEGAL != 0 {
                    table.retain_legal(index);
                }
            }
            index += 2;
        }
        println!(
            "{legal} positions ({:.3}%), {won} wins, {lost} losses",
            100.0 * legal as f64 / ((stop - start) / 2) as f64
        );
    }

    println!("{}s", t0.elapsed().as_secs());

    drop(table);
    if STOP.load(Ordering::Relaxed) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
