// bitting-audit - pin-tumbler key bitting security analysis
// Finds alternate bittings that still open a lock under rotational force
// and key withdrawal, and keyspace-wide uniqueness statistics.

use std::fmt::Display;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use bitting_audit::cli::{Args, Command};
use bitting_audit::error::Result;
use bitting_audit::report::{AlternateReport, UniquenessReport};
use bitting_audit::scan::ScanOptions;
use bitting_audit::types::{Bitting, Keyspace};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(threads) = args.threads {
        // Fails if a global pool already exists; scans then use that pool.
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[✗] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Some(Command::Alternates { bitting, cuts }) => {
            let reference: Bitting = bitting.parse()?;
            let keyspace = Keyspace::new(reference.len(), *cuts)?;
            let report = AlternateReport::generate(&keyspace, &reference)?;
            emit(args, &report)
        }
        Some(Command::Unique {
            pins,
            cuts,
            parallel,
            force,
        }) => {
            let keyspace = Keyspace::new(*pins, *cuts)?;
            let cancel = install_ctrlc();
            let options = ScanOptions {
                parallel: *parallel,
                cancel: Some(&*cancel),
                ignore_limit: *force,
            };
            if !args.json {
                println!(
                    "[▶] Scanning {} bittings pairwise... (Ctrl+C to stop)\n",
                    keyspace.size()
                );
            }
            let report = UniquenessReport::generate(&keyspace, &options)?;
            emit(args, &report)
        }
        None => demo(args),
    }
}

/// The two worked examples this tool started from: a Schlage 5-pin lock
/// stamped 22224 (cut depths count from 0, so `[1,1,1,1,3]`), and full
/// uniqueness statistics for a small 3-pin, 3-cut keyspace.
fn demo(args: &Args) -> Result<()> {
    if !args.json {
        banner();
        println!("[▶] Alternates for a Schlage 5-pin lock stamped 22224:\n");
    }
    let schlage = Keyspace::new(5, 9)?;
    let reference = Bitting::new(vec![1, 1, 1, 1, 3]);
    let report = AlternateReport::generate(&schlage, &reference)?;
    emit(args, &report)?;

    if !args.json {
        println!("\n[▶] Uniqueness across a 3-pin, 3-cut keyspace:\n");
    }
    let small = Keyspace::new(3, 3)?;
    let report = UniquenessReport::generate(&small, &ScanOptions::default())?;
    emit(args, &report)
}

fn emit<R>(args: &Args, report: &R) -> Result<()>
where
    R: Serialize + Display,
{
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn install_ctrlc() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\n[!] Stopping...");
        flag.store(true, Ordering::SeqCst);
    })
    .ok();
    cancel
}

fn banner() {
    println!("\n\x1b[1;36m╔══════════════════════════════════════════════╗");
    println!("║   BITTING-AUDIT  •  Key Bitting Analysis     ║");
    println!("╚══════════════════════════════════════════════╝\x1b[0m\n");
}
