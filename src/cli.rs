use std::fs;
use std::sync::Arc;

use crate::calc::export_csv::results_to_csv_string;
use crate::calc::{calc_seed_custom, normalize_sequence};
use crate::config::Config;
use crate::data::catalog::{builtin_catalog, RoomCatalog};
use crate::data::validate::{validate_catalog, validate_catalog_file};
use crate::parallel::{calc_seeds_parallel, WorkerPool};
use crate::report::{describe_result, RoomFilter};
use crate::server::{self, AppState};

const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Calc,
    Rooms,
    Validate,
    Batch,
    Serve,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("calc") => Some(Command::Calc),
        Some("rooms") => Some(Command::Rooms),
        Some("validate") => Some(Command::Validate),
        Some("batch") => Some(Command::Batch),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = Config::from_env();
    match parse_command(args) {
        Some(Command::Calc) => handle_calc(args, &config),
        Some(Command::Rooms) => handle_rooms(args, &config),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Batch) => handle_batch(args, &config),
        Some(Command::Serve) => handle_serve(config),
        None => {
            eprintln!("usage: atlantis-calc <calc|rooms|validate|batch|serve>");
            2
        }
    }
}

/// Positional arguments after the sub-command, with `--flag value` pairs and bare `--switch`es removed.
fn positional(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(2);
    while let Some(arg) = iter.next() {
        if let Some(flag) = arg.strip_prefix("--") {
            if takes_value(flag) {
                iter.next();
            }
            continue;
        }
        out.push(arg.clone());
    }
    out
}

fn takes_value(flag: &str) -> bool {
    matches!(flag, "catalog" | "limit" | "workers")
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let flag = format!("--{name}");
    args.iter()
        .position(|arg| *arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_switch(args: &[String], name: &str) -> bool {
    let flag = format!("--{name}");
    args.iter().any(|arg| *arg == flag)
}

fn parse_usize_arg(raw: Option<&str>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

/// `--catalog` wins over `ATLANTIS_CATALOG`; neither means the built-in catalog.
fn load_catalog(args: &[String], config: &Config) -> Result<RoomCatalog, i32> {
    let path = flag_value(args, "catalog").or(config.catalog_path.as_deref());
    match path {
        Some(path) => RoomCatalog::load(path).map_err(|err| {
            eprintln!("failed to load catalog '{path}': {err}");
            1
        }),
        None => Ok(builtin_catalog().clone()),
    }
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn handle_calc(args: &[String], config: &Config) -> i32 {
    let rooms = positional(args);
    if rooms.is_empty() {
        eprintln!("usage: atlantis-calc calc <room> ... [--limit N] [--csv] [--catalog PATH]");
        return 2;
    }
    let catalog = match load_catalog(args, config) {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };
    let limit = parse_usize_arg(flag_value(args, "limit"), "limit", DEFAULT_LIMIT).max(1);

    let sequence = normalize_sequence(&rooms);
    let results = match calc_seed_custom(&sequence, &catalog) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("calculation failed: {err}");
            return 1;
        }
    };
    let top = &results[..limit.min(results.len())];

    if has_switch(args, "csv") {
        return match results_to_csv_string(&sequence, &catalog, top) {
            Ok(csv) => {
                print!("{csv}");
                0
            }
            Err(err) => {
                eprintln!("failed to write csv: {err}");
                1
            }
        };
    }

    let payload: Vec<serde_json::Value> = top
        .iter()
        .map(|result| {
            serde_json::json!({
                "boostless_time": result.boostless_time,
                "boost_time": result.boost_time,
                "boosts": describe_result(&sequence, &catalog, result),
            })
        })
        .collect();
    print_json(&payload, "calculation result")
}

fn handle_rooms(args: &[String], config: &Config) -> i32 {
    let catalog = match load_catalog(args, config) {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };
    let filter = positional(args)
        .first()
        .map_or(RoomFilter::All, |value| RoomFilter::parse(value));
    let ids = match filter.difficulty() {
        Some(difficulty) => catalog.room_ids_with_difficulty(difficulty),
        None => catalog.room_ids(),
    };
    for id in ids {
        println!("{id}");
    }
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let path = positional(args).into_iter().next();
    let (label, report) = match path {
        Some(path) => match validate_catalog_file(&path) {
            Ok(report) => (path, report),
            Err(err) => {
                eprintln!("validation failed: {err}");
                return 1;
            }
        },
        None => (
            "built-in catalog".to_string(),
            validate_catalog(builtin_catalog()),
        ),
    };

    for diag in &report.diagnostics {
        eprintln!("- {diag}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
        1
    } else {
        println!("validation passed: {label}");
        0
    }
}

/// One seed per line, rooms separated by commas (or whitespace when the line has no comma).
/// Blank lines and `#` comments are skipped.
pub fn parse_seed_lines(raw: &str) -> Vec<Vec<String>> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            if line.contains(',') {
                line.split(',')
                    .map(str::trim)
                    .filter(|room| !room.is_empty())
                    .map(str::to_string)
                    .collect()
            } else {
                line.split_whitespace().map(str::to_string).collect()
            }
        })
        .collect()
}

fn handle_batch(args: &[String], config: &Config) -> i32 {
    let Some(path) = positional(args).into_iter().next() else {
        eprintln!("usage: atlantis-calc batch <seeds-file> [--workers N] [--catalog PATH]");
        return 2;
    };
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("unable to read '{path}': {err}");
            return 1;
        }
    };
    let catalog = match load_catalog(args, config) {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };
    let pool = WorkerPool::with_workers(parse_usize_arg(flag_value(args, "workers"), "workers", 0));

    let seeds = parse_seed_lines(&raw);
    let outcomes = calc_seeds_parallel(&seeds, &catalog, &pool);
    print_json(&outcomes, "batch result")
}

fn handle_serve(config: Config) -> i32 {
    let state = match AppState::from_config(config) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            eprintln!("failed to load catalog: {err}");
            return 1;
        }
    };
    match server::run_server(state) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}
