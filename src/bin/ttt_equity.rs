//! Tic-tac-toe poker equity calculator.
//!
//! Usage:
//!   cargo run --release --bin ttt_equity -- [OPTIONS] [REQUEST]
//!
//! With a REQUEST JSON file, computes that request once. Without one, prompts
//! for players, hole cards, board rows, dead cards and trial count on stdin,
//! repeating until end of input.
//!
//! Options:
//!   --config <FILE>      Engine configuration JSON file (optional)
//!   --trials <N>         Number of trials (default: 10000)
//!   --seed <N>           Random seed (optional)
//!   --threads <N>        Number of threads (default: auto)
//!   --batch-size <N>     Trials per worker batch
//!   --output <FILE>      Also save the result as JSON
//!   --fast               Use the fast configuration preset
//!   --precise            Use the precise configuration preset

use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::atomic::AtomicBool;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use tictactoe_equity::equity::{
    parse_hand, DealSampler, EquityConfig, EquityEngine, EquityError, EquityRequest, EquityResult,
    HOLE_CARDS,
};
use tictactoe_equity::game::{BoardSpec, Card, CardSpec, HandEvaluator};

const MIN_PLAYERS: usize = 2;
const MAX_PLAYERS: usize = 10;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config_file: Option<String> = None;
    let mut request_file: Option<String> = None;
    let mut trials: Option<u64> = None;
    let mut seed: Option<u64> = None;
    let mut threads: usize = 0;
    let mut batch_size: Option<u64> = None;
    let mut output_file: Option<String> = None;
    let mut preset: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" | "-c" => {
                i += 1;
                config_file = Some(flag_value(flag, args.get(i)));
            }
            "--trials" | "-n" => {
                i += 1;
                trials = Some(flag_value(flag, args.get(i)));
            }
            "--seed" | "-s" => {
                i += 1;
                seed = Some(flag_value(flag, args.get(i)));
            }
            "--threads" | "-t" => {
                i += 1;
                threads = flag_value(flag, args.get(i));
            }
            "--batch-size" => {
                i += 1;
                batch_size = Some(flag_value(flag, args.get(i)));
            }
            "--output" | "-o" => {
                i += 1;
                output_file = Some(flag_value(flag, args.get(i)));
            }
            "--fast" | "-f" => preset = Some("fast"),
            "--precise" | "-p" => preset = Some("precise"),
            "--help" | "-h" => {
                print_help();
                return;
            }
            arg if !arg.starts_with('-') && request_file.is_none() => {
                request_file = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    let mut config = if let Some(path) = &config_file {
        match EquityConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match preset {
            Some("fast") => EquityConfig::fast(),
            Some("precise") => EquityConfig::precise(),
            _ => EquityConfig::default(),
        }
    };
    if let Some(n) = trials {
        config = config.with_trials(n);
    }
    if let Some(s) = seed {
        config = config.with_seed(s);
    }
    if threads > 0 {
        config = config.with_threads(threads);
    }
    if let Some(b) = batch_size {
        config = config.with_batch_size(b);
    }
    debug!("Engine configuration: {:?}", config);

    match request_file {
        Some(path) => {
            let request = match EquityRequest::from_json_file(&path) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("Error loading request {}: {}", path, e);
                    std::process::exit(1);
                }
            };
            match answer(&request, &config) {
                Ok(result) => {
                    report(&request, &result);
                    save_output(&result, output_file.as_deref());
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => interactive(config, output_file.as_deref()),
    }
}

fn print_help() {
    println!("Tic-tac-toe poker equity calculator");
    println!();
    println!("Usage: ttt_equity [OPTIONS] [REQUEST]");
    println!();
    println!("Arguments:");
    println!("  [REQUEST]            Request JSON file; prompts on stdin when omitted");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>  Engine configuration JSON file");
    println!("  -n, --trials <N>     Number of trials (default: 10000)");
    println!("  -s, --seed <N>       Random seed for reproducible results");
    println!("  -t, --threads <N>    Number of threads (default: auto)");
    println!("      --batch-size <N> Trials per worker batch");
    println!("  -o, --output <FILE>  Also save the result as JSON");
    println!("  -f, --fast           Use the fast configuration preset");
    println!("  -p, --precise        Use the precise configuration preset");
    println!("  -h, --help           Print help");
}

/// Parse the value following a flag.
fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

/// Like `parse_value`, but exits on a bad value.
fn flag_value<T: FromStr>(flag: &str, value: Option<&String>) -> T {
    match parse_value(flag, value) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    }
}

fn street_summary(board: &BoardSpec) -> String {
    match board.street() {
        Some(street) => format!("Board dealt through the {}", street),
        None => "Board not yet dealt".to_string(),
    }
}

/// Each player's best hand and the line it uses, once every card is known.
fn best_hand_summary(request: &EquityRequest) -> Option<Vec<String>> {
    if !request.wildcard_slots().is_empty() {
        return None;
    }
    let deal = DealSampler::new(request).ok()?.template();
    let eval = HandEvaluator::new();
    let summary = deal
        .hands()
        .iter()
        .enumerate()
        .map(|(i, hole)| {
            let best = eval.best_hand_detail(hole, deal.board());
            let cells: Vec<String> = best.line_cells().iter().map(|c| c.to_string()).collect();
            format!("Player {}: {} on {}", i + 1, best, cells.join("-"))
        })
        .collect();
    Some(summary)
}

fn report(request: &EquityRequest, result: &EquityResult) {
    println!("{}", street_summary(&request.board));
    println!("{}", result);
    if let Some(hands) = best_hand_summary(request) {
        println!("Best hands:");
        for line in hands {
            println!("    {}", line);
        }
    }
}

/// Run one request with a progress bar.
fn answer(request: &EquityRequest, config: &EquityConfig) -> Result<EquityResult, EquityError> {
    let engine = EquityEngine::new(config.clone());

    let pb = ProgressBar::new(config.trials);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} trials ({eta})",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }

    let cancel = AtomicBool::new(false);
    let result = engine.run_with_progress(request, &cancel, |done| pb.set_position(done));
    pb.finish_and_clear();
    result
}

fn save_output(result: &EquityResult, path: Option<&str>) {
    if let Some(path) = path {
        match result.save_json(path) {
            Ok(()) => println!("Result saved to: {}", path),
            Err(e) => eprintln!("Error saving result: {}", e),
        }
    }
}

// ============================================================================
// Interactive prompt
// ============================================================================

fn interactive(config: EquityConfig, output_file: Option<&str>) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some((request, trials)) = prompt_request(&mut lines) else {
            return;
        };
        match answer(&request, &config.clone().with_trials(trials)) {
            Ok(result) => {
                report(&request, &result);
                println!();
                save_output(&result, output_file);
            }
            Err(e) => eprintln!("Error: {}\n", e),
        }
    }
}

/// Print a prompt and read one line; `None` at end of input.
fn ask<I: Iterator<Item = io::Result<String>>>(lines: &mut I, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}

/// Check newly entered cards against those entered before, then remember them.
fn claim_cards(specs: &[CardSpec], used: &mut u64) -> Result<(), String> {
    let mut mask = *used;
    for card in specs.iter().filter_map(|s| s.card()) {
        if mask & card.bit() != 0 {
            return Err(format!("{} appearing more than once.", card));
        }
        mask |= card.bit();
    }
    *used = mask;
    Ok(())
}

/// Ask for a full request; `None` at end of input.
fn prompt_request<I: Iterator<Item = io::Result<String>>>(
    lines: &mut I,
) -> Option<(EquityRequest, u64)> {
    let num_players = loop {
        let answer = ask(lines, &format!("Number of players ({}-{})? ", MIN_PLAYERS, MAX_PLAYERS))?;
        match answer.parse::<usize>() {
            Ok(n) if (MIN_PLAYERS..=MAX_PLAYERS).contains(&n) => break n,
            _ => println!("Not a valid number"),
        }
    };

    println!();
    println!("Format e.g.: 'As' for ace of spades, '5c' for 5 of clubs, 'Th' for 10(ten) of hearts. Without the quotes.");
    println!("Use * for an unknown or undealt card.");
    println!("Separate each card with a comma.");
    println!();

    let mut used = 0u64;

    let mut players = Vec::with_capacity(num_players);
    for player in 0..num_players {
        loop {
            let line = ask(lines, &format!("Player {} hole cards: ", player + 1))?;
            let hand = match parse_hand(&line, player) {
                Ok(hand) => hand,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            match claim_cards(&hand, &mut used) {
                Ok(()) => {
                    players.push(hand);
                    break;
                }
                Err(msg) => println!("{}", msg),
            }
        }
    }

    let mut rows: Vec<CardSpec> = Vec::with_capacity(9);
    for row in 0..3 {
        loop {
            let line = ask(lines, &format!("Board row {}: ", row + 1))?;
            let specs = match CardSpec::parse_many(&line) {
                Ok(specs) if specs.len() == 3 => specs,
                Ok(_) => {
                    println!("Wrong number of cards.");
                    continue;
                }
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            match claim_cards(&specs, &mut used) {
                Ok(()) => {
                    rows.extend(specs);
                    break;
                }
                Err(msg) => println!("{}", msg),
            }
        }
    }
    let board = match <[CardSpec; 9]>::try_from(rows) {
        Ok(cells) => BoardSpec::new(cells),
        Err(_) => return None,
    };

    let dead: Vec<Card> = loop {
        let line = ask(lines, "Dead cards: ")?;
        let specs = match CardSpec::parse_many(&line) {
            Ok(specs) => specs,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if specs.iter().any(|s| s.is_wildcard()) {
            println!("Dead cards must be known cards.");
            continue;
        }
        match claim_cards(&specs, &mut used) {
            Ok(()) => break specs.iter().filter_map(|s| s.card()).collect(),
            Err(msg) => println!("{}", msg),
        }
    };

    let trials = loop {
        let answer = ask(lines, "Number of trials? ")?;
        match answer.parse::<u64>() {
            Ok(n) if n > 0 => break n,
            _ => println!("Not a valid number"),
        }
    };

    debug!(
        "Prompted request: {} players with {} hole cards each, {} dead cards",
        num_players,
        HOLE_CARDS,
        dead.len()
    );
    Some((EquityRequest::new(players, board).with_dead(dead), trials))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_parse_value_rejects_bad_numbers() {
        assert_eq!(parse_value::<u64>("--trials", Some(&arg("5000"))), Ok(5000));
        assert!(parse_value::<u64>("--trials", Some(&arg("lots"))).is_err());
        assert!(parse_value::<u64>("--seed", Some(&arg("-3"))).is_err());
        assert!(parse_value::<usize>("--threads", Some(&arg("four"))).is_err());
        let missing = parse_value::<u64>("--trials", None).unwrap_err();
        assert!(missing.contains("--trials"));
    }

    #[test]
    fn test_street_summary() {
        let flop = BoardSpec::parse("Ah * Kd * * * 2c * 3s").unwrap();
        assert_eq!(street_summary(&flop), "Board dealt through the Flop");
        assert_eq!(street_summary(&BoardSpec::unknown()), "Board not yet dealt");
    }

    #[test]
    fn test_best_hand_summary_names_line() {
        let req = EquityRequest::parse(
            &["Ah Kh 2c 3d", "9s 9d 6c 6h"],
            "Qh Jh Th 9c 4s 4d 2s 3s 5c",
        )
        .unwrap();
        let hands = best_hand_summary(&req).unwrap();
        assert_eq!(hands.len(), 2);
        assert!(hands[0].starts_with("Player 1: "));
        assert!(hands[0].ends_with("on r1c1-r1c2-r1c3"), "{}", hands[0]);

        let open = EquityRequest::parse(&["Ah Kh * *", "* * * *"], "* * * * * * * * *").unwrap();
        assert!(best_hand_summary(&open).is_none());
    }
}
