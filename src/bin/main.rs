use std::io::{self, Write};
use std::time;

use clap::{Arg, Command};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use checkers::game::Game;
use checkers::position::{Position, Side, Square};
use checkers::search::{self, Difficulty, SearchOutcome, SearchSettings};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Engine matches are stopped after this many plies, since neither side may be able to force a win
const MAX_MATCH_PLIES: usize = 200;

fn main() -> io::Result<()> {
    let matches = Command::new("Checkers engine")
        .version("0.1")
        .arg(
            Arg::new("difficulty")
                .short('d')
                .long("difficulty")
                .env("DIFFICULTY")
                .help("Engine strength")
                .num_args(1)
                .default_value("medium")
                .value_parser(["easy", "medium", "hard"]),
        )
        .arg(
            Arg::new("engineSide")
                .long("engine-side")
                .env("ENGINE_SIDE")
                .help("The side played by the engine")
                .num_args(1)
                .default_value("black")
                .value_parser(["red", "black"]),
        )
        .arg(
            Arg::new("position")
                .long("position")
                .env("POSITION")
                .value_name("1r1r1r1r/r1r1r1r1/1r1r1r1r/8/8/b1b1b1b1/1b1b1b1b/b1b1b1b1")
                .help("Start from this position instead of the initial position. Row 0 comes first")
                .num_args(1),
        )
        .arg(
            Arg::new("toMove")
                .long("to-move")
                .env("TO_MOVE")
                .help("Side to move in the starting position")
                .num_args(1)
                .default_value("red")
                .value_parser(["red", "black"]),
        )
        .arg(
            Arg::new("logfile")
                .short('l')
                .long("logfile")
                .env("LOGFILE")
                .value_name("checkers.log")
                .help("Name of debug logfile")
                .num_args(1),
        )
        .get_matches();

    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    if let Some(log_file) = matches.get_one::<String>("logfile") {
        log_dispatcher
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Debug)
                    .chain(fern::log_file(log_file)?),
            )
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Warn)
                    .chain(io::stderr()),
            )
            .apply()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?
    } else {
        log_dispatcher
            .level(log::LevelFilter::Warn)
            .chain(io::stderr())
            .apply()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?
    }

    let difficulty: Difficulty = parse_arg(&matches, "difficulty")?;
    let engine_side: Side = parse_arg(&matches, "engineSide")?;
    let side_to_move: Side = parse_arg(&matches, "toMove")?;
    let start_position = match matches.get_one::<String>("position") {
        Some(fen) => Position::from_fen(fen)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?,
        None => Position::start_position(),
    };
    let settings = SearchSettings::default()
        .difficulty(difficulty)
        .maximizing_side(engine_side);
    info!(
        "Starting with difficulty {}, engine playing {}",
        difficulty, engine_side
    );

    println!("play: Play against the engine through the command line");
    println!("aimatch <red difficulty> <black difficulty>: Watch the engine play against itself");
    println!("analyze: Search the starting position, and print the engine's move");
    println!("perft <depth>: Generate perft numbers of the starting position");
    loop {
        let mut input = String::new();
        let bytes_read = io::stdin().read_line(&mut input)?;
        if bytes_read == 0 {
            break;
        }
        let words = input.split_whitespace().collect::<Vec<_>>();
        if words.is_empty() {
            continue;
        }
        match words[0] {
            "play" => {
                let game = Game::from_position(start_position, side_to_move, settings.clone());
                play_human(game)?;
            }
            "aimatch" => {
                let red = words.get(1).map(|s| s.parse()).unwrap_or(Ok(difficulty));
                let black = words.get(2).map(|s| s.parse()).unwrap_or(Ok(difficulty));
                match (red, black) {
                    (Ok(red), Ok(black)) => engine_match(start_position, side_to_move, red, black)?,
                    (Err(err), _) | (_, Err(err)) => println!("{}", err),
                }
            }
            "analyze" => analyze_position(&start_position, side_to_move, &settings),
            "perft" => match words.get(1).map(|s| s.parse::<u16>()) {
                Some(Ok(depth)) => perft(&start_position, side_to_move, depth),
                Some(Err(err)) => println!("Invalid depth: {}", err),
                None => perft(&start_position, side_to_move, 8),
            },
            s => println!("Unknown option \"{}\"", s),
        }
    }
    Ok(())
}

fn parse_arg<T>(matches: &clap::ArgMatches, name: &str) -> io::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    matches
        .get_one::<String>(name)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("Missing {}", name)))?
        .parse()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

/// Reads two square numbers separated by whitespace, like "11 15"
fn parse_square_pair(input: &str) -> Option<(Square, Square)> {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.len() != 2 {
        return None;
    }
    let from = Square::from_number(words[0].parse().ok()?)?;
    let to = Square::from_number(words[1].parse().ok()?)?;
    Some((from, to))
}

/// Play a game against the engine through stdin
fn play_human(mut game: Game) -> io::Result<()> {
    let reader = io::stdin();
    loop {
        println!("Position:\n{:?}", game.position());
        if let Some(result) = game.result() {
            println!("Game over, {}! Moves played: {}", result, game.moves().len());
            return Ok(());
        }
        if game.is_engine_turn() {
            println!("Engine is thinking...");
            let start_time = time::Instant::now();
            let outcome = game.spawn_engine_search().join().map_err(|_| {
                io::Error::new(io::ErrorKind::Other, "Engine search thread panicked")
            })?;
            let (score, nodes) = match &outcome {
                SearchOutcome::Move { score, nodes, .. } => (*score, *nodes),
                SearchOutcome::NoLegalMoves => (0, 0),
            };
            match game.apply_engine_move(outcome) {
                Ok(Some(mv)) => println!(
                    "Computer played {} with score {}, {} nodes in {:.2}s",
                    mv,
                    score,
                    nodes,
                    start_time.elapsed().as_secs_f32()
                ),
                Ok(None) => println!("Computer has no legal moves"),
                Err(err) => println!("Computer move rejected: {}", err),
            }
        } else {
            println!(
                "{} to move. Type your move (11-15, 9x18x27 or \"11 15\"):",
                game.side_to_move()
            );
            let mut input = String::new();
            if reader.read_line(&mut input)? == 0 {
                return Ok(());
            }
            let result = match parse_square_pair(&input) {
                Some((from, to)) => game.play_human(from, to),
                None => game.play_notation(&input),
            };
            if let Err(err) = result {
                println!("{}, try again.", err);
                let legal_moves: Vec<String> =
                    game.legal_moves().iter().map(|mv| mv.to_string()).collect();
                println!("Legal moves: {}", legal_moves.join(", "));
            }
        }
    }
}

fn engine_match(
    mut position: Position,
    mut side_to_move: Side,
    red: Difficulty,
    black: Difficulty,
) -> io::Result<()> {
    println!("Red {} vs black {}", red, black);
    let red_settings = SearchSettings::default()
        .difficulty(red)
        .maximizing_side(Side::Red);
    let black_settings = SearchSettings::default()
        .difficulty(black)
        .maximizing_side(Side::Black);
    let mut rng = SmallRng::from_entropy();
    let mut moves = vec![];

    while moves.len() < MAX_MATCH_PLIES {
        let settings = match side_to_move {
            Side::Red => &red_settings,
            Side::Black => &black_settings,
        };
        match search::best_move_with_rng(&position, side_to_move, settings, &mut rng) {
            SearchOutcome::Move {
                mv, score, random, ..
            } => {
                print!(
                    "{:8}: {}{}, ",
                    mv.to_string(),
                    score,
                    if random { " (random)" } else { "" }
                );
                io::stdout().flush()?;
                position.do_move(&mv);
                moves.push(mv);
                side_to_move = !side_to_move;
            }
            SearchOutcome::NoLegalMoves => break,
        }
    }
    println!();

    for (ply, mv) in moves.iter().enumerate() {
        if ply % 2 == 0 {
            print!("{}. {} ", ply / 2 + 1, mv);
        } else {
            println!("{}", mv);
        }
    }
    println!();

    match position.game_result(side_to_move) {
        Some(result) => println!("\n{:?}\nResult: {}", position, result),
        None => println!(
            "\n{:?}\nNo result after {} plies",
            position, MAX_MATCH_PLIES
        ),
    }
    Ok(())
}

fn analyze_position(position: &Position, side_to_move: Side, settings: &SearchSettings) {
    println!("{:?}", position);
    let start_time = time::Instant::now();
    match search::best_move(position, side_to_move, settings) {
        SearchOutcome::Move {
            mv,
            score,
            nodes,
            random,
        } => println!(
            "{} plays {}{} with score {}, {} nodes in {:.2}s",
            side_to_move,
            mv,
            if random { " (random)" } else { "" },
            score,
            nodes,
            start_time.elapsed().as_secs_f32()
        ),
        SearchOutcome::NoLegalMoves => println!("{} has no legal moves", side_to_move),
    }
}

fn perft(position: &Position, side_to_move: Side, max_depth: u16) {
    for depth in 0..=max_depth {
        let start_time = time::Instant::now();
        let result = position.perft(side_to_move, depth);
        println!(
            "{}: {}, {:.2}s, {:.1} Mnps",
            depth,
            result,
            start_time.elapsed().as_secs_f32(),
            result as f32 / start_time.elapsed().as_micros().max(1) as f32
        );
    }
}
