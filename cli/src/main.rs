use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use desmina_core::{
    Axis, Board, BoardConfig, Difficulty, GridPos, Phase, RandomMinefield, Tile, cell_index,
};

#[derive(Parser, Debug)]
#[command(name = "desmina", about = "Terminal mine-sweeping puzzle", version)]
struct Args {
    /// Grid width in tiles.
    #[arg(short = 'W', long, default_value_t = 10)]
    width: Axis,

    /// Grid height in tiles.
    #[arg(short = 'H', long, default_value_t = 10)]
    height: Axis,

    /// Mine density preset.
    #[arg(short, long, value_enum, default_value_t = Preset::Normal)]
    difficulty: Preset,

    /// Fixed layout seed; omit for a fresh board every run.
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Easy,
    Normal,
    Hard,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Easy => Difficulty::Easy,
            Preset::Normal => Difficulty::Normal,
            Preset::Hard => Difficulty::Hard,
        }
    }
}

enum Command {
    Reveal(usize),
    Flag(usize),
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let config = BoardConfig::from_difficulty((args.width, args.height), args.difficulty.into());
    let mut board = Board::new(config);
    log::info!("new {}x{} board with {} mines", board.width(), board.height(), board.mine_count());
    println!("Commands: r X Y reveals, f X Y flags, q quits. Mines are placed on the first reveal.");

    let stdin = io::stdin();
    while !board.phase().is_over() {
        print_board(&board);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            return Ok(());
        };
        let line = line.context("reading command")?;
        match parse_command(&line, board.size()) {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Reveal(index)) => {
                if board.phase().is_initial() {
                    match args.seed {
                        Some(seed) => {
                            board.begin_round_with(RandomMinefield::new(seed).exclude(index))
                        }
                        None => board.begin_round(index),
                    };
                }
                board.reveal(index);
            }
            Ok(Command::Flag(index)) => {
                board.toggle_flag(index);
            }
            Err(message) => println!("{message}"),
        }
    }

    print_board(&board);
    match board.phase() {
        Phase::Win => println!("Cleared!"),
        Phase::Lose => {
            if let Some(tile) = board.failed_tile() {
                let (x, y) = tile.position();
                println!("Boom, mine at {x} {y}.");
            }
        }
        Phase::Initial | Phase::Playing => {}
    }
    Ok(())
}

fn parse_command(line: &str, size: GridPos) -> std::result::Result<Command, String> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => Err("enter a command".into()),
        Some("q") | Some("quit") => Ok(Command::Quit),
        Some(verb @ ("r" | "f")) => {
            let mut coord = || {
                parts
                    .next()
                    .and_then(|part| part.parse::<Axis>().ok())
                    .ok_or_else(|| format!("usage: {verb} X Y"))
            };
            let (x, y) = (coord()?, coord()?);
            if x >= size.0 || y >= size.1 {
                return Err(format!("{x} {y} is outside the {}x{} grid", size.0, size.1));
            }
            let index = cell_index((x, y), size.0);
            Ok(match verb {
                "r" => Command::Reveal(index),
                _ => Command::Flag(index),
            })
        }
        Some(other) => Err(format!("unknown command {other:?}")),
    }
}

fn print_board(board: &Board) {
    let width = board.width() as usize;
    print!("\n    ");
    for x in 0..board.width() {
        print!(" {}", x % 10);
    }
    println!();
    for (i, tile) in board.tiles().enumerate() {
        if i % width == 0 {
            print!("{:>3} ", i / width);
        }
        print!(" {}", glyph(board, tile));
        if i % width == width - 1 {
            println!();
        }
    }
    println!("    mines: {}  covered: {}", board.mine_count(), board.covered_tiles());
}

fn glyph(board: &Board, tile: &Tile) -> char {
    let failed = board.failed_tile().map(Tile::position) == Some(tile.position());
    if failed {
        '*'
    } else if tile.is_crossed() {
        'x'
    } else if tile.is_flagged() {
        'F'
    } else if tile.is_covered() {
        '#'
    } else if tile.is_mine() {
        '@'
    } else {
        match tile.near_mines() {
            0 => '.',
            n => (b'0' + n) as char,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_to_linear_indices() {
        assert!(matches!(parse_command("r 3 2", (10, 10)), Ok(Command::Reveal(23))));
        assert!(matches!(parse_command("f 0 0", (10, 10)), Ok(Command::Flag(0))));
        assert!(matches!(parse_command("q", (10, 10)), Ok(Command::Quit)));
    }

    #[test]
    fn malformed_commands_are_rejected() {
        assert!(parse_command("r 3", (10, 10)).is_err());
        assert!(parse_command("r 10 0", (10, 10)).is_err());
        assert!(parse_command("open 1 1", (10, 10)).is_err());
        assert!(parse_command("", (10, 10)).is_err());
    }
}
