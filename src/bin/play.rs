//! Interactive terminal client for manually exercising the game engine.
//!
//! Not the HTTP façade (out of scope, §1) — a convenience wrapper around
//! the public API, the way the teacher crate's own `hosting`/`explore`
//! binaries sit alongside its library.

use chronoboard::corpus::{CorpusSource, Level, StaticCorpus};
use chronoboard::document::Document;
use chronoboard::engine::Game;
use chronoboard::entity::{Entity, EntityKind};
use chronoboard::relation::{PointRelation, Rel};
use clap::Parser;
use colored::Colorize;
use dialoguer::Select;

#[derive(Parser)]
#[command(author, version, about = "Play a temporal annotation episode from the terminal")]
struct Cli {
    /// Difficulty level (2-5); selects which demo document to load.
    #[arg(long, default_value_t = 3)]
    level: u8,
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    chronoboard::logging::init(cli.verbose);

    let level = match Level::try_from(cli.level) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("{}", format!("{err}").red());
            std::process::exit(1);
        }
    };

    let corpus = demo_corpus();
    let doc = match corpus.load(level) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{}", format!("{err}").red());
            std::process::exit(1);
        }
    };

    let mut game = Game::new(doc);
    println!("{}\n", game_context_banner());
    play(&mut game);
}

fn game_context_banner() -> String {
    "Assert a relation between two endpoints each turn. The board fills in as\n\
     inferences are drawn; a contradiction ends the game."
        .dimmed()
        .to_string()
}

fn play(game: &mut Game) {
    loop {
        render_board(game);
        let choices = ["Annotate a pair", "Undo", "Quit"];
        let choice = Select::new().with_prompt("Action").items(&choices).default(0).interact().unwrap_or(2);
        match choice {
            0 => annotate(game),
            1 => {
                let (_, _, restored) = game.undo();
                println!("{}", if restored { "undone".green() } else { "nothing to undo".yellow() });
            }
            _ => break,
        }
    }
}

fn annotate(game: &mut Game) {
    use chronoboard::UNCLASSIFIED;
    let mut labels = Vec::new();
    let mut coords = Vec::new();
    for &(i, j) in game.pairs().pairs().map(|(coord, _)| coord) {
        if game.board().get(i, j) != UNCLASSIFIED {
            continue;
        }
        let names = game.pairs().names_for(i, j).unwrap();
        labels.push(format!("({i},{j})  {} .. {}", names.0, names.1));
        coords.push((i, j));
    }
    if coords.is_empty() {
        println!("{}", "no orderable pairs left".yellow());
        return;
    }
    let pick = match Select::new().with_prompt("Pair").items(&labels).default(0).interact() {
        Ok(pick) => pick,
        Err(_) => return,
    };
    let symbols = ["<", ">", "=", "-"];
    let rel_pick = match Select::new().with_prompt("Relation").items(&symbols).default(0).interact() {
        Ok(pick) => pick,
        Err(_) => return,
    };
    let rel = Rel::parse(symbols[rel_pick].chars().next().unwrap()).expect("fixed menu of valid symbols");
    let (i, j) = coords[pick];
    match game.step(i, j, rel) {
        Ok(result) => {
            println!("reward {}", format_reward(result.reward));
            if result.terminated {
                println!(
                    "{}",
                    if result.info.is_success { "SOLVED".green().bold() } else { "CONTRADICTION".red().bold() }
                );
            }
        }
        Err(err) => eprintln!("{}", format!("{err}").red()),
    }
}

fn format_reward(reward: i64) -> String {
    match reward {
        r if r > 0 => format!("+{r}").green().to_string(),
        r if r < 0 => format!("{r}").red().to_string(),
        r => format!("{r}").dimmed().to_string(),
    }
}

fn render_board(game: &Game) {
    let labels: Vec<String> = game.endpoints().iter().map(|e| e.label()).collect();
    for (row, label) in labels.iter().enumerate() {
        let mut line = String::new();
        for col in 0..labels.len() {
            line.push_str(&render_cell(board_cell(game, row, col)));
            line.push(' ');
        }
        println!("{line:<40} {label}");
    }
}

fn board_cell(game: &Game, i: usize, j: usize) -> i32 {
    game.board().get(i, j)
}

fn render_cell(value: i32) -> String {
    use chronoboard::{MASKED, UNCLASSIFIED};
    match value {
        MASKED => ".".dimmed().to_string(),
        UNCLASSIFIED => "?".yellow().to_string(),
        0 => ">".to_string(),
        1 => "<".to_string(),
        2 => "=".to_string(),
        3 => "-".to_string(),
        _ => "!".red().to_string(),
    }
}

/// A small hand-authored document, registered at every level, so the
/// binary has something to load without real corpus I/O (out of scope).
fn demo_corpus() -> StaticCorpus {
    let text = "The meeting started before lunch and ended after the call.";
    let entities = vec![
        Entity::new("a", "The meeting", (0, 11), EntityKind::Interval),
        Entity::new("b", "lunch", (27, 32), EntityKind::Interval),
        Entity::new("c", "the call", (49, 57), EntityKind::Interval),
    ];
    let relations = vec![
        PointRelation::new("end e0", "start e1", Rel::Lt).unwrap(),
        PointRelation::new("end e0", "start e2", Rel::Gt).unwrap(),
    ];
    let doc = Document::new(text, entities, relations);
    StaticCorpus::new()
        .with(Level::Two, doc.clone())
        .with(Level::Three, doc.clone())
        .with(Level::Four, doc.clone())
        .with(Level::Five, doc)
}
