use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Context;
use instant::Instant;
use rap_core::RapConfig;

mod script;
mod session;

use session::Session;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let reader: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => Box::new(BufReader::new(
            File::open(&path).with_context(|| format!("opening script {path}"))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut session = Session::new(RapConfig::default()).context("building session")?;
    let started = Instant::now();
    let mut commands = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("reading script")?;
        let command = script::parse_line(&line)
            .with_context(|| format!("line {}: `{}`", index + 1, line.trim()))?;
        if let Some(command) = command {
            session.apply(&command);
            commands += 1;
        }
    }

    let snapshot = session.model.snapshot();
    log::info!(
        "ran {} commands in {:?}: tuple=({:.4}, {:.4}) target={:.4} fitness={:.3} tones={}",
        commands,
        started.elapsed(),
        snapshot.tuple.antecedent(),
        snapshot.tuple.consequent(),
        snapshot.target_ratio,
        snapshot.reading.fitness,
        session.tones_played
    );
    Ok(())
}
