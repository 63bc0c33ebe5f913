use std::io::{self, BufRead, Write};

use colored::Colorize;
use wl_fiction::{Ending, FictionSession, GameConfig, SessionState};

pub fn run(config: &GameConfig) -> Result<(), String> {
    let tables = match super::load(config).into_tables() {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            return Err("cannot start the game".into());
        }
    };
    let mut session = FictionSession::new(tables, config.game_controller());

    println!("{}", session.start().bold());
    println!("  Type 'help' for commands, 'quit' to give up.");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("\n> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.strip_suffix('\n').unwrap_or(&line);
        let input = input.strip_suffix('\r').unwrap_or(input);

        let output = session.process(input).map_err(|e| e.to_string())?;
        match session.state() {
            SessionState::Running => println!("{output}"),
            SessionState::Ended(Ending::Won) => println!("{}", output.green().bold()),
            SessionState::Ended(Ending::Lost | Ending::Quit) => println!("{}", output.red()),
        }

        if session.is_over() {
            break;
        }
    }

    tracing::debug!(
        room = session.world().current_room_name(),
        items = ?session.inventory().items(),
        state = ?session.state(),
        "leaving wonderland"
    );
    Ok(())
}
