use colored::Colorize;

use super::Session;

pub fn run(session: &mut Session) -> Result<(), String> {
    session.reset();
    println!("  {} Everyone has forgotten you.", "Save reset.".bold());
    Ok(())
}
