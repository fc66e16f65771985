use colored::Colorize;

use super::Session;

pub fn milestone(session: &mut Session, level: u32) -> Result<(), String> {
    match session.check_milestone(level) {
        Some(narration) => {
            println!("  {} {}", format!("Level {}:", narration.level).bold(), narration.title.bold());
            println!("  {}: \"{}\"", narration.narrator.display_name(), narration.text);
        }
        None => println!("  {}", format!("Nothing new at level {level}.").dimmed()),
    }
    Ok(())
}

pub fn tutorial(session: &mut Session, id: &str) -> Result<(), String> {
    match session.check_tutorial(id) {
        Some(line) => super::print_line(&line),
        None => println!("  {}", format!("Nothing to show for '{id}'.").dimmed()),
    }
    Ok(())
}
