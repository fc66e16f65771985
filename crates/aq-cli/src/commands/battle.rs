use colored::Colorize;

use aq_events::EventTick;

use super::Session;

pub fn run(session: &mut Session, won: bool) -> Result<(), String> {
    let report = session.battle_completed(won);

    if won {
        println!("  {} Win streak: {}", "Victory.".green().bold(), report.win_streak);
    } else {
        println!("  {} Streak lost.", "Defeat.".red().bold());
    }

    match &report.tick {
        EventTick::Idle => {}
        EventTick::Continued { remaining } => {
            println!("  {}", format!("World event continues: {remaining} battles left").dimmed());
        }
        EventTick::Expired(event) => {
            println!("  {} {} has ended.", event.icon, event.name.bold());
        }
    }

    if let Some(event) = &report.started {
        println!();
        println!("  {}", "A world event begins!".yellow().bold());
        super::print_event(event);
    }
    Ok(())
}

pub fn die(session: &mut Session) -> Result<(), String> {
    println!("  {}", "You have fallen.".red().bold());
    if let Some(event) = session.player_died() {
        println!("  {} {} fades with you.", event.icon, event.name.bold());
    }
    Ok(())
}
