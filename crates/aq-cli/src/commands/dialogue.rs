use colored::Colorize;

use aq_core::Stat;

use super::Session;

pub fn talk(session: &mut Session, npc: &str, node: &str) -> Result<(), String> {
    let npc = super::parse_npc(npc)?;
    let line = session
        .talk(npc, node)
        .ok_or_else(|| format!("{} has nothing to say at '{node}'", npc.display_name()))?;
    super::print_line(&line);
    Ok(())
}

pub fn choose(session: &mut Session, node: &str, choice: &str) -> Result<(), String> {
    let (npc, before) = session
        .dialogue()
        .get(node)
        .and_then(|n| session.record(n.npc).map(|r| (n.npc, r.clone())))
        .ok_or_else(|| format!("unknown dialogue node '{node}'"))?;

    let after = session
        .choose(node, choice)
        .ok_or_else(|| format!("choice '{choice}' is not available at '{node}'"))?;

    println!("  {} chose {}", "You".bold(), choice.cyan());
    for stat in Stat::ALL {
        let delta = after.get(stat) - before.get(stat);
        if delta > 0 {
            println!("    {} {}", stat, format!("+{delta}").green());
        } else if delta < 0 {
            println!("    {} {}", stat, delta.to_string().red());
        }
    }
    for tag in &after.memory_events {
        if !before.has_memory_event(tag) {
            println!("    {} will remember that ({tag})", npc.display_name());
        }
    }
    Ok(())
}
