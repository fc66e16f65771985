use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use aq_core::{AffinityRecord, NpcId, Stat};

use super::Session;

pub fn run(session: &Session, npc: Option<&str>) -> Result<(), String> {
    match npc {
        Some(name) => show_one(session, super::parse_npc(name)?),
        None => show_all(session),
    }
}

fn show_all(session: &Session) -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["NPC".to_string()];
    header.extend(Stat::ALL.iter().map(|s| s.to_string()));
    header.push("Standing".to_string());
    table.set_header(header);

    for (npc, record) in session.document().relationships() {
        let mut row = vec![format!("{} {}", npc.display_name(), npc.title())];
        row.extend(Stat::ALL.iter().map(|s| record.get(*s).to_string()));
        row.push(record.tier().to_string());
        table.add_row(row);
    }

    println!("{table}");
    println!();
    match session.document().active_event.active() {
        Some(event) => super::print_event(event),
        None => println!("  {}", "No world event running.".dimmed()),
    }
    Ok(())
}

fn show_one(session: &Session, npc: NpcId) -> Result<(), String> {
    let record = session
        .record(npc)
        .ok_or_else(|| format!("no record for {npc}"))?;

    println!(
        "  {} {} {}",
        npc.display_name().bold(),
        npc.title(),
        format!("[{}]", record.tier()).dimmed()
    );
    println!();
    for stat in Stat::ALL {
        println!("  {:<10} {}", stat.as_str(), bar(record.get(stat)));
    }

    print_history(record);
    Ok(())
}

fn print_history(record: &AffinityRecord) {
    if let Some(at) = record.last_interaction {
        println!();
        println!("  Last spoke: {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    if !record.conversations_had.is_empty() {
        println!();
        println!("  {}", "Conversations".bold().underline());
        for id in &record.conversations_had {
            println!("    {id}");
        }
    }
    if !record.choices_made.is_empty() {
        println!();
        println!("  {}", "Choices".bold().underline());
        for (point, option) in &record.choices_made {
            println!("    {point}: {option}");
        }
    }
    if !record.memory_events.is_empty() {
        println!();
        println!("  {}", "Remembers".bold().underline());
        for tag in &record.memory_events {
            println!("    {tag}");
        }
    }
}

fn bar(value: i32) -> String {
    let filled = usize::try_from(value / 5).unwrap_or(0);
    let empty = 20usize.saturating_sub(filled);
    format!(
        "[{}{}] {:>3}",
        "#".repeat(filled).green(),
        "-".repeat(empty),
        value
    )
}
