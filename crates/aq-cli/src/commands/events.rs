use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Session;

pub fn run(session: &mut Session, start: Option<&str>) -> Result<(), String> {
    if let Some(id) = start {
        let event = session
            .start_event(id)
            .ok_or_else(|| format!("unknown world event '{id}'"))?
            .clone();
        println!("  {}", "World event started.".yellow().bold());
        super::print_event(&event);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Event", "Type", "Battles", "Effects", "Narrator"]);
    for def in session.events().all() {
        let effects: Vec<String> = def.effects.iter().map(ToString::to_string).collect();
        table.add_row(vec![
            def.id.to_string(),
            format!("{} {}", def.icon, def.name),
            def.category.to_string(),
            def.duration.to_string(),
            effects.join(", "),
            def.narrator.display_name().to_string(),
        ]);
    }
    println!("{table}");
    println!();

    match session.document().active_event.active() {
        Some(event) => super::print_event(event),
        None => println!("  {}", "No world event running.".dimmed()),
    }
    Ok(())
}
