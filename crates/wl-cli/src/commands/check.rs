use comfy_table::{ContentArrangement, Table};
use wl_fiction::GameConfig;

pub fn run(config: &GameConfig) -> Result<(), String> {
    let result = super::load(config);
    let tables = &result.tables;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Table", "Entries"]);
    table.add_row(vec!["aliases".to_string(), tables.commands.len().to_string()]);
    table.add_row(vec!["rooms".to_string(), tables.world.room_count().to_string()]);
    table.add_row(vec!["exits".to_string(), tables.world.exit_count().to_string()]);
    table.add_row(vec![
        "characters".to_string(),
        tables.characters.len().to_string(),
    ]);
    table.add_row(vec![
        "topics".to_string(),
        tables.characters.topics().count().to_string(),
    ]);
    table.add_row(vec![
        "combat rules".to_string(),
        tables.characters.combat_rules().count().to_string(),
    ]);

    println!("{table}");
    println!();

    if result.has_errors() {
        let errors = result.error_count();
        return Err(format!(
            "{errors} error{} in '{}'",
            if errors == 1 { "" } else { "s" },
            config.data_dir.display()
        ));
    }

    println!(
        "  All checks passed for '{}' ({} warnings).",
        config.data_dir.display(),
        result.warning_count()
    );
    Ok(())
}
