use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use softkeys::geometry::{ResolutionWarning, ResolvedLayout};
use softkeys::session::{Emitted, KeyboardSession};

pub fn print_layout_summary(name: &str, layout: &ResolvedLayout) {
    println!(
        "\nLayout: {} ({} rows, {} keys, {} x {} logical units)",
        name,
        layout.rows.len(),
        layout.key_count(),
        layout.total_width(),
        layout.total_height
    );
}

pub fn print_key_table(layout: &ResolvedLayout) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Row"),
        Cell::new("Label").fg(Color::Cyan),
        Cell::new("Code"),
        Cell::new("Long"),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new("W"),
        Cell::new("H"),
        Cell::new("Gap"),
        Cell::new("Flags"),
    ]);

    for i in 5..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for k in &layout.keys {
        let mut flags = Vec::new();
        if k.is_repeatable {
            flags.push("repeat");
        }
        if k.is_modifier {
            flags.push("mod");
        }
        if k.command().is_some() {
            flags.push("cmd");
        }

        let long = match (k.long_press_code, k.long_press_label.is_empty()) {
            (Some(code), _) => code.to_string(),
            (None, false) => k.long_press_label.clone(),
            (None, true) => String::new(),
        };

        table.add_row(vec![
            Cell::new(k.id).add_attribute(Attribute::Bold),
            Cell::new(k.row),
            Cell::new(&k.label).fg(Color::Cyan),
            Cell::new(k.code.map_or(String::new(), |c| c.to_string())),
            Cell::new(long),
            Cell::new(format!("{:.1}", k.x)),
            Cell::new(format!("{:.1}", k.y)),
            Cell::new(format!("{:.1}", k.width)),
            Cell::new(format!("{:.1}", k.height)),
            Cell::new(format!("{:.1}", k.gap)),
            Cell::new(flags.join(",")),
        ]);
    }
    println!("{}", table);
}

pub fn print_warnings(warnings: &[ResolutionWarning]) {
    if warnings.is_empty() {
        println!("✅ No geometry warnings.");
        return;
    }
    println!("⚠️  {} geometry warning(s):", warnings.len());
    for w in warnings {
        println!("   - {}", w);
    }
}

pub fn print_emitted(emitted: &[Emitted]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Kind"),
        Cell::new("Value").fg(Color::Cyan),
        Cell::new("Mask"),
    ]);

    for (i, e) in emitted.iter().enumerate() {
        let (kind, value, mask) = match e {
            Emitted::Key(ev) => (
                "key",
                format!("{} {:?}", ev.key_code, ev.label),
                format!("{:#x}", ev.modifier_mask.bits()),
            ),
            Emitted::Text(t) => ("text", format!("{:?}", t), String::new()),
            Emitted::Command(c) => ("command", c.to_string(), String::new()),
        };
        table.add_row(vec![
            Cell::new(i),
            Cell::new(kind),
            Cell::new(value).fg(Color::Cyan),
            Cell::new(mask),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_session_state(session: &KeyboardSession) {
    println!("Active layout: {}", session.layouts().active_name());

    let history: Vec<String> = session
        .clipboard()
        .values()
        .flatten()
        .map(|v| format!("{:?}", v))
        .collect();
    if !history.is_empty() {
        println!("Clipboard: {}", history.join(", "));
    }

    if let Some(w) = session.floating() {
        println!(
            "Floating window: {:.0}x{:.0} at ({:.0}, {:.0})",
            w.width, w.height, w.x, w.y
        );
    }
}
