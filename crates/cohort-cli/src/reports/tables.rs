use cohort_core::checker::Satisfaction;
use cohort_core::model::{Element, Group};
use cohort_core::scorer::ConstraintPenalty;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn print_roster(groups: &[Group], elements: &[Element]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("Size"),
        Cell::new("Members"),
    ]);

    for group in groups {
        let members = group
            .members
            .iter()
            .map(|id| {
                elements
                    .iter()
                    .find(|e| &e.id == id)
                    .map(|e| e.name.as_str())
                    .unwrap_or(id.as_str())
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&group.name).add_attribute(Attribute::Bold),
            Cell::new(group.members.len()),
            Cell::new(members),
        ]);
    }

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}

pub fn print_penalties(details: &[ConstraintPenalty]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Constraint").add_attribute(Attribute::Bold),
        Cell::new("Raw"),
        Cell::new("Weight"),
        Cell::new("Penalty").fg(Color::Cyan),
    ]);

    for detail in details {
        table.add_row(vec![
            Cell::new(&detail.label),
            Cell::new(format!("{:.3}", detail.raw)),
            Cell::new(format!("{:.2}", detail.importance)),
            Cell::new(format!("{:.3}", detail.weighted())).fg(Color::Cyan),
        ]);
    }

    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let total: f64 = details.iter().map(|d| d.weighted()).sum();
    println!("\n{}", table);
    println!("Global penalty: {:.3}", total);
}

pub fn print_issues(satisfaction: &Satisfaction) {
    if satisfaction.satisfied {
        println!("\n✅ All constraints satisfied.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![Cell::new("Issue").add_attribute(Attribute::Bold)]);
    for issue in &satisfaction.issues {
        table.add_row(vec![Cell::new(issue).fg(Color::Yellow)]);
    }
    println!("\n⚠️  {} issue(s):\n{}", satisfaction.issues.len(), table);
}
