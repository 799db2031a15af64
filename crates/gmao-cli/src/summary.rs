use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gmao_model::{Document, Intervention, InterventionStatus, Machine, MachineState, Part, Supplier};
use gmao_store::views::{Kpis, machine_name, supplier_name};

/// Everything the dashboard command shows.
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub today: NaiveDate,
    pub kpis: Kpis,
    pub upcoming_days: u64,
    pub upcoming: Vec<&'a Intervention>,
    pub threshold: f64,
    pub alerts: Vec<&'a Part>,
}

/// Format an amount in euros the French way: `1 234,50 €`.
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped},{:02} €", cents % 100)
}

pub fn suppliers_table(suppliers: &[&Supplier]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Contact"),
        header_cell("Email"),
        header_cell("Phone"),
    ]);
    apply_table_style(&mut table);
    for supplier in suppliers {
        table.add_row(vec![
            id_cell(supplier.id.as_str()),
            name_cell(&supplier.name),
            text_cell(&supplier.contact),
            text_cell(&supplier.email),
            text_cell(&supplier.phone),
        ]);
    }
    table
}

pub fn machines_table(document: &Document, machines: &[&Machine]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Ident"),
        header_cell("Cost"),
        header_cell("Supplier"),
        header_cell("State"),
        header_cell("Location"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for machine in machines {
        table.add_row(vec![
            id_cell(machine.id.as_str()),
            name_cell(&machine.name),
            Cell::new(&machine.ident),
            Cell::new(format_money(machine.cost)),
            text_cell(supplier_name(document, &machine.supplier_id)),
            machine_state_cell(&machine.state),
            text_cell(&machine.location),
        ]);
    }
    table
}

pub fn parts_table(document: &Document, parts: &[&Part]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Qty"),
        header_cell("Cost"),
        header_cell("Supplier"),
        header_cell("Location"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for part in parts {
        table.add_row(vec![
            id_cell(part.id.as_str()),
            name_cell(&part.name),
            qty_cell(part.qty),
            Cell::new(format_money(part.cost)),
            text_cell(supplier_name(document, &part.supplier_id)),
            text_cell(&part.location),
        ]);
    }
    table
}

pub fn interventions_table(document: &Document, interventions: &[&Intervention]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Date"),
        header_cell("Machine"),
        header_cell("Motif"),
        header_cell("Status"),
        header_cell("Tech"),
        header_cell("Min"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 6, CellAlignment::Right);
    for intervention in interventions {
        table.add_row(vec![
            id_cell(intervention.id.as_str()),
            Cell::new(&intervention.date),
            text_cell(machine_name(document, &intervention.machine_id)),
            Cell::new(&intervention.motif),
            status_cell(&intervention.status),
            text_cell(&intervention.tech),
            Cell::new(intervention.duration_min),
        ]);
    }
    table
}

/// Id and display name pairs offered for a foreign-key flag.
pub fn choices_table<'a>(rows: impl IntoIterator<Item = (&'a str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("ID"), header_cell("Name")]);
    apply_table_style(&mut table);
    for (id, label) in rows {
        table.add_row(vec![id_cell(id), name_cell(&label)]);
    }
    table
}

/// Upcoming interventions as shown on the dashboard.
pub fn upcoming_table(document: &Document, upcoming: &[&Intervention]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Status"),
        header_cell("Machine"),
        header_cell("Motif"),
    ]);
    apply_dashboard_style(&mut table);
    for intervention in upcoming {
        table.add_row(vec![
            Cell::new(&intervention.date).add_attribute(Attribute::Bold),
            status_cell(&intervention.status),
            text_cell(machine_name(document, &intervention.machine_id)),
            Cell::new(&intervention.motif),
        ]);
    }
    table
}

pub fn print_dashboard(document: &Document, dashboard: &Dashboard<'_>) {
    let mut kpis = Table::new();
    kpis.set_header(vec![
        header_cell("Machines"),
        header_cell("Parts"),
        header_cell("Interventions"),
    ]);
    apply_dashboard_style(&mut kpis);
    kpis.add_row(vec![
        kpi_cell(dashboard.kpis.machines),
        kpi_cell(dashboard.kpis.parts),
        kpi_cell(dashboard.kpis.interventions),
    ]);
    println!("{kpis}");

    println!();
    println!(
        "Upcoming interventions ({} to +{} days):",
        dashboard.today, dashboard.upcoming_days
    );
    if dashboard.upcoming.is_empty() {
        println!(
            "  No intervention in the next {} days.",
            dashboard.upcoming_days
        );
    } else {
        println!("{}", upcoming_table(document, &dashboard.upcoming));
    }

    println!();
    println!("Stock alerts (qty <= {}):", dashboard.threshold);
    if dashboard.alerts.is_empty() {
        println!("  No alert (threshold <= {}).", dashboard.threshold);
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Part"),
            header_cell("Qty"),
            header_cell("Supplier"),
            header_cell("Location"),
        ]);
        apply_dashboard_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for part in &dashboard.alerts {
            table.add_row(vec![
                name_cell(&part.name),
                Cell::new(part.qty).fg(Color::Red).add_attribute(Attribute::Bold),
                text_cell(supplier_name(document, &part.supplier_id)),
                text_cell(&part.location),
            ]);
        }
        println!("{table}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_dashboard_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn name_cell(name: &str) -> Cell {
    Cell::new(name).add_attribute(Attribute::Bold)
}

fn id_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::DarkGrey)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn qty_cell(qty: f64) -> Cell {
    if qty <= 0.0 {
        Cell::new(qty).fg(Color::Red)
    } else {
        Cell::new(qty)
    }
}

fn kpi_cell(count: usize) -> Cell {
    Cell::new(count)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Center)
}

fn machine_state_cell(state: &MachineState) -> Cell {
    let cell = Cell::new(state.as_str());
    match state {
        MachineState::Ok => cell.fg(Color::Green),
        MachineState::Maintenance => cell.fg(Color::Yellow),
        MachineState::Down => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        MachineState::Retired => cell.fg(Color::DarkGrey),
        MachineState::Other(_) => cell,
    }
}

fn status_cell(status: &InterventionStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        InterventionStatus::Planned => cell.fg(Color::Cyan),
        InterventionStatus::InProgress => cell.fg(Color::Yellow),
        InterventionStatus::Done => cell.fg(Color::Green),
        InterventionStatus::Cancelled => cell.fg(Color::DarkGrey),
        InterventionStatus::Other(_) => cell,
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
