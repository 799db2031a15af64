use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use tracing::{info, info_span};

use gmao_model::{
    Collection, DATE_FORMAT, Intervention, InterventionStatus, Machine, MachineState, Part,
    Record, Supplier, Upserted,
};
use gmao_store::views::{
    kpis, list_interventions, list_machines, list_parts, list_suppliers, machine_choices,
    machine_label, stock_alerts, supplier_choices, upcoming_interventions,
};
use gmao_store::{Backend, Store, export_file_name, export_json};

use crate::cli::{
    DashboardArgs, ExportArgs, ImportArgs, InterventionCommand, InterventionFields,
    MachineCommand, MachineFields, PartCommand, PartFields, ResetArgs, SupplierCommand,
    SupplierFields,
};
use crate::settings::DashboardSettings;
use crate::summary::{
    Dashboard, choices_table, interventions_table, machines_table, parts_table, print_dashboard,
    suppliers_table,
};

pub fn run_supplier<B: Backend>(store: &mut Store<B>, command: &SupplierCommand) -> Result<()> {
    match command {
        SupplierCommand::Add(fields) => {
            let mut supplier = Supplier::new(String::new());
            apply_supplier_fields(&mut supplier, fields);
            save_record(store, supplier)
        }
        SupplierCommand::Edit { id, fields } => {
            let mut supplier = store.get::<Supplier>(id)?.clone();
            apply_supplier_fields(&mut supplier, fields);
            save_record(store, supplier)
        }
        SupplierCommand::List(args) => {
            let suppliers = list_suppliers(store.document(), &args.search);
            println!("{}", suppliers_table(&suppliers));
            println!("{} supplier(s)", suppliers.len());
            Ok(())
        }
        SupplierCommand::Choices => {
            let rows = supplier_choices(store.document())
                .into_iter()
                .map(|s| (s.id.as_str(), s.name.clone()));
            println!("{}", choices_table(rows));
            Ok(())
        }
        SupplierCommand::Delete(args) => delete_record(store, Collection::Suppliers, &args.id),
    }
}

pub fn run_machine<B: Backend>(store: &mut Store<B>, command: &MachineCommand) -> Result<()> {
    match command {
        MachineCommand::Add(fields) => {
            let mut machine = Machine::new(String::new(), String::new());
            apply_machine_fields(&mut machine, fields);
            save_record(store, machine)
        }
        MachineCommand::Edit { id, fields } => {
            let mut machine = store.get::<Machine>(id)?.clone();
            apply_machine_fields(&mut machine, fields);
            save_record(store, machine)
        }
        MachineCommand::List(args) => {
            let document = store.document();
            let machines = list_machines(document, &args.search);
            println!("{}", machines_table(document, &machines));
            println!("{} machine(s)", machines.len());
            Ok(())
        }
        MachineCommand::Choices => {
            let rows = machine_choices(store.document())
                .into_iter()
                .map(|m| (m.id.as_str(), machine_label(m)));
            println!("{}", choices_table(rows));
            Ok(())
        }
        MachineCommand::Delete(args) => delete_record(store, Collection::Machines, &args.id),
    }
}

pub fn run_part<B: Backend>(store: &mut Store<B>, command: &PartCommand) -> Result<()> {
    match command {
        PartCommand::Add(fields) => {
            let mut part = Part::new(String::new(), 0.0);
            apply_part_fields(&mut part, fields);
            save_record(store, part)
        }
        PartCommand::Edit { id, fields } => {
            let mut part = store.get::<Part>(id)?.clone();
            apply_part_fields(&mut part, fields);
            save_record(store, part)
        }
        PartCommand::List(args) => {
            let document = store.document();
            let parts = list_parts(document, &args.search);
            println!("{}", parts_table(document, &parts));
            println!("{} part(s)", parts.len());
            Ok(())
        }
        PartCommand::Delete(args) => delete_record(store, Collection::Parts, &args.id),
    }
}

pub fn run_intervention<B: Backend>(
    store: &mut Store<B>,
    command: &InterventionCommand,
) -> Result<()> {
    match command {
        InterventionCommand::Add(fields) => {
            let Some(date) = fields.date else {
                bail!("an intervention needs a date (--date YYYY-MM-DD)");
            };
            let mut intervention = Intervention::new(date, String::new());
            apply_intervention_fields(&mut intervention, fields);
            save_record(store, intervention)
        }
        InterventionCommand::Edit { id, fields } => {
            let mut intervention = store.get::<Intervention>(id)?.clone();
            apply_intervention_fields(&mut intervention, fields);
            save_record(store, intervention)
        }
        InterventionCommand::List(args) => {
            let document = store.document();
            let interventions = list_interventions(document, &args.search);
            println!("{}", interventions_table(document, &interventions));
            println!("{} intervention(s)", interventions.len());
            Ok(())
        }
        InterventionCommand::Delete(args) => {
            delete_record(store, Collection::Interventions, &args.id)
        }
    }
}

pub fn run_dashboard<B: Backend>(
    store: &Store<B>,
    args: &DashboardArgs,
    settings: &DashboardSettings,
) -> Result<()> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let threshold = args.threshold.unwrap_or(settings.stock_threshold);
    let document = store.document();
    let dashboard = Dashboard {
        today,
        kpis: kpis(document),
        upcoming_days: settings.upcoming_days,
        upcoming: upcoming_interventions(document, today, settings.upcoming_window()),
        threshold,
        alerts: stock_alerts(document, threshold),
    };
    print_dashboard(document, &dashboard);
    Ok(())
}

/// Export the document. Returns the written path, or `None` for stdout.
pub fn run_export<B: Backend>(store: &Store<B>, args: &ExportArgs) -> Result<Option<PathBuf>> {
    let span = info_span!("export");
    let _guard = span.enter();

    let json = export_json(store.document())?;
    if args.stdout {
        println!("{json}");
        return Ok(None);
    }
    let path = export_target(args.output.as_deref(), Local::now().date_naive());
    std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "exported document");
    println!("Exported to {}", path.display());
    Ok(Some(path))
}

/// Where an export lands: an explicit file, a file named by date inside an
/// existing directory, or that file in the current directory.
pub fn export_target(output: Option<&Path>, today: NaiveDate) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(export_file_name(today)),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(export_file_name(today)),
    }
}

pub fn run_import<B: Backend>(store: &mut Store<B>, args: &ImportArgs) -> Result<()> {
    let span = info_span!("import", file = %args.file.display());
    let _guard = span.enter();

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    store.import(&text)?;
    let document = store.document();
    println!(
        "Import complete: {} supplier(s), {} machine(s), {} part(s), {} intervention(s).",
        document.suppliers.len(),
        document.machines.len(),
        document.parts.len(),
        document.interventions.len()
    );
    Ok(())
}

pub fn run_reset<B: Backend>(store: &mut Store<B>, args: &ResetArgs) -> Result<()> {
    if !args.yes {
        bail!("reset erases all local data; pass --yes to confirm");
    }
    store.reset()?;
    println!("All data erased.");
    Ok(())
}

fn save_record<B: Backend, R: Record>(store: &mut Store<B>, record: R) -> Result<()> {
    let id = record.id().to_string();
    let outcome = store.upsert(record)?;
    let verb = match outcome {
        Upserted::Inserted => "Created",
        Upserted::Updated => "Updated",
    };
    println!("{verb} {} {id}", R::COLLECTION.entity());
    Ok(())
}

fn delete_record<B: Backend>(
    store: &mut Store<B>,
    collection: Collection,
    id: &str,
) -> Result<()> {
    if store.delete(collection, id)? {
        println!("Deleted {} {id}", collection.entity());
    } else {
        println!("No {} with id {id}", collection.entity());
    }
    Ok(())
}

fn set_text(target: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

fn apply_supplier_fields(supplier: &mut Supplier, fields: &SupplierFields) {
    set_text(&mut supplier.name, fields.name.as_ref());
    set_text(&mut supplier.contact, fields.contact.as_ref());
    set_text(&mut supplier.email, fields.email.as_ref());
    set_text(&mut supplier.phone, fields.phone.as_ref());
    set_text(&mut supplier.website, fields.website.as_ref());
}

fn apply_machine_fields(machine: &mut Machine, fields: &MachineFields) {
    set_text(&mut machine.name, fields.name.as_ref());
    set_text(&mut machine.ident, fields.ident.as_ref());
    if let Some(cost) = fields.cost {
        machine.cost = cost;
    }
    set_text(&mut machine.supplier_id, fields.supplier.as_ref());
    if let Some(state) = &fields.state {
        machine.state = MachineState::from_label(state);
    }
    set_text(&mut machine.location, fields.location.as_ref());
    set_text(&mut machine.notes, fields.notes.as_ref());
}

fn apply_part_fields(part: &mut Part, fields: &PartFields) {
    set_text(&mut part.name, fields.name.as_ref());
    if let Some(qty) = fields.qty {
        part.qty = qty;
    }
    if let Some(cost) = fields.cost {
        part.cost = cost;
    }
    set_text(&mut part.supplier_id, fields.supplier.as_ref());
    set_text(&mut part.location, fields.location.as_ref());
}

fn apply_intervention_fields(intervention: &mut Intervention, fields: &InterventionFields) {
    if let Some(date) = fields.date {
        intervention.date = date.format(DATE_FORMAT).to_string();
    }
    set_text(&mut intervention.machine_id, fields.machine.as_ref());
    if let Some(status) = &fields.status {
        intervention.status = InterventionStatus::from_label(status);
    }
    set_text(&mut intervention.motif, fields.motif.as_ref());
    set_text(&mut intervention.tech, fields.tech.as_ref());
    if let Some(duration) = fields.duration_min {
        intervention.duration_min = duration;
    }
}
