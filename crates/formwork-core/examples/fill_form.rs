//! Build a small order form, fill it in, and submit it.
//!
//! Run with `cargo run --example fill_form`; set `RUST_LOG=debug` to watch
//! the recompute and persistence logging.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use formwork_core::{FormStudio, SubmitOutcome};
use formwork_model::{FieldType, FieldValidation, FieldValue, FormField};
use formwork_persistence::{MemoryStore, SchemaRepository};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut studio = FormStudio::new(SchemaRepository::new(MemoryStore::new()));

    studio.set_name("Order");
    studio.add_field(
        FormField::new("quantity", "Quantity", FieldType::Number)
            .with_validation(FieldValidation::required()),
    )?;
    studio.add_field(
        FormField::new("unit_price", "Unit price", FieldType::Number)
            .with_default(FieldValue::text("2.50")),
    )?;
    studio.add_field(FormField::new("express", "Express delivery", FieldType::Checkbox))?;
    studio.add_field(FormField::derived(
        "total",
        "Total",
        ["quantity", "unit_price", "express"],
        "quantity * unit_price + express * 5",
    ))?;
    studio.save()?;

    for summary in studio.repository().list() {
        println!("saved form: {} ({} fields)", summary.name, summary.field_count);
    }

    let mut session = studio
        .preview(Some("Order"))
        .context("the order form should resolve by name")?;

    // Submitting straight away trips the required rule.
    if let SubmitOutcome::Rejected(errors) = session.submit() {
        for (field, message) in &errors {
            println!("rejected: {field}: {message}");
        }
    }

    session.update("quantity", FieldValue::text("3"));
    session.update("express", FieldValue::Bool(true));
    println!(
        "total so far: {}",
        session.value("total").cloned().unwrap_or(FieldValue::Empty)
    );

    match session.submit() {
        SubmitOutcome::Accepted(values) => {
            println!("accepted:");
            for (field, value) in &values {
                println!("  {field} = {value}");
            }
        }
        SubmitOutcome::Rejected(errors) => {
            anyhow::bail!("submit unexpectedly rejected: {errors:?}");
        }
    }

    Ok(())
}
