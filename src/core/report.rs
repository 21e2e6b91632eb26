use crate::domain::model::PoliceForce;
use crate::utils::error::{PoliceApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

pub fn render(forces: &[PoliceForce], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(forces)),
        OutputFormat::Csv => render_csv(forces),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(forces)?),
    }
}

/// Field names across all forces, in first-seen order.
fn columns(forces: &[PoliceForce]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for force in forces {
        for key in force.data.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn cell(value: Option<&Value>, null_text: &str, missing_text: &str) -> String {
    match value {
        None => missing_text.to_string(),
        Some(Value::Null) => null_text.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Right-aligned text table with a 0-based row index.
pub fn render_table(forces: &[PoliceForce]) -> String {
    if forces.is_empty() {
        return "Empty result".to_string();
    }

    let columns = columns(forces);
    let rows: Vec<Vec<String>> = forces
        .iter()
        .map(|force| {
            columns
                .iter()
                .map(|column| cell(force.data.get(column), "None", "NaN"))
                .collect()
        })
        .collect();

    let index_width = (forces.len() - 1).to_string().len();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(column.chars().count())
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);

    let mut header = " ".repeat(index_width);
    for (column, width) in columns.iter().zip(&widths) {
        header.push_str(&format!("  {:>width$}", column, width = *width));
    }
    lines.push(header);

    for (index, row) in rows.iter().enumerate() {
        let mut line = format!("{:<width$}", index, width = index_width);
        for (value, width) in row.iter().zip(&widths) {
            line.push_str(&format!("  {:>width$}", value, width = *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}

pub fn render_csv(forces: &[PoliceForce]) -> Result<String> {
    let columns = columns(forces);
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&columns)?;
    for force in forces {
        writer.write_record(
            columns
                .iter()
                .map(|column| cell(force.data.get(column), "", "")),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PoliceApiError::Io(e.into_error()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_suffix('\n').unwrap_or(&text).to_string())
}
