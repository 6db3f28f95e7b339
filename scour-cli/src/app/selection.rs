use std::collections::HashMap;

use color_eyre::eyre::{Result, bail, eyre};
use scour_core::CleanerConfig;

/// Operations and option values chosen on the command line
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub operations: Vec<String>,
    options: HashMap<String, Vec<(String, bool)>>,
}

impl Selection {
    /// Start from each cleaner's declared defaults, then apply
    /// `OPERATION.OPTION=BOOL` overrides.
    pub fn build(
        config: &CleanerConfig,
        operations: &[String],
        overrides: &[String],
    ) -> Result<Self> {
        let mut selection = Selection::default();

        for op in operations {
            if selection.operations.contains(op) {
                continue;
            }
            selection.operations.push(op.clone());
            if let Some(def) = config.get(op) {
                selection
                    .options
                    .insert(op.clone(), def.default_options());
            }
        }

        for raw in overrides {
            let (op, option, value) = parse_override(raw)?;
            let Some(def) = config.get(op) else {
                bail!("unknown operation '{}' in '{}'", op, raw);
            };
            if !def.options.iter().any(|o| o.id == option) {
                bail!("operation '{}' has no option '{}'", op, option);
            }

            let options = selection
                .options
                .entry(op.to_string())
                .or_insert_with(|| def.default_options());
            if let Some(slot) = options.iter_mut().find(|(id, _)| id == option) {
                slot.1 = value;
            }
        }

        Ok(selection)
    }

    pub fn options_for(&self, operation: &str) -> Vec<(String, bool)> {
        self.options.get(operation).cloned().unwrap_or_default()
    }
}

fn parse_override(raw: &str) -> Result<(&str, &str, bool)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| eyre!("expected OPERATION.OPTION=BOOL, got '{}'", raw))?;
    let (op, option) = key
        .split_once('.')
        .ok_or_else(|| eyre!("expected OPERATION.OPTION=BOOL, got '{}'", raw))?;
    Ok((op.trim(), option.trim(), parse_bool(value.trim())?))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(eyre!("not a boolean: '{}'", value)),
    }
}
