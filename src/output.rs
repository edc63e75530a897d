use serde::Serialize;

use crate::error::{FactsError, Result};

pub fn render<T: Serialize>(data: &T, format: &str) -> Result<String> {
    match format {
        "yaml" => serde_yaml::to_string(data).map_err(|e| FactsError::Serialize(e.to_string())),
        _ => serde_json::to_string_pretty(data).map_err(|e| FactsError::Serialize(e.to_string())),
    }
}

pub fn output_data<T: Serialize>(data: &T, format: &str) -> Result<()> {
    println!("{}", render(data, format)?);
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31mError: {}\x1b[0m", message);
}
