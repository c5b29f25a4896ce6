use std::fs::File;
use std::io::{BufWriter, Write};

use lipi_core::pipeline::explain::{explain, format_text};
use lipi_core::{transliterate, transliterate_detailed, RuleTable};
use lipi_engine::transliterate_batch;

use super::{read_file, CliError};

pub fn convert(table: &RuleTable, text: &str, json: bool) -> Result<String, CliError> {
    if json {
        let detailed = transliterate_detailed(table, text);
        Ok(serde_json::to_string_pretty(&detailed)?)
    } else {
        Ok(transliterate(table, text))
    }
}

pub fn explain_cmd(table: &RuleTable, text: &str, json: bool) -> Result<String, CliError> {
    let result = explain(table, text);
    if json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(format_text(&result))
    }
}

/// Transliterate `input_file` line by line into `output_file`.
///
/// Line count is preserved, blank lines included. Returns the number of
/// lines written.
pub fn batch_file(
    table: &RuleTable,
    input_file: &str,
    output_file: &str,
) -> Result<usize, CliError> {
    let content = read_file(input_file)?;
    let lines: Vec<&str> = content.lines().collect();
    let converted = transliterate_batch(table, &lines);

    let io_err = |source| CliError::Io {
        path: output_file.to_string(),
        source,
    };
    let file = File::create(output_file).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for line in &converted {
        writeln!(writer, "{line}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(converted.len())
}
