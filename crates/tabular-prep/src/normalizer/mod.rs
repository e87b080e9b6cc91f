//! Raw text normalization.
//!
//! Turns a raw source file into a delimited file with a header row that the
//! CSV reader can parse without dataset-specific options. Two strategies
//! exist, see [`NormalizationStrategy`]:
//! - `PrependHeader`: write a header line followed by the raw text
//! - `StripIdAndNoise`: drop the first field of every line, then remove
//!   every noise character from the remaining text
//!
//! Outputs are written to a temporary sibling and renamed into place, so
//! the existence of the output path always means a complete file.

mod sanitizers;

pub use sanitizers::{MissingDelimiter, remove_characters, remove_first_field, with_header};

use crate::config::{DatasetSpec, NormalizationStrategy};
use crate::error::{PreprocessingError, Result, ResultExt};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write `header_line`, a newline, then the full text of `input`, to `output`.
pub fn prepend_header(input: &Path, output: &Path, header_line: &str) -> Result<()> {
    let text = read_text(input)?;
    write_atomic(output, &with_header(header_line, &text))
}

/// Remove the identifier field from every line of `input`, strip the noise
/// characters from what is left, and write the result to `output`.
///
/// A line without `delimiter` fails with
/// [`PreprocessingError::MalformedRecord`]; nothing is written in that case.
pub fn strip_id_and_noise(
    input: &Path,
    output: &Path,
    delimiter: char,
    noise: &[char],
) -> Result<()> {
    let text = read_text(input)?;

    let without_id = remove_first_field(&text, delimiter).map_err(|MissingDelimiter { line }| {
        PreprocessingError::MalformedRecord {
            path: input.to_path_buf(),
            line,
            delimiter,
        }
    })?;

    write_atomic(output, &remove_characters(&without_id, noise))
}

/// Run the dataset's strategy unless its cleaned file already exists.
///
/// Returns `true` when the file was produced by this call.
pub fn ensure_normalized(spec: &DatasetSpec) -> Result<bool> {
    if spec.cleaned_path.exists() {
        debug!(
            "'{}' already normalized at {}",
            spec.name,
            spec.cleaned_path.display()
        );
        return Ok(false);
    }

    info!(
        "Normalizing '{}': {} -> {}",
        spec.name,
        spec.raw_path.display(),
        spec.cleaned_path.display()
    );

    let written = match &spec.strategy {
        NormalizationStrategy::PrependHeader { header } => {
            prepend_header(&spec.raw_path, &spec.cleaned_path, header)
        }
        NormalizationStrategy::StripIdAndNoise { noise } => {
            strip_id_and_noise(&spec.raw_path, &spec.cleaned_path, spec.delimiter, noise)
        }
    };
    written.context(format!("Normalizing dataset '{}'", spec.name))?;

    Ok(true)
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).context(format!("Reading {}", path.display()))
}

/// Write to `<output>.tmp` and rename over `output`.
fn write_atomic(output: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
    }

    let tmp = temp_path(output);
    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e).context(format!("Writing {}", tmp.display()));
    }

    fs::rename(&tmp, output).context(format!("Renaming into {}", output.display()))?;
    debug!("Wrote {} bytes to {}", contents.len(), output.display());
    Ok(())
}

fn temp_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    output.with_file_name(name)
}
