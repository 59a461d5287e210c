use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

/// Transforms every non-blank line of `text`. Malformed lines become
/// `Error: Invalid input format: <line>` in place.
pub fn transform_text(text: &str) -> Vec<String> {
    transform_lines(text).into_iter().map(render).collect()
}

/// Reads `input`, writes one result per line to `output`, and returns the
/// written lines. A missing input file writes nothing.
pub fn run(input: &Path, output: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(input).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound {
            path: input.to_path_buf(),
        },
        _ => Error::io(input, e),
    })?;

    let outcomes = transform_lines(&text);
    let malformed = outcomes.iter().filter(|o| o.is_err()).count();
    let lines: Vec<String> = outcomes.into_iter().map(render).collect();

    let mut contents = String::new();
    for line in &lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(output, contents).map_err(|e| Error::io(output, e))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        lines = lines.len(),
        malformed,
        "transformation complete"
    );
    Ok(lines)
}

// `\r\n`, `\r` and `\n` all end a line; the empty piece between `\r` and `\n`
// is dropped with the other blank lines.
fn transform_lines(text: &str) -> Vec<Result<String>> {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let outcome = crate::transform(line);
            if outcome.is_err() {
                warn!(%line, "malformed relation");
            }
            outcome
        })
        .collect()
}

fn render(outcome: Result<String>) -> String {
    match outcome {
        Ok(line) => line,
        Err(e) => format!("Error: {e}"),
    }
}
