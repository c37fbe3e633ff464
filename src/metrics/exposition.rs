//! Plaintext exposition format rendering for snapshots.

use std::collections::HashMap;
use std::fmt::Write;

use thiserror::Error;

use crate::models::Sample;

/// Formatting failures. The mapper only produces valid names, so these point
/// at an internal bug rather than at bad upstream data.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid metric name '{0}'")]
    InvalidMetricName(String),

    #[error("invalid label name '{label}' on metric '{metric}'")]
    InvalidLabelName { metric: String, label: String },

    #[error("metric '{0}' has conflicting help texts")]
    ConflictingHelp(String),

    #[error("failed to encode metrics: {0}")]
    Encode(String),
}

impl From<std::fmt::Error> for RenderError {
    fn from(e: std::fmt::Error) -> Self {
        RenderError::Encode(e.to_string())
    }
}

impl From<prometheus::Error> for RenderError {
    fn from(e: prometheus::Error) -> Self {
        RenderError::Encode(e.to_string())
    }
}

struct Family<'a> {
    name: &'a str,
    help: &'a str,
    samples: Vec<&'a Sample>,
}

/// Render samples as gauge families.
///
/// Samples are grouped by metric name; families appear in order of their first
/// sample, and each family is preceded by its `# HELP` and `# TYPE` lines.
pub fn render_samples(samples: &[Sample]) -> Result<String, RenderError> {
    let mut families: Vec<Family<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for sample in samples {
        match index.get(sample.name.as_str()) {
            Some(&i) => {
                if families[i].help != sample.help {
                    return Err(RenderError::ConflictingHelp(sample.name.clone()));
                }
                families[i].samples.push(sample);
            }
            None => {
                if !is_valid_metric_name(&sample.name) {
                    return Err(RenderError::InvalidMetricName(sample.name.clone()));
                }
                index.insert(&sample.name, families.len());
                families.push(Family {
                    name: &sample.name,
                    help: &sample.help,
                    samples: vec![sample],
                });
            }
        }
    }

    let mut output = String::new();
    for family in &families {
        writeln!(output, "# HELP {} {}", family.name, escape_help(family.help))?;
        writeln!(output, "# TYPE {} gauge", family.name)?;
        for sample in &family.samples {
            write_sample(&mut output, sample)?;
        }
    }
    Ok(output)
}

fn write_sample(output: &mut String, sample: &Sample) -> Result<(), RenderError> {
    output.push_str(&sample.name);
    if !sample.labels.is_empty() {
        output.push('{');
        for (i, (name, value)) in sample.labels.iter().enumerate() {
            if !is_valid_label_name(name) {
                return Err(RenderError::InvalidLabelName {
                    metric: sample.name.clone(),
                    label: name.clone(),
                });
            }
            if i > 0 {
                output.push(',');
            }
            write!(output, "{}=\"{}\"", name, escape_label_value(value))?;
        }
        output.push('}');
    }
    writeln!(output, " {}", format_value(sample.value))?;
    Ok(())
}

/// Floats keep their decimal point (`2.0`, not `2`).
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{:?}", value)
    }
}

fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Backslash, double-quote, and newline must be escaped.
fn escape_label_value(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}
