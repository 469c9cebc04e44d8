// Line oriented format, so a small chumsky grammar for the rows and plain
// Rust for interpreting the header.

use chumsky::{prelude::*, Parser};
use structs::JspLibProblem;
use thiserror::Error;

pub mod structs;

#[derive(Debug, Error)]
pub enum JspLibParseError {
    #[error("ParseError occurred: {}", describe(.0))]
    ParseError(Vec<Simple<char>>),
    #[error("{0} header line is missing")]
    MissingHeader(&'static str),
    #[error("{name} header line must hold a single integer, found {found} values")]
    InvalidHeader { name: &'static str, found: usize },
    #[error("{name} {value} is out of range")]
    HeaderOutOfRange { name: &'static str, value: u64 },
    #[error("expected at least {expected} job rows (processing times followed by machine orders), found {found}")]
    RowCountMismatch { expected: usize, found: usize },
}

fn describe(errors: &[Simple<char>]) -> String {
    errors
        .iter()
        .map(|err| format!("{err} at {:?}", err.span()))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn parse_jsp_lib(content: &str) -> Result<JspLibProblem, JspLibParseError> {
    let rows = crate::rows_parser()
        .parse(content)
        .map_err(JspLibParseError::ParseError)?;

    let mut rows = rows.into_iter();
    let jobs = header_value(rows.next(), "job count")?;
    let machines = header_value(rows.next(), "machine count")?;
    let mut rows: Vec<Vec<u64>> = rows.collect();

    let job_rows = jobs.saturating_mul(2);

    // The reference value is optional and only recognisable by its shape.
    let optimal_makespan = match rows.first().map(Vec::as_slice) {
        Some(&[optimum]) if rows.len() > job_rows => {
            rows.remove(0);
            Some(optimum)
        }
        _ => None,
    };

    if rows.len() < job_rows {
        return Err(JspLibParseError::RowCountMismatch {
            expected: job_rows,
            found: rows.len(),
        });
    }

    // anything after the machine orders is not part of the instance
    rows.truncate(job_rows);
    let machine_sequences = rows.split_off(jobs);

    Ok(JspLibProblem {
        jobs,
        machines,
        optimal_makespan,
        processing_times: rows,
        machine_sequences,
    })
}

/// Writes a problem back into the benchmark text format.
pub fn write_jsp_lib(problem: &JspLibProblem) -> String {
    let mut lines = vec![problem.jobs.to_string(), problem.machines.to_string()];

    if let Some(optimum) = problem.optimal_makespan {
        lines.push(optimum.to_string());
    }

    for row in problem
        .processing_times
        .iter()
        .chain(problem.machine_sequences.iter())
    {
        lines.push(
            row.iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        );
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

fn header_value(row: Option<Vec<u64>>, name: &'static str) -> Result<usize, JspLibParseError> {
    let row = row.ok_or(JspLibParseError::MissingHeader(name))?;

    match row.as_slice() {
        &[value] => {
            usize::try_from(value).map_err(|_| JspLibParseError::HeaderOutOfRange { name, value })
        }
        values => Err(JspLibParseError::InvalidHeader {
            name,
            found: values.len(),
        }),
    }
}

pub(crate) fn row_parser() -> impl Parser<char, Vec<u64>, Error = Simple<char>> {
    let inline_whitespace = filter(|c: &char| *c == ' ' || *c == '\t').repeated();

    let number = text::int(10)
        .try_map(|digits: String, span| {
            digits
                .parse::<u64>()
                .map_err(|err| Simple::custom(span, format!("{digits}: {err}")))
        })
        .labelled("number");

    inline_whitespace
        .clone()
        .ignore_then(
            number
                .separated_by(inline_whitespace.clone().at_least(1))
                .allow_trailing(),
        )
        .then_ignore(inline_whitespace)
}

/// All non-empty rows of the file, in order.
pub(crate) fn rows_parser() -> impl Parser<char, Vec<Vec<u64>>, Error = Simple<char>> {
    row_parser()
        .separated_by(text::newline())
        .then_ignore(end())
        .map(|rows: Vec<Vec<u64>>| {
            rows.into_iter()
                .filter(|row| !row.is_empty())
                .collect::<Vec<_>>()
        })
}
