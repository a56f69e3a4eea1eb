// Lecture du fichier de topologie : routeurs, puis START, liens, UPDATE, modifications, END

use std::fs;
use std::io::Read;
use std::path::Path;
use log::{debug, warn};
use crate::error::{AppError, Result};
use crate::topology::Topology;
use crate::types::LinkChange;

pub const START_SENTINEL: &str = "START";
pub const UPDATE_SENTINEL: &str = "UPDATE";
pub const END_SENTINEL: &str = "END";

/// Coût d'une modification qui supprime le lien
pub const REMOVE_COST: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Routers,
    Links,
    Edits,
}

impl Section {
    fn terminator(self) -> &'static str {
        match self {
            Section::Routers => START_SENTINEL,
            Section::Links => UPDATE_SENTINEL,
            Section::Edits => END_SENTINEL,
        }
    }
}

/// Lit et valide une topologie depuis un fichier
pub fn read_topology_file<P: AsRef<Path>>(path: P) -> Result<Topology> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_topology(&content)
}

/// Lit et valide une topologie depuis n'importe quelle source (stdin en pratique)
pub fn read_topology<R: Read>(mut reader: R) -> Result<Topology> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_topology(&content)
}

/// Analyse le format texte complet ; toute ligne mal formée est fatale
pub fn parse_topology(input: &str) -> Result<Topology> {
    let mut topology = Topology::new();
    let mut section = Section::Routers;
    let mut last_line = 0;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line == section.terminator() {
            section = match section {
                Section::Routers => Section::Links,
                Section::Links => Section::Edits,
                Section::Edits => {
                    topology.validate()?;
                    debug!(
                        "Parsed topology: {} routers, {} links, {} edits",
                        topology.routers.len(), topology.links.len(), topology.edits.len()
                    );
                    return Ok(topology);
                }
            };
            continue;
        }
        if [START_SENTINEL, UPDATE_SENTINEL, END_SENTINEL].contains(&line) {
            return Err(AppError::InputError {
                line: line_no,
                message: format!("unexpected {} while expecting {}", line, section.terminator()),
            });
        }

        match section {
            Section::Routers => {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                if tokens.len() != 1 {
                    return Err(AppError::InputError {
                        line: line_no,
                        message: format!("expected a single router name, got '{}'", line),
                    });
                }
                topology.add_router(tokens[0]);
            }
            Section::Links => {
                let (a, b, cost) = parse_link_line(line, line_no)?;
                if cost == REMOVE_COST {
                    warn!("Ignoring removal of {} <-> {} in the initial link set (line {})", a, b, line_no);
                    continue;
                }
                topology.add_link(a, b, non_negative_cost(cost, line_no)?);
            }
            Section::Edits => {
                let (a, b, cost) = parse_link_line(line, line_no)?;
                let change = if cost == REMOVE_COST {
                    LinkChange::Remove
                } else {
                    LinkChange::Set(non_negative_cost(cost, line_no)?)
                };
                topology.add_edit(a, b, change);
            }
        }
    }

    Err(AppError::InputError {
        line: last_line,
        message: format!("missing {} line", section.terminator()),
    })
}

/// Découpe une ligne `A B coût`
fn parse_link_line(line: &str, line_no: usize) -> Result<(&str, &str, i64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(AppError::InputError {
            line: line_no,
            message: format!("expected 'A B cost', got '{}'", line),
        });
    }
    let cost = tokens[2].parse::<i64>().map_err(|e| AppError::InputError {
        line: line_no,
        message: format!("invalid cost '{}': {}", tokens[2], e),
    })?;
    Ok((tokens[0], tokens[1], cost))
}

fn non_negative_cost(cost: i64, line_no: usize) -> Result<u64> {
    u64::try_from(cost).map_err(|_| AppError::InputError {
        line: line_no,
        message: format!("negative cost {} (only {} removes a link)", cost, REMOVE_COST),
    })
}
