//! Parser for graph data files.
//!
//! A data directory holds three `::`-separated files:
//! - users.dat: username
//! - items.dat: name[::key=value]...
//! - edges.dat: username::KIND::item_name (KIND is LIKES, PURCHASED or DISLIKES)
//!
//! Empty lines and lines starting with `#` are skipped.

use crate::error::{GraphError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;

/// Lines worth parsing, paired with their 1-based line number
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_error(file: &str, line: usize, reason: impl Into<String>) -> GraphError {
    GraphError::ParseError {
        file: file.to_string(),
        line,
        reason: reason.into(),
    }
}

/// Parse the users.dat file
pub fn parse_users(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    parse_users_str(&content)
}

pub fn parse_users_str(content: &str) -> Result<Vec<String>> {
    data_lines(content)
        .map(|(line_no, line)| {
            if line.contains("::") {
                return Err(parse_error("users.dat", line_no, "Expected a single username"));
            }
            Ok(line.to_string())
        })
        .collect()
}

/// Parse the items.dat file
pub fn parse_items(path: &Path) -> Result<Vec<ItemRecord>> {
    let content = fs::read_to_string(path)?;
    parse_items_str(&content)
}

pub fn parse_items_str(content: &str) -> Result<Vec<ItemRecord>> {
    let mut items = Vec::new();

    for (line_no, line) in data_lines(content) {
        let mut parts = line.split("::");

        // split always yields at least one part
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(parse_error("items.dat", line_no, "Missing item name"));
        }

        let mut attributes = Vec::new();
        for part in parts {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| parse_error("items.dat", line_no, format!("Expected key=value, got '{part}'")))?;
            if key.is_empty() || key == NAME {
                return Err(parse_error("items.dat", line_no, format!("Invalid attribute key '{key}'")));
            }
            attributes.push((key.to_string(), parse_scalar(value)));
        }

        items.push(ItemRecord {
            name: name.to_string(),
            attributes,
        });
    }

    Ok(items)
}

/// Integers stay integers, everything else is text
fn parse_scalar(value: &str) -> PropertyValue {
    value
        .parse::<i64>()
        .map(PropertyValue::Int)
        .unwrap_or_else(|_| PropertyValue::from(value))
}

/// Parse the edges.dat file
pub fn parse_edges(path: &Path) -> Result<Vec<EdgeRecord>> {
    let content = fs::read_to_string(path)?;
    parse_edges_str(&content)
}

pub fn parse_edges_str(content: &str) -> Result<Vec<EdgeRecord>> {
    let mut edges = Vec::new();

    for (line_no, line) in data_lines(content) {
        let fields: Vec<&str> = line.split("::").collect();
        let [username, kind, item_name] = fields.as_slice() else {
            return Err(parse_error(
                "edges.dat",
                line_no,
                format!("Expected 3 fields but found {}", fields.len()),
            ));
        };

        let kind = kind
            .parse::<EdgeKind>()
            .map_err(|reason| parse_error("edges.dat", line_no, reason))?;

        edges.push(EdgeRecord {
            username: username.to_string(),
            kind,
            item_name: item_name.to_string(),
        });
    }

    Ok(edges)
}
