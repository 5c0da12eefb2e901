//! Indented text rendering of a decode tree

use std::fmt::{self, Write};

use rusty_calldata_core::{DecodedNode, DecodedSubtree, RawValue};

/// Collapsible byte values longer than this are shortened
const MAX_INLINE_LEN: usize = 66;

pub fn render(root: &DecodedNode) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_node(&mut out, root, 0, &mut Vec::new())?;
    Ok(out)
}

fn write_node(
    out: &mut String,
    node: &DecodedNode,
    depth: usize,
    path: &mut Vec<usize>,
) -> fmt::Result {
    let pad = "  ".repeat(depth);
    let value = node
        .value
        .as_ref()
        .map(|v| display_value(v, node.collapsible));

    match (&node.label, &value) {
        (Some(label), Some(value)) => writeln!(out, "{pad}{label}: {value}")?,
        (Some(label), None) => writeln!(out, "{pad}{label}")?,
        (None, Some(value)) => writeln!(out, "{pad}- {value}")?,
        (None, None) => {}
    }

    if node.is_ambiguous() {
        writeln!(
            out,
            "{pad}  ? choose with --select '{}=<SIGNATURE>':",
            format_path(path)
        )?;
        for signature in node.candidates() {
            writeln!(out, "{pad}    {signature}")?;
        }
    }

    if let Some(decoded) = &node.decoded {
        // structural nodes have no line of their own
        let depth = if node.label.is_none() && node.value.is_none() {
            depth
        } else {
            depth + 1
        };
        write_subtree(out, decoded, depth, path)?;
    }
    Ok(())
}

fn write_subtree(
    out: &mut String,
    subtree: &DecodedSubtree,
    depth: usize,
    path: &mut Vec<usize>,
) -> fmt::Result {
    writeln!(out, "{}▸ {}", "  ".repeat(depth), subtree.label)?;
    for (idx, param) in subtree.params.iter().enumerate() {
        path.push(idx);
        write_node(out, param, depth + 1, path)?;
        path.pop();
    }
    Ok(())
}

fn display_value(value: &RawValue, collapsible: bool) -> String {
    let text = value.to_string();
    match value.as_bytes() {
        Some(bytes) if collapsible && text.len() > MAX_INLINE_LEN => format!(
            "{}…{} ({} bytes)",
            &text[..34],
            &text[text.len() - 8..],
            bytes.len()
        ),
        _ => text,
    }
}

fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
