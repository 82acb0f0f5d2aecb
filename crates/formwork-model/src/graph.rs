//! Derived-field dependency graph.
//!
//! A derived field depends on each of its parents that is itself derived;
//! plain input fields terminate the walk. The graph must be acyclic before a
//! schema can be saved. Recomputation is a single non-recursive pass in
//! schema order, so this check is what keeps evaluation from chasing its own
//! tail.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, SchemaError};
use crate::schema::FormSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    Visiting,
    Done,
}

/// Rejects schemas whose derived fields form a dependency cycle. The field
/// reported is one member of the cycle found first in schema order.
pub fn check_acyclic(schema: &FormSchema) -> Result<()> {
    let adjacency = derived_adjacency(schema);
    let mut marks: BTreeMap<&str, Mark> = adjacency.keys().map(|id| (*id, Mark::New)).collect();
    for field in schema.derived_fields() {
        if marks.get(field.id.as_str()) == Some(&Mark::New) {
            visit(field.id.as_str(), &adjacency, &mut marks)?;
        }
    }
    Ok(())
}

/// Edges from each derived field to its derived parents, in declaration
/// order. Parents that are plain input fields carry no edge.
fn derived_adjacency(schema: &FormSchema) -> BTreeMap<&str, Vec<&str>> {
    let derived_ids: BTreeSet<&str> = schema
        .derived_fields()
        .map(|field| field.id.as_str())
        .collect();
    schema
        .derived_fields()
        .map(|field| {
            let parents = field
                .derived
                .as_ref()
                .map(|config| {
                    config
                        .parent_fields
                        .iter()
                        .map(String::as_str)
                        .filter(|parent| derived_ids.contains(parent))
                        .collect()
                })
                .unwrap_or_default();
            (field.id.as_str(), parents)
        })
        .collect()
}

// Explicit-stack DFS; a frame is a node plus the index of the next parent
// to examine. Chains of derived fields can be arbitrarily long, so the walk
// keeps its own stack instead of recursing.
fn visit<'a>(
    start: &'a str,
    adjacency: &BTreeMap<&'a str, Vec<&'a str>>,
    marks: &mut BTreeMap<&'a str, Mark>,
) -> Result<()> {
    marks.insert(start, Mark::Visiting);
    let mut stack = vec![(start, 0)];
    while let Some((id, index)) = stack.pop() {
        let parents = adjacency.get(id).map(Vec::as_slice).unwrap_or_default();
        let Some(&parent) = parents.get(index) else {
            marks.insert(id, Mark::Done);
            continue;
        };
        stack.push((id, index + 1));
        match marks.get(parent) {
            Some(Mark::Visiting) => {
                return Err(SchemaError::CyclicDerivation {
                    id: parent.to_string(),
                });
            }
            Some(Mark::New) => {
                marks.insert(parent, Mark::Visiting);
                stack.push((parent, 0));
            }
            _ => {}
        }
    }
    Ok(())
}
