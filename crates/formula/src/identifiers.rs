//! Identifier splitting - Segment letter runs against known names
//!
//! Handwritten "2ACOSX" has no separators, so a letter group is cut into
//! known identifiers (leftmost, longest first) and single-letter variables.

use crate::model::{Group, Node};
use crate::symbol::Kind;
use std::ops::Range;

/// Split one letter group into identifier and single-letter pieces.
///
/// `identifiers` must be sorted longest first. Concatenating the pieces'
/// labels gives back the original run. An exponent on the run stays on the
/// piece holding its last letter.
pub fn split_group(group: Group, identifiers: &[String]) -> Vec<Group> {
    if group.kind() != Kind::Letter || group.len() <= 1 {
        return vec![group];
    }

    let segments = segment(&group.text(), identifiers);
    let (members, power) = group.into_parts();
    let mut members = members.into_iter();
    let mut pieces: Vec<Group> = segments
        .into_iter()
        .filter_map(|range| Group::from_members(members.by_ref().take(range.len()).collect()))
        .collect();

    if let (Some(power), Some(last)) = (power, pieces.last_mut()) {
        last.set_power(*power);
    }
    pieces
}

/// Split every letter group of a base line
pub fn split_nodes(nodes: Vec<Node>, identifiers: &[String]) -> Vec<Node> {
    nodes
        .into_iter()
        .flat_map(|node| match node {
            Node::Group(group) => split_group(group, identifiers)
                .into_iter()
                .map(Node::Group)
                .collect::<Vec<_>>(),
            fraction => vec![fraction],
        })
        .collect()
}

/// Character ranges of `text`: known identifiers, and one range per other letter
fn segment(text: &str, identifiers: &[String]) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let rest = &text[start..];
        let len = identifiers
            .iter()
            .find(|name| !name.is_empty() && rest.starts_with(name.as_str()))
            .map_or(1, String::len);
        segments.push(start..start + len);
        start += len;
    }
    segments
}
