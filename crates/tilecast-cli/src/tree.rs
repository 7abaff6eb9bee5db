//! Text rendering of a sequence tree.

use tilecast_types::{Effect, Node, NodeId, SequenceNode};

/// Shortest hex prefix length (at least 8) that tells every id apart.
///
/// UUIDv7 ids minted in the same millisecond share their first 12 hex
/// digits, so a fixed short form is not enough.
pub fn unique_prefix_len(root: &SequenceNode) -> usize {
    let mut ids = Vec::new();
    root.collect_ids(&mut ids);
    let hexes: Vec<String> = ids.iter().map(NodeId::to_hex).collect();
    (8..32)
        .find(|&len| {
            let mut prefixes: Vec<&str> = hexes.iter().map(|h| &h[..len]).collect();
            prefixes.sort_unstable();
            prefixes.windows(2).all(|w| w[0] != w[1])
        })
        .unwrap_or(32)
}

fn label(id: NodeId, width: usize) -> String {
    id.to_hex()[..width].to_string()
}

/// One-line description of an effect's payload.
pub fn effect_summary(effect: &Effect) -> String {
    let body = match effect {
        Effect::Play(p) | Effect::ShowPotentialPlay(p) => p
            .tiles
            .iter()
            .map(|t| format!("{}@{},{}", t.letter, t.x, t.y))
            .collect::<Vec<_>>()
            .join(" "),
        Effect::Highlight(h) => h
            .squares
            .iter()
            .map(|s| format!("{},{}", s.x, s.y))
            .collect::<Vec<_>>()
            .join(" "),
        Effect::None(_) => String::new(),
    };
    if body.is_empty() {
        effect.kind().to_string()
    } else {
        format!("{} {}", effect.kind(), body)
    }
}

/// Format the tree as indented lines, frames numbered in timeline order.
pub fn format_tree(root: &SequenceNode) -> Vec<String> {
    let width = unique_prefix_len(root);
    let mut lines = vec![format!(
        "{} [{}/{}] (root)",
        label(root.id, width),
        root.chronology,
        root.additivity
    )];
    let mut frame_index = 0;
    format_children(root, "", width, &mut frame_index, &mut lines);
    lines
}

fn format_children(
    seq: &SequenceNode,
    prefix: &str,
    width: usize,
    frame_index: &mut usize,
    lines: &mut Vec<String>,
) {
    for (i, child) in seq.children.iter().enumerate() {
        let is_last = i == seq.children.len() - 1;
        let connector = if is_last { "└─ " } else { "├─ " };
        match child {
            Node::Frame(f) => {
                lines.push(format!(
                    "{}{}#{} {} {}",
                    prefix,
                    connector,
                    frame_index,
                    label(f.id, width),
                    effect_summary(&f.effect)
                ));
                *frame_index += 1;
            }
            Node::Sequence(s) => {
                lines.push(format!(
                    "{}{}{} [{}/{}]",
                    prefix,
                    connector,
                    label(s.id, width),
                    s.chronology,
                    s.additivity
                ));
                let child_prefix = if is_last {
                    format!("{}   ", prefix)
                } else {
                    format!("{}│  ", prefix)
                };
                format_children(s, &child_prefix, width, frame_index, lines);
            }
        }
    }
}

/// Flattened frames, one per line: index, id, effect.
pub fn format_frames(root: &SequenceNode) -> Vec<String> {
    let width = unique_prefix_len(root);
    tilecast_timeline::flatten_frames(root)
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{:>3}  {}  {}", i, label(f.id, width), effect_summary(&f.effect)))
        .collect()
}
