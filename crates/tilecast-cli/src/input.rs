//! Command-line argument parsing: node references, tiles, policy names.
//!
//! The value parsers return `Result<_, String>` so clap can report them
//! against the offending flag.

use tilecast_types::{
    AdditivityType, ChronologyType, EffectKind, NodeId, PrefixError, SequenceNode, Square,
    TilePlacement, resolve_node_prefix,
};

/// Name that addresses the root sequence on the command line.
pub const ROOT_ALIAS: &str = "root";

/// Resolve a node argument: `root`, a full UUID, or a unique hex prefix.
pub fn resolve_node(root: &SequenceNode, query: &str) -> Result<NodeId, PrefixError> {
    if query.eq_ignore_ascii_case(ROOT_ALIAS) {
        return Ok(root.id);
    }
    let mut ids = Vec::new();
    root.collect_ids(&mut ids);
    resolve_node_prefix(ids.into_iter(), query.trim())
}

/// Parse `X,Y,L`, e.g. `7,7,C`.
pub fn parse_tile(s: &str) -> Result<TilePlacement, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, letter] = parts.as_slice() else {
        return Err(format!("expected X,Y,LETTER, got '{s}'"));
    };
    let mut chars = letter.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(format!("expected a single letter, got '{letter}'"));
    };
    if !c.is_alphabetic() {
        return Err(format!("'{c}' is not a letter"));
    }
    Ok(TilePlacement::new(parse_coord(x)?, parse_coord(y)?, c.to_ascii_uppercase()))
}

/// Parse `X,Y`.
pub fn parse_square(s: &str) -> Result<Square, String> {
    match s.split_once(',') {
        Some((x, y)) => Ok(Square::new(parse_coord(x.trim())?, parse_coord(y.trim())?)),
        None => Err(format!("expected X,Y, got '{s}'")),
    }
}

fn parse_coord(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("'{s}' is not a board coordinate"))
}

pub fn parse_effect_kind(s: &str) -> Result<EffectKind, String> {
    EffectKind::from_str(s).ok_or_else(|| {
        let names: Vec<_> = EffectKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown effect '{s}' (expected one of: {})", names.join(", "))
    })
}

pub fn parse_chronology(s: &str) -> Result<ChronologyType, String> {
    ChronologyType::from_str(s).ok_or_else(|| format!("unknown chronology '{s}'"))
}

pub fn parse_additivity(s: &str) -> Result<AdditivityType, String> {
    AdditivityType::from_str(s).ok_or_else(|| format!("unknown additivity '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecast_types::{Effect, FrameNode};

    #[test]
    fn test_parse_tile() {
        assert_eq!(parse_tile("7,7,C"), Ok(TilePlacement::new(7, 7, 'C')));
        assert_eq!(parse_tile(" 0, 14 ,q"), Ok(TilePlacement::new(0, 14, 'Q')));
        assert!(parse_tile("7,7").is_err());
        assert!(parse_tile("7,7,CA").is_err());
        assert!(parse_tile("-1,7,C").is_err());
        assert!(parse_tile("1,7,3").is_err());
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("3,4"), Ok(Square::new(3, 4)));
        assert!(parse_square("3").is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_effect_kind("preview"), Ok(EffectKind::ShowPotentialPlay));
        assert!(parse_effect_kind("sparkle").unwrap_err().contains("highlight"));
        assert_eq!(parse_chronology("simultaneous"), Ok(ChronologyType::Simultaneous));
        assert_eq!(parse_additivity("Temporary"), Ok(AdditivityType::Temporary));
        assert!(parse_additivity("sticky").is_err());
    }

    #[test]
    fn test_resolve_node() {
        let frame = FrameNode::new(Effect::none());
        let root = SequenceNode::new(ChronologyType::Consecutive, AdditivityType::Cumulative)
            .with_child(frame.clone());

        assert_eq!(resolve_node(&root, "root").unwrap(), root.id);
        assert_eq!(resolve_node(&root, "ROOT").unwrap(), root.id);
        assert_eq!(resolve_node(&root, &frame.id.to_string()).unwrap(), frame.id);
        assert_eq!(resolve_node(&root, &frame.id.to_hex()).unwrap(), frame.id);
        assert!(matches!(
            resolve_node(&root, "zzzz"),
            Err(PrefixError::NoMatch(_))
        ));
    }
}
