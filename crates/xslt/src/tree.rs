//! The output-element tree used to rebuild a document from scratch.
use fieldmap_path::{Segment, split_path};
use fieldmap_rules::MappingRule;
use indexmap::IndexMap;

/// Children keyed by raw output segment (predicate included), in first-insertion order.
pub(crate) type Level<'r> = IndexMap<String, OutputNode<'r>>;

#[derive(Debug)]
pub(crate) enum OutputNode<'r> {
    Branch(Level<'r>),
    /// A plain leaf; a later rule with the same output path replaces it.
    Leaf(&'r MappingRule),
    /// A leaf whose segment carries a predicate: every rule gets its own element.
    Fanout(Vec<&'r MappingRule>),
}

pub(crate) fn build_tree(rules: &[MappingRule]) -> Level<'_> {
    let mut root = Level::new();
    for rule in rules {
        insert(&mut root, rule);
    }
    root
}

fn insert<'r>(root: &mut Level<'r>, rule: &'r MappingRule) {
    let keys: Vec<&str> = split_path(&rule.output_path)
        .into_iter()
        .filter(|k| !Segment::parse(k).is_index())
        .collect();
    let Some((leaf, parents)) = keys.split_last() else {
        return;
    };

    let mut level = root;
    for key in parents {
        let node = level
            .entry((*key).to_string())
            .or_insert_with(|| OutputNode::Branch(Level::new()));
        match node {
            OutputNode::Branch(children) => level = children,
            _ => {
                log::warn!(
                    "Output path '{}' passes through the mapped field '{}'; mapping {} ignored",
                    rule.output_path,
                    key,
                    rule.id
                );
                return;
            }
        }
    }

    if Segment::parse(leaf).raw_predicate().is_some() {
        match level.get_mut(*leaf) {
            Some(OutputNode::Fanout(items)) => items.push(rule),
            Some(other) => *other = OutputNode::Fanout(vec![rule]),
            None => {
                level.insert((*leaf).to_string(), OutputNode::Fanout(vec![rule]));
            }
        }
    } else {
        if let Some(OutputNode::Branch(children)) = level.get(*leaf) {
            log::warn!(
                "Mapping {} on '{}' replaces {} nested output field(s) under '{}'",
                rule.id,
                rule.output_path,
                children.len(),
                leaf
            );
        }
        level.insert((*leaf).to_string(), OutputNode::Leaf(rule));
    }
}
