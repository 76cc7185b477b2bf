use super::{Item, Node};

/// Assign each item the level of its nearest preceding item with a strictly
/// smaller indent, plus one. Items with no such ancestor sit at level 0.
pub fn resolve_levels(items: Vec<Item>) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::with_capacity(items.len());
    // Indices of open ancestors; indents strictly increase from bottom to top.
    let mut open: Vec<usize> = Vec::new();

    for item in items {
        while let Some(&top) = open.last() {
            if nodes[top].item.indent < item.indent {
                break;
            }
            open.pop();
        }
        let level = open.last().map_or(0, |&parent| nodes[parent].level + 1);
        open.push(nodes.len());
        nodes.push(Node::new(item, level));
    }

    for idx in 1..nodes.len() {
        let level = nodes[idx].level;
        let previous = &mut nodes[idx - 1];
        previous.has_children = level > previous.level;
    }

    nodes
}
