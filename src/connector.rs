//! Straight-line connectors between related table nodes.

use crate::model::{Position, Relationship, TableNode};
use std::collections::HashMap;

/// Horizontal distance from a node's left edge to its right-hand anchor.
/// Fixed: a node drawn wider than this has its outgoing connector start
/// inside the box.
pub const NODE_WIDTH: f64 = 192.0;
/// Vertical distance from a node's top edge to both anchors.
pub const ANCHOR_OFFSET_Y: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub relationship_id: String,
    pub from: Position,
    pub to: Position,
    pub label: &'static str,
}

impl Connector {
    pub fn midpoint(&self) -> Position {
        Position::new((self.from.x + self.to.x) / 2.0, (self.from.y + self.to.y) / 2.0)
    }
}

/// Connect the right edge of `from` to the left edge of `to`.
pub fn route(rel: &Relationship, from: &TableNode, to: &TableNode) -> Connector {
    Connector {
        relationship_id: rel.id.clone(),
        from: Position::new(
            from.position.x + NODE_WIDTH,
            from.position.y + ANCHOR_OFFSET_Y,
        ),
        to: Position::new(to.position.x, to.position.y + ANCHOR_OFFSET_Y),
        label: rel.cardinality.symbol(),
    }
}

/// Look both endpoints up by table name. Returns `None` when either name is
/// not in `index`; nothing is drawn for such a relationship.
pub fn resolve(rel: &Relationship, index: &HashMap<&str, &TableNode>) -> Option<Connector> {
    let (Some(from), Some(to)) = (
        index.get(rel.from_table.as_str()),
        index.get(rel.to_table.as_str()),
    ) else {
        log::debug!(
            relationship = rel.id.as_str(),
            from_table = rel.from_table.as_str(),
            to_table = rel.to_table.as_str();
            "Skipping relationship with unknown endpoint"
        );
        return None;
    };
    Some(route(rel, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cardinality;

    fn nodes() -> (TableNode, TableNode) {
        (
            TableNode::new("1", "users", 100.0, 100.0),
            TableNode::new("2", "orders", 400.0, 100.0),
        )
    }

    #[test]
    fn test_route_anchors() {
        let (users, orders) = nodes();
        let rel = Relationship::new("1", ("users", "id"), ("orders", "user_id"), Cardinality::OneToMany);
        let c = route(&rel, &users, &orders);

        assert_eq!(c.from, Position::new(292.0, 150.0));
        assert_eq!(c.to, Position::new(400.0, 150.0));
        assert_eq!(c.midpoint(), Position::new(346.0, 150.0));
        assert_eq!(c.label, "1:N");
    }

    #[test]
    fn test_resolve_missing_endpoint() {
        let (users, orders) = nodes();
        let index: HashMap<&str, &TableNode> = [("users", &users), ("orders", &orders)].into_iter().collect();

        let dangling = Relationship::new("2", ("users", "id"), ("invoices", "user_id"), Cardinality::OneToOne);
        assert!(resolve(&dangling, &index).is_none());

        let dangling_src = Relationship::new("3", ("accounts", "id"), ("orders", "user_id"), Cardinality::OneToOne);
        assert!(resolve(&dangling_src, &index).is_none());
    }

    #[test]
    fn test_self_relationship() {
        let (users, _) = nodes();
        let index: HashMap<&str, &TableNode> = [("users", &users)].into_iter().collect();
        let rel = Relationship::new("1", ("users", "id"), ("users", "manager_id"), Cardinality::ManyToMany);
        let c = resolve(&rel, &index).unwrap();
        assert_eq!(c.from, Position::new(292.0, 150.0));
        assert_eq!(c.to, Position::new(100.0, 150.0));
        assert_eq!(c.label, "N:M");
    }
}
