//! Host view state: the diagram, one drag controller per node, and the SQL
//! preview toggle.

use crate::ddl::DdlOptions;
use crate::diagram::Diagram;
use crate::drag::{DragConfig, DragController};
use crate::model::Position;
use std::collections::HashMap;

pub struct Canvas {
    diagram: Diagram,
    drags: HashMap<String, DragController>,
    drag_config: DragConfig,
    ddl: DdlOptions,
    show_sql: bool,
}

impl Canvas {
    pub fn new(diagram: Diagram, drag_config: DragConfig, ddl: DdlOptions) -> Self {
        Self {
            diagram,
            drags: HashMap::new(),
            drag_config,
            ddl,
            show_sql: false,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    pub fn is_dragging(&self, table_id: &str) -> bool {
        self.drags.get(table_id).is_some_and(|d| d.is_dragging())
    }

    pub fn pointer_down(&mut self, table_id: &str, pointer: Position) {
        let Some(node) = self.diagram.table(table_id) else {
            log::trace!(table_id; "Pointer down on unknown table");
            return;
        };
        let origin = node.position;
        let config = self.drag_config;
        self.drags
            .entry(table_id.to_string())
            .or_insert_with(|| DragController::new(config))
            .pointer_down(pointer, origin);
    }

    /// Returns `true` when the move repositioned the node.
    pub fn pointer_move(&mut self, table_id: &str, pointer: Position) -> bool {
        let target = self
            .drags
            .get_mut(table_id)
            .and_then(|drag| drag.pointer_move(pointer));
        match target {
            Some(pos) => self.diagram.move_table(table_id, pos.x, pos.y),
            None => false,
        }
    }

    pub fn pointer_up(&mut self, table_id: &str) {
        if let Some(drag) = self.drags.get_mut(table_id) {
            drag.pointer_up();
        }
    }

    pub fn pointer_leave(&mut self, table_id: &str) {
        if let Some(drag) = self.drags.get_mut(table_id) {
            drag.pointer_leave();
        }
    }

    pub fn show_sql(&self) -> bool {
        self.show_sql
    }

    pub fn toggle_sql(&mut self) -> bool {
        self.show_sql = !self.show_sql;
        self.show_sql
    }

    /// Schema text while the preview is open.
    pub fn sql_preview(&self) -> Option<String> {
        self.show_sql
            .then(|| self.diagram.generate_schema_text_with(&self.ddl))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Diagram::sample(), DragConfig::default(), DdlOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_moves_only_that_table() {
        let mut canvas = Canvas::default();
        canvas.pointer_down("1", Position::new(120.0, 110.0));
        assert!(canvas.is_dragging("1"));
        assert!(canvas.pointer_move("1", Position::new(220.0, 310.0)));
        canvas.pointer_up("1");

        let d = canvas.diagram();
        assert_eq!(d.table("1").unwrap().position, Position::new(200.0, 300.0));
        assert_eq!(d.table("2").unwrap().position, Position::new(400.0, 100.0));
        assert!(!canvas.is_dragging("1"));
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut canvas = Canvas::default();
        assert!(!canvas.pointer_move("1", Position::new(0.0, 0.0)));
        assert_eq!(
            canvas.diagram().table("1").unwrap().position,
            Position::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_leave_freezes_drag() {
        let mut canvas = Canvas::default();
        canvas.pointer_down("2", Position::new(410.0, 110.0));
        canvas.pointer_leave("2");
        assert!(!canvas.pointer_move("2", Position::new(900.0, 900.0)));
        assert_eq!(
            canvas.diagram().table("2").unwrap().position,
            Position::new(400.0, 100.0)
        );
    }

    #[test]
    fn test_unknown_table_ignored() {
        let mut canvas = Canvas::default();
        canvas.pointer_down("missing", Position::new(0.0, 0.0));
        assert!(!canvas.is_dragging("missing"));
        assert!(!canvas.pointer_move("missing", Position::new(1.0, 1.0)));
    }

    #[test]
    fn test_sql_preview_toggle() {
        let mut canvas = Canvas::default();
        assert!(canvas.sql_preview().is_none());
        assert!(canvas.toggle_sql());
        let sql = canvas.sql_preview().unwrap();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS users ("));
        assert!(!canvas.toggle_sql());
        assert!(canvas.sql_preview().is_none());
    }
}
