pub mod canvas;
pub mod cli;
pub mod config;
pub mod connector;
pub mod ddl;
pub mod diagram;
pub mod document;
pub mod drag;
pub mod error;
pub mod measure;
pub mod model;
pub mod svg;

pub use canvas::Canvas;
pub use config::AppConfig;
pub use diagram::{Diagram, SchemaStats};
pub use error::ErdError;

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

use model::Position;
use svg::SvgRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Diagram canvas exposed to JavaScript. Pointer coordinates are in canvas
/// space.
#[wasm_bindgen]
pub struct ErdCanvas {
    canvas: Canvas,
    renderer: SvgRenderer,
}

#[wasm_bindgen]
impl ErdCanvas {
    /// Start from the built-in sample schema, or from a JSON document when
    /// one is given. `config` is the TOML accepted by the CLI's `--config`.
    #[wasm_bindgen(constructor)]
    pub fn new(json: Option<String>, config: Option<String>) -> Result<ErdCanvas, String> {
        let diagram = match json {
            Some(json) => document::from_json(&json).map_err(|e| e.to_string())?,
            None => Diagram::sample(),
        };
        let config = match config {
            Some(toml) => AppConfig::from_toml(&toml).map_err(|e| e.to_string())?,
            None => AppConfig::default(),
        };
        Ok(Self {
            canvas: Canvas::new(diagram, config.drag, config.ddl),
            renderer: SvgRenderer::new(config.render),
        })
    }

    #[wasm_bindgen(js_name = "moveTable")]
    pub fn move_table(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.canvas.diagram_mut().move_table(id, x, y)
    }

    #[wasm_bindgen(js_name = "renameTable")]
    pub fn rename_table(&mut self, id: &str, name: &str) -> bool {
        self.canvas.diagram_mut().rename_table(id, name)
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, id: &str, x: f64, y: f64) {
        self.canvas.pointer_down(id, Position::new(x, y));
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.canvas.pointer_move(id, Position::new(x, y))
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self, id: &str) {
        self.canvas.pointer_up(id);
    }

    #[wasm_bindgen(js_name = "pointerLeave")]
    pub fn pointer_leave(&mut self, id: &str) {
        self.canvas.pointer_leave(id);
    }

    #[wasm_bindgen(js_name = "toggleSql")]
    pub fn toggle_sql(&mut self) -> bool {
        self.canvas.toggle_sql()
    }

    #[wasm_bindgen(js_name = "sqlPreview")]
    pub fn sql_preview(&self) -> Option<String> {
        self.canvas.sql_preview()
    }

    #[wasm_bindgen(js_name = "schemaSql")]
    pub fn schema_sql(&self) -> String {
        self.canvas.diagram().generate_schema_text()
    }

    #[wasm_bindgen(js_name = "toSvg")]
    pub fn to_svg(&self) -> String {
        self.renderer.render(self.canvas.diagram())
    }

    #[wasm_bindgen(js_name = "toJson")]
    pub fn to_json(&self) -> Result<String, String> {
        document::to_json(self.canvas.diagram()).map_err(|e| e.to_string())
    }

    /// `{ tables, relationships, columns }`
    pub fn stats(&self) -> Result<Object, JsValue> {
        let stats = self.canvas.diagram().stats();
        let obj = Object::new();
        Reflect::set(&obj, &"tables".into(), &(stats.tables as u32).into())?;
        Reflect::set(
            &obj,
            &"relationships".into(),
            &(stats.relationships as u32).into(),
        )?;
        Reflect::set(&obj, &"columns".into(), &(stats.columns as u32).into())?;
        Ok(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_config_from_toml() {
        let config = "[ddl]\nquote_identifiers = true\n\n[drag]\nrelease_on_leave = false\n";
        let mut canvas = ErdCanvas::new(None, Some(config.to_string())).unwrap();

        canvas.toggle_sql();
        let sql = canvas.sql_preview().unwrap();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"users\" ("));

        canvas.pointer_down("1", 110.0, 110.0);
        canvas.pointer_leave("1");
        assert!(canvas.pointer_move("1", 210.0, 110.0));
        assert!(canvas.to_svg().contains(r#"<rect class="table-bg" x="200" y="100""#));
    }

    #[test]
    fn test_canvas_defaults_and_bad_config() {
        let mut canvas = ErdCanvas::new(None, None).unwrap();
        canvas.pointer_down("1", 110.0, 110.0);
        canvas.pointer_leave("1");
        assert!(!canvas.pointer_move("1", 210.0, 110.0));
        assert!(canvas.schema_sql().starts_with("CREATE TABLE IF NOT EXISTS users ("));

        assert!(ErdCanvas::new(None, Some("[drag]\nrelease_on_leave = 3".to_string())).is_err());
    }

    #[test]
    fn test_canvas_to_json_refuses_non_finite() {
        let mut canvas = ErdCanvas::new(None, None).unwrap();
        assert!(canvas.move_table("2", f64::NAN, 0.0));
        assert!(canvas.to_json().is_err());
    }
}
