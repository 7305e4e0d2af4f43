use crate::connector::NODE_WIDTH;
use crate::model::TableNode;
use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_padding: f64,
    /// Room for the key/link glyphs in front of a column name.
    pub icon_width: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 20.0,
            padding_x: 8.0,
            padding_y: 8.0,
            header_padding: 8.0,
            icon_width: 28.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    pub fn header_height(&self) -> f64 {
        self.line_height + self.header_padding * 2.0
    }

    /// Box size of a rendered table node. Never narrower than the connector
    /// anchor width.
    pub fn node_size(&self, table: &TableNode) -> (f64, f64) {
        let header_width = self.text_width(&table.name) + self.padding_x * 2.0;

        let max_col_width = table
            .columns
            .iter()
            .map(|c| {
                self.icon_width
                    + self.text_width(&c.name)
                    + self.char_width
                    + self.text_width(&c.typ)
                    + self.char_width * 2.0
                    + self.padding_x * 2.0
            })
            .fold(0.0, f64::max);

        let width = header_width.max(max_col_width).max(NODE_WIDTH);

        let body_height = if table.columns.is_empty() {
            0.0
        } else {
            table.columns.len() as f64 * self.line_height + self.padding_y * 2.0
        };

        (width, self.header_height() + body_height)
    }
}
