use crate::connector::Connector;
use crate::diagram::Diagram;
use crate::measure::TextMetrics;
use crate::model::TableNode;
use serde::Deserialize;
use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub min_width: f64,
    pub min_height: f64,
    pub margin: f64,
    pub metrics: TextMetrics,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_width: 800.0,
            min_height: 384.0,
            margin: 20.0,
            metrics: TextMetrics::default(),
        }
    }
}

#[derive(Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

struct Bounds {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, diagram: &Diagram) -> String {
        let mut svg = String::new();
        self.write_svg(&mut svg, diagram)
            .expect("Writing to String buffer is infallible");
        svg
    }

    fn write_svg(&self, svg: &mut String, diagram: &Diagram) -> fmt::Result {
        let connectors = diagram.connectors();
        let bounds = self.bounds(diagram, &connectors);

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            bounds.width, bounds.height, bounds.min_x, bounds.min_y, bounds.width, bounds.height
        )?;

        writeln!(
            svg,
            r#"<style>
  .table-bg {{ fill: #fff; stroke: #d1d5db; stroke-width: 2; }}
  .table-header {{ fill: #2563eb; }}
  .table-name {{ font-family: sans-serif; font-size: 14px; font-weight: 600; fill: #fff; }}
  .column-name {{ font-family: sans-serif; font-size: 12px; font-weight: 500; fill: #1f2937; }}
  .column-name.pk {{ fill: #a16207; }}
  .column-name.fk {{ fill: #1d4ed8; }}
  .column-type {{ font-family: sans-serif; font-size: 12px; fill: #6b7280; }}
  .required {{ font-family: sans-serif; font-size: 12px; fill: #ef4444; }}
  .connector {{ stroke: #3b82f6; stroke-width: 2; }}
  .connector-label-bg {{ fill: #fff; stroke: #3b82f6; stroke-width: 1; }}
  .connector-label {{ font-family: sans-serif; font-size: 12px; font-weight: 500; fill: #2563eb; }}
</style>"#
        )?;

        writeln!(
            svg,
            r##"<defs><marker id="arrowhead" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="#3b82f6" /></marker></defs>"##
        )?;

        // Connectors behind nodes
        for connector in &connectors {
            self.render_connector(svg, connector)?;
        }

        for table in diagram.tables() {
            self.render_table(svg, table)?;
        }

        writeln!(svg, "</svg>")
    }

    fn bounds(&self, diagram: &Diagram, connectors: &[Connector]) -> Bounds {
        let metrics = &self.config.metrics;
        let mut min_x: f64 = 0.0;
        let mut min_y: f64 = 0.0;
        let mut max_x: f64 = 0.0;
        let mut max_y: f64 = 0.0;

        for table in diagram.tables() {
            let (w, h) = metrics.node_size(table);
            min_x = min_x.min(table.position.x);
            min_y = min_y.min(table.position.y);
            max_x = max_x.max(table.position.x + w);
            max_y = max_y.max(table.position.y + h);
        }
        for c in connectors {
            for p in [c.from, c.to] {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
        }

        let min_x = if min_x < 0.0 { min_x - self.config.margin } else { 0.0 };
        let min_y = if min_y < 0.0 { min_y - self.config.margin } else { 0.0 };
        Bounds {
            min_x,
            min_y,
            width: (max_x + self.config.margin - min_x).max(self.config.min_width),
            height: (max_y + self.config.margin - min_y).max(self.config.min_height),
        }
    }

    fn render_table(&self, svg: &mut String, table: &TableNode) -> fmt::Result {
        let m = &self.config.metrics;
        let x = table.position.x;
        let y = table.position.y;
        let (w, h) = m.node_size(table);
        let header_h = m.header_height();

        writeln!(svg, r#"<g class="table" data-id="{}">"#, escape_xml(&table.id))?;
        writeln!(
            svg,
            r#"<rect class="table-bg" x="{}" y="{}" width="{}" height="{}" rx="8" />"#,
            x, y, w, h
        )?;
        writeln!(
            svg,
            r#"<rect class="table-header" x="{}" y="{}" width="{}" height="{}" rx="8" />"#,
            x, y, w, header_h
        )?;
        if !table.columns.is_empty() {
            // Square off the bottom corners of the header
            writeln!(
                svg,
                r#"<rect class="table-header" x="{}" y="{}" width="{}" height="8" />"#,
                x,
                y + header_h - 8.0,
                w
            )?;
        }
        writeln!(
            svg,
            r#"<text class="table-name" x="{}" y="{}">{}</text>"#,
            x + m.padding_x * 2.0,
            y + header_h / 2.0 + 5.0,
            escape_xml(&table.name)
        )?;

        let mut row_y = y + header_h + m.padding_y + m.line_height * 0.7;
        for col in &table.columns {
            let mut icons = String::new();
            if col.primary_key {
                icons.push('⚷');
            }
            if col.foreign_key {
                icons.push('⛓');
            }
            if !icons.is_empty() {
                writeln!(
                    svg,
                    r#"<text class="column-type" x="{}" y="{}">{}</text>"#,
                    x + m.padding_x,
                    row_y,
                    icons
                )?;
            }

            let class = if col.primary_key {
                "column-name pk"
            } else if col.foreign_key {
                "column-name fk"
            } else {
                "column-name"
            };
            let name_x = x + m.padding_x + m.icon_width;
            writeln!(
                svg,
                r#"<text class="{}" x="{}" y="{}">{}</text>"#,
                class,
                name_x,
                row_y,
                escape_xml(&col.name)
            )?;

            let type_x = name_x + m.text_width(&col.name) + m.char_width;
            writeln!(
                svg,
                r#"<text class="column-type" x="{}" y="{}">{}</text>"#,
                type_x,
                row_y,
                escape_xml(&col.typ)
            )?;

            if col.required && !col.primary_key {
                writeln!(
                    svg,
                    r#"<text class="required" x="{}" y="{}">*</text>"#,
                    type_x + m.text_width(&col.typ) + m.char_width,
                    row_y
                )?;
            }

            row_y += m.line_height;
        }

        writeln!(svg, "</g>")
    }

    fn render_connector(&self, svg: &mut String, c: &Connector) -> fmt::Result {
        let mid = c.midpoint();
        writeln!(
            svg,
            r#"<g class="relationship" data-id="{}">"#,
            escape_xml(&c.relationship_id)
        )?;
        writeln!(
            svg,
            r#"<line class="connector" x1="{}" y1="{}" x2="{}" y2="{}" marker-end="url(#arrowhead)" />"#,
            c.from.x, c.from.y, c.to.x, c.to.y
        )?;
        writeln!(
            svg,
            r#"<rect class="connector-label-bg" x="{}" y="{}" width="30" height="16" rx="2" />"#,
            mid.x - 15.0,
            mid.y - 8.0
        )?;
        writeln!(
            svg,
            r#"<text class="connector-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            mid.x,
            mid.y + 3.0,
            c.label
        )?;
        writeln!(svg, "</g>")
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
