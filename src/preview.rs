//! Static braille rendering of a [`Scene`], printed inline in the terminal.

use std::io;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    TerminalOptions, Viewport,
};

use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_circle, draw_ring};
use crate::map::{Rgb, Scene};

/// Longest city label drawn next to a marker
const MAX_LABEL: usize = 24;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Rows needed to show `scene` at `columns` wide: border, map, legend line
pub fn preview_height(scene: &Scene, columns: u16) -> u16 {
    let inner_columns = columns.saturating_sub(2) as f64;
    let map_rows = (scene.height / scene.width * inner_columns * 2.0 / 4.0).ceil() as u16;
    map_rows + 3
}

/// Draw `scene` once below the cursor
pub fn print(scene: &Scene, columns: Option<u16>) -> io::Result<()> {
    let columns = match columns {
        Some(columns) => columns,
        None => crossterm::terminal::size()?.0,
    };

    let options = TerminalOptions {
        viewport: Viewport::Inline(preview_height(scene, columns)),
    };
    let mut terminal = match ratatui::try_init_with_options(options) {
        Ok(terminal) => terminal,
        Err(e) => {
            // Raw mode may already be on if the cursor query failed
            let _ = crossterm::terminal::disable_raw_mode();
            return Err(e);
        }
    };
    let result = terminal.draw(|frame| {
        let area = frame.area();
        let area = Rect {
            width: area.width.min(columns),
            ..area
        };
        frame.render_widget(PreviewWidget::new(scene), area);
    });
    ratatui::restore();
    result?;

    println!();
    Ok(())
}

/// Bordered map with state outlines, city markers and labels, and a legend
/// line along the bottom
pub struct PreviewWidget<'a> {
    scene: &'a Scene,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (col, row, ch) in canvas.cells() {
            if col >= area.width as usize || row >= area.height as usize {
                continue;
            }
            let x = area.x + col as u16;
            let y = area.y + row as u16;
            buf[(x, y)].set_char(ch).set_fg(color);
        }
    }

    fn render_map(&self, area: Rect, buf: &mut Buffer) {
        let (width, height) = (area.width as usize, area.height as usize);
        // Braille gives 2x4 pixels per character
        let scale = (width as f64 * 2.0 / self.scene.width).min(height as f64 * 4.0 / self.scene.height);

        // One layer per fill color, in order of first appearance
        let mut layers: Vec<(Rgb, BrailleCanvas)> = Vec::new();
        for state in &self.scene.states {
            let idx = match layers.iter().position(|(fill, _)| *fill == state.fill) {
                Some(idx) => idx,
                None => {
                    layers.push((state.fill, BrailleCanvas::new(width, height)));
                    layers.len() - 1
                }
            };
            for ring in &state.rings {
                draw_ring(&mut layers[idx].1, ring, scale);
            }
        }
        for (fill, canvas) in &layers {
            Self::render_layer(canvas, color(*fill), area, buf);
        }

        let mut cities = BrailleCanvas::new(width, height);
        let mut labels = Vec::new();
        for city in &self.scene.cities {
            let center = (city.center * scale).round();
            let (px, py) = (center.x as i32, center.y as i32);
            let radius = (city.radius * scale).round().max(1.0) as i32;
            draw_circle(&mut cities, px, py, radius);

            if px >= 0 && py >= 0 {
                labels.push(((px / 2) as u16 + 2, (py / 4) as u16, city.place.as_str()));
            }
        }
        Self::render_layer(&cities, color(Rgb::CITY), area, buf);

        let label_style = Style::default().fg(Color::White);
        for (lx, ly, text) in labels {
            if ly >= area.height || lx >= area.width {
                continue;
            }
            let max_len = (area.width - lx) as usize;
            let display: String = text.chars().take(max_len.min(MAX_LABEL)).collect();
            buf.set_string(area.x + lx, area.y + ly, display, label_style);
        }
    }

    fn legend_line(&self) -> Line<'a> {
        let spans: Vec<Span> = self
            .scene
            .legend
            .iter()
            .flat_map(|entry| {
                [
                    Span::styled("■ ", Style::default().fg(color(entry.swatch))),
                    Span::styled(entry.label, Style::default().fg(Color::Gray)),
                    Span::raw("  "),
                ]
            })
            .collect();
        Line::from(spans)
    }
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " States Lived ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 || inner.width == 0 {
            return;
        }

        let map_area = Rect {
            height: inner.height - 1,
            ..inner
        };
        let legend_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };

        self.render_map(map_area, buf);
        Paragraph::new(self.legend_line()).render(legend_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{CityMarker, MapRenderer, StateShape};
    use glam::DVec2;

    fn scene() -> Scene {
        Scene {
            width: 960.0,
            height: 500.0,
            states: vec![StateShape {
                name: Some("Square".to_string()),
                rings: vec![vec![
                    DVec2::new(100.0, 100.0),
                    DVec2::new(400.0, 100.0),
                    DVec2::new(400.0, 300.0),
                    DVec2::new(100.0, 300.0),
                ]],
                fill: Rgb::LIVED,
            }],
            cities: vec![CityMarker {
                place: "Austin".to_string(),
                center: DVec2::new(480.0, 250.0),
                radius: 12.0,
            }],
            legend: MapRenderer::default().legend(),
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn render(width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&scene()).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_height_follows_aspect() {
        // 40 inner columns = 80 px wide -> 41.7 px tall -> 11 rows
        assert_eq!(preview_height(&scene(), 42), 14);
    }

    #[test]
    fn test_title_and_legend() {
        let buf = render(42, 14);
        assert!(row(&buf, 0).contains("States Lived"));
        assert!(row(&buf, 12).contains("■ Cities Lived"));
    }

    #[test]
    fn test_state_outline_uses_fill_color() {
        let buf = render(42, 14);
        let lived = buf
            .content()
            .iter()
            .filter(|cell| cell.fg == Color::Rgb(84, 36, 55))
            .filter(|cell| cell.symbol().chars().all(|c| ('\u{2801}'..='\u{28FF}').contains(&c)))
            .count();
        assert!(lived > 10, "only {lived} outline cells");
    }

    #[test]
    fn test_city_marker_and_label() {
        let buf = render(42, 14);
        // Center (480, 250) * 80/960 -> pixel (40, 21) -> cell (20, 5), inside the border
        assert_eq!(buf[(21, 6)].fg, Color::Rgb(217, 91, 67));
        assert!(row(&buf, 6).contains("Austin"));
    }

    #[cfg(unix)]
    #[test]
    fn test_print_without_terminal_is_an_error() {
        if std::fs::File::open("/dev/tty").is_ok() {
            return;
        }
        assert!(print(&scene(), Some(80)).is_err());
    }

    #[test]
    fn test_tiny_area_draws_only_border() {
        let buf = render(10, 2);
        assert!(!row(&buf, 0).contains("Austin"));
    }
}
