use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::gallery::select::Renderable;
use crate::gallery::view::GalleryView;
use crate::gallery::window::ROW_EXTENT;

const SWATCH_WIDTH: usize = 9;

/// The scrolling palette list: a loader line while the first page loads,
/// one swatch row per displayable palette in the window, and a loader line
/// at the bottom while more pages exist.
pub struct GalleryWidget<'a> {
    view: &'a GalleryView,
}

impl<'a> GalleryWidget<'a> {
    pub fn new(view: &'a GalleryView) -> Self {
        Self { view }
    }
}

fn to_color(c: &AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: &AppColor) -> Color {
    if c.prefers_dark_text() {
        Color::Black
    } else {
        Color::White
    }
}

/// A row of colored cells, each wide enough for its hex code.
fn build_swatch_row(colors: &[AppColor], with_labels: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for c in colors {
        let text = if with_labels {
            format!("{:^width$}", c.to_hex(), width = SWATCH_WIDTH)
        } else {
            " ".repeat(SWATCH_WIDTH)
        };
        spans.push(Span::styled(
            text,
            Style::default().bg(to_color(c)).fg(contrast_fg(c)),
        ));
    }
    Line::from(spans)
}

fn build_index_row(unit: &Renderable) -> Line<'static> {
    Line::from(Span::styled(
        format!("  #{:<4} {} colors", unit.index + 1, unit.colors.len()),
        Style::default().fg(Color::DarkGray),
    ))
}

/// The lines occupied by one palette row, in order.
fn palette_lines(unit: &Renderable) -> [Line<'static>; ROW_EXTENT] {
    [
        build_swatch_row(&unit.colors, true),
        build_swatch_row(&unit.colors, false),
        build_index_row(unit),
    ]
}

fn loader_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {text}"),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

fn header_lines(view: &GalleryView) -> Vec<Line<'static>> {
    let mut header = Vec::new();
    if view.show_initial_loader() {
        header.push(loader_line("Loading palettes..."));
    }
    if let Some(err) = view.error() {
        header.push(Line::from(Span::styled(
            format!("  {err} (press r to retry)"),
            Style::default().fg(Color::Red),
        )));
    }
    header
}

fn gallery_block(view: &GalleryView) -> Block<'static> {
    let loaded = view.loader().records().len();
    Block::bordered().title(format!(" Palettes ({loaded}) "))
}

/// Split the bordered interior into header, list and footer areas.
fn split(view: &GalleryView, inner: Rect, header_len: usize) -> [Rect; 3] {
    let header_height = (header_len as u16).min(inner.height);
    let footer_height = u16::from(view.show_next_loader()).min(inner.height - header_height);
    Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Fill(1),
        Constraint::Length(footer_height),
    ])
    .areas(inner)
}

/// Lines available to palette rows when the gallery is drawn into `area`.
pub fn list_height(view: &GalleryView, area: Rect) -> u16 {
    let inner = gallery_block(view).inner(area);
    let [_, list_area, _] = split(view, inner, header_lines(view).len());
    list_area.height
}

impl Widget for GalleryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = gallery_block(self.view);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let header = header_lines(self.view);
        let [header_area, list_area, footer_area] = split(self.view, inner, header.len());

        Paragraph::new(header).render(header_area, buf);
        if self.view.show_next_loader() {
            Paragraph::new(loader_line("Loading more palettes...")).render(footer_area, buf);
        }

        // Row i starts at line i * ROW_EXTENT of the content; shift by the
        // scroll offset and clip to the list area.
        let offset = self.view.scroll_offset();
        let mut lines: Vec<Line<'static>> = vec![Line::default(); list_area.height as usize];
        for unit in self.view.renderables() {
            let top = unit.index * ROW_EXTENT;
            for (row, line) in palette_lines(&unit).into_iter().enumerate() {
                let Some(y) = (top + row).checked_sub(offset) else {
                    continue;
                };
                if let Some(slot) = lines.get_mut(y) {
                    *slot = line;
                }
            }
        }

        Paragraph::new(lines).render(list_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{Page, PaletteRecord};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn record(hexes: &[&str]) -> PaletteRecord {
        PaletteRecord::new(hexes.iter().map(|h| AppColor::from_hex(h).unwrap()).collect())
    }

    fn render(view: &GalleryView, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        GalleryWidget::new(view).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn shows_initial_loader() {
        let mut view = GalleryView::new(10);
        view.start();
        let text = render(&view, 60, 12);
        assert!(text.contains("Loading palettes..."));
    }

    #[test]
    fn renders_hex_labels_and_hides_degenerate_palettes() {
        let mut view = GalleryView::new(10);
        view.start();
        view.complete(Ok(Page {
            items: vec![
                record(&["#69d2e7", "#a7dbd8", "#69d2e7"]),
                record(&["#ffffff", "#ffffff"]),
            ],
            has_more: false,
        }));

        let text = render(&view, 60, 12);
        assert!(text.contains("#69d2e7"));
        assert!(text.contains("#a7dbd8"));
        assert!(!text.contains("#ffffff"));
        assert!(!text.contains("Loading more palettes..."));
    }

    #[test]
    fn shows_bottom_loader_while_more_pages_exist() {
        let mut view = GalleryView::new(10);
        view.start();
        view.complete(Ok(Page {
            items: vec![record(&["#000000", "#111111"])],
            has_more: true,
        }));
        assert!(render(&view, 60, 12).contains("Loading more palettes..."));
    }

    #[test]
    fn list_height_leaves_room_for_borders_and_loaders() {
        let area = Rect::new(0, 0, 60, 20);
        let mut view = GalleryView::new(10);
        view.start();
        // Borders plus the initial loader line.
        assert_eq!(list_height(&view, area), 20 - 2 - 1);

        view.complete(Ok(Page {
            items: vec![record(&["#000000", "#111111"])],
            has_more: true,
        }));
        // Borders plus the bottom loader line.
        assert_eq!(list_height(&view, area), 20 - 2 - 1);

        let mut done = GalleryView::new(10);
        done.start();
        done.complete(Ok(Page {
            items: vec![record(&["#000000", "#111111"])],
            has_more: false,
        }));
        assert_eq!(list_height(&done, area), 20 - 2);
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let mut view = GalleryView::new(1);
        view.start();
        render(&view, 4, 2);
        render(&view, 4, 3);
    }
}
