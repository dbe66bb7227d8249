//! Custom Ratatui widget that draws the visible part of a [`Page`].
//!
//! The viewport is scaled onto the pane: one terminal row covers
//! `viewport.height / rows` CSS pixels.  Each visible element is drawn at
//! its top edge with its label, its state classes and any inline properties a
//! behavior wrote.  Scrolling elements get a guide down their left edge.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use page_motion::dom::element::{ElementId, Rect as PageRect, Viewport};
use page_motion::dom::env::Environment;
use page_motion::dom::page::Page;

use super::theme::Theme;

/// Area inside the border the preview draws around the page pane.
pub fn inner_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Maps between viewport pixels and terminal cells.
struct Projection {
    inner: Rect,
    viewport: Viewport,
}

impl Projection {
    fn row(&self, y: f64) -> u16 {
        let rows = f64::from(self.inner.height);
        let r = (y.max(0.0) / self.viewport.height * rows).floor();
        self.inner.y + (r as u16).min(self.inner.height.saturating_sub(1))
    }

    fn col(&self, x: f64) -> u16 {
        let cols = f64::from(self.inner.width);
        let c = (x.max(0.0) / self.viewport.width * cols).floor();
        self.inner.x + (c as u16).min(self.inner.width.saturating_sub(1))
    }

    /// Cell back to viewport pixels (top-left corner of the cell).
    fn to_viewport(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        let inside = col >= self.inner.x
            && col < self.inner.x + self.inner.width
            && row >= self.inner.y
            && row < self.inner.y + self.inner.height;
        if !inside {
            return None;
        }
        let x = f64::from(col - self.inner.x) / f64::from(self.inner.width) * self.viewport.width;
        let y = f64::from(row - self.inner.y) / f64::from(self.inner.height) * self.viewport.height;
        Some((x, y))
    }
}

/// `true` if the element or any ancestor is hidden.
fn hidden_in_tree(page: &Page, id: ElementId) -> bool {
    let mut cur = Some(id);
    while let Some(el) = cur.and_then(|i| page.get(i)) {
        if el.hidden {
            return true;
        }
        cur = el.parent;
    }
    false
}

fn is_visible(rect: &PageRect, viewport: Viewport) -> bool {
    rect.bottom() > 0.0 && rect.top < viewport.height
}

/// Topmost visible element under a terminal cell.
pub fn element_at(page: &Page, inner: Rect, col: u16, row: u16) -> Option<ElementId> {
    let proj = Projection {
        inner,
        viewport: page.viewport(),
    };
    let (x, y) = proj.to_viewport(col, row)?;

    page.document_order()
        .into_iter()
        .rev()
        .filter(|&id| id != page.root() && !hidden_in_tree(page, id))
        .find(|&id| {
            let r = page.measure(id);
            x >= r.left && x < r.left + r.width && y >= r.top && y < r.bottom()
        })
}

pub struct PageView<'a> {
    page: &'a Page,
    block: Option<Block<'a>>,
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn line_for(&self, id: ElementId) -> Option<Line<'static>> {
        let el = self.page.get(id)?;
        let style = if el.fixed {
            Theme::fixed_style()
        } else {
            Theme::section_style()
        };

        let mut spans = vec![Span::styled(el.label().to_string(), style)];
        if !el.text.is_empty() {
            spans.push(Span::styled(format!(" \"{}\"", el.text), style));
        }
        for class in &el.classes {
            spans.push(Span::styled(format!(" .{class}"), Theme::active_style()));
        }
        for (name, value) in &el.properties {
            if !value.is_empty() {
                spans.push(Span::styled(format!(" {name}:{value}"), Theme::property_style()));
            }
        }
        Some(Line::from(spans))
    }
}

impl<'a> Widget for PageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let viewport = self.page.viewport();
        let proj = Projection { inner, viewport };
        let visible: Vec<(ElementId, PageRect)> = self
            .page
            .document_order()
            .into_iter()
            .filter(|&id| id != self.page.root() && !hidden_in_tree(self.page, id))
            .map(|id| (id, self.page.measure(id)))
            .filter(|(_, r)| is_visible(r, viewport))
            .collect();

        // Guides first so labels drawn later sit on top.
        for (id, rect) in &visible {
            if self.page.get(*id).is_some_and(|e| e.fixed) {
                continue;
            }
            let x = proj.col(rect.left);
            let top = proj.row(rect.top);
            let bottom = proj.row(rect.bottom().min(viewport.height - 1.0));
            for y in top..=bottom {
                buf.set_string(x, y, "│", Theme::guide_style());
            }
        }

        for (id, rect) in &visible {
            let Some(line) = self.line_for(*id) else {
                continue;
            };
            let x = proj.col(rect.left);
            let y = proj.row(rect.top);
            let width = (inner.x + inner.width).saturating_sub(x);
            buf.set_line(x, y, &line, width);
        }

        render_scrollbar(
            inner,
            self.page.document_height(),
            self.page.scroll_y(),
            viewport.height,
            buf,
        );
    }
}

/// Scroll position along the right edge of `area`.
fn render_scrollbar(area: Rect, total: f64, offset: f64, visible: f64, buf: &mut Buffer) {
    if total <= visible || area.height < 2 || area.width == 0 {
        return;
    }
    let x = area.x + area.width.saturating_sub(1);
    let h = f64::from(area.height);
    let thumb_sz = ((visible / total) * h).ceil().max(1.0) as u16;
    let max_off = total - visible;
    let thumb_pos = ((offset / max_off) * (h - f64::from(thumb_sz))).round() as u16;

    for row in 0..area.height {
        let is_thumb = row >= thumb_pos && row < thumb_pos + thumb_sz;
        let (ch, fg) = if is_thumb {
            ('█', Color::LightBlue)
        } else {
            ('│', Color::DarkGray)
        };
        if let Some(cell) = buf.cell_mut(Position::new(x, area.y + row)) {
            cell.set_char(ch).set_fg(fg);
        }
    }
}
