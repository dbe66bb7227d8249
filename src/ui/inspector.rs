//! Inspector panel: page environment, root classes and one summary line per
//! installed behavior.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use page_motion::behaviors::Runtime;
use page_motion::dom::env::Environment;
use page_motion::dom::page::Page;

use crate::ui::theme::Theme;

pub struct InspectorWidget<'a> {
    pub page: &'a Page,
    pub runtime: &'a Runtime,
    /// Frames in which at least one behavior ran.
    pub frames: u64,
    pub block: Option<Block<'a>>,
}

impl<'a> Widget for InspectorWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled("Environment", Theme::heading_style())));
        lines.extend(environment_lines(self.page, self.frames));
        lines.push(Line::raw(""));

        lines.push(Line::from(Span::styled("Root classes", Theme::heading_style())));
        lines.push(root_classes_line(self.page));
        lines.push(Line::raw(""));

        lines.push(Line::from(Span::styled(
            format!("Behaviors ({})", self.runtime.len()),
            Theme::heading_style(),
        )));
        for (name, summary) in self.runtime.describe() {
            lines.push(Line::from(vec![
                Span::styled(format!("{name:<18}"), Theme::name_style()),
                Span::raw(summary),
            ]));
        }

        let mut paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

fn environment_lines(page: &Page, frames: u64) -> Vec<Line<'static>> {
    let vp = page.viewport();
    vec![
        kv_line("Scroll", &format!("{:.0} / {:.0}", page.scroll_y(), page.max_scroll())),
        kv_line("Viewport", &format!("{:.0} x {:.0}", vp.width, vp.height)),
        kv_line("Clock", &format!("{} ms", page.now().as_millis())),
        kv_line("Frames", &frames.to_string()),
        flag_line("Reduced motion", page.prefers_reduced_motion()),
        flag_line("Touch input", page.is_touch_like()),
    ]
}

fn root_classes_line(page: &Page) -> Line<'static> {
    match page.get(page.root()) {
        Some(root) if !root.classes.is_empty() => Line::from(Span::styled(
            root.classes.iter().map(|c| format!(".{c}")).collect::<Vec<_>>().join(" "),
            Theme::active_style(),
        )),
        _ => Line::from(Span::styled("(none)", Theme::off_style())),
    }
}

fn kv_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Theme::name_style()),
        Span::raw(value.to_string()),
    ])
}

fn flag_line(label: &str, on: bool) -> Line<'static> {
    let (text, style) = if on {
        ("on", Theme::on_style())
    } else {
        ("off", Theme::off_style())
    };
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Theme::name_style()),
        Span::styled(text, style),
    ])
}
