//! Marks the site header while it sits over the dark section.

use crate::core::effect::ClassToggle;
use crate::dom::element::ElementId;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const HEADER_SELECTOR: &str = ".site-header";
pub const DARK_SECTION_SELECTOR: &str = ".thought_section2";
pub const ON_DARK_CLASS: &str = "is-on-dark";

pub struct DarkHeader {
    header: ClassToggle,
    section: ElementId,
    on_dark: bool,
}

impl DarkHeader {
    pub fn setup(host: &mut dyn Host) -> Option<Self> {
        let header = host.query(HEADER_SELECTOR)?;
        let section = host.query(DARK_SECTION_SELECTOR)?;
        let mut this = Self {
            header: ClassToggle::new(header, ON_DARK_CLASS),
            section,
            on_dark: false,
        };
        this.update(host);
        Some(this)
    }

    fn update(&mut self, host: &mut dyn Host) {
        let header = host.measure(self.header.element);
        let section = host.measure(self.section);
        self.on_dark = header.overlaps_vertically(&section);
        self.header.apply(host, self.on_dark);
    }
}

impl Behavior for DarkHeader {
    fn name(&self) -> &'static str {
        "dark-header"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Scroll, SignalKind::Resize]
    }

    fn on_signal(&mut self, _signal: &Signal, host: &mut dyn Host) {
        self.update(host);
    }

    fn describe(&self) -> String {
        if self.on_dark { "on dark" } else { "on light" }.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementSpec;
    use crate::dom::env::Environment;
    use crate::dom::page::Page;

    #[test]
    fn test_class_follows_overlap() {
        let mut page = Page::new(1280.0, 800.0);
        let header = page.append(page.root(), ElementSpec::new(HEADER_SELECTOR).at(0.0, 80.0).fixed());
        page.append(page.root(), ElementSpec::new(DARK_SECTION_SELECTOR).at(1000.0, 600.0));
        page.append(page.root(), ElementSpec::new("footer").at(1600.0, 2000.0));

        let mut d = DarkHeader::setup(&mut page).unwrap();
        assert!(!page.has_class(header, ON_DARK_CLASS));

        // Section top reaches 40, under the 80px header.
        page.set_scroll(960.0);
        d.on_signal(&Signal::Scroll, &mut page);
        assert!(page.has_class(header, ON_DARK_CLASS));

        // Section bottom at exactly the header top: no overlap.
        page.set_scroll(1600.0);
        d.on_signal(&Signal::Scroll, &mut page);
        assert!(!page.has_class(header, ON_DARK_CLASS));
    }

    #[test]
    fn test_requires_both_elements() {
        let mut page = Page::new(1280.0, 800.0);
        page.append(page.root(), ElementSpec::new(HEADER_SELECTOR).at(0.0, 80.0).fixed());
        assert!(DarkHeader::setup(&mut page).is_none());
    }
}
