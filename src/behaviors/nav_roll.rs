//! Nav-link text roll.
//!
//! Each `.nav-link` gets a `.nav-link-label` child carrying its text (the
//! stylesheet animates a duplicate from `data-text`).  Hover or focus starts
//! one roll at a time; the label's `nav-roll` animation end clears it.

use crate::dom::element::{ElementId, ElementSpec};
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const LINK_SELECTOR: &str = ".nav-link";
pub const LABEL_SELECTOR: &str = ".nav-link-label";
pub const ROLLING_CLASS: &str = "is-rolling";
const ANIMATION_NAME: &str = "nav-roll";

pub struct NavRoll {
    links: Vec<ElementId>,
}

impl NavRoll {
    pub fn setup(host: &mut dyn Host) -> Option<Self> {
        let candidates = host.query_all(LINK_SELECTOR);
        if candidates.is_empty() {
            return None;
        }

        let mut links = Vec::new();
        for link in candidates {
            if host.query_within(link, LABEL_SELECTOR).is_none() {
                let text = host.text(link).trim().to_string();
                if text.is_empty() {
                    continue;
                }
                host.set_text(link, "");
                host.append_element(
                    link,
                    ElementSpec::new(LABEL_SELECTOR).attr("data-text", &text).text(&text),
                );
            }
            links.push(link);
        }
        Some(Self { links })
    }

    fn start(&self, link: ElementId, host: &mut dyn Host) {
        if host.prefers_reduced_motion() {
            return;
        }
        if host.attribute(link, "data-rolling").as_deref() == Some("1") {
            return;
        }
        host.set_attribute(link, "data-rolling", "1");
        host.set_class(link, ROLLING_CLASS, true);
    }

    fn end(&self, link: ElementId, host: &mut dyn Host) {
        host.set_class(link, ROLLING_CLASS, false);
        host.set_attribute(link, "data-rolling", "0");
    }

    fn link_for(&self, target: ElementId, host: &dyn Host) -> Option<ElementId> {
        let link = host.closest(target, LINK_SELECTOR)?;
        self.links.contains(&link).then_some(link)
    }

    pub fn links(&self) -> &[ElementId] {
        &self.links
    }
}

impl Behavior for NavRoll {
    fn name(&self) -> &'static str {
        "nav-roll"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::PointerEnter, SignalKind::FocusIn, SignalKind::AnimationEnd]
    }

    fn on_signal(&mut self, signal: &Signal, host: &mut dyn Host) {
        match signal {
            Signal::PointerEnter { target } => {
                // Pointer enter does not bubble: only the link itself counts.
                if self.links.contains(target) {
                    self.start(*target, host);
                }
            }
            Signal::FocusIn { target } => {
                if let Some(link) = self.link_for(*target, host) {
                    self.start(link, host);
                }
            }
            Signal::AnimationEnd { target, name } if name == ANIMATION_NAME => {
                if host.closest(*target, LABEL_SELECTOR).is_none() {
                    return;
                }
                if let Some(link) = self.link_for(*target, host) {
                    self.end(link, host);
                }
            }
            _ => {}
        }
    }

    fn describe(&self) -> String {
        format!("{} link(s)", self.links.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::env::Environment;
    use crate::dom::page::Page;

    fn page() -> (Page, ElementId, ElementId) {
        let mut page = Page::new(1280.0, 800.0);
        let root = page.root();
        let plain = page.append(root, ElementSpec::new(LINK_SELECTOR).text("  Services "));
        let labelled = page.append(root, ElementSpec::new(LINK_SELECTOR));
        page.append(labelled, ElementSpec::new(LABEL_SELECTOR).text("About"));
        page.append(root, ElementSpec::new(LINK_SELECTOR));
        (page, plain, labelled)
    }

    #[test]
    fn test_setup_wraps_text_in_label() {
        let (mut page, plain, labelled) = page();
        let r = NavRoll::setup(&mut page).unwrap();
        let label = page.query_within(plain, LABEL_SELECTOR).unwrap();
        assert_eq!(page.text(label), "Services");
        assert_eq!(page.attribute(label, "data-text").as_deref(), Some("Services"));
        assert_eq!(page.text(plain), "");
        // The empty link is skipped.
        assert_eq!(r.links(), &[plain, labelled]);
    }

    #[test]
    fn test_roll_starts_once_and_ends_on_animation() {
        let (mut page, plain, _) = page();
        let mut r = NavRoll::setup(&mut page).unwrap();
        let label = page.query_within(plain, LABEL_SELECTOR).unwrap();

        r.on_signal(&Signal::PointerEnter { target: plain }, &mut page);
        assert!(page.has_class(plain, ROLLING_CLASS));
        let rev = page.revision();
        r.on_signal(&Signal::FocusIn { target: label }, &mut page);
        assert_eq!(page.revision(), rev);

        r.on_signal(&Signal::AnimationEnd { target: label, name: "fade".into() }, &mut page);
        assert!(page.has_class(plain, ROLLING_CLASS));
        r.on_signal(&Signal::AnimationEnd { target: label, name: ANIMATION_NAME.into() }, &mut page);
        assert!(!page.has_class(plain, ROLLING_CLASS));
        assert_eq!(page.attribute(plain, "data-rolling").as_deref(), Some("0"));
    }

    #[test]
    fn test_reduced_motion_suppresses_roll() {
        let (mut page, plain, _) = page();
        page.set_reduced_motion(true);
        let mut r = NavRoll::setup(&mut page).unwrap();
        r.on_signal(&Signal::PointerEnter { target: plain }, &mut page);
        assert!(!page.has_class(plain, ROLLING_CLASS));
    }
}
