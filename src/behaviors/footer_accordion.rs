//! Footer accordion: opening one disclosure closes its siblings.

use crate::dom::element::ElementId;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const ROOT_SELECTOR: &str = "[data-footer-accordion]";
pub const ITEM_SELECTOR: &str = "[data-acc-item]";

pub struct FooterAccordion {
    items: Vec<ElementId>,
}

impl FooterAccordion {
    pub fn setup(host: &mut dyn Host) -> Option<Self> {
        let root = host.query(ROOT_SELECTOR)?;
        Some(Self {
            items: host.query_all_within(root, ITEM_SELECTOR),
        })
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }
}

impl Behavior for FooterAccordion {
    fn name(&self) -> &'static str {
        "footer-accordion"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::DetailsToggle]
    }

    fn on_signal(&mut self, signal: &Signal, host: &mut dyn Host) {
        let Signal::DetailsToggle { target } = signal else {
            return;
        };
        if !self.items.contains(target) || !host.is_open(*target) {
            return;
        }
        for &other in &self.items {
            if other != *target {
                host.set_open(other, false);
            }
        }
    }
}
