//! Phone-link normalizer.
//!
//! `tel:` hrefs authored with spaces, dashes or brackets are rewritten to
//! `tel:` followed by an optional `+` and digits only.

use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const LINK_SELECTOR: &str = "a[href]";
const SCHEME: &str = "tel:";

/// Normalized form of a `tel:` href, or `None` if `href` is not one or has
/// no digits to keep.
pub fn normalize_tel(href: &str) -> Option<String> {
    let scheme = href.get(..SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    let number = href[SCHEME.len()..].trim();
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let plus = if number.starts_with('+') { "+" } else { "" };
    Some(format!("{SCHEME}{plus}{digits}"))
}

#[derive(Default)]
pub struct PhoneLinks {
    rewritten: usize,
}

impl PhoneLinks {
    pub fn setup(host: &mut dyn Host) -> Option<Self> {
        let mut this = Self::default();
        this.normalize(host);
        Some(this)
    }

    fn normalize(&mut self, host: &mut dyn Host) {
        for link in host.query_all(LINK_SELECTOR) {
            let Some(href) = host.attribute(link, "href") else {
                continue;
            };
            match normalize_tel(&href) {
                Some(fixed) if fixed != href => {
                    host.set_attribute(link, "href", &fixed);
                    self.rewritten += 1;
                }
                _ => {}
            }
        }
    }

    pub fn rewritten(&self) -> usize {
        self.rewritten
    }
}

impl Behavior for PhoneLinks {
    fn name(&self) -> &'static str {
        "phone-links"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Ready, SignalKind::DomChange]
    }

    fn on_signal(&mut self, _signal: &Signal, host: &mut dyn Host) {
        self.normalize(host);
    }

    fn describe(&self) -> String {
        format!("{} rewritten", self.rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementSpec;
    use crate::dom::env::Environment;
    use crate::dom::page::Page;

    #[test]
    fn test_normalize_tel() {
        assert_eq!(normalize_tel("tel:+44 (0)20 7946-0018").as_deref(), Some("tel:+4402079460018"));
        assert_eq!(normalize_tel("tel: 555.123.4567").as_deref(), Some("tel:5551234567"));
        assert_eq!(normalize_tel("TEL:123").as_deref(), Some("tel:123"));
        assert_eq!(normalize_tel("tel:"), None);
        assert_eq!(normalize_tel("mailto:a@b.c"), None);
        assert_eq!(normalize_tel("te"), None);
    }

    #[test]
    fn test_rewrites_only_changed_links_and_reruns_on_dom_change() {
        let mut page = Page::new(1280.0, 800.0);
        let messy = page.append(page.root(), ElementSpec::new(LINK_SELECTOR).attr("href", "tel:+1 (555) 010-9999"));
        let clean = page.append(page.root(), ElementSpec::new(LINK_SELECTOR).attr("href", "tel:5550100"));
        let mail = page.append(page.root(), ElementSpec::new(LINK_SELECTOR).attr("href", "mailto:hi@example.com"));

        let mut p = PhoneLinks::setup(&mut page).unwrap();
        assert_eq!(page.attribute(messy, "href").as_deref(), Some("tel:+15550109999"));
        assert_eq!(page.attribute(clean, "href").as_deref(), Some("tel:5550100"));
        assert_eq!(page.attribute(mail, "href").as_deref(), Some("mailto:hi@example.com"));
        assert_eq!(p.rewritten(), 1);

        let rev = page.revision();
        p.on_signal(&Signal::DomChange, &mut page);
        assert_eq!(page.revision(), rev);

        let added = page.append(page.root(), ElementSpec::new(LINK_SELECTOR).attr("href", "tel:020 7946"));
        p.on_signal(&Signal::DomChange, &mut page);
        assert_eq!(page.attribute(added, "href").as_deref(), Some("tel:0207946"));
        assert_eq!(p.rewritten(), 2);
    }
}
