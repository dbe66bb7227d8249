//! A complete marketing page with every region the behaviors look for.
//!
//! Used by the preview binary, `--replay` and the integration tests.

use crate::behaviors::{
    dark_header, drawer, float_cta, footer_accordion, half_image, header, hero, nav_roll, phone,
    submenu, wobble,
};
use crate::dom::element::ElementSpec;
use crate::dom::page::Page;

pub const HEADER_HEIGHT: f64 = 80.0;
pub const DRAWER_TRANSITION: &str = "0.35s";
pub const PHONE_HREF: &str = "tel:+1 (555) 010-2030";

/// Build the page for a viewport of `width` x `height`.
pub fn demo_page(width: f64, height: f64) -> Page {
    let mut page = Page::new(width, height);
    let root = page.root();

    let bar = page.append(
        root,
        ElementSpec::new(header::HEADER_SELECTOR)
            .also(dark_header::HEADER_SELECTOR)
            .at(0.0, HEADER_HEIGHT)
            .fixed(),
    );
    for (i, label) in ["Services", "Studio"].into_iter().enumerate() {
        let item = page.append(
            bar,
            ElementSpec::new(submenu::ITEM_SELECTOR)
                .at(24.0, 32.0)
                .left(160.0 + 140.0 * i as f64)
                .width(120.0)
                .fixed(),
        );
        page.append(
            item,
            ElementSpec::new(submenu::TRIGGER_SELECTOR)
                .at(24.0, 32.0)
                .fixed()
                .text(label)
                .attr("aria-expanded", "false"),
        );
    }
    for (i, label) in ["Work", "About", "Contact"].into_iter().enumerate() {
        page.append(
            bar,
            ElementSpec::new(nav_roll::LINK_SELECTOR)
                .at(24.0, 32.0)
                .left(460.0 + 110.0 * i as f64)
                .width(100.0)
                .fixed()
                .text(label),
        );
    }
    page.append(
        bar,
        ElementSpec::new(drawer::TOGGLE_SELECTOR)
            .at(24.0, 32.0)
            .left(width - 100.0)
            .width(80.0)
            .fixed()
            .text("Menu")
            .attr("aria-expanded", "false")
            .attr("aria-label", "Open menu"),
    );

    let panel = page.append(
        root,
        ElementSpec::new(drawer::DRAWER_SELECTOR)
            .at(0.0, height)
            .fixed()
            .hidden(true)
            .style("transition-duration", DRAWER_TRANSITION),
    );
    page.append(panel, ElementSpec::new(drawer::CLOSE_SELECTOR).at(16.0, 32.0).fixed().text("Close"));
    let acc = page.append(panel, ElementSpec::new("[data-acc]").at(80.0, 200.0).fixed());
    page.append(
        acc,
        ElementSpec::new("[data-acc-trigger]")
            .at(80.0, 40.0)
            .fixed()
            .text("Services")
            .attr("aria-expanded", "false"),
    );
    page.append(acc, ElementSpec::new(".drawer-acc-icon").at(80.0, 40.0).fixed().text("+"));
    page.append(
        acc,
        ElementSpec::new("[data-acc-panel]")
            .at(120.0, 160.0)
            .fixed()
            .hidden(true)
            .text("Branding, Web, Motion"),
    );
    page.append(root, ElementSpec::new(drawer::OVERLAY_SELECTOR).at(0.0, height).fixed().hidden(true));

    page.append(root, ElementSpec::new(hero::HERO_SELECTOR).at(0.0, 900.0).text("We build calm websites"));
    page.append(root, ElementSpec::new(wobble::SECTION_SELECTOR).at(900.0, 600.0).text("Process: listen"));

    let section = page.append(
        root,
        ElementSpec::new(half_image::SECTION_SELECTOR)
            .also(half_image::ROOT_SELECTOR)
            .at(1500.0, 800.0),
    );
    page.append(section, ElementSpec::new(half_image::CIRCLE_SELECTOR).at(1500.0, 800.0));
    page.append(section, ElementSpec::new(half_image::IMAGE_SELECTOR).at(1500.0, 800.0));

    page.append(root, ElementSpec::new(dark_header::DARK_SECTION_SELECTOR).at(2300.0, 700.0).text("Thoughts"));
    page.append(root, ElementSpec::new(wobble::SECTION_SELECTOR).at(3000.0, 600.0).text("Process: ship"));

    let contact = page.append(root, ElementSpec::new("section.contact").at(3600.0, 200.0));
    page.append(
        contact,
        ElementSpec::new(phone::LINK_SELECTOR)
            .at(3680.0, 24.0)
            .text("Call us")
            .attr("href", PHONE_HREF),
    );

    page.append(
        root,
        ElementSpec::new(float_cta::CTA_SELECTOR)
            .at(height - 100.0, 60.0)
            .left(width - 220.0)
            .width(200.0)
            .fixed()
            .text("Book a call"),
    );

    let footer = page.append(root, ElementSpec::new("footer").at(3800.0, 600.0));
    let list = page.append(footer, ElementSpec::new(footer_accordion::ROOT_SELECTOR).at(3840.0, 400.0));
    for (i, label) in ["Studio", "Services", "Social"].into_iter().enumerate() {
        page.append(
            list,
            ElementSpec::new(footer_accordion::ITEM_SELECTOR)
                .at(3840.0 + 60.0 * i as f64, 48.0)
                .text(label),
        );
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::env::Environment;

    #[test]
    fn test_every_region_is_present() {
        let page = demo_page(1280.0, 800.0);
        for selector in [
            header::HEADER_SELECTOR,
            submenu::TRIGGER_SELECTOR,
            nav_roll::LINK_SELECTOR,
            drawer::DRAWER_SELECTOR,
            hero::HERO_SELECTOR,
            half_image::CIRCLE_SELECTOR,
            dark_header::DARK_SECTION_SELECTOR,
            wobble::SECTION_SELECTOR,
            phone::LINK_SELECTOR,
            float_cta::CTA_SELECTOR,
            footer_accordion::ITEM_SELECTOR,
        ] {
            assert!(page.query(selector).is_some(), "missing {selector}");
        }
        assert_eq!(page.document_height(), 4400.0);
    }
}
