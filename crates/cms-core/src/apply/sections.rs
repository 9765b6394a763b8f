/*
 * sections.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Per-section content handlers.
 */

use std::cmp::Ordering;

use cms_dom::Fragment;

use super::builder::PatchBuilder;
use crate::config::CmsConfig;
use crate::fields::Fields;

/// Page variable read by the hero typewriter script.
pub const HERO_TITLE_VARIABLE: &str = "heroTitle";

pub(crate) fn site(out: &mut PatchBuilder<'_>, data: Fields<'_>) {
    if let Some(title) = data.text("title") {
        out.set_text("title", title);
    }
    if let Some(description) = data.text("description") {
        out.set_attribute("meta[name=\"description\"]", "content", description);
    }
    if let Some(logo) = data.text("logo") {
        out.set_attribute(".logo-img", "src", logo);
    }
}

pub(crate) fn hero(out: &mut PatchBuilder<'_>, data: Fields<'_>) {
    if let Some(title) = data.text("title") {
        out.set_variable(HERO_TITLE_VARIABLE, title);
    }
    if let Some(subtitle) = data.text("subtitle") {
        out.set_text(".hero-subtitle", subtitle);
    }
    if data.seq("buttons").is_some() {
        let buttons = data
            .entries("buttons")
            .into_iter()
            .filter_map(|button| {
                let text = button.text("text")?;
                let style = button.text("style").unwrap_or("primary");
                Some(
                    Fragment::element("a")
                        .attr("href", button.text("link").unwrap_or("#"))
                        .class("btn")
                        .class(&format!("btn-{}", style))
                        .with_text(text),
                )
            })
            .collect();
        out.replace_children(".hero-buttons", buttons);
    }
}

pub(crate) fn about(out: &mut PatchBuilder<'_>, data: Fields<'_>) {
    section_heading(out, "#about", data);

    if let Some(content) = data.seq("content") {
        let paragraphs = content
            .iter()
            .filter_map(|paragraph| paragraph.as_str())
            .filter(|text| !text.trim().is_empty())
            .map(|text| Fragment::element("p").with_text(text))
            .collect();
        out.replace_children(".about-text", paragraphs);
    }

    if data.seq("features").is_some() {
        let features = data
            .entries("features")
            .into_iter()
            .filter_map(|feature| {
                let title = feature.text("title")?;
                Some(card(
                    Fragment::element("div").class("feature"),
                    "feature-icon",
                    feature.text("icon").unwrap_or("fas fa-star"),
                    title,
                    feature.text("description").unwrap_or(""),
                ))
            })
            .collect();
        out.replace_children(".about-features", features);
    }
}

pub(crate) fn products(out: &mut PatchBuilder<'_>, data: Fields<'_>) {
    section_heading(out, "#products", data);

    if data.seq("categories").is_some() {
        let categories = data
            .entries("categories")
            .into_iter()
            .filter_map(|category| {
                let name = category.text("name")?;
                let mut container = Fragment::element("div").class("product-category");
                if category.flag("featured") {
                    container = container.class("featured");
                }
                Some(card(
                    container,
                    "product-icon",
                    category.text("icon").unwrap_or("fas fa-box"),
                    name,
                    category.text("description").unwrap_or(""),
                ))
            })
            .collect();
        out.replace_children(".products-grid", categories);
    }
}

pub(crate) fn contact(out: &mut PatchBuilder<'_>, data: Fields<'_>, config: &CmsConfig) {
    section_heading(out, "#contact", data);

    // The contact cards are only rewritten as a set.
    if data.flag("address") && data.flag("phones") && data.flag("email") {
        if let Some(street) = data.nested("address").and_then(|address| address.text("street")) {
            out.set_text(
                ".contact-info .contact-item:first-child .contact-details p",
                street,
            );
        }

        if data.seq("phones").is_some() {
            let mut children =
                vec![Fragment::element("h3").with_text(&config.labels.phones_heading)];
            children.extend(data.entries("phones").into_iter().filter_map(|phone| {
                let label = phone.display("label")?;
                let number = phone.display("number")?;
                Some(Fragment::element("p").with_text(format!("{}: {}", label, number)))
            }));
            out.replace_children(
                ".contact-info .contact-item:nth-child(2) .contact-details",
                children,
            );
        }

        if let Some(email) = data.text("email") {
            out.set_text(
                ".contact-info .contact-item:nth-child(3) .contact-details p",
                email,
            );
        }
    }

    if let Some(map) = data.text("map_embed") {
        out.set_attribute(".map-container iframe", "src", map);
    }
}

pub(crate) fn navigation(out: &mut PatchBuilder<'_>, data: Fields<'_>) {
    if data.seq("items").is_none() {
        return;
    }

    let mut items = data.entries("items");
    // Stable, so equal orders keep their file order.
    items.sort_by(|a, b| {
        let (a, b) = (order_of(a), order_of(b));
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    });

    let links = items
        .into_iter()
        .filter_map(|item| {
            let text = item.display("text")?;
            let link = item.display("link")?;
            Some(
                Fragment::element("a")
                    .attr("href", link)
                    .class("nav-link")
                    .with_text(text),
            )
        })
        .collect();
    out.replace_children(".nav-menu", links);
}

fn order_of(item: &Fields<'_>) -> f64 {
    item.number("order").filter(|n| !n.is_nan()).unwrap_or(0.0)
}

pub(crate) fn footer(out: &mut PatchBuilder<'_>, data: Fields<'_>, config: &CmsConfig) {
    let defaults = &config.footer;
    let copyright = data
        .display("copyright")
        .unwrap_or_else(|| defaults.copyright.clone());
    let name = data
        .display("developer_name")
        .unwrap_or_else(|| defaults.developer_name.clone());
    let link = data
        .display("developer_link")
        .unwrap_or_else(|| defaults.developer_link.clone());

    out.replace_children(
        ".footer-bottom p",
        vec![
            Fragment::text(format!("{} | {}: ", copyright, config.labels.attribution)),
            Fragment::element("a").attr("href", link).with_text(name),
        ],
    );
}

/// Hide the popup unless the offer is enabled, then fill in whatever the
/// offer provides.
pub(crate) fn special_offer(out: &mut PatchBuilder<'_>, data: Option<Fields<'_>>) {
    let Some(popup) = out.find("#specialOfferPopup") else {
        return;
    };

    let Some(data) = data.filter(|data| data.flag("enabled")) else {
        out.set_visible_at(popup, false);
        return;
    };
    out.set_visible_at(popup, true);

    if let Some(title) = data.text("title")
        && let Some(node) = out.find_in(popup, "h3")
    {
        out.set_text_at(node, title);
    }
    if let Some(description) = data.text("description")
        && let Some(node) = out.find_in(popup, "p")
    {
        out.set_text_at(node, description);
    }
    if let Some(button) = out.find_in(popup, ".btn-popup") {
        if let Some(label) = data.text("button_text") {
            out.set_text_at(button, label);
        }
        if let Some(link) = data.text("button_link") {
            out.set_attribute_at(button, "href", link);
        }
    }
}

fn section_heading(out: &mut PatchBuilder<'_>, scope: &str, data: Fields<'_>) {
    if let Some(title) = data.text("title") {
        out.set_text(&format!("{} .section-title", scope), title);
    }
    if let Some(subtitle) = data.text("subtitle") {
        out.set_text(&format!("{} .section-subtitle", scope), subtitle);
    }
}

/// `container > (div.<icon_class> > i.<icon>), h3, p`
fn card(
    container: Fragment,
    icon_class: &str,
    icon: &str,
    title: &str,
    description: &str,
) -> Fragment {
    container
        .child(
            Fragment::element("div")
                .class(icon_class)
                .child(Fragment::element("i").class(icon)),
        )
        .child(Fragment::element("h3").with_text(title))
        .child(Fragment::element("p").with_text(description))
}
