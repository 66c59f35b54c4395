mod markup;

use crate::item::Item;
use markup::{StartTag, inner_html, mask_skipped, start_tags, text_content};
use reqwest::Url;

/// Element id of the detail overlay; every other `.modal` is informational.
pub const PRIMARY_MODAL_ID: &str = "modal";

const NAV_PANEL_CLASS: &str = "nav-links";
const POPUP_LINK_CLASS: &str = "open-popup-link";
const ITEM_BOX_CLASS: &str = "box";
const MODAL_CLASS: &str = "modal";
const GRID_CLASS: &str = "shop-section";

/// An entry of the navigation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Opens an informational modal instead of navigating.
    pub popup: bool,
    pub modal_id: Option<String>,
}

/// A secondary overlay such as About or How-to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoModal {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// The content region of one catalog page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub url: Option<Url>,
    pub title: String,
    pub nav_links: Vec<NavLink>,
    pub items: Vec<Item>,
    pub info_modals: Vec<InfoModal>,
    pub has_grid: bool,
}

impl Page {
    /// Read the parts of a fetched document the client works with.
    pub fn parse(url: Option<Url>, html: &str) -> Self {
        // Commented-out markup is not part of the page
        let masked = mask_skipped(html);
        let html = masked.as_str();
        let tags = start_tags(html);

        let title = tags
            .iter()
            .find(|t| t.name == "title")
            .map(|t| text_content(inner_html(html, t)))
            .unwrap_or_default();

        let nav_links = tags
            .iter()
            .find(|t| t.has_class(NAV_PANEL_CLASS))
            .map(|panel| parse_nav_links(inner_html(html, panel)))
            .unwrap_or_default();

        // Only boxes inside the grid container are cards
        let grid = tags.iter().find(|t| t.has_class(GRID_CLASS));
        let items = grid
            .map(|section| {
                start_tags(inner_html(html, section))
                    .iter()
                    .filter(|t| t.has_class(ITEM_BOX_CLASS))
                    .map(|t| Item::from_attributes(&t.attrs))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let info_modals = tags
            .iter()
            .filter(|t| t.has_class(MODAL_CLASS))
            .filter_map(|t| parse_info_modal(html, t))
            .collect::<Vec<_>>();

        let has_grid = grid.is_some();

        tracing::debug!(
            links = nav_links.len(),
            items = items.len(),
            modals = info_modals.len(),
            has_grid,
            "parsed page"
        );

        Self {
            url,
            title,
            nav_links,
            items,
            info_modals,
            has_grid,
        }
    }

    pub fn info_modal(&self, id: &str) -> Option<&InfoModal> {
        self.info_modals.iter().find(|m| m.id == id)
    }
}

fn parse_nav_links(panel: &str) -> Vec<NavLink> {
    start_tags(panel)
        .iter()
        .filter(|t| t.name == "a")
        .map(|a| {
            let label = text_content(inner_html(panel, a)).replace('\n', " ");
            NavLink {
                label,
                href: a.attr("href").unwrap_or_default().to_string(),
                popup: a.has_class(POPUP_LINK_CLASS),
                modal_id: a.attr("data-modal-id").map(str::to_string),
            }
        })
        .collect()
}

fn parse_info_modal(html: &str, tag: &StartTag) -> Option<InfoModal> {
    let id = tag.id()?;
    if id == PRIMARY_MODAL_ID {
        return None;
    }
    let inner = inner_html(html, tag);
    let inner_tags = start_tags(inner);

    let title = inner_tags
        .iter()
        .find(|t| matches!(t.name.as_str(), "h1" | "h2" | "h3"))
        .map(|h| text_content(inner_html(inner, h)))
        .unwrap_or_else(|| id.to_string());

    // Close buttons are usually a bare "×"
    let body = text_content(inner)
        .lines()
        .filter(|l| l.trim() != "×" && l.trim() != title)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    Some(InfoModal {
        id: id.to_string(),
        title,
        body,
    })
}
