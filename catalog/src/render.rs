//! Render adapter: turns (product, index, total) into an HTML text plus a 3-row inline keyboard.

use dbot_core::{Button, Keyboard, RichMessage};
use teloxide::utils::html;

use crate::error::{CatalogError, Lookup, Result};
use crate::product::Product;
use crate::tag::CommandTag;

/// Label of the inert button standing in for Prev/Next at a boundary.
pub const PLACEHOLDER_LABEL: &str = "•";

const PAGE_PREFIX: &str = "📄 Страница ";

/// Everything needed to display one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPayload {
    pub text: String,
    pub keyboard: Keyboard,
    pub image: Option<String>,
}

impl From<DisplayPayload> for RichMessage {
    fn from(payload: DisplayPayload) -> Self {
        RichMessage::new(payload.text)
            .with_keyboard(payload.keyboard)
            .with_photo(payload.image)
    }
}

/// Renders `product` shown at `index` of `total`. Fails with `OutOfRange` unless `index < total`.
pub fn render(product: &Product, index: usize, total: usize) -> Result<DisplayPayload> {
    if index >= total {
        return Err(CatalogError::OutOfRange(Lookup::Index { index, len: total }));
    }
    Ok(DisplayPayload {
        text: format_text(product, index, total),
        keyboard: build_keyboard(product, index, total),
        image: product.image.clone(),
    })
}

fn format_text(product: &Product, index: usize, total: usize) -> String {
    format!(
        "🏷 <b>{}</b>\n💰 Цена: <b>{} руб.</b>\n📝 {}\n\n{}<b>{}</b> из <b>{}</b>",
        html::escape(&product.name),
        product.price,
        html::escape(&product.description),
        PAGE_PREFIX,
        index + 1,
        total
    )
}

fn build_keyboard(product: &Product, index: usize, total: usize) -> Keyboard {
    let placeholder = || Button::new(PLACEHOLDER_LABEL, CommandTag::NoAction.encode());

    let prev = if index > 0 {
        Button::new("⬅️", CommandTag::Prev(index).encode())
    } else {
        placeholder()
    };
    let next = if index + 1 < total {
        Button::new("➡️", CommandTag::Next(index).encode())
    } else {
        placeholder()
    };
    let page = Button::new(
        format!("{}/{}", index + 1, total),
        CommandTag::PageInfo.encode(),
    );

    Keyboard::default()
        .row(vec![prev, page, next])
        .row(vec![
            Button::new("🛒 Забронировать", CommandTag::Buy(product.id).encode()),
            Button::new("⭐ В избранное", CommandTag::Favorite(product.id).encode()),
        ])
        .row(vec![Button::new("🏠 Главная", CommandTag::MainMenu.encode())])
}

/// Recovers `(index, total)` from a rendered text's page indicator. Markup is ignored.
pub fn parse_page_indicator(text: &str) -> Option<(usize, usize)> {
    let plain = strip_tags(text);
    let rest = &plain[plain.rfind(PAGE_PREFIX)? + PAGE_PREFIX.len()..];
    let (page, total) = rest.split_once(" из ")?;
    let page: usize = page.trim().parse().ok()?;
    let total: usize = total.split_whitespace().next()?.parse().ok()?;
    if page == 0 || page > total {
        return None;
    }
    Some((page - 1, total))
}

/// Removes HTML tags, keeping text content (entities are left as is).
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
