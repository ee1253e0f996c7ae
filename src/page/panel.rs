use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::ProductId;
use crate::utils::config::{DEFAULT_CURRENCY, DEFAULT_UNIT_LABEL};

/// Text content of a freshly created basket row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContent {
    pub id: ProductId,
    pub name: String,
    pub count_text: String,
    pub price_text: String,
    pub total_text: String,
}

/// Row-level access to the basket panel, keyed by the row's id attribute.
pub trait RowView {
    fn has_row(&self, id: &ProductId) -> bool;

    /// Adds a row right before the basket-total anchor.
    fn insert_row_before_total(&mut self, row: RowContent);

    /// Rewrites the count and line-total cells of an existing row.
    fn update_row(&mut self, id: &ProductId, count_text: &str, total_text: &str);
}

/// Header badge, total display and visibility of the basket panel.
pub trait BasketView {
    fn set_count_text(&mut self, text: &str);
    fn set_total_text(&mut self, text: &str);
    fn is_hidden(&self) -> bool;
    fn toggle_hidden(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    /// Value of the row's `data-id` attribute.
    pub data_id: String,
    pub name: String,
    pub count_text: String,
    pub price_text: String,
    pub total_text: String,
}

/// In-memory basket panel that renders to the page's markup.
#[derive(Debug, Clone)]
pub struct HtmlPanel {
    currency: String,
    unit_label: String,
    hidden: bool,
    count_text: String,
    total_text: String,
    rows: Vec<PanelRow>,
}

impl Default for HtmlPanel {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY, DEFAULT_UNIT_LABEL)
    }
}

impl HtmlPanel {
    /// Empty panel, hidden until the icon is clicked.
    pub fn new(currency: impl Into<String>, unit_label: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            unit_label: unit_label.into(),
            hidden: true,
            count_text: "0".to_string(),
            total_text: "0.00".to_string(),
            rows: Vec::new(),
        }
    }

    pub fn count_text(&self) -> &str {
        &self.count_text
    }

    pub fn total_text(&self) -> &str {
        &self.total_text
    }

    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    pub fn row(&self, id: &ProductId) -> Option<&PanelRow> {
        let key = id.key();
        self.rows.iter().find(|row| row.data_id == key)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Markup of the header icon with its count badge.
    pub fn icon_html(&self) -> String {
        format!(
            "<div class=\"cartIconWrap\"><span>{}</span></div>",
            encode_text(&self.count_text)
        )
    }

    /// Markup of the whole panel: rows in insertion order, then the total.
    pub fn to_html(&self) -> String {
        let class = if self.hidden { "basket hidden" } else { "basket" };
        let mut html = format!("<div class=\"{}\">\n", class);

        for row in &self.rows {
            html.push_str(&self.row_html(row));
        }

        html.push_str(&format!(
            "  <div class=\"basketTotal\">{}<span class=\"basketTotalValue\">{}</span></div>\n",
            encode_text(&self.currency),
            encode_text(&self.total_text)
        ));
        html.push_str("</div>\n");
        html
    }

    fn row_html(&self, row: &PanelRow) -> String {
        let currency = encode_text(&self.currency);
        format!(
            concat!(
                "  <div class=\"basketRow\" data-id=\"{id}\">\n",
                "    <div>{name}</div>\n",
                "    <div><span class=\"productCount\">{count}</span> {unit}</div>\n",
                "    <div>{currency}{price}</div>\n",
                "    <div>{currency}<span class=\"productTotalRow\">{total}</span></div>\n",
                "  </div>\n",
            ),
            id = encode_double_quoted_attribute(&row.data_id),
            name = encode_text(&row.name),
            count = encode_text(&row.count_text),
            unit = encode_text(&self.unit_label),
            currency = currency,
            price = encode_text(&row.price_text),
            total = encode_text(&row.total_text),
        )
    }
}

impl RowView for HtmlPanel {
    fn has_row(&self, id: &ProductId) -> bool {
        self.row(id).is_some()
    }

    fn insert_row_before_total(&mut self, row: RowContent) {
        // The total anchor always closes the panel, so "before it" is the end
        // of the row list.
        self.rows.push(PanelRow {
            data_id: row.id.key(),
            name: row.name,
            count_text: row.count_text,
            price_text: row.price_text,
            total_text: row.total_text,
        });
    }

    fn update_row(&mut self, id: &ProductId, count_text: &str, total_text: &str) {
        let key = id.key();
        if let Some(row) = self.rows.iter_mut().find(|row| row.data_id == key) {
            row.count_text = count_text.to_string();
            row.total_text = total_text.to_string();
        }
    }
}

impl BasketView for HtmlPanel {
    fn set_count_text(&mut self, text: &str) {
        self.count_text = text.to_string();
    }

    fn set_total_text(&mut self, text: &str) {
        self.total_text = text.to_string();
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn toggle_hidden(&mut self) {
        self.hidden = !self.hidden;
    }
}
