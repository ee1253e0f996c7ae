use tracing::{debug, info, warn};

use crate::{
    models::{Basket, Product, ProductId},
    page::{BasketView, ControlKind, ProductSource, RowContent, RowView},
    utils::formatting::{js_number, to_fixed_2},
};

/// One basket widget on a page: the basket itself plus the page it drives.
///
/// All handlers run to completion on the caller's thread; the widget owns
/// its state, so independent widgets never share a basket.
pub struct BasketWidget<S, V> {
    basket: Basket,
    source: S,
    view: V,
}

impl<S, V> BasketWidget<S, V>
where
    S: ProductSource,
    V: BasketView + RowView,
{
    pub fn new(source: S, view: V) -> Self {
        Self {
            basket: Basket::new(),
            source,
            view,
        }
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_hidden(&self) -> bool {
        self.view.is_hidden()
    }

    /// Basket icon handler: shows a hidden panel, hides a visible one.
    pub fn toggle_visibility(&mut self) {
        self.view.toggle_hidden();
        debug!("Basket panel hidden: {}", self.view.is_hidden());
    }

    /// Product list click handler.
    ///
    /// Clicks outside any add control are dropped. Card data is read as-is;
    /// missing or non-numeric attributes flow into the basket as `NaN`.
    pub fn handle_click(&mut self, target: &S::Target) {
        let Some(activation) = self.source.resolve(target) else {
            debug!("Ignoring click outside of add controls");
            return;
        };

        match activation.control {
            ControlKind::AddToCart => {
                let product = Product::from_card(&activation.card);
                self.add_to_cart(product);
            }
        }
    }

    /// Records one add for `product` and refreshes every dependent display.
    pub fn add_to_cart(&mut self, product: Product) {
        if !product.id.is_valid() || product.price.is_nan() {
            warn!(
                "Adding product with malformed data: id={}, price={}",
                product.id,
                js_number(product.price)
            );
        }

        let id = product.id;
        let count = self.basket.add(product).count;
        info!("Added product {} to basket (count {})", id, count);

        self.view
            .set_count_text(&self.basket.total_count().to_string());
        self.view
            .set_total_text(&to_fixed_2(self.basket.total_price()));

        self.render_product_row(&id);
    }

    /// Creates the row for `id` on first render, otherwise refreshes its count
    /// and line total. Name and unit price are only written at creation.
    pub fn render_product_row(&mut self, id: &ProductId) {
        let Some(item) = self.basket.get(id) else {
            debug!("No line item for product {}, nothing to render", id);
            return;
        };

        let count_text = item.count.to_string();
        let total_text = to_fixed_2(item.line_total());

        if self.view.has_row(id) {
            debug!("Updating basket row for product {}", id);
            self.view.update_row(id, &count_text, &total_text);
            return;
        }

        debug!("Creating basket row for product {}", id);
        let row = RowContent {
            id: *id,
            name: item.display_name().to_string(),
            count_text,
            price_text: js_number(item.price),
            total_text,
        };
        self.view.insert_row_before_total(row);
    }
}
