use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::product::{Product, ProductId};

/// Accumulated record of one product in the basket.
///
/// `id`, `name` and `price` are fixed by the first add for the id; later adds
/// only bump `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: Option<String>,
    pub price: f64,
    pub count: u64,
}

impl LineItem {
    fn new(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            count: 0,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("undefined")
    }

    /// price × count
    pub fn line_total(&self) -> f64 {
        self.price * self.count as f64
    }
}

/// Mapping from product id to line item, kept in first-add order.
#[derive(Debug, Clone, Default)]
pub struct Basket {
    items: Vec<LineItem>,
    index: HashMap<ProductId, usize>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one add for the product and returns the updated line item.
    ///
    /// Creates the line item with `count = 0` on first sight of the id, then
    /// increments. Name and price from repeat adds are ignored.
    pub fn add(&mut self, product: Product) -> &LineItem {
        let position = match self.index.get(&product.id) {
            Some(&position) => position,
            None => {
                let position = self.items.len();
                self.index.insert(product.id, position);
                self.items.push(LineItem::new(product));
                position
            }
        };

        let item = &mut self.items[position];
        item.count += 1;
        item
    }

    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all counts, recomputed from the items on every call.
    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| item.count).sum()
    }

    /// Sum of price × count, recomputed from the items on every call.
    pub fn total_price(&self) -> f64 {
        self.items
            .iter()
            .fold(0.0, |acc, item| acc + item.line_total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_add_creates_item_with_count_one() {
        let mut basket = Basket::new();
        let item = basket.add(Product::new(1, "Tea", 2.5));
        assert_eq!(item.count, 1);
        assert_eq!(item.display_name(), "Tea");
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn test_repeat_add_keeps_first_name_and_price() {
        let mut basket = Basket::new();
        basket.add(Product::new(1, "Tea", 2.5));
        let item = basket.add(Product::new(1, "Green Tea", 9.0));
        assert_eq!(item.count, 2);
        assert_eq!(item.display_name(), "Tea");
        assert_eq!(item.price, 2.5);
        assert_eq!(item.line_total(), 5.0);
    }

    #[test]
    fn test_totals_cover_all_items() {
        let mut basket = Basket::new();
        basket.add(Product::new(1, "Tea", 2.5));
        basket.add(Product::new(1, "Tea", 2.5));
        basket.add(Product::new(2, "Coffee", 3.0));

        assert_eq!(basket.total_count(), 3);
        assert_eq!(basket.total_price(), 8.0);
        let ids: Vec<String> = basket.items().map(|item| item.id.key()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_empty_basket_totals() {
        let basket = Basket::new();
        assert!(basket.is_empty());
        assert_eq!(basket.total_count(), 0);
        assert_eq!(basket.total_price(), 0.0);
        assert!(basket.get(&ProductId::from(1)).is_none());
    }

    #[test]
    fn test_nan_price_poisons_total() {
        let mut basket = Basket::new();
        basket.add(Product::new(1, "Tea", 2.5));
        basket.add(Product::new(5, "X", f64::NAN));
        assert_eq!(basket.total_count(), 2);
        assert!(basket.total_price().is_nan());
    }
}
