//! The shopping cart. Lives only for the session; nothing is persisted.

use crate::models::product::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add a product; adding one already in the cart raises its quantity.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem { product, quantity }),
        }
    }

    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Set the quantity; zero removes the product.
    pub fn update_quantity(&mut self, product_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price * f64::from(item.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("product-{}", id),
            seller_id: None,
            price,
            is_deleted: false,
            is_available: true,
            created_at: None,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000.0), 1);
        cart.add(product(1, 1000.0), 2);
        cart.add(product(2, 500.0), 1);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), 3500.0);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000.0), 2);
        cart.update_quantity(1, 5);
        assert_eq!(cart.total_items(), 5);
        cart.update_quantity(1, 0);
        assert!(cart.items().is_empty());

        cart.add(product(3, 10.0), 1);
        cart.clear();
        assert_eq!(cart.total_price(), 0.0);
    }
}
