//! Product catalog and order model
//!
//! The catalog is a closed enum; order items are validated against it at
//! construction. Pricing is a flat per-unit amount for every product, not a
//! pricing engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Flat price per unit, identical for every product
pub const UNIT_PRICE: u64 = 1000;

/// The sellable products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "Drinking yoghurt")]
    DrinkingYoghurt,
    #[serde(rename = "Regular yoghurt")]
    RegularYoghurt,
    #[serde(rename = "Greek yoghurt")]
    GreekYoghurt,
    #[serde(rename = "Strawberry yoghurt")]
    StrawberryYoghurt,
    #[serde(rename = "Mango yoghurt")]
    MangoYoghurt,
    #[serde(rename = "Vanilla yoghurt")]
    VanillaYoghurt,
    #[serde(rename = "Labneh")]
    Labneh,
    #[serde(rename = "Labneh deluxe")]
    LabnehDeluxe,
    #[serde(rename = "Cottage cheese")]
    CottageCheese,
    #[serde(rename = "Sour milk")]
    SourMilk,
}

impl Product {
    pub const ALL: [Product; 10] = [
        Product::DrinkingYoghurt,
        Product::RegularYoghurt,
        Product::GreekYoghurt,
        Product::StrawberryYoghurt,
        Product::MangoYoghurt,
        Product::VanillaYoghurt,
        Product::Labneh,
        Product::LabnehDeluxe,
        Product::CottageCheese,
        Product::SourMilk,
    ];

    /// Customer-facing product name, as used on the wire
    pub fn display_name(&self) -> &'static str {
        match self {
            Product::DrinkingYoghurt => "Drinking yoghurt",
            Product::RegularYoghurt => "Regular yoghurt",
            Product::GreekYoghurt => "Greek yoghurt",
            Product::StrawberryYoghurt => "Strawberry yoghurt",
            Product::MangoYoghurt => "Mango yoghurt",
            Product::VanillaYoghurt => "Vanilla yoghurt",
            Product::Labneh => "Labneh",
            Product::LabnehDeluxe => "Labneh deluxe",
            Product::CottageCheese => "Cottage cheese",
            Product::SourMilk => "Sour milk",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Rejection of a product name outside the catalog
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown product: '{0}'")]
pub struct UnknownProduct(pub String);

impl FromStr for Product {
    type Err = UnknownProduct;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Product::ALL
            .into_iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownProduct(name.to_string()))
    }
}

/// One order line: a product and its quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u32,
}

/// An order is an ordered list of line items. Repeated products stay as
/// separate cumulative lines; nothing is merged.
pub type Order = Vec<OrderItem>;

/// Total price of an order at the flat per-unit rate
pub fn total_price(order: &[OrderItem]) -> u64 {
    order
        .iter()
        .map(|item| UNIT_PRICE * item.quantity as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_catalog_names() {
        assert_eq!("Greek yoghurt".parse::<Product>().unwrap(), Product::GreekYoghurt);
        assert_eq!("labneh".parse::<Product>().unwrap(), Product::Labneh);
        assert_eq!(" Sour milk ".parse::<Product>().unwrap(), Product::SourMilk);
    }

    #[test]
    fn test_from_str_rejects_unknown_products() {
        let err = "Gouda".parse::<Product>().unwrap_err();
        assert_eq!(err, UnknownProduct("Gouda".to_string()));
    }

    #[test]
    fn test_serde_uses_display_names() {
        let item = OrderItem {
            product: Product::GreekYoghurt,
            quantity: 2,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"product":"Greek yoghurt","quantity":2}"#);

        let back: OrderItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_total_price_is_flat_rate() {
        let order = vec![
            OrderItem {
                product: Product::GreekYoghurt,
                quantity: 2,
            },
            OrderItem {
                product: Product::Labneh,
                quantity: 1,
            },
        ];
        assert_eq!(total_price(&order), 3000);
    }

    #[test]
    fn test_total_price_keeps_repeated_lines() {
        // Same product twice stays two cumulative lines.
        let order = vec![
            OrderItem {
                product: Product::Labneh,
                quantity: 1,
            },
            OrderItem {
                product: Product::Labneh,
                quantity: 1,
            },
        ];
        assert_eq!(order.len(), 2);
        assert_eq!(total_price(&order), 2000);
    }

    #[test]
    fn test_total_price_empty_order_is_zero() {
        assert_eq!(total_price(&[]), 0);
    }
}
