//! # Seed Catalog
//!
//! The six sample products every session starts with, ids 1 to 6.

use crate::money::Money;
use crate::types::{Product, ProductId};

/// (name, price, image, description) for each sample product, in id order.
const SAMPLE_PRODUCTS: &[(&str, Money, &str, &str)] = &[
    (
        "Auriculares Bluetooth",
        Money::from_major_minor(59, 99),
        "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=200&h=200&fit=crop",
        "Auriculares inalámbricos con cancelación de ruido",
    ),
    (
        "Smartwatch",
        Money::from_major_minor(129, 99),
        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=200&h=200&fit=crop",
        "Reloj inteligente con monitor de actividad física",
    ),
    (
        "Teclado Mecánico",
        Money::from_major_minor(89, 99),
        "https://images.unsplash.com/photo-1541140532154-b024d705b90a?w=200&h=200&fit=crop",
        "Teclado gaming con retroiluminación RGB",
    ),
    (
        "Cámara Digital",
        Money::from_major_minor(299, 99),
        "https://images.unsplash.com/photo-1502920917128-1aa500764cbd?w=200&h=200&fit=crop",
        "Cámara de 24MP con zoom óptico 10x",
    ),
    (
        "Altavoz Portátil",
        Money::from_major_minor(49, 99),
        "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=200&h=200&fit=crop",
        "Altavoz resistente al agua con 20 horas de batería",
    ),
    (
        "Mochila para Laptop",
        Money::from_major_minor(39, 99),
        "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=200&h=200&fit=crop",
        "Mochila con compartimento acolchado para laptop de hasta 15\"",
    ),
];

/// Builds the seed catalog.
pub fn sample_catalog() -> Vec<Product> {
    SAMPLE_PRODUCTS
        .iter()
        .zip(1u64..)
        .map(|(&(name, price, image, description), id)| Product {
            id: ProductId(id),
            name: name.to_string(),
            price,
            image: image.to_string(),
            description: description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_ids_are_one_to_six() {
        let catalog = sample_catalog();
        let ids: Vec<u64> = catalog.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_sample_prices_are_positive() {
        assert!(sample_catalog().iter().all(|p| p.price.is_positive()));
        assert_eq!(sample_catalog()[0].price.cents(), 5999);
    }
}
