//! Conversions from catalog wire types to core types.

use greenleaf_core::{Category, CategoryId, Price, Product, ProductId};

use super::CatalogError;
use super::types::{CategoryData, PlantData};

/// Treat blank text as absent.
fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn convert_category(data: CategoryData) -> Category {
    Category {
        id: CategoryId::new(data.id),
        label: data.category_name.trim().to_string(),
        description: non_blank(data.small_description),
    }
}

/// Convert a plant entry, rejecting negative prices.
pub fn convert_plant(data: PlantData) -> Result<Product, CatalogError> {
    let price = Price::new(data.price).map_err(|e| {
        CatalogError::MalformedResponse(format!("plant {}: {e}", data.id))
    })?;

    Ok(Product {
        id: ProductId::new(data.id),
        name: data.name,
        description: non_blank(data.description),
        category: data.category,
        price,
        image: data.image,
    })
}

pub fn convert_plants(data: Vec<PlantData>) -> Result<Vec<Product>, CatalogError> {
    data.into_iter().map(convert_plant).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn plant(price: Decimal, description: Option<&str>) -> PlantData {
        PlantData {
            id: 4,
            name: "Neem Tree".to_string(),
            description: description.map(String::from),
            category: "Medicinal Tree".to_string(),
            price,
            image: "https://i.ibb.co/neem.jpg".to_string(),
        }
    }

    #[test]
    fn test_convert_plant() {
        let product = convert_plant(plant(Decimal::new(400, 0), Some("Bitter leaves."))).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.price, Price::from_taka(400));
        assert_eq!(product.description.as_deref(), Some("Bitter leaves."));
    }

    #[test]
    fn test_blank_description_becomes_none() {
        let product = convert_plant(plant(Decimal::ONE, Some("   "))).unwrap();
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_negative_price_is_malformed() {
        let err = convert_plant(plant(Decimal::new(-5, 0), None)).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResponse(ref msg) if msg.starts_with("plant 4:")));
    }

    #[test]
    fn test_convert_category() {
        let category = convert_category(CategoryData {
            id: 2,
            category_name: " Flowering Plant ".to_string(),
            small_description: Some(String::new()),
        });
        assert_eq!(category.id, CategoryId::new(2));
        assert_eq!(category.label, "Flowering Plant");
        assert_eq!(category.description, None);
    }
}
