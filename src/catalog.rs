use serde::Serialize;

/// Index of the reserved-waste category. Products picked there are stored
/// under `RW-` prefixed keys and may carry fractional amounts.
pub const RESERVED_CATEGORY: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub system_name: String,
    pub image_path: String,
}

impl Product {
    pub fn new(name: &str, system_name: &str, image_path: &str) -> Self {
        Self {
            name: name.to_string(),
            system_name: system_name.to_string(),
            image_path: image_path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    pub image: String,
    pub reserved: bool,
    /// `None` when the menu source failed for this category.
    pub products: Option<Vec<Product>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

const CATEGORIES: [(&str, &str); 7] = [
    ("Burgers", "/assets/categories/burgers.png"),
    ("Snacks", "/assets/categories/snacks.png"),
    ("Fries", "/assets/categories/fries.png"),
    ("Sauces", "/assets/categories/sauces.png"),
    ("Drinks", "/assets/categories/drinks.png"),
    ("Desserts", "/assets/categories/desserts.png"),
    ("Ingredients", "/assets/categories/ingredients.png"),
];

const PRODUCTS: [&[(&str, &str)]; 7] = [
    &[
        ("Hamburger", "Hamburger"),
        ("Cheeseburger", "Cheeseburger"),
        ("Big Burger", "BigBurger"),
        ("Chicken Burger", "ChickenBurger"),
        ("Fish Burger", "FishBurger"),
    ],
    &[
        ("Nuggets 6", "Nuggets6"),
        ("Nuggets 9", "Nuggets9"),
        ("Chicken Strips", "ChickenStrips"),
        ("Wrap", "Wrap"),
    ],
    &[
        ("Fries Small", "FriesSmall"),
        ("Fries Medium", "FriesMedium"),
        ("Fries Large", "FriesLarge"),
        ("Wedges", "Wedges"),
    ],
    &[
        ("Ketchup", "Ketchup"),
        ("Mustard", "Mustard"),
        ("Cheese Sauce", "CheeseSauce"),
        ("Sweet and Sour", "SweetSour"),
    ],
    &[
        ("Cola", "Cola"),
        ("Orange Juice", "OrangeJuice"),
        ("Coffee", "Coffee"),
        ("Tea", "Tea"),
    ],
    &[
        ("Ice Cream", "IceCream"),
        ("Apple Pie", "ApplePie"),
        ("Milkshake", "Milkshake"),
    ],
    &[
        ("Bun", "Bun"),
        ("Beef Patty", "BeefPatty"),
        ("Cheese Slice", "CheeseSlice"),
        ("Lettuce", "Lettuce"),
        ("Ketchup", "Ketchup"),
    ],
];

impl Catalog {
    /// The catalog shipped with the binary.
    pub fn bundled() -> Self {
        let categories = CATEGORIES
            .iter()
            .zip(PRODUCTS)
            .enumerate()
            .map(|(index, ((name, image), products))| Category {
                name: name.to_string(),
                image: image.to_string(),
                reserved: index == RESERVED_CATEGORY,
                products: Some(
                    products
                        .iter()
                        .map(|(display, system)| {
                            Product::new(display, system, &format!("/assets/products/{system}.png"))
                        })
                        .collect(),
                ),
            })
            .collect();
        Self { categories }
    }

    /// Category names and images of the bundled catalog without products.
    pub fn category_shells() -> Vec<Category> {
        CATEGORIES
            .iter()
            .enumerate()
            .map(|(index, (name, image))| Category {
                name: name.to_string(),
                image: image.to_string(),
                reserved: index == RESERVED_CATEGORY,
                products: None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_marks_only_ingredients_reserved() {
        let catalog = Catalog::bundled();
        assert_eq!(catalog.len(), 7);
        let reserved: Vec<usize> = catalog
            .categories
            .iter()
            .enumerate()
            .filter(|(_, category)| category.reserved)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(reserved, vec![RESERVED_CATEGORY]);
    }

    #[test]
    fn ketchup_appears_in_sauces_and_ingredients() {
        let catalog = Catalog::bundled();
        let has_ketchup = |index: usize| {
            catalog.categories[index]
                .products
                .as_ref()
                .is_some_and(|products| products.iter().any(|p| p.system_name == "Ketchup"))
        };
        assert!(has_ketchup(3));
        assert!(has_ketchup(RESERVED_CATEGORY));
    }
}
