//! Fixed product catalog and sampling weights used by the generator.

/// A product category with its price band and typical margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySpec {
    /// Category name.
    pub name: &'static str,
    /// Products sold in the category.
    pub products: [&'static str; 5],
    /// Lowest unit price.
    pub min_price: f64,
    /// Highest unit price.
    pub max_price: f64,
    /// Expected profit as a fraction of sales.
    pub profit_margin: f64,
}

/// Every category the generator can produce.
pub static CATALOG: [CategorySpec; 5] = [
    CategorySpec {
        name: "Electronics",
        products: ["Laptop", "Smartphone", "Tablet", "Headphones", "Smart Watch"],
        min_price: 200.0,
        max_price: 2000.0,
        profit_margin: 0.15,
    },
    CategorySpec {
        name: "Clothing",
        products: ["T-Shirt", "Jeans", "Dress", "Jacket", "Shoes"],
        min_price: 20.0,
        max_price: 200.0,
        profit_margin: 0.40,
    },
    CategorySpec {
        name: "Home & Garden",
        products: ["Sofa", "Table", "Chair", "Lamp", "Plant"],
        min_price: 50.0,
        max_price: 1000.0,
        profit_margin: 0.25,
    },
    CategorySpec {
        name: "Books",
        products: ["Fiction Novel", "Textbook", "Cookbook", "Biography", "Self-Help"],
        min_price: 10.0,
        max_price: 50.0,
        profit_margin: 0.20,
    },
    CategorySpec {
        name: "Sports",
        products: ["Basketball", "Tennis Racket", "Running Shoes", "Yoga Mat", "Bicycle"],
        min_price: 30.0,
        max_price: 500.0,
        profit_margin: 0.30,
    },
];

/// Sales regions.
pub const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];

/// Customer segments.
pub const SEGMENTS: [&str; 3] = ["Consumer", "Corporate", "Home Office"];

/// Order quantity with its relative weight; most orders hold one to three items.
pub const QUANTITY_WEIGHTS: [(u32, u32); 5] = [(1, 50), (2, 25), (3, 15), (4, 7), (5, 3)];

/// Discount percentage with its relative weight; most orders are not discounted.
pub const DISCOUNT_WEIGHTS: [(u32, u32); 7] =
    [(0, 60), (5, 15), (10, 10), (15, 8), (20, 4), (25, 2), (30, 1)];

/// Categories that sell more in June through August.
pub const SUMMER_CATEGORIES: [&str; 2] = ["Sports", "Clothing"];

/// Looks up a category by name.
pub fn find_category(name: &str) -> Option<&'static CategorySpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}
