//! Per-category visual style catalogs.
//!
//! Each product class has its own closed set of styles; the chosen style's
//! description feeds the model/studio prompt preamble (after
//! sanitization, see [`crate::prompt::sanitize_style_description`]).

use crate::types::{ProductClass, Style};

/// Style catalog for clothing products.
pub fn clothing_styles() -> Vec<Style> {
    catalog(&[
        ("Studio Professional", "Classic studio pose, professional lighting."),
        ("Modern Urban", "Model in a modern city context."),
        ("Casual Lifestyle", "Model in a casual, everyday environment."),
        ("Sport & Active", "Model in motion, active pose."),
        ("Evening Elegance", "Sophisticated pose, evening wear context."),
        ("Minimalist", "Clean pose, minimalist aesthetic."),
        ("Outdoor Adventure", "Model in a nature/adventure context."),
        ("Cozy Indoor", "Model in a warm, indoor setting."),
        ("Fashion Editorial", "Artistic, high-fashion pose."),
        ("E-commerce Premium", "High-quality catalog shot, perfect for online stores."),
    ])
}

/// Style catalog for footwear.
pub fn shoe_styles() -> Vec<Style> {
    catalog(&[
        ("Classic Studio", "Model standing, classic studio shot."),
        ("Action & Motion", "Model walking or in motion."),
        ("Detail Close-up", "Very tight close-up on the shoes being worn."),
        ("Urban Lifestyle", "Model in a city lifestyle context."),
        ("Sport Performance", "Athlete model in a sports action context."),
        ("Everyday Casual", "Model in a natural, everyday situation."),
        ("Fashion Lookbook", "Editorial, lookbook style shot."),
        ("Clean Minimalist", "Model standing against a plain background, clean style."),
        ("Street Style", "Model in a street fashion context."),
        ("Premium Catalog", "High-definition details, professional catalog quality."),
    ])
}

/// Style catalog for leather goods.
pub fn leather_styles() -> Vec<Style> {
    catalog(&[
        ("Studio Product Shot", "Model holding the item with professional studio lighting."),
        ("Worn Lifestyle", "Model carrying the item in a natural, everyday city scene."),
        ("Luxury Still Life", "The item arranged in a luxurious, still-life setting, without a model."),
        ("Flat Lay E-commerce", "The item laid flat on the gray background, shot from above (flat lay style)."),
        ("Detail Close-up", "A close-up shot on the item's details like texture, hardware, and stitching, held by a model."),
        ("Fashion Lookbook", "An editorial-style shot featuring the item as a key part of a full fashion look."),
        ("In Motion", "Model walking, showcasing the item in motion to see how it hangs and moves."),
        ("Minimalist Chic", "A clean, minimalist shot focusing on the item's shape and form, held by a model."),
    ])
}

/// The catalog for a product class.
pub fn styles_for(class: ProductClass) -> Vec<Style> {
    match class {
        ProductClass::Clothing => clothing_styles(),
        ProductClass::Shoes => shoe_styles(),
        ProductClass::Leather => leather_styles(),
    }
}

fn catalog(entries: &[(&str, &str)]) -> Vec<Style> {
    entries
        .iter()
        .map(|(name, description)| Style {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_have_expected_sizes() {
        assert_eq!(clothing_styles().len(), 10);
        assert_eq!(shoe_styles().len(), 10);
        assert_eq!(leather_styles().len(), 8);
    }

    #[test]
    fn styles_for_dispatches_by_class() {
        assert_eq!(styles_for(ProductClass::Shoes), shoe_styles());
        assert_eq!(styles_for(ProductClass::Leather), leather_styles());
    }

    #[test]
    fn style_names_are_unique_within_a_catalog() {
        for class in [ProductClass::Clothing, ProductClass::Shoes, ProductClass::Leather] {
            let styles = styles_for(class);
            let mut names: Vec<_> = styles.iter().map(|s| s.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), styles.len());
        }
    }
}
