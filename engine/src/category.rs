//! Category classification.
//!
//! The upstream catalog contains test and garbage category names. Shoppers
//! see those grouped under a single [`OTHERS_BUCKET`]. Tokens match as plain
//! substrings, so ordinary names such as "Education" land there too.

use crate::Product;

/// Bucket label for miscellaneous categories.
pub const OTHERS_BUCKET: &str = "Others";

/// Pseudo bucket that matches every product.
pub const ALL_BUCKET: &str = "All";

/// Lowercase substrings that mark a category name as miscellaneous.
const MISC_TOKENS: [&str; 3] = ["change", "new", "cat"];

/// Clean category names must be shorter than this many characters.
const MAX_CLEAN_NAME_LEN: usize = 40;

/// Whether a category name falls into the miscellaneous bucket.
pub fn is_misc(name: &str) -> bool {
    let lower = name.to_lowercase();
    MISC_TOKENS.iter().any(|token| lower.contains(token))
        || name.starts_with(|c: char| c.is_ascii_digit())
        || name.contains('-')
}

/// The display bucket for a category name.
pub fn bucket(name: &str) -> &str {
    if is_misc(name) {
        OTHERS_BUCKET
    } else {
        name
    }
}

/// The display bucket for a product.
pub fn product_bucket(product: &Product) -> &str {
    bucket(&product.category.name)
}

/// Whether a category name is clean enough for the shop listing.
///
/// Accepts letters, digits, whitespace, `&`, `'` and `-`, rejects anything
/// mentioning "test", and caps the length.
pub fn is_clean(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '&' | '\'' | '-'))
        && !name.to_lowercase().contains("test")
        && name.chars().count() < MAX_CLEAN_NAME_LEN
}

/// `["All", ...]` followed by each bucket in first-seen order.
pub fn buckets<'a, I>(products: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut out = vec![ALL_BUCKET.to_string()];
    for product in products {
        let bucket = product_bucket(product);
        if !out.iter().any(|b| b == bucket) {
            out.push(bucket.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn product(id: i64, category: &str) -> Product {
        Product::new(id, "p", 1.0, "d", Category::new(1, category), vec![])
    }

    #[test]
    fn misc_names_go_to_others() {
        assert_eq!(bucket("New-23"), OTHERS_BUCKET);
        assert_eq!(bucket("Changed"), OTHERS_BUCKET);
        assert_eq!(bucket("5 items"), OTHERS_BUCKET);
        assert_eq!(bucket("Home-Garden"), OTHERS_BUCKET);
        assert_eq!(bucket("category 7"), OTHERS_BUCKET);
        assert_eq!(bucket("BRAND NEW"), OTHERS_BUCKET);
    }

    #[test]
    fn regular_names_kept() {
        assert_eq!(bucket("Electronics"), "Electronics");
        assert_eq!(bucket("Shoes"), "Shoes");
        assert_eq!(bucket("Furniture"), "Furniture");
        assert_eq!(bucket("Clothes"), "Clothes");
    }

    #[test]
    fn digit_only_counts_at_start() {
        assert!(is_misc("9 lives"));
        assert!(!is_misc("Top 10"));
    }

    #[test]
    fn empty_name_is_not_misc() {
        assert!(!is_misc(""));
        assert_eq!(bucket(""), "");
    }

    #[test]
    fn clean_names() {
        assert!(is_clean("Electronics"));
        assert!(is_clean("Home & Garden"));
        assert!(is_clean("Kid's-Toys 2"));
    }

    #[test]
    fn unclean_names() {
        assert!(!is_clean(""));
        assert!(!is_clean("Category_1"));
        assert!(!is_clean("Testing stuff"));
        assert!(!is_clean("my TEST cat"));
        assert!(!is_clean("Ünïcode"));
        assert!(!is_clean(&"a".repeat(40)));
        assert!(is_clean(&"a".repeat(39)));
    }

    #[test]
    fn bucket_listing_in_first_seen_order() {
        let products = vec![
            product(1, "Shoes"),
            product(2, "New-23"),
            product(3, "Electronics"),
            product(4, "Shoes"),
            product(5, "Changed"),
        ];

        assert_eq!(
            buckets(&products),
            vec!["All", "Shoes", OTHERS_BUCKET, "Electronics"]
        );
    }

    #[test]
    fn bucket_listing_empty() {
        assert_eq!(buckets(&Vec::<Product>::new()), vec![ALL_BUCKET]);
    }
}
