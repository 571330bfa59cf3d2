use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

/// Spending category shared by transactions and budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Food,
    Bills,
    Transport,
    Shopping,
    Entertainment,
    Travel,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Bills,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Travel,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Bills => "Bills",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// All categories ordered by name.
    pub fn sorted_by_name() -> Vec<Category> {
        let mut all = Self::ALL.to_vec();
        all.sort_by_key(|c| c.as_str());
        all
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let allowed: Vec<&str> = Self::ALL.iter().map(Category::as_str).collect();
            AppError::ValidationError(format!(
                "Unknown category '{s}', expected one of: {}",
                allowed.join(", ")
            ))
        })
    }
}

/// Validator hook for DTO fields that carry a category name.
pub fn validate_category(value: &str) -> Result<(), validator::ValidationError> {
    match Category::parse(value) {
        Some(_) => Ok(()),
        None => Err(validator::ValidationError::new("unknown_category")),
    }
}

/// Response listing the available categories
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    /// Category names in alphabetical order
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Category::parse("Food"), Some(Category::Food));
        assert_eq!(Category::parse("Travel"), Some(Category::Travel));
        assert_eq!(Category::parse("food"), None);
        assert_eq!(Category::parse("Groceries"), None);
    }

    #[test]
    fn test_from_str_names_allowed_values() {
        let err = "Rent".parse::<Category>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Rent"));
        assert!(message.contains("Entertainment"));
    }

    #[test]
    fn test_sorted_by_name() {
        let names: Vec<&str> = Category::sorted_by_name()
            .iter()
            .map(Category::as_str)
            .collect();
        assert_eq!(
            names,
            vec![
                "Bills",
                "Entertainment",
                "Food",
                "Other",
                "Shopping",
                "Transport",
                "Travel"
            ]
        );
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&Category::Bills).unwrap(), "\"Bills\"");
        let parsed: Category = serde_json::from_str("\"Shopping\"").unwrap();
        assert_eq!(parsed, Category::Shopping);
    }
}
