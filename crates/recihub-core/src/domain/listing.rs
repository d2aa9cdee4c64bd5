//! Listing types: sort order and pages of recipes.

use serde::Serialize;

use super::recipe::Recipe;

/// Sort order for recipe listings.
///
/// Listings only accept orders from this closed set so caller-supplied text
/// never reaches the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecipeOrder {
    IdAsc,
    #[default]
    IdDesc,
    NameAsc,
    NameDesc,
}

impl RecipeOrder {
    /// Parse an order such as `"id desc"` or `"name"`.
    ///
    /// Column and direction are case-insensitive; the direction defaults to
    /// ascending. Returns `None` for anything outside the supported set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.to_ascii_lowercase();
        let mut parts = lowered.split_whitespace();
        let column = parts.next()?;
        let descending = match parts.next() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }

        match (column, descending) {
            ("id", false) => Some(Self::IdAsc),
            ("id", true) => Some(Self::IdDesc),
            ("name", false) => Some(Self::NameAsc),
            ("name", true) => Some(Self::NameDesc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IdAsc => "id asc",
            Self::IdDesc => "id desc",
            Self::NameAsc => "name asc",
            Self::NameDesc => "name desc",
        }
    }
}

impl std::fmt::Display for RecipeOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One page of an owner's recipes (parent rows only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipePage {
    pub recipes: Vec<Recipe>,
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}
