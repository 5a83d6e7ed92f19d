//! Passenger category → eligible ticket types.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{PassengerCategory, TicketType};

/// Built-in categories: each rider class with the ticket types it may use.
const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    ("Adult", &["Adult"]),
    ("Young Adult", &["Young Adult", "Adult"]),
    ("Child", &["Child"]),
];

/// Mapping from coarse rider classes to the ticket types each may buy.
///
/// A young adult may travel on a young-adult fare or an adult fare, so a
/// category maps to a set rather than a single ticket type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerCategories {
    categories: BTreeMap<PassengerCategory, BTreeSet<TicketType>>,
}

impl PassengerCategories {
    /// Create an empty mapping.
    pub fn empty() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Make a ticket type eligible for a category.
    pub fn insert(&mut self, category: PassengerCategory, ticket_type: TicketType) {
        self.categories
            .entry(category)
            .or_default()
            .insert(ticket_type);
    }

    /// Ticket types a category may use, or `None` for an unknown category.
    pub fn eligible(&self, category: &PassengerCategory) -> Option<&BTreeSet<TicketType>> {
        self.categories.get(category)
    }

    /// All categories, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &PassengerCategory> {
        self.categories.keys()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for PassengerCategories {
    fn default() -> Self {
        let mut categories = Self::empty();
        for (category, tickets) in DEFAULT_CATEGORIES {
            for ticket in *tickets {
                if let (Ok(c), Ok(t)) = (PassengerCategory::parse(category), TicketType::parse(ticket))
                {
                    categories.insert(c, t);
                }
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(s: &str) -> PassengerCategory {
        PassengerCategory::parse(s).unwrap()
    }

    fn tickets(names: &[&str]) -> BTreeSet<TicketType> {
        names.iter().map(|n| TicketType::parse(n).unwrap()).collect()
    }

    #[test]
    fn default_mapping() {
        let cats = PassengerCategories::default();
        assert_eq!(cats.len(), 3);
        assert_eq!(cats.eligible(&category("Adult")), Some(&tickets(&["Adult"])));
        assert_eq!(
            cats.eligible(&category("Young Adult")),
            Some(&tickets(&["Young Adult", "Adult"]))
        );
        assert_eq!(cats.eligible(&category("Child")), Some(&tickets(&["Child"])));
        assert_eq!(cats.eligible(&category("Senior")), None);
    }

    #[test]
    fn insert_extends_category() {
        let mut cats = PassengerCategories::empty();
        assert!(cats.is_empty());
        cats.insert(category("Student"), TicketType::parse("Student").unwrap());
        cats.insert(category("Student"), TicketType::parse("Adult").unwrap());
        cats.insert(category("Student"), TicketType::parse("Adult").unwrap());

        assert_eq!(
            cats.eligible(&category("Student")),
            Some(&tickets(&["Adult", "Student"]))
        );
    }

    #[test]
    fn categories_sorted() {
        let cats = PassengerCategories::default();
        let names: Vec<_> = cats.categories().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["Adult", "Child", "Young Adult"]);
    }
}
