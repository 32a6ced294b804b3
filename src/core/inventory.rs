use crate::core::commands::{Effect, Transition};
use crate::domain::model::Part;
use crate::utils::error::{Result, ShopError};

/// The authoritative part list of a session plus the current row selection.
/// Every view is rendered from here; nothing is read back from the screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    parts: Vec<Part>,
    selected: Option<usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            parts,
            selected: None,
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_part(&self) -> Option<&Part> {
        self.selected.and_then(|index| self.parts.get(index))
    }

    /// Selects a row by zero-based index.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.parts.len() {
            return Err(ShopError::invalid_input(format!(
                "Row {} does not exist ({} row(s) in the table).",
                index + 1,
                self.parts.len()
            )));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Commits a transition produced by a command handler.
    pub fn apply(&mut self, transition: &mut Transition) {
        if let Some(parts) = transition.parts.take() {
            self.parts = parts;
        }
        match transition.effect {
            Effect::Loaded { .. } | Effect::Deleted { .. } => self.selected = None,
            _ => {}
        }
        if self.selected.is_some_and(|index| index >= self.parts.len()) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_bounds() {
        let mut inventory = Inventory::from_parts(vec![Part::new("Mouse", 9.99, 5)]);

        assert!(inventory.select(0).is_ok());
        assert_eq!(inventory.selected_part().unwrap().name, "Mouse");
        assert!(inventory.select(1).is_err());
        assert_eq!(inventory.selected(), Some(0));
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut inventory = Inventory::from_parts(vec![
            Part::new("Mouse", 9.99, 5),
            Part::new("Pad", 3.0, 1),
        ]);
        inventory.select(1).unwrap();

        let mut transition = Transition {
            parts: Some(vec![Part::new("Mouse", 9.99, 5)]),
            effect: Effect::Deleted {
                part: Part::new("Pad", 3.0, 1),
            },
        };
        inventory.apply(&mut transition);

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.selected(), None);
    }
}
