//! The target-side seam: an ordered set of objects whose names can be replaced.

use crate::domain::errors::DomainError;
use crate::domain::model::SelectedObject;

/// Ordered selection provided by the target application.
///
/// The importer only reads the length and writes names by index, so adapters for a new host
/// need nothing beyond these two operations.
pub trait Selection {
    /// Number of selected objects.
    fn len(&self) -> usize;

    /// Replace the name of the object at `index`.
    fn set_name(&mut self, index: usize, name: &str) -> Result<(), DomainError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Selection for Vec<SelectedObject> {
    fn len(&self) -> usize {
        <[SelectedObject]>::len(self)
    }

    fn set_name(&mut self, index: usize, name: &str) -> Result<(), DomainError> {
        let len = <[SelectedObject]>::len(self);
        let object = self
            .get_mut(index)
            .ok_or(DomainError::SelectionIndexOutOfRange { index, len })?;
        object.name = name.to_owned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_name_replaces_only_the_target_object() {
        let mut selection = vec![SelectedObject::named("a"), SelectedObject::named("b")];
        selection.set_name(1, "Group/b").unwrap();
        assert_eq!(selection[0].name, "a");
        assert_eq!(selection[1].name, "Group/b");
    }

    #[test]
    fn set_name_out_of_range_is_an_error() {
        let mut selection = vec![SelectedObject::named("a")];
        let err = selection.set_name(3, "x").unwrap_err();
        assert!(matches!(
            err,
            DomainError::SelectionIndexOutOfRange { index: 3, len: 1 }
        ));
        assert_eq!(selection[0].name, "a");
    }

    #[test]
    fn empty_vec_is_empty_selection() {
        let selection: Vec<SelectedObject> = Vec::new();
        assert!(Selection::is_empty(&selection));
    }
}
