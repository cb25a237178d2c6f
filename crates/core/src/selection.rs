//! Id-to-label mapping for selection widgets.
//!
//! Clients submit the `id`; the `label` is display text only and is never
//! parsed back into an identifier.

use serde::Serialize;

use crate::types::DbId;

/// One entry of a select box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOption {
    pub id: DbId,
    pub label: String,
}

/// Build options from `(id, name)` pairs, preserving input order.
pub fn build_options<'a, I>(items: I) -> Vec<SelectionOption>
where
    I: IntoIterator<Item = (DbId, &'a str)>,
{
    items
        .into_iter()
        .map(|(id, name)| SelectionOption {
            id,
            label: format!("#{id} {name}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_include_id_and_name() {
        let options = build_options([(3, "Croissants"), (1, "Fresh Apples")]);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, 3);
        assert_eq!(options[0].label, "#3 Croissants");
        assert_eq!(options[1].label, "#1 Fresh Apples");
    }

    #[test]
    fn names_containing_separators_do_not_affect_ids() {
        let options = build_options([(12, "ID: 99 - Soup")]);
        assert_eq!(options[0].id, 12);
        assert_eq!(options[0].label, "#12 ID: 99 - Soup");
    }
}
