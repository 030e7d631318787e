//! JSON layout documents.
//!
//! ```json
//! {
//!   "config": { "columns": 4, "spacing": 2 },
//!   "children": [
//!     { "label": "mail", "left": 0, "top": 0 },
//!     { "label": "photos", "left": 1, "top": 0, "cellsWidth": 2 }
//!   ]
//! }
//! ```

use std::path::Path;

use cellgrid_layout::{CellLayout, GridConfig, SlotAttrs};
use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};

/// One labelled child and its declared slot attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDocument {
    pub label: String,
    #[serde(flatten)]
    pub attrs: SlotAttrs,
}

/// A container config plus its children, in attach order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDocument {
    pub config: GridConfig,
    pub children: Vec<ChildDocument>,
}

impl LayoutDocument {
    /// Eight single cells on a four-column grid, labelled `A` to `H`.
    #[must_use]
    pub fn builtin() -> Self {
        let children = ('A'..='H')
            .enumerate()
            .map(|(i, label)| ChildDocument {
                label: label.to_string(),
                attrs: SlotAttrs::new((i % 4) as i32, (i / 4) as i32, 1, 1),
            })
            .collect();
        Self {
            config: GridConfig::default(),
            children,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.config.validate()?;
        Ok(document)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DemoError::MissingDocument {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Build a container holding every child's label as its content.
    pub fn build(&self) -> Result<CellLayout<String>> {
        let mut grid = CellLayout::new(self.config.clone())?;
        for child in &self.children {
            grid.push(child.label.clone(), child.attrs)?;
        }
        tracing::info!(
            columns = self.config.columns,
            children = self.children.len(),
            "layout document loaded"
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_document_is_two_rows_of_four() {
        let document = LayoutDocument::builtin();
        assert_eq!(document.children.len(), 8);
        assert_eq!(document.children[5].label, "F");
        assert_eq!(document.children[5].attrs, SlotAttrs::new(1, 1, 1, 1));
        assert_eq!(document.build().unwrap().len(), 8);
    }

    #[test]
    fn child_attributes_are_flattened() {
        let document = LayoutDocument::from_json_str(
            r#"{ "config": { "columns": 3 },
                 "children": [ { "label": "wide", "left": 1, "cellsWidth": 2 } ] }"#,
        )
        .unwrap();
        assert_eq!(document.config.columns, 3);
        assert_eq!(document.children[0].attrs, SlotAttrs::new(1, 0, 2, -1));
    }

    #[test]
    fn invalid_slot_fails_at_build() {
        let document = LayoutDocument::from_json_str(
            r#"{ "children": [ { "label": "x", "left": 3, "cellsWidth": 2 } ] }"#,
        )
        .unwrap();
        assert!(matches!(document.build(), Err(DemoError::Grid(_))));
    }

    #[test]
    fn zero_columns_rejected_on_parse() {
        let err = LayoutDocument::from_json_str(r#"{ "config": { "columns": 0 } }"#).unwrap_err();
        assert!(matches!(err, DemoError::Grid(_)));
    }
}
