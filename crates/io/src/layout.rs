//! Detection of how a file stores its data variable.

use std::path::Path;

use crate::error::IoError;

/// Where the daily values live inside a NetCDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLayout {
    /// The file has the configured variable by name.
    WrappedInVariable { name: String },
    /// The file is a single bare array stored under some other name.
    DirectArray { name: String },
}

impl SourceLayout {
    /// Name of the variable to read.
    pub fn variable(&self) -> &str {
        match self {
            Self::WrappedInVariable { name } | Self::DirectArray { name } => name,
        }
    }
}

/// Name and shape summary of one variable, enough to classify a layout.
#[derive(Debug, Clone)]
pub(crate) struct VariableShape {
    pub name: String,
    pub n_dims: usize,
    /// Whether the variable is a coordinate (named after its own dimension).
    pub is_coordinate: bool,
}

/// Picks a layout from the variables present in a file.
pub(crate) fn classify_layout(requested: &str, vars: &[VariableShape]) -> Option<SourceLayout> {
    if vars.iter().any(|v| v.name == requested) {
        return Some(SourceLayout::WrappedInVariable {
            name: requested.to_string(),
        });
    }
    let mut data_vars = vars.iter().filter(|v| v.n_dims == 3 && !v.is_coordinate);
    match (data_vars.next(), data_vars.next()) {
        (Some(only), None) => Some(SourceLayout::DirectArray {
            name: only.name.clone(),
        }),
        _ => None,
    }
}

/// Inspects an open file and reports where `variable` is stored.
///
/// # Errors
///
/// [`IoError::MissingVariable`] when the file neither has `variable` nor
/// holds exactly one 3-D data variable.
pub fn detect_layout(
    file: &netcdf::File,
    variable: &str,
    path: &Path,
) -> Result<SourceLayout, IoError> {
    let shapes: Vec<VariableShape> = file
        .variables()
        .map(|v| {
            let name = v.name();
            let dims = v.dimensions();
            VariableShape {
                is_coordinate: dims.len() == 1 && dims[0].name() == name,
                n_dims: dims.len(),
                name,
            }
        })
        .collect();
    classify_layout(variable, &shapes).ok_or_else(|| IoError::MissingVariable {
        name: variable.to_string(),
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(name: &str, n_dims: usize) -> VariableShape {
        VariableShape {
            name: name.to_string(),
            n_dims,
            is_coordinate: n_dims == 1,
        }
    }

    #[test]
    fn named_variable_wins() {
        let vars = [shape("time", 1), shape("tasmax", 3), shape("tas", 3)];
        assert_eq!(
            classify_layout("tasmax", &vars),
            Some(SourceLayout::WrappedInVariable {
                name: "tasmax".into()
            })
        );
    }

    #[test]
    fn single_unnamed_array_is_direct() {
        let vars = [
            shape("time", 1),
            shape("lat", 1),
            shape("lon", 1),
            shape("__xarray_dataarray_variable__", 3),
        ];
        let layout = classify_layout("tasmax", &vars).unwrap();
        assert_eq!(layout.variable(), "__xarray_dataarray_variable__");
        assert!(matches!(layout, SourceLayout::DirectArray { .. }));
    }

    #[test]
    fn ambiguous_or_absent_is_none() {
        let two = [shape("a", 3), shape("b", 3)];
        assert_eq!(classify_layout("tasmax", &two), None);
        let none = [shape("time", 1), shape("time_bnds", 2)];
        assert_eq!(classify_layout("tasmax", &none), None);
    }
}
