use std::fmt;

/// Output region of the builder.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Region {
    QuadVertices,
    QuadIndices,
    LineVertices,
    LineIndices,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::QuadVertices => "quad vertex",
            Region::QuadIndices => "quad index",
            Region::LineVertices => "line vertex",
            Region::LineIndices => "line index",
        };
        f.write_str(name)
    }
}

/// Error returned by the grid builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A caller-provided output slice cannot hold the grid.
    ///
    /// `required` and `actual` are element counts, not bytes.
    OutputTooSmall {
        region: Region,
        required: usize,
        actual: usize,
    },

    /// The grid has more vertices than a `u32` index can address.
    SizeTooLarge { size: u32 },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::OutputTooSmall { region, required, actual } => write!(
                f,
                "{region} output too small: need {required} elements, got {actual}"
            ),
            MeshError::SizeTooLarge { size } => {
                write!(f, "grid size {size} exceeds 32-bit index range")
            }
        }
    }
}

impl std::error::Error for MeshError {}
