//! Export - the combined matrix as a CSV file.

mod csv;

pub use self::csv::{read_csv, write_csv, write_matrix, ExportedScores};
