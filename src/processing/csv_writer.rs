use crate::discretization::mesh::Mesh;
use crate::levelset::CellStatus;
use crate::levelset::variable::DistanceVariable;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write equally long columns to a CSV file with headers.
pub fn write_csv<P: AsRef<Path>>(path: P, headers: &[&str], columns: &[&[f64]]) -> io::Result<()> {
    if headers.len() != columns.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Headers count ({}) doesn't match data columns ({})",
                headers.len(),
                columns.len()
            ),
        ));
    }

    let n_rows = columns.first().map_or(0, |c| c.len());
    if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Column lengths differ ({} vs {})", bad.len(), n_rows),
        ));
    }

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{}", headers.join(","))?;

    for i in 0..n_rows {
        let row: Vec<String> = columns.iter().map(|col| format!("{:.15e}", col[i])).collect();
        writeln!(file, "{}", row.join(","))?;
    }

    file.flush()
}

/// Write one row per cell: centroid, field value and marching status code
/// (0 unknown, 1 known, 2 trial).
pub fn write_distance_field<P: AsRef<Path>>(
    path: P,
    mesh: &Mesh,
    var: &DistanceVariable,
    status: &[CellStatus],
) -> io::Result<()> {
    let x: Vec<f64> = mesh.cells.iter().map(|c| c.centroid.x).collect();
    let y: Vec<f64> = mesh.cells.iter().map(|c| c.centroid.y).collect();
    let codes: Vec<f64> = status.iter().map(|s| s.code()).collect();

    write_csv(
        path,
        &["x", "y", "phi", "status"],
        &[&x, &y, var.as_slice(), &codes],
    )
}
