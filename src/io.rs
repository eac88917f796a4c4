use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::algorithms::Error;
use crate::field::FieldEstimate;
use crate::geometry::Position;
use crate::graph::BoundaryEdge;
use crate::params::HeterogeneityParams;

// Non-empty, non-comment lines with their 1-based line numbers.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_numbers(line_number: usize, line: &str) -> Result<Vec<f64>, Error> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|e| Error::Parse {
                line: line_number,
                message: format!("`{token}`: {e}"),
            })
        })
        .collect()
}

/// Parse agent positions, one `x,y` per line. A third `z` column is
/// accepted and dropped.
pub fn parse_positions(content: &str) -> Result<Vec<Position>, Error> {
    data_lines(content)
        .map(|(line_number, line)| -> Result<Position, Error> {
            match parse_numbers(line_number, line)?.as_slice() {
                [x, y] | [x, y, _] => Ok(Position::new(*x, *y)),
                values => Err(Error::Parse {
                    line: line_number,
                    message: format!("expected `x,y` or `x,y,z`, got {} values", values.len()),
                }),
            }
        })
        .collect()
}

/// Parse a field estimate, one `mean,variance` per line in cell order.
pub fn parse_field_estimate(content: &str) -> Result<FieldEstimate, Error> {
    let mut mean = Vec::new();
    let mut variance = Vec::new();
    for (line_number, line) in data_lines(content) {
        match parse_numbers(line_number, line)?.as_slice() {
            [m, v] => {
                mean.push(*m);
                variance.push(*v);
            }
            values => {
                return Err(Error::Parse {
                    line: line_number,
                    message: format!("expected `mean,variance`, got {} values", values.len()),
                })
            }
        }
    }
    FieldEstimate::new(mean, variance)
}

/// Read agent positions from a file.
pub fn read_positions(file_path: &Path) -> Result<Vec<Position>, Error> {
    parse_positions(&fs::read_to_string(file_path)?)
}

/// Read a field estimate from a file.
pub fn read_field_estimate(file_path: &Path) -> Result<FieldEstimate, Error> {
    parse_field_estimate(&fs::read_to_string(file_path)?)
}

/// Read cost model parameters from a JSON file.
pub fn read_params(file_path: &Path) -> Result<HeterogeneityParams, Error> {
    let file = File::open(file_path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

/// Write the partition array to a file.
pub fn write_partition_data_to_file(partition: &[usize], file_path: &Path) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(file_path)?);
    for (cell, agent) in partition.iter().enumerate() {
        writeln!(file, "cell {} => agent {}", cell, agent)?;
    }
    file.flush()
}

/// Write boundary edges to a file, one `a b` cell pair per line.
pub fn write_boundary_edges_to_file(edges: &[BoundaryEdge], file_path: &Path) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(file_path)?);
    for BoundaryEdge(a, b) in edges {
        writeln!(file, "{} {}", a, b)?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;
    use super::*;

    fn create_mock_file(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let file_path = dir.join(filename);
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    #[test]
    fn test_read_positions() -> Result<(), std::io::Error> {
        // Arrange
        let temp_dir = tempdir()?;
        let content = "# trial 1\n0.0,0.0\n\n10, 0.5, 2.0\n-1.5 3\n";
        let file_path = create_mock_file(temp_dir.path(), "agents.txt", content);

        // Act
        let positions = read_positions(&file_path).unwrap();

        // Assert
        assert_eq!(
            positions,
            vec![
                Position::new(0.0, 0.0),
                Position::new(10.0, 0.5),
                Position::new(-1.5, 3.0),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_bad_position_reports_line() {
        let result = parse_positions("1,2\n3,abc\n");

        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
    }

    #[test]
    fn test_wrong_column_count_reports_line() {
        let result = parse_positions("1,2\n\n3\n");

        assert!(matches!(result, Err(Error::Parse { line: 3, .. })));
    }

    #[test]
    fn test_read_field_estimate() -> Result<(), std::io::Error> {
        let temp_dir = tempdir()?;
        let file_path = create_mock_file(temp_dir.path(), "field.txt", "1.0,0.1\n2.0,0.2\n");

        let field = read_field_estimate(&file_path).unwrap();

        assert_eq!(field.mean(), &[1.0, 2.0]);
        assert_eq!(field.variance(), &[0.1, 0.2]);
        Ok(())
    }

    #[test]
    fn test_read_params() -> Result<(), std::io::Error> {
        let temp_dir = tempdir()?;
        let file_path = create_mock_file(temp_dir.path(), "params.json", r#"{"model": "distance"}"#);

        let params = read_params(&file_path).unwrap();

        assert_eq!(params, HeterogeneityParams::Distance);
        Ok(())
    }

    #[test]
    fn test_write_partition_and_boundaries() -> Result<(), std::io::Error> {
        // Arrange
        let temp_dir = tempdir()?;
        let partition_path = temp_dir.path().join("partition.txt");
        let boundary_path = temp_dir.path().join("boundary.txt");

        // Act
        write_partition_data_to_file(&[0, 0, 1], &partition_path)?;
        write_boundary_edges_to_file(&[BoundaryEdge(1, 2)], &boundary_path)?;

        // Assert
        assert_eq!(
            fs::read_to_string(&partition_path)?,
            "cell 0 => agent 0\ncell 1 => agent 0\ncell 2 => agent 1\n"
        );
        assert_eq!(fs::read_to_string(&boundary_path)?, "1 2\n");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_positions(Path::new("/nonexistent/agents.txt"));

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
