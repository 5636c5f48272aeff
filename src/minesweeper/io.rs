//! File I/O operations for minesweeper grids

use super::{CellState, Grid};
use crate::error::SolveError;
use anyhow::{Context, Result};
use std::path::Path;

pub const UNOPENED_CHAR: &str = "_";
pub const FLAGGED_CHAR: &str = "X";

/// Load a grid from a text file
/// Format: one row per line, cells separated by commas; a digit is a revealed
/// count, `_` an unopened cell and `X` a flagged cell
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from its string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid, SolveError> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SolveError::MalformedGrid(
            "grid file is empty or contains no valid rows".to_string(),
        ));
    }

    let mut cells = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let row = line
            .split(',')
            .enumerate()
            .map(|(col_idx, token)| parse_cell(token.trim(), row_idx, col_idx))
            .collect::<Result<Vec<_>, _>>()?;
        cells.push(row);
    }

    Grid::from_cells(cells)
}

fn parse_cell(token: &str, row: usize, column: usize) -> Result<CellState, SolveError> {
    match token {
        UNOPENED_CHAR => Ok(CellState::Unopened),
        FLAGGED_CHAR => Ok(CellState::Flagged),
        _ => match token.parse::<u8>() {
            Ok(count) if count <= 8 && token.chars().all(|ch| ch.is_ascii_digit()) => {
                Ok(CellState::Revealed(count))
            }
            _ => Err(SolveError::InvalidInputSymbol {
                symbol: token.to_string(),
                row,
                column,
            }),
        },
    }
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height * grid.width * 3);

    for row in 0..grid.height {
        let tokens: Vec<String> = (0..grid.width)
            .map(|col| match grid.cells[grid.index(row, col)] {
                CellState::Unopened => UNOPENED_CHAR.to_string(),
                CellState::Flagged => FLAGGED_CHAR.to_string(),
                CellState::Revealed(n) => n.to_string(),
            })
            .collect();
        result.push_str(&tokens.join(", "));
        result.push('\n');
    }

    result
}

/// Create example grid files
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Single mine in the top row
    let corner_content = "1, _, 1, 0\n1, 1, 1, 0\n0, 0, 0, 0\n";
    std::fs::write(dir.join("single_mine.txt"), corner_content)
        .context("Failed to write single_mine.txt")?;

    // The 1-2-1 pattern: both ends are mines, the middle is safe
    let one_two_one_content = "_, _, _\n1, 2, 1\n0, 0, 0\n";
    std::fs::write(dir.join("one_two_one.txt"), one_two_one_content)
        .context("Failed to write one_two_one.txt")?;

    // Every neighbor of the center is a mine
    let saturated_content = "_, _, _\n_, 8, _\n_, _, _\n";
    std::fs::write(dir.join("saturated.txt"), saturated_content)
        .context("Failed to write saturated.txt")?;

    // Two cells share one mine; nothing can be proven
    let ambiguous_content = "_, _\n1, 1\n";
    std::fs::write(dir.join("ambiguous.txt"), ambiguous_content)
        .context("Failed to write ambiguous.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use CellState::*;

    #[test]
    fn test_parse_grid_from_string() {
        let content = "1, _, 1\n1, X, 1\n";
        let grid = parse_grid_from_string(content).unwrap();

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.get(0, 0), Some(Revealed(1)));
        assert_eq!(grid.get(0, 1), Some(Unopened));
        assert_eq!(grid.get(1, 1), Some(Flagged));
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let grid = parse_grid_from_string("  0 ,_,X  \n\n").unwrap();
        assert_eq!(grid.cells, vec![Revealed(0), Unopened, Flagged]);
    }

    #[test]
    fn test_grid_to_string() {
        let grid = Grid::from_cells(vec![
            vec![Revealed(0), Unopened],
            vec![Flagged, Revealed(3)],
        ])
        .unwrap();
        assert_eq!(grid_to_string(&grid), "0, _\nX, 3\n");
    }

    #[test]
    fn test_invalid_symbol() {
        let err = parse_grid_from_string("1, ?, 1\n").unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidInputSymbol {
                symbol: "?".to_string(),
                row: 0,
                column: 1,
            }
        );

        // Counts above eight cannot occur on a square grid
        assert!(matches!(
            parse_grid_from_string("9, _\n"),
            Err(SolveError::InvalidInputSymbol { .. })
        ));
        assert!(matches!(
            parse_grid_from_string("+1, _\n"),
            Err(SolveError::InvalidInputSymbol { .. })
        ));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            parse_grid_from_string("_, _\n_\n"),
            Err(SolveError::MalformedGrid(_))
        ));
        assert!(matches!(parse_grid_from_string(""), Err(SolveError::MalformedGrid(_))));
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/grid.txt");

        let grid = Grid::from_cells(vec![vec![Revealed(1), Unopened], vec![Flagged, Revealed(2)]])
            .unwrap();
        save_grid_to_file(&grid, &file_path).unwrap();

        let loaded = load_grid_from_file(&file_path).unwrap();
        assert_eq!(grid, loaded);
    }

    #[test]
    fn test_load_reports_invalid_symbol() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("bad.txt");
        std::fs::write(&file_path, "1, Q\n").unwrap();

        let err = load_grid_from_file(&file_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SolveError>(),
            Some(SolveError::InvalidInputSymbol { .. })
        ));
    }

    #[test]
    fn test_create_example_grids() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        for name in ["single_mine.txt", "one_two_one.txt", "saturated.txt", "ambiguous.txt"] {
            assert!(temp_dir.path().join(name).exists());
        }

        let saturated = load_grid_from_file(temp_dir.path().join("saturated.txt")).unwrap();
        assert_eq!(saturated.unopened_count(), 8);
        assert_eq!(saturated.get(1, 1), Some(Revealed(8)));
    }
}
