//! Isometric (along track) correction
use log::debug;
use nalgebra::DMatrix;

use crate::{
    grid::WaterfallGrid,
    utils::{interp, linspace},
};

/// Resamples every column of `grid` over `round(nrows * factor)` rows,
/// so along track and across track pixel pitch match.
/// Resampled rows are spread over `[0, nrows]`: anything past the last
/// input row is zero filled and carries no data.
pub fn stretch(grid: &WaterfallGrid, factor: f64) -> WaterfallGrid {
    let (nrows, ncols) = (grid.nrows(), grid.ncols());
    let target = ((nrows as f64 * factor).round() as usize).max(1);
    debug!("isometric stretch x{:.3}: {} -> {} rows", factor, nrows, target);

    let y = linspace(0.0, nrows as f64, target);
    let yp = (0..nrows).map(|i| i as f64).collect::<Vec<_>>();

    let mut values = DMatrix::<f64>::zeros(target, ncols);
    let mut valid = DMatrix::<bool>::from_element(target, ncols, false);

    for col in 0..ncols {
        let fp = grid.values.column(col).iter().copied().collect::<Vec<_>>();
        let mask = grid.valid.column(col).iter().copied().collect::<Vec<_>>();
        for (row, value) in interp(&y, &yp, &fp, Some(&mask)).into_iter().enumerate() {
            if let Some(value) = value {
                values[(row, col)] = value;
                valid[(row, col)] = true;
            }
        }
    }

    WaterfallGrid { values, valid }
}

#[cfg(test)]
mod test {
    use super::stretch;
    use crate::grid::WaterfallGrid;
    use rstest::*;

    #[fixture]
    fn constant_grid() -> WaterfallGrid {
        WaterfallGrid::from_rows((0..4).map(|_| vec![Some(7.0), Some(-3.5)]), 2)
    }

    #[rstest]
    #[case(1.0)]
    #[case(1.5)]
    #[case(2.5)]
    #[case(4.0)]
    fn constant_columns_are_preserved(constant_grid: WaterfallGrid, #[case] factor: f64) {
        let stretched = stretch(&constant_grid, factor);
        assert_eq!(stretched.nrows(), (4.0 * factor).round() as usize);
        assert_eq!(stretched.ncols(), 2);

        let mut padding = 0;
        for row in 0..stretched.nrows() {
            match (stretched.value(row, 0), stretched.value(row, 1)) {
                (Some(a), Some(b)) => {
                    assert_eq!((a, b), (7.0, -3.5));
                    assert_eq!(padding, 0, "valid row after padding");
                },
                (None, None) => {
                    padding += 1;
                    assert_eq!(stretched.values()[(row, 0)], 0.0);
                    assert_eq!(stretched.values()[(row, 1)], 0.0);
                },
                other => panic!("inconsistent row {}: {:?}", row, other),
            }
        }
        assert!(padding >= 1, "last row should be padding");
    }

    #[test]
    fn unit_factor_keeps_first_row() {
        let grid = WaterfallGrid::from_rows(
            vec![
                vec![Some(5.0), Some(4.0), Some(3.0)],
                vec![Some(1.0), Some(2.0), Some(3.0)],
            ],
            3,
        );
        let stretched = stretch(&grid, 1.0);
        assert_eq!(stretched.nrows(), 2);
        assert_eq!(stretched.row(0), grid.row(0));
        assert_eq!(stretched.row(1), vec![None, None, None]);
    }

    #[test]
    fn interpolates_between_rows() {
        let grid = WaterfallGrid::from_rows(
            vec![vec![Some(0.0)], vec![Some(10.0)], vec![Some(20.0)], vec![Some(30.0)]],
            1,
        );
        // y = [0, 0.8, 1.6, 2.4, 3.2, 4.0]
        let stretched = stretch(&grid, 1.5);
        let column = (0..6).map(|r| stretched.value(r, 0)).collect::<Vec<_>>();
        assert_eq!(column[0], Some(0.0));
        assert!((column[1].unwrap() - 8.0).abs() < 1e-9);
        assert!((column[2].unwrap() - 16.0).abs() < 1e-9);
        assert!((column[3].unwrap() - 24.0).abs() < 1e-9);
        assert_eq!(column[4], None);
        assert_eq!(column[5], None);
    }

    #[test]
    fn no_data_is_not_interpolated() {
        let grid = WaterfallGrid::from_rows(vec![vec![Some(4.0)], vec![None], vec![Some(4.0)]], 1);
        // y = [0, 1, 2, 3]
        let stretched = stretch(&grid, 4.0 / 3.0);
        let column = (0..4).map(|r| stretched.value(r, 0)).collect::<Vec<_>>();
        assert_eq!(column, vec![Some(4.0), None, Some(4.0), None]);
    }
}
