/// Windowed sum over a row-major `rows x cols` plane via an integral image.
///
/// The window is `window x window` centred on each position (radius
/// `window / 2`) and is cut off at the plane edges, so positions outside the
/// plane contribute nothing. `window <= 1` returns the plane unchanged.
pub fn box_sum_2d(plane: &[i128], rows: usize, cols: usize, window: usize) -> Vec<i128> {
    debug_assert_eq!(plane.len(), rows * cols);
    if window <= 1 || rows == 0 || cols == 0 {
        return plane.to_vec();
    }

    let r = window / 2;
    let stride = cols + 1;
    let mut integral = vec![0i128; (rows + 1) * stride];

    for a in 0..rows {
        let mut row_sum = 0i128;
        for x in 0..cols {
            row_sum += plane[a * cols + x];
            integral[(a + 1) * stride + x + 1] = integral[a * stride + x + 1] + row_sum;
        }
    }

    let mut out = vec![0i128; rows * cols];
    for a in 0..rows {
        let a0 = a.saturating_sub(r);
        let a1 = (a + r).min(rows - 1);
        let top = a0 * stride;
        let bottom = (a1 + 1) * stride;

        for x in 0..cols {
            let x0 = x.saturating_sub(r);
            let x1 = (x + r).min(cols - 1);
            out[a * cols + x] = integral[bottom + x1 + 1] - integral[top + x1 + 1]
                - integral[bottom + x0]
                + integral[top + x0];
        }
    }
    out
}
