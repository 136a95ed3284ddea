use bumpalo::Bump;

/// Dense `rows x cols` table living in the sentence arena. Cells start empty
/// and out-of-range lookups read as empty too.
#[derive(Debug)]
pub struct SpanMatrix<'a, V> {
    rows: usize,
    cols: usize,
    cells: &'a mut [Option<V>],
}

impl<'a, V: Copy> SpanMatrix<'a, V> {
    pub fn new_in(rows: usize, cols: usize, arena: &'a Bump) -> Self {
        Self {
            rows,
            cols,
            cells: arena.alloc_slice_fill_copy(rows * cols, None),
        }
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn cols(&self) -> usize { self.cols }

    pub fn get(&self, row: usize, col: usize) -> Option<V> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    /// Panics if `(row, col)` lies outside the table.
    pub fn set(&mut self, row: usize, col: usize, value: V) {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} matrix",
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col] = Some(value);
    }

    /// Cells of one row, empty ones included.
    pub fn row(&self, row: usize) -> &[Option<V>] {
        if row >= self.rows {
            return &[];
        }
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Populated cells as `(row, col, value)`, row-major.
    pub fn populated(&self) -> impl Iterator<Item = (usize, usize, V)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|v| (i / cols, i % cols, v)))
    }
}
