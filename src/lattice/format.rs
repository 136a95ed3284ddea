use crate::lattice::{InputPath, InputPaths, SpanMatrix};

/// S-expression dump of a lattice, one path per line.
///
/// ```text
/// (lattice len=2 max=2
///   (blank)
///   (path [0,0] "a")
///   (path [0,1] "a b" prefix=[0,0] used)
///   (path [1,1] "b"))
/// ```
pub struct LatticeFormatter {
    output: String,
    indent: usize,
    show_matrix: bool,
}

impl Default for LatticeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LatticeFormatter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
            show_matrix: false,
        }
    }

    /// Also dump the matrix, one `(row ...)` per start position with `-` for
    /// empty cells.
    pub fn with_matrix(mut self) -> Self {
        self.show_matrix = true;
        self
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn format<T: ?Sized>(mut self, paths: &InputPaths<'_, T>) -> String {
        self.visit_lattice(paths);
        self.finish()
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    pub fn visit_lattice<T: ?Sized>(&mut self, paths: &InputPaths<'_, T>) {
        self.write(&format!(
            "(lattice len={} max={}",
            paths.sentence_len(),
            paths.max_span_length()
        ));
        self.indent += 1;
        self.newline();
        self.write("(blank)");
        for path in paths {
            self.newline();
            self.visit_path(path);
        }
        if self.show_matrix {
            self.newline();
            self.visit_matrix(paths.matrix());
        }
        self.indent -= 1;
        self.write(")");
    }

    pub fn visit_path<T: ?Sized>(&mut self, path: &InputPath<'_, T>) {
        self.write(&format!("(path {} \"{}\"", path.span(), path.sub_phrase()));
        if let Some(prefix) = path.prefix() {
            self.write(&format!(" prefix={}", prefix.span()));
        }
        if path.is_used() {
            self.write(" used");
        }
        self.write(")");
    }

    fn visit_matrix<T: ?Sized>(&mut self, matrix: &SpanMatrix<'_, &InputPath<'_, T>>) {
        self.write("(matrix");
        self.indent += 1;
        for row in 0..matrix.rows() {
            self.newline();
            self.write(&format!("(row {row}"));
            for cell in matrix.row(row) {
                match cell {
                    Some(path) => self.write(&format!(" {}", path.span())),
                    None => self.write(" -"),
                }
            }
            self.write(")");
        }
        self.indent -= 1;
        self.write(")");
    }
}
