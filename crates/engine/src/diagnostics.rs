// Line-oriented diagnostic channel.
// The engine never prints; callers decide where the lines go.

/// Receives one human-readable line per diagnostic event.
pub trait Diagnostics {
    fn emit(&mut self, line: String);
}

/// Collects lines in memory (tests, JSON reports).
impl Diagnostics for Vec<String> {
    fn emit(&mut self, line: String) {
        self.push(line);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Silent {
    fn emit(&mut self, _line: String) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn emit(&mut self, line: String) {
        (**self).emit(line);
    }
}
