/// A finite, restartable iterator over the index subsets of `0..n` with at least two elements.
///
/// Subsets are produced in order of increasing size, and within a size in lexicographic order of
/// the index set, so the cheapest (smallest) combinations are tried first. A sequence of `n`
/// elements yields `2^n − n − 1` subsets in total.
///
/// The cost is exponential in `n`. The window matcher is the only consumer, and it bounds `n` by
/// the configured window width (`2 * offset + 1`), which makes the offset the operator-tunable
/// knob controlling worst-case search cost.
pub struct Subsets {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Subsets {
    pub fn new(n: usize) -> Self {
        Self { n, indices: vec![0, 1], started: false, done: n < 2 }
    }

    /// Advance `indices` to the next combination of the same size, or roll over to the first
    /// combination of the next size.
    fn advance(&mut self) {
        let k = self.indices.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] != i + self.n - k {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return;
            }
        }
        if k + 1 > self.n {
            self.done = true;
        } else {
            self.indices = (0..k + 1).collect();
        }
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started {
            self.advance();
            if self.done {
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.indices.clone())
    }
}
