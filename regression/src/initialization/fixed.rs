use super::ParamGen;

/// A parameter generator that hands out a fixed list of values, in order.
///
/// Handy for warm starting a fit from known parameters and for reproducible tests.
pub struct FixedParamGen {
    values: Vec<f64>,
    next: usize,
}

impl FixedParamGen {
    /// Creates a generator that yields `values` once.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }

    /// Creates a generator that yields `value` exactly `n` times.
    pub fn repeat(value: f64, n: usize) -> Self {
        Self::new(vec![value; n])
    }
}

impl ParamGen for FixedParamGen {
    fn sample(&mut self, n: usize) -> Option<Vec<f64>> {
        let rest = &self.values[self.next..];
        if rest.is_empty() {
            return None;
        }

        let take = n.min(rest.len());
        self.next += take;
        Some(rest[..take].to_vec())
    }
}
