/// Running first and second moments of a sampled quantity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub count: u64,
    pub sum: f64,
    pub sum_sq: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Sample mean, `None` before the first update.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }

    /// Population variance `<x^2> - <x>^2`, clamped at zero against rounding.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let c = self.count as f64;
        Some((self.sum_sq / c - mean * mean).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        let s = Statistics::new();
        assert_eq!(s.mean(), None);
        assert_eq!(s.variance(), None);
    }

    #[test]
    fn test_moments() {
        let mut s = Statistics::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            s.update(v);
        }
        assert_eq!(s.count, 8);
        assert_relative_eq!(s.mean().unwrap(), 5.0);
        assert_relative_eq!(s.variance().unwrap(), 4.0);
    }

    #[test]
    fn test_constant_series_has_zero_variance() {
        let mut s = Statistics::new();
        for _ in 0..1000 {
            s.update(-0.1);
        }
        let var = s.variance().unwrap();
        assert!((0.0..1e-12).contains(&var), "variance = {var}");
    }
}
