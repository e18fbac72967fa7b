//! Linear domain-to-range mapping used to place curves in a viewport

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    pub fn new(domain_min: f32, domain_max: f32, range_min: f32, range_max: f32) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn map(&self, value: f32) -> f32 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }
}
