//! Geometry shared by the SVG charts.

/// Outer size and margins of a chart's SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 280.0,
            margin_top: 20.0,
            margin_right: 24.0,
            margin_bottom: 48.0,
            margin_left: 72.0,
        }
    }
}

impl ChartFrame {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin_right
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    /// Vertical value scale spanning the plot area, `0` at the bottom.
    pub fn y_scale(&self, max_value: f64) -> LinearScale {
        LinearScale::new((0.0, nice_max(max_value)), (self.bottom(), self.margin_top))
    }

    pub fn x_bands(&self, count: usize) -> BandScale {
        BandScale::new(count, (self.margin_left, self.right()))
    }
}

/// Smallest "round" number (1, 2, 2.5, 5 × 10^k) that is `>= value`.
pub fn nice_max(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|s| normalized <= *s)
        .unwrap_or(10.0);
    step * magnitude
}

/// Maps a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 || !value.is_finite() {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// `count + 1` evenly spaced values from the domain start to its end.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(1);
        let (d0, d1) = self.domain;
        (0..=count)
            .map(|i| d0 + (d1 - d0) * i as f64 / count as f64)
            .collect()
    }
}

/// Evenly divides a pixel range into `count` bands (one per category).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range: (f64, f64),
}

const BAND_PADDING: f64 = 0.2;

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self { count, range }
    }

    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    /// Width of the drawn bar inside a band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - BAND_PADDING)
    }

    /// Left edge of the bar in band `index`.
    pub fn start(&self, index: usize) -> f64 {
        self.range.0 + self.step() * index as f64 + self.step() * BAND_PADDING / 2.0
    }

    pub fn center(&self, index: usize) -> f64 {
        self.range.0 + self.step() * (index as f64 + 0.5)
    }

    /// Band under pixel `x`, if any.
    pub fn index_at(&self, x: f64) -> Option<usize> {
        let step = self.step();
        if step <= 0.0 || x < self.range.0 || x >= self.range.1 {
            return None;
        }
        let index = ((x - self.range.0) / step).floor() as usize;
        Some(index.min(self.count - 1))
    }
}

/// SVG path through `points`.
pub fn line_path(points: &[(f64, f64)]) -> String {
    let mut path = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if !path.is_empty() {
            path.push(' ');
        }
        path.push_str(&format!("{} {:.2} {:.2}", cmd, x, y));
    }
    path
}

/// Show at most `max_labels` axis labels; returns whether label `index` is shown.
pub fn show_label(index: usize, count: usize, max_labels: usize) -> bool {
    if count <= max_labels || max_labels == 0 {
        return true;
    }
    let every = count.div_ceil(max_labels);
    index % every == 0
}
