//! Metric families and their per-format conversion factors
//!
//! | Family      | Canonical | PDF             | DOCX                         |
//! |-------------|-----------|-----------------|------------------------------|
//! | Length      | points    | points (×1)     | twips, 1/1440 inch (×20)     |
//! | Font size   | points    | points (×1)     | half-points (×2)             |
//! | Line height | multiple  | size × multiple | 240ths of a line (×240)      |
//!
//! Factors are per family, never per element.

use serde::{Deserialize, Serialize};

/// Twips per point (DOCX length unit)
pub const TWIPS_PER_POINT: f64 = 20.0;

/// Half-points per point (DOCX font size unit)
pub const HALF_POINTS_PER_POINT: f64 = 2.0;

/// DOCX `w:line` value for single spacing with the `auto` rule
pub const DOCX_SINGLE_LINE: f64 = 240.0;

/// A physical length, stored in points
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a length from points
    pub const fn points(value: f64) -> Self {
        Self(value)
    }

    /// Length in PDF user-space units (points)
    pub fn pdf(self) -> f64 {
        self.0
    }

    /// Length in DOCX twips
    pub fn twips(self) -> i64 {
        (self.0 * TWIPS_PER_POINT).round() as i64
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl std::ops::Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

/// A font size, stored in points
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FontSize(f64);

impl FontSize {
    pub const fn points(value: f64) -> Self {
        Self(value)
    }

    /// Size for the PDF `Tf` operator
    pub fn pdf(self) -> f64 {
        self.0
    }

    /// Size for DOCX `w:sz` (half-points)
    pub fn half_points(self) -> u32 {
        (self.0 * HALF_POINTS_PER_POINT).round() as u32
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

/// Line height as a multiple of the font size
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct LineHeight(f64);

impl LineHeight {
    pub const fn multiple(value: f64) -> Self {
        Self(value)
    }

    /// PDF leading for one line of text at `size`
    pub fn leading(self, size: FontSize) -> Length {
        Length::points(size.pdf() * self.0)
    }

    /// DOCX `w:line` value (auto rule)
    pub fn docx_line(self) -> i64 {
        (self.0 * DOCX_SINGLE_LINE).round() as i64
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}
