//! One named degree of freedom of the device.

/// Named value with an advisory `[lower, upper]` range.
///
/// The range is not enforced by the setters: suggested settings may legitimately land
/// outside it, and callers decide what to do with that via [`Dof::in_range`].
#[derive(Clone, Debug, PartialEq)]
pub struct Dof {
    name: String,
    lower: f64,
    upper: f64,
    value: f64,
}

impl Default for Dof {
    fn default() -> Self {
        Self {
            name: "undefined".to_owned(),
            lower: 0.0,
            upper: 0.0,
            value: 0.0,
        }
    }
}

impl Dof {
    pub fn new(name: impl Into<String>, lower: f64, upper: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
            value,
        }
    }

    /// Renames and re-ranges, keeping the current value.
    pub fn define(&mut self, name: impl Into<String>, lower: f64, upper: f64) {
        self.name = name.into();
        self.lower = lower;
        self.upper = upper;
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.upper
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_min(&mut self, lower: f64) {
        self.lower = lower;
    }

    pub fn set_max(&mut self, upper: f64) {
        self.upper = upper;
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// `lower <= value <= upper`.
    pub fn in_range(&self) -> bool {
        (self.lower..=self.upper).contains(&self.value)
    }
}
