//! Panel constraint declarations and their resolution into percent space.
//!
//! Constraints are declared by the panel's owner in exactly one unit family
//! per bound ([`Extent`] makes mixed declarations unrepresentable) and are
//! re-resolved against the group's current main-axis size whenever a layout
//! is computed.

/// A size bound, declared in exactly one unit family.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Extent {
    /// Percentage of the group's main-axis size, in `0.0..=100.0`.
    Percent(f64),
    /// Absolute size in pixels, resolved against the group at layout time.
    Pixels(f64),
}

impl Extent {
    /// Resolve to a percentage of `container_px`.
    ///
    /// A pixel extent with an unknown container size (`container_px <= 0`)
    /// is unsatisfiable and resolves to zero; percent extents are unaffected.
    pub fn to_percent(self, container_px: f64) -> f64 {
        match self {
            Self::Percent(value) => value,
            Self::Pixels(value) => {
                if container_px <= 0.0 {
                    0.0
                } else {
                    value / container_px * 100.0
                }
            }
        }
    }

    pub fn is_pixels(self) -> bool {
        matches!(self, Self::Pixels(_))
    }
}

/// Per-panel size constraints, as declared by the panel's owner.
///
/// All bounds are optional; missing bounds default to min `0%`, max `100%`,
/// collapsed `0%`. Conflicting declarations (min above max, default outside
/// the min/max range, collapsed above min) are auto-corrected to the nearest
/// valid value and reported as warnings in debug builds; they are owner
/// mistakes, not runtime failures.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConstraints {
    /// Whether the panel snaps to its collapsed size instead of shrinking
    /// below its minimum.
    pub collapsible: bool,
    pub collapsed_size: Option<Extent>,
    pub default_size: Option<Extent>,
    pub min_size: Option<Extent>,
    pub max_size: Option<Extent>,
}

impl PanelConstraints {
    /// Whether any declared bound needs the container's pixel size to resolve.
    pub fn uses_pixels(&self) -> bool {
        [
            self.collapsed_size,
            self.default_size,
            self.min_size,
            self.max_size,
        ]
        .iter()
        .flatten()
        .any(|extent| extent.is_pixels())
    }

    /// Normalize into percent space for the given container size.
    pub fn resolve(&self, container_px: f64) -> ResolvedConstraints {
        let mut resolved = ResolvedConstraints {
            collapsible: self.collapsible,
            collapsed: self
                .collapsed_size
                .map_or(0.0, |extent| extent.to_percent(container_px)),
            default: self
                .default_size
                .map(|extent| extent.to_percent(container_px)),
            min: self
                .min_size
                .map_or(0.0, |extent| extent.to_percent(container_px)),
            max: self
                .max_size
                .map_or(100.0, |extent| extent.to_percent(container_px)),
        };
        resolved.sanitize();
        resolved
    }
}

/// Resolve a whole group's constraints against one container size.
pub fn resolve_constraints(
    constraints: &[PanelConstraints],
    container_px: f64,
) -> Vec<ResolvedConstraints> {
    constraints
        .iter()
        .map(|constraints| constraints.resolve(container_px))
        .collect()
}

/// One panel's constraints, normalized into percent space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConstraints {
    pub collapsible: bool,
    pub collapsed: f64,
    pub default: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl ResolvedConstraints {
    /// Auto-correct conflicting declarations to the nearest valid value.
    fn sanitize(&mut self) {
        if self.min > self.max {
            if cfg!(debug_assertions) {
                log::warn!(
                    "panel min size {:.1}% exceeds max size {:.1}%; lowering min",
                    self.min,
                    self.max
                );
            }
            self.min = self.max;
        }
        if self.collapsed > self.min {
            if cfg!(debug_assertions) {
                log::warn!(
                    "panel collapsed size {:.1}% exceeds min size {:.1}%; lowering collapsed",
                    self.collapsed,
                    self.min
                );
            }
            self.collapsed = self.min;
        }
        if let Some(default) = self.default {
            let clamped = default.max(self.min).min(self.max);
            if clamped != default {
                if cfg!(debug_assertions) {
                    log::warn!(
                        "panel default size {default:.1}% outside [{:.1}%, {:.1}%]; clamping",
                        self.min,
                        self.max
                    );
                }
                self.default = Some(clamped);
            }
        }
    }
}
