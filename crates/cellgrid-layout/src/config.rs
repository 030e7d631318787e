#![forbid(unsafe_code)]

//! Declarative container and per-child attributes.
//!
//! Both types deserialize from camelCase JSON with every field optional, so
//! a host can feed its own attribute sets through `serde` unchanged.
//!
//! ```json
//! { "columns": 4, "spacing": 2, "padding": { "left": 8, "right": 8 } }
//! ```

use std::time::Duration;

use cellgrid_core::geometry::Sides;
use cellgrid_core::gesture::GestureConfig;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, SpanAxis};
use crate::slot::Slot;

/// Cell side in density-independent pixels when the host gives no width.
pub const DEFAULT_CELL_SIZE_DP: f32 = 48.0;

/// Span value meaning "not specified".
pub const SPAN_UNSET: i32 = -1;

/// Container attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Number of columns; fixed once the container exists.
    pub columns: u16,
    /// Inset applied on every side of each child, in pixels.
    pub spacing: i32,
    pub padding: Sides,
    /// Fallback cell side in dp for unconstrained widths.
    pub default_cell_size: f32,
    /// Pixels per dp.
    pub density: f32,
    /// Slide displaced elements toward their provisional slots while dragging.
    pub gap_animation: bool,
    pub long_press_ms: u64,
    /// Manhattan distance in pixels a press may drift before it stops counting
    /// toward a long press.
    pub touch_slop: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            spacing: 0,
            padding: Sides::default(),
            default_cell_size: DEFAULT_CELL_SIZE_DP,
            density: 1.0,
            gap_animation: false,
            long_press_ms: 500,
            touch_slop: 8,
        }
    }
}

impl GridConfig {
    /// Parse a JSON attribute set and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, GridError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the column count.
    #[must_use]
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = columns;
        self
    }

    /// Set the per-child spacing.
    #[must_use]
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the container padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Enable or disable the gap animation.
    #[must_use]
    pub fn with_gap_animation(mut self, enabled: bool) -> Self {
        self.gap_animation = enabled;
        self
    }

    /// Reject values the layout engine cannot work with.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.columns == 0 {
            return Err(GridError::InvalidColumns {
                columns: self.columns,
            });
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(GridError::Config {
                field: "density",
                reason: format!("must be a positive number (got {})", self.density),
            });
        }
        if !(self.default_cell_size.is_finite() && self.default_cell_size > 0.0) {
            return Err(GridError::Config {
                field: "defaultCellSize",
                reason: format!(
                    "must be a positive number (got {})",
                    self.default_cell_size
                ),
            });
        }
        if self.spacing < 0 {
            return Err(GridError::Config {
                field: "spacing",
                reason: format!("must not be negative (got {})", self.spacing),
            });
        }
        Ok(())
    }

    /// Fallback cell side in pixels.
    #[must_use]
    pub fn fallback_cell_size(&self) -> f32 {
        self.default_cell_size * self.density
    }

    /// Gesture thresholds derived from this config.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            long_press_threshold: Duration::from_millis(self.long_press_ms),
            touch_slop: self.touch_slop,
        }
    }
}

/// Per-child attributes as declared by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlotAttrs {
    pub left: i32,
    pub top: i32,
    /// [`SPAN_UNSET`] resolves to 1.
    pub cells_width: i32,
    /// [`SPAN_UNSET`] resolves to 1.
    pub cells_height: i32,
}

impl Default for SlotAttrs {
    fn default() -> Self {
        Self {
            left: 0,
            top: 0,
            cells_width: SPAN_UNSET,
            cells_height: SPAN_UNSET,
        }
    }
}

impl SlotAttrs {
    /// Attributes for a slot at `(left, top)` spanning `width × height` cells.
    #[must_use]
    pub const fn new(left: i32, top: i32, cells_width: i32, cells_height: i32) -> Self {
        Self {
            left,
            top,
            cells_width,
            cells_height,
        }
    }

    /// Resolve into a [`Slot`] for a grid with `columns` columns.
    pub fn resolve(&self, columns: u16) -> Result<Slot, GridError> {
        if self.left < 0 || self.top < 0 {
            return Err(GridError::NegativeOrigin {
                left: self.left,
                top: self.top,
            });
        }
        let width = resolve_span(SpanAxis::Width, self.cells_width)?;
        let height = resolve_span(SpanAxis::Height, self.cells_height)?;
        let left = to_u16(self.left, "left")?;
        let top = to_u16(self.top, "top")?;
        let slot = Slot::new(left, top, width, height)?;
        slot.check_fits(columns)?;
        Ok(slot)
    }
}

impl From<Slot> for SlotAttrs {
    fn from(slot: Slot) -> Self {
        Self::new(
            i32::from(slot.left),
            i32::from(slot.top),
            i32::from(slot.width),
            i32::from(slot.height),
        )
    }
}

fn resolve_span(axis: SpanAxis, value: i32) -> Result<u16, GridError> {
    match value {
        SPAN_UNSET => Ok(1),
        v if v < 1 => Err(GridError::InvalidSpan { axis, value: v }),
        v => u16::try_from(v).map_err(|_| GridError::InvalidSpan { axis, value: v }),
    }
}

fn to_u16(value: i32, field: &'static str) -> Result<u16, GridError> {
    u16::try_from(value).map_err(|_| GridError::Config {
        field,
        reason: format!("{value} does not fit in 16 bits"),
    })
}
