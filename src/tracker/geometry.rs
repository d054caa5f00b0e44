use crate::{
    foundation::core::{Rect, SectionId},
    foundation::error::{FolioError, FolioResult},
};

/// Vertical extent of a section in document pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionBounds {
    /// Section id.
    pub id: SectionId,
    /// Distance from the document top.
    pub top: f64,
    /// Section height.
    pub height: f64,
}

impl SectionBounds {
    /// Build bounds, rejecting negative or non-finite geometry.
    pub fn new(id: impl Into<SectionId>, top: f64, height: f64) -> FolioResult<Self> {
        let id = id.into();
        if !top.is_finite() || !height.is_finite() || height < 0.0 {
            return Err(FolioError::config(format!(
                "section '{id}' has invalid bounds (top={top}, height={height})"
            )));
        }
        Ok(Self { id, top, height })
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Bounds as a full-width rectangle of `width`.
    pub fn to_rect(&self, width: f64) -> Rect {
        Rect::new(0.0, self.top, width, self.bottom())
    }

    /// Fraction of this section's height inside `viewport`, in `[0, 1]`.
    ///
    /// Zero-height sections are never visible.
    pub fn visible_fraction(&self, viewport: &Viewport) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let overlap = (self.bottom().min(viewport.bottom()) - self.top.max(viewport.scroll_top))
            .max(0.0);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}

/// Visible window onto the document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Viewport at `scroll_top` with `height`.
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }

    /// Bottom edge in document pixels.
    pub fn bottom(&self) -> f64 {
        self.scroll_top + self.height
    }
}

/// Stack sections top to bottom from `(id, height)` pairs.
pub fn stack_sections<I, S>(sections: I) -> FolioResult<Vec<SectionBounds>>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<SectionId>,
{
    let mut top = 0.0;
    let mut out = Vec::new();
    for (id, height) in sections {
        let b = SectionBounds::new(id, top, height)?;
        top = b.bottom();
        out.push(b);
    }
    Ok(out)
}

/// Total document height of stacked sections.
pub fn document_height(sections: &[SectionBounds]) -> f64 {
    sections.iter().map(SectionBounds::bottom).fold(0.0, f64::max)
}

#[cfg(test)]
#[path = "../../tests/unit/tracker/geometry.rs"]
mod tests;
