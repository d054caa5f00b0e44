use crate::{
    foundation::core::{Millis, Vec2},
    foundation::error::{FolioError, FolioResult},
    foundation::math::{FULL_TURN_DEG, wrap_degrees},
};

/// Offset of item `index` of `total` on a circle of `radius`, item 0 sitting at
/// `phase_offset_deg`.
///
/// Items are spaced `360 / total` degrees apart. Angles follow screen convention
/// (x right, y down), so positive angles run clockwise on screen.
pub fn orbit_offset(
    index: usize,
    total: usize,
    radius: f64,
    phase_offset_deg: f64,
) -> FolioResult<Vec2> {
    let angle = base_angle_deg(index, total, phase_offset_deg)?;
    check_radius(radius)?;
    Ok(polar(angle, radius))
}

/// Unrotated angle of item `index` of `total`, in degrees (not wrapped).
pub fn base_angle_deg(index: usize, total: usize, phase_offset_deg: f64) -> FolioResult<f64> {
    if total == 0 {
        return Err(FolioError::config("orbit ring must hold at least one item"));
    }
    if index >= total {
        return Err(FolioError::config(format!(
            "orbit index {index} is out of range for {total} items"
        )));
    }
    if !phase_offset_deg.is_finite() {
        return Err(FolioError::config("orbit phase offset must be finite"));
    }
    if total == 1 {
        return Ok(phase_offset_deg);
    }
    let step = FULL_TURN_DEG / (total as f64);
    Ok(phase_offset_deg + (index as f64) * step)
}

fn check_radius(radius: f64) -> FolioResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(FolioError::config(format!(
            "orbit radius must be a positive finite number, got {radius}"
        )));
    }
    Ok(())
}

fn polar(angle_deg: f64, radius: f64) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos() * radius, rad.sin() * radius)
}

/// Where one item sits on a ring for a given instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OrbitPlacement {
    /// Offset from the ring center.
    pub offset: Vec2,
    /// Displayed angle in `[0, 360)`, including rotation.
    pub angle_deg: f64,
    /// Rotation to apply to the item's own content so it stays upright.
    pub counter_rotation_deg: f64,
}

/// One concentric ring of the skills orbit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitRing {
    /// Distance from the shared center.
    pub radius: f64,
    /// Angle of item 0 before any rotation.
    #[serde(default)]
    pub phase_offset_deg: f64,
    /// Continuous rotation; negative spins the other way.
    #[serde(default)]
    pub rotation_deg_per_sec: f64,
    /// Spin item content against the ring so icons stay upright.
    #[serde(default = "default_counter_rotate")]
    pub counter_rotate: bool,
}

fn default_counter_rotate() -> bool {
    true
}

impl OrbitRing {
    /// A still ring of `radius`.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            phase_offset_deg: 0.0,
            rotation_deg_per_sec: 0.0,
            counter_rotate: default_counter_rotate(),
        }
    }

    /// Builder: rotation speed in degrees per second.
    pub fn spinning(mut self, deg_per_sec: f64) -> Self {
        self.rotation_deg_per_sec = deg_per_sec;
        self
    }

    /// Builder: starting angle of item 0.
    pub fn with_phase(mut self, deg: f64) -> Self {
        self.phase_offset_deg = deg;
        self
    }

    /// Validate ring parameters.
    pub fn validate(&self) -> FolioResult<()> {
        check_radius(self.radius)?;
        if !self.phase_offset_deg.is_finite() {
            return Err(FolioError::config("orbit phase offset must be finite"));
        }
        if !self.rotation_deg_per_sec.is_finite() {
            return Err(FolioError::config("orbit rotation rate must be finite"));
        }
        Ok(())
    }

    /// Rotation accumulated after `elapsed`.
    pub fn spin_deg(&self, elapsed: Millis) -> f64 {
        self.rotation_deg_per_sec * elapsed.as_secs_f64()
    }

    /// Placement of item `index` of `total` at `elapsed`.
    pub fn place(&self, index: usize, total: usize, elapsed: Millis) -> FolioResult<OrbitPlacement> {
        self.validate()?;
        let spin = self.spin_deg(elapsed);
        let angle = base_angle_deg(index, total, self.phase_offset_deg)? + spin;
        let counter_rotation_deg = if self.counter_rotate { -spin } else { 0.0 };
        Ok(OrbitPlacement {
            offset: polar(angle, self.radius),
            angle_deg: wrap_degrees(angle),
            counter_rotation_deg,
        })
    }

    /// Placements for all `total` items at `elapsed`.
    pub fn place_all(&self, total: usize, elapsed: Millis) -> FolioResult<Vec<OrbitPlacement>> {
        (0..total).map(|i| self.place(i, total, elapsed)).collect()
    }
}

/// Something that can sit on an orbit ring.
pub trait Orbiting {
    /// Stable key for the placed item (usually its display name).
    fn orbit_key(&self) -> &str;
    /// Index of the ring the item belongs to.
    fn orbit_ring(&self) -> usize;
}

/// One item resolved onto its ring.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlacedItem {
    /// Item key.
    pub key: String,
    /// Ring index.
    pub ring: usize,
    /// Index within the ring.
    pub slot: usize,
    /// Placement at the sampled instant.
    pub placement: OrbitPlacement,
}

/// Concentric rings with items assigned to them.
#[derive(Clone, Debug)]
pub struct OrbitSystem {
    rings: Vec<OrbitRing>,
    // Item keys per ring, in declaration order.
    members: Vec<Vec<String>>,
}

impl OrbitSystem {
    /// Group `items` by ring. Rings may be left empty; items pointing at a missing ring are rejected.
    pub fn new<I: Orbiting>(rings: &[OrbitRing], items: &[I]) -> FolioResult<Self> {
        if rings.is_empty() {
            return Err(FolioError::config("orbit system needs at least one ring"));
        }
        for (idx, ring) in rings.iter().enumerate() {
            ring.validate()
                .map_err(|e| FolioError::config(format!("orbit ring {idx}: {e}")))?;
        }

        let mut members = vec![Vec::new(); rings.len()];
        for item in items {
            let ring = item.orbit_ring();
            let Some(slot) = members.get_mut(ring) else {
                return Err(FolioError::config(format!(
                    "'{}' references orbit ring {ring}, but only {} ring(s) exist",
                    item.orbit_key(),
                    rings.len()
                )));
            };
            slot.push(item.orbit_key().to_owned());
        }

        Ok(Self {
            rings: rings.to_vec(),
            members,
        })
    }

    /// Ring table.
    pub fn rings(&self) -> &[OrbitRing] {
        &self.rings
    }

    /// Number of items on ring `ring`.
    pub fn ring_len(&self, ring: usize) -> usize {
        self.members.get(ring).map_or(0, Vec::len)
    }

    /// Total number of placed items.
    pub fn len(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    /// Whether no ring holds an item.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every item's placement at `elapsed`, ring by ring.
    #[tracing::instrument(skip(self), level = "trace")]
    pub fn frame(&self, elapsed: Millis) -> FolioResult<Vec<PlacedItem>> {
        let mut out = Vec::with_capacity(self.len());
        for (ring_idx, (ring, keys)) in self.rings.iter().zip(&self.members).enumerate() {
            let total = keys.len();
            for (slot, key) in keys.iter().enumerate() {
                out.push(PlacedItem {
                    key: key.clone(),
                    ring: ring_idx,
                    slot,
                    placement: ring.place(slot, total, elapsed)?,
                });
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/orbit.rs"]
mod tests;
