//! Shared numeric constants for the editor crate.

// ── Element placement ───────────────────────────────────────────

/// Default x position for newly added elements, in canvas units.
pub const DEFAULT_ELEMENT_X: f64 = 50.0;

/// Default y position for newly added elements, in canvas units.
pub const DEFAULT_ELEMENT_Y: f64 = 50.0;

/// Offset applied to pasted elements on each paste so copies never land
/// exactly on their source.
pub const PASTE_OFFSET: f64 = 20.0;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of undo snapshots retained; the oldest entry is evicted
/// once the ring is full.
pub const MAX_HISTORY: usize = 100;

// ── Page sizes (canvas units) ───────────────────────────────────

/// A4 in landscape orientation.
pub const A4_LANDSCAPE: (f64, f64) = (842.0, 595.0);

/// A4 in portrait orientation.
pub const A4_PORTRAIT: (f64, f64) = (595.0, 842.0);

/// US Letter in landscape orientation.
pub const US_LETTER_LANDSCAPE: (f64, f64) = (792.0, 612.0);

/// US Letter in portrait orientation.
pub const US_LETTER_PORTRAIT: (f64, f64) = (612.0, 792.0);
