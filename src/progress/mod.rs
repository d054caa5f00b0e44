/// Loading-screen progress.
pub mod interpolator;
