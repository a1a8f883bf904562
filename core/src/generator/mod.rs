use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that builds a populated [`Grid`] once the first clicked cell is known.
pub trait MinefieldGenerator {
    /// Generates a field for `config` where `safe` and its Moore neighborhood hold no mine.
    fn generate(self, config: FieldConfig, safe: Coord2) -> Result<Grid>;
}

/// Checks shared by every generator before any mine is placed.
fn validate_request(config: &FieldConfig, safe: Coord2) -> Result<Coord2> {
    config.validate()?;
    config.validate_coords(safe)
}
