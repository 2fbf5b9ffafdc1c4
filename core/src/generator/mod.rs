use crate::*;
pub use growth::*;
pub use maze::*;
pub use minefield::*;

mod growth;
mod maze;
mod minefield;

/// Seeded generation strategy turning a validated config into a fresh playfield.
pub trait PlayfieldGenerator {
    type Config;
    type Output;

    fn generate(self, config: Self::Config) -> Self::Output;
}
