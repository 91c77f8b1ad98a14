mod level;
mod side;
mod snapshot;

pub use level::BookLevel;
pub use side::Side;
pub use snapshot::DepthSnapshot;
