pub mod cache;
pub mod elements;
pub mod finder;
pub mod geodesy;
pub mod manager;
pub mod orbit;
pub mod propagator;
pub mod report;
pub mod satcat;
