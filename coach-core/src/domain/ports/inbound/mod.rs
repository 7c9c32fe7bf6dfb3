mod training;

pub use training::*;
