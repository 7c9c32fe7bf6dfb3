mod training;

pub use training::TrainingServiceImpl;
