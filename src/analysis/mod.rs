pub mod training;

pub use training::{
    default_start_date, total_hours_trained, training_graphs, weekly_hours_trained, TrainingGraph,
    TrainingSession,
};
