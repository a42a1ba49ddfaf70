// Application layer - trend engines and use cases
pub mod collaborators;
pub mod diagnosis;
pub mod moving_average;
pub mod population;
pub mod series_synthesizer;
pub mod station;
pub mod trend_service;
