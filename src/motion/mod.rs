pub mod sampler;
pub mod scorer;
