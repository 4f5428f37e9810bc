pub mod fixtures;
#[cfg(test)]
pub mod mocks;
pub mod prepare_env;
