pub mod distance;
pub mod json;
pub mod problem;
pub mod provider;
pub mod solution;
pub mod solver;

#[cfg(test)]
pub(crate) mod test_utils;
