pub mod dupnorm;
pub mod genome;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_utils;
