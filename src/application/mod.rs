pub mod auth;
pub mod hashing;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
