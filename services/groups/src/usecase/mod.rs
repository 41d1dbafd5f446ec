pub mod admin_user;
pub mod group;
pub mod leadership;
pub mod membership;

#[cfg(test)]
pub(crate) mod test_support;
