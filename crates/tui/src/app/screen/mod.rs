mod home;
mod mock;

pub(crate) use home::{HomeAction, HomeScreen};
pub(crate) use mock::MockProductService;
