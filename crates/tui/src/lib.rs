pub mod busy;
pub mod error;
pub mod export;
pub mod facade;
pub mod fragment;
pub mod host;
pub mod i18n;
pub mod modal;
pub mod promise;
pub mod routing;
pub mod select;
pub mod service;
pub mod service_error;
pub mod signature;
pub mod storage;

pub use error::FacadeError;
pub use facade::Facade;
pub use host::HostUi;
