pub mod queries;
pub mod snapshot;

pub use crate::domain::model::{
    Counterparty, Dataset, RealEstateObject, RealEstatePurpose, RealEstateType, Request,
    RequestType,
};
pub use crate::domain::ports::{DataProvider, QueryDefaults};
pub use crate::utils::error::Result;
