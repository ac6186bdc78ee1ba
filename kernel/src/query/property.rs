use rust_decimal::Decimal;

use crate::entity::{Property, PropertyId, SelectLimit, SelectOffset, UserId};
use crate::KernelError;

/// Filters applied by the listing search. Every field is optional; absent
/// fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub search: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub property_type: Option<String>,
    pub guests: Option<i32>,
    pub sort: PropertySort,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum PropertySort {
    PriceLow,
    PriceHigh,
    #[default]
    Newest,
    Rating,
}

#[async_trait::async_trait]
pub trait PropertyQuery<Connection>: 'static + Sync + Send {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError>;

    async fn find_active_by_id(
        &self,
        con: &mut Connection,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError>;

    async fn find_by_host_id(
        &self,
        con: &mut Connection,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Property>, KernelError>;

    async fn search(
        &self,
        con: &mut Connection,
        filter: &PropertyFilter,
        limit: SelectLimit,
        offset: SelectOffset,
    ) -> error_stack::Result<Vec<Property>, KernelError>;

    async fn count(
        &self,
        con: &mut Connection,
        filter: &PropertyFilter,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnPropertyQuery<Connection>: 'static + Sync + Send {
    type PropertyQuery: PropertyQuery<Connection>;
    fn property_query(&self) -> &Self::PropertyQuery;
}
