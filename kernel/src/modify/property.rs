use rust_decimal::Decimal;

use crate::entity::{Property, PropertyId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PropertyModifier<Connection>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        property: &Property,
    ) -> error_stack::Result<(), KernelError>;

    /// Overwrite the running review aggregate on a property.
    async fn update_rating(
        &self,
        con: &mut Connection,
        id: &PropertyId,
        average_rating: Decimal,
        review_count: i64,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnPropertyModifier<Connection>: 'static + Sync + Send {
    type PropertyModifier: PropertyModifier<Connection>;
    fn property_modifier(&self) -> &Self::PropertyModifier;
}
