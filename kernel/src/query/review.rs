use crate::entity::{PropertyId, Review, SelectLimit, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewQuery<Connection>: 'static + Sync + Send {
    async fn find_by_property_id(
        &self,
        con: &mut Connection,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Review>, KernelError>;

    /// All ratings for a property, for the read-all-then-recompute
    /// aggregate update.
    async fn ratings_by_property_id(
        &self,
        con: &mut Connection,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<i16>, KernelError>;

    /// Reviews across every property owned by the host, newest first.
    async fn find_by_host_id(
        &self,
        con: &mut Connection,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Review>, KernelError>;
}

pub trait DependOnReviewQuery<Connection>: 'static + Sync + Send {
    type ReviewQuery: ReviewQuery<Connection>;
    fn review_query(&self) -> &Self::ReviewQuery;
}
