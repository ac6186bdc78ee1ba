use crate::entity::Review;
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewModifier<Connection>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        review: &Review,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnReviewModifier<Connection>: 'static + Sync + Send {
    type ReviewModifier: ReviewModifier<Connection>;
    fn review_modifier(&self) -> &Self::ReviewModifier;
}
