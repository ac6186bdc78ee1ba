pub use crate::error::*;

mod cache;
mod database;
mod entity;
mod error;
mod modify;
mod payment;
mod pricing;
mod query;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod pricing {
        pub use crate::pricing::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod database {
        pub use crate::database::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
    pub mod payment {
        pub use crate::payment::*;
    }
    pub mod cache {
        pub use crate::cache::*;
    }
}
