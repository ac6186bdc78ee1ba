use error_stack::Report;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::DependOnPropertyQuery;
use kernel::interface::query::PropertyQuery;
use kernel::interface::update::{DependOnPropertyModifier, PropertyModifier};
use kernel::prelude::entity::{
    CreatedAt, FeeSchedule, MaxGuests, Property, PropertyId, PropertyTitle, SelectOffset,
    UpdatedAt, UserId,
};
use kernel::KernelError;

use crate::transfer::{CreatePropertyDto, PropertyDto, PropertyPageDto, SearchPropertiesDto};

#[async_trait::async_trait]
pub trait SearchPropertyService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnPropertyQuery<Connection>
{
    async fn search_properties(
        &self,
        dto: SearchPropertiesDto,
    ) -> error_stack::Result<PropertyPageDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let page = dto.page.max(1);
        let limit = i64::from(dto.limit);
        let offset = SelectOffset::new((page - 1) * limit);

        let properties = self
            .property_query()
            .search(&mut con, &dto.filter, dto.limit, offset)
            .await?;
        let total = self.property_query().count(&mut con, &dto.filter).await?;
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Ok(PropertyPageDto {
            properties: properties.into_iter().map(PropertyDto::from).collect(),
            page,
            limit,
            total,
            total_pages,
        })
    }
}

impl<Connection: 'static + Send, T> SearchPropertyService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnPropertyQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait GetPropertyService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnPropertyQuery<Connection>
{
    async fn get_property(&self, id: Uuid) -> error_stack::Result<PropertyDto, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let property = self
            .property_query()
            .find_active_by_id(&mut con, &PropertyId::new(id))
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("Property")))?;
        Ok(PropertyDto::from(property))
    }
}

impl<Connection: 'static + Send, T> GetPropertyService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnPropertyQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreatePropertyService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnPropertyModifier<Connection>
{
    async fn create_property(
        &self,
        dto: CreatePropertyDto,
    ) -> error_stack::Result<PropertyDto, KernelError> {
        if dto.title.trim().is_empty() {
            return Err(Report::new(KernelError::validation("Title is required")));
        }
        if dto.max_guests < 1 {
            return Err(Report::new(KernelError::validation(
                "Property must accommodate at least one guest",
            )));
        }
        if dto.price_per_night < Decimal::ZERO {
            return Err(Report::new(KernelError::validation(
                "Nightly rate cannot be negative",
            )));
        }

        let now = OffsetDateTime::now_utc();
        let property = Property::new(
            PropertyId::new(Uuid::new_v4()),
            UserId::new(dto.host_id),
            PropertyTitle::new(dto.title),
            dto.description,
            dto.city,
            dto.country,
            dto.property_type,
            dto.bedrooms,
            dto.bathrooms,
            MaxGuests::new(dto.max_guests),
            FeeSchedule::new(
                dto.price_per_night,
                dto.cleaning_fee,
                dto.extra_guest_fee,
                dto.service_fee_percentage,
            ),
            dto.min_stay,
            dto.max_stay,
            true,
            false,
            Decimal::ZERO,
            0,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );

        let mut con = self.database_connection().transact().await?;
        self.property_modifier().create(&mut con, &property).await?;
        Ok(PropertyDto::from(property))
    }
}

impl<Connection: 'static + Send, T> CreatePropertyService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnPropertyModifier<Connection>
{
}
