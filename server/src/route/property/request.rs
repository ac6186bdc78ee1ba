use error_stack::Report;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CheckAvailabilityDto, CreatePropertyDto, SearchPropertiesDto};
use kernel::interface::query::{PropertyFilter, PropertySort};
use kernel::prelude::entity::SelectLimit;
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};
use crate::route::parse_date;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<String>,
    city: Option<String>,
    country: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    property_type: Option<String>,
    guests: Option<i32>,
    sort_by: Option<String>,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    host_id: Uuid,
    title: String,
    description: Option<String>,
    city: String,
    country: String,
    property_type: Option<String>,
    bedrooms: Option<i32>,
    bathrooms: Option<i32>,
    max_guests: i32,
    price_per_night: Decimal,
    cleaning_fee: Option<Decimal>,
    extra_guest_fee: Option<Decimal>,
    service_fee_percentage: Option<Decimal>,
    min_stay: Option<i64>,
    max_stay: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    check_in: String,
    check_out: String,
}

pub struct Transformer;

impl Intake<SearchRequest> for Transformer {
    type To = SearchPropertiesDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        let sort = match input.sort_by.as_deref() {
            Some("price-low") => PropertySort::PriceLow,
            Some("price-high") => PropertySort::PriceHigh,
            Some("rating") | Some("recommended") => PropertySort::Rating,
            _ => PropertySort::Newest,
        };
        SearchPropertiesDto {
            filter: PropertyFilter {
                search: input.search,
                city: input.city,
                country: input.country,
                min_price: input.min_price,
                max_price: input.max_price,
                property_type: input.property_type.filter(|value| value != "any"),
                guests: input.guests,
                sort,
            },
            page: input.page.unwrap_or(1),
            limit: input.limit.map(SelectLimit::new).unwrap_or_default(),
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = Uuid;
    fn emit(&self, input: GetRequest) -> Self::To {
        input.id
    }
}

impl Intake<CreateRequest> for Transformer {
    type To = CreatePropertyDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreatePropertyDto {
            host_id: input.host_id,
            title: input.title,
            description: input.description,
            city: input.city,
            country: input.country,
            property_type: input
                .property_type
                .unwrap_or_else(|| "apartment".to_string()),
            bedrooms: input.bedrooms.unwrap_or(1),
            bathrooms: input.bathrooms.unwrap_or(1),
            max_guests: input.max_guests,
            price_per_night: input.price_per_night,
            cleaning_fee: input.cleaning_fee,
            extra_guest_fee: input.extra_guest_fee,
            service_fee_percentage: input.service_fee_percentage,
            min_stay: input.min_stay,
            max_stay: input.max_stay,
        }
    }
}

impl TryIntake<(Uuid, AvailabilityRequest)> for Transformer {
    type To = CheckAvailabilityDto;
    type Error = Report<KernelError>;
    fn emit(&self, (id, input): (Uuid, AvailabilityRequest)) -> Result<Self::To, Self::Error> {
        Ok(CheckAvailabilityDto {
            property_id: id,
            check_in: parse_date(&input.check_in)?,
            check_out: parse_date(&input.check_out)?,
        })
    }
}
